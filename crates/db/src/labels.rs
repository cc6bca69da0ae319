//! Label-count aggregates over `public.main_localization`.
//!
//! Counts are returned as insertion-ordered maps (sorted by descending
//! count) so the JSON responses keep the most common labels first.

use indexmap::IndexMap;
use sqlx::PgPool;

use mantis_core::types::TatorId;

/// Noise clusters (`...C-1...`) are excluded from cluster reports.
const NOISE_CLUSTER_MARK: &str = "%C-1%";

/// Aggregate label-count queries.
pub struct LabelCountRepo;

impl LabelCountRepo {
    /// Label → count over all verified localizations of a project,
    /// most common first.
    pub async fn verified_counts(
        pool: &PgPool,
        project_id: TatorId,
    ) -> Result<IndexMap<String, i64>, sqlx::Error> {
        let rows: Vec<(String, i64)> = sqlx::query_as(
            "SELECT attributes->>'Label' AS label, COUNT(*) AS count
             FROM public.main_localization
             WHERE attributes ? 'Label'
               AND project = $1
               AND attributes->>'verified' = 'true'
             GROUP BY attributes->>'Label'
             ORDER BY count DESC",
        )
        .bind(project_id)
        .fetch_all(pool)
        .await?;

        Ok(rows.into_iter().collect())
    }

    /// Label → count for localizations in a version whose score meets
    /// the threshold, most common first.
    pub async fn counts_by_score(
        pool: &PgPool,
        project_id: TatorId,
        version_id: TatorId,
        min_score: f64,
    ) -> Result<IndexMap<String, i64>, sqlx::Error> {
        let rows: Vec<(String, i64)> = sqlx::query_as(
            "SELECT attributes->>'Label' AS label, COUNT(*) AS count
             FROM public.main_localization
             WHERE attributes ? 'Label'
               AND attributes ? 'score'
               AND project = $1
               AND version = $2
               AND (attributes->>'score')::float8 >= $3
             GROUP BY attributes->>'Label'
             ORDER BY count DESC",
        )
        .bind(project_id)
        .bind(version_id)
        .bind(min_score)
        .fetch_all(pool)
        .await?;

        Ok(rows.into_iter().collect())
    }

    /// Label → count for clustered localizations in a version, noise
    /// clusters excluded, most common first.
    pub async fn counts_by_cluster(
        pool: &PgPool,
        project_id: TatorId,
        version_id: TatorId,
    ) -> Result<IndexMap<String, i64>, sqlx::Error> {
        let rows: Vec<(String, i64)> = sqlx::query_as(
            "SELECT attributes->>'Label' AS label, COUNT(*) AS count
             FROM public.main_localization
             WHERE attributes ? 'Label'
               AND project = $1
               AND version = $2
               AND attributes->>'cluster' NOT LIKE $3
             GROUP BY attributes->>'Label'
             ORDER BY count DESC",
        )
        .bind(project_id)
        .bind(version_id)
        .bind(NOISE_CLUSTER_MARK)
        .fetch_all(pool)
        .await?;

        Ok(rows.into_iter().collect())
    }

    /// Label → attribute-value → count for clustered localizations,
    /// grouped by an extra attribute (e.g. depth, altitude).
    pub async fn counts_by_cluster_attribute(
        pool: &PgPool,
        project_id: TatorId,
        version_id: TatorId,
        attribute: &str,
    ) -> Result<IndexMap<String, IndexMap<String, i64>>, sqlx::Error> {
        let rows: Vec<(String, String, i64)> = sqlx::query_as(
            "SELECT attributes->>'Label' AS label,
                    attributes->>$4 AS attribute_value,
                    COUNT(*) AS count
             FROM public.main_localization
             WHERE attributes ? 'Label'
               AND attributes ? $4
               AND project = $1
               AND version = $2
               AND attributes->>'cluster' NOT LIKE $3
             GROUP BY attributes->>'Label', attributes->>$4",
        )
        .bind(project_id)
        .bind(version_id)
        .bind(NOISE_CLUSTER_MARK)
        .bind(attribute)
        .fetch_all(pool)
        .await?;

        let mut nested: IndexMap<String, IndexMap<String, i64>> = IndexMap::new();
        for (label, attribute_value, count) in rows {
            nested
                .entry(label)
                .or_default()
                .insert(attribute_value, count);
        }
        Ok(nested)
    }
}
