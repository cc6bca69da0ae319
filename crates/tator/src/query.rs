//! Rendering of [`TatorQuery`] values into REST query parameters.
//!
//! Attribute predicate lists become repeated parameters; `media_id` is
//! comma-joined (the REST API accepts a CSV id list in one parameter).

use mantis_core::filter::TatorQuery;

/// Render the keyword filters as URL query pairs.
pub fn query_pairs(query: &TatorQuery) -> Vec<(String, String)> {
    let mut pairs = Vec::new();

    let lists = [
        ("attribute", &query.attribute),
        ("attribute_contains", &query.attribute_contains),
        ("attribute_lt", &query.attribute_lt),
        ("related_attribute", &query.related_attribute),
        ("related_attribute_contains", &query.related_attribute_contains),
        ("related_attribute_lt", &query.related_attribute_lt),
    ];
    for (key, values) in lists {
        for value in values {
            pairs.push((key.to_string(), value.clone()));
        }
    }

    if let Some(version) = query.version {
        pairs.push(("version".to_string(), version.to_string()));
    }

    if !query.media_id.is_empty() {
        let ids = query
            .media_id
            .iter()
            .map(|id| id.to_string())
            .collect::<Vec<_>>()
            .join(",");
        pairs.push(("media_id".to_string(), ids));
    }

    pairs
}

#[cfg(test)]
mod tests {
    use super::*;
    use mantis_core::filter::{AttrFilter, FilterAxis, FilterOp, FilterSet};

    #[test]
    fn renders_repeated_attribute_parameters() {
        let query = FilterSet::new()
            .with(FilterAxis::Primary, AttrFilter::equals("cluster", "C3"))
            .with(FilterAxis::Primary, AttrFilter::flag("verified", false))
            .build();

        let pairs = query_pairs(&query);
        assert_eq!(
            pairs,
            vec![
                ("attribute".to_string(), "cluster::C3".to_string()),
                ("attribute".to_string(), "verified::False".to_string()),
            ]
        );
    }

    #[test]
    fn renders_related_and_threshold_keys() {
        let query = FilterSet::new()
            .with(
                FilterAxis::Related,
                AttrFilter::media_name(FilterOp::Includes, "_200m_").unwrap(),
            )
            .with(FilterAxis::Primary, AttrFilter::less_than("saliency", 300))
            .build();

        let pairs = query_pairs(&query);
        assert!(pairs.contains(&("attribute_lt".to_string(), "saliency::300".to_string())));
        assert!(pairs.contains(&(
            "related_attribute_contains".to_string(),
            "$name::_200m_".to_string()
        )));
    }

    #[test]
    fn media_ids_are_comma_joined() {
        let query = FilterSet::new().with_media_ids(&[4, 8, 15]).build();
        let pairs = query_pairs(&query);
        assert_eq!(pairs, vec![("media_id".to_string(), "4,8,15".to_string())]);
    }

    #[test]
    fn version_is_single_parameter() {
        let query = FilterSet::new().with_version(Some(12)).build();
        assert_eq!(
            query_pairs(&query),
            vec![("version".to_string(), "12".to_string())]
        );
    }

    #[test]
    fn empty_query_renders_nothing() {
        assert!(query_pairs(&TatorQuery::default()).is_empty());
    }
}
