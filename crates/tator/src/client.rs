//! HTTP client for the Tator REST API.
//!
//! Wraps the count/list/update/delete primitives using [`reqwest`].
//! Authentication is a static token sent as `Authorization: Token ...`
//! on every request.

use reqwest::Method;
use serde_json::Value;

use mantis_core::filter::TatorQuery;
use mantis_core::types::TatorId;

use crate::models::{
    Localization, LocalizationBulkUpdate, LocalizationType, Media, MediaType, Project, Version,
};
use crate::query::query_pairs;

/// Client for a single Tator deployment.
pub struct TatorClient {
    client: reqwest::Client,
    host: String,
    token: String,
}

/// Errors from the Tator REST layer.
#[derive(Debug, thiserror::Error)]
pub enum TatorError {
    /// The HTTP request itself failed (network, DNS, TLS, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Tator returned a non-2xx status code.
    #[error("Tator API error ({status}): {body}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },
}

impl TatorClient {
    /// Create a new client.
    ///
    /// * `host`  - Base URL, e.g. `https://tator.example.org`.
    /// * `token` - API token for the `Authorization: Token` header.
    pub fn new(host: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            host: host.into().trim_end_matches('/').to_string(),
            token: token.into(),
        }
    }

    /// Base URL this client talks to.
    pub fn host(&self) -> &str {
        &self.host
    }

    // ---- directory calls ----

    /// List every project visible to the token.
    pub async fn get_project_list(&self) -> Result<Vec<Project>, TatorError> {
        self.get_json("rest/Projects", &[]).await
    }

    /// List the localization (annotation) types of a project.
    pub async fn get_localization_type_list(
        &self,
        project: TatorId,
    ) -> Result<Vec<LocalizationType>, TatorError> {
        self.get_json(&format!("rest/LocalizationTypes/{project}"), &[])
            .await
    }

    /// List the media types of a project.
    pub async fn get_media_type_list(
        &self,
        project: TatorId,
    ) -> Result<Vec<MediaType>, TatorError> {
        self.get_json(&format!("rest/MediaTypes/{project}"), &[]).await
    }

    /// List the annotation versions of a project.
    pub async fn get_version_list(&self, project: TatorId) -> Result<Vec<Version>, TatorError> {
        self.get_json(&format!("rest/Versions/{project}"), &[]).await
    }

    // ---- counts ----

    /// Count media of one type matching the filters.
    pub async fn get_media_count(
        &self,
        project: TatorId,
        media_type: TatorId,
        filters: &TatorQuery,
    ) -> Result<u64, TatorError> {
        let mut pairs = vec![("type".to_string(), media_type.to_string())];
        pairs.extend(query_pairs(filters));
        self.get_json(&format!("rest/MediaCount/{project}"), &pairs)
            .await
    }

    /// Count localizations of one type matching the filters.
    pub async fn get_localization_count(
        &self,
        project: TatorId,
        loc_type: TatorId,
        filters: &TatorQuery,
    ) -> Result<u64, TatorError> {
        let mut pairs = vec![("type".to_string(), loc_type.to_string())];
        pairs.extend(query_pairs(filters));
        self.get_json(&format!("rest/LocalizationCount/{project}"), &pairs)
            .await
    }

    // ---- lists ----

    /// One page of media matching the filters, bounded by `[start, stop)`.
    pub async fn get_media_list(
        &self,
        project: TatorId,
        start: usize,
        stop: usize,
        filters: &TatorQuery,
    ) -> Result<Vec<Media>, TatorError> {
        let mut pairs = vec![
            ("start".to_string(), start.to_string()),
            ("stop".to_string(), stop.to_string()),
        ];
        pairs.extend(query_pairs(filters));
        self.get_json(&format!("rest/Medias/{project}"), &pairs).await
    }

    /// Localizations of one type matching the filters.
    pub async fn get_localization_list(
        &self,
        project: TatorId,
        loc_type: TatorId,
        filters: &TatorQuery,
    ) -> Result<Vec<Localization>, TatorError> {
        let mut pairs = vec![("type".to_string(), loc_type.to_string())];
        pairs.extend(query_pairs(filters));
        self.get_json(&format!("rest/Localizations/{project}"), &pairs)
            .await
    }

    /// A single localization by id.
    pub async fn get_localization(&self, id: TatorId) -> Result<Localization, TatorError> {
        self.get_json(&format!("rest/Localization/{id}"), &[]).await
    }

    // ---- mutations ----

    /// Bulk attribute patch on the localizations named in `update.ids`.
    pub async fn update_localization_list(
        &self,
        project: TatorId,
        loc_type: TatorId,
        update: &LocalizationBulkUpdate,
    ) -> Result<Value, TatorError> {
        let pairs = vec![("type".to_string(), loc_type.to_string())];
        let response = self
            .request(Method::PATCH, &format!("rest/Localizations/{project}"))
            .query(&pairs)
            .json(update)
            .send()
            .await?;
        Self::parse_response(response).await
    }

    /// Bulk delete of the localizations matching the filters (typically
    /// a media-id batch plus attribute predicates).
    pub async fn delete_localization_list(
        &self,
        project: TatorId,
        filters: &TatorQuery,
    ) -> Result<Value, TatorError> {
        let pairs = query_pairs(filters);
        let response = self
            .request(Method::DELETE, &format!("rest/Localizations/{project}"))
            .query(&pairs)
            .send()
            .await?;
        Self::parse_response(response).await
    }

    // ---- private helpers ----

    fn request(&self, method: Method, path: &str) -> reqwest::RequestBuilder {
        self.client
            .request(method, format!("{}/{path}", self.host))
            .header("Authorization", format!("Token {}", self.token))
    }

    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        pairs: &[(String, String)],
    ) -> Result<T, TatorError> {
        let response = self.request(Method::GET, path).query(&pairs).send().await?;
        Self::parse_response(response).await
    }

    /// Ensure the response has a success status code.  Returns the
    /// response unchanged on success, or a [`TatorError::Api`] carrying
    /// the status and body text on failure.
    async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, TatorError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(TatorError::Api {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }

    /// Parse a successful JSON response body into the expected type.
    async fn parse_response<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, TatorError> {
        let response = Self::ensure_success(response).await?;
        Ok(response.json::<T>().await?)
    }
}
