//! Wire types for the subset of the Tator REST API this service uses.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use mantis_core::types::TatorId;

/// A Tator project row.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Project {
    pub id: TatorId,
    pub name: String,
}

/// A localization (annotation) type, e.g. "Boxes".
#[derive(Debug, Clone, Deserialize)]
pub struct LocalizationType {
    pub id: TatorId,
    pub name: String,
}

/// A media type, e.g. "Images" or "Videos".
#[derive(Debug, Clone, Deserialize)]
pub struct MediaType {
    pub id: TatorId,
    pub name: String,
}

/// A named annotation version (revision branch).
#[derive(Debug, Clone, Deserialize)]
pub struct Version {
    pub id: TatorId,
    pub name: String,
}

/// A media item (image or video).
#[derive(Debug, Clone, Deserialize)]
pub struct Media {
    pub id: TatorId,
    #[serde(default)]
    pub name: Option<String>,
}

/// An annotated bounding region within a media item.
///
/// Attributes carry the free-form annotation payload (`Label`,
/// `cluster`, `saliency`, `verified`, `delete`, ...).
#[derive(Debug, Clone, Deserialize)]
pub struct Localization {
    pub id: TatorId,
    #[serde(default)]
    pub attributes: Map<String, Value>,
}

impl Localization {
    /// String view of an attribute, when present and a string.
    pub fn attr_str(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).and_then(Value::as_str)
    }
}

/// Body of a bulk attribute patch: one call updates `attributes` on all
/// of `ids`.  `in_place: 1` asks the server to modify the rows rather
/// than versioning them.
#[derive(Debug, Clone, Serialize)]
pub struct LocalizationBulkUpdate {
    pub attributes: Value,
    pub ids: Vec<TatorId>,
    pub in_place: u8,
}

impl LocalizationBulkUpdate {
    pub fn new(attributes: Value, ids: Vec<TatorId>) -> Self {
        Self {
            attributes,
            ids,
            in_place: 1,
        }
    }
}
