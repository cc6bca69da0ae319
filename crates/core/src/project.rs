//! Project specification and annotation/media type-name matching.

use serde::Serialize;

use crate::types::TatorId;

/// Localization type names recognized as the box annotation type.
pub const BOX_TYPE_NAMES: [&str; 2] = ["boxes", "box"];

/// Media type names recognized as the image type.
pub const IMAGE_TYPE_NAMES: [&str; 2] = ["images", "image"];

/// Media type names recognized as the video type.
pub const VIDEO_TYPE_NAMES: [&str; 2] = ["videos", "video"];

/// Identifiers an operation needs for one project, resolved per request
/// from the project directory plus live type-list lookups.
///
/// The `Option` fields signal "type not found in this project" — a
/// distinct failure mode from an unknown project name, and one callers
/// must check before issuing typed count or mutation calls.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectSpec {
    pub project_name: String,
    pub project_id: TatorId,
    pub box_type: Option<TatorId>,
    pub image_type: Option<TatorId>,
    pub video_type: Option<TatorId>,
}

/// First type whose lower-cased name matches one of `names`.
///
/// First match wins; no match yields `None` (the caller's "type not
/// found" signal).
pub fn match_type_id<'a, I>(names: &[&str], types: I) -> Option<TatorId>
where
    I: IntoIterator<Item = (TatorId, &'a str)>,
{
    types
        .into_iter()
        .find(|(_, type_name)| {
            let lower = type_name.to_lowercase();
            names.iter().any(|candidate| *candidate == lower)
        })
        .map(|(id, _)| id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_case_insensitively() {
        let types = [(3, "Boxes"), (4, "Points")];
        assert_eq!(match_type_id(&BOX_TYPE_NAMES, types), Some(3));
    }

    #[test]
    fn matches_singular_and_plural() {
        assert_eq!(match_type_id(&IMAGE_TYPE_NAMES, [(9, "Image")]), Some(9));
        assert_eq!(match_type_id(&IMAGE_TYPE_NAMES, [(9, "images")]), Some(9));
    }

    #[test]
    fn first_match_wins() {
        let types = [(1, "Box"), (2, "Boxes")];
        assert_eq!(match_type_id(&BOX_TYPE_NAMES, types), Some(1));
    }

    #[test]
    fn no_match_is_none() {
        let types = [(5, "Lines"), (6, "Dots")];
        assert_eq!(match_type_id(&BOX_TYPE_NAMES, types), None);
        assert_eq!(match_type_id(&VIDEO_TYPE_NAMES, std::iter::empty()), None);
    }
}
