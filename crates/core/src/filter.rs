//! Attribute-filter model and keyword-filter construction.
//!
//! Tator's list/count/delete endpoints take attribute predicates encoded
//! as `name::value` strings, spread across several keyword parameters
//! (`attribute`, `attribute_contains`, `attribute_lt`, and their
//! `related_` counterparts for cross-entity filtering).  This module is
//! the single place that mapping lives: a declarative [`FilterSet`] is
//! built once per query axis into an immutable [`TatorQuery`].

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::TatorId;

// ---------------------------------------------------------------------------
// Filter operators
// ---------------------------------------------------------------------------

/// How an attribute value is matched.
///
/// `Equals` and `Includes` differ only in whether the match is exact or
/// substring.  `LessThan` is numeric-only (saliency thresholds).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FilterOp {
    Includes,
    Equals,
    LessThan,
}

impl FilterOp {
    /// Parse a wire-level filter tag.  Anything other than the three
    /// known tags is an [`CoreError::InvalidFilterType`].
    pub fn parse(tag: &str) -> Result<Self, CoreError> {
        match tag {
            "Includes" => Ok(Self::Includes),
            "Equals" => Ok(Self::Equals),
            "LessThan" => Ok(Self::LessThan),
            other => Err(CoreError::InvalidFilterType {
                given: other.to_string(),
            }),
        }
    }

    /// Verb used in human-readable summaries ("medias that include ...").
    pub fn verb(self) -> &'static str {
        match self {
            Self::Includes => "include",
            Self::Equals => "equals",
            Self::LessThan => "are less than",
        }
    }
}

// ---------------------------------------------------------------------------
// Attribute predicates
// ---------------------------------------------------------------------------

/// A single attribute predicate against a named attribute path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttrFilter {
    pub name: String,
    pub value: String,
    pub op: FilterOp,
}

impl AttrFilter {
    /// Exact-match predicate.
    pub fn equals(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            op: FilterOp::Equals,
        }
    }

    /// Substring-match predicate.
    pub fn contains(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            op: FilterOp::Includes,
        }
    }

    /// Numeric-threshold predicate (strictly less than).
    pub fn less_than(name: impl Into<String>, value: impl ToString) -> Self {
        Self {
            name: name.into(),
            value: value.to_string(),
            op: FilterOp::LessThan,
        }
    }

    /// Boolean-flag equality predicate (`verified`, `delete`).
    pub fn flag(name: impl Into<String>, value: bool) -> Self {
        Self::equals(name, if value { "True" } else { "False" })
    }

    /// Media-name predicate against the built-in `$name` attribute.
    ///
    /// Only `Equals` (exact) and `Includes` (substring) are meaningful
    /// for a name match; `LessThan` is rejected.
    pub fn media_name(op: FilterOp, name: impl Into<String>) -> Result<Self, CoreError> {
        match op {
            FilterOp::Equals | FilterOp::Includes => Ok(Self {
                name: "$name".to_string(),
                value: name.into(),
                op,
            }),
            FilterOp::LessThan => Err(CoreError::InvalidFilterType {
                given: "LessThan".to_string(),
            }),
        }
    }

    /// Tator wire encoding: `name::value`.
    pub fn encode(&self) -> String {
        format!("{}::{}", self.name, self.value)
    }
}

// ---------------------------------------------------------------------------
// Query axes
// ---------------------------------------------------------------------------

/// Which entity a predicate applies to, relative to the queried entity.
///
/// When counting media, a localization predicate sits on the `Related`
/// axis; when counting localizations, the media-name predicate does.
/// The two axes never collide: related predicates always land under the
/// `related_` prefixed keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterAxis {
    Primary,
    Related,
}

// ---------------------------------------------------------------------------
// FilterSet -> TatorQuery
// ---------------------------------------------------------------------------

/// Declarative set of predicates for one query.
///
/// Built fresh per query axis; two correlated queries (media count,
/// localization count) never share an accumulator.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterSet {
    criteria: Vec<(FilterAxis, AttrFilter)>,
    version: Option<TatorId>,
    media_ids: Vec<TatorId>,
}

impl FilterSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a predicate on the given axis.
    pub fn with(mut self, axis: FilterAxis, filter: AttrFilter) -> Self {
        self.criteria.push((axis, filter));
        self
    }

    /// Add a predicate only when present (optional media-name criteria).
    pub fn with_opt(self, axis: FilterAxis, filter: Option<AttrFilter>) -> Self {
        match filter {
            Some(f) => self.with(axis, f),
            None => self,
        }
    }

    /// Scope the query to a named annotation version.
    pub fn with_version(mut self, version: Option<TatorId>) -> Self {
        self.version = version;
        self
    }

    /// Restrict the query to an explicit media-id batch.
    pub fn with_media_ids(mut self, ids: &[TatorId]) -> Self {
        self.media_ids = ids.to_vec();
        self
    }

    /// Build the keyword-filter shape the Tator client consumes.
    ///
    /// Pure transform: each predicate lands in exactly one parameter
    /// list, selected by its axis and operator.  The `related_` prefix
    /// is applied uniformly to the same base key the operator would use
    /// on the primary axis.
    pub fn build(&self) -> TatorQuery {
        let mut query = TatorQuery {
            version: self.version,
            media_id: self.media_ids.clone(),
            ..TatorQuery::default()
        };

        for (axis, filter) in &self.criteria {
            let target = match (axis, filter.op) {
                (FilterAxis::Primary, FilterOp::Equals) => &mut query.attribute,
                (FilterAxis::Primary, FilterOp::Includes) => &mut query.attribute_contains,
                (FilterAxis::Primary, FilterOp::LessThan) => &mut query.attribute_lt,
                (FilterAxis::Related, FilterOp::Equals) => &mut query.related_attribute,
                (FilterAxis::Related, FilterOp::Includes) => &mut query.related_attribute_contains,
                (FilterAxis::Related, FilterOp::LessThan) => &mut query.related_attribute_lt,
            };
            target.push(filter.encode());
        }

        query
    }
}

/// Keyword filters in the exact shape the Tator count/list/update/delete
/// calls accept.  Field names mirror the REST parameter names.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TatorQuery {
    pub attribute: Vec<String>,
    pub attribute_contains: Vec<String>,
    pub attribute_lt: Vec<String>,
    pub related_attribute: Vec<String>,
    pub related_attribute_contains: Vec<String>,
    pub related_attribute_lt: Vec<String>,
    pub version: Option<TatorId>,
    pub media_id: Vec<TatorId>,
}

impl TatorQuery {
    /// True when no predicate, version, or media restriction is present.
    pub fn is_empty(&self) -> bool {
        self.attribute.is_empty()
            && self.attribute_contains.is_empty()
            && self.attribute_lt.is_empty()
            && self.related_attribute.is_empty()
            && self.related_attribute_contains.is_empty()
            && self.related_attribute_lt.is_empty()
            && self.version.is_none()
            && self.media_id.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    // -- FilterOp::parse --

    #[test]
    fn parse_known_tags() {
        assert_eq!(FilterOp::parse("Includes").unwrap(), FilterOp::Includes);
        assert_eq!(FilterOp::parse("Equals").unwrap(), FilterOp::Equals);
        assert_eq!(FilterOp::parse("LessThan").unwrap(), FilterOp::LessThan);
    }

    #[test]
    fn parse_unknown_tag_is_invalid_filter_type() {
        let err = FilterOp::parse("StartsWith").unwrap_err();
        assert_matches!(err, CoreError::InvalidFilterType { given } if given == "StartsWith");
    }

    #[test]
    fn parse_is_case_sensitive() {
        assert!(FilterOp::parse("equals").is_err());
    }

    // -- AttrFilter::media_name --

    #[test]
    fn media_name_equals_is_exact_match() {
        let f = AttrFilter::media_name(FilterOp::Equals, "dive01_200m_0001.jpg").unwrap();
        assert_eq!(f.op, FilterOp::Equals);
        assert_eq!(f.encode(), "$name::dive01_200m_0001.jpg");
    }

    #[test]
    fn media_name_includes_is_substring_match() {
        let f = AttrFilter::media_name(FilterOp::Includes, "_200m_").unwrap();
        assert_eq!(f.op, FilterOp::Includes);
        assert_eq!(f.encode(), "$name::_200m_");
    }

    #[test]
    fn media_name_less_than_is_rejected() {
        let err = AttrFilter::media_name(FilterOp::LessThan, "x.jpg").unwrap_err();
        assert_matches!(err, CoreError::InvalidFilterType { .. });
    }

    // -- encoding --

    #[test]
    fn flag_encodes_python_style_booleans() {
        assert_eq!(AttrFilter::flag("verified", false).encode(), "verified::False");
        assert_eq!(AttrFilter::flag("delete", true).encode(), "delete::True");
    }

    #[test]
    fn less_than_takes_numeric_values() {
        let f = AttrFilter::less_than("saliency", 500);
        assert_eq!(f.encode(), "saliency::500");
    }

    // -- FilterSet::build --

    #[test]
    fn build_routes_predicates_by_axis_and_op() {
        let query = FilterSet::new()
            .with(FilterAxis::Primary, AttrFilter::equals("cluster", "C3"))
            .with(FilterAxis::Primary, AttrFilter::flag("verified", false))
            .with(
                FilterAxis::Related,
                AttrFilter::media_name(FilterOp::Includes, "_200m_").unwrap(),
            )
            .build();

        assert_eq!(query.attribute, vec!["cluster::C3", "verified::False"]);
        assert_eq!(query.related_attribute_contains, vec!["$name::_200m_"]);
        assert!(query.attribute_contains.is_empty());
        assert!(query.related_attribute.is_empty());
    }

    #[test]
    fn build_related_less_than_gets_related_lt_key() {
        let query = FilterSet::new()
            .with(FilterAxis::Related, AttrFilter::less_than("saliency", 300))
            .with(FilterAxis::Related, AttrFilter::flag("verified", false))
            .build();

        assert_eq!(query.related_attribute_lt, vec!["saliency::300"]);
        assert_eq!(query.related_attribute, vec!["verified::False"]);
    }

    #[test]
    fn build_carries_version_and_media_ids() {
        let query = FilterSet::new()
            .with(FilterAxis::Primary, AttrFilter::equals("cluster", "C3"))
            .with_version(Some(7))
            .with_media_ids(&[10, 11, 12])
            .build();

        assert_eq!(query.version, Some(7));
        assert_eq!(query.media_id, vec![10, 11, 12]);
    }

    #[test]
    fn two_axes_never_collide() {
        // The same predicate on different axes lands in different keys.
        let media_axis = FilterSet::new()
            .with(FilterAxis::Primary, AttrFilter::equals("$name", "a.jpg"))
            .with(FilterAxis::Related, AttrFilter::equals("cluster", "C3"))
            .build();
        let loc_axis = FilterSet::new()
            .with(FilterAxis::Related, AttrFilter::equals("$name", "a.jpg"))
            .with(FilterAxis::Primary, AttrFilter::equals("cluster", "C3"))
            .build();

        assert_eq!(media_axis.attribute, vec!["$name::a.jpg"]);
        assert_eq!(media_axis.related_attribute, vec!["cluster::C3"]);
        assert_eq!(loc_axis.related_attribute, vec!["$name::a.jpg"]);
        assert_eq!(loc_axis.attribute, vec!["cluster::C3"]);
    }

    #[test]
    fn empty_set_builds_empty_query() {
        assert!(FilterSet::new().build().is_empty());
    }
}
