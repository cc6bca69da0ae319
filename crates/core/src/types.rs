/// Tator entity identifiers (projects, types, versions, media,
/// localizations) are integer primary keys.
pub type TatorId = i64;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
