/// Entity identifiers are opaque strings (UUIDv7 text assigned on insert).
pub type EntityId = String;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
