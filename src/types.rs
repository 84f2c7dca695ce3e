/// Unique requirement/test-case identifier (primary key in the history).
/// Example: `REQ-1432`
pub type RecordId = String;
/// Identifier for the system a description came from.
/// Examples: `requirements`, `testcases`
pub type SourceId = String;
/// A single whitespace-delimited token from a description.
/// Example: `brake`
pub type Word = String;
