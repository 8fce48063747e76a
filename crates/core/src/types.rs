/// Records are keyed by store-assigned string identifiers (push ids).
pub type RecordId = String;
