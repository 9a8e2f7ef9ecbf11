use docmeta_extract::models::Metadata;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// A stored metadata record.
///
/// Records only come into existence through [`RecordStore::insert`](crate::RecordStore::insert),
/// which assigns both the `id` and the `created_at` timestamp. They are never
/// modified afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    /// Unique within a store, increasing with insertion order
    pub id: i64,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(flatten)]
    pub metadata: Metadata,
}
impl AsRef<Metadata> for Record {
    fn as_ref(&self) -> &Metadata {
        &self.metadata
    }
}
impl Record {
    pub fn new(id: i64, created_at: OffsetDateTime, metadata: Metadata) -> Self {
        Self { id, created_at, metadata }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    #[test]
    fn test_serializes_flat() {
        let record = Record::new(
            7,
            datetime!(2024-05-01 12:30:00 UTC),
            Metadata::new("report.pdf").with_filetype(".pdf"),
        );
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["id"], 7);
        assert_eq!(json["created_at"], "2024-05-01T12:30:00Z");
        assert_eq!(json["filename"], "report.pdf");
        assert_eq!(json["filetype"], ".pdf");
        assert!(json["catalog"].is_null());
        assert!(json.get("metadata").is_none());
    }

    #[test]
    fn test_deserializes_without_optional_fields() {
        let record: Record =
            serde_json::from_str(r#"{"id":1,"created_at":"2024-05-01T12:30:00Z","filename":"a.jpg"}"#).unwrap();
        assert_eq!(record.metadata.filename, "a.jpg");
        assert_eq!(record.metadata.filetype, None);
    }
}
