use crate::error::{Error, ErrorKind};
use crate::record::Record;
use docmeta_extract::models::Metadata;
use exn::ResultExt;
use time::OffsetDateTime;

#[derive(sqlx::FromRow)]
pub(crate) struct RecordRow {
    id: i64,
    filename: String,
    catalog: Option<String>,
    size_file: Option<String>,
    date_edited_file: Option<String>,
    date_access_file: Option<String>,
    date_update_index_file: Option<String>,
    resolution_file: Option<String>,
    extension_file: Option<String>,
    filetype: Option<String>,
    mime_type: Option<String>,
    version_file: Option<String>,
    page_count: Option<String>,
    creator: Option<String>,
    producer: Option<String>,
    date_digitization: Option<String>,
    created_at: i64,
}
impl TryFrom<RecordRow> for Record {
    type Error = Error;
    fn try_from(row: RecordRow) -> Result<Self, Self::Error> {
        let created_at =
            OffsetDateTime::from_unix_timestamp(row.created_at).or_raise(|| ErrorKind::InvalidData("created_at"))?;
        let metadata = Metadata {
            filename: row.filename,
            catalog: row.catalog,
            size_file: row.size_file,
            date_edited_file: row.date_edited_file,
            date_access_file: row.date_access_file,
            date_update_index_file: row.date_update_index_file,
            resolution_file: row.resolution_file,
            extension_file: row.extension_file,
            filetype: row.filetype,
            mime_type: row.mime_type,
            version_file: row.version_file,
            page_count: row.page_count,
            creator: row.creator,
            producer: row.producer,
            date_digitization: row.date_digitization,
        };
        Ok(Record::new(row.id, created_at, metadata))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(created_at: i64) -> RecordRow {
        RecordRow {
            id: 3,
            filename: "report.pdf".to_string(),
            catalog: Some("/tmp".to_string()),
            size_file: Some("120KB".to_string()),
            date_edited_file: None,
            date_access_file: None,
            date_update_index_file: None,
            resolution_file: None,
            extension_file: Some("PDF".to_string()),
            filetype: Some("pdf".to_string()),
            mime_type: None,
            version_file: None,
            page_count: None,
            creator: None,
            producer: None,
            date_digitization: None,
            created_at,
        }
    }

    #[test]
    fn test_row_to_model() {
        let now = OffsetDateTime::now_utc();
        let record = Record::try_from(row(now.unix_timestamp())).unwrap();
        assert_eq!(record.id, 3);
        assert_eq!(record.metadata.size_file.as_deref(), Some("120KB"));
        // Converting to a Unix timestamp (measured in seconds) inherently strips the nanoseconds component.
        assert_eq!(record.created_at, now.replace_nanosecond(0).unwrap());
    }

    #[test]
    fn test_out_of_range_timestamp() {
        let err = Record::try_from(row(i64::MAX)).unwrap_err();
        assert_eq!(*err, ErrorKind::InvalidData("created_at"));
    }
}
