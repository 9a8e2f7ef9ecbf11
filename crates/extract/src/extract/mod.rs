//! Extraction of document metadata from the remote service's HTML response.

use crate::consts::{self, labels};
use crate::error::{ErrorKind, Result};
use crate::models::Metadata;
use crate::parse::Fields;
use exn::OptionExt;
use scraper::Html;
use tracing::instrument;

/// Parsed HTML response from the remote metadata service.
///
/// `Html` is not `Send`, so an `Extractor` should be built and consumed
/// without holding it across an `.await`.
#[derive(Debug)]
pub struct Extractor {
    document: Html,
}
impl Extractor {
    pub fn from_html(html: &str) -> Self {
        Self { document: Html::parse_document(html) }
    }

    /// Construct an [`Extractor`] from a raw response body, rejecting empty
    /// responses with [`ErrorKind::EmptyResponse`].
    pub fn from_response(body: &str) -> Result<Self> {
        if body.trim().is_empty() {
            exn::bail!(ErrorKind::EmptyResponse);
        }
        Ok(Self::from_html(body))
    }

    /// Text content of the first preformatted block in the document.
    pub fn block(&self) -> Result<String> {
        self.document
            .select(&consts::PRE_SELECTOR)
            .next()
            .map(|pre| pre.text().collect::<String>())
            .ok_or_raise(|| ErrorKind::MetadataNotFound)
    }

    /// Loose `label -> value` entries of the metadata block.
    pub fn fields(&self) -> Result<Fields> {
        Fields::parse(&self.block()?)
    }

    /// Extracts document metadata from the response.
    ///
    /// `original_name` takes precedence over the filename reported by the
    /// remote service (which only ever sees a temporary copy of uploads).
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The response has no preformatted metadata block
    /// - The block has no `label: value` entries
    #[instrument(skip(self))]
    pub fn metadata(&self, original_name: Option<&str>) -> Result<Metadata> {
        let fields = self.fields()?;
        tracing::debug!(entries = fields.len(), "Metadata block parsed");
        let mut metadata = Metadata::from(&fields);
        if let Some(name) = original_name.filter(|name| !name.is_empty()) {
            metadata.filename = name.to_string();
        }
        Ok(metadata)
    }
}

impl From<&Fields> for Metadata {
    fn from(fields: &Fields) -> Self {
        Self {
            filename: fields.text(labels::FILENAME),
            catalog: Some(fields.text(labels::CATALOG)),
            size_file: Some(fields.text(labels::SIZE)),
            date_edited_file: Some(fields.text(labels::DATE_EDITED)),
            date_access_file: Some(fields.text(labels::DATE_ACCESS)),
            date_update_index_file: Some(fields.text(labels::DATE_UPDATE_INDEX)),
            resolution_file: Some(fields.text(labels::RESOLUTION)),
            extension_file: Some(fields.text(labels::FILE_TYPE)),
            filetype: Some(fields.text(labels::EXTENSION).to_lowercase()),
            mime_type: Some(fields.text(labels::MIME_TYPE)),
            version_file: Some(fields.text(labels::PDF_VERSION)),
            page_count: Some(fields.text(labels::PAGE_COUNT)),
            creator: Some(fields.text(labels::CREATOR)),
            producer: Some(fields.text(labels::PRODUCER)),
            date_digitization: Some(fields.text(labels::DATE_DIGITIZATION)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RESPONSE: &str = r#"<!DOCTYPE html>
<html><head><title>Метаданные</title></head>
<body>
  <h2>Результаты</h2>
  <pre>
Название файла: phpAbC123.pdf
Каталог: /tmp
Размер файла: 120KB
Дата редактирования файла: 2024:01:15 10:20:30+03:00
Разрешения файла: -rw-r--r--
Тип файла: PDF
Расширение файла: PDF
MIME тип: application/pdf
Версия PDF: 1.7
Количество страниц: 3
Создатель: Writer
  </pre>
  <pre>Каталог: /ignored</pre>
</body></html>"#;

    #[test]
    fn test_extracts_labelled_fields() {
        let metadata = Extractor::from_response(RESPONSE).unwrap().metadata(Some("report.pdf")).unwrap();
        assert_eq!(metadata.filename, "report.pdf");
        assert_eq!(metadata.catalog.as_deref(), Some("/tmp"));
        assert_eq!(metadata.size_file.as_deref(), Some("120KB"));
        assert_eq!(metadata.date_edited_file.as_deref(), Some("2024:01:15 10:20:30+03:00"));
        assert_eq!(metadata.resolution_file.as_deref(), Some("-rw-r--r--"));
        assert_eq!(metadata.extension_file.as_deref(), Some("PDF"));
        assert_eq!(metadata.mime_type.as_deref(), Some("application/pdf"));
        assert_eq!(metadata.version_file.as_deref(), Some("1.7"));
        assert_eq!(metadata.page_count.as_deref(), Some("3"));
        assert_eq!(metadata.creator.as_deref(), Some("Writer"));
    }

    #[test]
    fn test_filetype_is_lowercased() {
        let metadata = Extractor::from_response(RESPONSE).unwrap().metadata(None).unwrap();
        assert_eq!(metadata.filetype.as_deref(), Some("pdf"));
    }

    #[test]
    fn test_absent_labels_default_to_empty() {
        let metadata = Extractor::from_response(RESPONSE).unwrap().metadata(None).unwrap();
        assert_eq!(metadata.producer.as_deref(), Some(""));
        assert_eq!(metadata.date_access_file.as_deref(), Some(""));
        assert_eq!(metadata.date_update_index_file.as_deref(), Some(""));
        assert_eq!(metadata.date_digitization.as_deref(), Some(""));
    }

    #[test]
    fn test_filename_falls_back_to_reported_name() {
        let extractor = Extractor::from_response(RESPONSE).unwrap();
        assert_eq!(extractor.metadata(None).unwrap().filename, "phpAbC123.pdf");
        assert_eq!(extractor.metadata(Some("")).unwrap().filename, "phpAbC123.pdf");
    }

    #[test]
    fn test_only_first_block_is_read() {
        let fields = Extractor::from_response(RESPONSE).unwrap().fields().unwrap();
        assert_eq!(fields.get("Каталог"), Some("/tmp"));
    }

    #[test]
    fn test_empty_response() {
        assert_eq!(*Extractor::from_response("").unwrap_err(), ErrorKind::EmptyResponse);
        assert_eq!(*Extractor::from_response(" \n\t").unwrap_err(), ErrorKind::EmptyResponse);
    }

    #[test]
    fn test_missing_block() {
        let extractor = Extractor::from_response("<html><body><p>Ошибка</p></body></html>").unwrap();
        assert_eq!(*extractor.metadata(None).unwrap_err(), ErrorKind::MetadataNotFound);
    }

    #[test]
    fn test_block_without_entries() {
        let extractor = Extractor::from_response("<pre>nothing useful here</pre>").unwrap();
        assert_eq!(*extractor.metadata(None).unwrap_err(), ErrorKind::Parse);
    }
}
