/// Description of a single document, as reported by the remote metadata
/// service. This is what the extractor produces and what the store persists;
/// identity and creation time are only assigned once it has been stored.
///
/// Every descriptive field is optional. The extractor itself always fills
/// them (with an empty string when the service didn't report a value), but
/// records created by other means don't have to.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Metadata {
    /// Original name of the submitted file
    pub filename: String,
    /// Directory the remote service saw the file in
    pub catalog: Option<String>,
    /// Human-readable file size (e.g. `120 kB`)
    pub size_file: Option<String>,
    pub date_edited_file: Option<String>,
    pub date_access_file: Option<String>,
    pub date_update_index_file: Option<String>,
    /// File permissions (e.g. `-rw-r--r--`)
    pub resolution_file: Option<String>,
    /// Detected file type (e.g. `PDF`)
    pub extension_file: Option<String>,
    /// Detected file extension, always lowercase when extracted
    pub filetype: Option<String>,
    pub mime_type: Option<String>,
    pub version_file: Option<String>,
    pub page_count: Option<String>,
    pub creator: Option<String>,
    pub producer: Option<String>,
    pub date_digitization: Option<String>,
}

impl Metadata {
    pub fn new(filename: impl Into<String>) -> Self {
        Self { filename: filename.into(), ..Self::default() }
    }

    pub fn with_filetype(mut self, filetype: impl Into<String>) -> Self {
        self.filetype = Some(filetype.into());
        self
    }

    /// The filename with its final `.extension` removed. A name without a dot
    /// is its own stem, and a leading-dot name (`.bashrc`) has an empty stem.
    pub fn stem(&self) -> &str {
        self.filename.rsplit_once('.').map_or(self.filename.as_str(), |(stem, _)| stem)
    }

    pub fn filetype(&self) -> &str {
        self.filetype.as_deref().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("report.pdf", "report")]
    #[case("archive.tar.gz", "archive.tar")]
    #[case("README", "README")]
    #[case(".bashrc", "")]
    #[case("trailing.", "trailing")]
    fn test_stem(#[case] filename: &str, #[case] expected: &str) {
        assert_eq!(Metadata::new(filename).stem(), expected);
    }

    #[test]
    fn test_missing_filetype_is_empty() {
        assert_eq!(Metadata::new("report.pdf").filetype(), "");
        assert_eq!(Metadata::new("report.pdf").with_filetype(".pdf").filetype(), ".pdf");
    }
}
