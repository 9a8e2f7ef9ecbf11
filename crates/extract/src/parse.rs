//! Parsing of the remote service's preformatted `label: value` block.

use crate::error::{ErrorKind, Result};
use std::collections::HashMap;
use tracing::instrument;

/// Loose `label -> value` mapping read from a metadata block, before it is
/// projected onto the fixed [`Metadata`](crate::models::Metadata) fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Fields {
    entries: HashMap<String, String>,
}

impl Fields {
    /// Parses a metadata block line by line.
    ///
    /// Every line containing a colon is split at the *first* colon; the label
    /// is trimmed of whitespace and of any list-marker dashes, the value is
    /// trimmed of whitespace. Lines without a colon, or with an empty label or
    /// value, are skipped. A label appearing twice keeps its last value.
    ///
    /// Fails with [`ErrorKind::Parse`] when not a single entry was found.
    ///
    /// ```rust
    /// use docmeta_extract::Fields;
    /// let fields = Fields::parse("- Размер файла: 120 kB\nno colon here").unwrap();
    /// assert_eq!(fields.get("Размер файла"), Some("120 kB"));
    /// assert_eq!(fields.get("no colon here"), None);
    /// ```
    #[instrument(level = "trace", skip(block), fields(block_size = block.len()))]
    pub fn parse(block: &str) -> Result<Self> {
        let mut entries = HashMap::new();
        for line in block.lines() {
            let Some((label, value)) = line.split_once(':') else {
                continue;
            };
            let label = label.trim().trim_matches('-').trim();
            let value = value.trim();
            if !label.is_empty() && !value.is_empty() {
                entries.insert(label.to_string(), value.to_string());
            }
        }
        if entries.is_empty() {
            exn::bail!(ErrorKind::Parse);
        }
        Ok(Self { entries })
    }

    pub fn get(&self, label: &str) -> Option<&str> {
        self.entries.get(label).map(String::as_str)
    }

    /// Value for `label`, or an empty string when the service didn't report it.
    pub(crate) fn text(&self, label: &str) -> String {
        self.get(label).unwrap_or_default().to_string()
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("Каталог: /tmp", "Каталог", "/tmp")]
    #[case("- Каталог: /tmp", "Каталог", "/tmp")]
    #[case("  -- Каталог --  :   /tmp  ", "Каталог", "/tmp")]
    #[case("Дата оцифровки: 2024:01:15 10:20:30+03:00", "Дата оцифровки", "2024:01:15 10:20:30+03:00")]
    fn test_single_line(#[case] block: &str, #[case] label: &str, #[case] value: &str) {
        let fields = Fields::parse(block).unwrap();
        assert_eq!(fields.len(), 1);
        assert_eq!(fields.get(label), Some(value));
    }

    #[test]
    fn test_skips_lines_without_colon_or_value() {
        let block = "ExifTool output\n\nКаталог: /tmp\nСоздатель:\n: orphan value\nРазмер файла: 1 kB";
        let fields = Fields::parse(block).unwrap();
        assert_eq!(fields.len(), 2);
        assert_eq!(fields.get("Создатель"), None);
        assert_eq!(fields.get(""), None);
    }

    #[test]
    fn test_last_duplicate_wins() {
        let fields = Fields::parse("Каталог: /first\nКаталог: /second").unwrap();
        assert_eq!(fields.get("Каталог"), Some("/second"));
    }

    #[rstest]
    #[case("")]
    #[case("no colons\nat all")]
    #[case("empty value:\n:\n - :   ")]
    fn test_no_entries_is_parse_error(#[case] block: &str) {
        let err = Fields::parse(block).unwrap_err();
        assert_eq!(*err, ErrorKind::Parse);
    }
}
