//! Duplicate detection.

use docmeta_extract::models::Metadata;

/// Returns `true` if `a` and `b` describe "the same file": identical
/// `filetype`, and identical filenames once the final extension is stripped.
///
/// Filenames are compared case-sensitively; filetypes are compared exactly
/// (the extractor stores them lowercased).
pub fn is_duplicate(a: &Metadata, b: &Metadata) -> bool {
    a.filetype() == b.filetype() && a.stem() == b.stem()
}

/// Returns the first of `records`, in the order given, that duplicates
/// `candidate`.
///
/// ```rust
/// use docmeta_extract::models::Metadata;
/// use docmeta_library::find_conflict;
///
/// let stored = [Metadata::new("report.pdf").with_filetype(".pdf")];
/// let candidate = Metadata::new("report.PDF").with_filetype(".pdf");
/// assert!(find_conflict(&stored, &candidate).is_some());
/// ```
pub fn find_conflict<'a, R: AsRef<Metadata>>(records: &'a [R], candidate: &Metadata) -> Option<&'a R> {
    records.iter().find(|record| is_duplicate(record.as_ref(), candidate))
}
