use docmeta_store::Record;

/// Keeps the records whose `filetype` contains `filetype`, ignoring case.
///
/// An empty filter keeps everything; records without a filetype only match
/// the empty filter.
pub fn filter_by_filetype(records: Vec<Record>, filetype: &str) -> Vec<Record> {
    if filetype.is_empty() {
        return records;
    }
    let needle = filetype.to_lowercase();
    records.into_iter().filter(|record| record.metadata.filetype().to_lowercase().contains(&needle)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use docmeta_extract::models::Metadata;
    use rstest::rstest;
    use time::OffsetDateTime;

    fn records() -> Vec<Record> {
        [(1, "a.pdf", Some(".pdf")), (2, "b.PDF", Some(".PDF")), (3, "c.jpg", Some(".jpeg")), (4, "d", None)]
            .into_iter()
            .map(|(id, name, filetype)| {
                let mut metadata = Metadata::new(name);
                metadata.filetype = filetype.map(str::to_string);
                Record::new(id, OffsetDateTime::now_utc(), metadata)
            })
            .collect()
    }

    #[rstest]
    #[case("", vec![1, 2, 3, 4])]
    #[case("pdf", vec![1, 2])]
    #[case("PDF", vec![1, 2])]
    #[case(".Pd", vec![1, 2])]
    #[case("jp", vec![3])]
    #[case("mp3", vec![])]
    fn test_filter(#[case] filter: &str, #[case] expected: Vec<i64>) {
        let ids: Vec<_> = filter_by_filetype(records(), filter).into_iter().map(|r| r.id).collect();
        assert_eq!(ids, expected);
    }
}
