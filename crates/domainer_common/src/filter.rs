//! Date filter over sorted records

use crate::record::DomainRecord;
use chrono::NaiveDate;

/// Domains whose date equals `target`, in the order they appear in `records`
pub fn available_on(records: &[DomainRecord], target: NaiveDate) -> Vec<String> {
    records
        .iter()
        .filter(|r| r.date == target)
        .map(|r| r.domain.clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_feed;
    use crate::record::{parse_date, sort_by_date};

    fn sample() -> Vec<DomainRecord> {
        sort_by_date(
            parse_feed(
                "example.se\t2024-01-10\nfoo.se\t2024-01-05\nbad-line\nbar.se\tNOTADATE\n\
                 qux.se\t2024-01-10\nabc.se\t2024-01-05",
            )
            .records,
        )
    }

    #[test]
    fn test_single_match() {
        let records = sort_by_date(parse_feed("example.se\t2024-01-10\nfoo.se\t2024-01-05").records);
        assert_eq!(
            available_on(&records, parse_date("2024-01-05").unwrap()),
            vec!["foo.se"]
        );
    }

    #[test]
    fn test_no_match_is_empty() {
        let records = sample();
        assert!(available_on(&records, parse_date("2024-01-01").unwrap()).is_empty());
    }

    #[test]
    fn test_matches_keep_sorted_order() {
        let records = sample();
        assert_eq!(
            available_on(&records, parse_date("2024-01-10").unwrap()),
            vec!["example.se", "qux.se"]
        );
        assert_eq!(
            available_on(&records, parse_date("2024-01-05").unwrap()),
            vec!["foo.se", "abc.se"]
        );
    }

    #[test]
    fn test_domain_listed_on_each_of_its_dates() {
        let records = sort_by_date(
            parse_feed("dup.se\t2024-02-01\nother.se\t2024-01-01\ndup.se\t2024-01-01").records,
        );

        assert_eq!(
            available_on(&records, parse_date("2024-01-01").unwrap()),
            vec!["other.se", "dup.se"]
        );
        assert_eq!(
            available_on(&records, parse_date("2024-02-01").unwrap()),
            vec!["dup.se"]
        );
    }
}
