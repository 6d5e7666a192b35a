use std::sync::OnceLock;

use chrono::FixedOffset;
use regex::Regex;

use crate::console;
use crate::records::{CleanedRecord, RawRecord, SourceEntry};

/// Outcome of validating one run's raw records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationReport {
    pub total: usize,
    pub scraped: usize,
    pub missing: usize,
    /// Row numbers as they would appear in a file with a header row.
    pub missing_rows: Vec<usize>,
    pub dead_links: Vec<String>,
}

impl ValidationReport {
    pub fn summary_lines(&self) -> Vec<String> {
        let mut lines = vec![
            "Data validation complete.".to_string(),
            format!("{} / {} rows were successfully scraped", self.scraped, self.total),
        ];
        if self.missing > 0 {
            lines.push(format!("{} row(s) are missing values.", self.missing));
            lines.push(format!("Row numbers with missing values: {:?}", self.missing_rows));
            lines.push(format!("Dead links: {:?}", self.dead_links));
            lines.push(format!("Dropped {} rows with erroneous values.", self.missing));
        }
        lines
    }

    pub fn print(&self, offset: FixedOffset) {
        for line in self.summary_lines() {
            console::log(offset, line);
        }
    }
}

/// Drop records without a product name and normalize the rest.
///
/// `entries` must be the list the records were built from, in the same order.
pub fn clean(raw: Vec<RawRecord>, entries: &[SourceEntry]) -> (Vec<CleanedRecord>, ValidationReport) {
    let total = raw.len();
    let missing_idx: Vec<usize> = raw
        .iter()
        .enumerate()
        .filter(|(_, r)| r.product_name.is_empty())
        .map(|(i, _)| i)
        .collect();

    let report = ValidationReport {
        total,
        scraped: total - missing_idx.len(),
        missing: missing_idx.len(),
        missing_rows: missing_idx.iter().map(|i| i + 2).collect(),
        dead_links: missing_idx
            .iter()
            .filter_map(|&i| entries.get(i).map(|e| e.url.clone()))
            .collect(),
    };

    let cleaned = raw
        .into_iter()
        .filter(|r| !r.product_name.is_empty())
        .map(|r| CleanedRecord {
            timestamp: r.timestamp,
            chain_id: r.chain_id,
            category: r.category,
            product_name: r.product_name.replace(',', "."),
            unit_price: normalize_price(&r.unit_price),
            comparison_price: normalize_price(&r.comparison_price),
        })
        .collect();

    (cleaned, report)
}

/// Strip currency signs, tildes, quotes and whitespace; use `.` as decimal separator.
pub fn normalize_price(text: &str) -> String {
    static RE: OnceLock<Regex> = OnceLock::new();
    let re = RE.get_or_init(|| Regex::new(r#"[~"\s\p{Sc}]"#).unwrap());
    re.replace_all(text, "").replace(',', ".")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(name: &str, unit: &str, cmp: &str) -> RawRecord {
        RawRecord {
            timestamp: "2024-05-01 - 00:00:03".into(),
            chain_id: "SRyhma".into(),
            category: "Maito".into(),
            product_name: name.into(),
            unit_price: unit.into(),
            comparison_price: cmp.into(),
        }
    }

    fn entries(n: usize) -> Vec<SourceEntry> {
        (1..=n)
            .map(|i| SourceEntry {
                url: format!("https://x.test/{}", i),
                category: "Maito".into(),
            })
            .collect()
    }

    #[test]
    fn price_normalization() {
        assert_eq!(normalize_price("~15,99€  "), "15.99");
        assert_eq!(normalize_price("2,99 €"), "2.99");
        assert_eq!(normalize_price("\"3,50\u{a0}€/kg\""), "3.50/kg");
        assert_eq!(normalize_price("$4.25"), "4.25");
        assert_eq!(normalize_price(""), "");
    }

    #[test]
    fn price_normalization_is_idempotent() {
        for input in ["12,50 €", "~15,99€  ", "1,89 €/l", "", "  "] {
            let once = normalize_price(input);
            assert_eq!(normalize_price(&once), once);
        }
    }

    #[test]
    fn drops_nameless_rows_and_reports_dead_links() {
        let records = vec![
            raw("Maito 1l", "1,19 €", "1,19 €/l"),
            raw("", "", ""),
            raw("Leipa", "2,49 €", ""),
        ];
        let (cleaned, report) = clean(records, &entries(3));

        assert_eq!(cleaned.len(), 2);
        assert!(cleaned.iter().all(|r| !r.product_name.is_empty()));
        assert_eq!(report.total, 3);
        assert_eq!(report.scraped, 2);
        assert_eq!(report.missing, 1);
        assert_eq!(report.missing_rows, vec![3]);
        assert_eq!(report.dead_links, vec!["https://x.test/2".to_string()]);
    }

    #[test]
    fn normalizes_surviving_fields() {
        let (cleaned, _) = clean(vec![raw("Kerma 2,5dl", "~0,99 €", "")], &entries(1));
        assert_eq!(cleaned[0].product_name, "Kerma 2.5dl");
        assert_eq!(cleaned[0].unit_price, "0.99");
        assert_eq!(cleaned[0].comparison_price, "");
        assert_eq!(cleaned[0].category, "Maito");
        assert_eq!(cleaned[0].chain_id, "SRyhma");
    }

    #[test]
    fn name_without_price_survives() {
        let (cleaned, report) = clean(vec![raw("Suola", "", "")], &entries(1));
        assert_eq!(cleaned.len(), 1);
        assert_eq!(report.missing, 0);
    }

    #[test]
    fn summary_lines_when_rows_missing() {
        let (_, report) = clean(
            vec![raw("A", "", ""), raw("", "", ""), raw("B", "", "")],
            &entries(3),
        );
        let lines = report.summary_lines();
        assert_eq!(lines[1], "2 / 3 rows were successfully scraped");
        assert_eq!(lines[2], "1 row(s) are missing values.");
        assert_eq!(lines[3], "Row numbers with missing values: [3]");
        assert_eq!(lines[4], "Dead links: [\"https://x.test/2\"]");
    }

    #[test]
    fn summary_is_short_when_nothing_missing() {
        let (_, report) = clean(vec![raw("A", "", "")], &entries(1));
        assert_eq!(report.summary_lines().len(), 2);
    }

    #[test]
    fn all_missing_yields_empty_snapshot() {
        let (cleaned, report) = clean(vec![raw("", "", ""), raw("", "", "")], &entries(2));
        assert!(cleaned.is_empty());
        assert_eq!(report.missing_rows, vec![2, 3]);
        assert_eq!(report.dead_links.len(), 2);
    }
}
