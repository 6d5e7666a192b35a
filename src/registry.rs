use std::path::Path;

use crate::errors::RegistryError;
use crate::records::SourceEntry;

const BOM: char = '\u{feff}';

/// Load the ordered `url;category` list. Any malformed line fails the whole load.
pub fn load(path: &Path) -> Result<Vec<SourceEntry>, RegistryError> {
    let raw = std::fs::read_to_string(path).map_err(|source| RegistryError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse(&raw)
}

pub fn parse(raw: &str) -> Result<Vec<SourceEntry>, RegistryError> {
    let text = raw.trim_start_matches(BOM);
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b';')
        .has_headers(false)
        .flexible(true)
        .from_reader(text.as_bytes());

    let mut entries = Vec::new();
    for (i, record) in reader.records().enumerate() {
        let line = i + 1;
        let record = record.map_err(|source| RegistryError::Csv { line, source })?;
        match (record.len(), record.get(0), record.get(1)) {
            (2, Some(url), Some(category)) => entries.push(SourceEntry {
                url: url.to_string(),
                category: category.to_string(),
            }),
            _ => {
                return Err(RegistryError::Malformed {
                    line: record.position().map(|p| p.line() as usize).unwrap_or(line),
                    content: record.iter().collect::<Vec<_>>().join(";"),
                })
            }
        }
    }
    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_order() {
        let entries = parse("https://a.test/1;Maito\nhttps://a.test/2;Leipa\n").unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].url, "https://a.test/1");
        assert_eq!(entries[0].category, "Maito");
        assert_eq!(entries[1].url, "https://a.test/2");
    }

    #[test]
    fn strips_byte_order_mark() {
        let entries = parse("\u{feff}https://a.test/1;Maito\r\n").unwrap();
        assert_eq!(entries[0].url, "https://a.test/1");
        assert_eq!(entries[0].category, "Maito");
    }

    #[test]
    fn malformed_line_fails_fast() {
        let err = parse("https://a.test/1;Maito\nhttps://a.test/2\n").unwrap_err();
        assert!(matches!(err, RegistryError::Malformed { line: 2, .. }));

        let err = parse("https://a.test/1;Maito;extra\n").unwrap_err();
        assert!(matches!(err, RegistryError::Malformed { line: 1, .. }));
    }

    #[test]
    fn reads_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("links.csv");
        std::fs::write(&path, "\u{feff}https://a.test/1;Juusto\n").unwrap();

        let entries = load(&path).unwrap();
        assert_eq!(
            entries,
            vec![SourceEntry {
                url: "https://a.test/1".into(),
                category: "Juusto".into(),
            }]
        );
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load(&dir.path().join("absent.csv")).unwrap_err();
        assert!(matches!(err, RegistryError::Io { .. }));
    }
}
