use std::fs::File;
use std::io::{BufRead, BufReader, ErrorKind};
use std::path::Path;

use crate::error::{AppError, Result};

/// Identifiers read from the shop id file, plus the error that cut the read
/// short, if any.
#[derive(Debug, Default)]
pub struct ShopIds {
    pub ids: Vec<String>,
    pub read_error: Option<AppError>,
}

/// Read one shop id per line, trimmed. Blank lines and duplicates are kept.
///
/// A read error part-way through keeps the lines read so far and records the
/// error instead of discarding them.
pub fn load_shop_ids(path: &Path) -> ShopIds {
    let file = match open(path) {
        Ok(f) => f,
        Err(e) => return ShopIds { ids: Vec::new(), read_error: Some(e) },
    };

    let mut ids = Vec::new();
    for line in BufReader::new(file).lines() {
        match line {
            Ok(line) => ids.push(line.trim().to_string()),
            Err(e) => return ShopIds { ids, read_error: Some(e.into()) },
        }
    }
    ShopIds { ids, read_error: None }
}

fn open(path: &Path) -> Result<File> {
    File::open(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => AppError::ShopIdsNotFound(path.display().to_string()),
        _ => e.into(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn trims_and_keeps_order() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "  111\n222  \r\n\t333\n").unwrap();

        let loaded = load_shop_ids(file.path());
        assert!(loaded.read_error.is_none());
        assert_eq!(loaded.ids, vec!["111", "222", "333"]);
    }

    #[test]
    fn blank_lines_and_duplicates_pass_through() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "111\n\n111\n").unwrap();

        let loaded = load_shop_ids(file.path());
        assert_eq!(loaded.ids, vec!["111", "", "111"]);
    }

    #[test]
    fn missing_file_is_reported_not_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let loaded = load_shop_ids(&dir.path().join("nope.csv"));
        assert!(loaded.ids.is_empty());
        assert!(matches!(loaded.read_error, Some(AppError::ShopIdsNotFound(_))));
    }

    #[test]
    fn invalid_utf8_keeps_lines_read_before_it() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"111\n222\n\xff\xfe\n333\n").unwrap();

        let loaded = load_shop_ids(file.path());
        assert_eq!(loaded.ids, vec!["111", "222"]);
        assert!(matches!(loaded.read_error, Some(AppError::Io(_))));
    }
}
