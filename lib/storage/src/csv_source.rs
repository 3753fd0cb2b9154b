use anyhow::{anyhow, Context, Result};
use sakenn_core::{Catalog, Item, ItemId};
use serde_json::{Map, Number, Value};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::CatalogSource;

/// Reads a CSV export with a header row
///
/// Cells that parse as integers or finite floats become numbers, empty
/// cells are left out of the item, everything else is kept as a string.
#[derive(Debug, Clone)]
pub struct CsvCatalogSource {
    path: PathBuf,
    id_field: String,
}

impl CsvCatalogSource {
    pub fn new<P: AsRef<Path>>(path: P, id_field: &str) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            id_field: id_field.to_string(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

fn parse_cell(cell: &str) -> Option<Value> {
    let cell = cell.trim();
    if cell.is_empty() {
        return None;
    }
    if let Ok(i) = cell.parse::<i64>() {
        return Some(Value::from(i));
    }
    if let Ok(u) = cell.parse::<u64>() {
        return Some(Value::from(u));
    }
    let number = cell
        .parse::<f64>()
        .ok()
        .filter(|f| f.is_finite())
        .and_then(Number::from_f64);
    Some(match number {
        Some(n) => Value::Number(n),
        None => Value::String(cell.to_string()),
    })
}

impl CatalogSource for CsvCatalogSource {
    fn load(&self) -> Result<Catalog> {
        let mut reader = csv::Reader::from_path(&self.path)
            .with_context(|| format!("Failed to open catalog {:?}", self.path))?;

        let headers = reader
            .headers()
            .with_context(|| format!("Failed to read headers of {:?}", self.path))?
            .clone();
        let id_column = headers
            .iter()
            .position(|h| h.trim() == self.id_field)
            .ok_or_else(|| {
                anyhow!(
                    "Catalog {:?} has no '{}' column (available: {:?})",
                    self.path,
                    self.id_field,
                    headers.iter().collect::<Vec<_>>()
                )
            })?;

        let mut catalog = Catalog::new();
        for record in reader.records() {
            let record = record.with_context(|| format!("Failed to read row of {:?}", self.path))?;
            let line = record.position().map(|p| p.line()).unwrap_or(0);

            let raw_id = record.get(id_column).unwrap_or("").trim();
            if raw_id.is_empty() {
                warn!("Skipping row at line {} of {:?}: empty id", line, self.path);
                continue;
            }

            let mut fields = Map::new();
            for (column, (header, cell)) in headers.iter().zip(record.iter()).enumerate() {
                if column == id_column {
                    continue;
                }
                if let Some(value) = parse_cell(cell) {
                    fields.insert(header.trim().to_string(), value);
                }
            }

            catalog
                .push(Item {
                    id: ItemId::parse(raw_id),
                    fields,
                })
                .with_context(|| format!("Invalid row at line {} of {:?}", line, self.path))?;
        }

        debug!("Loaded {} items from {:?}", catalog.len(), self.path);
        Ok(catalog)
    }

    fn describe(&self) -> String {
        format!("csv {:?}", self.path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_csv(lines: &[&str]) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        for line in lines {
            writeln!(file, "{}", line).unwrap();
        }
        file
    }

    #[test]
    fn test_parse_cell() {
        assert_eq!(parse_cell(""), None);
        assert_eq!(parse_cell("  "), None);
        assert_eq!(parse_cell("512"), Some(Value::from(512)));
        assert_eq!(parse_cell("-0.25"), Some(Value::from(-0.25)));
        assert_eq!(parse_cell("NaN"), Some(Value::from("NaN")));
        assert_eq!(parse_cell("純米"), Some(Value::from("純米")));
    }

    #[test]
    fn test_load_rows() {
        let file = write_csv(&[
            "index,Sake_name,Amakara,Notan,Taste_like,Taste_dislike",
            "1,Dassai,0.25,-0.5,600,300",
            "2,Kubota,,0.3,10,1",
        ]);
        let catalog = CsvCatalogSource::new(file.path(), "index").load().unwrap();

        assert_eq!(catalog.len(), 2);
        let dassai = catalog.get(&ItemId::Integer(1)).unwrap();
        assert_eq!(dassai.get_str("Sake_name"), Some("Dassai"));
        assert_eq!(dassai.get_f64("Notan"), Some(-0.5));
        assert_eq!(dassai.get("Taste_like").and_then(Value::as_u64), Some(600));

        let kubota = catalog.get(&ItemId::Integer(2)).unwrap();
        assert!(kubota.get("Amakara").is_none());
    }

    #[test]
    fn test_rows_without_id_are_skipped() {
        let file = write_csv(&["index,x", "1,0.5", ",0.7", "3,0.9"]);
        let catalog = CsvCatalogSource::new(file.path(), "index").load().unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.position(&ItemId::Integer(3)), Some(1));
    }

    #[test]
    fn test_missing_id_column() {
        let file = write_csv(&["id,x", "1,0.5"]);
        let err = CsvCatalogSource::new(file.path(), "index").load().unwrap_err();
        assert!(err.to_string().contains("has no 'index' column"));
    }

    #[test]
    fn test_duplicate_ids() {
        let file = write_csv(&["index,x", "1,0.5", "1,0.7"]);
        let err = CsvCatalogSource::new(file.path(), "index").load().unwrap_err();
        assert!(format!("{:#}", err).contains("Duplicate item id: 1"));
    }
}
