use anyhow::{bail, Result};
use sakenn_core::Catalog;
use std::path::Path;

use crate::{CsvCatalogSource, JsonCatalogSource};

/// Anything that can produce a full catalog snapshot
pub trait CatalogSource: Send + Sync {
    fn load(&self) -> Result<Catalog>;

    /// Human readable origin, used in log lines
    fn describe(&self) -> String;
}

/// A catalog already held in memory
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    catalog: Catalog,
}

impl MemorySource {
    pub fn new(catalog: Catalog) -> Self {
        Self { catalog }
    }
}

impl CatalogSource for MemorySource {
    fn load(&self) -> Result<Catalog> {
        Ok(self.catalog.clone())
    }

    fn describe(&self) -> String {
        format!("memory ({} items)", self.catalog.len())
    }
}

/// Pick a source implementation from the file extension
pub fn open_source<P: AsRef<Path>>(path: P, id_field: &str) -> Result<Box<dyn CatalogSource>> {
    let path = path.as_ref();
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);

    match extension.as_deref() {
        Some("json") => Ok(Box::new(JsonCatalogSource::new(path, id_field))),
        Some("csv") => Ok(Box::new(CsvCatalogSource::new(path, id_field))),
        _ => bail!("Unsupported catalog format: {:?} (expected .json or .csv)", path),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sakenn_core::Item;

    #[test]
    fn test_open_source_by_extension() {
        assert!(open_source("sake.json", "index").is_ok());
        assert!(open_source("SAKE.CSV", "index").is_ok());
        assert!(open_source("sake.parquet", "index").is_err());
        assert!(open_source("sake", "index").is_err());
    }

    #[test]
    fn test_memory_source_returns_snapshot() {
        let catalog = Catalog::from_items(vec![Item::new(1u64), Item::new(2u64)]).unwrap();
        let source = MemorySource::new(catalog);
        assert_eq!(source.load().unwrap().len(), 2);
        assert_eq!(source.describe(), "memory (2 items)");
    }
}
