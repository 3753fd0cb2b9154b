use anyhow::{anyhow, Context, Result};
use sakenn_core::{Catalog, Item, ItemId};
use serde_json::Value;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::CatalogSource;

/// Reads a JSON array of row objects
///
/// `id_field` names the key holding each row's id; every other key becomes
/// an item field.
#[derive(Debug, Clone)]
pub struct JsonCatalogSource {
    path: PathBuf,
    id_field: String,
}

impl JsonCatalogSource {
    pub fn new<P: AsRef<Path>>(path: P, id_field: &str) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            id_field: id_field.to_string(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn row_to_item(&self, row_number: usize, row: Value) -> Result<Item> {
        let Value::Object(mut fields) = row else {
            return Err(anyhow!("Row {} is not a JSON object", row_number));
        };
        let raw_id = fields
            .remove(&self.id_field)
            .ok_or_else(|| anyhow!("Row {} has no '{}' field", row_number, self.id_field))?;
        let id = ItemId::from_value(&raw_id).ok_or_else(|| {
            anyhow!(
                "Row {} has an invalid id {} (expected a non-negative integer or string)",
                row_number,
                raw_id
            )
        })?;
        Ok(Item { id, fields })
    }
}

impl CatalogSource for JsonCatalogSource {
    fn load(&self) -> Result<Catalog> {
        let file = File::open(&self.path)
            .with_context(|| format!("Failed to open catalog {:?}", self.path))?;
        let rows: Vec<Value> = serde_json::from_reader(BufReader::new(file))
            .with_context(|| format!("Failed to parse catalog {:?}", self.path))?;

        let mut catalog = Catalog::with_capacity(rows.len());
        for (row_number, row) in rows.into_iter().enumerate() {
            let item = self
                .row_to_item(row_number, row)
                .with_context(|| format!("Invalid row in {:?}", self.path))?;
            catalog
                .push(item)
                .with_context(|| format!("Invalid row {} in {:?}", row_number, self.path))?;
        }

        debug!("Loaded {} items from {:?}", catalog.len(), self.path);
        Ok(catalog)
    }

    fn describe(&self) -> String {
        format!("json {:?}", self.path)
    }
}
