//! Sake catalog records
//!
//! Column names follow the sake table the catalog is exported from, so a
//! row deserializes straight into [`Sake`] and converts into a generic
//! [`Item`] for indexing.

use crate::{Catalog, Error, Item, ItemId, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Sweet (negative) to dry (positive) balance score
pub const AMAKARA: &str = "Amakara";
/// Light (negative) to rich (positive) balance score
pub const NOTAN: &str = "Notan";
pub const TASTE_LIKE: &str = "Taste_like";
pub const TASTE_DISLIKE: &str = "Taste_dislike";
/// Column holding the row id
pub const ID_FIELD: &str = "index";

/// Feature fields used for sake similarity
pub const DEFAULT_FEATURE_FIELDS: [&str; 2] = [AMAKARA, NOTAN];

/// Vote threshold above which a sake is listed as popular
pub const DEFAULT_MIN_VOTES: u64 = 800;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sake {
    #[serde(rename = "index")]
    pub id: u64,
    #[serde(rename = "Sake_name", default)]
    pub name: Option<String>,
    #[serde(rename = "Sake_Product_Name", default)]
    pub product_name: Option<String>,
    #[serde(rename = "Type", default)]
    pub kind: Option<String>,
    /// Sake meter value (nihonshu-do)
    #[serde(rename = "SMV", default)]
    pub smv: Option<f64>,
    #[serde(rename = "Acidity", default)]
    pub acidity: Option<f64>,
    #[serde(rename = "Amakara", default)]
    pub amakara: Option<f64>,
    #[serde(rename = "Notan", default)]
    pub notan: Option<f64>,
    #[serde(rename = "ABV", default)]
    pub abv: Option<f64>,
    #[serde(rename = "Taste_like", default)]
    pub taste_like: Option<u64>,
    #[serde(rename = "Taste_dislike", default)]
    pub taste_dislike: Option<u64>,
}

impl Sake {
    pub fn new(id: u64) -> Self {
        Self {
            id,
            name: None,
            product_name: None,
            kind: None,
            smv: None,
            acidity: None,
            amakara: None,
            notan: None,
            abv: None,
            taste_like: None,
            taste_dislike: None,
        }
    }

    #[must_use]
    pub fn with_taste(mut self, amakara: f64, notan: f64) -> Self {
        self.amakara = Some(amakara);
        self.notan = Some(notan);
        self
    }

    #[must_use]
    pub fn with_votes(mut self, like: u64, dislike: u64) -> Self {
        self.taste_like = Some(like);
        self.taste_dislike = Some(dislike);
        self
    }

    /// Likes plus dislikes, `None` unless both counts are present
    pub fn votes(&self) -> Option<u64> {
        vote_total(self.taste_like, self.taste_dislike)
    }
}

impl From<Sake> for Item {
    fn from(sake: Sake) -> Self {
        let id = ItemId::Integer(sake.id);
        let fields = match serde_json::to_value(sake) {
            Ok(Value::Object(mut map)) => {
                map.remove(ID_FIELD);
                map.retain(|_, v| !v.is_null());
                map
            }
            _ => Default::default(),
        };
        Item { id, fields }
    }
}

impl TryFrom<&Item> for Sake {
    type Error = Error;

    fn try_from(item: &Item) -> Result<Self> {
        let id = match &item.id {
            ItemId::Integer(id) => *id,
            ItemId::String(s) => {
                return Err(Error::InvalidConfig(format!(
                    "sake ids must be integers, got '{}'",
                    s
                )))
            }
        };
        let mut fields = item.fields.clone();
        fields.insert(ID_FIELD.to_string(), Value::from(id));
        serde_json::from_value(Value::Object(fields))
            .map_err(|e| Error::InvalidConfig(format!("item {} is not a sake record: {}", id, e)))
    }
}

fn vote_total(like: Option<u64>, dislike: Option<u64>) -> Option<u64> {
    Some(like?.saturating_add(dislike?))
}

/// A non-negative whole count. Exports with gaps in a count column write
/// the remaining counts as floats (`900.0`), so integral floats are accepted.
fn vote_count(value: &Value) -> Option<u64> {
    value.as_u64().or_else(|| {
        value
            .as_f64()
            .filter(|v| v.is_finite() && *v >= 0.0 && v.fract() == 0.0 && *v < u64::MAX as f64)
            .map(|v| v as u64)
    })
}

fn votes(item: &Item) -> Option<u64> {
    let count = |field: &str| item.get(field).and_then(vote_count);
    vote_total(count(TASTE_LIKE), count(TASTE_DISLIKE))
}

/// Items with more than `min_votes` likes plus dislikes, most voted first.
/// Items missing either count are never listed. Equal vote counts keep
/// catalog order.
pub fn popular(catalog: &Catalog, min_votes: u64) -> Vec<&Item> {
    let mut hot: Vec<(u64, &Item)> = catalog
        .iter()
        .filter_map(|item| votes(item).map(|votes| (votes, item)))
        .filter(|(votes, _)| *votes > min_votes)
        .collect();
    hot.sort_by(|a, b| b.0.cmp(&a.0));
    hot.into_iter().map(|(_, item)| item).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Distance, SimilarityIndex};

    #[test]
    fn test_sake_into_item() {
        let mut sake = Sake::new(12).with_taste(-0.3, 0.7).with_votes(10, 2);
        sake.name = Some("獺祭".to_string());

        let item = Item::from(sake.clone());
        assert_eq!(item.id, ItemId::Integer(12));
        assert_eq!(item.get_f64(AMAKARA), Some(-0.3));
        assert_eq!(item.get_f64(NOTAN), Some(0.7));
        assert_eq!(item.get_str("Sake_name"), Some("獺祭"));
        assert!(item.get("SMV").is_none());
        assert!(item.get(ID_FIELD).is_none());

        assert_eq!(Sake::try_from(&item).unwrap(), sake);
    }

    #[test]
    fn test_sake_from_table_row() {
        let row = serde_json::json!({
            "index": 3,
            "Sake_name": "久保田",
            "Sake_Product_Name": "千寿",
            "Type": "吟醸",
            "SMV": 5.0,
            "Acidity": 1.2,
            "Amakara": 0.412,
            "Notan": -0.215,
            "ABV": 15.5,
            "Taste_like": 512,
            "Taste_dislike": 301
        });
        let sake: Sake = serde_json::from_value(row).unwrap();
        assert_eq!(sake.id, 3);
        assert_eq!(sake.kind.as_deref(), Some("吟醸"));
        assert_eq!(sake.votes(), Some(813));
        assert_eq!(Sake::new(4).votes(), None);
    }

    #[test]
    fn test_string_id_is_not_a_sake() {
        let item = Item::new("abc");
        assert!(Sake::try_from(&item).is_err());
    }

    #[test]
    fn test_popular_ordering() {
        let catalog = Catalog::from_items(vec![
            Item::from(Sake::new(1).with_votes(400, 401)),
            Item::from(Sake::new(2).with_votes(100, 100)),
            Item::from(Sake::new(3).with_votes(900, 50)),
            Item::from(Sake::new(4).with_votes(801, 0)),
            Item::from(Sake::new(5)),
            Item::from(Sake::new(6).with_votes(400, 400)),
        ])
        .unwrap();

        let hot: Vec<_> = popular(&catalog, DEFAULT_MIN_VOTES)
            .into_iter()
            .map(|item| item.id.clone())
            .collect();
        assert_eq!(
            hot,
            vec![ItemId::Integer(3), ItemId::Integer(1), ItemId::Integer(4)]
        );
        assert!(popular(&catalog, 10_000).is_empty());
    }

    #[test]
    fn test_popular_needs_both_counts() {
        let catalog = Catalog::from_items(vec![
            Item::new(2u64).with_field(TASTE_LIKE, 900),
            Item::new(1u64)
                .with_field(TASTE_LIKE, 900.0)
                .with_field(TASTE_DISLIKE, 10.0),
            Item::new(3u64)
                .with_field(TASTE_LIKE, 900.5)
                .with_field(TASTE_DISLIKE, 10),
            Item::new(4u64)
                .with_field(TASTE_LIKE, -5)
                .with_field(TASTE_DISLIKE, 1000),
        ])
        .unwrap();
        let hot: Vec<_> = popular(&catalog, DEFAULT_MIN_VOTES)
            .into_iter()
            .map(|item| item.id.clone())
            .collect();
        assert_eq!(hot, vec![ItemId::Integer(1)]);
    }

    #[test]
    fn test_vote_total_saturates() {
        assert_eq!(Sake::new(1).with_votes(u64::MAX, 5).votes(), Some(u64::MAX));

        let catalog = Catalog::from_items(vec![
            Item::from(Sake::new(1).with_votes(900, 10)),
            Item::from(Sake::new(2).with_votes(u64::MAX, u64::MAX)),
        ])
        .unwrap();
        let hot: Vec<_> = popular(&catalog, DEFAULT_MIN_VOTES)
            .into_iter()
            .map(|item| item.id.clone())
            .collect();
        assert_eq!(hot, vec![ItemId::Integer(2), ItemId::Integer(1)]);
    }

    #[test]
    fn test_sakes_index_on_default_fields() {
        let catalog = Catalog::from_items(vec![
            Item::from(Sake::new(1).with_taste(0.5, 0.5)),
            Item::from(Sake::new(2).with_taste(-0.5, 0.5)),
            Item::from(Sake::new(3).with_taste(1.0, 1.0)),
        ])
        .unwrap();
        let index = SimilarityIndex::build(&catalog, &DEFAULT_FEATURE_FIELDS).unwrap();
        let result = index.query(&ItemId::Integer(1), 2, Distance::Cosine).unwrap();
        assert_eq!(result[0].id, ItemId::Integer(1));
        assert_eq!(result[1].id, ItemId::Integer(3));
        assert!(result[1].distance.abs() < 1e-12);
    }
}
