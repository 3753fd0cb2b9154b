use crate::{Error, Item, ItemId, Result};
use ahash::AHashMap;

/// An ordered, id-keyed collection of items
///
/// Row order is insertion order and is what the index uses to break
/// distance ties.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    items: Vec<Item>,
    rows: AHashMap<ItemId, usize>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            items: Vec::with_capacity(capacity),
            rows: AHashMap::with_capacity(capacity),
        }
    }

    /// Build a catalog from items, failing on the first duplicate id
    pub fn from_items<I>(items: I) -> Result<Self>
    where
        I: IntoIterator<Item = Item>,
    {
        let iter = items.into_iter();
        let mut catalog = Self::with_capacity(iter.size_hint().0);
        for item in iter {
            catalog.push(item)?;
        }
        Ok(catalog)
    }

    /// Append an item
    pub fn push(&mut self, item: Item) -> Result<()> {
        if self.rows.contains_key(&item.id) {
            return Err(Error::DuplicateId(item.id.to_string()));
        }
        self.rows.insert(item.id.clone(), self.items.len());
        self.items.push(item);
        Ok(())
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[inline]
    pub fn get(&self, id: &ItemId) -> Option<&Item> {
        self.rows.get(id).map(|&row| &self.items[row])
    }

    /// Row position of an id
    #[inline]
    pub fn position(&self, id: &ItemId) -> Option<usize> {
        self.rows.get(id).copied()
    }

    #[inline]
    pub fn contains(&self, id: &ItemId) -> bool {
        self.rows.contains_key(id)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Item> {
        self.items.iter()
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a Item;
    type IntoIter = std::slice::Iter<'a, Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_preserves_order() {
        let catalog = Catalog::from_items(vec![
            Item::new(30u64),
            Item::new(10u64),
            Item::new(20u64),
        ])
        .unwrap();

        let ids: Vec<_> = catalog.iter().map(|item| item.id.clone()).collect();
        assert_eq!(
            ids,
            vec![ItemId::Integer(30), ItemId::Integer(10), ItemId::Integer(20)]
        );
        assert_eq!(catalog.position(&ItemId::Integer(10)), Some(1));
        assert_eq!(catalog.len(), 3);
    }

    #[test]
    fn test_catalog_rejects_duplicates() {
        let result = Catalog::from_items(vec![Item::new("a"), Item::new("b"), Item::new("a")]);
        assert_eq!(result.unwrap_err(), Error::DuplicateId("a".to_string()));
    }

    #[test]
    fn test_catalog_lookup() {
        let mut catalog = Catalog::new();
        assert!(catalog.is_empty());
        catalog.push(Item::new(1u64).with_field("Notan", 0.5)).unwrap();

        assert!(catalog.contains(&ItemId::Integer(1)));
        assert!(!catalog.contains(&ItemId::from("1")));
        assert_eq!(catalog.get(&ItemId::Integer(1)).unwrap().get_f64("Notan"), Some(0.5));
    }
}
