//! The store's collection of items.

use std::cell::RefCell;
use std::io::{self, Write};
use std::rc::Rc;

use crate::details::ItemDetails;
use crate::item::{Item, ItemId};

/// Shared handle to an item. The catalog never owns items exclusively:
/// removing one from the catalog leaves every other handle valid.
pub type ItemHandle = Rc<RefCell<Item>>;

/// Insertion-ordered collection of item handles.
#[derive(Debug, Default)]
pub struct Catalog {
    items: Vec<ItemHandle>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, item: &ItemHandle) {
        {
            let entry = item.borrow();
            tracing::debug!(
                item = %entry.item_id(),
                kind = entry.kind().name(),
                "added to catalog"
            );
        }
        self.items.push(Rc::clone(item));
    }

    /// Remove the first entry for `item`. Returns `false` if it was not listed.
    pub fn remove(&mut self, item: &ItemHandle) -> bool {
        match self.items.iter().position(|entry| Rc::ptr_eq(entry, item)) {
            Some(index) => {
                self.items.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn find(&self, id: ItemId) -> Option<ItemHandle> {
        self.items
            .iter()
            .find(|entry| entry.borrow().item_id() == id)
            .cloned()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ItemHandle> {
        self.items.iter()
    }

    /// Details of every item, in insertion order.
    pub fn list_all(&self) -> Vec<ItemDetails> {
        self.items.iter().map(|entry| entry.borrow().details()).collect()
    }

    /// Write every detail block, each followed by a blank line.
    pub fn write_listing<W: Write>(&self, out: &mut W) -> io::Result<()> {
        for details in self.list_all() {
            writeln!(out, "{details}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn handle(item: Item) -> ItemHandle {
        Rc::new(RefCell::new(item))
    }

    #[test]
    fn lists_in_insertion_order() {
        let shirt = handle(Item::shirt("T-Shirt", 25.0, 15, "M").unwrap());
        let pants = handle(Item::pants("Jeans", 50.0, 8, "Denim").unwrap());
        let mut catalog = Catalog::new();
        catalog.add(&pants);
        catalog.add(&shirt);

        let names: Vec<_> = catalog.list_all().into_iter().map(|d| d.name).collect();
        assert_eq!(names, vec!["Jeans", "T-Shirt"]);
    }

    #[test]
    fn listing_reflects_current_state() {
        let shirt = handle(Item::shirt("T-Shirt", 25.0, 15, "M").unwrap());
        let mut catalog = Catalog::new();
        catalog.add(&shirt);

        shirt.borrow_mut().set_supply(3).unwrap();

        assert_eq!(catalog.list_all()[0].supply, 3);
    }

    #[test]
    fn remove_keeps_the_item_alive() {
        let shirt = handle(Item::shirt("T-Shirt", 25.0, 15, "M").unwrap());
        let mut catalog = Catalog::new();
        catalog.add(&shirt);

        assert!(catalog.remove(&shirt));
        assert!(catalog.is_empty());
        assert!(!catalog.remove(&shirt));

        shirt.borrow_mut().set_supply(1).unwrap();
        assert_eq!(shirt.borrow().supply(), 1);
    }

    #[test]
    fn find_by_id() {
        let shirt = handle(Item::shirt("T-Shirt", 25.0, 15, "M").unwrap());
        let id = shirt.borrow().item_id();
        let mut catalog = Catalog::new();
        catalog.add(&shirt);

        let found = catalog.find(id).unwrap();
        assert!(Rc::ptr_eq(&found, &shirt));
        assert!(catalog.find(ItemId::new(stockwatch_core::SubjectId::new())).is_none());
    }

    #[test]
    fn write_listing_separates_blocks_with_blank_lines() {
        let mut catalog = Catalog::new();
        catalog.add(&handle(Item::shirt("T-Shirt", 25.0, 14, "M").unwrap()));
        catalog.add(&handle(Item::pants("Jeans", 50.0, 15, "Denim").unwrap()));

        let mut out = Vec::new();
        catalog.write_listing(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert_eq!(text.matches("=== Clothing Details ===").count(), 2);
        assert!(text.contains("Size: M\n=========================\n\n=== Clothing Details ==="));
        assert!(text.ends_with("Material: Denim\n=========================\n\n"));
    }
}
