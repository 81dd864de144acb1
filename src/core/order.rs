use crate::core::CatalogRecord;
use std::collections::BTreeSet;

/// Appetizers the user has added to the current order.
#[derive(Debug, Clone, Default)]
pub struct Order {
    items: Vec<CatalogRecord>,
}

impl Order {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, record: CatalogRecord) {
        tracing::debug!("Adding {} to order", record.name);
        self.items.push(record);
    }

    /// Removes the items at `offsets` in one pass. Offsets past the end are
    /// ignored; repeated offsets remove a single item.
    pub fn remove_at(&mut self, offsets: impl IntoIterator<Item = usize>) {
        let offsets: BTreeSet<usize> = offsets.into_iter().collect();
        let mut index = 0;
        self.items.retain(|_| {
            let keep = !offsets.contains(&index);
            index += 1;
            keep
        });
    }

    pub fn items(&self) -> &[CatalogRecord] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn total_price(&self) -> f64 {
        self.items.iter().map(|item| item.price).sum()
    }
}
