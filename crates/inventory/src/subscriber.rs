//! Built-in subscriber roles.

use stockwatch_core::{DomainError, DomainResult};
use stockwatch_events::Subscriber;

use crate::item::Item;
use crate::notice::InventoryNotice;

/// When the store manager reorders, and how much stock a reorder brings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RestockPolicy {
    low_supply_threshold: u32,
    restock_target: u32,
}

impl RestockPolicy {
    pub const DEFAULT_LOW_SUPPLY_THRESHOLD: u32 = 10;
    pub const DEFAULT_RESTOCK_TARGET: u32 = 15;

    /// A target below the threshold would restock forever.
    pub fn new(low_supply_threshold: u32, restock_target: u32) -> DomainResult<Self> {
        if restock_target < low_supply_threshold {
            return Err(DomainError::validation(format!(
                "restock target ({restock_target}) must not be below the low supply threshold ({low_supply_threshold})"
            )));
        }
        Ok(Self {
            low_supply_threshold,
            restock_target,
        })
    }

    pub fn low_supply_threshold(&self) -> u32 {
        self.low_supply_threshold
    }

    pub fn restock_target(&self) -> u32 {
        self.restock_target
    }

    pub fn is_low(&self, supply: u32) -> bool {
        supply < self.low_supply_threshold
    }
}

impl Default for RestockPolicy {
    fn default() -> Self {
        Self {
            low_supply_threshold: Self::DEFAULT_LOW_SUPPLY_THRESHOLD,
            restock_target: Self::DEFAULT_RESTOCK_TARGET,
        }
    }
}

/// Store manager role: refills items that run low.
#[derive(Debug, Clone, Default)]
pub struct RestockAgent {
    policy: RestockPolicy,
}

impl RestockAgent {
    pub fn new(policy: RestockPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> RestockPolicy {
        self.policy
    }
}

impl Subscriber<Item> for RestockAgent {
    /// Refilling goes through `set_supply`, so it broadcasts again.
    fn react(&self, item: &mut Item) -> DomainResult<()> {
        if self.policy.is_low(item.supply()) {
            item.record(InventoryNotice::low_supply(item.name(), item.supply()));
            item.set_supply(self.policy.restock_target)?;
        }
        Ok(())
    }
}

/// Customer role: hears about discounts and buys single units.
#[derive(Debug, Clone)]
pub struct PurchaseAgent {
    display_name: String,
}

impl PurchaseAgent {
    pub fn new(display_name: impl Into<String>) -> Self {
        Self {
            display_name: display_name.into(),
        }
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    /// Buy one unit.
    ///
    /// Fails with [`DomainError::InsufficientSupply`] when the item is sold out;
    /// in that case nothing is recorded and nobody is notified.
    pub fn buy(&self, item: &mut Item) -> DomainResult<()> {
        let available = item.supply();
        let remaining = available
            .checked_sub(1)
            .ok_or_else(|| DomainError::insufficient_supply(item.name(), 1, available))?;

        item.record(InventoryNotice::purchased(item.name(), &self.display_name));
        item.set_supply(remaining)
    }
}

impl Subscriber<Item> for PurchaseAgent {
    fn react(&self, item: &mut Item) -> DomainResult<()> {
        if item.discount_pending() {
            item.record(InventoryNotice::discount_available(
                item.name(),
                &self.display_name,
                item.price(),
            ));
            item.clear_discount();
        }
        Ok(())
    }
}
