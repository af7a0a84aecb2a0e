use chrono::{DateTime, Utc};
use serde::Serialize;

use stockwatch_events::Event;

use crate::price::Price;

/// Everything notable that happens to an item, one variant per message.
///
/// `Display` renders the human-readable line; the recorded order of notices is
/// the observable contract, not their wording.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InventoryNotice {
    SupplyUpdated {
        item: String,
        supply: u32,
        occurred_at: DateTime<Utc>,
    },
    PriceDropped {
        item: String,
        old_price: Price,
        new_price: Price,
        occurred_at: DateTime<Utc>,
    },
    PriceRaised {
        item: String,
        old_price: Price,
        new_price: Price,
        occurred_at: DateTime<Utc>,
    },
    LowSupply {
        item: String,
        supply: u32,
        occurred_at: DateTime<Utc>,
    },
    DiscountAvailable {
        item: String,
        customer: String,
        price: Price,
        occurred_at: DateTime<Utc>,
    },
    Purchased {
        item: String,
        customer: String,
        occurred_at: DateTime<Utc>,
    },
}

impl InventoryNotice {
    pub fn supply_updated(item: &str, supply: u32) -> Self {
        Self::SupplyUpdated {
            item: item.to_string(),
            supply,
            occurred_at: Utc::now(),
        }
    }

    pub fn price_dropped(item: &str, old_price: Price, new_price: Price) -> Self {
        Self::PriceDropped {
            item: item.to_string(),
            old_price,
            new_price,
            occurred_at: Utc::now(),
        }
    }

    pub fn price_raised(item: &str, old_price: Price, new_price: Price) -> Self {
        Self::PriceRaised {
            item: item.to_string(),
            old_price,
            new_price,
            occurred_at: Utc::now(),
        }
    }

    pub fn low_supply(item: &str, supply: u32) -> Self {
        Self::LowSupply {
            item: item.to_string(),
            supply,
            occurred_at: Utc::now(),
        }
    }

    pub fn discount_available(item: &str, customer: &str, price: Price) -> Self {
        Self::DiscountAvailable {
            item: item.to_string(),
            customer: customer.to_string(),
            price,
            occurred_at: Utc::now(),
        }
    }

    pub fn purchased(item: &str, customer: &str) -> Self {
        Self::Purchased {
            item: item.to_string(),
            customer: customer.to_string(),
            occurred_at: Utc::now(),
        }
    }

    /// Name of the item the notice is about.
    pub fn item(&self) -> &str {
        match self {
            InventoryNotice::SupplyUpdated { item, .. }
            | InventoryNotice::PriceDropped { item, .. }
            | InventoryNotice::PriceRaised { item, .. }
            | InventoryNotice::LowSupply { item, .. }
            | InventoryNotice::DiscountAvailable { item, .. }
            | InventoryNotice::Purchased { item, .. } => item,
        }
    }
}

impl Event for InventoryNotice {
    fn event_type(&self) -> &'static str {
        match self {
            InventoryNotice::SupplyUpdated { .. } => "inventory.item.supply_updated",
            InventoryNotice::PriceDropped { .. } => "inventory.item.price_dropped",
            InventoryNotice::PriceRaised { .. } => "inventory.item.price_raised",
            InventoryNotice::LowSupply { .. } => "inventory.restock.low_supply",
            InventoryNotice::DiscountAvailable { .. } => "inventory.customer.discount_available",
            InventoryNotice::Purchased { .. } => "inventory.customer.purchased",
        }
    }

    fn version(&self) -> u32 {
        1
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        match self {
            InventoryNotice::SupplyUpdated { occurred_at, .. }
            | InventoryNotice::PriceDropped { occurred_at, .. }
            | InventoryNotice::PriceRaised { occurred_at, .. }
            | InventoryNotice::LowSupply { occurred_at, .. }
            | InventoryNotice::DiscountAvailable { occurred_at, .. }
            | InventoryNotice::Purchased { occurred_at, .. } => *occurred_at,
        }
    }
}

impl core::fmt::Display for InventoryNotice {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            InventoryNotice::SupplyUpdated { item, supply, .. } => {
                write!(f, "Supply of {item} updated: {supply}")
            }
            InventoryNotice::PriceDropped {
                item,
                old_price,
                new_price,
                ..
            } => write!(
                f,
                "Price of {item} dropped by: {:.2}",
                old_price.value() - new_price.value()
            ),
            InventoryNotice::PriceRaised {
                item,
                old_price,
                new_price,
                ..
            } => write!(
                f,
                "Price of {item} went up by: {:.2}",
                new_price.value() - old_price.value()
            ),
            InventoryNotice::LowSupply { item, supply, .. } => write!(
                f,
                "Notification for Store Manager: {item} supply is low ({supply}). Order new supply!"
            ),
            InventoryNotice::DiscountAvailable {
                item,
                customer,
                price,
                ..
            } => write!(
                f,
                "Notification for {customer}: {item} price dropped. Buy now! (New Price: {price})"
            ),
            InventoryNotice::Purchased { item, customer, .. } => {
                write!(f, "{customer} bought: {item}")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn price(v: f64) -> Price {
        Price::new(v).unwrap()
    }

    #[test]
    fn renders_human_readable_lines() {
        assert_eq!(
            InventoryNotice::supply_updated("T-Shirt", 5).to_string(),
            "Supply of T-Shirt updated: 5"
        );
        assert_eq!(
            InventoryNotice::price_dropped("Jeans", price(50.0), price(40.0)).to_string(),
            "Price of Jeans dropped by: 10.00"
        );
        assert_eq!(
            InventoryNotice::price_raised("Jeans", price(40.0), price(42.5)).to_string(),
            "Price of Jeans went up by: 2.50"
        );
        assert_eq!(
            InventoryNotice::purchased("Jeans", "Nick").to_string(),
            "Nick bought: Jeans"
        );
    }

    #[test]
    fn serializes_with_type_tag() {
        let json = serde_json::to_value(InventoryNotice::low_supply("Jeans", 7)).unwrap();
        assert_eq!(json["type"], "low_supply");
        assert_eq!(json["item"], "Jeans");
        assert_eq!(json["supply"], 7);
    }
}
