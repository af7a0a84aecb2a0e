use serde::Serialize;

use crate::item::ItemId;
use crate::kind::ItemKind;
use crate::price::Price;

pub const HEADER: &str = "=== Clothing Details ===";
pub const FOOTER: &str = "=========================";

/// Point-in-time description of an item.
///
/// Renders as a fixed block: header, common fields, the kind-specific field,
/// footer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ItemDetails {
    pub id: ItemId,
    pub name: String,
    pub price: Price,
    pub supply: u32,
    #[serde(flatten)]
    pub kind: ItemKind,
}

impl core::fmt::Display for ItemDetails {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        writeln!(f, "{HEADER}")?;
        writeln!(f, "Name: {}", self.name)?;
        writeln!(f, "Price: {}", self.price)?;
        writeln!(f, "Supply: {}", self.supply)?;
        writeln!(f, "{}", self.kind.describe_specific())?;
        writeln!(f, "{FOOTER}")
    }
}
