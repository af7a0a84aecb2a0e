//! Clothing inventory with change notifications.
//!
//! Items own a subscriber registry; changing supply always notifies it, and a
//! large enough price drop flags a discount and notifies it. The two built-in
//! subscriber roles react by restocking low items and by announcing discounts.
//! No IO happens here: every notable event is recorded into a notice sink.

pub mod catalog;
pub mod details;
pub mod item;
pub mod kind;
pub mod notice;
pub mod price;
pub mod subscriber;

pub use catalog::{Catalog, ItemHandle};
pub use details::ItemDetails;
pub use item::{Item, ItemId, NoticeSink};
pub use kind::{ItemKind, SpecificDetail};
pub use notice::InventoryNotice;
pub use price::{DiscountPolicy, Price};
pub use subscriber::{PurchaseAgent, RestockAgent, RestockPolicy};

pub use stockwatch_events::{Subject, Subscriber};
