use std::rc::Rc;

use serde::{Deserialize, Serialize};

use stockwatch_core::{DomainError, DomainResult, Entity, SubjectId};
use stockwatch_events::{EventSink, Registry, Subject, Subscriber, TracingSink, broadcast};

use crate::details::ItemDetails;
use crate::kind::ItemKind;
use crate::notice::InventoryNotice;
use crate::price::{DiscountPolicy, Price};

/// Item identifier.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(pub SubjectId);

impl ItemId {
    pub fn new(id: SubjectId) -> Self {
        Self(id)
    }
}

impl core::fmt::Display for ItemId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

/// Shared destination for the notices of one or more items.
pub type NoticeSink = Rc<dyn EventSink<InventoryNotice>>;

/// Subject type recorded on every envelope an item produces.
pub const SUBJECT_TYPE: &str = "clothing.item";

/// A priced, stocked clothing variant that notifies its subscribers.
///
/// `set_supply` and `set_price` are the only ways to change supply and price.
/// Both run their broadcast synchronously and return once every reaction
/// (including nested broadcasts caused by reactions) has finished.
pub struct Item {
    id: ItemId,
    name: String,
    price: Price,
    supply: u32,
    kind: ItemKind,
    discount_pending: bool,
    discount_policy: DiscountPolicy,
    registry: Registry<dyn Subscriber<Item>>,
    sink: NoticeSink,
}

impl Item {
    pub fn new(
        name: impl Into<String>,
        price: f64,
        supply: u32,
        kind: ItemKind,
    ) -> DomainResult<Self> {
        Self::with_id(ItemId::new(SubjectId::new()), name, price, supply, kind)
    }

    pub fn with_id(
        id: ItemId,
        name: impl Into<String>,
        price: f64,
        supply: u32,
        kind: ItemKind,
    ) -> DomainResult<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(DomainError::validation("name cannot be empty"));
        }
        let price = Price::new(price)?;
        kind.validate()?;

        Ok(Self {
            id,
            name,
            price,
            supply,
            kind,
            discount_pending: false,
            discount_policy: DiscountPolicy::default(),
            registry: Registry::new(),
            sink: Rc::new(TracingSink),
        })
    }

    pub fn shirt(
        name: impl Into<String>,
        price: f64,
        supply: u32,
        size: impl Into<String>,
    ) -> DomainResult<Self> {
        Self::new(name, price, supply, ItemKind::shirt(size))
    }

    pub fn pants(
        name: impl Into<String>,
        price: f64,
        supply: u32,
        material: impl Into<String>,
    ) -> DomainResult<Self> {
        Self::new(name, price, supply, ItemKind::pants(material))
    }

    /// Route this item's notices to `sink` instead of the tracing log.
    pub fn with_sink(mut self, sink: NoticeSink) -> Self {
        self.sink = sink;
        self
    }

    pub fn with_discount_policy(mut self, policy: DiscountPolicy) -> Self {
        self.discount_policy = policy;
        self
    }

    pub fn item_id(&self) -> ItemId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn price(&self) -> Price {
        self.price
    }

    pub fn supply(&self) -> u32 {
        self.supply
    }

    pub fn kind(&self) -> &ItemKind {
        &self.kind
    }

    pub fn discount_policy(&self) -> DiscountPolicy {
        self.discount_policy
    }

    /// Set by a qualifying price drop, cleared only by [`Item::clear_discount`].
    ///
    /// This is a pending notification, not a statement about the current price.
    pub fn discount_pending(&self) -> bool {
        self.discount_pending
    }

    /// Consume the pending discount. Returns whether one was pending.
    pub fn clear_discount(&mut self) -> bool {
        std::mem::take(&mut self.discount_pending)
    }

    /// Register a subscriber; broadcasts reach subscribers in attachment order.
    ///
    /// Only a weak handle is kept, so the caller must hold on to its `Rc` for as
    /// long as the subscriber should be notified.
    pub fn attach(&mut self, subscriber: Rc<dyn Subscriber<Item>>) {
        if Rc::strong_count(&subscriber) == 1 {
            tracing::warn!(
                item = %self.id,
                "attached subscriber has no other owner and will never be notified"
            );
        }
        self.registry.attach(&subscriber);
    }

    /// Remove the first registration of `subscriber`; no-op if absent.
    pub fn detach(&mut self, subscriber: Rc<dyn Subscriber<Item>>) -> bool {
        self.registry.detach(&subscriber)
    }

    pub fn is_attached(&self, subscriber: Rc<dyn Subscriber<Item>>) -> bool {
        self.registry.contains(&subscriber)
    }

    pub fn subscriber_count(&self) -> usize {
        self.registry.len()
    }

    /// Replace the supply and notify every subscriber, whatever the change.
    pub fn set_supply(&mut self, supply: u32) -> DomainResult<()> {
        tracing::debug!(item = %self.id, from = self.supply, to = supply, "supply set");
        self.supply = supply;
        self.record(InventoryNotice::supply_updated(&self.name, supply));
        broadcast(self)
    }

    /// Replace the price. Subscribers are notified only when the drop reaches
    /// the discount threshold; the discount flag is raised first.
    ///
    /// A previous price of zero never yields a discount.
    pub fn set_price(&mut self, price: f64) -> DomainResult<()> {
        let new = Price::new(price)?;
        let old = self.price;
        self.price = new;

        if new < old {
            self.record(InventoryNotice::price_dropped(&self.name, old, new));
        } else if new > old {
            self.record(InventoryNotice::price_raised(&self.name, old, new));
        }

        if self.discount_policy.qualifies(old, new) {
            tracing::debug!(item = %self.id, %old, %new, "discount flagged");
            self.discount_pending = true;
            broadcast(self)?;
        }
        Ok(())
    }

    /// Record a notice about this item.
    pub fn record(&self, notice: InventoryNotice) {
        self.sink.record(self.id.0, SUBJECT_TYPE, notice);
    }

    pub fn details(&self) -> ItemDetails {
        ItemDetails {
            id: self.id,
            name: self.name.clone(),
            price: self.price,
            supply: self.supply,
            kind: self.kind.clone(),
        }
    }
}

impl Entity for Item {
    type Id = ItemId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

impl Subject for Item {
    type Error = DomainError;

    fn registry(&self) -> &Registry<dyn Subscriber<Self>> {
        &self.registry
    }
}

impl core::fmt::Debug for Item {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Item")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("price", &self.price)
            .field("supply", &self.supply)
            .field("kind", &self.kind)
            .field("discount_pending", &self.discount_pending)
            .field("registry", &self.registry)
            .finish_non_exhaustive()
    }
}
