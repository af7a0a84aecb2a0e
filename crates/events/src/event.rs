use chrono::{DateTime, Utc};

/// A fact recorded by a subject or one of its subscribers.
///
/// Events are never mutated after creation. The type string is stable and
/// namespaced (e.g. "inventory.item.supply_updated"); `version` changes when
/// the payload shape does.
pub trait Event: Clone + core::fmt::Debug + Send + Sync + 'static {
    fn event_type(&self) -> &'static str;

    fn version(&self) -> u32;

    /// Wall-clock time at which the event was produced.
    fn occurred_at(&self) -> DateTime<Utc>;
}
