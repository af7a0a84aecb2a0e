//! Change notification mechanics: events, envelopes, subscriber registries and sinks.
//!
//! Nothing in this crate knows about clothing or stock levels. A *subject* owns a
//! [`Registry`] of non-owning subscriber handles and calls [`broadcast`] after it
//! mutates itself; each *sink* records the notices produced along the way.

pub mod envelope;
pub mod event;
pub mod registry;
pub mod sink;

pub use envelope::EventEnvelope;
pub use event::Event;
pub use registry::{Registry, Subject, Subscriber, broadcast};
pub use sink::{EventSink, Journal, LineFormat, LineSink, TracingSink};
