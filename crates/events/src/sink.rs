//! Notice sinks.
//!
//! Subjects and subscribers report what happened by recording events into a
//! shared [`EventSink`]. Each sink wraps payloads in an [`EventEnvelope`] with a
//! sink-wide sequence number, so the recorded order is exactly the order in
//! which (possibly nested) broadcasts produced them.

use std::cell::{Cell, RefCell};
use std::fmt::Display;
use std::io::Write;
use std::str::FromStr;

use serde::Serialize;
use uuid::Uuid;

use stockwatch_core::{DomainError, SubjectId};

use crate::{Event, EventEnvelope};

/// Destination for notices.
///
/// Recording never fails from the caller's point of view: a sink that cannot
/// deliver a notice logs the problem instead of interrupting a broadcast.
pub trait EventSink<E> {
    fn record(&self, subject_id: SubjectId, subject_type: &str, payload: E);
}

#[derive(Debug, Default)]
struct Sequence(Cell<u64>);

impl Sequence {
    fn next(&self) -> u64 {
        let n = self.0.get() + 1;
        self.0.set(n);
        n
    }
}

fn envelope<E>(
    seq: &Sequence,
    subject_id: SubjectId,
    subject_type: &str,
    payload: E,
) -> EventEnvelope<E> {
    EventEnvelope::new(Uuid::now_v7(), subject_id, subject_type, seq.next(), payload)
}

/// In-memory, inspectable sink (tests, embedding).
#[derive(Debug)]
pub struct Journal<E> {
    sequence: Sequence,
    envelopes: RefCell<Vec<EventEnvelope<E>>>,
}

impl<E> Journal<E> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.envelopes.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.envelopes.borrow().is_empty()
    }

    /// Forget recorded envelopes. Sequence numbers keep increasing.
    pub fn clear(&self) {
        self.envelopes.borrow_mut().clear();
    }
}

impl<E: Clone> Journal<E> {
    pub fn envelopes(&self) -> Vec<EventEnvelope<E>> {
        self.envelopes.borrow().clone()
    }

    pub fn payloads(&self) -> Vec<E> {
        self.envelopes
            .borrow()
            .iter()
            .map(|env| env.payload().clone())
            .collect()
    }
}

impl<E: Event> Journal<E> {
    pub fn event_types(&self) -> Vec<&'static str> {
        self.envelopes
            .borrow()
            .iter()
            .map(|env| env.payload().event_type())
            .collect()
    }
}

impl<E> Default for Journal<E> {
    fn default() -> Self {
        Self {
            sequence: Sequence::default(),
            envelopes: RefCell::new(Vec::new()),
        }
    }
}

impl<E> EventSink<E> for Journal<E> {
    fn record(&self, subject_id: SubjectId, subject_type: &str, payload: E) {
        let env = envelope(&self.sequence, subject_id, subject_type, payload);
        self.envelopes.borrow_mut().push(env);
    }
}

/// Logs every notice at `info` level.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl<E> EventSink<E> for TracingSink
where
    E: Event + Display,
{
    fn record(&self, subject_id: SubjectId, subject_type: &str, payload: E) {
        tracing::info!(
            subject = %subject_id,
            subject_type,
            event_type = payload.event_type(),
            "{payload}"
        );
    }
}

/// Output format of a [`LineSink`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineFormat {
    /// One human-readable line per notice.
    #[default]
    Text,
    /// One JSON-encoded envelope per line.
    Json,
}

impl FromStr for LineFormat {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            other => Err(DomainError::validation(format!(
                "unknown output format '{other}' (expected 'text' or 'json')"
            ))),
        }
    }
}

/// Writes one line per notice to any writer.
#[derive(Debug)]
pub struct LineSink<W: Write> {
    writer: RefCell<W>,
    format: LineFormat,
    sequence: Sequence,
}

impl<W: Write> LineSink<W> {
    pub fn new(writer: W, format: LineFormat) -> Self {
        Self {
            writer: RefCell::new(writer),
            format,
            sequence: Sequence::default(),
        }
    }

    pub fn format(&self) -> LineFormat {
        self.format
    }

    pub fn into_inner(self) -> W {
        self.writer.into_inner()
    }
}

impl<W, E> EventSink<E> for LineSink<W>
where
    W: Write,
    E: Event + Display + Serialize,
{
    fn record(&self, subject_id: SubjectId, subject_type: &str, payload: E) {
        let event_type = payload.event_type();
        let env = envelope(&self.sequence, subject_id, subject_type, payload);
        let mut writer = self.writer.borrow_mut();

        let result = match self.format {
            LineFormat::Text => writeln!(writer, "{}", env.payload()),
            LineFormat::Json => match serde_json::to_string(&env) {
                Ok(line) => writeln!(writer, "{line}"),
                Err(e) => {
                    tracing::warn!(event_type, error = %e, "failed to encode notice");
                    return;
                }
            },
        };

        if let Err(e) = result {
            tracing::warn!(event_type, error = %e, "failed to write notice");
        }
    }
}
