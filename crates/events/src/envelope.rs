use serde::{Deserialize, Serialize};
use uuid::Uuid;

use stockwatch_core::SubjectId;

/// Envelope for an event, containing subject + ordering metadata.
///
/// This is the unit a sink records.
///
/// Notes:
/// - `sequence_number` is monotonically increasing per sink, so it captures the
///   order in which nested broadcasts produced their notices.
/// - `payload` is the domain event itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventEnvelope<E> {
    event_id: Uuid,

    subject_id: SubjectId,
    subject_type: String,

    /// Position in the sink's stream (starts at 1).
    sequence_number: u64,

    payload: E,
}

impl<E> EventEnvelope<E> {
    pub fn new(
        event_id: Uuid,
        subject_id: SubjectId,
        subject_type: impl Into<String>,
        sequence_number: u64,
        payload: E,
    ) -> Self {
        Self {
            event_id,
            subject_id,
            subject_type: subject_type.into(),
            sequence_number,
            payload,
        }
    }

    pub fn subject_id(&self) -> SubjectId {
        self.subject_id
    }

    pub fn subject_type(&self) -> &str {
        &self.subject_type
    }

    pub fn sequence_number(&self) -> u64 {
        self.sequence_number
    }

    pub fn payload(&self) -> &E {
        &self.payload
    }
}
