//! Notifications published by the brain

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::ModelKind;

/// Something observers of the brain need to react to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BrainEvent {
    /// Every file was dropped
    BrainReset,
    ModelCreated(ModelKind),
    ModelDestroyed(ModelKind),
    /// Volume coloring must be recomputed
    VolumeColoringInvalid,
    /// Annotation text substitution layers must be recomputed
    TextSubstitutionLayersInvalid,
}

/// A published event with its position and time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PublishedEvent {
    pub sequence: u64,
    pub timestamp: DateTime<Utc>,
    pub event: BrainEvent,
}

/// Destination for brain events
pub trait EventBus: Send {
    fn publish(&mut self, event: BrainEvent);

    /// Events published after `sequence`
    fn events_after(&self, sequence: u64) -> Vec<&PublishedEvent>;

    /// Sequence number of the latest event
    fn current_sequence(&self) -> u64;
}

/// Event bus that keeps every event in memory
#[derive(Debug, Default)]
pub struct InMemoryEventBus {
    events: Vec<PublishedEvent>,
}

impl InMemoryEventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn all_events(&self) -> impl Iterator<Item = &BrainEvent> {
        self.events.iter().map(|e| &e.event)
    }
}

impl EventBus for InMemoryEventBus {
    fn publish(&mut self, event: BrainEvent) {
        let sequence = self.current_sequence() + 1;
        self.events.push(PublishedEvent {
            sequence,
            timestamp: Utc::now(),
            event,
        });
    }

    fn events_after(&self, sequence: u64) -> Vec<&PublishedEvent> {
        self.events.iter().filter(|e| e.sequence > sequence).collect()
    }

    fn current_sequence(&self) -> u64 {
        self.events.last().map_or(0, |e| e.sequence)
    }
}
