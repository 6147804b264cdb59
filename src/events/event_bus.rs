use super::types::{CatalogEvent, EventPayload, EventType, FetchOperation};
use anyhow::Result;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{RwLock, broadcast};
use tracing::trace;

/// Event subscriber handle
pub struct EventSubscriber {
    receiver: broadcast::Receiver<CatalogEvent>,
    filter: Option<EventFilter>,
}

impl EventSubscriber {
    pub fn new(receiver: broadcast::Receiver<CatalogEvent>, filter: Option<EventFilter>) -> Self {
        Self { receiver, filter }
    }

    /// Receive the next event matching the filter
    pub async fn recv(&mut self) -> Result<CatalogEvent> {
        loop {
            let event = self.receiver.recv().await?;
            if self.accepts(&event) {
                return Ok(event);
            }
        }
    }

    /// Try to receive without blocking
    pub fn try_recv(&mut self) -> Result<Option<CatalogEvent>> {
        loop {
            match self.receiver.try_recv() {
                Ok(event) if self.accepts(&event) => return Ok(Some(event)),
                Ok(_) => continue,
                Err(broadcast::error::TryRecvError::Empty) => return Ok(None),
                Err(e) => return Err(e.into()),
            }
        }
    }

    /// Drain everything currently queued
    pub fn drain(&mut self) -> Vec<CatalogEvent> {
        let mut events = Vec::new();
        while let Ok(Some(event)) = self.try_recv() {
            events.push(event);
        }
        events
    }

    fn accepts(&self, event: &CatalogEvent) -> bool {
        self.filter
            .as_ref()
            .map(|filter| filter.matches(event))
            .unwrap_or(true)
    }
}

/// Event filter for selective subscription
#[derive(Debug, Clone, Default)]
pub struct EventFilter {
    event_types: Option<Vec<EventType>>,
}

impl EventFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_types(mut self, types: Vec<EventType>) -> Self {
        self.event_types = Some(types);
        self
    }

    pub fn matches(&self, event: &CatalogEvent) -> bool {
        if let Some(ref types) = self.event_types
            && !types.contains(&event.event_type)
        {
            return false;
        }
        true
    }
}

/// Broadcasts catalog events to the render layer
#[derive(Debug)]
pub struct EventBus {
    sender: broadcast::Sender<CatalogEvent>,
    stats: Arc<RwLock<EventBusStats>>,
}

#[derive(Debug, Default, Clone)]
pub struct EventBusStats {
    pub total_events: u64,
    pub events_by_type: HashMap<String, u64>,
    pub subscriber_count: usize,
    pub dropped_events: u64,
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(64)
    }
}

impl EventBus {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));

        Self {
            sender,
            stats: Arc::new(RwLock::new(EventBusStats::default())),
        }
    }

    pub async fn publish(&self, event: CatalogEvent) {
        trace!("Publishing event: {}", event.event_type.as_str());

        let mut stats = self.stats.write().await;
        stats.total_events += 1;
        *stats
            .events_by_type
            .entry(event.event_type.as_str().to_string())
            .or_insert(0) += 1;

        // No subscribers is normal
        if self.sender.send(event).is_err() {
            stats.dropped_events += 1;
        }
    }

    pub fn subscribe(&self) -> EventSubscriber {
        EventSubscriber::new(self.sender.subscribe(), None)
    }

    pub fn subscribe_filtered(&self, filter: EventFilter) -> EventSubscriber {
        EventSubscriber::new(self.sender.subscribe(), Some(filter))
    }

    pub fn subscribe_to_types(&self, types: Vec<EventType>) -> EventSubscriber {
        self.subscribe_filtered(EventFilter::new().with_types(types))
    }

    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }

    pub async fn get_stats(&self) -> EventBusStats {
        let stats = self.stats.read().await;
        EventBusStats {
            subscriber_count: self.subscriber_count(),
            ..stats.clone()
        }
    }

    pub async fn emit_list_updated(
        &self,
        page: u32,
        total_count: u64,
        total_pages: u32,
        item_count: usize,
    ) {
        self.publish(CatalogEvent::new(
            EventType::ListUpdated,
            EventPayload::List {
                page,
                total_count,
                total_pages,
                item_count,
            },
        ))
        .await
    }

    pub async fn emit_fetch_failed(&self, operation: FetchOperation, message: impl Into<String>) {
        self.publish(CatalogEvent::new(
            EventType::FetchFailed,
            EventPayload::Failure {
                operation,
                message: message.into(),
            },
        ))
        .await
    }
}
