//! Change notifications for shelf observers.

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

use super::types::{NavigationRequest, SearchStatus};
use crate::catalog::FetchErrorKind;

/// Something observable about the shelf changed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ShelfEvent {
    /// A refresh replaced the catalog.
    CatalogReplaced { count: usize },
    /// A refresh failed; the catalog was left as it was.
    RefreshFailed {
        kind: FetchErrorKind,
        message: String,
    },
    /// The user-facing message was set or cleared.
    MessageChanged { message: Option<String> },
    /// The pending search query changed.
    SearchQueryChanged { query: String },
    /// A submitted search finished.
    SearchCompleted {
        query: String,
        status: SearchStatus,
        matches: usize,
    },
    /// The shelf asked its owner to navigate somewhere.
    NavigationRequested { request: NavigationRequest },
}

impl ShelfEvent {
    /// Short name of the event type.
    pub fn type_name(&self) -> &'static str {
        match self {
            ShelfEvent::CatalogReplaced { .. } => "catalog_replaced",
            ShelfEvent::RefreshFailed { .. } => "refresh_failed",
            ShelfEvent::MessageChanged { .. } => "message_changed",
            ShelfEvent::SearchQueryChanged { .. } => "search_query_changed",
            ShelfEvent::SearchCompleted { .. } => "search_completed",
            ShelfEvent::NavigationRequested { .. } => "navigation_requested",
        }
    }
}

/// Fan-out of shelf events over a tokio broadcast channel.
#[derive(Debug, Clone)]
pub struct ShelfBroadcaster {
    sender: broadcast::Sender<ShelfEvent>,
}

impl ShelfBroadcaster {
    /// Create a new broadcaster with the given channel capacity.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Send an event to all current subscribers.
    pub fn broadcast(&self, event: ShelfEvent) {
        // Send only fails when nobody is subscribed
        let _ = self.sender.send(event);
    }

    pub fn subscribe(&self) -> broadcast::Receiver<ShelfEvent> {
        self.sender.subscribe()
    }

    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for ShelfBroadcaster {
    fn default() -> Self {
        Self::new(256)
    }
}
