//! Domain event publishing.

use async_trait::async_trait;
use domain::DomainEvent;
use tracing::info;

use crate::error::AppResult;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Sink for domain events.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait EventPublisher: Send + Sync {
    async fn publish(&self, event: &DomainEvent) -> AppResult<()>;
}

/// Publisher that only records events in the log.
#[derive(Debug, Default, Clone)]
pub struct LoggingEventPublisher;

#[async_trait]
impl EventPublisher for LoggingEventPublisher {
    async fn publish(&self, event: &DomainEvent) -> AppResult<()> {
        info!(
            event_id = %event.id,
            event_type = event.event_type(),
            correlation_id = event.correlation_id.as_deref().unwrap_or("-"),
            "Event published (placeholder)"
        );
        Ok(())
    }
}
