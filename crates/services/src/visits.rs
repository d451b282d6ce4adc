//! # Visit recording
//!
//! Fire-and-forget from the browser's point of view: the page never waits
//! on this, and a failure here must not break rendering. Internally it is a
//! single awaited insert.

use domains::error::Result;
use domains::models::NewVisit;
use domains::ports::VisitLog;
use std::sync::Arc;
use tracing::warn;
use uuid::Uuid;

#[derive(Clone)]
pub struct VisitService {
    log: Arc<dyn VisitLog>,
}

impl VisitService {
    pub fn new(log: Arc<dyn VisitLog>) -> Self {
        Self { log }
    }

    /// Normalizes and appends one visit, returning its generated id.
    /// An empty or missing path defaults to `/`; optional fields stay
    /// absent. Identical payloads always produce distinct rows.
    pub async fn record(&self, mut visit: NewVisit) -> Result<Uuid> {
        if visit.path.trim().is_empty() {
            visit.path = "/".to_string();
        }
        match self.log.record(visit).await {
            Ok(id) => Ok(id),
            Err(err) => {
                warn!(error = %err, "visit recording failed");
                Err(err)
            }
        }
    }
}
