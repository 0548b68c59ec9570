//! Permission entity model.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::operation::Operation;
use super::service::ServiceName;

/// An allowed `(service, operation)` pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Permission {
    /// Unique permission identifier.
    pub id: Uuid,
    /// Guarded service.
    pub service: ServiceName,
    /// Allowed operation.
    pub operation: Operation,
}

impl Permission {
    /// Whether this permission grants `operation` on `service`.
    pub fn grants(&self, service: ServiceName, operation: Operation) -> bool {
        self.service == service && self.operation == operation
    }
}
