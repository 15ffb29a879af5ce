//! Scenario lookup port.

use std::sync::Arc;

use async_trait::async_trait;
use wondertale_core::error::EngineError;

use crate::graph::Scenario;

/// Read-only lookup of authored scenarios.
///
/// Implementations live outside this core (content service, bundle store);
/// they are expected to return graphs that already passed
/// [`Scenario::validate`](crate::graph::Scenario) at authoring time.
#[async_trait]
pub trait ScenarioProvider: Send + Sync {
    /// Returns the scenario with the given id, or `None` if unknown.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Storage`] if the backing store fails.
    async fn scenario_by_id(&self, scenario_id: &str)
    -> Result<Option<Arc<Scenario>>, EngineError>;
}
