//! Test scenario provider — canned `ScenarioProvider` for tests.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use wondertale_core::error::EngineError;
use wondertale_scenario::{Scenario, ScenarioProvider};

/// A provider serving scenarios from an in-memory map.
#[derive(Debug, Default)]
pub struct InMemoryScenarioProvider {
    scenarios: HashMap<String, Arc<Scenario>>,
}

impl InMemoryScenarioProvider {
    /// Creates an empty provider.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a provider serving a single scenario.
    #[must_use]
    pub fn with_scenario(scenario: Scenario) -> Self {
        let mut provider = Self::new();
        provider.insert(scenario);
        provider
    }

    /// Adds a scenario, keyed by its id.
    pub fn insert(&mut self, scenario: Scenario) {
        self.scenarios
            .insert(scenario.id.clone(), Arc::new(scenario));
    }
}

#[async_trait]
impl ScenarioProvider for InMemoryScenarioProvider {
    async fn scenario_by_id(
        &self,
        scenario_id: &str,
    ) -> Result<Option<Arc<Scenario>>, EngineError> {
        Ok(self.scenarios.get(scenario_id).cloned())
    }
}
