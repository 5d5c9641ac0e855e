use crate::config::{ScenarioConfig, Step};
use crate::core::engine::{CarPoolEngine, Location};
use crate::core::{DomainEvent, GroupStore, VehicleStore};
use crate::utils::error::{CarPoolError, ErrorCategory, ErrorSeverity};
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum StepOutcome {
    Events { events: Vec<DomainEvent> },
    Located { location: Location },
    Failed {
        error: String,
        category: ErrorCategory,
        severity: ErrorSeverity,
    },
}

impl StepOutcome {
    fn failed(error: &CarPoolError) -> Self {
        StepOutcome::Failed {
            error: error.to_string(),
            category: error.category(),
            severity: error.severity(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct StepReport {
    pub index: usize,
    pub step: Step,
    pub outcome: StepOutcome,
}

#[derive(Debug, Clone, Serialize)]
pub struct ScenarioReport {
    pub name: String,
    pub steps: Vec<StepReport>,
    /// Steps left unexecuted after a fail-fast stop.
    pub skipped: usize,
}

impl ScenarioReport {
    pub fn failures(&self) -> impl Iterator<Item = &StepReport> {
        self.steps
            .iter()
            .filter(|report| matches!(report.outcome, StepOutcome::Failed { .. }))
    }

    pub fn worst_severity(&self) -> Option<ErrorSeverity> {
        self.failures()
            .filter_map(|report| match report.outcome {
                StepOutcome::Failed { severity, .. } => Some(severity),
                _ => None,
            })
            .max()
    }

    pub fn events(&self) -> impl Iterator<Item = &DomainEvent> {
        self.steps.iter().flat_map(|report| match &report.outcome {
            StepOutcome::Events { events } => events.as_slice(),
            _ => &[],
        })
    }
}

/// Plays a scenario against an engine, one step at a time.
pub struct ScenarioRunner<'a, G: GroupStore, V: VehicleStore> {
    engine: &'a CarPoolEngine<G, V>,
    fail_fast: bool,
}

impl<'a, G: GroupStore, V: VehicleStore> ScenarioRunner<'a, G, V> {
    pub fn new(engine: &'a CarPoolEngine<G, V>) -> Self {
        Self {
            engine,
            fail_fast: false,
        }
    }

    pub fn fail_fast(mut self, fail_fast: bool) -> Self {
        self.fail_fast = fail_fast;
        self
    }

    pub async fn run(&self, config: &ScenarioConfig) -> ScenarioReport {
        let plan = config.plan();
        let total = plan.len();
        let mut steps = Vec::with_capacity(total);

        tracing::info!("▶️ Running scenario '{}' ({} steps)", config.scenario.name, total);

        for (index, step) in plan.into_iter().enumerate() {
            tracing::debug!("Step {}: {}", index, step);
            let outcome = self.execute(&step).await;

            let failed = matches!(outcome, StepOutcome::Failed { .. });
            steps.push(StepReport {
                index,
                step,
                outcome,
            });

            if failed && self.fail_fast {
                tracing::warn!("Stopping after failed step {}", index);
                break;
            }
        }

        let skipped = total - steps.len();
        ScenarioReport {
            name: config.scenario.name.clone(),
            steps,
            skipped,
        }
    }

    async fn execute(&self, step: &Step) -> StepOutcome {
        let result = match step {
            Step::InitializeFleet { vehicles } => self
                .engine
                .initialize_fleet(vehicles.clone())
                .await
                .map(|events| StepOutcome::Events { events }),
            Step::Journey { group, people } => self
                .engine
                .request_journey(*group, *people)
                .await
                .map(|events| StepOutcome::Events { events }),
            Step::DropOff { group } => self
                .engine
                .drop_off(*group)
                .await
                .map(|events| StepOutcome::Events { events }),
            Step::Locate { group } => self
                .engine
                .locate(*group)
                .await
                .map(|location| StepOutcome::Located { location }),
        };

        result.unwrap_or_else(|e| {
            tracing::warn!("❌ {} failed: {} ({:?})", step, e, e.category());
            StepOutcome::failed(&e)
        })
    }
}
