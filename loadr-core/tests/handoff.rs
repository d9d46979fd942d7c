mod support;

use loadr_core::{Aggregator, Engine, ScenarioProps, handoff};
use support::{MODULE_A, MODULE_B, MODULE_TWO};

#[derive(Default)]
struct RecordingEngine {
    registrations: usize,
    registered: Vec<String>,
}

impl Engine for RecordingEngine {
    type Output = (usize, Vec<String>);

    fn register_scenarios(&mut self, scenarios: Vec<ScenarioProps>) {
        self.registrations += 1;
        self.registered
            .extend(scenarios.iter().map(|s| s.name().to_string()));
    }

    async fn run(self) -> Self::Output {
        (self.registrations, self.registered)
    }
}

#[tokio::test]
async fn engine_receives_exact_aggregated_list() {
    let aggregator = Aggregator::new(support::loader());
    let set = aggregator
        .aggregate([MODULE_TWO])
        .into_set()
        .unwrap_or_else(|e| panic!("expected scenarios: {e}"));
    assert_eq!(set.len(), 2);

    let (registrations, registered) = handoff(RecordingEngine::default(), set).await;
    assert_eq!(registrations, 1);
    assert_eq!(registered, ["scenario_1", "scenario_2"]);
}

#[tokio::test]
async fn engine_sees_scenarios_across_modules_in_path_order() {
    let aggregator = Aggregator::new(support::loader());
    let set = aggregator
        .aggregate([MODULE_B, MODULE_A])
        .into_set()
        .unwrap_or_else(|e| panic!("expected scenarios: {e}"));

    let (_, registered) = handoff(RecordingEngine::default(), set).await;
    assert_eq!(registered, ["s3", "s1", "s2"]);
}
