//! Module with well-behaved and misbehaving providers, loaded by the
//! integration tests as a real shared library.

use std::time::Duration;

use loadr_abi::contracts::{HookResult, LoadSimulation, Response, ScenarioProps};
use loadr_abi::{Scenarios, Setup};

loadr_abi::declare_module!(Exploding, Healthy, StopsHalfway, Misbehaving);

fn short(scenario: ScenarioProps) -> ScenarioProps {
    scenario
        .without_warm_up()
        .with_load_simulations([LoadSimulation::keep_constant(1, Duration::from_millis(50))])
}

fn ok_scenario(name: &str) -> ScenarioProps {
    short(ScenarioProps::create(name, |ctx| async move {
        ctx.sleep(Duration::from_millis(5)).await;
        Response::ok().with_size_bytes(10)
    }))
}

pub struct Exploding;

impl Default for Exploding {
    fn default() -> Self {
        panic!("constructor failed");
    }
}

impl Setup for Exploding {
    fn setup(&mut self) -> Scenarios<'_> {
        Box::new(std::iter::empty())
    }
}

#[derive(Default)]
pub struct Healthy;

impl Setup for Healthy {
    fn setup(&mut self) -> Scenarios<'_> {
        Box::new(vec![ok_scenario("healthy_1"), ok_scenario("healthy_2")].into_iter())
    }
}

#[derive(Default)]
pub struct StopsHalfway;

impl Setup for StopsHalfway {
    fn setup(&mut self) -> Scenarios<'_> {
        let mut step = 0;
        Box::new(std::iter::from_fn(move || {
            step += 1;
            match step {
                1 => Some(ok_scenario("partial_1")),
                _ => panic!("setup failed after first scenario"),
            }
        }))
    }
}

fn exploding_hook() -> HookResult {
    panic!("init hook exploded")
}

fn exploding_call() -> Response {
    panic!("scenario blew up")
}

#[derive(Default)]
pub struct Misbehaving;

impl Setup for Misbehaving {
    fn setup(&mut self) -> Scenarios<'_> {
        Box::new(
            vec![
                ScenarioProps::empty("init_panics").with_init(|_ctx| async { exploding_hook() }),
                short(ScenarioProps::create("invocation_panics", |ctx| async move {
                    ctx.sleep(Duration::from_millis(5)).await;
                    exploding_call()
                })),
            ]
            .into_iter(),
        )
    }
}
