//! Sample load-test module.
//!
//! Build with `cargo build -p loadr-demo` and pass the resulting shared library
//! to `loadr`.

use std::time::Duration;

use loadr_abi::contracts::{LoadSimulation, Response, ScenarioContext, ScenarioProps};
use loadr_abi::{Scenarios, Setup};

loadr_abi::declare_module!(DemoSetup);

#[derive(Debug, Default)]
pub struct DemoSetup;

impl Setup for DemoSetup {
    fn setup(&mut self) -> Scenarios<'_> {
        Box::new(vec![two_steps(), single_step(), seeded_database()].into_iter())
    }
}

fn two_steps() -> ScenarioProps {
    ScenarioProps::create("scenario_1", |ctx: ScenarioContext| async move {
        let step1 = step(&ctx, "step_1 response").await;
        let step2 = step(&ctx, "step_2 response").await;

        if step1.payload.as_deref() == Some("step_1 response")
            && step2.payload.as_deref() == Some("step_2 response")
        {
            Response::ok().with_status_code("200")
        } else {
            Response::fail().with_status_code("500")
        }
    })
    .without_warm_up()
    .with_load_simulations([
        LoadSimulation::inject(10, Duration::from_secs(1), Duration::from_secs(20)),
        LoadSimulation::keep_constant(50, Duration::from_secs(30)),
    ])
}

fn single_step() -> ScenarioProps {
    ScenarioProps::create("scenario_2", |ctx: ScenarioContext| async move {
        ctx.sleep(Duration::from_secs(1)).await;
        Response::ok()
    })
    .without_warm_up()
    .with_load_simulations([LoadSimulation::keep_constant(1, Duration::from_secs(10))])
}

fn seeded_database() -> ScenarioProps {
    ScenarioProps::empty("sc_3")
        .with_init(|ctx| async move {
            // populate the database here
            ctx.sleep(Duration::from_secs(5)).await;
            Ok(())
        })
        .with_clean(|ctx| async move {
            // and clean it up here
            ctx.sleep(Duration::from_secs(5)).await;
            Ok(())
        })
}

async fn step(ctx: &ScenarioContext, payload: &str) -> Response {
    ctx.sleep(Duration::from_secs(1)).await;
    Response::ok().with_payload(payload).with_size_bytes(10)
}
