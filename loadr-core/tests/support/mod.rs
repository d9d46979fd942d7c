#![allow(dead_code)]

pub mod dylib;

use loadr_abi::contracts::{Response, ScenarioProps};
use loadr_abi::{
    ABI_VERSION, MarkerRegistry, ModuleDeclaration, Provider, ProviderFactory, RUSTC_VERSION,
    Scenarios, Setup,
};
use loadr_core::StaticLoader;

pub const MODULE_A: &str = "modules/a.so";
pub const MODULE_B: &str = "modules/b.so";
pub const MODULE_TWO: &str = "modules/two.so";
pub const MODULE_MIXED: &str = "modules/mixed.so";
pub const MODULE_EMPTY: &str = "modules/empty.so";
pub const MODULE_DEMO: &str = "modules/demo.so";
pub const MODULE_MISSING: &str = "modules/missing.so";

const fn declaration(register: fn(&mut MarkerRegistry) -> Result<(), String>) -> ModuleDeclaration {
    ModuleDeclaration {
        abi_version: ABI_VERSION,
        rustc_version: RUSTC_VERSION,
        register,
    }
}

fn scenario(name: &str) -> ScenarioProps {
    ScenarioProps::create(name, |_ctx| async { Response::ok() }).without_warm_up()
}

#[derive(Default)]
pub struct Alpha;

impl Setup for Alpha {
    fn setup(&mut self) -> Scenarios<'_> {
        Box::new(vec![scenario("s1"), scenario("s2")].into_iter())
    }
}

#[derive(Default)]
pub struct Beta;

impl Setup for Beta {
    fn setup(&mut self) -> Scenarios<'_> {
        Box::new(std::iter::once(scenario("s3")))
    }
}

/// Yields `scenario_1` and `scenario_2` lazily.
#[derive(Default)]
pub struct TwoNamed {
    produced: usize,
}

impl Setup for TwoNamed {
    fn setup(&mut self) -> Scenarios<'_> {
        Box::new(std::iter::from_fn(move || {
            if self.produced == 2 {
                return None;
            }
            self.produced += 1;
            Some(scenario(&format!("scenario_{}", self.produced)))
        }))
    }
}

pub struct PanickingConstructor;

impl Default for PanickingConstructor {
    fn default() -> Self {
        panic!("constructor failed");
    }
}

impl Setup for PanickingConstructor {
    fn setup(&mut self) -> Scenarios<'_> {
        Box::new(std::iter::empty())
    }
}

#[derive(Default)]
pub struct PanicsMidway;

impl Setup for PanicsMidway {
    fn setup(&mut self) -> Scenarios<'_> {
        let mut step = 0;
        Box::new(std::iter::from_fn(move || {
            step += 1;
            match step {
                1 => Some(scenario("partial_1")),
                _ => panic!("setup failed after first scenario"),
            }
        }))
    }
}

fn failing_factory() -> Result<Provider, String> {
    Err("connection refused".to_string())
}

fn register_a(registry: &mut MarkerRegistry) -> Result<(), String> {
    registry.declare::<Alpha>();
    Ok(())
}

fn register_b(registry: &mut MarkerRegistry) -> Result<(), String> {
    registry.declare::<Beta>();
    Ok(())
}

fn register_two(registry: &mut MarkerRegistry) -> Result<(), String> {
    registry.declare::<TwoNamed>();
    Ok(())
}

fn register_mixed(registry: &mut MarkerRegistry) -> Result<(), String> {
    registry
        .declare::<Alpha>()
        .declare::<PanickingConstructor>()
        .declare_factory("FailingFactory", Some(failing_factory as ProviderFactory))
        .declare_factory("NullProvider", None)
        .declare::<PanicsMidway>()
        .declare::<Beta>();
    Ok(())
}

fn register_empty(_: &mut MarkerRegistry) -> Result<(), String> {
    Ok(())
}

pub static DECL_A: ModuleDeclaration = declaration(register_a);
pub static DECL_B: ModuleDeclaration = declaration(register_b);
pub static DECL_TWO: ModuleDeclaration = declaration(register_two);
pub static DECL_MIXED: ModuleDeclaration = declaration(register_mixed);
pub static DECL_EMPTY: ModuleDeclaration = declaration(register_empty);

pub fn loader() -> StaticLoader {
    let mut loader = StaticLoader::new();
    loader
        .register(MODULE_A, &DECL_A)
        .register(MODULE_B, &DECL_B)
        .register(MODULE_TWO, &DECL_TWO)
        .register(MODULE_MIXED, &DECL_MIXED)
        .register(MODULE_EMPTY, &DECL_EMPTY)
        .register(MODULE_DEMO, &loadr_demo::LOADR_MODULE_DECLARATION);
    loader
}
