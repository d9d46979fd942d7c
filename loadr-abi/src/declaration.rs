use crate::marker::MarkerRegistry;

/// Bumped whenever [`ModuleDeclaration`] or the types reachable from it change shape.
pub const ABI_VERSION: u32 = 2;

/// Compiler that built this copy of the crate (`rustc --version`).
pub const RUSTC_VERSION: &str = env!("LOADR_RUSTC_VERSION");

/// Name of the static every module exports.
pub const DECLARATION_SYMBOL: &[u8] = b"LOADR_MODULE_DECLARATION\0";

/// Entry point exported by a module under [`DECLARATION_SYMBOL`].
///
/// `abi_version` is the first field of a `repr(C)` struct so a host can reject
/// an incompatible module before touching anything else.
///
/// `register` reports a panic raised while declaring markers as `Err` with the
/// panic message; it never unwinds into the host.
#[repr(C)]
pub struct ModuleDeclaration {
    pub abi_version: u32,
    pub rustc_version: &'static str,
    pub register: fn(&mut MarkerRegistry) -> Result<(), String>,
}

/// Exports `LOADR_MODULE_DECLARATION` declaring one marker per listed provider type.
///
/// Every type must implement [`Setup`](crate::Setup) and [`Default`]; anything
/// else fails to compile.
#[macro_export]
macro_rules! declare_module {
    ($($provider:ty),* $(,)?) => {
        #[doc(hidden)]
        #[unsafe(no_mangle)]
        pub static LOADR_MODULE_DECLARATION: $crate::ModuleDeclaration = $crate::ModuleDeclaration {
            abi_version: $crate::ABI_VERSION,
            rustc_version: $crate::RUSTC_VERSION,
            register: {
                #[allow(unused_variables)]
                fn register(
                    registry: &mut $crate::MarkerRegistry,
                ) -> ::core::result::Result<(), ::std::string::String> {
                    $crate::contracts::catch_panic(|| {
                        $( registry.declare::<$provider>(); )*
                    })
                }
                register
            },
        };
    };
}
