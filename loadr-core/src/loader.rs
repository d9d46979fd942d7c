use std::collections::BTreeMap;

use loadr_abi::{ABI_VERSION, DECLARATION_SYMBOL, ModuleDeclaration};
use tracing::debug;

use crate::error::ModuleLoadError;
use crate::module::{LoadedModule, ModulePath};

pub trait ModuleLoader {
    fn load(&self, path: &ModulePath) -> Result<LoadedModule, ModuleLoadError>;
}

impl<L: ModuleLoader + ?Sized> ModuleLoader for &L {
    fn load(&self, path: &ModulePath) -> Result<LoadedModule, ModuleLoadError> {
        (**self).load(path)
    }
}

/// Loads modules from shared libraries on disk.
#[derive(Debug, Default, Clone, Copy)]
pub struct DylibLoader;

impl ModuleLoader for DylibLoader {
    fn load(&self, path: &ModulePath) -> Result<LoadedModule, ModuleLoadError> {
        // Resolve up front: a bare file name would otherwise go through the
        // dynamic linker's search path instead of the filesystem.
        let resolved =
            std::fs::canonicalize(path.as_path()).map_err(|source| ModuleLoadError::Io {
                path: path.as_path().to_path_buf(),
                source,
            })?;
        debug!(path = %path, resolved = %resolved.display(), "loading module");

        // SAFETY: loading runs the library's initialisers. Modules are code the
        // operator chose to run; the host cannot constrain what they do.
        let library = unsafe { libloading::Library::new(&resolved) }.map_err(|source| {
            ModuleLoadError::Library {
                path: path.as_path().to_path_buf(),
                source,
            }
        })?;

        // SAFETY: the symbol is a static of type `ModuleDeclaration`, so its
        // address is the declaration itself. Nothing is read yet.
        let declaration: *const ModuleDeclaration = unsafe {
            library
                .get::<*const ModuleDeclaration>(DECLARATION_SYMBOL)
                .map(|symbol| *symbol)
        }
        .map_err(|source| ModuleLoadError::MissingDeclaration {
            path: path.as_path().to_path_buf(),
            source,
        })?;

        // SAFETY: `abi_version` is the first field of a `repr(C)` struct in every
        // ABI version, so reading it is valid even for a foreign layout.
        let abi_version = unsafe { std::ptr::addr_of!((*declaration).abi_version).read() };
        if abi_version != ABI_VERSION {
            return Err(ModuleLoadError::IncompatibleAbi {
                path: path.as_path().to_path_buf(),
                found: abi_version,
                expected: ABI_VERSION,
            });
        }

        // Never unloaded: markers, scenario closures and diagnostics may point
        // into the library for the rest of the process.
        let library: &'static libloading::Library = Box::leak(Box::new(library));

        // SAFETY: same ABI version, so the layout matches, and the library is
        // never unloaded.
        let declaration = unsafe { &*declaration };
        LoadedModule::from_declaration(path.clone(), declaration, Some(library))
    }
}

/// Resolves paths against declarations linked into the host binary.
///
/// Lets a host ship modules statically and still run them through the same
/// discovery pipeline as dynamically loaded ones.
#[derive(Default)]
pub struct StaticLoader {
    modules: BTreeMap<ModulePath, &'static ModuleDeclaration>,
}

impl StaticLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(
        &mut self,
        path: impl Into<ModulePath>,
        declaration: &'static ModuleDeclaration,
    ) -> &mut Self {
        self.modules.insert(path.into(), declaration);
        self
    }

    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }
}

impl ModuleLoader for StaticLoader {
    fn load(&self, path: &ModulePath) -> Result<LoadedModule, ModuleLoadError> {
        let declaration =
            self.modules
                .get(path)
                .copied()
                .ok_or_else(|| ModuleLoadError::NotRegistered {
                    path: path.as_path().to_path_buf(),
                })?;
        debug!(path = %path, "loading in-process module");
        LoadedModule::from_declaration(path.clone(), declaration, None)
    }
}

impl std::fmt::Debug for StaticLoader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StaticLoader")
            .field("modules", &self.modules.keys().collect::<Vec<_>>())
            .finish()
    }
}
