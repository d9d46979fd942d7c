use std::path::{Path, PathBuf};

use loadr_abi::{ABI_VERSION, Marker, MarkerError, MarkerRegistry, ModuleDeclaration, RUSTC_VERSION};

use crate::error::ModuleLoadError;

/// Path of a compiled module as given on the command line.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ModulePath(PathBuf);

impl ModulePath {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self(path.into())
    }

    pub fn as_path(&self) -> &Path {
        &self.0
    }
}

impl AsRef<Path> for ModulePath {
    fn as_ref(&self) -> &Path {
        &self.0
    }
}

impl From<&str> for ModulePath {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for ModulePath {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

impl From<PathBuf> for ModulePath {
    fn from(value: PathBuf) -> Self {
        Self(value)
    }
}

impl From<&Path> for ModulePath {
    fn from(value: &Path) -> Self {
        Self::new(value)
    }
}

impl std::fmt::Display for ModulePath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.display())
    }
}

/// A module whose declaration has been validated and whose markers are known.
pub struct LoadedModule {
    path: ModulePath,
    markers: Vec<Marker>,
    rejected: Vec<MarkerError>,
    library: Option<&'static libloading::Library>,
}

impl LoadedModule {
    pub(crate) fn from_declaration(
        path: ModulePath,
        declaration: &ModuleDeclaration,
        library: Option<&'static libloading::Library>,
    ) -> Result<Self, ModuleLoadError> {
        check_compatibility(&path, declaration)?;

        let mut registry = MarkerRegistry::default();
        (declaration.register)(&mut registry).map_err(|reason| {
            ModuleLoadError::RegistrationPanicked {
                path: path.as_path().to_path_buf(),
                reason,
            }
        })?;

        let (markers, rejected) = registry.into_parts();
        Ok(Self {
            path,
            markers,
            rejected,
            library,
        })
    }

    pub fn path(&self) -> &ModulePath {
        &self.path
    }

    /// Valid markers, in the order the module declared them.
    pub fn markers(&self) -> &[Marker] {
        &self.markers
    }

    /// Markers the module tried to declare but that failed validation.
    pub fn rejected(&self) -> &[MarkerError] {
        &self.rejected
    }

    pub fn is_dynamic(&self) -> bool {
        self.library.is_some()
    }
}

impl std::fmt::Debug for LoadedModule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoadedModule")
            .field("path", &self.path)
            .field("markers", &self.markers)
            .field("rejected", &self.rejected)
            .field("dynamic", &self.library.is_some())
            .finish()
    }
}

pub(crate) fn check_compatibility(
    path: &ModulePath,
    declaration: &ModuleDeclaration,
) -> Result<(), ModuleLoadError> {
    if declaration.abi_version != ABI_VERSION {
        return Err(ModuleLoadError::IncompatibleAbi {
            path: path.as_path().to_path_buf(),
            found: declaration.abi_version,
            expected: ABI_VERSION,
        });
    }

    if declaration.rustc_version != RUSTC_VERSION {
        return Err(ModuleLoadError::IncompatibleCompiler {
            path: path.as_path().to_path_buf(),
            found: declaration.rustc_version.to_string(),
            expected: RUSTC_VERSION,
        });
    }

    Ok(())
}
