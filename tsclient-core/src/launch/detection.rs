//! Client binary discovery.
//!
//! Each protocol is served by an external program found on `PATH`. The
//! [`BinaryResolver`] trait lets tests substitute a fake filesystem.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use crate::models::Protocol;

/// RDP client
pub const RDESKTOP: &str = "rdesktop";

/// VNC viewers in order of preference
pub const VNC_VIEWERS: &[&str] = &["vncviewer", "xvncviewer", "xtightvncviewer", "svncviewer"];

/// Nested X server used for XDMCP sessions
pub const XNEST: &str = "Xnest";

/// Citrix ICA client
pub const WFICA: &str = "wfica";

/// Install location of `wfica` when it is not on `PATH`
pub const WFICA_INSTALL_PATH: &str = "/usr/lib/ICAClient/wfica";

/// Locates programs and checks file existence
pub trait BinaryResolver {
    /// Returns the full path of `binary` if it can be executed
    fn resolve(&self, binary: &str) -> Option<PathBuf>;

    /// Returns true if `path` exists
    fn exists(&self, path: &Path) -> bool;
}

/// A located client program
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedClient {
    /// Program name as the user knows it
    pub name: &'static str,
    /// Full path to the executable
    pub path: PathBuf,
}

/// Finds the client program for `protocol`.
///
/// Returns `None` when nothing suitable is installed.
#[must_use]
pub fn resolve_client(resolver: &dyn BinaryResolver, protocol: Protocol) -> Option<ResolvedClient> {
    let found = |name: &'static str| {
        resolver
            .resolve(name)
            .map(|path| ResolvedClient { name, path })
    };

    match protocol {
        Protocol::RdpV5 | Protocol::RdpV4 => found(RDESKTOP),
        Protocol::Vnc => VNC_VIEWERS.iter().find_map(|&name| found(name)),
        Protocol::Xdmcp => found(XNEST),
        Protocol::Ica => found(WFICA).or_else(|| {
            let path = Path::new(WFICA_INSTALL_PATH);
            resolver.exists(path).then(|| ResolvedClient {
                name: WFICA,
                path: path.to_path_buf(),
            })
        }),
    }
}

/// Resolver backed by the real `PATH` and filesystem
#[derive(Debug, Clone, Default)]
pub struct SystemResolver {
    search_path: Option<OsString>,
}

impl SystemResolver {
    /// Creates a resolver that reads `PATH` at lookup time
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a resolver searching the given `PATH`-style value
    #[must_use]
    pub fn with_search_path(search_path: impl Into<OsString>) -> Self {
        Self {
            search_path: Some(search_path.into()),
        }
    }
}

impl BinaryResolver for SystemResolver {
    fn resolve(&self, binary: &str) -> Option<PathBuf> {
        if binary.contains('/') {
            let path = PathBuf::from(binary);
            return is_executable(&path).then_some(path);
        }

        let search_path = self
            .search_path
            .clone()
            .or_else(|| std::env::var_os("PATH"))?;

        std::env::split_paths(&search_path)
            .filter(|dir| !dir.as_os_str().is_empty())
            .map(|dir| dir.join(binary))
            .find(|candidate| is_executable(candidate))
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;

    path.metadata()
        .is_ok_and(|m| m.is_file() && m.permissions().mode() & 0o111 != 0)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_file()
}
