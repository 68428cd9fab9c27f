//! Free X display discovery for nested XDMCP sessions.

use std::net::{Ipv4Addr, SocketAddr, TcpStream};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::tracing::span_names;

/// First display tried; `:0` is assumed to be the local session
pub const FIRST_DISPLAY: u32 = 1;

/// Displays at or above this number are never tried
pub const DISPLAY_LIMIT: u32 = 3000;

/// TCP port of display `:0`
pub const X_TCP_BASE_PORT: u32 = 6000;

/// Default connect timeout for the loopback probe
pub const DEFAULT_PROBE_TIMEOUT: Duration = Duration::from_millis(250);

/// Decides whether an X display number is available
pub trait DisplayProbe {
    /// Returns true if display `:display` can be used
    fn is_free(&self, display: u32) -> bool;
}

/// Returns the first free display in `start..DISPLAY_LIMIT`.
///
/// Returns `None` once the range is exhausted.
pub fn find_free_display(probe: &dyn DisplayProbe, start: u32) -> Option<u32> {
    let _span = tracing::debug_span!(span_names::DISPLAY_PROBE, start).entered();
    let found = (start..DISPLAY_LIMIT).find(|&display| probe.is_free(display));
    if found.is_none() {
        tracing::warn!(start, limit = DISPLAY_LIMIT, "No free X display");
    }
    found
}

/// Probe that inspects the local X server sockets and lock files.
///
/// A display is busy when something accepts (or fails oddly on) its loopback
/// TCP port, when its lock file is not a regular file, or when the lock file
/// names a running process. For a non-root caller, a socket or lock file
/// owned by another user also makes the display busy. Stale lock files are
/// left in place.
#[derive(Debug, Clone)]
pub struct X11DisplayProbe {
    timeout: Duration,
    tmp_dir: PathBuf,
    uid: Option<u32>,
    check_tcp: bool,
}

impl Default for X11DisplayProbe {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_PROBE_TIMEOUT,
            tmp_dir: PathBuf::from("/tmp"),
            uid: current_uid(),
            check_tcp: true,
        }
    }
}

impl X11DisplayProbe {
    /// Creates a probe for the real system
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the TCP connect timeout
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Looks for lock files and sockets under `dir` instead of `/tmp`
    #[must_use]
    pub fn with_tmp_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.tmp_dir = dir.into();
        self
    }

    /// Overrides the uid used for ownership checks
    #[must_use]
    pub const fn with_uid(mut self, uid: Option<u32>) -> Self {
        self.uid = uid;
        self
    }

    /// Enables or disables the loopback TCP check
    #[must_use]
    pub const fn with_tcp_check(mut self, enabled: bool) -> Self {
        self.check_tcp = enabled;
        self
    }

    fn lock_path(&self, display: u32) -> PathBuf {
        self.tmp_dir.join(format!(".X{display}-lock"))
    }

    fn socket_path(&self, display: u32) -> PathBuf {
        self.tmp_dir.join(".X11-unix").join(format!("X{display}"))
    }

    fn tcp_busy(&self, display: u32) -> bool {
        let Ok(port) = u16::try_from(X_TCP_BASE_PORT + display) else {
            return true;
        };
        let addr = SocketAddr::from((Ipv4Addr::LOCALHOST, port));
        match TcpStream::connect_timeout(&addr, self.timeout) {
            Ok(_stream) => true,
            Err(e) => e.kind() != std::io::ErrorKind::ConnectionRefused,
        }
    }

    fn lock_busy(&self, display: u32) -> bool {
        let lock = self.lock_path(display);
        match std::fs::metadata(&lock) {
            Ok(meta) if !meta.is_file() => return true,
            Ok(_) => {}
            Err(_) => return false,
        }

        std::fs::read_to_string(&lock)
            .ok()
            .and_then(|content| parse_lock_pid(&content))
            .is_some_and(process_exists)
    }

    fn owned_by_other_user(&self, display: u32) -> bool {
        let Some(uid) = self.uid.filter(|&uid| uid > 0) else {
            return false;
        };
        [self.socket_path(display), self.lock_path(display)]
            .iter()
            .any(|path| file_uid(path).is_some_and(|owner| owner != uid))
    }
}

impl DisplayProbe for X11DisplayProbe {
    fn is_free(&self, number: u32) -> bool {
        if self.check_tcp && self.tcp_busy(number) {
            tracing::debug!(display = number, "Display port in use");
            return false;
        }
        if self.lock_busy(number) {
            tracing::debug!(display = number, "Display locked by a running server");
            return false;
        }
        if self.owned_by_other_user(number) {
            tracing::debug!(display = number, "Display files owned by another user");
            return false;
        }
        true
    }
}

/// Reads the PID from an X lock file: leading whitespace, then digits
fn parse_lock_pid(content: &str) -> Option<u32> {
    let digits: String = content
        .trim_start()
        .chars()
        .take_while(char::is_ascii_digit)
        .collect();
    digits.parse().ok()
}

fn process_exists(pid: u32) -> bool {
    Path::new("/proc").join(pid.to_string()).exists()
}

#[cfg(unix)]
fn file_uid(path: &Path) -> Option<u32> {
    use std::os::unix::fs::MetadataExt;
    std::fs::metadata(path).ok().map(|m| m.uid())
}

#[cfg(not(unix))]
fn file_uid(_path: &Path) -> Option<u32> {
    None
}

/// Uid of the running process, read from the owner of `/proc/self`
fn current_uid() -> Option<u32> {
    file_uid(Path::new("/proc/self"))
}
