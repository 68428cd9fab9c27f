//! Launch tests with stub clients on a private `PATH`

use std::fs;
use std::path::Path;

use tempfile::TempDir;
use tsclient_core::config::TsClientHome;
use tsclient_core::error::{LaunchError, TsClientError};
use tsclient_core::launch::{
    self, DisplayProbe, LaunchCommandBuilder, ProcessRunner, SystemResolver, SystemRunner,
    X11DisplayProbe,
};
use tsclient_core::models::{ConnectionProfile, Protocol};
use tsclient_core::mru::MruList;

/// Writes an executable shell script named `name` into `dir`
#[cfg(unix)]
fn write_stub(dir: &Path, name: &str, body: &str) {
    use std::os::unix::fs::PermissionsExt;

    let path = dir.join(name);
    fs::write(&path, format!("#!/bin/sh\n{body}\n")).unwrap();
    fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
}

/// Probe that reports every display as taken
struct AllBusy;

impl DisplayProbe for AllBusy {
    fn is_free(&self, _display: u32) -> bool {
        false
    }
}

fn lock_probe(tmp: &Path) -> X11DisplayProbe {
    X11DisplayProbe::new()
        .with_tmp_dir(tmp)
        .with_tcp_check(false)
        .with_uid(None)
}

fn profile(protocol: Protocol) -> ConnectionProfile {
    let mut profile = ConnectionProfile::with_address("remote.example");
    profile.protocol = protocol;
    profile
}

#[cfg(unix)]
#[test]
fn test_vnc_uses_available_viewer() {
    let bin = TempDir::new().unwrap();
    write_stub(bin.path(), "xtightvncviewer", "exit 0");
    let tmp = TempDir::new().unwrap();

    let builder = LaunchCommandBuilder::with_parts(
        SystemResolver::with_search_path(bin.path().as_os_str()),
        lock_probe(tmp.path()),
    );
    let command = builder.build(&profile(Protocol::Vnc)).unwrap();

    assert_eq!(command.program, "xtightvncviewer");
    assert_eq!(command.executable, bin.path().join("xtightvncviewer"));
}

#[cfg(unix)]
#[test]
fn test_non_executable_file_is_not_a_client() {
    let bin = TempDir::new().unwrap();
    fs::write(bin.path().join("rdesktop"), "#!/bin/sh\n").unwrap();
    let tmp = TempDir::new().unwrap();

    let builder = LaunchCommandBuilder::with_parts(
        SystemResolver::with_search_path(bin.path().as_os_str()),
        lock_probe(tmp.path()),
    );
    let err = builder.build(&profile(Protocol::RdpV5)).unwrap_err();
    assert!(matches!(
        err,
        LaunchError::BinaryNotFound {
            protocol: Protocol::RdpV5
        }
    ));
    assert!(err.to_string().starts_with("rdesktop was not found"));
}

#[cfg(unix)]
#[test]
fn test_vnc_password_file_only_when_present() {
    let bin = TempDir::new().unwrap();
    write_stub(bin.path(), "vncviewer", "exit 0");
    let tmp = TempDir::new().unwrap();
    let builder = LaunchCommandBuilder::with_parts(
        SystemResolver::with_search_path(bin.path().as_os_str()),
        lock_probe(tmp.path()),
    );

    let mut vnc = profile(Protocol::Vnc);
    vnc.proto_file = tmp.path().join("passwd").display().to_string();
    let command = builder.build(&vnc).unwrap();
    assert!(!command.args.iter().any(|a| a == "-passwd"));

    fs::write(tmp.path().join("passwd"), b"\x01\x02").unwrap();
    let command = builder.build(&vnc).unwrap();
    let index = command.args.iter().position(|a| a == "-passwd").unwrap();
    assert_eq!(command.args[index + 1], vnc.proto_file);
}

#[cfg(unix)]
#[test]
fn test_xdmcp_skips_locked_displays() {
    let bin = TempDir::new().unwrap();
    write_stub(bin.path(), "Xnest", "exit 0");
    let tmp = TempDir::new().unwrap();

    // :1 is held by this test process, :2 has a lock that is not a file,
    // :3 has a stale lock from a process that no longer exists.
    fs::write(
        tmp.path().join(".X1-lock"),
        format!("{:>10}\n", std::process::id()),
    )
    .unwrap();
    fs::create_dir(tmp.path().join(".X2-lock")).unwrap();
    fs::write(tmp.path().join(".X3-lock"), "4294967\n").unwrap();

    let builder = LaunchCommandBuilder::with_parts(
        SystemResolver::with_search_path(bin.path().as_os_str()),
        lock_probe(tmp.path()),
    );
    let command = builder.build(&profile(Protocol::Xdmcp)).unwrap();

    assert_eq!(command.program, "Xnest");
    assert_eq!(command.args[0], ":3");
    assert!(tmp.path().join(".X3-lock").exists());
}

#[cfg(unix)]
#[test]
fn test_xdmcp_without_free_display() {
    let bin = TempDir::new().unwrap();
    write_stub(bin.path(), "Xnest", "exit 0");

    let builder = LaunchCommandBuilder::with_parts(
        SystemResolver::with_search_path(bin.path().as_os_str()),
        AllBusy,
    );
    let err = builder.build(&profile(Protocol::Xdmcp)).unwrap_err();
    assert!(matches!(err, LaunchError::NoFreeDisplay));
}

#[test]
fn test_missing_address_checked_first() {
    let builder = LaunchCommandBuilder::with_parts(SystemResolver::with_search_path(""), AllBusy);
    let err = builder.build(&ConnectionProfile::new()).unwrap_err();
    assert!(matches!(err, LaunchError::MissingAddress));
}

#[cfg(unix)]
#[test]
fn test_spawn_detached_returns_pid() {
    let bin = TempDir::new().unwrap();
    write_stub(bin.path(), "rdesktop", "exit 0");
    let tmp = TempDir::new().unwrap();
    let builder = LaunchCommandBuilder::with_parts(
        SystemResolver::with_search_path(bin.path().as_os_str()),
        lock_probe(tmp.path()),
    );

    let command = builder.build(&profile(Protocol::RdpV4)).unwrap();
    let pid = SystemRunner::new().spawn_detached(&command).unwrap();
    assert!(pid > 0);
}

#[cfg(unix)]
#[test]
fn test_connect_flow_with_stub_client() {
    let bin = TempDir::new().unwrap();
    let args_file = bin.path().join("args.txt");
    write_stub(
        bin.path(),
        "rdesktop",
        &format!("printf '%s\\n' \"$@\" > '{}'", args_file.display()),
    );
    let home_dir = TempDir::new().unwrap();
    let home = TsClientHome::new(home_dir.path());
    home.ensure().unwrap();

    let builder = LaunchCommandBuilder::with_parts(
        SystemResolver::with_search_path(bin.path().as_os_str()),
        lock_probe(home_dir.path()),
    );
    let mut rdp = profile(Protocol::RdpV5);
    rdp.username = "alice".into();

    launch::connect(&home, &rdp, &SystemRunner::new(), &builder).unwrap();

    let args = fs::read_to_string(&args_file).unwrap();
    let args: Vec<&str> = args.lines().collect();
    assert_eq!(args[0], "-Tremote.example - Terminal Server Client");
    assert_eq!(args[1], "-ualice");
    assert_eq!(args.last(), Some(&"remote.example"));

    assert_eq!(
        MruList::load(&home.mru_file()).unwrap().entries(),
        ["remote.example"]
    );
    assert_eq!(tsclient_core::store::load(&home.last_profile()).unwrap(), rdp);
}

#[cfg(unix)]
#[test]
fn test_connect_flow_reports_client_error() {
    let bin = TempDir::new().unwrap();
    write_stub(
        bin.path(),
        "rdesktop",
        "echo 'ERROR: remote.example: unable to connect' >&2\nexit 1",
    );
    let home_dir = TempDir::new().unwrap();
    let home = TsClientHome::new(home_dir.path());
    home.ensure().unwrap();

    let builder = LaunchCommandBuilder::with_parts(
        SystemResolver::with_search_path(bin.path().as_os_str()),
        lock_probe(home_dir.path()),
    );
    let err = launch::connect(&home, &profile(Protocol::RdpV5), &SystemRunner::new(), &builder)
        .unwrap_err();

    match err {
        TsClientError::Launch(LaunchError::LaunchFailure(stderr)) => {
            assert_eq!(stderr, "ERROR: remote.example: unable to connect\n");
        }
        other => panic!("unexpected error: {other}"),
    }
    assert!(MruList::load(&home.mru_file()).unwrap().is_empty());
}

#[cfg(unix)]
#[test]
fn test_connect_flow_silent_nonzero_exit_is_success() {
    let bin = TempDir::new().unwrap();
    write_stub(bin.path(), "rdesktop", "exit 62");
    let home_dir = TempDir::new().unwrap();
    let home = TsClientHome::new(home_dir.path());

    let builder = LaunchCommandBuilder::with_parts(
        SystemResolver::with_search_path(bin.path().as_os_str()),
        lock_probe(home_dir.path()),
    );
    let output =
        launch::connect(&home, &profile(Protocol::RdpV5), &SystemRunner::new(), &builder).unwrap();
    assert_eq!(output.status, Some(62));
}
