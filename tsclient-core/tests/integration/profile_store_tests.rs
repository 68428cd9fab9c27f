//! Profile Store tests against real files

use std::fs;
use std::path::Path;

use tempfile::TempDir;
use tsclient_core::models::{ConnectionProfile, Protocol};
use tsclient_core::mru::{self, MruList};
use tsclient_core::store::{self, ProfileLocation};

/// Encodes `text` the way the Windows client writes profiles: UTF-16LE with a BOM
fn utf16_file(text: &str) -> Vec<u8> {
    let mut bytes = vec![0xFF, 0xFE];
    for unit in text.encode_utf16() {
        bytes.extend_from_slice(&unit.to_le_bytes());
    }
    bytes
}

fn touch(path: &Path) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, "").unwrap();
}

#[test]
fn test_save_and_load_round_trip() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("profiles").join("work.rdp");

    let mut profile = ConnectionProfile::with_address("ts.example.com:3390");
    profile.username = "admin".into();
    profile.password = "p@ss \"word\"".into();
    profile.protocol = Protocol::Ica;
    profile.desktop_width = 1280;
    profile.desktop_height = 1024;
    profile.alternate_shell = "C:\\Program Files\\app.exe".into();
    profile.enable_alternate_shell = true;
    profile.local_codepage = "UTF-8".into();

    store::save(&profile, &path).unwrap();
    let loaded = store::load(&path).unwrap();
    assert_eq!(loaded, profile);

    let text = fs::read_to_string(&path).unwrap();
    assert!(text.starts_with("{\n  \"alternate_shell\": "));
    assert!(text.contains("\"protocol\": 3"));
}

#[cfg(unix)]
#[test]
fn test_saved_file_is_private() {
    use std::os::unix::fs::PermissionsExt;

    let temp = TempDir::new().unwrap();
    let path = temp.path().join("secret.rdp");
    store::save(&ConnectionProfile::with_address("host"), &path).unwrap();

    let mode = fs::metadata(&path).unwrap().permissions().mode();
    assert_eq!(mode & 0o777, 0o600);
}

#[test]
fn test_save_replaces_existing_file() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("last.tsc");
    fs::write(&path, "full address:s:old\n").unwrap();

    store::save(&ConnectionProfile::with_address("new"), &path).unwrap();

    assert_eq!(store::load(&path).unwrap().full_address, "new");
    let leftovers: Vec<_> = fs::read_dir(temp.path()).unwrap().collect();
    assert_eq!(leftovers.len(), 1);
}

#[test]
fn test_win_password_read_but_not_written() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("win.rdp");
    fs::write(&path, "{\n  \"full_address\": \"h\",\n  \"win_password\": \"abc\"\n}\n").unwrap();

    let profile = store::load(&path).unwrap();
    assert_eq!(profile.win_password, "abc");

    store::save(&profile, &path).unwrap();
    let text = fs::read_to_string(&path).unwrap();
    assert!(!text.contains("win_password"));
}

#[test]
fn test_legacy_file() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("legacy.rdp");
    fs::write(
        &path,
        "screen mode id:i:2\r\n\
         desktopwidth:i:1024\r\n\
         desktopheight:i:768\r\n\
         session bpp:i:16\r\n\
         full address:s:myhost\r\n\
         password 51:b:01000000D08C9DDF\r\n\
         protocol file:s:/home/u/.vnc/passwd\r\n\
         protocol:i:1\r\n\
         unknown key:s:ignored\r\n",
    )
    .unwrap();

    let profile = store::load(&path).unwrap();
    assert_eq!(profile.full_address, "myhost");
    assert!(profile.is_fullscreen());
    assert_eq!((profile.desktop_width, profile.desktop_height), (1024, 768));
    assert_eq!(profile.session_bpp, 16);
    assert_eq!(profile.win_password, "01000000D08C9DDF");
    assert_eq!(profile.proto_file, "/home/u/.vnc/passwd");
    assert_eq!(profile.protocol, Protocol::Vnc);
}

#[test]
fn test_utf16_legacy_file() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("windows.rdp");
    fs::write(
        &path,
        utf16_file("full address:s:winhost\r\nsession bpp:i:24\r\nusername:s:Administrator\r\n"),
    )
    .unwrap();

    let profile = store::load(&path).unwrap();
    assert_eq!(profile.full_address, "winhost");
    assert_eq!(profile.session_bpp, 24);
    assert_eq!(profile.username, "Administrator");
}

#[test]
fn test_structured_with_unknown_key_reads_as_legacy() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("future.rdp");
    fs::write(&path, "{\n  \"full_address\": \"h\",\n  \"new_option\": 1\n}\n").unwrap();

    // The fallback sees no legacy lines, so nothing from the object survives.
    let profile = store::load(&path).unwrap();
    assert_eq!(profile, ConnectionProfile::new());
}

#[test]
fn test_old_c_escaped_structured_file() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("old.tsc");
    fs::write(
        &path,
        "{\n  \"full_address\": \"host\",\n  \"description\": \"caf\\303\\251\\vend\"\n}\n",
    )
    .unwrap();

    let profile = store::load(&path).unwrap();
    assert_eq!(profile.full_address, "host");
    assert_eq!(profile.description, "caf\u{e9}\u{0b}end");
}

#[test]
fn test_missing_file() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("absent.tsc");

    let err = store::load(&path).unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(err.path, path);

    assert_eq!(store::load_or_default(&path).unwrap(), ConnectionProfile::new());
}

#[test]
fn test_load_directory_is_error() {
    let temp = TempDir::new().unwrap();
    let err = store::load_or_default(temp.path()).unwrap_err();
    assert!(!err.is_not_found());
}

#[test]
fn test_enumerate_profiles() {
    let temp = TempDir::new().unwrap();
    touch(&temp.path().join("a.rdp"));
    touch(&temp.path().join("b.RDP"));
    touch(&temp.path().join("notes.txt"));
    touch(&temp.path().join("team").join("c.rdp"));
    touch(&temp.path().join("team").join("deep").join("d.rdp"));

    let mut names = store::enumerate_profiles(temp.path());
    names.sort();
    assert_eq!(names, vec!["a.rdp", "team/c.rdp", "team/deep/d.rdp"]);

    let locations = store::enumerate_profile_locations(temp.path());
    assert_eq!(locations.len(), 3);
    assert_eq!(locations["a.rdp"], ProfileLocation::Root);
    assert_eq!(locations["c.rdp"], ProfileLocation::Subdir("team".into()));
    assert_eq!(
        locations["d.rdp"],
        ProfileLocation::Subdir("team/deep".into())
    );
}

#[test]
fn test_enumerate_missing_root() {
    let temp = TempDir::new().unwrap();
    assert!(store::enumerate_profiles(&temp.path().join("nope")).is_empty());
}

#[test]
fn test_mru_file_updates() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("mru.tsc");
    fs::write(&path, "old1\nold2\n").unwrap();

    mru::add_server(&path, "new").unwrap();
    mru::add_server(&path, "old2").unwrap();

    assert_eq!(
        fs::read_to_string(&path).unwrap(),
        "[\n  \"old2\",\n  \"new\",\n  \"old1\"\n]\n"
    );
    assert_eq!(MruList::load(&path).unwrap().len(), 3);
}

#[test]
fn test_mru_empty_server_leaves_file_alone() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("mru.tsc");
    fs::write(&path, "").unwrap();

    let list = mru::add_server(&path, "").unwrap();
    assert!(list.is_empty());
    assert_eq!(fs::read_to_string(&path).unwrap(), "");
}
