//! Field table shared by both profile file formats.
//!
//! Each entry maps a structured-format key (and, where one exists, the legacy
//! line key) to typed accessors on [`ConnectionProfile`]. Table order is the
//! order fields are written in.

use std::collections::HashMap;
use std::sync::OnceLock;

use crate::models::{ConnectionProfile, Protocol};

/// Typed accessor pair for one profile field
#[derive(Clone, Copy)]
pub enum FieldAccess {
    /// String field
    Text {
        /// Reads the value
        get: fn(&ConnectionProfile) -> &str,
        /// Replaces the value
        set: fn(&mut ConnectionProfile, String),
    },
    /// Integer or flag field
    Int {
        /// Reads the value
        get: fn(&ConnectionProfile) -> i32,
        /// Replaces the value
        set: fn(&mut ConnectionProfile, i32),
    },
}

/// One persisted profile field
pub struct FieldSpec {
    /// Key in the structured format
    pub name: &'static str,
    /// Key in the legacy line format, if the field existed there
    pub legacy_key: Option<&'static str>,
    /// Accessors
    pub access: FieldAccess,
    /// Whether the structured writer emits this field
    pub saved: bool,
}

macro_rules! text {
    ($name:literal, $legacy:expr, $field:ident) => {
        text!($name, $legacy, $field, true)
    };
    ($name:literal, $legacy:expr, $field:ident, $saved:expr) => {
        FieldSpec {
            name: $name,
            legacy_key: $legacy,
            access: FieldAccess::Text {
                get: |p| p.$field.as_str(),
                set: |p, v| p.$field = v,
            },
            saved: $saved,
        }
    };
}

macro_rules! int {
    ($name:literal, $legacy:expr, $field:ident) => {
        FieldSpec {
            name: $name,
            legacy_key: $legacy,
            access: FieldAccess::Int {
                get: |p| p.$field,
                set: |p, v| p.$field = v,
            },
            saved: true,
        }
    };
}

macro_rules! flag {
    ($name:literal, $legacy:expr, $field:ident) => {
        FieldSpec {
            name: $name,
            legacy_key: $legacy,
            access: FieldAccess::Int {
                get: |p| i32::from(p.$field),
                set: |p, v| p.$field = v == 1,
            },
            saved: true,
        }
    };
}

/// Every profile field in write order
pub static FIELDS: &[FieldSpec] = &[
    text!("alternate_shell", Some("alternate shell"), alternate_shell),
    text!("client_hostname", Some("client hostname"), client_hostname),
    text!("description", Some("description"), description),
    text!("domain", Some("domain"), domain),
    text!("full_address", Some("full address"), full_address),
    text!("keyboard_language", Some("keyboard language"), keyboard_language),
    text!("password", Some("password"), password),
    text!("win_password", Some("password 51"), win_password, false),
    text!("progman_group", Some("progman group"), progman_group),
    text!("proto_file", Some("protocol file"), proto_file),
    text!(
        "shell_working_directory",
        Some("shell working directory"),
        shell_working_directory
    ),
    text!("username", Some("username"), username),
    text!("winposstr", Some("winposstr"), winposstr),
    flag!("attach_to_console", Some("attach to console"), attach_to_console),
    int!("audiomode", Some("audiomode"), audio_mode),
    int!("auto_connect", Some("auto connect"), auto_connect),
    flag!(
        "bitmapcachepersistenable",
        Some("bitmapcachepersistenable"),
        bitmap_cache_persist_enable
    ),
    int!("compression", Some("compression"), compression),
    int!("desktop_size_id", Some("desktop size id"), desktop_size_id),
    int!("desktopheight", Some("desktopheight"), desktop_height),
    int!("desktopwidth", Some("desktopwidth"), desktop_width),
    flag!(
        "disable_full_window_drag",
        Some("disable full window drag"),
        disable_full_window_drag
    ),
    flag!("disable_menu_anims", Some("disable menu anims"), disable_menu_anims),
    flag!("disable_themes", Some("disable themes"), disable_themes),
    flag!("disable_wallpaper", Some("disable wallpaper"), disable_wallpaper),
    int!(
        "displayconnectionbar",
        Some("displayconnectionbar"),
        display_connection_bar
    ),
    flag!(
        "enable_alternate_shell",
        Some("enable alternate shell"),
        enable_alternate_shell
    ),
    flag!("enable_wm_keys", Some("enable wm keys"), enable_wm_keys),
    flag!(
        "hide_wm_decorations",
        Some("hide wm decorations"),
        hide_wm_decorations
    ),
    int!("keyboardhook", Some("keyboardhook"), keyboard_hook),
    flag!("no_motion_events", Some("no motion events"), no_motion_events),
    FieldSpec {
        name: "protocol",
        legacy_key: Some("protocol"),
        access: FieldAccess::Int {
            get: |p| p.protocol.code(),
            set: |p, v| p.protocol = Protocol::from_code(v),
        },
        saved: true,
    },
    int!("redirectcomports", Some("redirectcomports"), redirect_com_ports),
    int!("redirectdrives", Some("redirectdrives"), redirect_drives),
    int!("redirectprinters", Some("redirectprinters"), redirect_printers),
    int!(
        "redirectsmartcards",
        Some("redirectsmartcards"),
        redirect_smart_cards
    ),
    int!("screen_mode_id", Some("screen mode id"), screen_mode_id),
    int!("session_bpp", Some("session bpp"), session_bpp),
    flag!("disable_encryption", None, disable_encryption),
    flag!("disable_client_encryption", None, disable_client_encryption),
    flag!("force_bitmap_updates", None, force_bitmap_updates),
    flag!("use_backing_store", None, use_backing_store),
    flag!("disable_remote_ctrl", None, disable_remote_ctrl),
    flag!("sync_numlock", None, sync_numlock),
    text!("tls_version", None, tls_version),
    text!("local_codepage", None, local_codepage),
];

struct FieldIndex {
    by_name: HashMap<&'static str, &'static FieldSpec>,
    by_legacy_key: HashMap<&'static str, &'static FieldSpec>,
}

fn index() -> &'static FieldIndex {
    static INDEX: OnceLock<FieldIndex> = OnceLock::new();
    INDEX.get_or_init(|| FieldIndex {
        by_name: FIELDS.iter().map(|f| (f.name, f)).collect(),
        by_legacy_key: FIELDS
            .iter()
            .filter_map(|f| f.legacy_key.map(|key| (key, f)))
            .collect(),
    })
}

/// Looks up a field by its structured-format key
#[must_use]
pub fn by_name(name: &str) -> Option<&'static FieldSpec> {
    index().by_name.get(name).copied()
}

/// Looks up a field by its legacy line key (case-sensitive)
#[must_use]
pub fn by_legacy_key(key: &str) -> Option<&'static FieldSpec> {
    index().by_legacy_key.get(key).copied()
}
