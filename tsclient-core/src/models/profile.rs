//! The connection profile record.

use super::presets::{SCREEN_PRESETS, ScreenPreset, preset_index};
use super::protocol::Protocol;

/// `screen_mode_id` value selecting a windowed session
pub const SCREEN_MODE_WINDOWED: i32 = 1;
/// `screen_mode_id` value selecting a fullscreen session
pub const SCREEN_MODE_FULLSCREEN: i32 = 2;

/// `audio_mode` value playing sound on the local machine
pub const AUDIO_LOCAL: i32 = 0;
/// `audio_mode` value leaving sound on the remote machine
pub const AUDIO_REMOTE: i32 = 1;
/// `audio_mode` value disabling sound
pub const AUDIO_OFF: i32 = 2;

/// One saved remote connection.
///
/// Every string starts empty and every number or flag starts at zero. Flags
/// are persisted as `0`/`1`; only `1` reads back as set.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct ConnectionProfile {
    /// Server address, `host[:port]`
    pub full_address: String,
    /// Free-form description
    pub description: String,

    /// Login name
    pub username: String,
    /// Login password
    pub password: String,
    /// Secondary password read from legacy `password 51` lines; never saved
    pub win_password: String,
    /// Windows domain
    pub domain: String,
    /// Client name announced to the server
    pub client_hostname: String,

    /// Selected protocol
    pub protocol: Protocol,

    /// Desktop width, `0` for the client default
    pub desktop_width: i32,
    /// Desktop height, `0` for the client default
    pub desktop_height: i32,
    /// Window mode, see [`SCREEN_MODE_WINDOWED`] and [`SCREEN_MODE_FULLSCREEN`]
    pub screen_mode_id: i32,
    /// Color depth: 0, 8, 15, 16, 24 or 32
    pub session_bpp: i32,

    /// TLS version, one of [`super::TLS_VERSIONS`]
    pub tls_version: String,
    /// Turn off encryption
    pub disable_encryption: bool,
    /// Turn off client-side encryption
    pub disable_client_encryption: bool,

    /// Sound redirection, see [`AUDIO_LOCAL`], [`AUDIO_REMOTE`] and [`AUDIO_OFF`]
    pub audio_mode: i32,
    /// Keyboard hook mode (persisted only)
    pub keyboard_hook: i32,
    /// Keyboard layout, e.g. `en-us`
    pub keyboard_language: String,
    /// Local code page
    pub local_codepage: String,
    /// Do not allow the server to control the local machine
    pub disable_remote_ctrl: bool,
    /// Synchronise the NumLock state on connect
    pub sync_numlock: bool,

    /// Keep a persistent bitmap cache
    pub bitmap_cache_persist_enable: bool,
    /// Disable full window drag
    pub disable_full_window_drag: bool,
    /// Disable menu animations
    pub disable_menu_anims: bool,
    /// Disable themes
    pub disable_themes: bool,
    /// Disable the desktop wallpaper
    pub disable_wallpaper: bool,
    /// Do not send mouse motion events
    pub no_motion_events: bool,
    /// Pass window manager key bindings to the server
    pub enable_wm_keys: bool,
    /// Hide window manager decorations
    pub hide_wm_decorations: bool,
    /// Attach to the server console
    pub attach_to_console: bool,
    /// Force bitmap updates
    pub force_bitmap_updates: bool,
    /// Use the X backing store
    pub use_backing_store: bool,

    /// Start a program instead of the desktop shell
    pub enable_alternate_shell: bool,
    /// Program to start
    pub alternate_shell: String,
    /// Working directory for the program
    pub shell_working_directory: String,

    /// Compression setting (persisted only)
    pub compression: i32,
    /// Connection bar setting (persisted only)
    pub display_connection_bar: i32,
    /// COM port redirection (persisted only)
    pub redirect_com_ports: i32,
    /// Drive redirection (persisted only)
    pub redirect_drives: i32,
    /// Printer redirection (persisted only)
    pub redirect_printers: i32,
    /// Smart card redirection (persisted only)
    pub redirect_smart_cards: i32,
    /// Program manager group (persisted only)
    pub progman_group: String,
    /// Connect automatically (persisted only)
    pub auto_connect: i32,
    /// Desktop size selector (persisted only)
    pub desktop_size_id: i32,
    /// Auxiliary credentials file for VNC and ICA
    pub proto_file: String,
    /// Window position string (persisted only)
    pub winposstr: String,
}

impl ConnectionProfile {
    /// Creates a profile with every field at its default
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a default profile targeting `address`
    #[must_use]
    pub fn with_address(address: impl Into<String>) -> Self {
        Self {
            full_address: address.into(),
            ..Self::default()
        }
    }

    /// Returns true when the session should take the whole screen
    #[must_use]
    pub fn is_fullscreen(&self) -> bool {
        self.screen_mode_id == SCREEN_MODE_FULLSCREEN
    }

    /// Returns the preset matching the desktop size, if any
    #[must_use]
    pub fn screen_preset(&self) -> Option<&'static ScreenPreset> {
        preset_index(self.desktop_width, self.desktop_height).map(|i| &SCREEN_PRESETS[i])
    }

    /// Returns true when `desktop_width` is zero, meaning "use the default size"
    #[must_use]
    pub fn uses_default_size(&self) -> bool {
        self.desktop_width == 0
    }
}

impl std::fmt::Debug for ConnectionProfile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        fn redact(value: &str) -> &'static str {
            if value.is_empty() { "" } else { "****" }
        }

        f.debug_struct("ConnectionProfile")
            .field("full_address", &self.full_address)
            .field("description", &self.description)
            .field("username", &self.username)
            .field("password", &redact(&self.password))
            .field("win_password", &redact(&self.win_password))
            .field("domain", &self.domain)
            .field("client_hostname", &self.client_hostname)
            .field("protocol", &self.protocol)
            .field("desktop_width", &self.desktop_width)
            .field("desktop_height", &self.desktop_height)
            .field("screen_mode_id", &self.screen_mode_id)
            .field("session_bpp", &self.session_bpp)
            .field("tls_version", &self.tls_version)
            .field("audio_mode", &self.audio_mode)
            .field("enable_alternate_shell", &self.enable_alternate_shell)
            .field("alternate_shell", &self.alternate_shell)
            .field("proto_file", &self.proto_file)
            .finish_non_exhaustive()
    }
}
