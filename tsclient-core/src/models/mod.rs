//! Data model: the connection profile and its lookup tables.

mod presets;
mod profile;
mod protocol;

pub use presets::{SCREEN_PRESETS, ScreenPreset, TLS_VERSIONS, preset_index, tls_version_index};
pub use profile::{
    AUDIO_LOCAL, AUDIO_OFF, AUDIO_REMOTE, ConnectionProfile, SCREEN_MODE_FULLSCREEN,
    SCREEN_MODE_WINDOWED,
};
pub use protocol::Protocol;
