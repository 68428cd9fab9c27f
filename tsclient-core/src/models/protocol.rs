//! Remote access protocol selection.

use serde::Serialize;

/// Protocol a profile connects with.
///
/// The discriminants are the values stored in profile files. `RdpV5` is the
/// stored default (`0`) even though the protocol picker lists RDPv4 first,
/// so the storage code and the picker position differ. See [`Protocol::ui_index`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Protocol {
    /// RDP, version 5 (stored as 0)
    #[default]
    RdpV5,
    /// VNC (stored as 1)
    Vnc,
    /// XDMCP through a nested X server (stored as 2)
    Xdmcp,
    /// Citrix ICA (stored as 3)
    Ica,
    /// RDP, version 4 (stored as 4)
    RdpV4,
}

impl Protocol {
    /// All protocols in picker order
    pub const ALL: [Self; 5] = [Self::RdpV5, Self::RdpV4, Self::Vnc, Self::Xdmcp, Self::Ica];

    /// Decodes a stored protocol value. Unknown values fall back to `RdpV5`.
    #[must_use]
    pub const fn from_code(code: i32) -> Self {
        match code {
            1 => Self::Vnc,
            2 => Self::Xdmcp,
            3 => Self::Ica,
            4 => Self::RdpV4,
            _ => Self::RdpV5,
        }
    }

    /// Returns the value written to profile files
    #[must_use]
    pub const fn code(self) -> i32 {
        match self {
            Self::RdpV5 => 0,
            Self::Vnc => 1,
            Self::Xdmcp => 2,
            Self::Ica => 3,
            Self::RdpV4 => 4,
        }
    }

    /// Position of this protocol in the picker.
    ///
    /// Picker order is RDPv5, RDPv4, VNC, XDMCP, ICA.
    #[must_use]
    pub const fn ui_index(self) -> usize {
        match self {
            Self::RdpV5 => 0,
            Self::RdpV4 => 1,
            Self::Vnc => 2,
            Self::Xdmcp => 3,
            Self::Ica => 4,
        }
    }

    /// Inverse of [`Protocol::ui_index`]; out-of-range positions select `RdpV5`
    #[must_use]
    pub const fn from_ui_index(index: usize) -> Self {
        match index {
            1 => Self::RdpV4,
            2 => Self::Vnc,
            3 => Self::Xdmcp,
            4 => Self::Ica,
            _ => Self::RdpV5,
        }
    }

    /// Returns true for either RDP variant
    #[must_use]
    pub const fn is_rdp(self) -> bool {
        matches!(self, Self::RdpV5 | Self::RdpV4)
    }

    /// Short lowercase identifier
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::RdpV5 => "rdpv5",
            Self::RdpV4 => "rdpv4",
            Self::Vnc => "vnc",
            Self::Xdmcp => "xdmcp",
            Self::Ica => "ica",
        }
    }

    /// Name shown in the protocol picker
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::RdpV5 => "RDPv5",
            Self::RdpV4 => "RDPv4",
            Self::Vnc => "VNC",
            Self::Xdmcp => "XDMCP",
            Self::Ica => "ICA",
        }
    }

    /// Message shown when no client for this protocol is installed
    #[must_use]
    pub const fn missing_client_message(self) -> &'static str {
        match self {
            Self::RdpV5 | Self::RdpV4 => {
                "rdesktop was not found in your path.\nPlease verify your rdesktop installation."
            }
            Self::Vnc => {
                "vncviewer or xvncviewer were\n not found in your path.\nPlease verify your vnc installation."
            }
            Self::Xdmcp => "Xnest was not found in your path.\nPlease verify your Xnest installation.",
            Self::Ica => {
                "wfica was not found in your path.\nPlease verify your ICAClient installation."
            }
        }
    }
}

impl std::fmt::Display for Protocol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}

impl std::str::FromStr for Protocol {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "rdp" | "rdpv5" | "rdp5" => Ok(Self::RdpV5),
            "rdpv4" | "rdp4" => Ok(Self::RdpV4),
            "vnc" => Ok(Self::Vnc),
            "xdmcp" => Ok(Self::Xdmcp),
            "ica" | "citrix" => Ok(Self::Ica),
            other => Err(format!("unknown protocol '{other}'")),
        }
    }
}
