//! Property-based tests for the Launch Command Builder

use std::path::{Path, PathBuf};

use proptest::prelude::*;
use tsclient_core::escape::escape;
use tsclient_core::launch::{
    BinaryResolver, DisplayProbe, LaunchCommandBuilder, X_GEOMETRIES, ica_depth,
};
use tsclient_core::models::{ConnectionProfile, Protocol};

struct Installed;

impl BinaryResolver for Installed {
    fn resolve(&self, binary: &str) -> Option<PathBuf> {
        Some(PathBuf::from("/usr/bin").join(binary))
    }

    fn exists(&self, _path: &Path) -> bool {
        true
    }
}

struct FreeFrom(u32);

impl DisplayProbe for FreeFrom {
    fn is_free(&self, display: u32) -> bool {
        display >= self.0
    }
}

fn builder(first_free: u32) -> LaunchCommandBuilder<Installed, FreeFrom> {
    LaunchCommandBuilder::with_parts(Installed, FreeFrom(first_free))
}

// ========== Strategies ==========

fn arb_protocol() -> impl Strategy<Value = Protocol> {
    prop::sample::select(Protocol::ALL.to_vec())
}

fn arb_width() -> impl Strategy<Value = i32> {
    prop_oneof![
        prop::sample::select(vec![0, 640, 800, 1024, 1152, 1280, 1400, 1600, 1920]),
        any::<i32>(),
    ]
}

prop_compose! {
    fn arb_profile()(
        protocol in arb_protocol(),
        address in "[a-z]{1,12}(\\.[a-z]{2,6}){0,2}",
        username in "[a-z]{0,8}",
        password in prop_oneof!["[A-Z0-9]{8,16}", "(asswd|rogram |assword )[A-Z0-9]{6,10}"],
        width in arb_width(),
        bpp in prop::sample::select(vec![0, 8, 15, 16, 24, 32]),
        screen_mode in 0..3i32,
    ) -> ConnectionProfile {
        let mut profile = ConnectionProfile::with_address(address);
        profile.protocol = protocol;
        profile.username = username;
        profile.password = password;
        profile.desktop_width = width;
        profile.session_bpp = bpp;
        profile.screen_mode_id = screen_mode;
        profile
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Every protocol builds when its client is installed
    #[test]
    fn build_succeeds_with_client(profile in arb_profile()) {
        let command = builder(1).build(&profile).unwrap();
        prop_assert!(command.executable.starts_with("/usr/bin"));
    }

    /// Passwords never show up in the logged form of a command
    #[test]
    fn log_form_hides_password(profile in arb_profile()) {
        let command = builder(1).build(&profile).unwrap();
        let shown = command.display_for_log();
        prop_assert!(!shown.contains(&profile.password), "password visible in {}", shown);
    }

    /// The server address is the last argument for RDP and VNC
    #[test]
    fn address_is_last(profile in arb_profile()) {
        prop_assume!(matches!(profile.protocol, Protocol::RdpV5 | Protocol::RdpV4 | Protocol::Vnc | Protocol::Xdmcp));
        let command = builder(1).build(&profile).unwrap();
        prop_assert_eq!(command.args.last(), Some(&escape(&profile.full_address)));
    }

    /// `-4` appears exactly for the stored-as-zero RDP variant
    #[test]
    fn rdp_v4_flag(profile in arb_profile()) {
        prop_assume!(profile.protocol.is_rdp());
        let command = builder(1).build(&profile).unwrap();
        let has_flag = command.args.iter().any(|a| a == "-4");
        prop_assert_eq!(has_flag, profile.protocol == Protocol::RdpV5);
    }

    /// X clients get `-geometry` only for the fixed widths
    #[test]
    fn x_geometry_only_for_known_widths(profile in arb_profile()) {
        prop_assume!(matches!(profile.protocol, Protocol::Xdmcp | Protocol::Ica));
        let command = builder(1).build(&profile).unwrap();
        let known = X_GEOMETRIES.iter().any(|&(w, _)| w == profile.desktop_width);
        prop_assert_eq!(command.args.iter().any(|a| a == "-geometry"), known);
    }

    /// wfica depth follows its own numbering
    #[test]
    fn ica_depth_argument(profile in arb_profile()) {
        prop_assume!(profile.protocol == Protocol::Ica);
        let command = builder(1).build(&profile).unwrap();
        let position = command.args.iter().position(|a| a == "-depth");
        match ica_depth(profile.session_bpp) {
            Some(depth) => {
                let index = position.unwrap();
                prop_assert_eq!(command.args[index + 1].as_str(), depth);
            }
            None => prop_assert!(position.is_none()),
        }
    }

    /// Xnest gets the first free display
    #[test]
    fn xnest_display(first_free in 1u32..50) {
        let mut profile = ConnectionProfile::with_address("xdm.example");
        profile.protocol = Protocol::Xdmcp;
        let command = builder(first_free).build(&profile).unwrap();
        prop_assert_eq!(command.args[0].clone(), format!(":{first_free}"));
        prop_assert_eq!(command.args[1].as_str(), "-once");
    }
}
