//! Property-based tests for the MRU list

use proptest::prelude::*;
use tsclient_core::mru::{MRU_CAPACITY, MruList};

fn arb_server() -> impl Strategy<Value = String> {
    prop_oneof![
        "[a-z]{1,3}",
        any::<String>(),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// The list stays bounded, unique and most-recent-first
    #[test]
    fn add_keeps_list_bounded_and_unique(servers in prop::collection::vec(arb_server(), 0..40)) {
        let mut list = MruList::new();
        for server in &servers {
            list.add(server);
        }

        prop_assert!(list.len() <= MRU_CAPACITY);
        let mut seen = std::collections::HashSet::new();
        prop_assert!(list.entries().iter().all(|e| seen.insert(e.clone())));
        prop_assert!(list.entries().iter().all(|e| !e.is_empty()));

        if let Some(last) = servers.iter().rev().find(|s| !s.is_empty()) {
            prop_assert_eq!(&list.entries()[0], last);
        }
    }

    /// Saved lists read back unchanged
    #[test]
    fn file_round_trip(servers in prop::collection::vec(arb_server(), 0..15)) {
        let mut list = MruList::new();
        for server in &servers {
            list.add(server);
        }
        prop_assert_eq!(MruList::parse(&list.to_file_string()), list);
    }
}
