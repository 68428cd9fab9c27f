//! Integration test modules

mod launch_tests;
mod profile_store_tests;
