//! Integration tests entry point for beekeeper
//!
//! This file serves as the main entry point for integration tests,
//! allowing Rust's test framework to discover and run tests in the
//! integration subdirectory.

mod integration;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integration_tests_module_loads() {
        integration::init_test_env();
    }
}
