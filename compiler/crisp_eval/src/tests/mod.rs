//! Crate-level tests that exercise more than one module.

mod operators_tests;
