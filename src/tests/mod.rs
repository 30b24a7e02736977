//! Internal test modules - whitebox tests with crate access
//!
//! Harness-based acceptance tests that drive the full key-to-frame path
//! against the fixture logs in `tests/fixtures/`.
