//! Integration tests for the SPQ server.
//!
//! The tests live under `tests/`; this crate exports nothing.
