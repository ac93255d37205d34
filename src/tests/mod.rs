//! Consolidated test modules.
//!
//! End-to-end tests that drive a full sync against a mock catalog server and
//! validate the resulting store on disk.
