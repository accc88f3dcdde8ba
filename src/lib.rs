//! SPL-T (workspace facade crate).
//!
//! Re-exports the engine crates under `splt::{core,engine,types}` and hosts the
//! pieces shared by the `splt` binary and the integration tests: run
//! configuration and the plain-text board dump.

pub use splt_core as core;
pub use splt_engine as engine;
pub use splt_types as types;

pub mod config;
pub mod text_view;
