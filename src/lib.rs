//! Terminal Xiangqi (workspace facade crate).
//!
//! This package exposes `xiangqi::{core,term,input,types}` while the
//! implementation lives in dedicated crates under `crates/`, plus the
//! environment-driven [`config`] used by the binary.

pub mod config;

pub use xiangqi_core as core;
pub use xiangqi_input as input;
pub use xiangqi_term as term;
pub use xiangqi_types as types;
