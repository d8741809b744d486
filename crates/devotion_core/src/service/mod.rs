//! Use-case services.
//!
//! # Responsibility
//! - Orchestrate store and editor calls into user-level actions.
//! - Keep CLI/FFI layers decoupled from storage details.

pub mod journal;
