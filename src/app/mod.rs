//! Preview orchestration: state, the input reader and input handling.

pub mod event;
pub mod handler;
pub mod state;
