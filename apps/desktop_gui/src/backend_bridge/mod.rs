//! Backend worker surface: command intake from the UI and the bridge runtime.

pub mod commands;
pub mod runtime;
