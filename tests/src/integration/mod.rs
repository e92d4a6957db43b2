//! Cross-module integration scenarios.

mod bridge;
mod modules;
