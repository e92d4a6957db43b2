//! # Social-Activity Test Suite
//!
//! Cross-module scenarios that run the real modules over one event bus.
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! ├── support.rs          # Bus + bridge fixtures, scripted responders, log capture
//! └── integration/
//!     ├── bridge.rs       # Round trip, timeout, no-leak, at-most-once
//!     └── modules.rs      # Users, Social, Activity and Chat wired together
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p sa-tests
//! cargo test -p sa-tests integration::bridge::
//! ```

pub mod integration;
pub mod support;
