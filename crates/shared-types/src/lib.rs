//! # Shared Types Crate
//!
//! Identifiers and plain data records exchanged between the User, Social,
//! Activity and Chat modules.
//!
//! ## Design Principles
//!
//! - **Values only**: records are copies, never handles into another
//!   module's storage.
//! - **Identifiers, not objects**: a record that refers to users carries
//!   `UserId`s; consumers resolve them through the query bridge.
//! - **One identity accessor**: every record implements [`Identified`].

pub mod correlation;
pub mod entities;
pub mod errors;
pub mod identity;
pub mod modules;

pub use correlation::RequestId;
pub use entities::*;
pub use errors::*;
pub use identity::{distinct_ids, exclude_by_id, Identified};
pub use modules::ModuleId;
