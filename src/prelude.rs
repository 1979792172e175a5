//! Convenience re-exports for typical callers.
//!
//! ```
//! use tcc::prelude::*;
//! ```

pub use crate::coordinator::CoordinatorBuilder;
pub use crate::error::{Error, Result};
pub use crate::types::*;
pub use tcc_coordinator::{Coordinator, Options};
pub use tcc_core::Participant;
