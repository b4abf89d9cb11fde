//! Convenient imports for consumers of clock-core
//!
//! Pull in everything commonly needed in one line:
//! ```rust
//! use clock_core::prelude::*;
//! ```

// Main clock API
pub use crate::clock::Clock;
pub use crate::clock::config::{
    ClockConfig, ConfigError, HUNDRED_TICKS_PER_SECOND, TEN_TICKS_PER_SECOND,
};
pub use crate::clock::control::{ControlInput, ControlMap, ControlWord, ResetPolarity};
pub use crate::clock::output::OutputWords;

// Value types
pub use crate::clock::bcd::Bcd;
pub use crate::clock::meridiem::Meridiem;
pub use crate::clock::time_counter::{Carry, TimeOfDay};

// Traits that users might need
pub use crate::clock::tracer::Traceable;

// Macros
pub use crate::{trace_dump, trace_obj};

// Conditional testing utilities
#[cfg(feature = "testing-utils")]
pub use crate::clock::test_utils::*;
