//! # ArmKit UI
//!
//! Toolkit-independent UI models: the numeric input widget and the
//! [`Session`] that owns all interactive state and routes input events to
//! the solver, the viewport and the device link.

pub mod number_input;
pub mod session;

pub use number_input::{parse_number, NumberInput};
pub use session::{ClickOutcome, Field, Session};
