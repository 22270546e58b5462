//! Visit booking domain logic: slot generation, conflict detection, and the
//! visit status state machine.
//!
//! Everything here is pure; persistence guards live in the `db` crate.

pub mod clock;
pub mod overlap;
pub mod slots;
pub mod status;

pub use overlap::{available_slots, is_slot_taken, BookedInterval};
pub use slots::BusinessHours;
pub use status::VisitStatus;
