//! Slot conflict detection against existing bookings.
//!
//! A slot is taken when its start falls inside an active booking's occupied
//! interval `[start, start + duration)`. Only the slot's start instant is
//! tested: a slot whose own visit would run into a later booking is still
//! reported as free.

use chrono::NaiveTime;

use super::slots::{minute_of_day, BusinessHours};

/// The part of an active booking that occupies time on a property's calendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BookedInterval {
    pub start: NaiveTime,
    pub duration_minutes: u32,
}

impl BookedInterval {
    pub fn new(start: NaiveTime, duration_minutes: u32) -> Self {
        Self {
            start,
            duration_minutes,
        }
    }

    /// Whether `instant` lies in `[start, start + duration)`.
    ///
    /// Computed in minutes since midnight so a booking that runs past
    /// midnight does not wrap around to the early morning.
    pub fn contains(&self, instant: NaiveTime) -> bool {
        let start = minute_of_day(self.start);
        let end = start + self.duration_minutes;
        let at = minute_of_day(instant);
        start <= at && at < end
    }
}

/// Whether `slot` collides with any of `bookings`.
pub fn is_slot_taken(slot: NaiveTime, bookings: &[BookedInterval]) -> bool {
    bookings.iter().any(|booking| booking.contains(slot))
}

/// The day's slots that no active booking covers, in order.
pub fn available_slots(hours: &BusinessHours, bookings: &[BookedInterval]) -> Vec<NaiveTime> {
    hours
        .slots()
        .filter(|slot| !is_slot_taken(*slot, bookings))
        .collect()
}
