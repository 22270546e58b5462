//! Bookable start times for a business day.
//!
//! [`BusinessHours::slots`] yields `open, open + g, open + 2g, ...` for every
//! start strictly before `close`, where `g` is the slot granularity. The
//! iterator is lazy and finite; calling `slots()` again restarts it.

use chrono::{NaiveTime, Timelike};
use serde::Serialize;

use crate::error::CoreError;

/// Default opening time (09:00).
pub const DEFAULT_OPEN_MINUTE: u32 = 9 * 60;

/// Default closing time (17:00). No slot may start at or after it.
pub const DEFAULT_CLOSE_MINUTE: u32 = 17 * 60;

/// Default slot granularity in minutes.
pub const DEFAULT_SLOT_MINUTES: u32 = 30;

const MINUTES_PER_DAY: u32 = 24 * 60;

/// Opening hours and granularity used to generate visit slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BusinessHours {
    open: NaiveTime,
    close: NaiveTime,
    slot_minutes: u32,
}

impl Default for BusinessHours {
    fn default() -> Self {
        Self {
            open: time_from_minutes(DEFAULT_OPEN_MINUTE),
            close: time_from_minutes(DEFAULT_CLOSE_MINUTE),
            slot_minutes: DEFAULT_SLOT_MINUTES,
        }
    }
}

impl BusinessHours {
    /// Build business hours, rejecting an empty day or a zero granularity.
    pub fn new(open: NaiveTime, close: NaiveTime, slot_minutes: u32) -> Result<Self, CoreError> {
        if open >= close {
            return Err(CoreError::Validation(format!(
                "Business hours must open before they close (open {open}, close {close})"
            )));
        }
        if slot_minutes == 0 || slot_minutes > MINUTES_PER_DAY {
            return Err(CoreError::Validation(format!(
                "Slot granularity must be between 1 and {MINUTES_PER_DAY} minutes, got {slot_minutes}"
            )));
        }
        Ok(Self {
            open: truncate_to_minute(open),
            close: truncate_to_minute(close),
            slot_minutes,
        })
    }

    pub fn open(&self) -> NaiveTime {
        self.open
    }

    pub fn close(&self) -> NaiveTime {
        self.close
    }

    pub fn slot_minutes(&self) -> u32 {
        self.slot_minutes
    }

    /// Lazily iterate the candidate start times of a day.
    pub fn slots(&self) -> Slots {
        Slots {
            next: minute_of_day(self.open),
            close: minute_of_day(self.close),
            step: self.slot_minutes,
        }
    }

    /// Whether a visit may start at `time`: inside `[open, close)` and on a
    /// whole minute.
    pub fn admits(&self, time: NaiveTime) -> bool {
        time.second() == 0 && time.nanosecond() == 0 && time >= self.open && time < self.close
    }
}

/// Iterator over the start times produced by [`BusinessHours::slots`].
#[derive(Debug, Clone)]
pub struct Slots {
    next: u32,
    close: u32,
    step: u32,
}

impl Iterator for Slots {
    type Item = NaiveTime;

    fn next(&mut self) -> Option<NaiveTime> {
        if self.next >= self.close {
            return None;
        }
        let current = self.next;
        self.next += self.step;
        Some(time_from_minutes(current))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = if self.next >= self.close {
            0
        } else {
            ((self.close - self.next).div_ceil(self.step)) as usize
        };
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Slots {}

/// Minutes elapsed since midnight, ignoring seconds.
pub fn minute_of_day(time: NaiveTime) -> u32 {
    time.hour() * 60 + time.minute()
}

fn time_from_minutes(minutes: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(minutes / 60, minutes % 60, 0).unwrap_or(NaiveTime::MIN)
}

fn truncate_to_minute(time: NaiveTime) -> NaiveTime {
    time_from_minutes(minute_of_day(time))
}
