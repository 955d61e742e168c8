//! Source of "today" for notification derivation.

use std::sync::Mutex;

use chrono::{Days, Local, NaiveDate};

/// Supplies the calendar day derivation is evaluated against.
pub trait Clock: Send + Sync + std::fmt::Debug + 'static {
    /// The current calendar day.
    fn today(&self) -> NaiveDate;
}

/// Reads the local calendar day from the system clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// A clock pinned to a settable day.
#[derive(Debug)]
pub struct FixedClock {
    day: Mutex<NaiveDate>,
}

impl FixedClock {
    /// Pin the clock to `day`.
    pub fn new(day: NaiveDate) -> Self {
        Self {
            day: Mutex::new(day),
        }
    }

    /// Move the clock to `day`.
    pub fn set(&self, day: NaiveDate) {
        *self.day.lock().unwrap_or_else(|e| e.into_inner()) = day;
    }

    /// Move the clock forward by `days`.
    pub fn advance_days(&self, days: u64) {
        let mut current = self.day.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(next) = current.checked_add_days(Days::new(days)) {
            *current = next;
        }
    }
}

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        *self.day.lock().unwrap_or_else(|e| e.into_inner())
    }
}
