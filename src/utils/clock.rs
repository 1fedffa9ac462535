use chrono::{Local, NaiveDate};

/// Source of "today" for date-relative rules.
pub trait Clock: Send + Sync {
    /// The current calendar date on the local clock.
    fn today(&self) -> NaiveDate;
}

/// Reads the local system clock on every call.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// Always reports the same date.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}
