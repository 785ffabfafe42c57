use chrono::{Local, NaiveDate};

use super::competency::Competency;

/// Source of "today" for the future-competency check.
pub trait Clock: Send + Sync {
    fn today(&self) -> NaiveDate;

    /// The competency that is currently open.
    fn current_competency(&self) -> Competency {
        Competency::from_date(self.today())
    }
}

/// Wall clock in the process' local time zone.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// A clock pinned to one date, for tests and demos.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}
