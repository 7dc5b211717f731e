use std::fmt;
use std::ops::{Add, Sub};

use super::Duration;

/// a clock time of the operating day, stored as seconds since midnight.
/// The end-of-service cutoff "24:00" is a valid value; times past midnight
/// keep counting up (a departure stamped 24:03:10 displays as such) so that
/// late turnarounds stay ordered.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct ServiceTime {
    seconds: u32,
}

// methods
impl ServiceTime {
    pub fn in_sec(&self) -> u32 {
        self.seconds
    }
}

// static functions
impl ServiceTime {
    /// parses "hh:mm" or "hh:mm:ss"; hour 24 is allowed for the cutoff.
    pub fn new(string: &str) -> ServiceTime {
        let splitted: Vec<&str> = string.split(':').collect();
        assert!(
            splitted.len() == 2 || splitted.len() == 3,
            "Wrong time format! string: {}",
            string
        );
        let hours: u32 = splitted[0].parse().expect("Error at hour.");
        let minutes: u32 = splitted[1].parse().expect("Error at minute.");
        let seconds: u32 = if splitted.len() == 2 {
            0
        } else {
            splitted[2].parse().expect("Error at second.")
        };
        assert!(hours <= 24, "Wrong hour format.");
        assert!(minutes < 60, "Wrong minute format.");
        assert!(seconds < 60, "Wrong seconds format.");
        ServiceTime {
            seconds: hours * 3600 + minutes * 60 + seconds,
        }
    }
}

impl Add<Duration> for ServiceTime {
    type Output = Self;

    fn add(self, other: Duration) -> Self {
        ServiceTime {
            seconds: self.seconds + other.in_sec(),
        }
    }
}

impl Sub for ServiceTime {
    type Output = Duration;

    fn sub(self, other: Self) -> Duration {
        assert!(
            other <= self,
            "Cannot subtract {} from {}, as it is a later point in time (no negative durations allowed)",
            other,
            self
        );
        Duration::from_seconds(self.seconds - other.seconds)
    }
}

impl fmt::Display for ServiceTime {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{:02}:{:02}:{:02}",
            self.seconds / 3600,
            self.seconds % 3600 / 60,
            self.seconds % 60
        )
    }
}
