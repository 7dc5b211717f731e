use std::fmt;
use std::iter::Sum;
use std::ops::{Add, Sub};

/// a length of time in whole seconds. Dwell times, runtimes and headway
/// margins are all stamped in this resolution.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct Duration {
    seconds: u32,
}

// methods
impl Duration {
    pub fn in_sec(&self) -> u32 {
        self.seconds
    }
}

// static functions
impl Duration {
    pub const ZERO: Duration = Duration { seconds: 0 };

    pub fn from_seconds(seconds: u32) -> Duration {
        Duration { seconds }
    }

    /// sub-second precision is truncated, as the stamped reports are
    /// whole-second.
    pub fn from_seconds_f64(seconds: f64) -> Duration {
        assert!(seconds >= 0.0, "negative duration: {}", seconds);
        Duration {
            seconds: seconds as u32,
        }
    }

    pub fn from_minutes(minutes: u32) -> Duration {
        Duration {
            seconds: minutes * 60,
        }
    }

    /// parses "hh:mm" or "hh:mm:ss".
    pub fn new(string: &str) -> Duration {
        let splitted: Vec<&str> = string.split(':').collect();
        assert!(
            splitted.len() == 2 || splitted.len() == 3,
            "Wrong duration format! string: {}",
            string
        );
        let hours: u32 = splitted[0].parse().expect("Error at hour.");
        let minutes: u32 = splitted[1].parse().expect("Error at minute.");
        let seconds: u32 = if splitted.len() == 2 {
            0
        } else {
            splitted[2].parse().expect("Error at second.")
        };
        assert!(minutes < 60, "Wrong minute format.");
        assert!(seconds < 60, "Wrong seconds format.");
        Duration {
            seconds: hours * 3600 + minutes * 60 + seconds,
        }
    }
}

impl Add for Duration {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Duration {
            seconds: self.seconds + other.seconds,
        }
    }
}

impl Sub for Duration {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        assert!(
            self >= other,
            "Cannot subtract a longer duration ({}) from a shorter duration ({}).",
            other,
            self
        );
        Duration {
            seconds: self.seconds - other.seconds,
        }
    }
}

impl Sum for Duration {
    fn sum<I>(iter: I) -> Self
    where
        I: Iterator<Item = Self>,
    {
        iter.fold(Duration::ZERO, |a, b| a + b)
    }
}

impl fmt::Display for Duration {
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
