use derive_more::{Display, From};
use std::fmt;

pub mod time;

pub use time::{Duration, ServiceTime};

pub type Meters = f64;
pub type KmPerHour = f64;
pub type Seconds = f64;
pub type TrainCount = u32;

/// position of a station within the line ordering used for forward traversal.
#[derive(Display, From, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct StationIdx(pub u16);

impl StationIdx {
    pub fn idx(&self) -> usize {
        self.0 as usize
    }
}

/// heading of a traveling train relative to the line ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Forward,
    Return,
}

impl Direction {
    pub fn reversed(self) -> Direction {
        match self {
            Direction::Forward => Direction::Return,
            Direction::Return => Direction::Forward,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Direction::Forward => write!(f, "forward"),
            Direction::Return => write!(f, "return"),
        }
    }
}

/// identifier of a simulated train, displayed as e.g. "GAI01": a three-letter
/// prefix taken from the start station followed by a running number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TrainId {
    prefix: [u8; 3],
    number: u8,
}

impl TrainId {
    pub fn new(start_station_name: &str, number: u8) -> TrainId {
        let mut prefix = [b'X'; 3];
        let letters = start_station_name
            .bytes()
            .filter(|b| b.is_ascii_alphanumeric())
            .map(|b| b.to_ascii_uppercase());
        for (slot, byte) in prefix.iter_mut().zip(letters) {
            *slot = byte;
        }
        TrainId { prefix, number }
    }
}

impl fmt::Display for TrainId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{}{}{}{:02}",
            self.prefix[0] as char, self.prefix[1] as char, self.prefix[2] as char, self.number
        )
    }
}
