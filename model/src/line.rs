use crate::base_types::{Direction, KmPerHour, Meters, StationIdx};
use crate::error::Error;
use crate::station::Station;

/// the ordered station sequence of one metro line, defining a single
/// directional traversal. First and last station are the two termini.
///
/// Invariants (checked on construction): at least two stations, strictly
/// increasing cumulative distances, unique station names, positive civil
/// speeds, and absolute max speeds never below the civil speed.
#[derive(Debug, Clone, PartialEq)]
pub struct LineTopology {
    name: String,
    stations: Vec<Station>,
}

/// the stretch of track between two adjacent stations. Derived on demand
/// from the topology, never stored.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub from: StationIdx,
    pub to: StationIdx,
    pub distance: Meters,
    /// tighter of the two endpoint civil speeds.
    pub civil_speed: KmPerHour,
    /// tighter of the endpoint absolute caps, where any is imposed.
    pub max_speed: Option<KmPerHour>,
}

// static functions
impl LineTopology {
    pub fn new(name: String, stations: Vec<Station>) -> Result<LineTopology, Error> {
        if stations.len() < 2 {
            return Err(Error::InvalidTopology(format!(
                "a line needs at least 2 stations, got {}",
                stations.len()
            )));
        }
        for pair in stations.windows(2) {
            if pair[1].distance_from_origin() <= pair[0].distance_from_origin() {
                return Err(Error::InvalidTopology(format!(
                    "distances must be strictly increasing, but {} ({}m) follows {} ({}m)",
                    pair[1].name(),
                    pair[1].distance_from_origin(),
                    pair[0].name(),
                    pair[0].distance_from_origin()
                )));
            }
        }
        for (i, station) in stations.iter().enumerate() {
            if stations[..i].iter().any(|s| s.name() == station.name()) {
                return Err(Error::InvalidTopology(format!(
                    "duplicate station name '{}'",
                    station.name()
                )));
            }
            if station.civil_speed() <= 0.0 {
                return Err(Error::InvalidTopology(format!(
                    "station '{}' has non-positive civil speed {}",
                    station.name(),
                    station.civil_speed()
                )));
            }
            if let Some(max) = station.max_speed() {
                if max < station.civil_speed() {
                    return Err(Error::InvalidTopology(format!(
                        "station '{}' has max speed {} below civil speed {}",
                        station.name(),
                        max,
                        station.civil_speed()
                    )));
                }
            }
        }
        Ok(LineTopology { name, stations })
    }

    /// builds the topology from per-segment distance deltas instead of
    /// cumulative distances; the first station sits at the line origin.
    pub fn from_segment_lengths(
        name: String,
        stations: Vec<(Station, Meters)>,
    ) -> Result<LineTopology, Error> {
        let mut cumulative = 0.0;
        let mut accumulated = Vec::with_capacity(stations.len());
        for (i, (station, delta)) in stations.into_iter().enumerate() {
            if i > 0 {
                if delta <= 0.0 {
                    return Err(Error::InvalidTopology(format!(
                        "segment length before '{}' must be positive, got {}m",
                        station.name(),
                        delta
                    )));
                }
                cumulative += delta;
            }
            accumulated.push(Station::new(
                station.name().to_string(),
                cumulative,
                station.base_dwell(),
                station.civil_speed(),
                station.max_speed(),
            ));
        }
        LineTopology::new(name, accumulated)
    }
}

// methods
impl LineTopology {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn size(&self) -> usize {
        self.stations.len()
    }

    pub fn station(&self, idx: StationIdx) -> &Station {
        &self.stations[idx.idx()]
    }

    pub fn stations_iter(&self) -> impl Iterator<Item = &Station> + '_ {
        self.stations.iter()
    }

    pub fn station_idx_of(&self, name: &str) -> Result<StationIdx, Error> {
        self.stations
            .iter()
            .position(|s| s.name() == name)
            .map(|i| StationIdx(i as u16))
            .ok_or_else(|| Error::UnknownStation(name.to_string()))
    }

    pub fn first_terminus(&self) -> StationIdx {
        StationIdx(0)
    }

    pub fn last_terminus(&self) -> StationIdx {
        StationIdx((self.stations.len() - 1) as u16)
    }

    pub fn is_terminus(&self, idx: StationIdx) -> bool {
        idx == self.first_terminus() || idx == self.last_terminus()
    }

    /// the adjacent station in the given heading; None at the leading
    /// terminus.
    pub fn neighbour(&self, idx: StationIdx, direction: Direction) -> Option<StationIdx> {
        match direction {
            Direction::Forward => {
                if idx == self.last_terminus() {
                    None
                } else {
                    Some(StationIdx(idx.0 + 1))
                }
            }
            Direction::Return => {
                if idx == self.first_terminus() {
                    None
                } else {
                    Some(StationIdx(idx.0 - 1))
                }
            }
        }
    }

    /// the segment between two adjacent stations, in either heading.
    pub fn segment_between(&self, from: StationIdx, to: StationIdx) -> Segment {
        assert!(
            from.0.abs_diff(to.0) == 1,
            "stations {} and {} are not adjacent",
            self.station(from).name(),
            self.station(to).name()
        );
        let a = self.station(from);
        let b = self.station(to);
        let max_speed = match (a.max_speed(), b.max_speed()) {
            (Some(x), Some(y)) => Some(x.min(y)),
            (x, None) => x,
            (None, y) => y,
        };
        Segment {
            from,
            to,
            distance: (b.distance_from_origin() - a.distance_from_origin()).abs(),
            civil_speed: a.civil_speed().min(b.civil_speed()),
            max_speed,
        }
    }

    /// all segments of one forward traversal, in line order.
    pub fn segments_forward(&self) -> impl Iterator<Item = Segment> + '_ {
        (0..self.stations.len() - 1)
            .map(move |i| self.segment_between(StationIdx(i as u16), StationIdx(i as u16 + 1)))
    }
}
