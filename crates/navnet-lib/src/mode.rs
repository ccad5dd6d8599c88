use std::fmt;

use serde::Serialize;
use tracing::debug;

/// Travel modes a link can carry and a route can request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum TravelMode {
    Foot,
    Bike,
    Car,
    Bus,
    Rail,
    Ship,
}

impl TravelMode {
    /// Every mode, in declaration order.
    pub const ALL: [TravelMode; 6] = [
        TravelMode::Foot,
        TravelMode::Bike,
        TravelMode::Car,
        TravelMode::Bus,
        TravelMode::Rail,
        TravelMode::Ship,
    ];

    /// Resolve a case-sensitive mode name. Unrecognised names fall back to
    /// [`TravelMode::Foot`].
    pub fn from_name(name: &str) -> Self {
        match name {
            "Foot" => TravelMode::Foot,
            "Bike" => TravelMode::Bike,
            "Car" => TravelMode::Car,
            "Bus" => TravelMode::Bus,
            "Rail" => TravelMode::Rail,
            "Ship" => TravelMode::Ship,
            other => {
                debug!(mode = other, "unrecognised travel mode, treating as Foot");
                TravelMode::Foot
            }
        }
    }

    /// Name used in input tables and command arguments.
    pub fn name(self) -> &'static str {
        match self {
            TravelMode::Foot => "Foot",
            TravelMode::Bike => "Bike",
            TravelMode::Car => "Car",
            TravelMode::Bus => "Bus",
            TravelMode::Rail => "Rail",
            TravelMode::Ship => "Ship",
        }
    }

    /// Whether a route requested in `self` may traverse a link tagged `link`.
    ///
    /// The table is keyed by the requested mode and is neither symmetric nor
    /// transitive: a car may board a bus link, a bus may not use a road.
    pub fn accepts(self, link: TravelMode) -> bool {
        use TravelMode::*;

        match self {
            Rail => matches!(link, Rail),
            Ship => matches!(link, Ship),
            Bus => matches!(link, Bus | Rail | Ship),
            Car => matches!(link, Car | Bus | Ship),
            Bike => matches!(link, Bike | Foot),
            Foot => true,
        }
    }
}

impl fmt::Display for TravelMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::TravelMode::{self, *};

    fn accepted_by(requested: TravelMode) -> Vec<TravelMode> {
        TravelMode::ALL
            .into_iter()
            .filter(|link| requested.accepts(*link))
            .collect()
    }

    #[test]
    fn compatibility_table_matches_rules() {
        assert_eq!(accepted_by(Rail), vec![Rail]);
        assert_eq!(accepted_by(Ship), vec![Ship]);
        assert_eq!(accepted_by(Bus), vec![Bus, Rail, Ship]);
        assert_eq!(accepted_by(Car), vec![Car, Bus, Ship]);
        assert_eq!(accepted_by(Bike), vec![Foot, Bike]);
        assert_eq!(accepted_by(Foot), TravelMode::ALL.to_vec());
    }

    #[test]
    fn compatibility_is_not_symmetric() {
        assert!(Car.accepts(Bus));
        assert!(!Bus.accepts(Car));
        assert!(Bus.accepts(Rail));
        assert!(!Rail.accepts(Bus));
    }

    #[test]
    fn compatibility_is_not_transitive() {
        // Car accepts Bus and Bus accepts Rail, yet Car does not accept Rail.
        assert!(Car.accepts(Bus) && Bus.accepts(Rail));
        assert!(!Car.accepts(Rail));
    }

    #[test]
    fn names_round_trip_and_unknown_defaults_to_foot() {
        for mode in TravelMode::ALL {
            assert_eq!(TravelMode::from_name(mode.name()), mode);
        }
        assert_eq!(TravelMode::from_name("Tram"), Foot);
        assert_eq!(TravelMode::from_name("car"), Foot);
        assert_eq!(TravelMode::from_name(""), Foot);
    }
}
