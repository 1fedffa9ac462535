use std::fmt;
use std::str::FromStr;

use crate::entities::PassengerField;

/// Dotted address of a form field, e.g. `passengers.0.email`.
///
/// Ordering follows the form layout: stations first, then passengers by
/// position, then fields in display order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FieldPath {
    DepartureStation,
    ArrivalStation,
    Passengers,
    Passenger { index: usize, field: PassengerField },
}

impl FieldPath {
    pub fn passenger(index: usize, field: PassengerField) -> Self {
        FieldPath::Passenger { index, field }
    }

    /// Index of the passenger this path points into, if any.
    pub fn passenger_index(&self) -> Option<usize> {
        match self {
            FieldPath::Passenger { index, .. } => Some(*index),
            _ => None,
        }
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldPath::DepartureStation => f.write_str("departureStation"),
            FieldPath::ArrivalStation => f.write_str("arrivalStation"),
            FieldPath::Passengers => f.write_str("passengers"),
            FieldPath::Passenger { index, field } => write!(f, "passengers.{}.{}", index, field),
        }
    }
}

impl FromStr for FieldPath {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "departureStation" => return Ok(FieldPath::DepartureStation),
            "arrivalStation" => return Ok(FieldPath::ArrivalStation),
            "passengers" => return Ok(FieldPath::Passengers),
            _ => {}
        }

        let mut parts = s.splitn(3, '.');
        match (parts.next(), parts.next(), parts.next()) {
            (Some("passengers"), Some(index), Some(field)) => {
                let index = index
                    .parse::<usize>()
                    .map_err(|_| format!("Invalid passenger index in path: {}", s))?;
                let field = field.parse::<PassengerField>()?;
                Ok(FieldPath::Passenger { index, field })
            }
            _ => Err(format!("Unknown field path: {}", s)),
        }
    }
}
