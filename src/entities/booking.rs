use serde::{Deserialize, Serialize};

use super::passenger::Passenger;

/// Root record: station selection plus the passenger list.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    #[serde(default)]
    pub departure_station: String,
    #[serde(default)]
    pub arrival_station: String,
    #[serde(default)]
    pub passengers: Vec<Passenger>,
}

impl Default for Booking {
    /// Blank stations and exactly one blank passenger.
    fn default() -> Self {
        Self {
            departure_station: String::new(),
            arrival_station: String::new(),
            passengers: vec![Passenger::blank()],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_has_one_blank_passenger() {
        let booking = Booking::default();

        assert!(booking.departure_station.is_empty());
        assert!(booking.arrival_station.is_empty());
        assert_eq!(booking.passengers, vec![Passenger::blank()]);
    }

    #[test]
    fn test_serializes_with_form_field_names() {
        let booking = Booking {
            departure_station: "Bangkok Central Station".to_string(),
            arrival_station: "Pattaya Station".to_string(),
            passengers: vec![Passenger::blank()],
        };

        let value = serde_json::to_value(&booking).unwrap();
        assert_eq!(value["departureStation"], "Bangkok Central Station");
        assert_eq!(value["arrivalStation"], "Pattaya Station");
        assert_eq!(value["passengers"][0]["passportExpirationDate"], "");
    }
}
