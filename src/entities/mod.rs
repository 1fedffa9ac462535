pub mod booking;
pub mod passenger;
pub mod station;

pub use booking::Booking;
pub use passenger::{Passenger, PassengerField};
pub use station::Stations;
