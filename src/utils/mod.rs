pub mod clock;
pub mod dates;
