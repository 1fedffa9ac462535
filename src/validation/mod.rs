//! Booking validation: field paths, violations and the rule schema.

pub mod errors;
pub mod path;
pub mod rules;
pub mod schema;

pub use errors::{ValidationErrors, Violation, ViolationKind};
pub use path::FieldPath;
pub use rules::{FieldRules, RuleContext};
pub use schema::{BookingSchema, PassengerSchema, ValidBooking, messages};
