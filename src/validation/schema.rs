use std::ops::Deref;
use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;
use serde::Serialize;

use super::errors::{ValidationErrors, Violation, ViolationKind};
use super::path::FieldPath;
use super::rules::{FieldRules, RuleContext};
use crate::entities::{Booking, Passenger, PassengerField, Stations};
use crate::utils::clock::Clock;
use crate::utils::dates::parse_date;

/// User-facing messages. Tests and callers match on these exact strings.
pub mod messages {
    pub const DEPARTURE_REQUIRED: &str = "Please select a departure station";
    pub const DEPARTURE_UNKNOWN: &str = "Please select a valid departure station";
    pub const ARRIVAL_REQUIRED: &str = "Please select an arrival station";
    pub const ARRIVAL_UNKNOWN: &str = "Please select a valid arrival station";
    pub const STATIONS_MUST_DIFFER: &str = "Departure and arrival stations must be different";
    pub const PASSENGERS_REQUIRED: &str = "At least one passenger is required";

    pub const FULL_NAME_REQUIRED: &str = "Full name is required";
    pub const FULL_NAME_TOO_SHORT: &str = "This field must be at least 3 characters long";
    pub const PHONE_REQUIRED: &str = "Phone number is required";
    pub const PHONE_FORMAT: &str = "Phone number must be in format +66-X-XXXXXXX";
    pub const EMAIL_REQUIRED: &str = "Email is required";
    pub const EMAIL_INVALID: &str = "Invalid email address";
    pub const BIRTH_DATE_REQUIRED: &str = "Birth date is required";
    pub const BIRTH_DATE_FUTURE: &str = "Birth date cannot be in the future";
    pub const PASSPORT_REQUIRED: &str = "Passport number is required";
    pub const PASSPORT_TOO_SHORT: &str = "Passport number must be at least 3 characters long";
    pub const PASSPORT_EXPIRY_REQUIRED: &str = "Passport expiration date is required";
    pub const PASSPORT_EXPIRY_PAST: &str = "Passport expiration date must be in the future";
}

static PHONE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\+66-[0-9]-[0-9]{7}$").expect("phone regex is valid"));

type RecordCheck = Box<dyn Fn(&Booking, &RuleContext<'_>) -> bool + Send + Sync>;

struct RecordRule {
    path: FieldPath,
    violation: Violation,
    check: RecordCheck,
}

/// Field rules for a single passenger, keyed by field in display order.
pub struct PassengerSchema {
    fields: Vec<(PassengerField, FieldRules)>,
}

impl PassengerSchema {
    pub fn empty() -> Self {
        Self { fields: Vec::new() }
    }

    pub fn field(mut self, field: PassengerField, rules: FieldRules) -> Self {
        self.fields.push((field, rules));
        self
    }

    /// Check every field of the passenger at `index`, adding one violation
    /// per failing field.
    pub fn check_into(
        &self,
        index: usize,
        passenger: &Passenger,
        ctx: &RuleContext<'_>,
        errors: &mut ValidationErrors,
    ) {
        for (field, rules) in &self.fields {
            if let Some(violation) = rules.check(passenger.get(*field), ctx) {
                errors.add(FieldPath::passenger(index, *field), violation);
            }
        }
    }
}

impl Default for PassengerSchema {
    fn default() -> Self {
        Self::empty()
            .field(
                PassengerField::FullName,
                FieldRules::new()
                    .required(messages::FULL_NAME_REQUIRED)
                    .min_len(3, messages::FULL_NAME_TOO_SHORT),
            )
            .field(
                PassengerField::PhoneNumber,
                FieldRules::new()
                    .required(messages::PHONE_REQUIRED)
                    .matches(PHONE_REGEX.clone(), messages::PHONE_FORMAT),
            )
            .field(
                PassengerField::Email,
                FieldRules::new()
                    .required(messages::EMAIL_REQUIRED)
                    .email(messages::EMAIL_INVALID),
            )
            .field(
                PassengerField::BirthDate,
                FieldRules::new()
                    .required(messages::BIRTH_DATE_REQUIRED)
                    .refine(ViolationKind::TemporalBound, messages::BIRTH_DATE_FUTURE, |v, ctx| {
                        // Today is inclusive.
                        parse_date(v).is_some_and(|date| date <= ctx.today)
                    }),
            )
            .field(
                PassengerField::PassportNumber,
                FieldRules::new()
                    .required(messages::PASSPORT_REQUIRED)
                    .min_len(3, messages::PASSPORT_TOO_SHORT),
            )
            .field(
                PassengerField::PassportExpirationDate,
                FieldRules::new()
                    .required(messages::PASSPORT_EXPIRY_REQUIRED)
                    .refine(
                        ViolationKind::TemporalBound,
                        messages::PASSPORT_EXPIRY_PAST,
                        // Today itself is rejected.
                        |v, ctx| parse_date(v).is_some_and(|date| date > ctx.today),
                    ),
            )
    }
}

/// Booking accepted by [`BookingSchema`]. Only the schema can build one.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidBooking(Booking);

impl ValidBooking {
    pub fn into_inner(self) -> Booking {
        self.0
    }
}

impl Deref for ValidBooking {
    type Target = Booking;

    fn deref(&self) -> &Booking {
        &self.0
    }
}

/// Declarative rules over a whole booking.
///
/// Field rules run first; record rules only run for paths that do not
/// already carry a violation, so each path reports at most one message.
pub struct BookingSchema {
    stations: Stations,
    departure: FieldRules,
    arrival: FieldRules,
    passenger: PassengerSchema,
    record_rules: Vec<RecordRule>,
}

impl BookingSchema {
    /// Schema with no rules, for composing custom rule sets.
    pub fn empty(stations: Stations) -> Self {
        Self {
            stations,
            departure: FieldRules::new(),
            arrival: FieldRules::new(),
            passenger: PassengerSchema::empty(),
            record_rules: Vec::new(),
        }
    }

    /// The standard booking form rules over the given station list.
    pub fn new(stations: Stations) -> Self {
        Self::empty(stations)
            .departure(
                FieldRules::new()
                    .required(messages::DEPARTURE_REQUIRED)
                    .refine(ViolationKind::Format, messages::DEPARTURE_UNKNOWN, |v, ctx| {
                        ctx.stations.contains(v)
                    }),
            )
            .arrival(
                FieldRules::new()
                    .required(messages::ARRIVAL_REQUIRED)
                    .refine(ViolationKind::Format, messages::ARRIVAL_UNKNOWN, |v, ctx| {
                        ctx.stations.contains(v)
                    }),
            )
            .passengers(PassengerSchema::default())
            .refine(
                FieldPath::Passengers,
                Violation::new(ViolationKind::Required, messages::PASSENGERS_REQUIRED),
                |booking, _| !booking.passengers.is_empty(),
            )
            .refine(
                FieldPath::ArrivalStation,
                Violation::new(ViolationKind::CrossField, messages::STATIONS_MUST_DIFFER),
                |booking, _| {
                    booking.departure_station.is_empty()
                        || booking.arrival_station.is_empty()
                        || booking.departure_station != booking.arrival_station
                },
            )
    }

    pub fn departure(mut self, rules: FieldRules) -> Self {
        self.departure = rules;
        self
    }

    pub fn arrival(mut self, rules: FieldRules) -> Self {
        self.arrival = rules;
        self
    }

    pub fn passengers(mut self, schema: PassengerSchema) -> Self {
        self.passenger = schema;
        self
    }

    /// Add a record-level rule attributed to `path`.
    pub fn refine<F>(mut self, path: FieldPath, violation: Violation, check: F) -> Self
    where
        F: Fn(&Booking, &RuleContext<'_>) -> bool + Send + Sync + 'static,
    {
        self.record_rules.push(RecordRule {
            path,
            violation,
            check: Box::new(check),
        });
        self
    }

    pub fn stations(&self) -> &Stations {
        &self.stations
    }

    /// Validate against the clock's current date.
    pub fn validate(
        &self,
        booking: &Booking,
        clock: &dyn Clock,
    ) -> Result<ValidBooking, ValidationErrors> {
        self.validate_on(booking, clock.today())
    }

    /// Validate with `today` as the reference date for date rules.
    pub fn validate_on(
        &self,
        booking: &Booking,
        today: NaiveDate,
    ) -> Result<ValidBooking, ValidationErrors> {
        self.errors_on(booking, today)
            .into_result(ValidBooking(booking.clone()))
    }

    /// Collect every violation in one pass.
    pub fn errors_on(&self, booking: &Booking, today: NaiveDate) -> ValidationErrors {
        let ctx = RuleContext {
            today,
            stations: &self.stations,
        };
        let mut errors = ValidationErrors::new();

        if let Some(violation) = self.departure.check(&booking.departure_station, &ctx) {
            errors.add(FieldPath::DepartureStation, violation);
        }
        if let Some(violation) = self.arrival.check(&booking.arrival_station, &ctx) {
            errors.add(FieldPath::ArrivalStation, violation);
        }
        for (index, passenger) in booking.passengers.iter().enumerate() {
            self.passenger.check_into(index, passenger, &ctx, &mut errors);
        }

        for rule in &self.record_rules {
            if errors.contains(&rule.path) {
                continue;
            }
            if !(rule.check)(booking, &ctx) {
                errors.add(rule.path, rule.violation.clone());
            }
        }

        errors
    }
}

impl Default for BookingSchema {
    fn default() -> Self {
        Self::new(Stations::default())
    }
}
