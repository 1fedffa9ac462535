use crate::entities::{Booking, Stations};
use crate::error::{AppError, AppResult};
use crate::form::passengers::PassengerList;
use crate::form::submit::SubmitHandler;
use crate::utils::clock::Clock;
use crate::validation::{BookingSchema, FieldPath, ValidBooking, ValidationErrors};

/// State of one booking form while the user fills it in.
///
/// Nothing is validated until the first submit. From then on every edit
/// recomputes the error map from the current values, so an error clears
/// as soon as its field becomes valid.
pub struct FormSession {
    schema: BookingSchema,
    clock: Box<dyn Clock>,
    handler: Box<dyn SubmitHandler>,
    departure_station: String,
    arrival_station: String,
    passengers: PassengerList,
    errors: ValidationErrors,
    submit_attempted: bool,
}

impl FormSession {
    pub fn new(
        schema: BookingSchema,
        clock: Box<dyn Clock>,
        handler: Box<dyn SubmitHandler>,
    ) -> Self {
        Self {
            schema,
            clock,
            handler,
            departure_station: String::new(),
            arrival_station: String::new(),
            passengers: PassengerList::new(),
            errors: ValidationErrors::new(),
            submit_attempted: false,
        }
    }

    /// Start from previously entered values.
    pub fn with_booking(mut self, booking: Booking) -> Self {
        self.departure_station = booking.departure_station;
        self.arrival_station = booking.arrival_station;
        self.passengers = PassengerList::from_passengers(booking.passengers);
        self.revalidate();
        self
    }

    pub fn stations(&self) -> &Stations {
        self.schema.stations()
    }

    pub fn passengers(&self) -> &PassengerList {
        &self.passengers
    }

    pub fn field(&self, path: FieldPath) -> AppResult<&str> {
        match path {
            FieldPath::DepartureStation => Ok(&self.departure_station),
            FieldPath::ArrivalStation => Ok(&self.arrival_station),
            FieldPath::Passengers => Err(AppError::InvalidCommand(
                "passengers is not an editable field".to_string(),
            )),
            FieldPath::Passenger { index, field } => {
                Ok(self.passengers.get(index)?.passenger.get(field))
            }
        }
    }

    pub fn set_field(&mut self, path: FieldPath, value: impl Into<String>) -> AppResult<()> {
        let value = value.into();
        match path {
            FieldPath::DepartureStation => self.departure_station = value,
            FieldPath::ArrivalStation => self.arrival_station = value,
            FieldPath::Passengers => {
                return Err(AppError::InvalidCommand(
                    "passengers is not an editable field".to_string(),
                ));
            }
            FieldPath::Passenger { index, field } => {
                self.passengers.get_mut(index)?.set(field, value);
            }
        }
        self.revalidate();
        Ok(())
    }

    pub fn append_passenger(&mut self) -> usize {
        let index = self.passengers.append();
        self.revalidate();
        index
    }

    /// Whether the remove-passenger action should be enabled.
    pub fn can_remove_passenger(&self) -> bool {
        self.passengers.can_remove_last()
    }

    pub fn remove_last_passenger(&mut self) -> AppResult<()> {
        self.passengers.remove_last()?;
        self.revalidate();
        Ok(())
    }

    /// Snapshot of the current values.
    pub fn booking(&self) -> Booking {
        Booking {
            departure_station: self.departure_station.clone(),
            arrival_station: self.arrival_station.clone(),
            passengers: self.passengers.to_passengers(),
        }
    }

    pub fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    pub fn error(&self, path: &FieldPath) -> Option<&str> {
        self.errors.message(path)
    }

    pub fn submit_attempted(&self) -> bool {
        self.submit_attempted
    }

    /// Validate everything and hand the accepted booking to the submit
    /// handler. A failed validation never reaches the handler.
    pub fn submit(&mut self) -> AppResult<ValidBooking> {
        self.submit_attempted = true;

        match self.schema.validate(&self.booking(), self.clock.as_ref()) {
            Ok(booking) => {
                self.errors = ValidationErrors::new();
                self.handler.submit(&booking)?;
                Ok(booking)
            }
            Err(errors) => {
                tracing::warn!(errors = errors.len(), "Submission blocked by validation");
                self.errors = errors.clone();
                Err(AppError::Validation(errors))
            }
        }
    }

    fn revalidate(&mut self) {
        if !self.submit_attempted {
            return;
        }
        self.errors = self
            .schema
            .errors_on(&self.booking(), self.clock.today());
    }
}
