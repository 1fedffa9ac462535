use crate::error::AppResult;
use crate::validation::ValidBooking;

/// Receives each accepted booking. Called once per successful submit.
pub trait SubmitHandler {
    fn submit(&mut self, booking: &ValidBooking) -> AppResult<()>;
}

impl<F> SubmitHandler for F
where
    F: FnMut(&ValidBooking) -> AppResult<()>,
{
    fn submit(&mut self, booking: &ValidBooking) -> AppResult<()> {
        self(booking)
    }
}

/// Logs the submitted booking as JSON.
#[derive(Clone, Copy, Debug, Default)]
pub struct LogSubmitter;

impl SubmitHandler for LogSubmitter {
    fn submit(&mut self, booking: &ValidBooking) -> AppResult<()> {
        let payload = serde_json::to_string(booking)?;
        tracing::info!(
            departure = %booking.departure_station,
            arrival = %booking.arrival_station,
            passengers = booking.passengers.len(),
            booking = %payload,
            "Booking submitted"
        );
        Ok(())
    }
}
