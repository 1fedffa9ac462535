//! Line-oriented driver for a [`FormSession`].
//!
//! Each input line is one command:
//!
//! ```text
//! set <path> <value>   set a field, e.g. `set passengers.0.email john@example.com`
//! clear <path>         empty a field
//! add                  append a blank passenger
//! remove               remove the last passenger
//! submit               validate and submit
//! show                 print the current values
//! errors               print the current field errors
//! stations             list selectable stations
//! quit                 stop reading input
//! ```
//!
//! Blank lines and lines starting with `#` are ignored.

use std::io::{BufRead, Write};
use std::str::FromStr;

use crate::entities::Booking;
use crate::error::{AppError, AppResult};
use crate::form::{FormSession, PassengerList, SubmitHandler};
use crate::utils::clock::Clock;
use crate::validation::{BookingSchema, FieldPath};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Set(FieldPath, String),
    Clear(FieldPath),
    Add,
    Remove,
    Submit,
    Show,
    Errors,
    Stations,
    Quit,
}

impl FromStr for Command {
    type Err = AppError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim_start().trim_end_matches(['\r', '\n']);
        let (verb, rest) = line
            .split_once(char::is_whitespace)
            .map(|(verb, rest)| (verb, rest.trim_start()))
            .unwrap_or((line, ""));

        let path = |rest: &str| -> AppResult<FieldPath> {
            let name = rest.split_whitespace().next().unwrap_or("");
            name.parse::<FieldPath>().map_err(AppError::InvalidCommand)
        };

        match verb {
            "set" => {
                let target = path(rest)?;
                // Everything after the single separator is the value, as typed.
                let value = rest
                    .split_once(char::is_whitespace)
                    .map(|(_, value)| value)
                    .unwrap_or("");
                Ok(Command::Set(target, value.to_string()))
            }
            "clear" => Ok(Command::Clear(path(rest)?)),
            "add" => Ok(Command::Add),
            "remove" => Ok(Command::Remove),
            "submit" => Ok(Command::Submit),
            "show" => Ok(Command::Show),
            "errors" => Ok(Command::Errors),
            "stations" => Ok(Command::Stations),
            "quit" | "exit" => Ok(Command::Quit),
            other => Err(AppError::InvalidCommand(format!("Unknown command: {}", other))),
        }
    }
}

pub struct Console<W: Write> {
    session: FormSession,
    out: W,
    submissions: usize,
}

impl<W: Write> Console<W> {
    pub fn new(session: FormSession, out: W) -> Self {
        Self {
            session,
            out,
            submissions: 0,
        }
    }

    pub fn session(&self) -> &FormSession {
        &self.session
    }

    /// Successful submissions so far.
    pub fn submissions(&self) -> usize {
        self.submissions
    }

    /// Execute commands until input ends or `quit`. Command failures are
    /// reported on the output and do not stop the session; I/O failures do.
    pub fn run<R: BufRead>(&mut self, input: R) -> AppResult<()> {
        for line in input.lines() {
            let line = line?;
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }

            let command = match line.parse::<Command>() {
                Ok(command) => command,
                Err(e) => {
                    writeln!(self.out, "error: {}", e)?;
                    continue;
                }
            };
            if command == Command::Quit {
                break;
            }

            match self.execute(command) {
                Ok(()) => {}
                Err(AppError::Io(e)) => return Err(AppError::Io(e)),
                Err(AppError::Validation(errors)) => {
                    writeln!(self.out, "submission blocked:")?;
                    write!(self.out, "{}", errors)?;
                }
                Err(e) => writeln!(self.out, "error: {}", e)?,
            }
        }
        Ok(())
    }

    pub fn execute(&mut self, command: Command) -> AppResult<()> {
        match command {
            Command::Set(path, value) => self.session.set_field(path, value)?,
            Command::Clear(path) => self.session.set_field(path, "")?,
            Command::Add => {
                let index = self.session.append_passenger();
                writeln!(
                    self.out,
                    "{} added ({})",
                    PassengerList::label(index),
                    self.session.passengers().count_label()
                )?;
            }
            Command::Remove => {
                self.session.remove_last_passenger()?;
                writeln!(self.out, "{}", self.session.passengers().count_label())?;
            }
            Command::Submit => {
                let booking = self.session.submit()?;
                self.submissions += 1;
                writeln!(self.out, "submitted: {}", serde_json::to_string(&booking)?)?;
            }
            Command::Show => {
                writeln!(self.out, "{}", serde_json::to_string_pretty(&self.session.booking())?)?;
                writeln!(
                    self.out,
                    "{} (remove {})",
                    self.session.passengers().count_label(),
                    if self.session.can_remove_passenger() { "enabled" } else { "disabled" }
                )?;
            }
            Command::Errors => {
                writeln!(self.out, "{}", serde_json::to_string_pretty(self.session.errors())?)?;
            }
            Command::Stations => {
                for station in self.session.stations().iter() {
                    writeln!(self.out, "{}", station)?;
                }
            }
            Command::Quit => {}
        }
        Ok(())
    }

    pub fn into_output(self) -> W {
        self.out
    }
}

/// Outcome of checking one booking document.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ValidationReport {
    pub accepted: bool,
    /// Pretty JSON: the accepted booking, or the `path -> message` map.
    pub output: String,
}

impl ValidationReport {
    /// 0 when accepted, 1 otherwise.
    pub fn exit_status(&self) -> u8 {
        if self.accepted { 0 } else { 1 }
    }
}

/// Validate a booking JSON document and submit it when it passes.
pub fn validate_document(
    raw: &str,
    schema: &BookingSchema,
    clock: &dyn Clock,
    handler: &mut dyn SubmitHandler,
) -> AppResult<ValidationReport> {
    let booking: Booking = serde_json::from_str(raw)?;

    match schema.validate(&booking, clock) {
        Ok(accepted) => {
            handler.submit(&accepted)?;
            Ok(ValidationReport {
                accepted: true,
                output: serde_json::to_string_pretty(&accepted)?,
            })
        }
        Err(errors) => {
            tracing::warn!(errors = errors.len(), "Booking rejected");
            Ok(ValidationReport {
                accepted: false,
                output: serde_json::to_string_pretty(&errors)?,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::entities::PassengerField;
    use crate::form::LogSubmitter;
    use crate::utils::clock::FixedClock;
    use crate::validation::{ValidBooking, messages};

    fn console() -> Console<Vec<u8>> {
        let session = FormSession::new(
            BookingSchema::default(),
            Box::new(FixedClock(NaiveDate::from_ymd_opt(2026, 10, 18).unwrap())),
            Box::new(LogSubmitter),
        );
        Console::new(session, Vec::new())
    }

    fn output(console: Console<Vec<u8>>) -> String {
        String::from_utf8(console.into_output()).unwrap()
    }

    #[test]
    fn test_parse_set_keeps_spaces_in_value() {
        assert_eq!(
            "set departureStation Bangkok Central Station".parse::<Command>().unwrap(),
            Command::Set(
                FieldPath::DepartureStation,
                "Bangkok Central Station".to_string()
            )
        );
        assert_eq!(
            "set passengers.0.fullName".parse::<Command>().unwrap(),
            Command::Set(
                FieldPath::passenger(0, PassengerField::FullName),
                String::new()
            )
        );
    }

    #[test]
    fn test_set_keeps_surrounding_spaces_in_value() {
        assert_eq!(
            "set passengers.0.fullName  Jane Smith \r".parse::<Command>().unwrap(),
            Command::Set(
                FieldPath::passenger(0, PassengerField::FullName),
                " Jane Smith ".to_string()
            )
        );
    }

    #[test]
    fn test_blank_but_long_name_passes_length_rule() {
        let mut console = console();
        console
            .run("set passengers.0.fullName    \nsubmit\n".as_bytes())
            .unwrap();

        let name = FieldPath::passenger(0, PassengerField::FullName);
        assert_eq!(console.session().field(name).unwrap(), "   ");
        assert!(console.session().submit_attempted());
        assert_eq!(console.session().error(&name), None);
    }

    #[test]
    fn test_parse_rejects_unknown() {
        assert!(matches!(
            "book now".parse::<Command>(),
            Err(AppError::InvalidCommand(_))
        ));
        assert!(matches!(
            "set seatClass economy".parse::<Command>(),
            Err(AppError::InvalidCommand(_))
        ));
    }

    #[test]
    fn test_remove_reports_disabled() {
        let mut console = console();
        console.run("remove\n".as_bytes()).unwrap();
        assert!(output(console).contains("Cannot remove the only passenger"));
    }

    #[test]
    fn test_full_session() {
        let script = "\
# stations
set departureStation Bangkok Central Station
set arrivalStation Pattaya Station
submit
set passengers.0.fullName John Doe
set passengers.0.phoneNumber +66-8-1234567
set passengers.0.email john@example.com
set passengers.0.birthDate 1990-01-01
set passengers.0.passportNumber AB123456
set passengers.0.passportExpirationDate 2030-12-31
add
remove
submit
quit
submit
";
        let mut console = console();
        console.run(script.as_bytes()).unwrap();
        assert_eq!(console.submissions(), 1);

        let out = output(console);
        assert!(out.contains("submission blocked:"));
        assert!(out.contains("passengers.0.fullName: Full name is required"));
        assert!(out.contains("Passenger #2 added (2 Passengers)"));
        assert!(out.contains("1 Passengers"));
        assert!(out.contains("submitted: "));
        assert!(out.contains("\"departureStation\":\"Bangkok Central Station\""));
    }

    fn fixed_clock() -> FixedClock {
        FixedClock(NaiveDate::from_ymd_opt(2026, 10, 18).unwrap())
    }

    #[test]
    fn test_validate_document_accepts_and_submits() {
        let raw = r#"{
            "departureStation": "Bangkok Central Station",
            "arrivalStation": "Pattaya Station",
            "passengers": [{
                "fullName": "John Doe",
                "phoneNumber": "+66-8-1234567",
                "email": "john@example.com",
                "birthDate": "1990-01-01",
                "passportNumber": "AB123456",
                "passportExpirationDate": "2030-12-31"
            }]
        }"#;
        let mut submitted = Vec::new();
        let mut handler = |booking: &ValidBooking| -> AppResult<()> {
            submitted.push(booking.departure_station.clone());
            Ok(())
        };

        let report =
            validate_document(raw, &BookingSchema::default(), &fixed_clock(), &mut handler)
                .unwrap();

        assert!(report.accepted);
        assert_eq!(report.exit_status(), 0);
        let value: serde_json::Value = serde_json::from_str(&report.output).unwrap();
        assert_eq!(value["passengers"][0]["fullName"], "John Doe");
        assert_eq!(submitted, vec!["Bangkok Central Station".to_string()]);
    }

    #[test]
    fn test_validate_document_reports_errors_without_submitting() {
        let raw = r#"{"departureStation": "Phuket Station", "arrivalStation": "Phuket Station"}"#;
        let mut calls = 0;
        let mut handler = |_: &ValidBooking| -> AppResult<()> {
            calls += 1;
            Ok(())
        };

        let report =
            validate_document(raw, &BookingSchema::default(), &fixed_clock(), &mut handler)
                .unwrap();

        assert!(!report.accepted);
        assert_eq!(report.exit_status(), 1);
        let value: serde_json::Value = serde_json::from_str(&report.output).unwrap();
        assert_eq!(value["arrivalStation"], messages::STATIONS_MUST_DIFFER);
        assert_eq!(value["passengers"], messages::PASSENGERS_REQUIRED);
        assert_eq!(calls, 0);
    }

    #[test]
    fn test_validate_document_rejects_malformed_json() {
        let result = validate_document(
            "{not json",
            &BookingSchema::default(),
            &fixed_clock(),
            &mut LogSubmitter,
        );
        assert!(matches!(result, Err(AppError::Json(_))));
    }
}
