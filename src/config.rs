use std::env;
use std::fs;
use std::path::Path;

use chrono::NaiveDate;

use crate::entities::Stations;
use crate::error::{AppError, AppResult};
use crate::utils::clock::{Clock, FixedClock, SystemClock};
use crate::utils::dates::parse_date;

#[derive(Clone, Debug, Default)]
pub struct Config {
    pub stations: Stations,
    /// Overrides the local clock when set.
    pub today: Option<NaiveDate>,
}

impl Config {
    pub fn from_env() -> AppResult<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from any variable source.
    ///
    /// `BOOKING_STATIONS_FILE` wins over `BOOKING_STATIONS`; with neither,
    /// the default stations are used.
    pub fn from_lookup<F>(lookup: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let stations = match lookup("BOOKING_STATIONS_FILE") {
            Some(path) => stations_from_file(Path::new(&path))?,
            None => match lookup("BOOKING_STATIONS") {
                Some(list) => stations_from_list(&list)?,
                None => Stations::default(),
            },
        };

        let today = match lookup("BOOKING_TODAY") {
            Some(value) => Some(parse_today(&value)?),
            None => None,
        };

        Ok(Self { stations, today })
    }

    pub fn clock(&self) -> Box<dyn Clock> {
        match self.today {
            Some(date) => Box::new(FixedClock(date)),
            None => Box::new(SystemClock),
        }
    }
}

/// Comma-separated station names.
pub fn stations_from_list(list: &str) -> AppResult<Stations> {
    Stations::new(list.split(',').filter(|name| !name.trim().is_empty()))
}

/// One station per line; blank lines and `#` comments are skipped.
pub fn stations_from_file(path: &Path) -> AppResult<Stations> {
    let contents = fs::read_to_string(path).map_err(|e| {
        AppError::Config(format!("Failed to read stations file {}: {}", path.display(), e))
    })?;

    Stations::new(
        contents
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#')),
    )
}

pub fn parse_today(value: &str) -> AppResult<NaiveDate> {
    parse_date(value).ok_or_else(|| AppError::Config(format!("Invalid date for today: {}", value)))
}
