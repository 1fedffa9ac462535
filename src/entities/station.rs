use serde::Serialize;

use crate::error::{AppError, AppResult};

pub const DEFAULT_STATIONS: [&str; 5] = [
    "Bangkok Central Station",
    "Pattaya Station",
    "Chiang Mai Station",
    "Phuket Station",
    "Koh Samui Station",
];

/// The selectable stations, in display order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Stations(Vec<String>);

impl Stations {
    /// Build a station list, rejecting empty lists, blank names and duplicates.
    pub fn new<I, S>(names: I) -> AppResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut stations: Vec<String> = Vec::new();
        for name in names {
            let name = name.into().trim().to_string();
            if name.is_empty() {
                return Err(AppError::Config("Station names must not be blank".to_string()));
            }
            if stations.contains(&name) {
                return Err(AppError::Config(format!("Duplicate station: {}", name)));
            }
            stations.push(name);
        }

        if stations.is_empty() {
            return Err(AppError::Config("At least one station must be configured".to_string()));
        }

        Ok(Self(stations))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.iter().any(|s| s == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Default for Stations {
    fn default() -> Self {
        Self(DEFAULT_STATIONS.iter().map(|s| s.to_string()).collect())
    }
}
