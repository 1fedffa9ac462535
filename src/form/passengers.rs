use uuid::Uuid;

use crate::entities::Passenger;
use crate::error::{AppError, AppResult};

/// A passenger plus a key that stays with it while the list changes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PassengerEntry {
    id: Uuid,
    pub passenger: Passenger,
}

impl PassengerEntry {
    fn new(passenger: Passenger) -> Self {
        Self {
            id: Uuid::new_v4(),
            passenger,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }
}

/// Ordered passengers of a booking form. Never empty; grows and shrinks
/// only at the tail.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PassengerList {
    entries: Vec<PassengerEntry>,
}

impl PassengerList {
    /// A list holding one blank passenger.
    pub fn new() -> Self {
        Self {
            entries: vec![PassengerEntry::new(Passenger::blank())],
        }
    }

    /// Seed the list from existing values. An empty input yields one blank
    /// passenger.
    pub fn from_passengers(passengers: Vec<Passenger>) -> Self {
        if passengers.is_empty() {
            return Self::new();
        }
        Self {
            entries: passengers.into_iter().map(PassengerEntry::new).collect(),
        }
    }

    /// Append a blank passenger and return its index.
    pub fn append(&mut self) -> usize {
        self.entries.push(PassengerEntry::new(Passenger::blank()));
        let index = self.entries.len() - 1;
        tracing::debug!(count = self.entries.len(), "Passenger added");
        index
    }

    pub fn can_remove_last(&self) -> bool {
        self.entries.len() > 1
    }

    /// Remove the last passenger. Fails when only one remains.
    pub fn remove_last(&mut self) -> AppResult<Passenger> {
        if !self.can_remove_last() {
            return Err(AppError::RemoveDisabled);
        }
        let removed = self.entries.pop().ok_or(AppError::RemoveDisabled)?;
        tracing::debug!(count = self.entries.len(), "Passenger removed");
        Ok(removed.passenger)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, index: usize) -> AppResult<&PassengerEntry> {
        self.entries
            .get(index)
            .ok_or(AppError::NoSuchPassenger(index))
    }

    pub fn get_mut(&mut self, index: usize) -> AppResult<&mut Passenger> {
        self.entries
            .get_mut(index)
            .map(|entry| &mut entry.passenger)
            .ok_or(AppError::NoSuchPassenger(index))
    }

    pub fn iter(&self) -> impl Iterator<Item = &PassengerEntry> {
        self.entries.iter()
    }

    pub fn to_passengers(&self) -> Vec<Passenger> {
        self.entries.iter().map(|e| e.passenger.clone()).collect()
    }

    /// Heading for the passenger at `index`, e.g. "Passenger #1".
    pub fn label(index: usize) -> String {
        format!("Passenger #{}", index + 1)
    }

    /// Counter text, e.g. "3 Passengers".
    pub fn count_label(&self) -> String {
        format!("{} Passengers", self.entries.len())
    }
}

impl Default for PassengerList {
    fn default() -> Self {
        Self::new()
    }
}
