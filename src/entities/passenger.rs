use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// One traveller's personal and travel-document data.
///
/// Dates are kept as the raw strings the user typed; the schema decides
/// whether they parse and where they fall relative to today.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Passenger {
    pub full_name: String,
    pub phone_number: String,
    pub email: String,
    pub birth_date: String,
    pub passport_number: String,
    pub passport_expiration_date: String,
}

impl Passenger {
    pub fn blank() -> Self {
        Self::default()
    }

    pub fn get(&self, field: PassengerField) -> &str {
        match field {
            PassengerField::FullName => &self.full_name,
            PassengerField::PhoneNumber => &self.phone_number,
            PassengerField::Email => &self.email,
            PassengerField::BirthDate => &self.birth_date,
            PassengerField::PassportNumber => &self.passport_number,
            PassengerField::PassportExpirationDate => &self.passport_expiration_date,
        }
    }

    pub fn set(&mut self, field: PassengerField, value: impl Into<String>) {
        let slot = match field {
            PassengerField::FullName => &mut self.full_name,
            PassengerField::PhoneNumber => &mut self.phone_number,
            PassengerField::Email => &mut self.email,
            PassengerField::BirthDate => &mut self.birth_date,
            PassengerField::PassportNumber => &mut self.passport_number,
            PassengerField::PassportExpirationDate => &mut self.passport_expiration_date,
        };
        *slot = value.into();
    }
}

/// Addressable passenger fields, in display order.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PassengerField {
    FullName,
    PhoneNumber,
    Email,
    BirthDate,
    PassportNumber,
    PassportExpirationDate,
}

impl PassengerField {
    pub const ALL: [PassengerField; 6] = [
        PassengerField::FullName,
        PassengerField::PhoneNumber,
        PassengerField::Email,
        PassengerField::BirthDate,
        PassengerField::PassportNumber,
        PassengerField::PassportExpirationDate,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            PassengerField::FullName => "fullName",
            PassengerField::PhoneNumber => "phoneNumber",
            PassengerField::Email => "email",
            PassengerField::BirthDate => "birthDate",
            PassengerField::PassportNumber => "passportNumber",
            PassengerField::PassportExpirationDate => "passportExpirationDate",
        }
    }
}

impl fmt::Display for PassengerField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PassengerField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PassengerField::ALL
            .into_iter()
            .find(|field| field.as_str() == s)
            .ok_or_else(|| format!("Unknown passenger field: {}", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_camel_case_with_missing_fields() {
        let json = r#"{"fullName": "John Doe", "email": "john@example.com"}"#;
        let passenger: Passenger = serde_json::from_str(json).unwrap();

        assert_eq!(passenger.full_name, "John Doe");
        assert_eq!(passenger.email, "john@example.com");
        assert_eq!(passenger.phone_number, "");
        assert_eq!(passenger.passport_expiration_date, "");
    }

    #[test]
    fn test_get_and_set_by_field() {
        let mut passenger = Passenger::blank();
        passenger.set(PassengerField::PassportNumber, "AB123456");

        assert_eq!(passenger.get(PassengerField::PassportNumber), "AB123456");
        assert_eq!(passenger.get(PassengerField::FullName), "");
    }

    #[test]
    fn test_field_names_parse_back() {
        for field in PassengerField::ALL {
            assert_eq!(field.as_str().parse::<PassengerField>().unwrap(), field);
        }
        assert!("passport".parse::<PassengerField>().is_err());
    }
}
