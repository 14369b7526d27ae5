//! Domain model types: pharmacies, shipping rates, and delivery photos.
//!
//! Pharmacy and rate values arrive as form fields. The original form relied
//! on the `<select>` options to constrain them; here both are validated
//! server-side against the authoritative sets.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Authoritative pharmacy list, in form display order.
pub const PHARMACIES: [&str; 15] = [
    "Pharmacy 1",
    "Pharmacy 2",
    "Pharmacy 3",
    "Pharmacy 4",
    "Pharmacy 5",
    "Pharmacy 6",
    "Pharmacy 7",
    "Pharmacy 8",
    "Pharmacy 9",
    "Pharmacy 10",
    "Pharmacy 11",
    "Pharmacy 12",
    "Pharmacy 13",
    "Pharmacy 14",
    "Pharmacy 15",
];

/// A pharmacy from the fixed enumerated set.
///
/// Construction goes through `FromStr`, which rejects anything outside
/// [`PHARMACIES`] (case-sensitive, exact match).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Pharmacy(String);

impl Pharmacy {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for Pharmacy {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if PHARMACIES.contains(&trimmed) {
            Ok(Pharmacy(trimmed.to_string()))
        } else {
            Err(AppError::InvalidInput(format!(
                "Unknown pharmacy: '{}'",
                trimmed
            )))
        }
    }
}

impl TryFrom<String> for Pharmacy {
    type Error = AppError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Pharmacy> for String {
    fn from(value: Pharmacy) -> Self {
        value.0
    }
}

impl fmt::Display for Pharmacy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Shipping rate codes offered by the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Rate {
    Eco,
    Reg,
    Hot,
    Rsh,
    Sht,
}

impl Rate {
    pub const ALL: [Rate; 5] = [Rate::Eco, Rate::Reg, Rate::Hot, Rate::Rsh, Rate::Sht];

    pub fn as_str(&self) -> &'static str {
        match self {
            Rate::Eco => "ECO",
            Rate::Reg => "REG",
            Rate::Hot => "HOT",
            Rate::Rsh => "RSH",
            Rate::Sht => "SHT",
        }
    }
}

impl FromStr for Rate {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "ECO" => Ok(Rate::Eco),
            "REG" => Ok(Rate::Reg),
            "HOT" => Ok(Rate::Hot),
            "RSH" => Ok(Rate::Rsh),
            "SHT" => Ok(Rate::Sht),
            other => Err(AppError::InvalidInput(format!("Unknown rate: '{}'", other))),
        }
    }
}

impl fmt::Display for Rate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A validated delivery photo submission, dated by the server clock.
#[derive(Debug, Clone)]
pub struct DeliveryPhoto {
    pub data: Vec<u8>,
    pub pharmacy: Pharmacy,
    pub rate: Rate,
    pub captured_on: NaiveDate,
}

impl DeliveryPhoto {
    /// Canonical filename for this photo, per the naming policy.
    pub fn filename(&self) -> String {
        crate::naming::photo_filename(&self.pharmacy, self.captured_on, self.rate)
    }

    /// Full English month name of the capture date.
    pub fn month_name(&self) -> &'static str {
        crate::naming::month_name(self.captured_on)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pharmacy_accepts_known_names() {
        let pharmacy: Pharmacy = "Pharmacy 3".parse().unwrap();
        assert_eq!(pharmacy.as_str(), "Pharmacy 3");
    }

    #[test]
    fn pharmacy_trims_whitespace() {
        let pharmacy: Pharmacy = "  Pharmacy 15 ".parse().unwrap();
        assert_eq!(pharmacy.as_str(), "Pharmacy 15");
    }

    #[test]
    fn pharmacy_rejects_unknown_names() {
        assert!("Pharmacy 16".parse::<Pharmacy>().is_err());
        assert!("pharmacy 1".parse::<Pharmacy>().is_err());
        assert!("".parse::<Pharmacy>().is_err());
    }

    #[test]
    fn rate_round_trips_all_codes() {
        for rate in Rate::ALL {
            assert_eq!(rate.as_str().parse::<Rate>().unwrap(), rate);
        }
    }

    #[test]
    fn rate_rejects_unknown_codes() {
        assert!("eco".parse::<Rate>().is_err());
        assert!("EXPRESS".parse::<Rate>().is_err());
    }

    #[test]
    fn delivery_photo_filename_uses_naming_policy() {
        let photo = DeliveryPhoto {
            data: vec![0xFF, 0xD8],
            pharmacy: "Pharmacy 3".parse().unwrap(),
            rate: Rate::Hot,
            captured_on: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
        };
        assert_eq!(photo.filename(), "Pharmacy 3_2024-06-01_HOT.jpg");
        assert_eq!(photo.month_name(), "June");
    }
}
