use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LocationError {
    #[error("Provide a city name")]
    Empty,
}

/// Outcome of checking a location before it is sent to the provider.
///
/// Only [`LocationError::Empty`] blocks a fetch; everything else is advisory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocationCheck {
    /// "City, CC" shape.
    Valid,
    /// No comma at all; worth suggesting the "City, CountryCode" format.
    MissingCountryCode,
    /// A comma is present but the code is not two characters long.
    Unusual,
}

impl LocationCheck {
    pub fn needs_advisory(&self) -> bool {
        matches!(self, LocationCheck::MissingCountryCode)
    }
}

/// True iff `text` has a comma and the trimmed part after the first comma is
/// exactly two characters.
pub fn validate_location(text: &str) -> bool {
    match text.split_once(',') {
        Some((_, country)) => country.trim().chars().count() == 2,
        None => false,
    }
}

pub fn check_location(text: &str) -> Result<LocationCheck, LocationError> {
    if text.trim().is_empty() {
        return Err(LocationError::Empty);
    }

    if validate_location(text) {
        Ok(LocationCheck::Valid)
    } else if text.contains(',') {
        Ok(LocationCheck::Unusual)
    } else {
        Ok(LocationCheck::MissingCountryCode)
    }
}
