use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::catalog::{self, PropertyType};
use crate::images::ImageCollection;

/// Mutable record of the property being created or edited. Owned by
/// exactly one wizard session; readers only ever see it between
/// operations, never mid-update.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct PropertyDraft {
    pub title: String,
    pub description: String,
    pub location: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latitude: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub longitude: Option<String>,
    pub property_type: Option<PropertyType>,
    pub bedrooms: Option<u32>,
    pub bathrooms: Option<u32>,
    pub max_guests: Option<u32>,
    pub price_per_night: Option<f64>,
    #[serde(default)]
    pub amenities: Vec<String>,
    #[serde(default)]
    pub activity_preferences: Vec<String>,
    #[serde(default)]
    pub images: ImageCollection,
}

/// Scalar fields addressable by name, used by string-driven hosts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScalarField {
    Title,
    Description,
    Location,
    Latitude,
    Longitude,
    PropertyType,
    Bedrooms,
    Bathrooms,
    MaxGuests,
    PricePerNight,
}

impl ScalarField {
    pub const ALL: [ScalarField; 10] = [
        ScalarField::Title,
        ScalarField::Description,
        ScalarField::Location,
        ScalarField::Latitude,
        ScalarField::Longitude,
        ScalarField::PropertyType,
        ScalarField::Bedrooms,
        ScalarField::Bathrooms,
        ScalarField::MaxGuests,
        ScalarField::PricePerNight,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            ScalarField::Title => "title",
            ScalarField::Description => "description",
            ScalarField::Location => "location",
            ScalarField::Latitude => "latitude",
            ScalarField::Longitude => "longitude",
            ScalarField::PropertyType => "type",
            ScalarField::Bedrooms => "bedrooms",
            ScalarField::Bathrooms => "bathrooms",
            ScalarField::MaxGuests => "max-guests",
            ScalarField::PricePerNight => "price",
        }
    }
}

impl FromStr for ScalarField {
    type Err = FieldError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let key = input.trim().to_ascii_lowercase();
        ScalarField::ALL
            .iter()
            .find(|field| field.name() == key)
            .copied()
            .ok_or_else(|| FieldError::UnknownField(input.trim().to_string()))
    }
}

/// The two toggle-able set fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetField {
    Amenities,
    ActivityPreferences,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FieldError {
    #[error("Unknown field `{0}`")]
    UnknownField(String),
    #[error("{field} must be a whole number of 1 or greater")]
    InvalidCount { field: &'static str },
    #[error("{field} must be a number greater than zero")]
    InvalidPrice { field: &'static str },
    #[error("{0} is not a known property type")]
    InvalidPropertyType(String),
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ActivityError {
    #[error("Please enter an activity name")]
    EmptyInput,
    #[error("This activity is already added")]
    DuplicateEntry,
}

impl PropertyDraft {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces exactly one scalar field from raw text. Numeric fields are
    /// parsed and range-checked; coordinates accept any string.
    pub fn set_field(&mut self, field: ScalarField, raw: &str) -> Result<(), FieldError> {
        let value = raw.trim();
        match field {
            ScalarField::Title => self.title = value.to_string(),
            ScalarField::Description => self.description = value.to_string(),
            ScalarField::Location => self.location = value.to_string(),
            ScalarField::Latitude => self.latitude = non_empty(value),
            ScalarField::Longitude => self.longitude = non_empty(value),
            ScalarField::PropertyType => {
                if value.is_empty() {
                    self.property_type = None;
                } else {
                    let kind = value
                        .parse::<PropertyType>()
                        .map_err(|err| FieldError::InvalidPropertyType(err.0))?;
                    self.property_type = Some(kind);
                }
            }
            ScalarField::Bedrooms => self.bedrooms = Some(parse_count(value, "Bedrooms")?),
            ScalarField::Bathrooms => self.bathrooms = Some(parse_count(value, "Bathrooms")?),
            ScalarField::MaxGuests => self.max_guests = Some(parse_count(value, "Max guests")?),
            ScalarField::PricePerNight => {
                self.price_per_night = Some(parse_price(value, "Price per night")?)
            }
        }
        Ok(())
    }

    /// Adds `item` to the named set when `included`, removes it otherwise.
    /// Re-adding a present item or removing an absent one is a no-op, so
    /// checkbox-style callers can pass their target state blindly.
    pub fn toggle_set_field(&mut self, set: SetField, item: &str, included: bool) {
        let entries = match set {
            SetField::Amenities => &mut self.amenities,
            SetField::ActivityPreferences => &mut self.activity_preferences,
        };
        let present = entries.iter().any(|entry| entry == item);
        if included && !present {
            entries.push(item.to_string());
        } else if !included && present {
            entries.retain(|entry| entry != item);
        }
    }

    /// Appends a user-authored activity. Trims first; rejects empty input
    /// and exact case-sensitive duplicates without touching state.
    pub fn add_custom_activity(&mut self, text: &str) -> Result<(), ActivityError> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(ActivityError::EmptyInput);
        }
        if self.activity_preferences.iter().any(|entry| entry == trimmed) {
            return Err(ActivityError::DuplicateEntry);
        }
        self.activity_preferences.push(trimmed.to_string());
        Ok(())
    }

    /// Removes an activity whether it came from the preset catalog or was
    /// user-authored; both live in the same list.
    pub fn remove_activity(&mut self, text: &str) {
        self.activity_preferences.retain(|entry| entry != text);
    }

    /// Activities not present in the preset catalog. Derived on demand;
    /// origin is never stored as a flag.
    pub fn custom_activities(&self) -> Vec<&str> {
        self.activity_preferences
            .iter()
            .filter(|entry| !catalog::is_preset_activity(entry))
            .map(String::as_str)
            .collect()
    }

    pub fn has_amenity(&self, name: &str) -> bool {
        self.amenities.iter().any(|entry| entry == name)
    }

    pub fn has_activity(&self, name: &str) -> bool {
        self.activity_preferences.iter().any(|entry| entry == name)
    }
}

fn non_empty(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

fn parse_count(value: &str, field: &'static str) -> Result<u32, FieldError> {
    value
        .parse::<u32>()
        .ok()
        .filter(|count| *count >= 1)
        .ok_or(FieldError::InvalidCount { field })
}

fn parse_price(value: &str, field: &'static str) -> Result<f64, FieldError> {
    value
        .parse::<f64>()
        .ok()
        .filter(|price| *price > 0.0)
        .ok_or(FieldError::InvalidPrice { field })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_field_parses_and_range_checks() {
        let mut draft = PropertyDraft::new();
        draft.set_field(ScalarField::Title, "  Serene Mountain Yoga Retreat ").unwrap();
        assert_eq!(draft.title, "Serene Mountain Yoga Retreat");

        draft.set_field(ScalarField::Bedrooms, "3").unwrap();
        assert_eq!(draft.bedrooms, Some(3));
        assert!(draft.set_field(ScalarField::Bedrooms, "0").is_err());

        draft.set_field(ScalarField::PricePerNight, "250").unwrap();
        assert_eq!(draft.price_per_night, Some(250.0));
        assert!(draft.set_field(ScalarField::PricePerNight, "-5").is_err());

        draft.set_field(ScalarField::PropertyType, "Cabin").unwrap();
        assert_eq!(draft.property_type, Some(PropertyType::Cabin));
        assert!(draft.set_field(ScalarField::PropertyType, "castle").is_err());
    }

    #[test]
    fn coordinates_accept_any_string() {
        let mut draft = PropertyDraft::new();
        draft.set_field(ScalarField::Latitude, "not-a-number").unwrap();
        assert_eq!(draft.latitude.as_deref(), Some("not-a-number"));
        draft.set_field(ScalarField::Latitude, "").unwrap();
        assert_eq!(draft.latitude, None);
    }

    #[test]
    fn custom_activities_are_a_derived_view() {
        let mut draft = PropertyDraft::new();
        draft.toggle_set_field(SetField::ActivityPreferences, "Yoga", true);
        draft.add_custom_activity("Sound Healing").unwrap();
        assert_eq!(draft.custom_activities(), vec!["Sound Healing"]);
        draft.remove_activity("Sound Healing");
        assert!(draft.custom_activities().is_empty());
        assert!(draft.has_activity("Yoga"));
    }
}
