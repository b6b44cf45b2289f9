//! Fixed catalogs the property wizard selects from: property types,
//! amenities, and activity presets.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

/// Property category offered by the marketplace.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum PropertyType {
    Cabin,
    Villa,
    House,
    Apartment,
    Bungalow,
    Lodge,
    Resort,
    Farmhouse,
}

impl PropertyType {
    pub const ALL: [PropertyType; 8] = [
        PropertyType::Cabin,
        PropertyType::Villa,
        PropertyType::House,
        PropertyType::Apartment,
        PropertyType::Bungalow,
        PropertyType::Lodge,
        PropertyType::Resort,
        PropertyType::Farmhouse,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            PropertyType::Cabin => "Cabin",
            PropertyType::Villa => "Villa",
            PropertyType::House => "House",
            PropertyType::Apartment => "Apartment",
            PropertyType::Bungalow => "Bungalow",
            PropertyType::Lodge => "Lodge",
            PropertyType::Resort => "Resort",
            PropertyType::Farmhouse => "Farmhouse",
        }
    }
}

impl fmt::Display for PropertyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

static TYPE_ALIASES: Lazy<HashMap<String, PropertyType>> = Lazy::new(|| {
    PropertyType::ALL
        .iter()
        .map(|kind| (kind.label().to_ascii_lowercase(), *kind))
        .collect()
});

impl FromStr for PropertyType {
    type Err = UnknownPropertyType;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        TYPE_ALIASES
            .get(&input.trim().to_ascii_lowercase())
            .copied()
            .ok_or_else(|| UnknownPropertyType(input.trim().to_string()))
    }
}

/// Raised when parsing a property type from user input fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownPropertyType(pub String);

impl fmt::Display for UnknownPropertyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Unknown property type `{}` (options: {})",
            self.0,
            PropertyType::ALL
                .iter()
                .map(PropertyType::label)
                .collect::<Vec<_>>()
                .join(", ")
        )
    }
}

impl std::error::Error for UnknownPropertyType {}

/// Amenities guests can filter on. Membership checks are exact.
pub const AMENITIES: [&str; 13] = [
    "Wifi",
    "Parking",
    "TV",
    "Kitchen",
    "Air Conditioning",
    "Heating",
    "Pool",
    "Hot Tub",
    "Fireplace",
    "Gym",
    "Laundry",
    "Pet Friendly",
    "Smoking Allowed",
];

/// Activity presets offered during property creation. Owners may add
/// custom entries beyond this list; those stay distinguishable only by
/// not being members here.
pub const ACTIVITY_PRESETS: [&str; 12] = [
    "Yoga",
    "Meditation",
    "Hiking",
    "Spa",
    "Wellness",
    "Fitness",
    "Nature",
    "Adventure",
    "Relaxation",
    "Mindfulness",
    "Detox",
    "Retreat",
];

/// Exact, case-sensitive membership check against the amenity catalog.
pub fn is_catalog_amenity(name: &str) -> bool {
    AMENITIES.contains(&name)
}

/// Exact, case-sensitive membership check against the activity presets.
pub fn is_preset_activity(name: &str) -> bool {
    ACTIVITY_PRESETS.contains(&name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn property_type_parses_case_insensitively() {
        assert_eq!("farmhouse".parse::<PropertyType>().unwrap(), PropertyType::Farmhouse);
        assert_eq!(" Villa ".parse::<PropertyType>().unwrap(), PropertyType::Villa);
        assert!("castle".parse::<PropertyType>().is_err());
    }

    #[test]
    fn catalog_membership_is_case_sensitive() {
        assert!(is_catalog_amenity("Hot Tub"));
        assert!(!is_catalog_amenity("hot tub"));
        assert!(is_preset_activity("Yoga"));
        assert!(!is_preset_activity("yoga"));
    }
}
