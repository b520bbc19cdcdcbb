//! Unit conversion and normalization module
//!
//! Heights arrive tagged with whatever unit the user picked in the form.
//! Everything is normalized to meters before any metric is computed.
//!
//! # Design Principles
//!
//! 1. **Internal Consistency**: Calculations only ever see meters
//! 2. **Permissive Parsing**: Unknown tags are kept, never rejected
//! 3. **Conversion at Boundaries**: Convert on input, not in business logic

use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// Height Units
// ============================================================================

/// Height unit selected alongside the height value
///
/// Parsing never fails: a tag that matches none of the known units is kept as
/// [`HeightUnit::Unrecognized`] and its value is taken to already be in meters.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum HeightUnit {
    #[default]
    Centimeters,
    Feet,
    Inches,
    Unrecognized(String),
}

impl HeightUnit {
    /// Parse a unit tag; only the exact tags `"cm"`, `"ft"` and `"inch"` are known
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "cm" => HeightUnit::Centimeters,
            "ft" => HeightUnit::Feet,
            "inch" => HeightUnit::Inches,
            _ => HeightUnit::Unrecognized(tag.to_string()),
        }
    }

    /// Convert a value in this unit to meters
    pub fn to_meters(&self, value: f64) -> f64 {
        match self {
            HeightUnit::Centimeters => value / 100.0,
            HeightUnit::Feet => value * 0.3048,
            HeightUnit::Inches => value * 0.0254,
            HeightUnit::Unrecognized(_) => value,
        }
    }

    /// Get the unit abbreviation, as shown in the unit dropdown
    pub fn abbreviation(&self) -> &str {
        match self {
            HeightUnit::Centimeters => "cm",
            HeightUnit::Feet => "ft",
            HeightUnit::Inches => "inch",
            HeightUnit::Unrecognized(tag) => tag,
        }
    }

    pub fn is_recognized(&self) -> bool {
        !matches!(self, HeightUnit::Unrecognized(_))
    }
}

impl fmt::Display for HeightUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.abbreviation())
    }
}

impl From<&str> for HeightUnit {
    fn from(tag: &str) -> Self {
        HeightUnit::from_tag(tag)
    }
}

impl From<String> for HeightUnit {
    fn from(tag: String) -> Self {
        HeightUnit::from_tag(&tag)
    }
}

impl From<HeightUnit> for String {
    fn from(unit: HeightUnit) -> Self {
        unit.abbreviation().to_string()
    }
}

/// Units offered by the height unit dropdown, in display order
pub const HEIGHT_UNIT_OPTIONS: &[&str] = &["cm", "ft", "inch"];

/// Convert meters back to centimeters
pub fn meters_to_cm(meters: f64) -> f64 {
    meters * 100.0
}
