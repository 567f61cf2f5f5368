//! Typed rows for the boundary, metrics and choropleth tables.

use std::fmt;

use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use crate::key::DistrictKey;

/// GeoJSON geometry carried through the join untouched.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Geometry(pub JsonValue);

impl Geometry {
    pub fn is_null(&self) -> bool {
        self.0.is_null()
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BoundaryRecord {
    pub district: String,
    pub regency: String,
    pub geometry: Geometry,
}

impl BoundaryRecord {
    pub fn key(&self) -> DistrictKey {
        DistrictKey::new(&self.district, &self.regency)
    }
}

/// One branch-level metrics row. Many rows share a district.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricsRecord {
    #[serde(default)]
    pub district: String,
    pub standardized_district: String,
    pub regency: String,
    pub subdistrict: String,
    pub branch_name: String,
    #[serde(deserialize_with = "lenient_count")]
    pub active: u64,
    #[serde(deserialize_with = "lenient_count")]
    pub inactive: u64,
    #[serde(alias = "jumlah_siswa", deserialize_with = "lenient_count")]
    pub total: u64,
}

impl MetricsRecord {
    pub fn key(&self) -> DistrictKey {
        DistrictKey::new(&self.standardized_district, &self.regency)
    }

    pub fn counts(&self) -> Counts {
        Counts {
            active: self.active,
            inactive: self.inactive,
            total: self.total,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Counts {
    pub active: u64,
    pub inactive: u64,
    pub total: u64,
}

impl Counts {
    pub fn add(&mut self, other: Counts) {
        self.active = self.active.saturating_add(other.active);
        self.inactive = self.inactive.saturating_add(other.inactive);
        self.total = self.total.saturating_add(other.total);
    }
}

/// Map-rendering row: one per boundary polygon.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChoroplethRow {
    pub district: String,
    pub regency: String,
    pub geometry: Geometry,
    pub active: u64,
    pub inactive: u64,
    pub total: u64,
}

impl ChoroplethRow {
    pub fn counts(&self) -> Counts {
        Counts {
            active: self.active,
            inactive: self.inactive,
            total: self.total,
        }
    }
}

/// Coerce a raw spreadsheet cell into a count. Blank, `nan`, negative and
/// non-numeric cells all become 0; fractional values are truncated.
pub fn coerce_count(raw: &str) -> u64 {
    let trimmed = raw.trim();
    if let Ok(value) = trimmed.parse::<u64>() {
        return value;
    }
    match trimmed.parse::<f64>() {
        Ok(value) => count_from_f64(value),
        Err(_) => 0,
    }
}

fn count_from_f64(value: f64) -> u64 {
    if value.is_finite() && value >= 0.0 {
        value.trunc() as u64
    } else {
        0
    }
}

struct CountVisitor;

impl<'de> Visitor<'de> for CountVisitor {
    type Value = u64;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a student count")
    }

    fn visit_u64<E: de::Error>(self, value: u64) -> Result<u64, E> {
        Ok(value)
    }

    fn visit_i64<E: de::Error>(self, value: i64) -> Result<u64, E> {
        Ok(u64::try_from(value).unwrap_or(0))
    }

    fn visit_u128<E: de::Error>(self, value: u128) -> Result<u64, E> {
        Ok(u64::try_from(value).unwrap_or(u64::MAX))
    }

    fn visit_i128<E: de::Error>(self, value: i128) -> Result<u64, E> {
        if value < 0 {
            Ok(0)
        } else {
            Ok(u64::try_from(value).unwrap_or(u64::MAX))
        }
    }

    fn visit_f64<E: de::Error>(self, value: f64) -> Result<u64, E> {
        Ok(count_from_f64(value))
    }

    fn visit_bool<E: de::Error>(self, _value: bool) -> Result<u64, E> {
        Ok(0)
    }

    fn visit_str<E: de::Error>(self, value: &str) -> Result<u64, E> {
        Ok(coerce_count(value))
    }

    fn visit_none<E: de::Error>(self) -> Result<u64, E> {
        Ok(0)
    }

    fn visit_unit<E: de::Error>(self) -> Result<u64, E> {
        Ok(0)
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<u64, D::Error> {
        deserializer.deserialize_any(CountVisitor)
    }
}

fn lenient_count<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u64, D::Error> {
    deserializer.deserialize_any(CountVisitor)
}
