//! Region/district selection state machine.
//!
//! The state is a plain value: callers own it and thread it through each
//! render. [`SelectionState::apply`] never mutates in place, so a rejected
//! event leaves the caller's current state untouched.

use std::fmt;

use log::{debug, info};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};

use crate::error::{AtlasError, AtlasResult};

#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RegionSetId(pub String);

impl RegionSetId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RegionSetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectedDistrict {
    pub district: String,
    pub regency: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum Selection {
    #[default]
    NoSelection,
    Selected(SelectedDistrict),
}

/// Feature properties reported by the map renderer for a click.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClickPayload {
    pub properties: Map<String, JsonValue>,
}

impl ClickPayload {
    pub fn new(properties: Map<String, JsonValue>) -> Self {
        Self { properties }
    }

    /// Extract both identifiers, or fail naming the first absent one.
    pub fn selected_district(&self) -> AtlasResult<SelectedDistrict> {
        let district = self.required_text("district")?;
        let regency = self.required_text("regency")?;
        Ok(SelectedDistrict { district, regency })
    }

    fn required_text(&self, field: &str) -> AtlasResult<String> {
        match self.properties.get(field).and_then(JsonValue::as_str) {
            Some(value) if !value.trim().is_empty() => Ok(value.trim().to_string()),
            _ => Err(AtlasError::missing_field(field)),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum SelectionEvent {
    SetActiveRegion(RegionSetId),
    ClickFeature(ClickPayload),
    ClearSelection,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectionState {
    active_region: RegionSetId,
    selection: Selection,
}

impl SelectionState {
    /// Start on `region` with nothing selected.
    pub fn initial(region: RegionSetId) -> Self {
        Self {
            active_region: region,
            selection: Selection::NoSelection,
        }
    }

    /// Start on the first configured region set.
    pub fn for_regions(regions: &[RegionSetId]) -> AtlasResult<Self> {
        let first = regions
            .first()
            .cloned()
            .ok_or_else(|| AtlasError::invalid("no region sets configured"))?;
        Ok(Self::initial(first))
    }

    pub fn active_region(&self) -> &RegionSetId {
        &self.active_region
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn selected(&self) -> Option<&SelectedDistrict> {
        match &self.selection {
            Selection::Selected(selected) => Some(selected),
            Selection::NoSelection => None,
        }
    }

    /// Compute the next state. Errors leave `self` as the valid state.
    pub fn apply(&self, event: &SelectionEvent) -> AtlasResult<Self> {
        let next = match event {
            SelectionEvent::SetActiveRegion(region) => {
                info!(
                    "core: active region {} -> {} (selection cleared)",
                    self.active_region, region
                );
                Self::initial(region.clone())
            }
            SelectionEvent::ClickFeature(payload) => {
                let selected = payload.selected_district()?;
                debug!(
                    "core: selected district={} regency={} in {}",
                    selected.district, selected.regency, self.active_region
                );
                Self {
                    active_region: self.active_region.clone(),
                    selection: Selection::Selected(selected),
                }
            }
            SelectionEvent::ClearSelection => Self::initial(self.active_region.clone()),
        };
        Ok(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn payload(value: JsonValue) -> ClickPayload {
        match value {
            JsonValue::Object(map) => ClickPayload::new(map),
            _ => panic!("expected object"),
        }
    }

    #[test]
    fn click_payload_requires_both_fields() {
        let err = payload(json!({"regency": "X"}))
            .selected_district()
            .expect_err("missing district");
        assert!(matches!(err, AtlasError::MissingSelectionField { ref field } if field == "district"));

        let err = payload(json!({"district": "A", "regency": 7}))
            .selected_district()
            .expect_err("non-string regency");
        assert!(matches!(err, AtlasError::MissingSelectionField { ref field } if field == "regency"));

        let selected = payload(json!({"district": " A ", "regency": "X", "total": 4}))
            .selected_district()
            .expect("selected");
        assert_eq!(selected.district, "A");
        assert_eq!(selected.regency, "X");
    }

    #[test]
    fn for_regions_rejects_empty_list() {
        assert!(SelectionState::for_regions(&[]).is_err());
        let regions = [RegionSetId::new("Jakarta"), RegionSetId::new("Jabodetabek")];
        let state = SelectionState::for_regions(&regions).expect("state");
        assert_eq!(state.active_region().as_str(), "Jakarta");
        assert_eq!(state.selection(), &Selection::NoSelection);
    }

    #[test]
    fn selection_serializes_with_status_tag() {
        let selection = Selection::Selected(SelectedDistrict {
            district: "A".into(),
            regency: "X".into(),
        });
        let value = serde_json::to_value(&selection).expect("serialize");
        assert_eq!(value, json!({"status": "selected", "district": "A", "regency": "X"}));
        let value = serde_json::to_value(Selection::NoSelection).expect("serialize");
        assert_eq!(value, json!({"status": "noSelection"}));
    }
}
