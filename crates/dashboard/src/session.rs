//! Interactive dashboard session.
//!
//! The session owns the only mutable state in the host: the current
//! `SelectionState` and the feature the user last clicked on the map. The
//! click is only committed to the selection on `submit`, matching the
//! "click the area, then Generate Data" flow of the UI.

use std::sync::Arc;

use atlas_region_core::{AtlasError, ClickPayload, RegionSetId, SelectionEvent, SelectionState};
use atlas_region_store::RegionCatalog;
use log::{debug, info, warn};
use serde_json::{Map, Value as JsonValue};

use crate::ipc::HostError;
use crate::render::{RenderFrame, map_view, metrics_panel, region_options};

pub struct DashboardSession {
    catalog: Arc<RegionCatalog>,
    state: SelectionState,
    staged_click: Option<ClickPayload>,
}

impl DashboardSession {
    /// Start on the first configured region with nothing selected.
    pub fn new(catalog: Arc<RegionCatalog>) -> Result<Self, HostError> {
        let state = SelectionState::for_regions(&catalog.region_ids())?;
        debug!("host: session started on region {}", state.active_region());
        Ok(Self {
            catalog,
            state,
            staged_click: None,
        })
    }

    pub fn catalog(&self) -> &RegionCatalog {
        &self.catalog
    }

    pub fn state(&self) -> &SelectionState {
        &self.state
    }

    pub fn staged_click(&self) -> Option<&ClickPayload> {
        self.staged_click.as_ref()
    }

    pub fn set_active_region(&mut self, region: &str) -> Result<(), HostError> {
        let region = RegionSetId::new(region);
        if self.catalog.entry(&region).is_none() {
            warn!("host: set_active_region rejected unknown region '{region}'");
            return Err(HostError::invalid_input(format!("unknown region '{region}'")));
        }
        self.transition(SelectionEvent::SetActiveRegion(region))?;
        self.staged_click = None;
        Ok(())
    }

    /// Remember the last activated map feature without selecting it.
    pub fn stage_click(&mut self, properties: Map<String, JsonValue>) {
        debug!("host: staged click properties={:?}", properties);
        self.staged_click = Some(ClickPayload::new(properties));
    }

    /// Commit the staged click as the selection.
    pub fn submit(&mut self) -> Result<(), HostError> {
        let Some(payload) = self.staged_click.clone() else {
            warn!("host: submit with no clicked feature ignored");
            return Err(AtlasError::invalid("no map feature has been clicked").into());
        };
        self.transition(SelectionEvent::ClickFeature(payload))
    }

    pub fn clear_selection(&mut self) -> Result<(), HostError> {
        self.staged_click = None;
        self.transition(SelectionEvent::ClearSelection)
    }

    /// Recompute everything the UI shows from the immutable tables.
    pub fn render(&self) -> Result<RenderFrame, HostError> {
        let active = self.state.active_region();
        let entry = self
            .catalog
            .entry(active)
            .ok_or_else(|| HostError::internal(format!("active region '{active}' not in catalog")))?;
        let frame = RenderFrame {
            region: active.clone(),
            regions: region_options(&self.catalog, active),
            map: map_view(&self.catalog, entry)?,
            panel: metrics_panel(entry, self.state.selected()),
        };
        debug!(
            "host: rendered region={} map={} selection={:?}",
            active,
            frame.map.is_some(),
            self.state.selection()
        );
        Ok(frame)
    }

    fn transition(&mut self, event: SelectionEvent) -> Result<(), HostError> {
        match self.state.apply(&event) {
            Ok(next) => {
                self.state = next;
                info!(
                    "host: selection now {:?} in {}",
                    self.state.selection(),
                    self.state.active_region()
                );
                Ok(())
            }
            Err(err) => {
                warn!("host: selection event ignored: {err}");
                Err(err.into())
            }
        }
    }
}
