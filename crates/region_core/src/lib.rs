//! Core logic of the enrollment atlas: typed region records, the
//! boundary/metrics join, the selection state machine and the district
//! drilldown. Nothing in this crate performs I/O.

pub mod audit;
pub mod builder;
pub mod drilldown;
pub mod error;
pub mod key;
pub mod records;
pub mod selection;

pub use audit::{duplicate_metric_rows, unmatched_metric_keys};
pub use builder::{aggregate_by_district, build_choropleth, feature_collection};
pub use drilldown::{DetailRow, DrilldownSummary, summarize};
pub use error::{AtlasError, AtlasResult};
pub use key::{DistrictKey, UNRESOLVED_DISTRICT, normalize_key_text};
pub use records::{
    BoundaryRecord, ChoroplethRow, Counts, Geometry, MetricsRecord, coerce_count,
};
pub use selection::{
    ClickPayload, RegionSetId, SelectedDistrict, Selection, SelectionEvent, SelectionState,
};
