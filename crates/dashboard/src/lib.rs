//! Enrollment dashboard host: session state and newline-delimited JSON IPC.

mod app;
mod commands;
mod ipc;
mod render;
mod session;

pub use app::{HostOptions, init_logging, log_level, run};
pub use commands::{COMMANDS, MapClickPayload, RegionSetPayload, dispatch, handle_line};
pub use ipc::{HostError, IpcCall, IpcErrorBody, IpcRequest, IpcResponse, IpcStatus};
pub use render::{FieldLabel, MapView, MetricsPanel, RegionOption, RenderFrame};
pub use session::DashboardSession;
