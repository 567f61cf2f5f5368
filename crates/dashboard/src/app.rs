//! Host application setup and lifecycle management.

use std::path::PathBuf;
use std::sync::Arc;

use atlas_region_store::open_catalog;
use log::{error, info};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing_subscriber::filter::LevelFilter;

use crate::commands::handle_line;
use crate::ipc::HostError;
use crate::session::DashboardSession;

#[derive(Debug, Clone)]
pub struct HostOptions {
    /// Directory holding `atlas.json` and the region data files.
    pub data_dir: PathBuf,
}

pub fn log_level() -> LevelFilter {
    if cfg!(debug_assertions) {
        LevelFilter::DEBUG
    } else {
        LevelFilter::INFO
    }
}

/// Install the stderr subscriber; stdout is reserved for IPC responses.
pub fn init_logging() {
    if tracing_subscriber::fmt()
        .with_max_level(log_level())
        .with_writer(std::io::stderr)
        .try_init()
        .is_err()
    {
        log::debug!("host: logging already initialised");
    }
}

/// Open the catalog and serve newline-delimited JSON calls on stdin until EOF.
pub async fn run(options: HostOptions) -> Result<(), HostError> {
    let catalog = open_catalog(&options.data_dir).await.map_err(|err| {
        error!("host: failed to open region catalog: {err}");
        HostError::from(err)
    })?;
    let mut session = DashboardSession::new(Arc::new(catalog))?;
    info!(
        "host: serving {} regions from {}",
        session.catalog().entries().len(),
        options.data_dir.display()
    );

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();
    while let Some(line) = lines.next_line().await.map_err(io_error)? {
        if line.trim().is_empty() {
            continue;
        }
        let mut response = handle_line(&mut session, &line);
        response.push('\n');
        stdout
            .write_all(response.as_bytes())
            .await
            .map_err(io_error)?;
        stdout.flush().await.map_err(io_error)?;
    }
    info!("host: stdin closed, shutting down");
    Ok(())
}

fn io_error(err: std::io::Error) -> HostError {
    HostError::internal(format!("ipc stream failed: {err}"))
}
