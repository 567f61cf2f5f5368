use std::path::PathBuf;

use atlas_dashboard_lib::{HostOptions, init_logging, run};
use clap::Parser;

#[derive(Parser, Debug)]
#[command(about = "Enrollment choropleth dashboard host")]
struct Args {
    /// Directory holding atlas.json and the region data files.
    #[arg(long, default_value = ".")]
    data_dir: PathBuf,
}

#[tokio::main]
async fn main() {
    init_logging();
    let args = Args::parse();
    if let Err(err) = run(HostOptions {
        data_dir: args.data_dir,
    })
    .await
    {
        log::error!("host: {err}");
        std::process::exit(1);
    }
}
