pub mod app;

use std::path::PathBuf;

use anyhow::Result;
use tilescope_core::Snapshot;
use tilescope_sdl2::{App, SdlContext, SdlInitInfo};

pub use app::SnapshotApp;

/// Load a snapshot file and run the panel viewer over it.
pub fn run(snapshot_path: PathBuf) -> Result<()> {
    let snapshot = Snapshot::load(&snapshot_path)?;
    let app = SnapshotApp::new(snapshot_path, snapshot);
    let init_info = SdlInitInfo::builder().title(app.title()).build();
    SdlContext::run(init_info, app)
}
