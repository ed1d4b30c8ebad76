use std::path::PathBuf;

fn main() {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let snapshot_path: PathBuf = args.next().map(PathBuf::from).unwrap_or_else(|| {
        eprintln!(
            "Usage: tilescope <snapshot_path>\n\
             The snapshot is a raw dump: 8192 bytes VRAM, 160 bytes OAM,\n\
             then the 12 graphics registers (LCDC..WX). Press R to reload\n\
             the file, Escape to quit."
        );
        std::process::exit(2);
    });

    log::info!("viewing snapshot '{}'", snapshot_path.display());
    if let Err(err) = tilescope::run(snapshot_path) {
        eprintln!("{err:#}");
        std::process::exit(1);
    }
}
