use std::path::PathBuf;

use tilescope_core::{FrameDecoder, FrameSet, PixelBuffer, Snapshot};

fn main() {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let snapshot_path: PathBuf = args.next().map(PathBuf::from).unwrap_or_else(|| {
        eprintln!("Usage: frame_dump <snapshot_path> <out_dir>");
        std::process::exit(2);
    });
    let out_dir: PathBuf = args.next().map(PathBuf::from).unwrap_or_else(|| {
        eprintln!("Usage: frame_dump <snapshot_path> <out_dir>");
        std::process::exit(2);
    });

    let snapshot = Snapshot::load(&snapshot_path).unwrap_or_else(|err| {
        eprintln!("{err:#}");
        std::process::exit(1);
    });

    let mut decoder = FrameDecoder::new();
    let mut frames = FrameSet::new();
    if let Err(err) = decoder.decode(&snapshot, &mut frames) {
        eprintln!("decode failed: {err:#}");
        std::process::exit(1);
    }

    std::fs::create_dir_all(&out_dir).unwrap_or_else(|err| {
        eprintln!("Failed to create '{}': {err}", out_dir.display());
        std::process::exit(1);
    });

    let panels: [(&str, &PixelBuffer); 5] = [
        ("atlas.rgba", &frames.atlas),
        ("map0.rgba", &frames.background[0]),
        ("map1.rgba", &frames.background[1]),
        ("window.rgba", &frames.window),
        ("sprites.rgba", &frames.sprites),
    ];
    for (name, panel) in panels {
        let path = out_dir.join(name);
        std::fs::write(&path, panel.bytes()).unwrap_or_else(|err| {
            eprintln!("Failed to write '{}': {err}", path.display());
            std::process::exit(1);
        });
        println!(
            "Wrote {} bytes ({}x{} rgba32) to '{}'",
            panel.bytes().len(),
            panel.width(),
            panel.height(),
            path.display()
        );
    }

    let regs = frames.registers;
    println!(
        "Registers: LCDC=0x{:02X} STAT=0x{:02X} SCY={} SCX={} LY={} LYC={} DMA=0x{:02X} \
         BGP=0x{:02X} OBP0=0x{:02X} OBP1=0x{:02X} WY={} WX={}",
        regs.lcdc,
        regs.stat,
        regs.scy,
        regs.scx,
        regs.ly,
        regs.lyc,
        regs.dma,
        regs.bgp,
        regs.obp0,
        regs.obp1,
        regs.wy,
        regs.wx
    );
    println!(
        "Viewport: x={} y={} {}x{}",
        frames.viewport.x, frames.viewport.y, frames.viewport.width, frames.viewport.height
    );
}
