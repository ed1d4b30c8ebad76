use std::path::PathBuf;

use tilescope_core::{FrameDecoder, FrameSet, Registers, Snapshot};
use tilescope_sdl2::{App, Key};

/// Viewer application over a snapshot file.
///
/// The snapshot is static between reloads, but each refresh still runs a
/// full decode pass - the decode is a pure function of the snapshot, so
/// this costs little and keeps the panels honest after a reload.
pub struct SnapshotApp {
    snapshot_path: PathBuf,
    snapshot: Snapshot,
    decoder: FrameDecoder,
    should_exit: bool,
}

impl SnapshotApp {
    pub fn new(snapshot_path: PathBuf, snapshot: Snapshot) -> Self {
        Self {
            snapshot_path,
            snapshot,
            decoder: FrameDecoder::new(),
            should_exit: false,
        }
    }

    fn reload(&mut self) {
        match Snapshot::load(&self.snapshot_path) {
            Ok(snapshot) => {
                self.snapshot = snapshot;
                log::info!("reloaded '{}'", self.snapshot_path.display());
            }
            Err(err) => log::error!("reload failed: {err:#}"),
        }
    }

    fn log_registers(regs: &Registers) {
        log::info!(
            "registers: LCDC=0x{:02X} STAT=0x{:02X} SCY={} SCX={} LY={} LYC={} DMA=0x{:02X} \
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
    }
}

impl App for SnapshotApp {
    fn init(&mut self) {
        log::info!("tilescope init: '{}'", self.snapshot_path.display());
        Self::log_registers(&Registers::capture(&self.snapshot));
    }

    fn update(&mut self, frames: &mut FrameSet) {
        // A failed tick is logged and skipped; the next tick decodes from
        // scratch.
        if let Err(err) = self.decoder.decode(&self.snapshot, frames) {
            log::error!("frame decode failed: {err:#}");
        }
    }

    fn handle_key_event(&mut self, key: Key, is_down: bool) {
        if !is_down {
            return;
        }
        match key {
            Key::Escape => self.should_exit = true,
            Key::R => {
                self.reload();
                Self::log_registers(&Registers::capture(&self.snapshot));
            }
            Key::None => {}
        }
    }

    fn should_exit(&self) -> bool {
        self.should_exit
    }

    fn exit(&mut self) {
        log::info!("tilescope exit");
    }

    fn title(&self) -> String {
        format!("tilescope - {}", self.snapshot_path.display())
    }
}
