use std::path::Path;

use anyhow::{ensure, Context, Result};

use crate::frame::Engine;
use crate::regs::Register;
use crate::{OAM_SIZE, VRAM_SIZE};

/// Size of a raw snapshot file: 8 KiB of video memory, 160 bytes of object
/// memory, then the 12 register bytes in external index order.
pub const SNAPSHOT_SIZE: usize = VRAM_SIZE + OAM_SIZE + Register::COUNT;

/// An owned machine-state snapshot, loadable from a raw dump file.
///
/// Doubles as the standalone `Engine` implementation: a live engine hands
/// out borrowed views of its own memory, a `Snapshot` hands out views of
/// the bytes it loaded.
#[derive(Clone, Debug)]
pub struct Snapshot {
    vram: Vec<u8>,
    oam: Vec<u8>,
    regs: [u8; Register::COUNT],
}

impl Snapshot {
    /// Parse a raw snapshot dump.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        ensure!(
            bytes.len() == SNAPSHOT_SIZE,
            "snapshot is {} bytes, expected {}",
            bytes.len(),
            SNAPSHOT_SIZE
        );
        let (vram, rest) = bytes.split_at(VRAM_SIZE);
        let (oam, regs) = rest.split_at(OAM_SIZE);
        let mut reg_block = [0u8; Register::COUNT];
        reg_block.copy_from_slice(regs);
        Ok(Self {
            vram: vram.to_vec(),
            oam: oam.to_vec(),
            regs: reg_block,
        })
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path)
            .with_context(|| format!("failed to read snapshot '{}'", path.display()))?;
        Self::from_bytes(&bytes)
            .with_context(|| format!("malformed snapshot '{}'", path.display()))
    }

    /// Mutable video memory, for building snapshots programmatically.
    pub fn vram_mut(&mut self) -> &mut [u8] {
        &mut self.vram
    }

    /// Mutable object memory.
    pub fn oam_mut(&mut self) -> &mut [u8] {
        &mut self.oam
    }

    pub fn write_register(&mut self, reg: Register, value: u8) {
        self.regs[reg.index()] = value;
    }
}

impl Engine for Snapshot {
    fn video_memory(&self) -> &[u8] {
        &self.vram
    }

    fn object_memory(&self) -> &[u8] {
        &self.oam
    }

    fn read_register(&self, reg: Register) -> u8 {
        self.regs[reg.index()]
    }
}
