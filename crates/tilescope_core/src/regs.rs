use bitflags::bitflags;

use crate::frame::Engine;

/// The 12 readable graphics registers, in the external engine's index
/// order. The discriminants are the wire indices.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum Register {
    Lcdc = 0,
    Stat = 1,
    Scy = 2,
    Scx = 3,
    Ly = 4,
    Lyc = 5,
    Dma = 6,
    Bgp = 7,
    Obp0 = 8,
    Obp1 = 9,
    Wy = 10,
    Wx = 11,
}

impl Register {
    pub const COUNT: usize = 12;

    pub const ALL: [Register; Register::COUNT] = [
        Register::Lcdc,
        Register::Stat,
        Register::Scy,
        Register::Scx,
        Register::Ly,
        Register::Lyc,
        Register::Dma,
        Register::Bgp,
        Register::Obp0,
        Register::Obp1,
        Register::Wy,
        Register::Wx,
    ];

    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }
}

bitflags! {
    /// LCD control register bits.
    #[derive(Copy, Clone, Debug, PartialEq, Eq)]
    pub struct Lcdc: u8 {
        const BG_ENABLE = 0x01;
        const OBJ_ENABLE = 0x02;
        /// 8x16 objects when set.
        const OBJ_TALL = 0x04;
        /// Background map at 0x1C00 when set, 0x1800 otherwise.
        const BG_MAP_HIGH = 0x08;
        /// Unsigned tile-map addressing when set, signed otherwise.
        const UNSIGNED_TILE_DATA = 0x10;
        const WINDOW_ENABLE = 0x20;
        /// Window map at 0x1C00 when set, 0x1800 otherwise.
        const WINDOW_MAP_HIGH = 0x40;
        const LCD_ENABLE = 0x80;
    }
}

/// Snapshot of the graphics registers, captured once per decode pass.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Registers {
    pub lcdc: u8,
    pub stat: u8,
    pub scy: u8,
    pub scx: u8,
    pub ly: u8,
    pub lyc: u8,
    pub dma: u8,
    pub bgp: u8,
    pub obp0: u8,
    pub obp1: u8,
    pub wy: u8,
    pub wx: u8,
}

impl Registers {
    pub fn capture<E: Engine + ?Sized>(engine: &E) -> Self {
        Self {
            lcdc: engine.read_register(Register::Lcdc),
            stat: engine.read_register(Register::Stat),
            scy: engine.read_register(Register::Scy),
            scx: engine.read_register(Register::Scx),
            ly: engine.read_register(Register::Ly),
            lyc: engine.read_register(Register::Lyc),
            dma: engine.read_register(Register::Dma),
            bgp: engine.read_register(Register::Bgp),
            obp0: engine.read_register(Register::Obp0),
            obp1: engine.read_register(Register::Obp1),
            wy: engine.read_register(Register::Wy),
            wx: engine.read_register(Register::Wx),
        }
    }

    /// LCDC as typed flags. All eight bits are defined, so nothing is
    /// dropped.
    #[inline]
    pub fn lcdc_flags(&self) -> Lcdc {
        Lcdc::from_bits_truncate(self.lcdc)
    }
}
