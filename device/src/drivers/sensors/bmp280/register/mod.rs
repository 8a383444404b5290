pub mod calibration;
pub mod config;
pub mod ctrl_meas;
pub mod data;
pub mod id;
pub mod reset;
pub mod status;

/// A bit field inside an 8-bit register.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Field {
    shift: u8,
    width: u8,
}

impl Field {
    pub const fn new(shift: u8, width: u8) -> Self {
        Self { shift, width }
    }

    /// Bits covered by the field, in register position.
    pub const fn mask(&self) -> u8 {
        (((1u16 << self.width) - 1) << self.shift) as u8
    }

    /// The field's value from a raw register value.
    pub const fn extract(&self, reg: u8) -> u8 {
        (reg & self.mask()) >> self.shift
    }

    /// `reg` with only this field replaced by `value`; all other bits are kept.
    pub const fn insert(&self, reg: u8, value: u8) -> u8 {
        (reg & !self.mask()) | ((value << self.shift) & self.mask())
    }
}
