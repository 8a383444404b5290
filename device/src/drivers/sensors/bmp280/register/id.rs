pub const ID: u8 = 0xD0;

/// Chip identifier reported by a genuine BMP280.
pub const CHIP_ID: u8 = 0x58;
