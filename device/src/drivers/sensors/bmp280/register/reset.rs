pub const RESET: u8 = 0xE0;

/// Writing this value triggers the complete power-on-reset procedure.
pub const RESET_MAGIC: u8 = 0xB6;

/// Start-up time after reset, including the power-on-reset sequence.
pub const POWER_UP_DELAY_MS: u32 = 2;
