use super::Field;
use crate::error::Error;
use core::convert::TryFrom;

pub const CTRL_MEAS: u8 = 0xF4;

/// osrs_t, bits [7:5]
pub const OSRS_T: Field = Field::new(5, 3);
/// osrs_p, bits [4:2]
pub const OSRS_P: Field = Field::new(2, 3);
/// mode, bits [1:0]
pub const MODE: Field = Field::new(0, 2);

/// Oversampling of the temperature or pressure conversion.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Oversampling {
    Skipped,
    X1,
    X2,
    X4,
    X8,
    X16,
}

impl Oversampling {
    pub const ALL: [Oversampling; 6] = [
        Oversampling::Skipped,
        Oversampling::X1,
        Oversampling::X2,
        Oversampling::X4,
        Oversampling::X8,
        Oversampling::X16,
    ];

    /// Number of samples taken, 0 when skipped.
    pub fn factor(&self) -> u32 {
        match self {
            Oversampling::Skipped => 0,
            Oversampling::X1 => 1,
            Oversampling::X2 => 2,
            Oversampling::X4 => 4,
            Oversampling::X8 => 8,
            Oversampling::X16 => 16,
        }
    }

    /// Decode the 3-bit field value. Encodings 6 and 7 also select x16.
    pub fn from_bits(bits: u8) -> Self {
        match bits & 0b111 {
            0 => Oversampling::Skipped,
            1 => Oversampling::X1,
            2 => Oversampling::X2,
            3 => Oversampling::X4,
            4 => Oversampling::X8,
            _ => Oversampling::X16,
        }
    }
}

impl From<Oversampling> for u8 {
    fn from(oversampling: Oversampling) -> Self {
        match oversampling {
            Oversampling::Skipped => 0,
            Oversampling::X1 => 1,
            Oversampling::X2 => 2,
            Oversampling::X4 => 3,
            Oversampling::X8 => 4,
            Oversampling::X16 => 5,
        }
    }
}

impl TryFrom<u8> for Oversampling {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0..=5 => Ok(Self::from_bits(value)),
            _ => Err(Error::InvalidArgument),
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PowerMode {
    Sleep,
    /// One conversion, then back to sleep.
    Forced,
    Normal,
}

impl PowerMode {
    /// Decode the 2-bit field value. Both 0b01 and 0b10 select forced mode.
    pub fn from_bits(bits: u8) -> Self {
        match bits & 0b11 {
            0b00 => PowerMode::Sleep,
            0b11 => PowerMode::Normal,
            _ => PowerMode::Forced,
        }
    }
}

impl From<PowerMode> for u8 {
    fn from(mode: PowerMode) -> Self {
        match mode {
            PowerMode::Sleep => 0b00,
            PowerMode::Forced => 0b01,
            PowerMode::Normal => 0b11,
        }
    }
}

impl TryFrom<u8> for PowerMode {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0b00 | 0b01 | 0b11 => Ok(Self::from_bits(value)),
            _ => Err(Error::InvalidArgument),
        }
    }
}

/// Decoded content of the ctrl_meas register.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CtrlMeas {
    pub temperature_oversampling: Oversampling,
    pub pressure_oversampling: Oversampling,
    pub mode: PowerMode,
}

impl From<u8> for CtrlMeas {
    fn from(reg: u8) -> Self {
        CtrlMeas {
            temperature_oversampling: Oversampling::from_bits(OSRS_T.extract(reg)),
            pressure_oversampling: Oversampling::from_bits(OSRS_P.extract(reg)),
            mode: PowerMode::from_bits(MODE.extract(reg)),
        }
    }
}

impl From<CtrlMeas> for u8 {
    fn from(reg: CtrlMeas) -> Self {
        let value = OSRS_T.insert(0, reg.temperature_oversampling.into());
        let value = OSRS_P.insert(value, reg.pressure_oversampling.into());
        MODE.insert(value, reg.mode.into())
    }
}

/// Worst-case duration of one forced-mode conversion in microseconds.
///
/// 1.25 ms + 2.3 ms per temperature sample + 2.3 ms per pressure sample + 0.575 ms when pressure
/// is measured at all.
pub fn max_measurement_time_us(temperature: Oversampling, pressure: Oversampling) -> u32 {
    let mut t = 1250 + 2300 * temperature.factor();
    if pressure != Oversampling::Skipped {
        t += 2300 * pressure.factor() + 575;
    }
    t
}

/// [`max_measurement_time_us`] rounded up to whole milliseconds, suitable as the wait of a
/// forced-mode measurement.
pub fn measurement_time_ms(temperature: Oversampling, pressure: Oversampling) -> u32 {
    (max_measurement_time_us(temperature, pressure) + 999) / 1000
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn oversampling_roundtrip() {
        for os in Oversampling::ALL {
            let bits: u8 = os.into();
            assert_eq!(os, Oversampling::from_bits(bits));
            assert_eq!(Ok(os), Oversampling::try_from(bits));

            let reg = OSRS_T.insert(0xFF, bits);
            assert_eq!(os, CtrlMeas::from(reg).temperature_oversampling);
            let reg = OSRS_P.insert(0x00, bits);
            assert_eq!(os, CtrlMeas::from(reg).pressure_oversampling);
        }
    }

    #[test]
    fn reserved_oversampling_decodes_as_x16() {
        assert_eq!(Oversampling::X16, Oversampling::from_bits(6));
        assert_eq!(Oversampling::X16, Oversampling::from_bits(7));
    }

    #[test]
    fn invalid_raw_values_rejected() {
        assert_eq!(Err(Error::InvalidArgument), Oversampling::try_from(6));
        assert_eq!(Err(Error::InvalidArgument), Oversampling::try_from(0x42));
        assert_eq!(Err(Error::InvalidArgument), Oversampling::try_from(0x24));
        assert_eq!(Err(Error::InvalidArgument), PowerMode::try_from(0b10));
        assert_eq!(Err(Error::InvalidArgument), PowerMode::try_from(4));
    }

    #[test]
    fn power_mode_roundtrip() {
        for mode in [PowerMode::Sleep, PowerMode::Forced, PowerMode::Normal] {
            assert_eq!(Ok(mode), PowerMode::try_from(u8::from(mode)));
        }
        assert_eq!(PowerMode::Forced, PowerMode::from_bits(0b10));
    }

    #[test]
    fn ctrl_meas_encoding() {
        let reg = CtrlMeas {
            temperature_oversampling: Oversampling::X2,
            pressure_oversampling: Oversampling::X16,
            mode: PowerMode::Normal,
        };
        assert_eq!(0b010_101_11, u8::from(reg));
        assert_eq!(reg, CtrlMeas::from(0b010_101_11));
    }

    #[test]
    fn measurement_times() {
        // ultra low power: 6.4 ms max
        assert_eq!(6425, max_measurement_time_us(Oversampling::X1, Oversampling::X1));
        assert_eq!(7, measurement_time_ms(Oversampling::X1, Oversampling::X1));
        // ultra high resolution: 43.2 ms max
        assert_eq!(43225, max_measurement_time_us(Oversampling::X2, Oversampling::X16));
        assert_eq!(44, measurement_time_ms(Oversampling::X2, Oversampling::X16));
        assert_eq!(3550, max_measurement_time_us(Oversampling::X1, Oversampling::Skipped));
        assert_eq!(4, measurement_time_ms(Oversampling::X1, Oversampling::Skipped));
    }
}
