use super::Field;
use crate::error::Error;
use core::convert::TryFrom;

pub const CONFIG: u8 = 0xF5;

/// t_sb, bits [7:5]
pub const T_SB: Field = Field::new(5, 3);
/// filter, bits [4:2]
pub const FILTER: Field = Field::new(2, 3);
/// spi3w_en, bit 0
pub const SPI3W_EN: Field = Field::new(0, 1);

/// IIR filter coefficient.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FilterCoefficient {
    Off,
    X2,
    X4,
    X8,
    X16,
}

impl FilterCoefficient {
    pub const ALL: [FilterCoefficient; 5] = [
        FilterCoefficient::Off,
        FilterCoefficient::X2,
        FilterCoefficient::X4,
        FilterCoefficient::X8,
        FilterCoefficient::X16,
    ];

    /// Decode the 3-bit field value. Encodings 5 to 7 also select x16.
    pub fn from_bits(bits: u8) -> Self {
        match bits & 0b111 {
            0 => FilterCoefficient::Off,
            1 => FilterCoefficient::X2,
            2 => FilterCoefficient::X4,
            3 => FilterCoefficient::X8,
            _ => FilterCoefficient::X16,
        }
    }
}

impl From<FilterCoefficient> for u8 {
    fn from(coefficient: FilterCoefficient) -> Self {
        match coefficient {
            FilterCoefficient::Off => 0,
            FilterCoefficient::X2 => 1,
            FilterCoefficient::X4 => 2,
            FilterCoefficient::X8 => 3,
            FilterCoefficient::X16 => 4,
        }
    }
}

impl TryFrom<u8> for FilterCoefficient {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0..=4 => Ok(Self::from_bits(value)),
            _ => Err(Error::InvalidArgument),
        }
    }
}

/// Whether the 3-wire SPI interface is enabled.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Spi3Wire {
    Disabled,
    Enabled,
}

impl From<Spi3Wire> for u8 {
    fn from(mode: Spi3Wire) -> Self {
        match mode {
            Spi3Wire::Disabled => 0,
            Spi3Wire::Enabled => 1,
        }
    }
}

impl From<bool> for Spi3Wire {
    fn from(enabled: bool) -> Self {
        if enabled {
            Spi3Wire::Enabled
        } else {
            Spi3Wire::Disabled
        }
    }
}

impl TryFrom<u8> for Spi3Wire {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Spi3Wire::Disabled),
            1 => Ok(Spi3Wire::Enabled),
            _ => Err(Error::InvalidArgument),
        }
    }
}

/// Inactive period between two conversions in normal mode.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StandbyTime {
    Ms0_5,
    Ms62_5,
    Ms125,
    Ms250,
    Ms500,
    Ms1000,
    Ms2000,
    Ms4000,
}

impl StandbyTime {
    /// Standby duration in microseconds.
    pub fn micros(&self) -> u32 {
        match self {
            StandbyTime::Ms0_5 => 500,
            StandbyTime::Ms62_5 => 62_500,
            StandbyTime::Ms125 => 125_000,
            StandbyTime::Ms250 => 250_000,
            StandbyTime::Ms500 => 500_000,
            StandbyTime::Ms1000 => 1_000_000,
            StandbyTime::Ms2000 => 2_000_000,
            StandbyTime::Ms4000 => 4_000_000,
        }
    }

    pub fn from_bits(bits: u8) -> Self {
        match bits & 0b111 {
            0 => StandbyTime::Ms0_5,
            1 => StandbyTime::Ms62_5,
            2 => StandbyTime::Ms125,
            3 => StandbyTime::Ms250,
            4 => StandbyTime::Ms500,
            5 => StandbyTime::Ms1000,
            6 => StandbyTime::Ms2000,
            _ => StandbyTime::Ms4000,
        }
    }
}

impl From<StandbyTime> for u8 {
    fn from(time: StandbyTime) -> Self {
        match time {
            StandbyTime::Ms0_5 => 0,
            StandbyTime::Ms62_5 => 1,
            StandbyTime::Ms125 => 2,
            StandbyTime::Ms250 => 3,
            StandbyTime::Ms500 => 4,
            StandbyTime::Ms1000 => 5,
            StandbyTime::Ms2000 => 6,
            StandbyTime::Ms4000 => 7,
        }
    }
}

impl TryFrom<u8> for StandbyTime {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0..=7 => Ok(Self::from_bits(value)),
            _ => Err(Error::InvalidArgument),
        }
    }
}

/// Decoded content of the config register.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Config {
    pub standby_time: StandbyTime,
    pub filter: FilterCoefficient,
    pub spi_3_wire: Spi3Wire,
}

impl From<u8> for Config {
    fn from(reg: u8) -> Self {
        Config {
            standby_time: StandbyTime::from_bits(T_SB.extract(reg)),
            filter: FilterCoefficient::from_bits(FILTER.extract(reg)),
            spi_3_wire: (SPI3W_EN.extract(reg) != 0).into(),
        }
    }
}

impl From<Config> for u8 {
    fn from(reg: Config) -> Self {
        let value = T_SB.insert(0, reg.standby_time.into());
        let value = FILTER.insert(value, reg.filter.into());
        SPI3W_EN.insert(value, reg.spi_3_wire.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filter_update() {
        let update = |reg: u8, f: FilterCoefficient| FILTER.insert(reg, f.into());
        assert_eq!(0x80, update(0x88, FilterCoefficient::Off));
        assert_eq!(0xE3, update(0xFF, FilterCoefficient::Off));
        assert_eq!(0x46, update(0x5A, FilterCoefficient::X2));
        assert_eq!(0x08, update(0x00, FilterCoefficient::X4));
        assert_eq!(0x2F, update(0x33, FilterCoefficient::X8));
        assert_eq!(0x50, update(0x44, FilterCoefficient::X16));
    }

    #[test]
    fn spi_3_wire_update() {
        let update = |reg: u8, w: Spi3Wire| SPI3W_EN.insert(reg, w.into());
        assert_eq!(0x88, update(0x89, Spi3Wire::Disabled));
        assert_eq!(0xF0, update(0xF0, Spi3Wire::Disabled));
        assert_eq!(0xFF, update(0xFE, Spi3Wire::Enabled));
        assert_eq!(0xE1, update(0xE1, Spi3Wire::Enabled));
    }

    #[test]
    fn reserved_filter_decodes_as_x16() {
        for bits in 5..8 {
            assert_eq!(FilterCoefficient::X16, FilterCoefficient::from_bits(bits));
        }
        assert_eq!(Err(Error::InvalidArgument), FilterCoefficient::try_from(5));
        assert_eq!(Err(Error::InvalidArgument), FilterCoefficient::try_from(0x56));
    }

    #[test]
    fn config_roundtrip() {
        let reg = Config {
            standby_time: StandbyTime::Ms1000,
            filter: FilterCoefficient::X4,
            spi_3_wire: Spi3Wire::Enabled,
        };
        assert_eq!(0b101_010_01, u8::from(reg));
        assert_eq!(reg, Config::from(0b101_010_01));
        assert_eq!(1_000_000, reg.standby_time.micros());
        assert_eq!(Err(Error::InvalidArgument), StandbyTime::try_from(8));
        assert_eq!(Err(Error::InvalidArgument), Spi3Wire::try_from(2));
    }
}
