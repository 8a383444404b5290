use crate::error::Error;
use core::convert::TryFrom;

/// press_msb; pressure and temperature data are contiguous from here.
pub const PRESSURE: u8 = 0xF7;
/// temp_msb
pub const TEMPERATURE: u8 = 0xFA;

/// Which outputs a forced-mode measurement reads back.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MeasurementKind {
    Temperature,
    TemperatureAndPressure,
}

impl MeasurementKind {
    /// First data register to read.
    pub fn start(&self) -> u8 {
        match self {
            MeasurementKind::Temperature => TEMPERATURE,
            MeasurementKind::TemperatureAndPressure => PRESSURE,
        }
    }

    /// Number of data bytes to read.
    pub fn len(&self) -> usize {
        match self {
            MeasurementKind::Temperature => 3,
            MeasurementKind::TemperatureAndPressure => 6,
        }
    }

    pub fn has_pressure(&self) -> bool {
        matches!(self, MeasurementKind::TemperatureAndPressure)
    }
}

impl From<MeasurementKind> for u8 {
    fn from(kind: MeasurementKind) -> Self {
        match kind {
            MeasurementKind::Temperature => 0,
            MeasurementKind::TemperatureAndPressure => 1,
        }
    }
}

impl TryFrom<u8> for MeasurementKind {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(MeasurementKind::Temperature),
            1 => Ok(MeasurementKind::TemperatureAndPressure),
            _ => Err(Error::InvalidArgument),
        }
    }
}

/// 20-bit ADC sample from its msb, lsb and xlsb registers.
pub fn raw_sample(bytes: [u8; 3]) -> i32 {
    ((bytes[0] as i32) << 12) | ((bytes[1] as i32) << 4) | ((bytes[2] as i32) >> 4)
}

/// Raw (temperature, pressure) samples out of a data block read for `kind`.
///
/// Returns `None` if `data` is not exactly `kind.len()` bytes.
pub fn split(kind: MeasurementKind, data: &[u8]) -> Option<(i32, Option<i32>)> {
    match (kind, data) {
        (MeasurementKind::Temperature, [t0, t1, t2]) => Some((raw_sample([*t0, *t1, *t2]), None)),
        (MeasurementKind::TemperatureAndPressure, [p0, p1, p2, t0, t1, t2]) => Some((
            raw_sample([*t0, *t1, *t2]),
            Some(raw_sample([*p0, *p1, *p2])),
        )),
        _ => None,
    }
}
