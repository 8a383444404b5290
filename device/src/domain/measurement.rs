//! Compensated readings in fixed-point units.

use core::fmt::{Debug, Display, Formatter};

/// One compensated forced-mode reading.
///
/// Temperature is in hundredths of a degree Celsius (`5123` is 51.23 °C). Pressure is in pascal
/// as a Q24.8 fixed-point value (`24674867` is 24674867 / 256 = 96386.2 Pa) and is only present
/// when the reading included pressure.
#[derive(Copy, Clone, PartialEq, Eq)]
pub struct Measurement {
    pub temperature: i32,
    pub pressure: Option<u32>,
}

impl Measurement {
    pub fn temperature(&self) -> i32 {
        self.temperature
    }

    pub fn pressure(&self) -> Option<u32> {
        self.pressure
    }

    /// Pressure truncated to whole pascal.
    pub fn pressure_pa(&self) -> Option<u32> {
        self.pressure.map(|p| p >> 8)
    }
}

impl Debug for Measurement {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Measurement")
            .field("temperature", &self.temperature)
            .field("pressure", &self.pressure)
            .finish()
    }
}

impl Display for Measurement {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        let sign = if self.temperature < 0 { "-" } else { "" };
        let centi = self.temperature.unsigned_abs();
        write!(f, "{}{}.{:02}°C", sign, centi / 100, centi % 100)?;
        if let Some(p) = self.pressure {
            // two decimals of the 8 fractional bits
            let hundredths = ((p & 0xFF) * 100) >> 8;
            write!(f, " {}.{:02}Pa", p >> 8, hundredths)?;
        }
        Ok(())
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Measurement {
    fn format(&self, f: defmt::Formatter<'_>) {
        defmt::write!(
            f,
            "Measurement(temperature: {}, pressure: {})",
            &self.temperature,
            &self.pressure
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_fixed_point() {
        let m = Measurement {
            temperature: 2508,
            pressure: Some(25767233),
        };
        assert_eq!("25.08°C 100653.25Pa", format!("{}", m));
        assert_eq!(Some(100653), m.pressure_pa());
    }

    #[test]
    fn display_negative_temperature_only() {
        let m = Measurement {
            temperature: -705,
            pressure: None,
        };
        assert_eq!("-7.05°C", format!("{}", m));
        assert_eq!(None, m.pressure_pa());
    }
}
