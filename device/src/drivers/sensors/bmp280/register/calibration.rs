use crate::domain::Measurement;

/// 24-byte block of calibration starting at dig_T1 lsb.
pub const CALIBRATION: u8 = 0x88;
pub const CALIBRATION_LEN: usize = 24;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Calibration {
    pub temperature: TemperatureCalibration,
    pub pressure: PressureCalibration,
}

impl Calibration {
    /// Compensate raw ADC samples. The pressure is only computed when a raw pressure sample is
    /// given.
    pub fn compensate(&self, adc_t: i32, adc_p: Option<i32>) -> Measurement {
        let fine = self.temperature.t_fine(adc_t);
        Measurement {
            temperature: TemperatureCalibration::temperature(fine),
            pressure: adc_p.map(|adc_p| self.pressure.calibrated(fine, adc_p)),
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TemperatureCalibration {
    pub t1: u16,
    pub t2: i16,
    pub t3: i16,
}

impl TemperatureCalibration {
    /// Fine resolution temperature, carried into the pressure compensation.
    pub fn t_fine(&self, adc_t: i32) -> i32 {
        let t1 = self.t1 as i32;
        let t2 = self.t2 as i32;
        let t3 = self.t3 as i32;

        let var1 = ((adc_t >> 3).wrapping_sub(t1 << 1)).wrapping_mul(t2) >> 11;
        let delta = (adc_t >> 4).wrapping_sub(t1);
        let var2 = ((delta.wrapping_mul(delta) >> 12).wrapping_mul(t3)) >> 14;
        var1.wrapping_add(var2)
    }

    /// Temperature in 0.01 °C from the fine resolution value.
    pub fn temperature(t_fine: i32) -> i32 {
        t_fine.wrapping_mul(5).wrapping_add(128) >> 8
    }

    /// Temperature in 0.01 °C.
    pub fn calibrated(&self, adc_t: i32) -> i32 {
        Self::temperature(self.t_fine(adc_t))
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PressureCalibration {
    pub p1: u16,
    pub p2: i16,
    pub p3: i16,
    pub p4: i16,
    pub p5: i16,
    pub p6: i16,
    pub p7: i16,
    pub p8: i16,
    pub p9: i16,
}

impl PressureCalibration {
    /// Pressure in Pa as unsigned Q24.8, 0 if the coefficients would divide by zero.
    pub fn calibrated(&self, t_fine: i32, adc_p: i32) -> u32 {
        let p1 = self.p1 as i64;
        let p2 = self.p2 as i64;
        let p3 = self.p3 as i64;
        let p4 = self.p4 as i64;
        let p5 = self.p5 as i64;
        let p6 = self.p6 as i64;
        let p7 = self.p7 as i64;
        let p8 = self.p8 as i64;
        let p9 = self.p9 as i64;

        let var1 = (t_fine as i64).wrapping_sub(128000);
        let var2 = var1.wrapping_mul(var1).wrapping_mul(p6);
        let var2 = var2.wrapping_add(var1.wrapping_mul(p5) << 17);
        let var2 = var2.wrapping_add(p4 << 35);
        let var1 = (var1.wrapping_mul(var1).wrapping_mul(p3) >> 8)
            .wrapping_add(var1.wrapping_mul(p2) << 12);
        let var1 = ((1i64 << 47).wrapping_add(var1)).wrapping_mul(p1) >> 33;
        if var1 == 0 {
            return 0;
        }

        let p = 1048576i64.wrapping_sub(adc_p as i64);
        let p = ((p << 31).wrapping_sub(var2))
            .wrapping_mul(3125)
            .wrapping_div(var1);
        let var1 = p9.wrapping_mul(p >> 13).wrapping_mul(p >> 13) >> 25;
        let var2 = p8.wrapping_mul(p) >> 19;
        let p = (p.wrapping_add(var1).wrapping_add(var2) >> 8).wrapping_add(p7 << 4);
        p as u32
    }
}

impl From<[u8; CALIBRATION_LEN]> for Calibration {
    fn from(buf: [u8; CALIBRATION_LEN]) -> Self {
        let u = |i: usize| u16::from_le_bytes([buf[i], buf[i + 1]]);
        let s = |i: usize| i16::from_le_bytes([buf[i], buf[i + 1]]);

        let temperature = TemperatureCalibration {
            t1: u(0),
            t2: s(2),
            t3: s(4),
        };

        let pressure = PressureCalibration {
            p1: u(6),
            p2: s(8),
            p3: s(10),
            p4: s(12),
            p5: s(14),
            p6: s(16),
            p7: s(18),
            p8: s(20),
            p9: s(22),
        };

        Calibration {
            temperature,
            pressure,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::drivers::sensors::bmp280::register::data::raw_sample;

    const BLOCK: [u8; CALIBRATION_LEN] = [
        0x70, 0x6B, 0x43, 0x67, 0x18, 0xFC, 0x7D, 0x8E, 0x43, 0xD6, 0xD0, 0x0B, 0x27, 0x0B, 0x8C,
        0x00, 0xF9, 0xFF, 0x8C, 0x3C, 0xF8, 0xC6, 0x70, 0x17,
    ];

    const ALT_BLOCK: [u8; CALIBRATION_LEN] = [
        0x82, 0x6B, 0x53, 0x67, 0x18, 0xFB, 0x7F, 0x8E, 0x43, 0xD6, 0xD0, 0x0B, 0x27, 0x0B, 0x9C,
        0x00, 0xF9, 0xFF, 0x80, 0x3C, 0xF8, 0xC6, 0x70, 0x17,
    ];

    #[test]
    fn parse_block() {
        let calibration = Calibration::from(BLOCK);
        assert_eq!(
            TemperatureCalibration {
                t1: 27504,
                t2: 26435,
                t3: -1000
            },
            calibration.temperature
        );
        assert_eq!(
            PressureCalibration {
                p1: 36477,
                p2: -10685,
                p3: 3024,
                p4: 2855,
                p5: 140,
                p6: -7,
                p7: 15500,
                p8: -14600,
                p9: 6000,
            },
            calibration.pressure
        );
    }

    #[test]
    fn compensate_reference_sample() {
        let calibration = Calibration::from(BLOCK);
        let m = calibration.compensate(
            raw_sample([0x7E, 0xED, 0x00]),
            Some(raw_sample([0x65, 0x5A, 0xC0])),
        );
        assert_eq!(2508, m.temperature);
        assert_eq!(Some(25767233), m.pressure);
    }

    #[test]
    fn compensate_colder_sample() {
        let calibration = Calibration::from(BLOCK);
        let m = calibration.compensate(
            raw_sample([0x7A, 0x12, 0x00]),
            Some(raw_sample([0x55, 0x73, 0x00])),
        );
        assert_eq!(1885, m.temperature);
        assert_eq!(Some(28376756), m.pressure);
    }

    #[test]
    fn compensate_other_device() {
        let calibration = Calibration::from(ALT_BLOCK);
        assert_eq!(27522, calibration.temperature.t1);
        assert_eq!(-1256, calibration.temperature.t3);
        assert_eq!(15488, calibration.pressure.p7);
        let m = calibration.compensate(
            raw_sample([0x7E, 0xED, 0x00]),
            Some(raw_sample([0x65, 0x5A, 0xC0])),
        );
        assert_eq!(2499, m.temperature);
        assert_eq!(Some(25761933), m.pressure);
    }

    #[test]
    fn temperature_only() {
        let calibration = Calibration::from(BLOCK);
        let m = calibration.compensate(raw_sample([0x7E, 0xED, 0x00]), None);
        assert_eq!(2508, m.temperature);
        assert_eq!(None, m.pressure);
        assert_eq!(2508, calibration.temperature.calibrated(519888));
    }

    #[test]
    fn zero_p1_yields_zero_pressure() {
        let mut calibration = Calibration::from(BLOCK);
        calibration.pressure.p1 = 0;
        let m = calibration.compensate(
            raw_sample([0x7E, 0xED, 0x00]),
            Some(raw_sample([0x65, 0x5A, 0xC0])),
        );
        assert_eq!(2508, m.temperature);
        assert_eq!(Some(0), m.pressure);
    }
}
