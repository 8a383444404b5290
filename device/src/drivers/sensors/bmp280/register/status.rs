pub const STATUS: u8 = 0xF3;

const MEASURING: u8 = 0b1000;
const IM_UPDATE: u8 = 0b0001;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Status {
    measuring: bool,
    im_update: bool,
}

impl Status {
    /// A conversion is running.
    pub fn measuring(&self) -> bool {
        self.measuring
    }

    /// NVM data is being copied to the image registers.
    pub fn im_update(&self) -> bool {
        self.im_update
    }

    pub fn is_idle(&self) -> bool {
        !(self.measuring || self.im_update)
    }
}

impl From<u8> for Status {
    fn from(reg: u8) -> Self {
        Status {
            measuring: (reg & MEASURING) != 0,
            im_update: (reg & IM_UPDATE) != 0,
        }
    }
}
