use super::Token;

/// A failed register transaction.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct IoError;

/// Asynchronous access to the sensor's register map.
///
/// Implementations start the transaction and return immediately. Once it finishes, the
/// integration layer reports the outcome to the driver together with the `token` it was given,
/// from the same execution context that issues driver commands.
///
/// For SPI, the implementation is responsible for setting or clearing bit 7 of the register
/// address; the driver always passes the plain register address.
pub trait RegisterBus {
    /// Read `len` consecutive registers starting at `start`.
    fn read_registers(&mut self, start: u8, len: usize, token: Token);

    /// Write `value` into the register at `address`.
    fn write_register(&mut self, address: u8, value: u8, token: Token);
}

impl<B: RegisterBus + ?Sized> RegisterBus for &mut B {
    fn read_registers(&mut self, start: u8, len: usize, token: Token) {
        B::read_registers(self, start, len, token)
    }

    fn write_register(&mut self, address: u8, value: u8, token: Token) {
        B::write_register(self, address, value, token)
    }
}
