//! Bus interface abstraction for the L3GD20H driver.

pub mod i2c;
pub mod spi;

/// Abstraction over the low-level bus access required by the driver.
///
/// `open`/`close` bracket the driver lifecycle for transports that need
/// explicit acquisition; the provided implementations are no-ops because
/// `embedded-hal` buses arrive already configured.
pub trait L3gd20hInterface {
    /// Error type produced by the concrete bus implementation.
    type Error;

    /// Acquires the transport before first use.
    fn open(&mut self) -> core::result::Result<(), Self::Error> {
        Ok(())
    }

    /// Releases the transport after the device has been shut down.
    fn close(&mut self) -> core::result::Result<(), Self::Error> {
        Ok(())
    }

    /// Writes a single register.
    fn write_register(&mut self, register: u8, value: u8) -> core::result::Result<(), Self::Error>;

    /// Reads a single register.
    fn read_register(&mut self, register: u8) -> core::result::Result<u8, Self::Error>;

    /// Reads multiple consecutive registers into the provided buffer.
    fn read_many(&mut self, register: u8, buf: &mut [u8]) -> core::result::Result<(), Self::Error>;

    /// Writes multiple consecutive registers from the provided buffer.
    fn write_many(&mut self, register: u8, data: &[u8]) -> core::result::Result<(), Self::Error>;
}
