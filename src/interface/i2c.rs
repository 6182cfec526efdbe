//! I2C interface implementation built on top of `embedded-hal` `I2c`.

use embedded_hal::i2c::{I2c, Operation, SevenBitAddress};

use super::L3gd20hInterface;
use crate::params::AddressPin;

// Register sub-address flag enabling address auto-increment on bursts.
const AUTO_INCREMENT_FLAG: u8 = 1 << 7;

/// I2C-based interface implementation for the L3GD20H driver.
pub struct I2cInterface<I2C> {
    i2c: I2C,
    address: SevenBitAddress,
}

impl<I2C> I2cInterface<I2C> {
    /// Creates a new interface for the target selected by the SDO pin.
    pub const fn new(i2c: I2C, addr_pin: AddressPin) -> Self {
        Self {
            i2c,
            address: addr_pin.address(),
        }
    }

    /// Applies the auto-increment flag for multi-byte transfers.
    fn sub_address(register: u8, burst: bool) -> u8 {
        if burst {
            register | AUTO_INCREMENT_FLAG
        } else {
            register
        }
    }

    /// Provides mutable access to the wrapped I2C bus.
    pub fn i2c_mut(&mut self) -> &mut I2C {
        &mut self.i2c
    }

    /// Consumes the interface and returns the owned I2C bus.
    pub fn release(self) -> I2C {
        self.i2c
    }
}

impl<I2C> L3gd20hInterface for I2cInterface<I2C>
where
    I2C: I2c,
{
    type Error = I2C::Error;

    fn write_register(&mut self, register: u8, value: u8) -> core::result::Result<(), Self::Error> {
        self.i2c.write(self.address, &[register, value])
    }

    fn read_register(&mut self, register: u8) -> core::result::Result<u8, Self::Error> {
        let mut value = [0u8; 1];
        self.read_many(register, &mut value)?;
        Ok(value[0])
    }

    fn read_many(&mut self, register: u8, buf: &mut [u8]) -> core::result::Result<(), Self::Error> {
        if buf.is_empty() {
            return Ok(());
        }

        let sub = [Self::sub_address(register, buf.len() > 1)];
        self.i2c.write_read(self.address, &sub, buf)
    }

    fn write_many(&mut self, register: u8, data: &[u8]) -> core::result::Result<(), Self::Error> {
        if data.is_empty() {
            return Ok(());
        }

        let sub = [Self::sub_address(register, data.len() > 1)];
        let mut operations = [Operation::Write(&sub), Operation::Write(data)];
        self.i2c.transaction(self.address, &mut operations)
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::I2cInterface;
    use crate::interface::L3gd20hInterface;
    use crate::params::AddressPin;
    use embedded_hal_mock::eh1::i2c::{Mock as I2cMock, Transaction};
    use std::vec;

    const ADDR: u8 = 0x6A;

    #[test]
    fn read_register_issues_write_read() {
        let expectations = [Transaction::write_read(ADDR, vec![0x0F], vec![0xD7])];
        let mut interface = I2cInterface::new(I2cMock::new(&expectations), AddressPin::SdoLow);

        let value = interface.read_register(0x0F).unwrap();
        assert_eq!(value, 0xD7);

        interface.release().done();
    }

    #[test]
    fn read_many_sets_auto_increment_flag() {
        let expectations = [Transaction::write_read(
            ADDR,
            vec![0xA8],
            vec![0x01, 0x02, 0x03, 0x04, 0x05, 0x06],
        )];
        let mut interface = I2cInterface::new(I2cMock::new(&expectations), AddressPin::SdoLow);

        let mut buffer = [0u8; 6];
        interface.read_many(0x28, &mut buffer).unwrap();
        assert_eq!(buffer, [0x01, 0x02, 0x03, 0x04, 0x05, 0x06]);

        interface.release().done();
    }

    #[test]
    fn write_register_sends_sub_address_and_value() {
        let expectations = [Transaction::write(ADDR, vec![0x20, 0x0F])];
        let mut interface = I2cInterface::new(I2cMock::new(&expectations), AddressPin::SdoLow);

        interface.write_register(0x20, 0x0F).unwrap();

        interface.release().done();
    }

    #[test]
    fn write_many_uses_one_transaction() {
        let expectations = [
            Transaction::transaction_start(ADDR),
            Transaction::write(ADDR, vec![0xB2]),
            Transaction::write(ADDR, vec![0x12, 0x34]),
            Transaction::transaction_end(ADDR),
        ];
        let mut interface = I2cInterface::new(I2cMock::new(&expectations), AddressPin::SdoLow);

        interface.write_many(0x32, &[0x12, 0x34]).unwrap();

        interface.release().done();
    }

    #[test]
    fn high_address_pin_targets_alternate_device() {
        let expectations = [Transaction::write_read(0x6B, vec![0x0F], vec![0xD7])];
        let mut interface = I2cInterface::new(I2cMock::new(&expectations), AddressPin::SdoHigh);

        let value = interface.read_register(0x0F).unwrap();
        assert_eq!(value, 0xD7);

        interface.release().done();
    }
}
