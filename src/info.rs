//! Static chip and driver metadata.

/// Driver version, major * 1000 + minor * 100 + patch.
const DRIVER_VERSION: u32 = 100;

/// Static metadata describing the chip and this driver.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DriverInfo {
    /// Chip name.
    pub chip_name: &'static str,
    /// Manufacturer name.
    pub manufacturer: &'static str,
    /// Supported bus interfaces.
    pub interface: &'static str,
    /// Minimum supply voltage in volts.
    pub supply_voltage_min_v: f32,
    /// Maximum supply voltage in volts.
    pub supply_voltage_max_v: f32,
    /// Maximum current draw in milliamperes.
    pub max_current_ma: f32,
    /// Minimum operating temperature in degrees Celsius.
    pub temperature_min_c: f32,
    /// Maximum operating temperature in degrees Celsius.
    pub temperature_max_c: f32,
    /// Driver version code.
    pub driver_version: u32,
}

/// Returns the static chip and driver metadata.
pub const fn info() -> DriverInfo {
    DriverInfo {
        chip_name: "L3GD20H",
        manufacturer: "STMicroelectronics",
        interface: "IIC SPI",
        supply_voltage_min_v: 2.2,
        supply_voltage_max_v: 3.6,
        max_current_ma: 5.0,
        temperature_min_c: -40.0,
        temperature_max_c: 85.0,
        driver_version: DRIVER_VERSION,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn metadata_matches_datasheet_limits() {
        let info = info();
        assert_eq!(info.chip_name, "L3GD20H");
        assert_eq!(info.manufacturer, "STMicroelectronics");
        assert!(info.supply_voltage_min_v < info.supply_voltage_max_v);
        assert!(info.temperature_min_c < info.temperature_max_c);
    }
}
