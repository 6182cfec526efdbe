//! Configuration primitives for the L3GD20H driver.

use crate::params::{
    Endianness, FifoMode, FilterPath, FullScale, HighPassCutoff, HighPassMode, Mode, RateBandwidth,
    SelfTestMode, SpiWire,
};

/// Largest FIFO threshold accepted by `FIFO_CTRL.FTH`.
pub const MAX_FIFO_THRESHOLD: u8 = 31;

/// User-facing configuration for the L3GD20H sensor.
///
/// Mirrors the register state the driver programs; the driver keeps its copy
/// in sync with the device after every successful write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    /// Operating mode applied after initialization.
    pub mode: Mode,
    /// Output data rate and bandwidth selection.
    pub rate_bandwidth: RateBandwidth,
    /// X axis enable.
    pub x_axis: bool,
    /// Y axis enable.
    pub y_axis: bool,
    /// Z axis enable.
    pub z_axis: bool,
    /// Edge-sensitive (external) trigger enable.
    pub edge_trigger: bool,
    /// Level-sensitive trigger enable.
    pub level_trigger: bool,
    /// High-pass filter mode.
    pub high_pass_mode: HighPassMode,
    /// High-pass filter cut-off frequency code.
    pub high_pass_cutoff: HighPassCutoff,
    /// High-pass filter stage enable.
    pub high_pass_filter: bool,
    /// High-pass filter reference value.
    pub high_pass_reference: u8,
    /// Block data update until both sample bytes are read.
    pub block_data_update: bool,
    /// Raw data byte order.
    pub endianness: Endianness,
    /// Full-scale angular-rate range.
    pub full_scale: FullScale,
    /// Latch level-sensitive interrupt requests.
    pub level_sensitive_latched: bool,
    /// Self-test actuation mode.
    pub self_test: SelfTestMode,
    /// SPI wire count.
    pub spi_wire: SpiWire,
    /// Filter chain feeding the data output registers.
    pub out_selection: FilterPath,
    /// Filter chain feeding the interrupt generator.
    pub interrupt_selection: FilterPath,
    /// FIFO enable.
    pub fifo_enable: bool,
    /// FIFO operating mode.
    pub fifo_mode: FifoMode,
    /// FIFO threshold level in samples.
    pub fifo_threshold: u8,
    /// Stop collecting FIFO samples at the threshold level.
    pub stop_on_fifo_threshold: bool,
}

impl Config {
    /// Begins building a [`Config`] using the builder pattern.
    pub fn new() -> ConfigBuilder {
        ConfigBuilder::new()
    }

    /// Checks whether this configuration is valid according to datasheet rules.
    pub fn validate(&self) -> core::result::Result<(), ConfigError> {
        if self.fifo_threshold > MAX_FIFO_THRESHOLD {
            return Err(ConfigError::FifoThresholdTooLarge);
        }

        Ok(())
    }
}

/// Builder for [`Config`] allowing piecemeal construction.
#[derive(Debug, Clone, Copy)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Creates a new builder seeded with [`Config::default()`].
    pub fn new() -> Self {
        Self {
            config: Config::default(),
        }
    }

    /// Overrides the operating mode.
    pub fn mode(mut self, mode: Mode) -> Self {
        self.config.mode = mode;
        self
    }

    /// Overrides the data rate and bandwidth selection.
    pub fn rate_bandwidth(mut self, rate_bandwidth: RateBandwidth) -> Self {
        self.config.rate_bandwidth = rate_bandwidth;
        self
    }

    /// Selects which axes produce output.
    pub fn axes(mut self, x: bool, y: bool, z: bool) -> Self {
        self.config.x_axis = x;
        self.config.y_axis = y;
        self.config.z_axis = z;
        self
    }

    /// Enables the edge-sensitive trigger.
    pub fn edge_trigger(mut self, enable: bool) -> Self {
        self.config.edge_trigger = enable;
        self
    }

    /// Enables the level-sensitive trigger.
    pub fn level_trigger(mut self, enable: bool) -> Self {
        self.config.level_trigger = enable;
        self
    }

    /// Sets the high-pass filter mode.
    pub fn high_pass_mode(mut self, mode: HighPassMode) -> Self {
        self.config.high_pass_mode = mode;
        self
    }

    /// Sets the high-pass filter cut-off frequency code.
    pub fn high_pass_cutoff(mut self, cutoff: HighPassCutoff) -> Self {
        self.config.high_pass_cutoff = cutoff;
        self
    }

    /// Enables the high-pass filter stage.
    pub fn high_pass_filter(mut self, enable: bool) -> Self {
        self.config.high_pass_filter = enable;
        self
    }

    /// Sets the high-pass filter reference value.
    pub fn high_pass_reference(mut self, reference: u8) -> Self {
        self.config.high_pass_reference = reference;
        self
    }

    /// Enables block data update.
    pub fn block_data_update(mut self, enable: bool) -> Self {
        self.config.block_data_update = enable;
        self
    }

    /// Sets the raw data byte order.
    pub fn endianness(mut self, endianness: Endianness) -> Self {
        self.config.endianness = endianness;
        self
    }

    /// Sets the full-scale range.
    pub fn full_scale(mut self, full_scale: FullScale) -> Self {
        self.config.full_scale = full_scale;
        self
    }

    /// Latches level-sensitive interrupt requests.
    pub fn level_sensitive_latched(mut self, enable: bool) -> Self {
        self.config.level_sensitive_latched = enable;
        self
    }

    /// Sets the self-test actuation mode.
    pub fn self_test(mut self, self_test: SelfTestMode) -> Self {
        self.config.self_test = self_test;
        self
    }

    /// Sets the SPI wire count.
    pub fn spi_wire(mut self, spi_wire: SpiWire) -> Self {
        self.config.spi_wire = spi_wire;
        self
    }

    /// Selects the filter chain feeding the output registers.
    pub fn out_selection(mut self, selection: FilterPath) -> Self {
        self.config.out_selection = selection;
        self
    }

    /// Selects the filter chain feeding the interrupt generator.
    pub fn interrupt_selection(mut self, selection: FilterPath) -> Self {
        self.config.interrupt_selection = selection;
        self
    }

    /// Enables the FIFO.
    pub fn fifo_enable(mut self, enable: bool) -> Self {
        self.config.fifo_enable = enable;
        self
    }

    /// Sets the FIFO operating mode.
    pub fn fifo_mode(mut self, mode: FifoMode) -> Self {
        self.config.fifo_mode = mode;
        self
    }

    /// Sets the FIFO threshold level.
    pub fn fifo_threshold(mut self, threshold: u8) -> Self {
        self.config.fifo_threshold = threshold;
        self
    }

    /// Stops FIFO collection at the threshold level.
    pub fn stop_on_fifo_threshold(mut self, enable: bool) -> Self {
        self.config.stop_on_fifo_threshold = enable;
        self
    }

    /// Finalizes the builder and returns the [`Config`].
    pub fn build(self) -> Config {
        self.config
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            mode: Mode::Normal,
            rate_bandwidth: RateBandwidth::Odr100HzBw0,
            x_axis: true,
            y_axis: true,
            z_axis: true,
            edge_trigger: false,
            level_trigger: false,
            high_pass_mode: HighPassMode::Normal,
            high_pass_cutoff: HighPassCutoff::Cutoff0,
            high_pass_filter: true,
            high_pass_reference: 0x00,
            block_data_update: false,
            endianness: Endianness::Little,
            full_scale: FullScale::Dps245,
            level_sensitive_latched: true,
            self_test: SelfTestMode::Normal,
            spi_wire: SpiWire::Four,
            out_selection: FilterPath::Lpf1HpfLpf2,
            interrupt_selection: FilterPath::Lpf1HpfLpf2,
            fifo_enable: false,
            fifo_mode: FifoMode::Bypass,
            fifo_threshold: 16,
            stop_on_fifo_threshold: true,
        }
    }
}

/// Validation errors generated while verifying a [`Config`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// The FIFO threshold exceeds the 31-sample hardware limit.
    FifoThresholdTooLarge,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_overrides_defaults() {
        let config = Config::new()
            .full_scale(FullScale::Dps2000)
            .fifo_enable(true)
            .fifo_mode(FifoMode::Stream)
            .fifo_threshold(8)
            .build();

        assert_eq!(config.full_scale, FullScale::Dps2000);
        assert!(config.fifo_enable);
        assert_eq!(config.fifo_mode, FifoMode::Stream);
        assert_eq!(config.fifo_threshold, 8);
        assert_eq!(config.rate_bandwidth, RateBandwidth::Odr100HzBw0);
    }

    #[test]
    fn validate_rejects_oversized_fifo_threshold() {
        let config = Config::new().fifo_threshold(32).build();
        assert_eq!(
            config.validate(),
            Err(ConfigError::FifoThresholdTooLarge)
        );
    }
}
