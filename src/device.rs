//! High-level L3GD20H device driver implementation.

use crate::config::{Config, MAX_FIFO_THRESHOLD};
use crate::error::{Error, Result};
use crate::fifo::{decode_frame, FifoSource, Sample, FIFO_DEPTH, FRAME_BYTES};
use crate::interface::i2c::I2cInterface;
use crate::interface::spi::SpiInterface;
use crate::interface::L3gd20hInterface;
use crate::log::trace;
use crate::params::{
    ActiveLevel,
    AddressPin,
    Axis,
    Boot,
    CounterMode,
    Endianness,
    FifoMode,
    FilterPath,
    FullScale,
    HighPassCutoff,
    HighPassMode,
    InterruptCondition,
    Mode,
    PinMode,
    RateBandwidth,
    SelfTestMode,
    SpiWire,
};
use crate::registers::{
    Ctrl1,
    Ctrl2,
    Ctrl3,
    Ctrl4,
    Ctrl5,
    FifoCtrl,
    FifoSrc,
    IgCfg,
    IgDuration,
    IgSrc,
    IgThresholdXHigh,
    LowOdr,
    Register,
    Status,
    EXPECTED_DEVICE_ID,
    REG_CTRL4,
    REG_FIFO_CTRL,
    REG_IG_THS_XL,
    REG_IG_THS_YH,
    REG_IG_THS_YL,
    REG_IG_THS_ZH,
    REG_IG_THS_ZL,
    REG_OUT_TEMP,
    REG_OUT_X_L,
    REG_REFERENCE,
    REG_WHO_AM_I,
};
use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::I2c;
use embedded_hal::spi::SpiDevice;

// L3GD20H software reset settling time (milliseconds).
const SOFT_RESET_DELAY_MS: u32 = 12;
// Largest value representable in the 15-bit interrupt threshold registers.
const MAX_INTERRUPT_THRESHOLD: u16 = 0x7FFF;
// Largest value representable in the 7-bit interrupt duration field.
const MAX_INTERRUPT_DURATION: u8 = 0x7F;

/// Callback invoked by [`L3gd20h::irq_handler`] for each asserted source.
pub type InterruptCallback = fn(InterruptEvent);

/// High-level synchronous driver for the L3GD20H gyroscope.
pub struct L3gd20h<IFACE> {
    interface: IFACE,
    config: Config,
    initialized: bool,
    callback: Option<InterruptCallback>,
}

/// Decoded view of the `STATUS` register with explicit flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusSnapshot {
    /// STATUS[0] XDA.
    pub x_data_ready: bool,
    /// STATUS[1] YDA.
    pub y_data_ready: bool,
    /// STATUS[2] ZDA.
    pub z_data_ready: bool,
    /// STATUS[3] ZYXDA.
    pub xyz_data_ready: bool,
    /// STATUS[4] XOR.
    pub x_overrun: bool,
    /// STATUS[5] YOR.
    pub y_overrun: bool,
    /// STATUS[6] ZOR.
    pub z_overrun: bool,
    /// STATUS[7] ZYXOR.
    pub xyz_overrun: bool,
}

impl StatusSnapshot {
    /// Builds a snapshot from the raw STATUS bitfield.
    pub fn from_register(status: Status) -> Self {
        Self {
            x_data_ready: status.x_data_ready(),
            y_data_ready: status.y_data_ready(),
            z_data_ready: status.z_data_ready(),
            xyz_data_ready: status.xyz_data_ready(),
            x_overrun: status.x_overrun(),
            y_overrun: status.y_overrun(),
            z_overrun: status.z_overrun(),
            xyz_overrun: status.xyz_overrun(),
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for StatusSnapshot {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(
            f,
            "StatusSnapshot {{\n    XDA: {},\n    YDA: {},\n    ZDA: {},\n    ZYXDA: {},\n    XOR: {},\n    YOR: {},\n    ZOR: {},\n    ZYXOR: {}\n}}",
            self.x_data_ready,
            self.y_data_ready,
            self.z_data_ready,
            self.xyz_data_ready,
            self.x_overrun,
            self.y_overrun,
            self.z_overrun,
            self.xyz_overrun
        );
    }
}

/// Decoded view of the `IG_SRC` interrupt source register.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct InterruptSource {
    /// An armed condition asserted the interrupt.
    pub active: bool,
    /// X axis below threshold.
    pub x_low: bool,
    /// X axis above threshold.
    pub x_high: bool,
    /// Y axis below threshold.
    pub y_low: bool,
    /// Y axis above threshold.
    pub y_high: bool,
    /// Z axis below threshold.
    pub z_low: bool,
    /// Z axis above threshold.
    pub z_high: bool,
}

impl InterruptSource {
    /// Builds a snapshot from the raw IG_SRC bitfield.
    pub fn from_register(src: IgSrc) -> Self {
        Self {
            active: src.active(),
            x_low: src.x_low(),
            x_high: src.x_high(),
            y_low: src.y_low(),
            y_high: src.y_high(),
            z_low: src.z_low(),
            z_high: src.z_high(),
        }
    }
}

/// A temperature reading with its raw register value.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Temperature {
    /// Raw signed register value.
    pub raw: i8,
    /// Converted reading in degrees Celsius.
    pub celsius: f32,
}

/// Physical interrupt lines of the device.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InterruptLine {
    /// INT1, driven by the interrupt generator.
    Int1,
    /// INT2/DRDY, driven by data-ready and FIFO signals.
    Int2,
}

/// Events reported to the registered interrupt callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InterruptEvent {
    /// INT1: an armed condition asserted.
    Int1Active,
    /// INT1: Z axis above threshold.
    Int1ZHigh,
    /// INT1: Z axis below threshold.
    Int1ZLow,
    /// INT1: Y axis above threshold.
    Int1YHigh,
    /// INT1: Y axis below threshold.
    Int1YLow,
    /// INT1: X axis above threshold.
    Int1XHigh,
    /// INT1: X axis below threshold.
    Int1XLow,
    /// INT2: all axes overran.
    Int2XyzOverrun,
    /// INT2: Z axis overran.
    Int2ZOverrun,
    /// INT2: Y axis overran.
    Int2YOverrun,
    /// INT2: X axis overran.
    Int2XOverrun,
    /// INT2: all axes have fresh data.
    Int2XyzDataReady,
    /// INT2: Z axis has fresh data.
    Int2ZDataReady,
    /// INT2: Y axis has fresh data.
    Int2YDataReady,
    /// INT2: X axis has fresh data.
    Int2XDataReady,
    /// INT2: FIFO fill level reached the threshold.
    Int2FifoThreshold,
    /// INT2: FIFO overran.
    Int2FifoOverrun,
    /// INT2: FIFO drained empty.
    Int2FifoEmpty,
}

impl<IFACE> L3gd20h<IFACE> {
    // ==================================================================
    // == Driver Construction & Ownership ===============================
    // ==================================================================
    /// Creates a new driver instance from the provided bus interface.
    pub fn new(interface: IFACE, config: Config) -> Self {
        Self {
            interface,
            config,
            initialized: false,
            callback: None,
        }
    }

    /// Consumes the driver and returns the owned interface.
    pub fn release(self) -> (IFACE, Config) {
        (self.interface, self.config)
    }

    /// Provides mutable access to the underlying interface.
    pub fn interface_mut(&mut self) -> &mut IFACE {
        &mut self.interface
    }

    /// Registers the callback invoked by [`Self::irq_handler`].
    pub fn on_interrupt(&mut self, callback: InterruptCallback) {
        self.callback = Some(callback);
    }

    /// Removes the registered interrupt callback.
    pub fn clear_interrupt_callback(&mut self) {
        self.callback = None;
    }
}

impl<SPI> L3gd20h<SpiInterface<SPI>>
where
    SPI: SpiDevice,
{
    // ==================================================================
    // == SPI Convenience Constructors ==================================
    // ==================================================================
    /// Convenience constructor for SPI transports.
    pub fn new_spi(spi: SPI, config: Config) -> Self {
        Self::new(SpiInterface::new(spi), config)
    }

    /// Releases the driver, returning the SPI device and configuration.
    pub fn release_spi(self) -> (SPI, Config) {
        let (iface, config) = self.release();
        (iface.release(), config)
    }
}

impl<I2C> L3gd20h<I2cInterface<I2C>>
where
    I2C: I2c,
{
    // ==================================================================
    // == I2C Convenience Constructors ==================================
    // ==================================================================
    /// Convenience constructor for I2C transports.
    pub fn new_i2c(i2c: I2C, addr_pin: AddressPin, config: Config) -> Self {
        Self::new(I2cInterface::new(i2c, addr_pin), config)
    }

    /// Releases the driver, returning the I2C bus and configuration.
    pub fn release_i2c(self) -> (I2C, Config) {
        let (iface, config) = self.release();
        (iface.release(), config)
    }
}

impl<IFACE, CommE> L3gd20h<IFACE>
where
    IFACE: L3gd20hInterface<Error = CommE>,
{
    // ==================================================================
    // == Initialization & Lifecycle ====================================
    // ==================================================================
    /// Initializes the sensor: opens the transport, verifies the chip
    /// identity and performs a software reset.
    ///
    /// Configuration is not applied here; call [`Self::configure`] or the
    /// individual setters afterwards.
    pub fn init(&mut self, delay: &mut impl DelayNs) -> Result<(), CommE> {
        self.interface.open().map_err(Error::from)?;

        let id = match self.interface.read_register(REG_WHO_AM_I) {
            Ok(id) => id,
            Err(err) => {
                let _ = self.interface.close();
                return Err(Error::Interface(err));
            }
        };
        if id != EXPECTED_DEVICE_ID {
            let _ = self.interface.close();
            return Err(Error::DeviceNotFound);
        }

        if let Err(err) = self.run_soft_reset(delay) {
            let _ = self.interface.close();
            return Err(err);
        }

        self.initialized = true;
        trace!("l3gd20h: initialized");
        Ok(())
    }

    /// Powers the device down and releases the transport.
    pub fn deinit(&mut self) -> Result<(), CommE> {
        self.ensure_initialized()?;

        self.update_register::<Ctrl1, _>(|reg| reg.set_power(false))?;
        self.interface.close().map_err(Error::from)?;
        self.initialized = false;
        trace!("l3gd20h: deinitialized");
        Ok(())
    }

    /// Requests a software reset through the `LOW_ODR` register.
    ///
    /// The reset bit self-clears once the device has rebooted; callers must
    /// allow the settling time before issuing further commands.
    pub fn soft_reset(&mut self) -> Result<(), CommE> {
        self.ensure_initialized()?;
        self.update_register::<LowOdr, _>(|reg| reg.set_soft_reset(true))?;
        Ok(())
    }

    /// Applies a new configuration to the device.
    pub fn configure(&mut self, config: Config) -> Result<(), CommE> {
        self.ensure_initialized()?;
        config.validate().map_err(|_| Error::InvalidConfig)?;

        self.apply_filter_config(&config)?;
        self.apply_signal_config(&config)?;
        self.apply_fifo_config(&config)?;
        self.apply_rate_config(&config)?;

        self.config = config;
        trace!("l3gd20h: configuration applied");
        Ok(())
    }

    /// Returns a shared reference to the active configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    // ==================================================================
    // == Identification & Status =======================================
    // ==================================================================
    /// Reads the `WHO_AM_I` identification register.
    pub fn device_id(&mut self) -> Result<u8, CommE> {
        self.ensure_initialized()?;
        self.interface
            .read_register(REG_WHO_AM_I)
            .map_err(Error::from)
    }

    /// Returns a snapshot of the `STATUS` register.
    pub fn status(&mut self) -> Result<StatusSnapshot, CommE> {
        self.ensure_initialized()?;
        let status: Status = self.read_register_as()?;
        Ok(StatusSnapshot::from_register(status))
    }

    /// Returns a snapshot of the interrupt generator source register.
    pub fn interrupt_source(&mut self) -> Result<InterruptSource, CommE> {
        self.ensure_initialized()?;
        let src: IgSrc = self.read_register_as()?;
        Ok(InterruptSource::from_register(src))
    }

    /// Returns the number of unread samples in the FIFO.
    pub fn fifo_level(&mut self) -> Result<u8, CommE> {
        self.ensure_initialized()?;
        let src: FifoSrc = self.read_register_as()?;
        Ok(src.level())
    }

    /// Returns a snapshot of the `FIFO_SRC` register.
    pub fn fifo_source(&mut self) -> Result<FifoSource, CommE> {
        self.ensure_initialized()?;
        let src: FifoSrc = self.read_register_as()?;
        Ok(FifoSource::from_register(src))
    }

    // ==================================================================
    // == Power, Axes & Data Rate =======================================
    // ==================================================================
    /// Sets the operating mode.
    ///
    /// Entering sleep disables all axes while keeping the device powered;
    /// leaving sleep re-enables them.
    pub fn set_mode(&mut self, mode: Mode) -> Result<(), CommE> {
        self.ensure_initialized()?;
        self.update_register::<Ctrl1, _>(|reg| match mode {
            Mode::Sleep => {
                reg.set_power(true);
                reg.set_x_enable(false);
                reg.set_y_enable(false);
                reg.set_z_enable(false);
            }
            Mode::Normal | Mode::PowerDown => {
                reg.set_power(matches!(mode, Mode::Normal));
                reg.set_x_enable(true);
                reg.set_y_enable(true);
                reg.set_z_enable(true);
            }
        })?;
        self.config.mode = mode;
        Ok(())
    }

    /// Reads the operating mode back from `CTRL1`.
    pub fn mode(&mut self) -> Result<Mode, CommE> {
        self.ensure_initialized()?;
        let reg: Ctrl1 = self.read_register_as()?;
        let any_axis = reg.x_enable() || reg.y_enable() || reg.z_enable();
        Ok(if any_axis {
            if reg.power() {
                Mode::Normal
            } else {
                Mode::PowerDown
            }
        } else if reg.power() {
            Mode::Sleep
        } else {
            Mode::PowerDown
        })
    }

    /// Enables or disables a single axis.
    pub fn set_axis(&mut self, axis: Axis, enable: bool) -> Result<(), CommE> {
        self.ensure_initialized()?;
        self.update_register::<Ctrl1, _>(|reg| match axis {
            Axis::X => reg.set_x_enable(enable),
            Axis::Y => reg.set_y_enable(enable),
            Axis::Z => reg.set_z_enable(enable),
        })?;
        match axis {
            Axis::X => self.config.x_axis = enable,
            Axis::Y => self.config.y_axis = enable,
            Axis::Z => self.config.z_axis = enable,
        }
        Ok(())
    }

    /// Reads a single axis enable bit.
    pub fn axis_enabled(&mut self, axis: Axis) -> Result<bool, CommE> {
        self.ensure_initialized()?;
        let reg: Ctrl1 = self.read_register_as()?;
        Ok(match axis {
            Axis::X => reg.x_enable(),
            Axis::Y => reg.y_enable(),
            Axis::Z => reg.z_enable(),
        })
    }

    /// Sets the output data rate and bandwidth.
    pub fn set_rate_bandwidth(&mut self, rate_bandwidth: RateBandwidth) -> Result<(), CommE> {
        self.ensure_initialized()?;
        self.update_register::<Ctrl1, _>(|reg| reg.set_rate_bits(rate_bandwidth.ctrl1_bits()))?;
        self.update_register::<LowOdr, _>(|reg| reg.set_low_odr(rate_bandwidth.low_odr()))?;
        self.config.rate_bandwidth = rate_bandwidth;
        Ok(())
    }

    /// Reads the output data rate and bandwidth selection.
    pub fn rate_bandwidth(&mut self) -> Result<RateBandwidth, CommE> {
        self.ensure_initialized()?;
        let ctrl1: Ctrl1 = self.read_register_as()?;
        let low_odr: LowOdr = self.read_register_as()?;
        RateBandwidth::from_bits(low_odr.low_odr(), ctrl1.rate_bits())
            .ok_or(Error::InvalidParameter)
    }

    // ==================================================================
    // == Triggers & High-Pass Filter ===================================
    // ==================================================================
    /// Enables or disables the edge-sensitive (external) trigger.
    pub fn set_edge_trigger(&mut self, enable: bool) -> Result<(), CommE> {
        self.ensure_initialized()?;
        self.update_register::<Ctrl2, _>(|reg| reg.set_edge_trigger(enable))?;
        self.config.edge_trigger = enable;
        Ok(())
    }

    /// Reads the edge-sensitive trigger enable bit.
    pub fn edge_trigger(&mut self) -> Result<bool, CommE> {
        self.ensure_initialized()?;
        let reg: Ctrl2 = self.read_register_as()?;
        Ok(reg.edge_trigger())
    }

    /// Enables or disables the level-sensitive trigger.
    pub fn set_level_trigger(&mut self, enable: bool) -> Result<(), CommE> {
        self.ensure_initialized()?;
        self.update_register::<Ctrl2, _>(|reg| reg.set_level_trigger(enable))?;
        self.config.level_trigger = enable;
        Ok(())
    }

    /// Reads the level-sensitive trigger enable bit.
    pub fn level_trigger(&mut self) -> Result<bool, CommE> {
        self.ensure_initialized()?;
        let reg: Ctrl2 = self.read_register_as()?;
        Ok(reg.level_trigger())
    }

    /// Sets the high-pass filter mode.
    pub fn set_high_pass_mode(&mut self, mode: HighPassMode) -> Result<(), CommE> {
        self.ensure_initialized()?;
        self.update_register::<Ctrl2, _>(|reg| reg.set_mode(mode))?;
        self.config.high_pass_mode = mode;
        Ok(())
    }

    /// Reads the high-pass filter mode.
    pub fn high_pass_mode(&mut self) -> Result<HighPassMode, CommE> {
        self.ensure_initialized()?;
        let reg: Ctrl2 = self.read_register_as()?;
        Ok(reg.mode())
    }

    /// Sets the high-pass filter cut-off frequency code.
    pub fn set_high_pass_cutoff(&mut self, cutoff: HighPassCutoff) -> Result<(), CommE> {
        self.ensure_initialized()?;
        self.update_register::<Ctrl2, _>(|reg| reg.set_cutoff(cutoff))?;
        self.config.high_pass_cutoff = cutoff;
        Ok(())
    }

    /// Reads the high-pass filter cut-off frequency code.
    pub fn high_pass_cutoff(&mut self) -> Result<HighPassCutoff, CommE> {
        self.ensure_initialized()?;
        let reg: Ctrl2 = self.read_register_as()?;
        reg.cutoff_or_err().map_err(|_| Error::InvalidParameter)
    }

    /// Enables or disables the high-pass filter stage.
    pub fn set_high_pass_filter(&mut self, enable: bool) -> Result<(), CommE> {
        self.ensure_initialized()?;
        self.update_register::<Ctrl5, _>(|reg| reg.set_high_pass_enable(enable))?;
        self.config.high_pass_filter = enable;
        Ok(())
    }

    /// Reads the high-pass filter enable bit.
    pub fn high_pass_filter_enabled(&mut self) -> Result<bool, CommE> {
        self.ensure_initialized()?;
        let reg: Ctrl5 = self.read_register_as()?;
        Ok(reg.high_pass_enable())
    }

    /// Writes the high-pass filter reference value.
    pub fn set_high_pass_reference(&mut self, value: u8) -> Result<(), CommE> {
        self.ensure_initialized()?;
        self.interface
            .write_register(REG_REFERENCE, value)
            .map_err(Error::from)?;
        self.config.high_pass_reference = value;
        Ok(())
    }

    /// Reads the high-pass filter reference value.
    pub fn high_pass_reference(&mut self) -> Result<u8, CommE> {
        self.ensure_initialized()?;
        self.interface
            .read_register(REG_REFERENCE)
            .map_err(Error::from)
    }

    // ==================================================================
    // == Interrupt Pin Routing =========================================
    // ==================================================================
    /// Routes the interrupt generator to INT1.
    pub fn set_interrupt1(&mut self, enable: bool) -> Result<(), CommE> {
        self.ensure_initialized()?;
        self.update_register::<Ctrl3, _>(|reg| reg.set_interrupt1_enable(enable))?;
        Ok(())
    }

    /// Reads the INT1 interrupt generator routing bit.
    pub fn interrupt1_enabled(&mut self) -> Result<bool, CommE> {
        self.ensure_initialized()?;
        let reg: Ctrl3 = self.read_register_as()?;
        Ok(reg.interrupt1_enable())
    }

    /// Routes the boot status to INT1.
    pub fn set_boot_on_interrupt1(&mut self, enable: bool) -> Result<(), CommE> {
        self.ensure_initialized()?;
        self.update_register::<Ctrl3, _>(|reg| reg.set_boot_on_int1(enable))?;
        Ok(())
    }

    /// Reads the INT1 boot routing bit.
    pub fn boot_on_interrupt1(&mut self) -> Result<bool, CommE> {
        self.ensure_initialized()?;
        let reg: Ctrl3 = self.read_register_as()?;
        Ok(reg.boot_on_int1())
    }

    /// Sets the interrupt pin active level.
    pub fn set_interrupt_active_level(&mut self, level: ActiveLevel) -> Result<(), CommE> {
        self.ensure_initialized()?;
        self.update_register::<Ctrl3, _>(|reg| reg.set_active_level(level))?;
        Ok(())
    }

    /// Reads the interrupt pin active level.
    pub fn interrupt_active_level(&mut self) -> Result<ActiveLevel, CommE> {
        self.ensure_initialized()?;
        let reg: Ctrl3 = self.read_register_as()?;
        Ok(reg.active_level())
    }

    /// Sets the interrupt pin output stage.
    pub fn set_interrupt_pin_mode(&mut self, pin_mode: PinMode) -> Result<(), CommE> {
        self.ensure_initialized()?;
        self.update_register::<Ctrl3, _>(|reg| reg.set_pin_mode(pin_mode))?;
        Ok(())
    }

    /// Reads the interrupt pin output stage.
    pub fn interrupt_pin_mode(&mut self) -> Result<PinMode, CommE> {
        self.ensure_initialized()?;
        let reg: Ctrl3 = self.read_register_as()?;
        Ok(reg.pin_mode())
    }

    /// Routes the data-ready signal to INT2.
    pub fn set_data_ready_on_interrupt2(&mut self, enable: bool) -> Result<(), CommE> {
        self.ensure_initialized()?;
        self.update_register::<Ctrl3, _>(|reg| reg.set_data_ready_on_int2(enable))?;
        Ok(())
    }

    /// Reads the INT2 data-ready routing bit.
    pub fn data_ready_on_interrupt2(&mut self) -> Result<bool, CommE> {
        self.ensure_initialized()?;
        let reg: Ctrl3 = self.read_register_as()?;
        Ok(reg.data_ready_on_int2())
    }

    /// Routes the FIFO threshold signal to INT2.
    pub fn set_fifo_threshold_on_interrupt2(&mut self, enable: bool) -> Result<(), CommE> {
        self.ensure_initialized()?;
        self.update_register::<Ctrl3, _>(|reg| reg.set_fifo_threshold_on_int2(enable))?;
        Ok(())
    }

    /// Reads the INT2 FIFO threshold routing bit.
    pub fn fifo_threshold_on_interrupt2(&mut self) -> Result<bool, CommE> {
        self.ensure_initialized()?;
        let reg: Ctrl3 = self.read_register_as()?;
        Ok(reg.fifo_threshold_on_int2())
    }

    /// Routes the FIFO overrun signal to INT2.
    pub fn set_fifo_overrun_on_interrupt2(&mut self, enable: bool) -> Result<(), CommE> {
        self.ensure_initialized()?;
        self.update_register::<Ctrl3, _>(|reg| reg.set_fifo_overrun_on_int2(enable))?;
        Ok(())
    }

    /// Reads the INT2 FIFO overrun routing bit.
    pub fn fifo_overrun_on_interrupt2(&mut self) -> Result<bool, CommE> {
        self.ensure_initialized()?;
        let reg: Ctrl3 = self.read_register_as()?;
        Ok(reg.fifo_overrun_on_int2())
    }

    /// Routes the FIFO empty signal to INT2.
    pub fn set_fifo_empty_on_interrupt2(&mut self, enable: bool) -> Result<(), CommE> {
        self.ensure_initialized()?;
        self.update_register::<Ctrl3, _>(|reg| reg.set_fifo_empty_on_int2(enable))?;
        Ok(())
    }

    /// Reads the INT2 FIFO empty routing bit.
    pub fn fifo_empty_on_interrupt2(&mut self) -> Result<bool, CommE> {
        self.ensure_initialized()?;
        let reg: Ctrl3 = self.read_register_as()?;
        Ok(reg.fifo_empty_on_int2())
    }

    // ==================================================================
    // == Data Format & Full Scale ======================================
    // ==================================================================
    /// Enables or disables block data update.
    pub fn set_block_data_update(&mut self, enable: bool) -> Result<(), CommE> {
        self.ensure_initialized()?;
        self.update_register::<Ctrl4, _>(|reg| reg.set_block_data_update(enable))?;
        self.config.block_data_update = enable;
        Ok(())
    }

    /// Reads the block data update bit.
    pub fn block_data_update(&mut self) -> Result<bool, CommE> {
        self.ensure_initialized()?;
        let reg: Ctrl4 = self.read_register_as()?;
        Ok(reg.block_data_update())
    }

    /// Sets the raw data byte order.
    pub fn set_data_format(&mut self, endianness: Endianness) -> Result<(), CommE> {
        self.ensure_initialized()?;
        self.update_register::<Ctrl4, _>(|reg| reg.set_endianness(endianness))?;
        self.config.endianness = endianness;
        Ok(())
    }

    /// Reads the raw data byte order.
    pub fn data_format(&mut self) -> Result<Endianness, CommE> {
        self.ensure_initialized()?;
        let reg: Ctrl4 = self.read_register_as()?;
        Ok(reg.endianness())
    }

    /// Sets the full-scale range.
    ///
    /// The cached sensitivity used for conversions changes together with the
    /// register write; a failed write leaves both untouched.
    pub fn set_full_scale(&mut self, full_scale: FullScale) -> Result<(), CommE> {
        self.ensure_initialized()?;
        self.update_register::<Ctrl4, _>(|reg| reg.set_full_scale(full_scale))?;
        self.config.full_scale = full_scale;
        Ok(())
    }

    /// Reads the full-scale range.
    pub fn full_scale(&mut self) -> Result<FullScale, CommE> {
        self.ensure_initialized()?;
        let value = self.interface.read_register(REG_CTRL4).map_err(Error::from)?;
        Ok(FullScale::from_bits(value >> 4))
    }

    /// Latches level-sensitive interrupt requests.
    pub fn set_level_sensitive_latched(&mut self, enable: bool) -> Result<(), CommE> {
        self.ensure_initialized()?;
        self.update_register::<Ctrl4, _>(|reg| reg.set_level_sensitive_latched(enable))?;
        self.config.level_sensitive_latched = enable;
        Ok(())
    }

    /// Reads the level-sensitive latch bit.
    pub fn level_sensitive_latched(&mut self) -> Result<bool, CommE> {
        self.ensure_initialized()?;
        let reg: Ctrl4 = self.read_register_as()?;
        Ok(reg.level_sensitive_latched())
    }

    /// Sets the self-test actuation mode.
    pub fn set_self_test(&mut self, self_test: SelfTestMode) -> Result<(), CommE> {
        self.ensure_initialized()?;
        self.update_register::<Ctrl4, _>(|reg| reg.set_self_test(self_test))?;
        self.config.self_test = self_test;
        Ok(())
    }

    /// Reads the self-test actuation mode.
    pub fn self_test(&mut self) -> Result<SelfTestMode, CommE> {
        self.ensure_initialized()?;
        let reg: Ctrl4 = self.read_register_as()?;
        reg.self_test_or_err().map_err(|_| Error::InvalidParameter)
    }

    /// Sets the SPI wire count.
    pub fn set_spi_wire(&mut self, spi_wire: SpiWire) -> Result<(), CommE> {
        self.ensure_initialized()?;
        self.update_register::<Ctrl4, _>(|reg| reg.set_spi_wire(spi_wire))?;
        self.config.spi_wire = spi_wire;
        Ok(())
    }

    /// Reads the SPI wire count.
    pub fn spi_wire(&mut self) -> Result<SpiWire, CommE> {
        self.ensure_initialized()?;
        let reg: Ctrl4 = self.read_register_as()?;
        Ok(reg.spi_wire())
    }

    // ==================================================================
    // == Boot, Output Paths & FIFO Control =============================
    // ==================================================================
    /// Sets the boot behaviour.
    pub fn set_boot(&mut self, boot: Boot) -> Result<(), CommE> {
        self.ensure_initialized()?;
        self.update_register::<Ctrl5, _>(|reg| reg.set_boot(boot))?;
        Ok(())
    }

    /// Reads the boot behaviour.
    pub fn boot(&mut self) -> Result<Boot, CommE> {
        self.ensure_initialized()?;
        let reg: Ctrl5 = self.read_register_as()?;
        Ok(reg.boot())
    }

    /// Enables or disables the FIFO.
    pub fn set_fifo_enable(&mut self, enable: bool) -> Result<(), CommE> {
        self.ensure_initialized()?;
        self.update_register::<Ctrl5, _>(|reg| reg.set_fifo_enable(enable))?;
        self.config.fifo_enable = enable;
        Ok(())
    }

    /// Reads the FIFO enable bit.
    pub fn fifo_enabled(&mut self) -> Result<bool, CommE> {
        self.ensure_initialized()?;
        let reg: Ctrl5 = self.read_register_as()?;
        Ok(reg.fifo_enable())
    }

    /// Stops FIFO collection at the threshold level.
    pub fn set_stop_on_fifo_threshold(&mut self, enable: bool) -> Result<(), CommE> {
        self.ensure_initialized()?;
        self.update_register::<Ctrl5, _>(|reg| reg.set_stop_on_threshold(enable))?;
        self.config.stop_on_fifo_threshold = enable;
        Ok(())
    }

    /// Reads the stop-on-threshold bit.
    pub fn stop_on_fifo_threshold(&mut self) -> Result<bool, CommE> {
        self.ensure_initialized()?;
        let reg: Ctrl5 = self.read_register_as()?;
        Ok(reg.stop_on_threshold())
    }

    /// Selects the filter chain feeding the interrupt generator.
    pub fn set_interrupt_selection(&mut self, selection: FilterPath) -> Result<(), CommE> {
        self.ensure_initialized()?;
        self.update_register::<Ctrl5, _>(|reg| reg.set_interrupt_selection(selection))?;
        self.config.interrupt_selection = selection;
        Ok(())
    }

    /// Reads the interrupt generator filter chain selection.
    pub fn interrupt_selection(&mut self) -> Result<FilterPath, CommE> {
        self.ensure_initialized()?;
        let reg: Ctrl5 = self.read_register_as()?;
        reg.interrupt_selection_or_err()
            .map_err(|_| Error::InvalidParameter)
    }

    /// Selects the filter chain feeding the output registers.
    pub fn set_out_selection(&mut self, selection: FilterPath) -> Result<(), CommE> {
        self.ensure_initialized()?;
        self.update_register::<Ctrl5, _>(|reg| reg.set_out_selection(selection))?;
        self.config.out_selection = selection;
        Ok(())
    }

    /// Reads the output filter chain selection.
    pub fn out_selection(&mut self) -> Result<FilterPath, CommE> {
        self.ensure_initialized()?;
        let reg: Ctrl5 = self.read_register_as()?;
        reg.out_selection_or_err()
            .map_err(|_| Error::InvalidParameter)
    }

    /// Sets the FIFO operating mode.
    pub fn set_fifo_mode(&mut self, fifo_mode: FifoMode) -> Result<(), CommE> {
        self.ensure_initialized()?;
        self.update_register::<FifoCtrl, _>(|reg| reg.set_mode(fifo_mode))?;
        self.config.fifo_mode = fifo_mode;
        Ok(())
    }

    /// Reads the FIFO operating mode.
    pub fn fifo_mode(&mut self) -> Result<FifoMode, CommE> {
        self.ensure_initialized()?;
        let reg: FifoCtrl = self.read_register_as()?;
        reg.mode_or_err().map_err(|_| Error::InvalidParameter)
    }

    /// Sets the FIFO threshold level.
    pub fn set_fifo_threshold(&mut self, threshold: u8) -> Result<(), CommE> {
        self.ensure_initialized()?;
        if threshold > MAX_FIFO_THRESHOLD {
            return Err(Error::InvalidParameter);
        }
        self.update_register::<FifoCtrl, _>(|reg| reg.set_threshold(threshold))?;
        self.config.fifo_threshold = threshold;
        Ok(())
    }

    /// Reads the FIFO threshold level.
    pub fn fifo_threshold(&mut self) -> Result<u8, CommE> {
        self.ensure_initialized()?;
        let reg: FifoCtrl = self.read_register_as()?;
        Ok(reg.threshold())
    }

    // ==================================================================
    // == Interrupt Generator ===========================================
    // ==================================================================
    /// Arms or disarms one interrupt generator condition.
    pub fn set_interrupt_condition(
        &mut self,
        condition: InterruptCondition,
        enable: bool,
    ) -> Result<(), CommE> {
        self.ensure_initialized()?;
        self.update_register::<IgCfg, _>(|reg| match condition {
            InterruptCondition::XLow => reg.set_x_low(enable),
            InterruptCondition::XHigh => reg.set_x_high(enable),
            InterruptCondition::YLow => reg.set_y_low(enable),
            InterruptCondition::YHigh => reg.set_y_high(enable),
            InterruptCondition::ZLow => reg.set_z_low(enable),
            InterruptCondition::ZHigh => reg.set_z_high(enable),
            InterruptCondition::Latch => reg.set_latch(enable),
            InterruptCondition::AndCombination => reg.set_and_combination(enable),
        })?;
        Ok(())
    }

    /// Reads one interrupt generator condition enable bit.
    pub fn interrupt_condition(&mut self, condition: InterruptCondition) -> Result<bool, CommE> {
        self.ensure_initialized()?;
        let reg: IgCfg = self.read_register_as()?;
        Ok(match condition {
            InterruptCondition::XLow => reg.x_low(),
            InterruptCondition::XHigh => reg.x_high(),
            InterruptCondition::YLow => reg.y_low(),
            InterruptCondition::YHigh => reg.y_high(),
            InterruptCondition::ZLow => reg.z_low(),
            InterruptCondition::ZHigh => reg.z_high(),
            InterruptCondition::Latch => reg.latch(),
            InterruptCondition::AndCombination => reg.and_combination(),
        })
    }

    /// Sets the duration counter behaviour.
    pub fn set_counter_mode(&mut self, counter_mode: CounterMode) -> Result<(), CommE> {
        self.ensure_initialized()?;
        self.update_register::<IgThresholdXHigh, _>(|reg| reg.set_counter_mode(counter_mode))?;
        Ok(())
    }

    /// Reads the duration counter behaviour.
    pub fn counter_mode(&mut self) -> Result<CounterMode, CommE> {
        self.ensure_initialized()?;
        let reg: IgThresholdXHigh = self.read_register_as()?;
        Ok(reg.counter_mode())
    }

    /// Enables or disables the wait-on-duration behaviour.
    pub fn set_wait(&mut self, enable: bool) -> Result<(), CommE> {
        self.ensure_initialized()?;
        self.update_register::<IgDuration, _>(|reg| reg.set_wait(enable))?;
        Ok(())
    }

    /// Reads the wait-on-duration bit.
    pub fn wait_enabled(&mut self) -> Result<bool, CommE> {
        self.ensure_initialized()?;
        let reg: IgDuration = self.read_register_as()?;
        Ok(reg.wait())
    }

    /// Sets the minimum event duration in ODR cycles.
    pub fn set_duration(&mut self, duration: u8) -> Result<(), CommE> {
        self.ensure_initialized()?;
        if duration > MAX_INTERRUPT_DURATION {
            return Err(Error::InvalidParameter);
        }
        self.update_register::<IgDuration, _>(|reg| reg.set_duration(duration))?;
        Ok(())
    }

    /// Reads the minimum event duration.
    pub fn duration(&mut self) -> Result<u8, CommE> {
        self.ensure_initialized()?;
        let reg: IgDuration = self.read_register_as()?;
        Ok(reg.duration())
    }

    /// Sets the X axis interrupt threshold (15-bit).
    pub fn set_x_interrupt_threshold(&mut self, threshold: u16) -> Result<(), CommE> {
        self.ensure_initialized()?;
        if threshold > MAX_INTERRUPT_THRESHOLD {
            return Err(Error::InvalidParameter);
        }
        // The counter-mode bit shares IG_THS_XH and must be preserved.
        self.update_register::<IgThresholdXHigh, _>(|reg| {
            reg.set_threshold(((threshold >> 8) & 0x7F) as u8)
        })?;
        self.interface
            .write_register(REG_IG_THS_XL, (threshold & 0xFF) as u8)
            .map_err(Error::from)?;
        Ok(())
    }

    /// Reads the X axis interrupt threshold.
    pub fn x_interrupt_threshold(&mut self) -> Result<u16, CommE> {
        self.ensure_initialized()?;
        let high: IgThresholdXHigh = self.read_register_as()?;
        let low = self
            .interface
            .read_register(REG_IG_THS_XL)
            .map_err(Error::from)?;
        Ok(((high.threshold() as u16) << 8) | low as u16)
    }

    /// Sets the Y axis interrupt threshold (15-bit).
    pub fn set_y_interrupt_threshold(&mut self, threshold: u16) -> Result<(), CommE> {
        self.ensure_initialized()?;
        self.write_axis_threshold(REG_IG_THS_YH, REG_IG_THS_YL, threshold)
    }

    /// Reads the Y axis interrupt threshold.
    pub fn y_interrupt_threshold(&mut self) -> Result<u16, CommE> {
        self.ensure_initialized()?;
        self.read_axis_threshold(REG_IG_THS_YH, REG_IG_THS_YL)
    }

    /// Sets the Z axis interrupt threshold (15-bit).
    pub fn set_z_interrupt_threshold(&mut self, threshold: u16) -> Result<(), CommE> {
        self.ensure_initialized()?;
        self.write_axis_threshold(REG_IG_THS_ZH, REG_IG_THS_ZL, threshold)
    }

    /// Reads the Z axis interrupt threshold.
    pub fn z_interrupt_threshold(&mut self) -> Result<u16, CommE> {
        self.ensure_initialized()?;
        self.read_axis_threshold(REG_IG_THS_ZH, REG_IG_THS_ZL)
    }

    /// Converts an interrupt threshold in dps to its register encoding for
    /// the active full-scale range.
    pub fn interrupt_threshold_to_register(&mut self, dps: f32) -> Result<u16, CommE> {
        self.ensure_initialized()?;
        let full_scale = self.full_scale()?;
        Ok((dps * 1000.0 / full_scale.threshold_lsb_mdps()) as u16)
    }

    /// Converts an interrupt threshold register value to dps for the active
    /// full-scale range.
    pub fn interrupt_threshold_to_dps(&mut self, register: u16) -> Result<f32, CommE> {
        self.ensure_initialized()?;
        let full_scale = self.full_scale()?;
        Ok(register as f32 * full_scale.sensitivity_mdps() / 1000.0)
    }

    // ==================================================================
    // == Data-Ready Pin & Bus Options ==================================
    // ==================================================================
    /// Sets the data-ready pin active level.
    pub fn set_data_ready_active_level(&mut self, level: ActiveLevel) -> Result<(), CommE> {
        self.ensure_initialized()?;
        self.update_register::<LowOdr, _>(|reg| reg.set_data_ready_active_level(level))?;
        Ok(())
    }

    /// Reads the data-ready pin active level.
    pub fn data_ready_active_level(&mut self) -> Result<ActiveLevel, CommE> {
        self.ensure_initialized()?;
        let reg: LowOdr = self.read_register_as()?;
        Ok(reg.data_ready_active_level())
    }

    /// Disables or re-enables the I2C interface.
    pub fn set_i2c_disable(&mut self, disable: bool) -> Result<(), CommE> {
        self.ensure_initialized()?;
        self.update_register::<LowOdr, _>(|reg| reg.set_i2c_disable(disable))?;
        Ok(())
    }

    /// Reads the I2C disable bit.
    pub fn i2c_disabled(&mut self) -> Result<bool, CommE> {
        self.ensure_initialized()?;
        let reg: LowOdr = self.read_register_as()?;
        Ok(reg.i2c_disable())
    }

    // ==================================================================
    // == Data Acquisition & FIFO =======================================
    // ==================================================================
    /// Reads one raw axis triplet directly from the output registers.
    pub fn read_raw(&mut self) -> Result<[i16; 3], CommE> {
        self.ensure_initialized()?;
        let ctrl4: Ctrl4 = self.read_register_as()?;
        let mut raw = [0u8; FRAME_BYTES];
        self.interface
            .read_many(REG_OUT_X_L, &mut raw)
            .map_err(Error::from)?;
        Ok(decode_frame(&raw, ctrl4.endianness()))
    }

    /// Reads angular-rate samples into `samples` and returns how many were
    /// produced.
    ///
    /// When the FIFO is enabled and not bypassed, queued frames are drained
    /// oldest-first up to the caller's capacity; otherwise a single frame is
    /// read from the output registers. The full scale and byte order are
    /// taken from `CTRL4` within the same call so conversions always match
    /// the data being decoded.
    pub fn read(&mut self, samples: &mut [Sample]) -> Result<usize, CommE> {
        self.ensure_initialized()?;
        if samples.is_empty() {
            return Err(Error::InvalidParameter);
        }

        let fifo_ctrl = self
            .interface
            .read_register(REG_FIFO_CTRL)
            .map_err(Error::from)?;
        let fifo_mode_bits = fifo_ctrl >> 5;
        let ctrl5: Ctrl5 = self.read_register_as()?;
        let ctrl4: Ctrl4 = self.read_register_as()?;
        let full_scale = FullScale::from_bits(u8::from(ctrl4) >> 4);
        let endianness = ctrl4.endianness();

        if fifo_mode_bits != 0 && ctrl5.fifo_enable() {
            let src: FifoSrc = self.read_register_as()?;
            let count = samples.len().min(src.level() as usize);
            if count == 0 {
                return Ok(0);
            }

            let mut buf = [0u8; FIFO_DEPTH * FRAME_BYTES];
            self.interface
                .read_many(REG_OUT_X_L, &mut buf[..count * FRAME_BYTES])
                .map_err(Error::from)?;
            for (frame, sample) in buf.chunks_exact(FRAME_BYTES).zip(samples.iter_mut()).take(count)
            {
                *sample = Sample::from_raw(decode_frame(frame, endianness), full_scale);
            }
            Ok(count)
        } else {
            let mut buf = [0u8; FRAME_BYTES];
            self.interface
                .read_many(REG_OUT_X_L, &mut buf)
                .map_err(Error::from)?;
            samples[0] = Sample::from_raw(decode_frame(&buf, endianness), full_scale);
            Ok(1)
        }
    }

    /// Reads the temperature sensor.
    pub fn read_temperature(&mut self) -> Result<Temperature, CommE> {
        self.ensure_initialized()?;
        let raw = self
            .interface
            .read_register(REG_OUT_TEMP)
            .map_err(Error::from)? as i8;
        Ok(Temperature {
            raw,
            celsius: 25.0 - raw as f32,
        })
    }

    // ==================================================================
    // == Interrupt Handling ============================================
    // ==================================================================
    /// Decodes the pending interrupt sources for `line` and invokes the
    /// registered callback once per asserted flag.
    pub fn irq_handler(&mut self, line: InterruptLine) -> Result<(), CommE> {
        self.ensure_initialized()?;

        match line {
            InterruptLine::Int1 => {
                let src: IgSrc = self.read_register_as()?;
                self.dispatch(src.active(), InterruptEvent::Int1Active);
                self.dispatch(src.z_high(), InterruptEvent::Int1ZHigh);
                self.dispatch(src.z_low(), InterruptEvent::Int1ZLow);
                self.dispatch(src.y_high(), InterruptEvent::Int1YHigh);
                self.dispatch(src.y_low(), InterruptEvent::Int1YLow);
                self.dispatch(src.x_high(), InterruptEvent::Int1XHigh);
                self.dispatch(src.x_low(), InterruptEvent::Int1XLow);
            }
            InterruptLine::Int2 => {
                let status: Status = self.read_register_as()?;
                self.dispatch(status.xyz_overrun(), InterruptEvent::Int2XyzOverrun);
                self.dispatch(status.z_overrun(), InterruptEvent::Int2ZOverrun);
                self.dispatch(status.y_overrun(), InterruptEvent::Int2YOverrun);
                self.dispatch(status.x_overrun(), InterruptEvent::Int2XOverrun);
                self.dispatch(status.xyz_data_ready(), InterruptEvent::Int2XyzDataReady);
                self.dispatch(status.z_data_ready(), InterruptEvent::Int2ZDataReady);
                self.dispatch(status.y_data_ready(), InterruptEvent::Int2YDataReady);
                self.dispatch(status.x_data_ready(), InterruptEvent::Int2XDataReady);

                let src: FifoSrc = self.read_register_as()?;
                self.dispatch(src.threshold(), InterruptEvent::Int2FifoThreshold);
                self.dispatch(src.overrun(), InterruptEvent::Int2FifoOverrun);
                self.dispatch(src.empty(), InterruptEvent::Int2FifoEmpty);
            }
        }

        Ok(())
    }

    // ==================================================================
    // == Raw Register Access ===========================================
    // ==================================================================
    /// Writes consecutive registers starting at `register`.
    pub fn write_reg(&mut self, register: u8, data: &[u8]) -> Result<(), CommE> {
        self.ensure_initialized()?;
        self.interface
            .write_many(register, data)
            .map_err(Error::from)
    }

    /// Reads consecutive registers starting at `register`.
    pub fn read_reg(&mut self, register: u8, buf: &mut [u8]) -> Result<(), CommE> {
        self.ensure_initialized()?;
        self.interface.read_many(register, buf).map_err(Error::from)
    }

    // ==================================================================
    // == Internal Helpers ==============================================
    // ==================================================================
    fn ensure_initialized(&self) -> Result<(), CommE> {
        if self.initialized {
            Ok(())
        } else {
            Err(Error::NotInitialized)
        }
    }

    fn dispatch(&self, asserted: bool, event: InterruptEvent) {
        if asserted {
            if let Some(callback) = self.callback {
                callback(event);
            }
        }
    }

    /// Reads `R`, applies `mutate` and writes the register back when the
    /// value changed.
    fn update_register<R, F>(&mut self, mut mutate: F) -> Result<R, CommE>
    where
        R: Register<Raw = u8> + From<u8> + Into<u8> + Copy,
        F: FnMut(&mut R),
    {
        let current = self
            .interface
            .read_register(R::ADDRESS)
            .map_err(Error::from)?;

        let mut register = R::from(current);
        mutate(&mut register);

        let updated: u8 = register.into();
        if updated != current {
            self.interface
                .write_register(R::ADDRESS, updated)
                .map_err(Error::from)?;
        }

        Ok(register)
    }

    fn read_register_as<R>(&mut self) -> Result<R, CommE>
    where
        R: Register<Raw = u8> + From<u8>,
    {
        let value = self
            .interface
            .read_register(R::ADDRESS)
            .map_err(Error::from)?;
        Ok(R::from(value))
    }

    fn run_soft_reset(&mut self, delay: &mut impl DelayNs) -> Result<(), CommE> {
        self.update_register::<LowOdr, _>(|reg| reg.set_soft_reset(true))?;
        delay.delay_ms(SOFT_RESET_DELAY_MS);

        let after: LowOdr = self.read_register_as()?;
        if after.soft_reset() {
            return Err(Error::DeviceNotFound);
        }
        Ok(())
    }

    fn write_axis_threshold(&mut self, high: u8, low: u8, threshold: u16) -> Result<(), CommE> {
        if threshold > MAX_INTERRUPT_THRESHOLD {
            return Err(Error::InvalidParameter);
        }
        self.interface
            .write_register(high, ((threshold >> 8) & 0x7F) as u8)
            .map_err(Error::from)?;
        self.interface
            .write_register(low, (threshold & 0xFF) as u8)
            .map_err(Error::from)
    }

    fn read_axis_threshold(&mut self, high: u8, low: u8) -> Result<u16, CommE> {
        let high = self.interface.read_register(high).map_err(Error::from)? & 0x7F;
        let low = self.interface.read_register(low).map_err(Error::from)?;
        Ok(((high as u16) << 8) | low as u16)
    }

    fn apply_filter_config(&mut self, config: &Config) -> Result<(), CommE> {
        self.update_register::<Ctrl2, _>(|reg| {
            reg.set_cutoff(config.high_pass_cutoff);
            reg.set_mode(config.high_pass_mode);
            reg.set_level_trigger(config.level_trigger);
            reg.set_edge_trigger(config.edge_trigger);
        })?;
        self.interface
            .write_register(REG_REFERENCE, config.high_pass_reference)
            .map_err(Error::from)?;
        Ok(())
    }

    fn apply_signal_config(&mut self, config: &Config) -> Result<(), CommE> {
        self.update_register::<Ctrl4, _>(|reg| {
            reg.set_spi_wire(config.spi_wire);
            reg.set_self_test(config.self_test);
            reg.set_level_sensitive_latched(config.level_sensitive_latched);
            reg.set_full_scale(config.full_scale);
            reg.set_endianness(config.endianness);
            reg.set_block_data_update(config.block_data_update);
        })?;
        self.update_register::<Ctrl5, _>(|reg| {
            reg.set_out_selection(config.out_selection);
            reg.set_interrupt_selection(config.interrupt_selection);
            reg.set_high_pass_enable(config.high_pass_filter);
            reg.set_stop_on_threshold(config.stop_on_fifo_threshold);
            reg.set_fifo_enable(config.fifo_enable);
        })?;
        Ok(())
    }

    fn apply_fifo_config(&mut self, config: &Config) -> Result<(), CommE> {
        self.update_register::<FifoCtrl, _>(|reg| {
            reg.set_threshold(config.fifo_threshold);
            reg.set_mode(config.fifo_mode);
        })?;
        Ok(())
    }

    fn apply_rate_config(&mut self, config: &Config) -> Result<(), CommE> {
        self.update_register::<LowOdr, _>(|reg| {
            reg.set_low_odr(config.rate_bandwidth.low_odr())
        })?;
        self.update_register::<Ctrl1, _>(|reg| {
            reg.set_rate_bits(config.rate_bandwidth.ctrl1_bits());
            reg.set_x_enable(config.x_axis);
            reg.set_y_enable(config.y_axis);
            reg.set_z_enable(config.z_axis);
            match config.mode {
                Mode::Sleep => {
                    reg.set_power(true);
                    reg.set_x_enable(false);
                    reg.set_y_enable(false);
                    reg.set_z_enable(false);
                }
                Mode::Normal => reg.set_power(true),
                Mode::PowerDown => reg.set_power(false),
            }
        })?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;
    use core::sync::atomic::{AtomicUsize, Ordering};
    use embedded_hal_mock::eh1::delay::NoopDelay;
    use embedded_hal_mock::eh1::i2c::{Mock as I2cMock, Transaction};
    use std::vec;
    use std::vec::Vec;

    const ADDR: u8 = 0x6A;

    fn init_transactions() -> Vec<Transaction> {
        vec![
            Transaction::write_read(ADDR, vec![0x0F], vec![0xD7]),
            Transaction::write_read(ADDR, vec![0x39], vec![0x00]),
            Transaction::write(ADDR, vec![0x39, 0x04]),
            Transaction::write_read(ADDR, vec![0x39], vec![0x00]),
        ]
    }

    fn initialized_driver(extra: Vec<Transaction>) -> L3gd20h<I2cInterface<I2cMock>> {
        let mut transactions = init_transactions();
        transactions.extend(extra);
        let mut driver = L3gd20h::new_i2c(
            I2cMock::new(&transactions),
            AddressPin::SdoLow,
            Config::default(),
        );
        driver.init(&mut NoopDelay::new()).unwrap();
        driver
    }

    fn finish(driver: L3gd20h<I2cInterface<I2cMock>>) {
        let (mut i2c, _) = driver.release_i2c();
        i2c.done();
    }

    #[test]
    fn init_verifies_chip_identity() {
        let driver = initialized_driver(vec![]);
        finish(driver);
    }

    #[test]
    fn init_rejects_wrong_identity() {
        let transactions = [Transaction::write_read(ADDR, vec![0x0F], vec![0xD4])];
        let mut driver = L3gd20h::new_i2c(
            I2cMock::new(&transactions),
            AddressPin::SdoLow,
            Config::default(),
        );

        assert_eq!(
            driver.init(&mut NoopDelay::new()),
            Err(Error::DeviceNotFound)
        );
        finish(driver);
    }

    #[test]
    fn accessors_fail_before_init() {
        let mut driver = L3gd20h::new_i2c(
            I2cMock::new(&[]),
            AddressPin::SdoLow,
            Config::default(),
        );

        assert_eq!(
            driver.set_full_scale(FullScale::Dps500),
            Err(Error::NotInitialized)
        );
        assert_eq!(driver.status(), Err(Error::NotInitialized));
        let mut samples = [Sample::default(); 1];
        assert_eq!(driver.read(&mut samples), Err(Error::NotInitialized));
        finish(driver);
    }

    #[test]
    fn deinit_powers_down_and_blocks_access() {
        let mut driver = initialized_driver(vec![
            Transaction::write_read(ADDR, vec![0x20], vec![0x0F]),
            Transaction::write(ADDR, vec![0x20, 0x07]),
        ]);

        driver.deinit().unwrap();
        assert_eq!(driver.deinit(), Err(Error::NotInitialized));
        assert_eq!(driver.full_scale(), Err(Error::NotInitialized));
        finish(driver);
    }

    #[test]
    fn full_scale_set_then_get_roundtrip() {
        let mut driver = initialized_driver(vec![
            Transaction::write_read(ADDR, vec![0x23], vec![0x00]),
            Transaction::write(ADDR, vec![0x23, 0x10]),
            Transaction::write_read(ADDR, vec![0x23], vec![0x10]),
        ]);

        driver.set_full_scale(FullScale::Dps500).unwrap();
        assert_eq!(driver.config().full_scale, FullScale::Dps500);
        assert_eq!(driver.full_scale(), Ok(FullScale::Dps500));
        finish(driver);
    }

    #[test]
    fn unchanged_register_value_skips_write() {
        let mut driver = initialized_driver(vec![Transaction::write_read(
            ADDR,
            vec![0x23],
            vec![0x00],
        )]);

        driver.set_full_scale(FullScale::Dps245).unwrap();
        finish(driver);
    }

    #[test]
    fn oversized_fifo_threshold_is_rejected_without_bus_traffic() {
        let mut driver = initialized_driver(vec![Transaction::write_read(
            ADDR,
            vec![0x2E],
            vec![0x10],
        )]);

        assert_eq!(
            driver.set_fifo_threshold(32),
            Err(Error::InvalidParameter)
        );
        assert_eq!(driver.config().fifo_threshold, 16);
        assert_eq!(driver.fifo_threshold(), Ok(16));
        finish(driver);
    }

    #[test]
    fn oversized_duration_is_rejected() {
        let mut driver = initialized_driver(vec![]);
        assert_eq!(driver.set_duration(0x80), Err(Error::InvalidParameter));
        finish(driver);
    }

    #[test]
    fn transport_error_leaves_cached_config_untouched() {
        let mut driver = initialized_driver(vec![Transaction::write_read(
            ADDR,
            vec![0x23],
            vec![0x00],
        )
        .with_error(embedded_hal::i2c::ErrorKind::Other)]);

        assert_eq!(
            driver.set_full_scale(FullScale::Dps2000),
            Err(Error::Interface(embedded_hal::i2c::ErrorKind::Other))
        );
        assert_eq!(driver.config().full_scale, FullScale::Dps245);
        finish(driver);
    }

    #[test]
    fn read_returns_single_frame_when_fifo_bypassed() {
        let mut driver = initialized_driver(vec![
            Transaction::write_read(ADDR, vec![0x2E], vec![0x00]),
            Transaction::write_read(ADDR, vec![0x24], vec![0x00]),
            Transaction::write_read(ADDR, vec![0x23], vec![0x00]),
            Transaction::write_read(
                ADDR,
                vec![0xA8],
                vec![0xE8, 0x03, 0x00, 0x00, 0x18, 0xFC],
            ),
        ]);

        let mut samples = [Sample::default(); 4];
        let count = driver.read(&mut samples).unwrap();
        assert_eq!(count, 1);
        assert_eq!(samples[0].raw, [1000, 0, -1000]);
        assert!((samples[0].dps[0] - 8.75).abs() < 1e-4);
        assert_eq!(samples[0].dps[1], 0.0);
        assert!((samples[0].dps[2] + 8.75).abs() < 1e-4);
        finish(driver);
    }

    #[test]
    fn read_drains_fifo_oldest_first() {
        let mut frames = Vec::new();
        for value in 1u8..=3 {
            frames.extend_from_slice(&[value, 0x00, 0x00, 0x00, 0x00, 0x00]);
        }
        let mut driver = initialized_driver(vec![
            Transaction::write_read(ADDR, vec![0x2E], vec![0x40]),
            Transaction::write_read(ADDR, vec![0x24], vec![0x40]),
            Transaction::write_read(ADDR, vec![0x23], vec![0x00]),
            Transaction::write_read(ADDR, vec![0x2F], vec![0x03]),
            Transaction::write_read(ADDR, vec![0xA8], frames),
        ]);

        let mut samples = [Sample::default(); 8];
        let count = driver.read(&mut samples).unwrap();
        assert_eq!(count, 3);
        assert_eq!(samples[0].raw[0], 1);
        assert_eq!(samples[1].raw[0], 2);
        assert_eq!(samples[2].raw[0], 3);
        finish(driver);
    }

    #[test]
    fn read_respects_caller_capacity() {
        let mut frames = Vec::new();
        for value in 1u8..=2 {
            frames.extend_from_slice(&[value, 0x00, 0x00, 0x00, 0x00, 0x00]);
        }
        let mut driver = initialized_driver(vec![
            Transaction::write_read(ADDR, vec![0x2E], vec![0x40]),
            Transaction::write_read(ADDR, vec![0x24], vec![0x40]),
            Transaction::write_read(ADDR, vec![0x23], vec![0x00]),
            Transaction::write_read(ADDR, vec![0x2F], vec![0x05]),
            Transaction::write_read(ADDR, vec![0xA8], frames),
        ]);

        let mut samples = [Sample::default(); 2];
        let count = driver.read(&mut samples).unwrap();
        assert_eq!(count, 2);
        finish(driver);
    }

    #[test]
    fn fifo_source_reports_overrun_and_level() {
        let mut driver = initialized_driver(vec![Transaction::write_read(
            ADDR,
            vec![0x2F],
            vec![0xC3],
        )]);

        let source = driver.fifo_source().unwrap();
        assert!(source.threshold_reached);
        assert!(source.overrun);
        assert!(!source.empty);
        assert_eq!(source.level, 3);
        finish(driver);
    }

    #[test]
    fn status_snapshot_decodes_all_flags() {
        let mut driver = initialized_driver(vec![Transaction::write_read(
            ADDR,
            vec![0x27],
            vec![0b1000_1001],
        )]);

        let status = driver.status().unwrap();
        assert!(status.x_data_ready);
        assert!(!status.y_data_ready);
        assert!(status.xyz_data_ready);
        assert!(status.xyz_overrun);
        assert!(!status.z_overrun);
        finish(driver);
    }

    #[test]
    fn temperature_uses_datasheet_conversion() {
        let mut driver = initialized_driver(vec![
            Transaction::write_read(ADDR, vec![0x26], vec![0x05]),
            Transaction::write_read(ADDR, vec![0x26], vec![0xFB]),
        ]);

        let warm = driver.read_temperature().unwrap();
        assert_eq!(warm.raw, 5);
        assert_eq!(warm.celsius, 20.0);

        let cold = driver.read_temperature().unwrap();
        assert_eq!(cold.raw, -5);
        assert_eq!(cold.celsius, 30.0);
        finish(driver);
    }

    #[test]
    fn rate_bandwidth_programs_both_registers() {
        let mut driver = initialized_driver(vec![
            Transaction::write_read(ADDR, vec![0x20], vec![0x0F]),
            Transaction::write_read(ADDR, vec![0x39], vec![0x00]),
            Transaction::write(ADDR, vec![0x39, 0x01]),
            Transaction::write_read(ADDR, vec![0x20], vec![0x0F]),
            Transaction::write_read(ADDR, vec![0x39], vec![0x01]),
        ]);

        driver
            .set_rate_bandwidth(RateBandwidth::Odr12p5HzBw0)
            .unwrap();
        assert_eq!(
            driver.rate_bandwidth(),
            Ok(RateBandwidth::Odr12p5HzBw0)
        );
        finish(driver);
    }

    #[test]
    fn x_interrupt_threshold_preserves_counter_mode() {
        let mut driver = initialized_driver(vec![
            Transaction::write_read(ADDR, vec![0x32], vec![0x80]),
            Transaction::write(ADDR, vec![0x32, 0x92]),
            Transaction::write(ADDR, vec![0x33, 0x34]),
            Transaction::write_read(ADDR, vec![0x32], vec![0x92]),
            Transaction::write_read(ADDR, vec![0x33], vec![0x34]),
        ]);

        driver.set_x_interrupt_threshold(0x1234).unwrap();
        assert_eq!(driver.x_interrupt_threshold(), Ok(0x1234));
        assert_eq!(
            driver.set_x_interrupt_threshold(0x8000),
            Err(Error::InvalidParameter)
        );
        finish(driver);
    }

    #[test]
    fn interrupt_threshold_conversions_follow_full_scale() {
        let mut driver = initialized_driver(vec![
            Transaction::write_read(ADDR, vec![0x23], vec![0x00]),
            Transaction::write_read(ADDR, vec![0x23], vec![0x00]),
        ]);

        assert_eq!(driver.interrupt_threshold_to_register(7.5), Ok(1000));
        assert_eq!(driver.interrupt_threshold_to_dps(1000), Ok(8.75));
        finish(driver);
    }

    static INT1_EVENTS: AtomicUsize = AtomicUsize::new(0);

    fn record_int1(event: InterruptEvent) {
        match event {
            InterruptEvent::Int1Active | InterruptEvent::Int1XHigh => {
                INT1_EVENTS.fetch_add(1, Ordering::Relaxed);
            }
            _ => panic!("unexpected event"),
        }
    }

    #[test]
    fn irq_handler_dispatches_interrupt1_events() {
        let mut driver = initialized_driver(vec![Transaction::write_read(
            ADDR,
            vec![0x31],
            vec![0b0100_0010],
        )]);

        driver.on_interrupt(record_int1);
        driver.irq_handler(InterruptLine::Int1).unwrap();
        assert_eq!(INT1_EVENTS.load(Ordering::Relaxed), 2);
        finish(driver);
    }

    static INT2_EVENTS: AtomicUsize = AtomicUsize::new(0);

    fn record_int2(event: InterruptEvent) {
        match event {
            InterruptEvent::Int2XyzDataReady | InterruptEvent::Int2FifoOverrun => {
                INT2_EVENTS.fetch_add(1, Ordering::Relaxed);
            }
            _ => panic!("unexpected event"),
        }
    }

    #[test]
    fn irq_handler_dispatches_interrupt2_events() {
        let mut driver = initialized_driver(vec![
            Transaction::write_read(ADDR, vec![0x27], vec![0x08]),
            Transaction::write_read(ADDR, vec![0x2F], vec![0x40]),
        ]);

        driver.on_interrupt(record_int2);
        driver.irq_handler(InterruptLine::Int2).unwrap();
        assert_eq!(INT2_EVENTS.load(Ordering::Relaxed), 2);
        finish(driver);
    }

    #[test]
    fn configure_programs_every_register_group() {
        let config = Config::new()
            .full_scale(FullScale::Dps2000)
            .fifo_enable(true)
            .fifo_mode(FifoMode::Stream)
            .fifo_threshold(8)
            .block_data_update(true)
            .build();

        let mut driver = initialized_driver(vec![
            // CTRL2: cutoff 0, mode normal (0b10 << 4).
            Transaction::write_read(ADDR, vec![0x21], vec![0x00]),
            Transaction::write(ADDR, vec![0x21, 0x20]),
            // REFERENCE.
            Transaction::write(ADDR, vec![0x25, 0x00]),
            // CTRL4: BDU + 2000 dps + latched.
            Transaction::write_read(ADDR, vec![0x23], vec![0x00]),
            Transaction::write(ADDR, vec![0x23, 0xA8]),
            // CTRL5: HPen + StopOnFTH + FIFO_EN + IG_Sel/Out_Sel LPF1-HPF-LPF2.
            Transaction::write_read(ADDR, vec![0x24], vec![0x00]),
            Transaction::write(ADDR, vec![0x24, 0x7A]),
            // FIFO_CTRL: stream mode, threshold 8.
            Transaction::write_read(ADDR, vec![0x2E], vec![0x00]),
            Transaction::write(ADDR, vec![0x2E, 0x48]),
            // LOW_ODR unchanged.
            Transaction::write_read(ADDR, vec![0x39], vec![0x00]),
            // CTRL1: 100 Hz, all axes, normal mode.
            Transaction::write_read(ADDR, vec![0x20], vec![0x00]),
            Transaction::write(ADDR, vec![0x20, 0x0F]),
        ]);

        driver.configure(config).unwrap();
        assert_eq!(driver.config().full_scale, FullScale::Dps2000);
        finish(driver);
    }
}
