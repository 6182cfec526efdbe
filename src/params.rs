//! Strongly typed parameter enumerations for the L3GD20H driver.
//!
//! These enums map directly to datasheet field encodings and are used across
//! [`Config`](crate::config::Config) and the high-level driver APIs. Prefer these
//! types over raw integers to keep configuration values valid and explicit.
//!
//! # Examples
//!
//! ```rust
//! use l3gd20h::params::{FullScale, RateBandwidth, FifoMode};
//!
//! let scale = FullScale::Dps500;
//! let rate = RateBandwidth::Odr200HzBw0;
//! let fifo = FifoMode::Stream;
//! let _ = (scale, rate, fifo);
//! ```

use modular_bitfield::prelude::Specifier;

/// I2C target addresses selected by the SDO/SA0 pin (7-bit form).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AddressPin {
    /// SDO/SA0 tied to ground.
    SdoLow = 0x6A,
    /// SDO/SA0 tied to the supply rail.
    SdoHigh = 0x6B,
}

impl AddressPin {
    /// Returns the 7-bit I2C address for this pin strapping.
    pub const fn address(self) -> u8 {
        self as u8
    }
}

/// Angular-rate axes, encoded as their `CTRL1` enable-bit index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Axis {
    /// Y axis (`CTRL1` bit 0).
    Y = 0,
    /// X axis (`CTRL1` bit 1).
    X = 1,
    /// Z axis (`CTRL1` bit 2).
    Z = 2,
}

/// Operating modes derived from the `CTRL1` power-down and axis-enable bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Mode {
    /// Power-down mode.
    PowerDown,
    /// Normal measurement mode.
    Normal,
    /// Sleep mode (powered with all axes disabled).
    Sleep,
}

/// High-pass filter operating modes encoded in `CTRL2[5:4]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Specifier)]
#[repr(u8)]
#[bits = 2]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HighPassMode {
    /// Normal mode, reset by reading the reference register.
    NormalReset = 0b00,
    /// Reference signal used for filtering.
    ReferenceSignal = 0b01,
    /// Normal mode.
    Normal = 0b10,
    /// Autoreset on interrupt event.
    AutoResetOnInterrupt = 0b11,
}

/// High-pass filter cut-off frequency codes encoded in `CTRL2[3:0]`.
///
/// The resulting corner frequency depends on the active output data rate;
/// see [`RateBandwidth`] and the datasheet cut-off table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Specifier)]
#[repr(u8)]
#[bits = 4]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HighPassCutoff {
    /// Highest corner frequency for the active data rate.
    Cutoff0 = 0x0,
    /// Cut-off code 1.
    Cutoff1 = 0x1,
    /// Cut-off code 2.
    Cutoff2 = 0x2,
    /// Cut-off code 3.
    Cutoff3 = 0x3,
    /// Cut-off code 4.
    Cutoff4 = 0x4,
    /// Cut-off code 5.
    Cutoff5 = 0x5,
    /// Cut-off code 6.
    Cutoff6 = 0x6,
    /// Cut-off code 7.
    Cutoff7 = 0x7,
    /// Cut-off code 8.
    Cutoff8 = 0x8,
    /// Lowest corner frequency for the active data rate.
    Cutoff9 = 0x9,
}

/// Output data rate and bandwidth selections.
///
/// Each variant combines the `CTRL1` DR/BW bits with the `LOW_ODR` bit, so a
/// single code describes the complete rate configuration. The `BwN` suffix is
/// the raw bandwidth code; the resulting cut-off frequency is listed per
/// variant where the datasheet defines one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RateBandwidth {
    /// 100 Hz ODR, 12.5 Hz cut-off.
    Odr100HzBw0 = 0x00,
    /// 100 Hz ODR, 25 Hz cut-off.
    Odr100HzBw1 = 0x01,
    /// 100 Hz ODR, 25 Hz cut-off.
    Odr100HzBw2 = 0x02,
    /// 100 Hz ODR, 25 Hz cut-off.
    Odr100HzBw3 = 0x03,
    /// 200 Hz ODR, 12.5 Hz cut-off.
    Odr200HzBw0 = 0x04,
    /// 200 Hz ODR, cut-off not specified.
    Odr200HzBw1 = 0x05,
    /// 200 Hz ODR, cut-off not specified.
    Odr200HzBw2 = 0x06,
    /// 200 Hz ODR, 70 Hz cut-off.
    Odr200HzBw3 = 0x07,
    /// 400 Hz ODR, 20 Hz cut-off.
    Odr400HzBw0 = 0x08,
    /// 400 Hz ODR, 25 Hz cut-off.
    Odr400HzBw1 = 0x09,
    /// 400 Hz ODR, 50 Hz cut-off.
    Odr400HzBw2 = 0x0A,
    /// 400 Hz ODR, 110 Hz cut-off.
    Odr400HzBw3 = 0x0B,
    /// 800 Hz ODR, 30 Hz cut-off.
    Odr800HzBw0 = 0x0C,
    /// 800 Hz ODR, 35 Hz cut-off.
    Odr800HzBw1 = 0x0D,
    /// 800 Hz ODR, cut-off not specified.
    Odr800HzBw2 = 0x0E,
    /// 800 Hz ODR, 100 Hz cut-off.
    Odr800HzBw3 = 0x0F,
    /// Low-power 12.5 Hz ODR.
    Odr12p5HzBw0 = 0x10,
    /// Low-power 12.5 Hz ODR.
    Odr12p5HzBw1 = 0x11,
    /// Low-power 12.5 Hz ODR.
    Odr12p5HzBw2 = 0x12,
    /// Low-power 12.5 Hz ODR.
    Odr12p5HzBw3 = 0x13,
    /// Low-power 25 Hz ODR.
    Odr25HzBw0 = 0x14,
    /// Low-power 25 Hz ODR.
    Odr25HzBw1 = 0x15,
    /// Low-power 25 Hz ODR.
    Odr25HzBw2 = 0x16,
    /// Low-power 25 Hz ODR.
    Odr25HzBw3 = 0x17,
    /// Low-power 50 Hz ODR, 16.6 Hz cut-off.
    Odr50HzBw0 = 0x18,
    /// Low-power 50 Hz ODR, 16.6 Hz cut-off.
    Odr50HzBw1 = 0x19,
    /// Low-power 50 Hz ODR, 16.6 Hz cut-off.
    Odr50HzBw2 = 0x1A,
    /// Low-power 50 Hz ODR, 16.6 Hz cut-off.
    Odr50HzBw3 = 0x1B,
}

impl RateBandwidth {
    /// Returns `true` when this selection requires the `LOW_ODR` bit.
    pub const fn low_odr(self) -> bool {
        (self as u8) & 0x10 != 0
    }

    /// Returns the DR/BW nibble written to `CTRL1[7:4]`.
    pub const fn ctrl1_bits(self) -> u8 {
        (self as u8) & 0x0F
    }

    /// Returns the output data rate in hertz.
    pub const fn odr_hz(self) -> f32 {
        match (self as u8) >> 2 {
            0b000 => 100.0,
            0b001 => 200.0,
            0b010 => 400.0,
            0b011 => 800.0,
            0b100 => 12.5,
            0b101 => 25.0,
            _ => 50.0,
        }
    }

    /// Rebuilds the selection from the `LOW_ODR` bit and the `CTRL1` nibble.
    ///
    /// Returns `None` for nibble values the device does not document in
    /// low-speed mode.
    pub const fn from_bits(low_odr: bool, ctrl1_bits: u8) -> Option<Self> {
        let code = if low_odr {
            0x10 | (ctrl1_bits & 0x0F)
        } else {
            ctrl1_bits & 0x0F
        };
        Some(match code {
            0x00 => Self::Odr100HzBw0,
            0x01 => Self::Odr100HzBw1,
            0x02 => Self::Odr100HzBw2,
            0x03 => Self::Odr100HzBw3,
            0x04 => Self::Odr200HzBw0,
            0x05 => Self::Odr200HzBw1,
            0x06 => Self::Odr200HzBw2,
            0x07 => Self::Odr200HzBw3,
            0x08 => Self::Odr400HzBw0,
            0x09 => Self::Odr400HzBw1,
            0x0A => Self::Odr400HzBw2,
            0x0B => Self::Odr400HzBw3,
            0x0C => Self::Odr800HzBw0,
            0x0D => Self::Odr800HzBw1,
            0x0E => Self::Odr800HzBw2,
            0x0F => Self::Odr800HzBw3,
            0x10 => Self::Odr12p5HzBw0,
            0x11 => Self::Odr12p5HzBw1,
            0x12 => Self::Odr12p5HzBw2,
            0x13 => Self::Odr12p5HzBw3,
            0x14 => Self::Odr25HzBw0,
            0x15 => Self::Odr25HzBw1,
            0x16 => Self::Odr25HzBw2,
            0x17 => Self::Odr25HzBw3,
            0x18 => Self::Odr50HzBw0,
            0x19 => Self::Odr50HzBw1,
            0x1A => Self::Odr50HzBw2,
            0x1B => Self::Odr50HzBw3,
            _ => return None,
        })
    }
}

/// Raw data byte order encoded in `CTRL4.BLE`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Specifier)]
#[repr(u8)]
#[bits = 1]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Endianness {
    /// Least significant byte at the lower register address.
    Little = 0,
    /// Most significant byte at the lower register address.
    Big = 1,
}

/// Full-scale angular-rate ranges encoded in `CTRL4.FS`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Specifier)]
#[repr(u8)]
#[bits = 2]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FullScale {
    /// ±245 degrees per second.
    Dps245 = 0b00,
    /// ±500 degrees per second.
    Dps500 = 0b01,
    /// ±2000 degrees per second.
    Dps2000 = 0b10,
}

impl FullScale {
    /// Sensitivity in milli-dps per least significant bit.
    pub const fn sensitivity_mdps(self) -> f32 {
        match self {
            Self::Dps245 => 8.75,
            Self::Dps500 => 17.5,
            Self::Dps2000 => 70.0,
        }
    }

    /// Interrupt threshold weight in milli-dps per least significant bit.
    pub const fn threshold_lsb_mdps(self) -> f32 {
        match self {
            Self::Dps245 => 7.5,
            Self::Dps500 => 15.3,
            Self::Dps2000 => 61.0,
        }
    }

    /// Decodes the `CTRL4.FS` bits; both `0b10` and `0b11` select ±2000 dps.
    pub const fn from_bits(bits: u8) -> Self {
        match bits & 0x03 {
            0b00 => Self::Dps245,
            0b01 => Self::Dps500,
            _ => Self::Dps2000,
        }
    }
}

/// Self-test modes encoded in `CTRL4.ST`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Specifier)]
#[repr(u8)]
#[bits = 2]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SelfTestMode {
    /// Self-test disabled.
    Normal = 0b00,
    /// Self-test 0 (positive sign actuation).
    SelfTest0 = 0b01,
    /// Self-test 1 (negative sign actuation).
    SelfTest1 = 0b11,
}

/// SPI wire count encoded in `CTRL4.SIM`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Specifier)]
#[repr(u8)]
#[bits = 1]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SpiWire {
    /// 4-wire SPI.
    Four = 0,
    /// 3-wire SPI.
    Three = 1,
}

/// Boot behaviour encoded in `CTRL5.BOOT`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Specifier)]
#[repr(u8)]
#[bits = 1]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Boot {
    /// Normal operation.
    Normal = 0,
    /// Reboot memory content.
    Reboot = 1,
}

/// Filter stage chains selectable for the output and interrupt paths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Specifier)]
#[repr(u8)]
#[bits = 2]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FilterPath {
    /// Low-pass filter 1 only.
    Lpf1 = 0b00,
    /// Low-pass filter 1 followed by the high-pass filter.
    Lpf1Hpf = 0b01,
    /// Low-pass filter 1, high-pass filter, low-pass filter 2.
    Lpf1HpfLpf2 = 0b10,
}

/// FIFO operating modes encoded in `FIFO_CTRL.FM`.
///
/// Each mode has a distinct fill policy once the 32-slot queue is full:
/// `Fifo` halts collection (the overrun status flags assert), `Stream` and
/// `DynamicStream` discard the oldest sample, and the transitional modes
/// switch between those policies on an interrupt trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Specifier)]
#[repr(u8)]
#[bits = 3]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FifoMode {
    /// FIFO bypassed; output registers hold the latest sample only.
    Bypass = 0b000,
    /// Collect until full, then stop.
    Fifo = 0b001,
    /// Continuous collection, oldest sample discarded when full.
    Stream = 0b010,
    /// Stream until trigger, then switch to FIFO.
    StreamToFifo = 0b011,
    /// Bypass until trigger, then switch to stream.
    BypassToStream = 0b100,
    /// Stream mode with dynamic watermark behaviour.
    DynamicStream = 0b110,
    /// Bypass until trigger, then switch to FIFO.
    BypassToFifo = 0b111,
}

/// Interrupt pin polarity encoded in `CTRL3.H_Lactive` and `LOW_ODR.DRDY_HL`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Specifier)]
#[repr(u8)]
#[bits = 1]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ActiveLevel {
    /// Interrupt lines assert high.
    High = 0,
    /// Interrupt lines assert low.
    Low = 1,
}

/// Interrupt pin output driver encoded in `CTRL3.PP_OD`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Specifier)]
#[repr(u8)]
#[bits = 1]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PinMode {
    /// Push-pull output stage.
    PushPull = 0,
    /// Open-drain output stage.
    OpenDrain = 1,
}

/// Interrupt duration counter behaviour encoded in `IG_THS_XH.DCRM`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Specifier)]
#[repr(u8)]
#[bits = 1]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CounterMode {
    /// Counter resets when the event condition deasserts.
    Reset = 0,
    /// Counter decrements when the event condition deasserts.
    Decrement = 1,
}

/// Conditions that can be armed in the `IG_CFG` register, encoded as their
/// bit index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InterruptCondition {
    /// X axis below threshold.
    XLow = 0,
    /// X axis above threshold.
    XHigh = 1,
    /// Y axis below threshold.
    YLow = 2,
    /// Y axis above threshold.
    YHigh = 3,
    /// Z axis below threshold.
    ZLow = 4,
    /// Z axis above threshold.
    ZHigh = 5,
    /// Latch the interrupt request until `IG_SRC` is read.
    Latch = 6,
    /// Require all armed conditions (AND) instead of any (OR).
    AndCombination = 7,
}
