//! Register map definitions for the L3GD20H gyroscope.
#![allow(unused_parens)]

use modular_bitfield::prelude::*;

use crate::params::{
    ActiveLevel, Boot, CounterMode, Endianness, FifoMode, FilterPath, FullScale, HighPassCutoff,
    HighPassMode, PinMode, SelfTestMode, SpiWire,
};

/// Register address of `WHO_AM_I`.
pub const REG_WHO_AM_I: u8 = 0x0F;
/// Register address of `CTRL1`.
pub const REG_CTRL1: u8 = 0x20;
/// Register address of `CTRL2`.
pub const REG_CTRL2: u8 = 0x21;
/// Register address of `CTRL3`.
pub const REG_CTRL3: u8 = 0x22;
/// Register address of `CTRL4`.
pub const REG_CTRL4: u8 = 0x23;
/// Register address of `CTRL5`.
pub const REG_CTRL5: u8 = 0x24;
/// Register address of `REFERENCE`.
pub const REG_REFERENCE: u8 = 0x25;
/// Register address of `OUT_TEMP`.
pub const REG_OUT_TEMP: u8 = 0x26;
/// Register address of `STATUS`.
pub const REG_STATUS: u8 = 0x27;
/// Register address of `OUT_X_L`.
pub const REG_OUT_X_L: u8 = 0x28;
/// Register address of `OUT_X_H`.
pub const REG_OUT_X_H: u8 = 0x29;
/// Register address of `OUT_Y_L`.
pub const REG_OUT_Y_L: u8 = 0x2A;
/// Register address of `OUT_Y_H`.
pub const REG_OUT_Y_H: u8 = 0x2B;
/// Register address of `OUT_Z_L`.
pub const REG_OUT_Z_L: u8 = 0x2C;
/// Register address of `OUT_Z_H`.
pub const REG_OUT_Z_H: u8 = 0x2D;
/// Register address of `FIFO_CTRL`.
pub const REG_FIFO_CTRL: u8 = 0x2E;
/// Register address of `FIFO_SRC`.
pub const REG_FIFO_SRC: u8 = 0x2F;
/// Register address of `IG_CFG`.
pub const REG_IG_CFG: u8 = 0x30;
/// Register address of `IG_SRC`.
pub const REG_IG_SRC: u8 = 0x31;
/// Register address of `IG_THS_XH`.
pub const REG_IG_THS_XH: u8 = 0x32;
/// Register address of `IG_THS_XL`.
pub const REG_IG_THS_XL: u8 = 0x33;
/// Register address of `IG_THS_YH`.
pub const REG_IG_THS_YH: u8 = 0x34;
/// Register address of `IG_THS_YL`.
pub const REG_IG_THS_YL: u8 = 0x35;
/// Register address of `IG_THS_ZH`.
pub const REG_IG_THS_ZH: u8 = 0x36;
/// Register address of `IG_THS_ZL`.
pub const REG_IG_THS_ZL: u8 = 0x37;
/// Register address of `IG_DURATION`.
pub const REG_IG_DURATION: u8 = 0x38;
/// Register address of `LOW_ODR`.
pub const REG_LOW_ODR: u8 = 0x39;

/// Identity value reported by `WHO_AM_I`.
pub const EXPECTED_DEVICE_ID: u8 = 0xD7;

/// Access permissions encoded for each register.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegisterAccess {
    /// Read-only register.
    ReadOnly,
    /// Write-only register.
    WriteOnly,
    /// Read/write register.
    ReadWrite,
}

/// Minimal metadata exposed by every register value type.
pub trait Register {
    /// Raw storage backing the register payload.
    type Raw: Copy;
    /// Register address as documented in the datasheet.
    const ADDRESS: u8;
    /// Access permission classification.
    const ACCESS: RegisterAccess;
    /// Optional reset/default value defined by the datasheet.
    const RESET_VALUE: Option<Self::Raw>;
}

/// Bitfield representation of the `CTRL1` register (address `0x20`).
#[allow(unused_parens)]
#[bitfield]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ctrl1 {
    // Y axis enable (bit 0).
    pub y_enable: bool,
    // X axis enable (bit 1).
    pub x_enable: bool,
    // Z axis enable (bit 2).
    pub z_enable: bool,
    // Power-down disable (bit 3); 0 keeps the device powered down.
    pub power: bool,
    // Bandwidth selection (bits 5:4).
    pub bandwidth: B2,
    // Output data rate selection (bits 7:6).
    pub data_rate: B2,
}

impl Ctrl1 {
    /// Writes the combined DR/BW nibble (bits 7:4).
    pub fn set_rate_bits(&mut self, bits: u8) {
        self.set_bandwidth(bits & 0x03);
        self.set_data_rate((bits >> 2) & 0x03);
    }

    /// Reads the combined DR/BW nibble (bits 7:4).
    pub fn rate_bits(&self) -> u8 {
        (self.data_rate() << 2) | self.bandwidth()
    }
}

impl From<u8> for Ctrl1 {
    fn from(value: u8) -> Self {
        Self::from_bytes([value])
    }
}

impl From<Ctrl1> for u8 {
    fn from(value: Ctrl1) -> Self {
        value.into_bytes()[0]
    }
}

/// Bitfield representation of the `CTRL2` register (address `0x21`).
#[allow(unused_parens)]
#[bitfield]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ctrl2 {
    // High-pass cut-off frequency code (bits 3:0).
    pub cutoff: HighPassCutoff,
    // High-pass filter mode (bits 5:4).
    pub mode: HighPassMode,
    // Level-sensitive trigger enable (bit 6).
    pub level_trigger: bool,
    // Edge-sensitive (external) trigger enable (bit 7).
    pub edge_trigger: bool,
}

impl From<u8> for Ctrl2 {
    fn from(value: u8) -> Self {
        Self::from_bytes([value])
    }
}

impl From<Ctrl2> for u8 {
    fn from(value: Ctrl2) -> Self {
        value.into_bytes()[0]
    }
}

/// Bitfield representation of the `CTRL3` register (address `0x22`).
#[allow(unused_parens)]
#[bitfield]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ctrl3 {
    // FIFO empty signal routed to INT2 (bit 0).
    pub fifo_empty_on_int2: bool,
    // FIFO overrun signal routed to INT2 (bit 1).
    pub fifo_overrun_on_int2: bool,
    // FIFO threshold signal routed to INT2 (bit 2).
    pub fifo_threshold_on_int2: bool,
    // Data-ready signal routed to INT2 (bit 3).
    pub data_ready_on_int2: bool,
    // Interrupt pin output stage (bit 4).
    pub pin_mode: PinMode,
    // Interrupt active level (bit 5).
    pub active_level: ActiveLevel,
    // Boot status routed to INT1 (bit 6).
    pub boot_on_int1: bool,
    // Interrupt generator routed to INT1 (bit 7).
    pub interrupt1_enable: bool,
}

impl From<u8> for Ctrl3 {
    fn from(value: u8) -> Self {
        Self::from_bytes([value])
    }
}

impl From<Ctrl3> for u8 {
    fn from(value: Ctrl3) -> Self {
        value.into_bytes()[0]
    }
}

/// Bitfield representation of the `CTRL4` register (address `0x23`).
#[allow(unused_parens)]
#[bitfield]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ctrl4 {
    // SPI wire mode (bit 0).
    pub spi_wire: SpiWire,
    // Self-test selection (bits 2:1).
    pub self_test: SelfTestMode,
    // Level-sensitive latch enable (bit 3).
    pub level_sensitive_latched: bool,
    // Full-scale selection (bits 5:4).
    pub full_scale: FullScale,
    // Raw data byte order (bit 6).
    pub endianness: Endianness,
    // Block data update (bit 7).
    pub block_data_update: bool,
}

impl From<u8> for Ctrl4 {
    fn from(value: u8) -> Self {
        Self::from_bytes([value])
    }
}

impl From<Ctrl4> for u8 {
    fn from(value: Ctrl4) -> Self {
        value.into_bytes()[0]
    }
}

/// Bitfield representation of the `CTRL5` register (address `0x24`).
#[allow(unused_parens)]
#[bitfield]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ctrl5 {
    // Output path filter selection (bits 1:0).
    pub out_selection: FilterPath,
    // Interrupt generator filter selection (bits 3:2).
    pub interrupt_selection: FilterPath,
    // High-pass filter enable (bit 4).
    pub high_pass_enable: bool,
    // Stop FIFO collection at the threshold level (bit 5).
    pub stop_on_threshold: bool,
    // FIFO enable (bit 6).
    pub fifo_enable: bool,
    // Reboot memory content (bit 7).
    pub boot: Boot,
}

impl From<u8> for Ctrl5 {
    fn from(value: u8) -> Self {
        Self::from_bytes([value])
    }
}

impl From<Ctrl5> for u8 {
    fn from(value: Ctrl5) -> Self {
        value.into_bytes()[0]
    }
}

/// Bitfield representation of the `STATUS` register (address `0x27`).
#[allow(unused_parens)]
#[bitfield]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Status {
    // X axis data available (bit 0).
    pub x_data_ready: bool,
    // Y axis data available (bit 1).
    pub y_data_ready: bool,
    // Z axis data available (bit 2).
    pub z_data_ready: bool,
    // All axes data available (bit 3).
    pub xyz_data_ready: bool,
    // X axis overrun (bit 4).
    pub x_overrun: bool,
    // Y axis overrun (bit 5).
    pub y_overrun: bool,
    // Z axis overrun (bit 6).
    pub z_overrun: bool,
    // All axes overrun (bit 7).
    pub xyz_overrun: bool,
}

impl From<u8> for Status {
    fn from(value: u8) -> Self {
        Self::from_bytes([value])
    }
}

impl From<Status> for u8 {
    fn from(value: Status) -> Self {
        value.into_bytes()[0]
    }
}

/// Bitfield representation of the `FIFO_CTRL` register (address `0x2E`).
#[allow(unused_parens)]
#[bitfield]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FifoCtrl {
    // FIFO threshold level in samples (bits 4:0).
    pub threshold: B5,
    // FIFO operating mode (bits 7:5).
    pub mode: FifoMode,
}

impl From<u8> for FifoCtrl {
    fn from(value: u8) -> Self {
        Self::from_bytes([value])
    }
}

impl From<FifoCtrl> for u8 {
    fn from(value: FifoCtrl) -> Self {
        value.into_bytes()[0]
    }
}

/// Bitfield representation of the `FIFO_SRC` register (address `0x2F`).
#[allow(unused_parens)]
#[bitfield]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FifoSrc {
    // Number of unread samples (bits 4:0).
    pub level: B5,
    // FIFO empty flag (bit 5).
    pub empty: bool,
    // FIFO overrun flag (bit 6).
    pub overrun: bool,
    // Threshold reached flag (bit 7).
    pub threshold: bool,
}

impl From<u8> for FifoSrc {
    fn from(value: u8) -> Self {
        Self::from_bytes([value])
    }
}

impl From<FifoSrc> for u8 {
    fn from(value: FifoSrc) -> Self {
        value.into_bytes()[0]
    }
}

/// Bitfield representation of the `IG_CFG` register (address `0x30`).
#[allow(unused_parens)]
#[bitfield]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IgCfg {
    // X low event enable (bit 0).
    pub x_low: bool,
    // X high event enable (bit 1).
    pub x_high: bool,
    // Y low event enable (bit 2).
    pub y_low: bool,
    // Y high event enable (bit 3).
    pub y_high: bool,
    // Z low event enable (bit 4).
    pub z_low: bool,
    // Z high event enable (bit 5).
    pub z_high: bool,
    // Latch interrupt request (bit 6).
    pub latch: bool,
    // AND/OR combination of events (bit 7).
    pub and_combination: bool,
}

impl From<u8> for IgCfg {
    fn from(value: u8) -> Self {
        Self::from_bytes([value])
    }
}

impl From<IgCfg> for u8 {
    fn from(value: IgCfg) -> Self {
        value.into_bytes()[0]
    }
}

/// Bitfield representation of the `IG_SRC` register (address `0x31`).
#[allow(unused_parens)]
#[bitfield]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IgSrc {
    // X low event occurred (bit 0).
    pub x_low: bool,
    // X high event occurred (bit 1).
    pub x_high: bool,
    // Y low event occurred (bit 2).
    pub y_low: bool,
    // Y high event occurred (bit 3).
    pub y_high: bool,
    // Z low event occurred (bit 4).
    pub z_low: bool,
    // Z high event occurred (bit 5).
    pub z_high: bool,
    // Interrupt active (bit 6).
    pub active: bool,
    #[skip]
    __: B1,
}

impl From<u8> for IgSrc {
    fn from(value: u8) -> Self {
        Self::from_bytes([value])
    }
}

impl From<IgSrc> for u8 {
    fn from(value: IgSrc) -> Self {
        value.into_bytes()[0]
    }
}

/// Bitfield representation of the `IG_THS_XH` register (address `0x32`).
///
/// The Y/Z high-threshold registers share the layout minus the counter-mode
/// bit and are handled as plain 7-bit values.
#[allow(unused_parens)]
#[bitfield]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IgThresholdXHigh {
    // Threshold bits 14:8.
    pub threshold: B7,
    // Duration counter behaviour (bit 7).
    pub counter_mode: CounterMode,
}

impl From<u8> for IgThresholdXHigh {
    fn from(value: u8) -> Self {
        Self::from_bytes([value])
    }
}

impl From<IgThresholdXHigh> for u8 {
    fn from(value: IgThresholdXHigh) -> Self {
        value.into_bytes()[0]
    }
}

/// Bitfield representation of the `IG_DURATION` register (address `0x38`).
#[allow(unused_parens)]
#[bitfield]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IgDuration {
    // Minimum event duration in ODR cycles (bits 6:0).
    pub duration: B7,
    // Wait for the duration before deasserting (bit 7).
    pub wait: bool,
}

impl From<u8> for IgDuration {
    fn from(value: u8) -> Self {
        Self::from_bytes([value])
    }
}

impl From<IgDuration> for u8 {
    fn from(value: IgDuration) -> Self {
        value.into_bytes()[0]
    }
}

/// Bitfield representation of the `LOW_ODR` register (address `0x39`).
#[allow(unused_parens)]
#[bitfield]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LowOdr {
    // Low-speed output data rate enable (bit 0).
    pub low_odr: bool,
    #[skip]
    __: B1,
    // Software reset, self-clearing (bit 2).
    pub soft_reset: bool,
    // Disable the I2C interface (bit 3).
    pub i2c_disable: bool,
    #[skip]
    __: B1,
    // Data-ready pin active level (bit 5).
    pub data_ready_active_level: ActiveLevel,
    #[skip]
    __: B2,
}

impl From<u8> for LowOdr {
    fn from(value: u8) -> Self {
        Self::from_bytes([value])
    }
}

impl From<LowOdr> for u8 {
    fn from(value: LowOdr) -> Self {
        value.into_bytes()[0]
    }
}

impl Register for Ctrl1 {
    type Raw = u8;
    const ADDRESS: u8 = REG_CTRL1;
    const ACCESS: RegisterAccess = RegisterAccess::ReadWrite;
    const RESET_VALUE: Option<Self::Raw> = Some(0x07);
}

impl Register for Ctrl2 {
    type Raw = u8;
    const ADDRESS: u8 = REG_CTRL2;
    const ACCESS: RegisterAccess = RegisterAccess::ReadWrite;
    const RESET_VALUE: Option<Self::Raw> = Some(0x00);
}

impl Register for Ctrl3 {
    type Raw = u8;
    const ADDRESS: u8 = REG_CTRL3;
    const ACCESS: RegisterAccess = RegisterAccess::ReadWrite;
    const RESET_VALUE: Option<Self::Raw> = Some(0x00);
}

impl Register for Ctrl4 {
    type Raw = u8;
    const ADDRESS: u8 = REG_CTRL4;
    const ACCESS: RegisterAccess = RegisterAccess::ReadWrite;
    const RESET_VALUE: Option<Self::Raw> = Some(0x00);
}

impl Register for Ctrl5 {
    type Raw = u8;
    const ADDRESS: u8 = REG_CTRL5;
    const ACCESS: RegisterAccess = RegisterAccess::ReadWrite;
    const RESET_VALUE: Option<Self::Raw> = Some(0x00);
}

impl Register for Status {
    type Raw = u8;
    const ADDRESS: u8 = REG_STATUS;
    const ACCESS: RegisterAccess = RegisterAccess::ReadOnly;
    const RESET_VALUE: Option<Self::Raw> = None;
}

impl Register for FifoCtrl {
    type Raw = u8;
    const ADDRESS: u8 = REG_FIFO_CTRL;
    const ACCESS: RegisterAccess = RegisterAccess::ReadWrite;
    const RESET_VALUE: Option<Self::Raw> = Some(0x00);
}

impl Register for FifoSrc {
    type Raw = u8;
    const ADDRESS: u8 = REG_FIFO_SRC;
    const ACCESS: RegisterAccess = RegisterAccess::ReadOnly;
    const RESET_VALUE: Option<Self::Raw> = None;
}

impl Register for IgCfg {
    type Raw = u8;
    const ADDRESS: u8 = REG_IG_CFG;
    const ACCESS: RegisterAccess = RegisterAccess::ReadWrite;
    const RESET_VALUE: Option<Self::Raw> = Some(0x00);
}

impl Register for IgSrc {
    type Raw = u8;
    const ADDRESS: u8 = REG_IG_SRC;
    const ACCESS: RegisterAccess = RegisterAccess::ReadOnly;
    const RESET_VALUE: Option<Self::Raw> = None;
}

impl Register for IgThresholdXHigh {
    type Raw = u8;
    const ADDRESS: u8 = REG_IG_THS_XH;
    const ACCESS: RegisterAccess = RegisterAccess::ReadWrite;
    const RESET_VALUE: Option<Self::Raw> = Some(0x00);
}

impl Register for IgDuration {
    type Raw = u8;
    const ADDRESS: u8 = REG_IG_DURATION;
    const ACCESS: RegisterAccess = RegisterAccess::ReadWrite;
    const RESET_VALUE: Option<Self::Raw> = Some(0x00);
}

impl Register for LowOdr {
    type Raw = u8;
    const ADDRESS: u8 = REG_LOW_ODR;
    const ACCESS: RegisterAccess = RegisterAccess::ReadWrite;
    const RESET_VALUE: Option<Self::Raw> = Some(0x00);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::{Endianness, FifoMode, FullScale, SelfTestMode, SpiWire};

    /// Validates that Status bitfields match the datasheet layout.
    #[test]
    fn status_layout_matches_datasheet() {
        let status = Status::from(0b1000_1001);
        assert!(status.x_data_ready());
        assert!(!status.y_data_ready());
        assert!(!status.z_data_ready());
        assert!(status.xyz_data_ready());
        assert!(!status.x_overrun());
        assert!(!status.y_overrun());
        assert!(!status.z_overrun());
        assert!(status.xyz_overrun());
    }

    /// Ensures Ctrl4 encodes and decodes as expected across all fields.
    #[test]
    fn ctrl4_roundtrip() {
        let ctrl4 = Ctrl4::new()
            .with_spi_wire(SpiWire::Three)
            .with_self_test(SelfTestMode::SelfTest1)
            .with_level_sensitive_latched(true)
            .with_full_scale(FullScale::Dps2000)
            .with_endianness(Endianness::Big)
            .with_block_data_update(true);

        assert_eq!(u8::from(ctrl4), 0b1_1_10_1_11_1);
        let decoded = Ctrl4::from(u8::from(ctrl4));
        assert_eq!(decoded.full_scale(), FullScale::Dps2000);
        assert_eq!(decoded.self_test(), SelfTestMode::SelfTest1);
        assert_eq!(decoded.endianness(), Endianness::Big);
        assert!(decoded.block_data_update());
    }

    /// Verifies the FIFO control register packs mode and threshold correctly.
    #[test]
    fn fifo_ctrl_packs_mode_and_threshold() {
        let ctrl = FifoCtrl::new()
            .with_mode(FifoMode::Stream)
            .with_threshold(16);
        assert_eq!(u8::from(ctrl), 0b010_10000);

        let decoded = FifoCtrl::from(0b001_11111);
        assert_eq!(decoded.mode(), FifoMode::Fifo);
        assert_eq!(decoded.threshold(), 31);
    }

    /// Verifies the soft-reset bit position in LOW_ODR.
    #[test]
    fn low_odr_soft_reset_bit() {
        let mut reg = LowOdr::from(0x00);
        reg.set_soft_reset(true);
        assert_eq!(u8::from(reg), 0x04);
    }
}
