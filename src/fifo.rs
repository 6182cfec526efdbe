//! FIFO decoding utilities and sample types.

use crate::params::{Endianness, FullScale};

/// Number of samples the hardware FIFO can hold.
pub const FIFO_DEPTH: usize = 32;
/// Number of consecutive bytes spanning one X, Y, Z frame.
pub const FRAME_BYTES: usize = 6;

/// A decoded angular-rate sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    /// Raw axis readings in device order (X, Y, Z).
    pub raw: [i16; 3],
    /// Calibrated readings in degrees per second (X, Y, Z).
    pub dps: [f32; 3],
}

impl Sample {
    /// Scales raw axis readings using the sensitivity of `full_scale`.
    pub fn from_raw(raw: [i16; 3], full_scale: FullScale) -> Self {
        let sensitivity = full_scale.sensitivity_mdps();
        Self {
            raw,
            dps: [
                raw[0] as f32 * sensitivity / 1000.0,
                raw[1] as f32 * sensitivity / 1000.0,
                raw[2] as f32 * sensitivity / 1000.0,
            ],
        }
    }
}

impl Default for Sample {
    fn default() -> Self {
        Self {
            raw: [0; 3],
            dps: [0.0; 3],
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Sample {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(
            f,
            "Sample {{ x: {} dps, y: {} dps, z: {} dps }}",
            self.dps[0],
            self.dps[1],
            self.dps[2]
        );
    }
}

/// Snapshot of the `FIFO_SRC` register.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FifoSource {
    /// Number of unread samples in the queue.
    pub level: u8,
    /// The queue is empty.
    pub empty: bool,
    /// The queue overran; at least one sample was lost or collection halted.
    pub overrun: bool,
    /// The fill level is at or above the configured threshold.
    pub threshold_reached: bool,
}

impl FifoSource {
    /// Builds a snapshot from the raw `FIFO_SRC` bitfield.
    pub fn from_register(src: crate::registers::FifoSrc) -> Self {
        Self {
            level: src.level(),
            empty: src.empty(),
            overrun: src.overrun(),
            threshold_reached: src.threshold(),
        }
    }
}

/// Decodes one 6-byte output frame into signed axis readings.
pub fn decode_frame(bytes: &[u8], endianness: Endianness) -> [i16; 3] {
    let word = |lo: u8, hi: u8| match endianness {
        Endianness::Little => i16::from_le_bytes([lo, hi]),
        Endianness::Big => i16::from_be_bytes([lo, hi]),
    };

    [
        word(bytes[0], bytes[1]),
        word(bytes[2], bytes[3]),
        word(bytes[4], bytes[5]),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_frame_honors_byte_order() {
        let bytes = [0x01, 0x02, 0x03, 0x04, 0x05, 0x06];

        let little = decode_frame(&bytes, Endianness::Little);
        assert_eq!(little, [0x0201, 0x0403, 0x0605]);

        let big = decode_frame(&bytes, Endianness::Big);
        assert_eq!(big, [0x0102, 0x0304, 0x0506]);
    }

    #[test]
    fn zero_raw_is_zero_dps_for_every_scale() {
        for scale in [FullScale::Dps245, FullScale::Dps500, FullScale::Dps2000] {
            let sample = Sample::from_raw([0, 0, 0], scale);
            assert_eq!(sample.dps, [0.0, 0.0, 0.0]);
        }
    }

    #[test]
    fn scaling_tracks_full_scale_sensitivity() {
        let sample = Sample::from_raw([1000, -1000, 0], FullScale::Dps245);
        assert!((sample.dps[0] - 8.75).abs() < 1e-4);
        assert!((sample.dps[1] + 8.75).abs() < 1e-4);

        let sample = Sample::from_raw([1000, 0, 0], FullScale::Dps500);
        assert!((sample.dps[0] - 17.5).abs() < 1e-4);

        let sample = Sample::from_raw([1000, 0, 0], FullScale::Dps2000);
        assert!((sample.dps[0] - 70.0).abs() < 1e-4);
    }
}
