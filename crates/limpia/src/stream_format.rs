//! Stream format descriptors.

/// Minimum supported sample rate in Hz.
pub const MIN_SAMPLE_RATE_HZ: u32 = 8_000;

/// Maximum supported sample rate in Hz.
pub const MAX_SAMPLE_RATE_HZ: u32 = 384_000;

/// Properties of one audio stream: sampling rate and channel count.
///
/// A `StreamFormat` is a plain value and construction does not validate.
/// The [`StreamProcessor`](crate::StreamProcessor) checks the supported
/// range at the point a format is applied, so out-of-range values can be
/// built but never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StreamFormat {
    sample_rate_hz: u32,
    num_channels: u16,
}

impl StreamFormat {
    /// Creates a new stream format.
    pub const fn new(sample_rate_hz: u32, num_channels: u16) -> Self {
        Self {
            sample_rate_hz,
            num_channels,
        }
    }

    /// The sampling rate in Hz.
    #[inline]
    pub const fn sample_rate_hz(&self) -> u32 {
        self.sample_rate_hz
    }

    /// The number of interleaved channels.
    #[inline]
    pub const fn num_channels(&self) -> u16 {
        self.num_channels
    }
}
