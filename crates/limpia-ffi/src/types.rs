//! C-compatible type definitions for the conditioning C API.
//!
//! All types here are `#[repr(C)]` and are safe to pass across FFI boundaries.

use limpia::StreamProcessor;

// ---------------------------------------------------------------------------
// Error codes
// ---------------------------------------------------------------------------

/// Error codes returned by C API functions.
///
/// `0` = success, negative = error.
#[repr(i32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LimError {
    /// Operation succeeded.
    None = 0,
    /// Null pointer passed to a function that requires non-null.
    NullPointer = -1,
    /// Internal error (panic caught at FFI boundary).
    Internal = -2,
    /// Sample rate outside the supported range.
    BadSampleRate = -3,
    /// Channel count of zero.
    BadNumberChannels = -4,
    /// Negative stream delay.
    BadDelay = -5,
    /// Frame byte length does not match the negotiated format.
    BadDataLength = -6,
    /// A required stream format was never set.
    NotConfigured = -7,
    /// The conditioning engine rejected the frame.
    ProcessingFailed = -8,
    /// The caller-provided output buffer is too small.
    BufferTooSmall = -9,
}

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

/// Noise suppression aggressiveness level.
#[repr(i32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LimNoiseSuppressionLevel {
    Low = 0,
    Moderate = 1,
    High = 2,
}

/// Gain controller operating mode.
#[repr(i32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LimGainControlMode {
    Fixed = 0,
    AdaptiveDigital = 1,
    AdaptiveAnalog = 2,
}

/// Voice detection likelihood threshold.
#[repr(i32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LimVoiceDetectionLikelihood {
    VeryLow = 0,
    Low = 1,
    Moderate = 2,
    High = 3,
}

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Flat configuration struct for the conditioning pipeline.
///
/// Obtain a default-initialized instance via `lim_config_default()`. The
/// `*_level`, `*_mode`, and `*_likelihood` fields are meaningful only when
/// the matching `*_enabled` flag is set.
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct LimConfig {
    // -- Echo canceller --
    pub echo_canceller_enabled: bool,
    pub echo_canceller_mobile_mode: bool,

    // -- Noise suppression --
    pub noise_suppression_enabled: bool,
    pub noise_suppression_level: LimNoiseSuppressionLevel,

    // -- Gain control --
    pub gain_control_enabled: bool,
    pub gain_control_mode: LimGainControlMode,

    // -- Voice detection --
    pub voice_detection_enabled: bool,
    pub voice_detection_likelihood: LimVoiceDetectionLikelihood,
}

// ---------------------------------------------------------------------------
// Stream format
// ---------------------------------------------------------------------------

/// Audio stream format (sample rate and channel count).
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct LimStreamFormat {
    pub sample_rate_hz: u32,
    pub num_channels: u16,
}

// ---------------------------------------------------------------------------
// Statistics
// ---------------------------------------------------------------------------

/// Conditioning statistics.
///
/// Each statistic has a `has_*` boolean. When `false`, the corresponding
/// value field is meaningless.
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct LimStats {
    pub has_voice_detected: bool,
    pub voice_detected: bool,

    pub has_echo_detected: bool,
    pub echo_detected: bool,

    pub has_echo_return_loss: bool,
    pub echo_return_loss: f64,

    pub has_echo_return_loss_enhancement: bool,
    pub echo_return_loss_enhancement: f64,

    pub has_delay_ms: bool,
    pub delay_ms: i32,
}

// ---------------------------------------------------------------------------
// Opaque handle
// ---------------------------------------------------------------------------

/// Opaque handle to a stream processor.
///
/// Created via `lim_create()` or `lim_create_with_config()`.
/// Destroyed via `lim_destroy()`.
///
/// **NOT thread-safe**: all calls on the same handle must be serialized.
#[derive(Debug)]
pub struct LimStreamProcessor {
    pub(crate) inner: StreamProcessor,
}
