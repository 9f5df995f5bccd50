//! Bidirectional conversions between C API types and Rust types.

use limpia::config::{
    Config, EchoCanceller, GainControl, GainControlMode, NoiseSuppression, NoiseSuppressionLevel,
    VoiceDetection, VoiceDetectionLikelihood,
};
use limpia::{ConditioningStats, Error, StreamFormat};

use crate::types::{
    LimConfig, LimError, LimGainControlMode, LimNoiseSuppressionLevel, LimStats, LimStreamFormat,
    LimVoiceDetectionLikelihood,
};

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

impl LimNoiseSuppressionLevel {
    pub(crate) fn to_rust(self) -> NoiseSuppressionLevel {
        match self {
            Self::Low => NoiseSuppressionLevel::Low,
            Self::Moderate => NoiseSuppressionLevel::Moderate,
            Self::High => NoiseSuppressionLevel::High,
        }
    }

    pub(crate) fn from_rust(level: NoiseSuppressionLevel) -> Self {
        match level {
            NoiseSuppressionLevel::Low => Self::Low,
            NoiseSuppressionLevel::Moderate => Self::Moderate,
            NoiseSuppressionLevel::High => Self::High,
        }
    }
}

impl LimGainControlMode {
    pub(crate) fn to_rust(self) -> GainControlMode {
        match self {
            Self::Fixed => GainControlMode::Fixed,
            Self::AdaptiveDigital => GainControlMode::AdaptiveDigital,
            Self::AdaptiveAnalog => GainControlMode::AdaptiveAnalog,
        }
    }

    pub(crate) fn from_rust(mode: GainControlMode) -> Self {
        match mode {
            GainControlMode::Fixed => Self::Fixed,
            GainControlMode::AdaptiveDigital => Self::AdaptiveDigital,
            GainControlMode::AdaptiveAnalog => Self::AdaptiveAnalog,
        }
    }
}

impl LimVoiceDetectionLikelihood {
    pub(crate) fn to_rust(self) -> VoiceDetectionLikelihood {
        match self {
            Self::VeryLow => VoiceDetectionLikelihood::VeryLow,
            Self::Low => VoiceDetectionLikelihood::Low,
            Self::Moderate => VoiceDetectionLikelihood::Moderate,
            Self::High => VoiceDetectionLikelihood::High,
        }
    }

    pub(crate) fn from_rust(likelihood: VoiceDetectionLikelihood) -> Self {
        match likelihood {
            VoiceDetectionLikelihood::VeryLow => Self::VeryLow,
            VoiceDetectionLikelihood::Low => Self::Low,
            VoiceDetectionLikelihood::Moderate => Self::Moderate,
            VoiceDetectionLikelihood::High => Self::High,
        }
    }
}

// ---------------------------------------------------------------------------
// LimConfig <-> Config
// ---------------------------------------------------------------------------

impl LimConfig {
    /// Convert from flat C config to nested Rust [`Config`].
    pub(crate) fn to_rust(self) -> Config {
        Config {
            echo_canceller: self.echo_canceller_enabled.then_some(EchoCanceller {
                mobile_mode: self.echo_canceller_mobile_mode,
            }),
            noise_suppression: self.noise_suppression_enabled.then(|| NoiseSuppression {
                level: self.noise_suppression_level.to_rust(),
            }),
            gain_control: self.gain_control_enabled.then(|| GainControl {
                mode: self.gain_control_mode.to_rust(),
            }),
            voice_detection: self.voice_detection_enabled.then(|| VoiceDetection {
                likelihood: self.voice_detection_likelihood.to_rust(),
            }),
        }
    }

    /// Convert from nested Rust [`Config`] to flat C config.
    ///
    /// Disabled options report their default settings in the value fields.
    pub(crate) fn from_rust(config: &Config) -> Self {
        let echo_canceller = config.echo_canceller.clone().unwrap_or_default();
        let noise_suppression = config.noise_suppression.clone().unwrap_or_default();
        let gain_control = config.gain_control.clone().unwrap_or_default();
        let voice_detection = config.voice_detection.clone().unwrap_or_default();
        Self {
            echo_canceller_enabled: config.echo_canceller.is_some(),
            echo_canceller_mobile_mode: echo_canceller.mobile_mode,
            noise_suppression_enabled: config.noise_suppression.is_some(),
            noise_suppression_level: LimNoiseSuppressionLevel::from_rust(noise_suppression.level),
            gain_control_enabled: config.gain_control.is_some(),
            gain_control_mode: LimGainControlMode::from_rust(gain_control.mode),
            voice_detection_enabled: config.voice_detection.is_some(),
            voice_detection_likelihood: LimVoiceDetectionLikelihood::from_rust(
                voice_detection.likelihood,
            ),
        }
    }
}

// ---------------------------------------------------------------------------
// LimStreamFormat <-> StreamFormat
// ---------------------------------------------------------------------------

impl LimStreamFormat {
    pub(crate) fn to_rust(self) -> StreamFormat {
        StreamFormat::new(self.sample_rate_hz, self.num_channels)
    }

    pub(crate) fn from_rust(format: StreamFormat) -> Self {
        Self {
            sample_rate_hz: format.sample_rate_hz(),
            num_channels: format.num_channels(),
        }
    }
}

// ---------------------------------------------------------------------------
// LimStats <- ConditioningStats
// ---------------------------------------------------------------------------

impl LimStats {
    pub(crate) fn from_rust(stats: &ConditioningStats) -> Self {
        Self {
            has_voice_detected: stats.voice_detected.is_some(),
            voice_detected: stats.voice_detected.unwrap_or(false),
            has_echo_detected: stats.echo_detected.is_some(),
            echo_detected: stats.echo_detected.unwrap_or(false),
            has_echo_return_loss: stats.echo_return_loss.is_some(),
            echo_return_loss: stats.echo_return_loss.unwrap_or(0.0),
            has_echo_return_loss_enhancement: stats.echo_return_loss_enhancement.is_some(),
            echo_return_loss_enhancement: stats.echo_return_loss_enhancement.unwrap_or(0.0),
            has_delay_ms: stats.delay_ms.is_some(),
            delay_ms: stats.delay_ms.unwrap_or(0),
        }
    }
}

// ---------------------------------------------------------------------------
// LimError <- Error
// ---------------------------------------------------------------------------

impl LimError {
    pub(crate) fn from_rust(err: Error) -> Self {
        match err {
            Error::UnsupportedSampleRate { .. } => Self::BadSampleRate,
            Error::InvalidChannelCount => Self::BadNumberChannels,
            Error::InvalidDelay { .. } => Self::BadDelay,
            Error::FrameSizeMismatch { .. } => Self::BadDataLength,
            Error::NotConfigured { .. } => Self::NotConfigured,
            Error::Processing { .. } => Self::ProcessingFailed,
        }
    }
}
