//! Conditioning pipeline configuration.

/// Configuration for the conditioning pipeline.
///
/// Each sub-struct is optional; `None` means the corresponding option is
/// disabled. The configuration is fixed when a
/// [`StreamProcessor`](crate::StreamProcessor) is built and pushed to the
/// engine exactly once.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Echo canceller settings. `None` disables echo cancellation.
    pub echo_canceller: Option<EchoCanceller>,
    /// Noise suppression settings. `None` disables noise suppression.
    pub noise_suppression: Option<NoiseSuppression>,
    /// Gain controller settings. `None` disables gain control.
    pub gain_control: Option<GainControl>,
    /// Voice detection settings. `None` disables voice detection.
    pub voice_detection: Option<VoiceDetection>,
}

/// Echo canceller settings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EchoCanceller {
    /// Use the mobile-optimized variant, which trades echo suppression
    /// quality for a lower computational load (default: `false`).
    pub mobile_mode: bool,
}

/// Noise suppression settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoiseSuppression {
    /// How aggressively noise is attenuated.
    pub level: NoiseSuppressionLevel,
}

impl Default for NoiseSuppression {
    fn default() -> Self {
        Self {
            level: NoiseSuppressionLevel::Moderate,
        }
    }
}

/// Aggressiveness of the noise suppressor.
///
/// Higher levels remove more noise at the cost of more speech distortion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoiseSuppressionLevel {
    /// Mild suppression that preserves speech naturalness.
    Low,
    /// Balanced suppression, the default.
    Moderate,
    /// Aggressive suppression for very noisy environments.
    High,
}

/// Gain controller settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GainControl {
    /// The operating mode of the controller.
    pub mode: GainControlMode,
}

impl Default for GainControl {
    fn default() -> Self {
        Self {
            mode: GainControlMode::AdaptiveDigital,
        }
    }
}

/// Operating mode of the gain controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GainControlMode {
    /// Apply a fixed digital gain.
    Fixed,
    /// Adapt the digital gain to the signal level, the default.
    AdaptiveDigital,
    /// Additionally recommend an analog level for an adjustable
    /// microphone amplifier.
    AdaptiveAnalog,
}

/// Voice detection settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoiceDetection {
    /// How much evidence is required before a frame is flagged as voice.
    pub likelihood: VoiceDetectionLikelihood,
}

impl Default for VoiceDetection {
    fn default() -> Self {
        Self {
            likelihood: VoiceDetectionLikelihood::Low,
        }
    }
}

/// Detection threshold of the voice detector.
///
/// A lower likelihood flags more frames as voice and yields fewer missed
/// detections but more false positives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoiceDetectionLikelihood {
    /// Flag frames on weak evidence of voice.
    VeryLow,
    /// Lenient threshold, the default.
    Low,
    /// Balanced threshold.
    Moderate,
    /// Flag frames only on strong evidence of voice.
    High,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_disables_everything() {
        let config = Config::default();
        assert!(config.echo_canceller.is_none());
        assert!(config.noise_suppression.is_none());
        assert!(config.gain_control.is_none());
        assert!(config.voice_detection.is_none());
    }

    #[test]
    fn sub_config_defaults() {
        assert!(!EchoCanceller::default().mobile_mode);
        assert_eq!(
            NoiseSuppression::default().level,
            NoiseSuppressionLevel::Moderate
        );
        assert_eq!(
            GainControl::default().mode,
            GainControlMode::AdaptiveDigital
        );
        assert_eq!(
            VoiceDetection::default().likelihood,
            VoiceDetectionLikelihood::Low
        );
    }
}
