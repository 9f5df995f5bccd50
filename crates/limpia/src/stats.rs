//! Conditioning statistics.

/// Statistics reported by a conditioning engine.
///
/// Every field is optional; `None` means the statistic is unavailable,
/// either because the option that produces it is disabled or because the
/// engine does not track it. The built-in
/// [`BypassEngine`](crate::BypassEngine) reports all fields unavailable.
#[derive(Debug, Clone, Default)]
pub struct ConditioningStats {
    /// Whether the last forward frame contained voice activity.
    pub voice_detected: Option<bool>,
    /// Whether residual echo was detected in the last forward frame.
    pub echo_detected: Option<bool>,
    /// Echo return loss in dB: the attenuation of the far-end signal
    /// through the echo path.
    pub echo_return_loss: Option<f64>,
    /// Echo return loss enhancement in dB: the additional attenuation
    /// contributed by the echo canceller.
    pub echo_return_loss_enhancement: Option<f64>,
    /// The engine's current estimate of the render-to-capture delay in
    /// milliseconds.
    pub delay_ms: Option<i32>,
}
