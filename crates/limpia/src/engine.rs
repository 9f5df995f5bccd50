//! Conditioning engine interface and the built-in bypass implementation.

use crate::config::Config;
use crate::stats::ConditioningStats;
use crate::stream_format::StreamFormat;

/// Status codes reported by a conditioning engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineStatus {
    /// The frame was processed successfully.
    NoError,
    /// The engine failed for an unspecified reason.
    UnspecifiedError,
    /// The engine does not support the requested sample rate.
    BadSampleRate,
    /// A buffer length does not match the stream formats.
    BadDataLength,
    /// The engine does not support the requested channel layout.
    BadNumberChannels,
    /// A required stream parameter was never provided.
    StreamParameterNotSet,
}

impl std::fmt::Display for EngineStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let message = match self {
            Self::NoError => "no error",
            Self::UnspecifiedError => "unspecified error",
            Self::BadSampleRate => "unsupported sample rate",
            Self::BadDataLength => "buffer length does not match the stream formats",
            Self::BadNumberChannels => "unsupported channel layout",
            Self::StreamParameterNotSet => "required stream parameter not set",
        };
        f.write_str(message)
    }
}

/// Signal-processing backend driven by a
/// [`StreamProcessor`](crate::StreamProcessor).
///
/// The facade owns exactly one engine. It pushes the conditioning
/// configuration once at construction, derives frame sizes through
/// [`frame_size_for()`](Self::frame_size_for), and routes every validated
/// frame through [`process()`](Self::process) and
/// [`process_reverse()`](Self::process_reverse). Implementations provide
/// the actual echo cancellation, noise suppression, and gain control;
/// [`BypassEngine`] is a deterministic stand-in for tests and wiring.
pub trait ConditioningEngine: Send {
    /// Receives the conditioning options. Called exactly once, when the
    /// owning processor is built.
    fn apply_config(&mut self, config: &Config);

    /// Conditions one forward-path frame.
    ///
    /// `src` holds interleaved samples in the `input` format, `dest` must
    /// hold room for one frame of interleaved samples in the `output`
    /// format. Returns [`EngineStatus::NoError`] on success; any other
    /// status leaves `dest` unspecified.
    fn process(
        &mut self,
        src: &[i16],
        input: &StreamFormat,
        output: &StreamFormat,
        dest: &mut [i16],
    ) -> EngineStatus;

    /// Analyzes one reverse-path (far-end reference) frame.
    ///
    /// Same buffer contract as [`process()`](Self::process), with `input`
    /// describing the reverse stream.
    fn process_reverse(
        &mut self,
        src: &[i16],
        input: &StreamFormat,
        output: &StreamFormat,
        dest: &mut [i16],
    ) -> EngineStatus;

    /// Updates the estimated delay between the reverse and forward paths.
    fn set_stream_delay_ms(&mut self, delay_ms: i32);

    /// The current render-to-capture delay estimate in milliseconds.
    fn stream_delay_ms(&self) -> i32;

    /// Samples per channel in one frame at the given sample rate.
    ///
    /// Engines operate on 10 ms frames unless they override this. The
    /// result of an integer division: 44.1 kHz family rates truncate.
    fn frame_size_for(&self, sample_rate_hz: u32) -> usize {
        (sample_rate_hz / 100) as usize
    }

    /// Snapshot of the engine's statistics.
    ///
    /// Engines that do not track statistics report every field
    /// unavailable.
    fn statistics(&self) -> ConditioningStats {
        ConditioningStats::default()
    }
}

/// Pass-through engine: audio crosses it unmodified apart from channel
/// mapping.
///
/// Forward frames are copied when the channel layouts match, averaged
/// into a single channel when the output is mono, and widened by
/// repeating the last input channel otherwise. Reverse frames are echoed
/// back unchanged. The delay value is stored verbatim. There is no
/// resampling, so the forward input and output rates must match.
#[derive(Debug, Clone, Copy, Default)]
pub struct BypassEngine {
    delay_ms: i32,
}

impl BypassEngine {
    /// Creates a bypass engine with a zero delay estimate.
    pub fn new() -> Self {
        Self::default()
    }
}

impl ConditioningEngine for BypassEngine {
    fn apply_config(&mut self, _config: &Config) {}

    fn process(
        &mut self,
        src: &[i16],
        input: &StreamFormat,
        output: &StreamFormat,
        dest: &mut [i16],
    ) -> EngineStatus {
        let in_channels = input.num_channels() as usize;
        let out_channels = output.num_channels() as usize;
        if in_channels == 0 || out_channels == 0 {
            return EngineStatus::BadNumberChannels;
        }
        if input.sample_rate_hz() != output.sample_rate_hz() {
            return EngineStatus::BadSampleRate;
        }
        let num_frames = self.frame_size_for(input.sample_rate_hz());
        if src.len() != num_frames * in_channels || dest.len() != num_frames * out_channels {
            return EngineStatus::BadDataLength;
        }

        if out_channels == in_channels {
            dest.copy_from_slice(src);
        } else if out_channels == 1 {
            // Downmix by averaging; i32 accumulator so the sum cannot
            // overflow.
            for (slot, frame) in dest.iter_mut().zip(src.chunks_exact(in_channels)) {
                let sum: i32 = frame.iter().map(|&sample| i32::from(sample)).sum();
                *slot = (sum / in_channels as i32) as i16;
            }
        } else {
            for (dest_frame, src_frame) in dest
                .chunks_exact_mut(out_channels)
                .zip(src.chunks_exact(in_channels))
            {
                for (channel, slot) in dest_frame.iter_mut().enumerate() {
                    *slot = src_frame[channel.min(in_channels - 1)];
                }
            }
        }
        EngineStatus::NoError
    }

    fn process_reverse(
        &mut self,
        src: &[i16],
        _input: &StreamFormat,
        _output: &StreamFormat,
        dest: &mut [i16],
    ) -> EngineStatus {
        // The reverse path is analysis-only; the reference frame is echoed
        // back in its own channel layout, so only the lengths must agree.
        if src.len() != dest.len() {
            return EngineStatus::BadDataLength;
        }
        dest.copy_from_slice(src);
        EngineStatus::NoError
    }

    fn set_stream_delay_ms(&mut self, delay_ms: i32) {
        self.delay_ms = delay_ms;
    }

    fn stream_delay_ms(&self) -> i32 {
        self.delay_ms
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn format(sample_rate_hz: u32, num_channels: u16) -> StreamFormat {
        StreamFormat::new(sample_rate_hz, num_channels)
    }

    #[test]
    fn frame_size_is_10ms() {
        let engine = BypassEngine::new();
        assert_eq!(engine.frame_size_for(8_000), 80);
        assert_eq!(engine.frame_size_for(16_000), 160);
        assert_eq!(engine.frame_size_for(48_000), 480);
        assert_eq!(engine.frame_size_for(384_000), 3_840);
        // Integer division truncates for non-multiple-of-100 rates.
        assert_eq!(engine.frame_size_for(22_050), 220);
    }

    #[test]
    fn process_copies_matching_layouts() {
        let mut engine = BypassEngine::new();
        let src: Vec<i16> = (0..320).map(|i| i as i16).collect();
        let mut dest = vec![0i16; 320];
        let status = engine.process(&src, &format(16_000, 2), &format(16_000, 2), &mut dest);
        assert_eq!(status, EngineStatus::NoError);
        assert_eq!(dest, src);
    }

    #[test]
    fn process_averages_to_mono() {
        let mut engine = BypassEngine::new();
        let mut src = vec![0i16; 320];
        for frame in src.chunks_exact_mut(2) {
            frame[0] = 1_000;
            frame[1] = 3_000;
        }
        let mut dest = vec![0i16; 160];
        let status = engine.process(&src, &format(16_000, 2), &format(16_000, 1), &mut dest);
        assert_eq!(status, EngineStatus::NoError);
        assert!(dest.iter().all(|&sample| sample == 2_000));
    }

    #[test]
    fn downmix_does_not_overflow() {
        let mut engine = BypassEngine::new();
        let src = vec![i16::MAX; 160 * 2];
        let mut dest = vec![0i16; 160];
        let status = engine.process(&src, &format(16_000, 2), &format(16_000, 1), &mut dest);
        assert_eq!(status, EngineStatus::NoError);
        assert!(dest.iter().all(|&sample| sample == i16::MAX));
    }

    #[test]
    fn process_widens_mono_by_repeating() {
        let mut engine = BypassEngine::new();
        let src: Vec<i16> = (0..160).map(|i| i as i16).collect();
        let mut dest = vec![0i16; 320];
        let status = engine.process(&src, &format(16_000, 1), &format(16_000, 2), &mut dest);
        assert_eq!(status, EngineStatus::NoError);
        for (frame, &sample) in dest.chunks_exact(2).zip(src.iter()) {
            assert_eq!(frame, [sample, sample]);
        }
    }

    #[test]
    fn process_rejects_mismatched_rates() {
        let mut engine = BypassEngine::new();
        let src = vec![0i16; 160];
        let mut dest = vec![0i16; 320];
        let status = engine.process(&src, &format(16_000, 1), &format(32_000, 1), &mut dest);
        assert_eq!(status, EngineStatus::BadSampleRate);
    }

    #[test]
    fn process_rejects_bad_lengths() {
        let mut engine = BypassEngine::new();
        let src = vec![0i16; 100];
        let mut dest = vec![0i16; 160];
        let status = engine.process(&src, &format(16_000, 1), &format(16_000, 1), &mut dest);
        assert_eq!(status, EngineStatus::BadDataLength);
    }

    #[test]
    fn reverse_echoes_frame() {
        let mut engine = BypassEngine::new();
        let src: Vec<i16> = (0..320).map(|i| (i * 3) as i16).collect();
        let mut dest = vec![0i16; 320];
        let status = engine.process_reverse(&src, &format(16_000, 2), &format(16_000, 1), &mut dest);
        assert_eq!(status, EngineStatus::NoError);
        assert_eq!(dest, src);
    }

    #[test]
    fn delay_is_stored_verbatim() {
        let mut engine = BypassEngine::new();
        assert_eq!(engine.stream_delay_ms(), 0);
        engine.set_stream_delay_ms(125);
        assert_eq!(engine.stream_delay_ms(), 125);
    }

    #[test]
    fn statistics_default_to_unavailable() {
        let engine = BypassEngine::new();
        let stats = engine.statistics();
        assert!(stats.voice_detected.is_none());
        assert!(stats.echo_detected.is_none());
        assert!(stats.echo_return_loss.is_none());
        assert!(stats.echo_return_loss_enhancement.is_none());
        assert!(stats.delay_ms.is_none());
    }
}
