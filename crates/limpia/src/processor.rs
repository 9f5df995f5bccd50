//! Stream-format negotiation and frame processing.

use derive_more::Debug;

use crate::config::{Config, EchoCanceller, GainControl, NoiseSuppression};
use crate::engine::{BypassEngine, ConditioningEngine, EngineStatus};
use crate::pcm;
use crate::stats::ConditioningStats;
use crate::stream_format::{MAX_SAMPLE_RATE_HZ, MIN_SAMPLE_RATE_HZ, StreamFormat};

/// Errors returned by [`StreamProcessor`] operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// Sample rate outside the supported range.
    UnsupportedSampleRate {
        /// The rejected sample rate in Hz.
        sample_rate_hz: u32,
    },
    /// A stream format with zero channels.
    InvalidChannelCount,
    /// A negative stream delay.
    InvalidDelay {
        /// The rejected delay in milliseconds.
        delay_ms: i32,
    },
    /// A frame whose byte length does not match the negotiated format.
    FrameSizeMismatch {
        /// The byte length the negotiated format requires.
        expected: usize,
        /// The byte length that was passed.
        actual: usize,
    },
    /// The operation needs a stream format that was never set.
    NotConfigured {
        /// The stream whose format is missing.
        stream: StreamPath,
    },
    /// The conditioning engine reported a non-success status.
    Processing {
        /// The status the engine reported.
        status: EngineStatus,
    },
}

impl Error {
    /// The coarse classification of this error, for callers that branch
    /// on the failure class rather than the exact variant.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::UnsupportedSampleRate { .. }
            | Self::InvalidChannelCount
            | Self::InvalidDelay { .. }
            | Self::FrameSizeMismatch { .. } => ErrorKind::InvalidArgument,
            Self::NotConfigured { .. } => ErrorKind::NotConfigured,
            Self::Processing { .. } => ErrorKind::Processing,
        }
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match *self {
            Self::UnsupportedSampleRate { sample_rate_hz } => write!(
                f,
                "unsupported sample rate {sample_rate_hz} Hz \
                 (supported: {MIN_SAMPLE_RATE_HZ}..={MAX_SAMPLE_RATE_HZ})"
            ),
            Self::InvalidChannelCount => {
                write!(f, "invalid channel count: at least one channel is required")
            }
            Self::InvalidDelay { delay_ms } => {
                write!(f, "invalid stream delay {delay_ms} ms: must not be negative")
            }
            Self::FrameSizeMismatch { expected, actual } => write!(
                f,
                "frame length mismatch: expected {expected} bytes, got {actual}"
            ),
            Self::NotConfigured { stream } => {
                write!(f, "{stream} stream format has not been set")
            }
            Self::Processing { status } => {
                write!(f, "conditioning engine failed: {status}")
            }
        }
    }
}

impl std::error::Error for Error {}

/// Coarse classification of [`Error`] values, see [`Error::kind()`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A caller-supplied value violates a stated requirement.
    InvalidArgument,
    /// A required stream format was never set.
    NotConfigured,
    /// The conditioning engine rejected the frame.
    Processing,
}

/// Identifies the stream an [`Error::NotConfigured`] refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamPath {
    /// The near-end (capture) path.
    Forward,
    /// The far-end (render reference) path.
    Reverse,
}

impl std::fmt::Display for StreamPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Forward => f.write_str("forward"),
            Self::Reverse => f.write_str("reverse"),
        }
    }
}

/// The forward-path format pair, always replaced as a unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct FormatPair {
    input: StreamFormat,
    output: StreamFormat,
}

fn validate_format(format: StreamFormat) -> Result<(), Error> {
    if format.num_channels() == 0 {
        return Err(Error::InvalidChannelCount);
    }
    let sample_rate_hz = format.sample_rate_hz();
    if !(MIN_SAMPLE_RATE_HZ..=MAX_SAMPLE_RATE_HZ).contains(&sample_rate_hz) {
        return Err(Error::UnsupportedSampleRate { sample_rate_hz });
    }
    Ok(())
}

/// Builder for constructing a [`StreamProcessor`] with a custom
/// configuration or engine.
///
/// # Example
///
/// ```
/// use limpia::config::{NoiseSuppression, NoiseSuppressionLevel};
/// use limpia::{Config, StreamProcessor};
///
/// let config = Config {
///     noise_suppression: Some(NoiseSuppression {
///         level: NoiseSuppressionLevel::High,
///     }),
///     ..Config::default()
/// };
/// let processor = StreamProcessor::builder().config(config).build();
/// assert!(processor.noise_suppression_enabled());
/// assert!(!processor.echo_canceller_enabled());
/// ```
#[derive(Debug)]
pub struct StreamProcessorBuilder {
    config: Config,
    #[debug(skip)]
    engine: Option<Box<dyn ConditioningEngine>>,
}

impl StreamProcessorBuilder {
    fn new() -> Self {
        Self {
            config: Config::default(),
            engine: None,
        }
    }

    /// Sets the conditioning options pushed to the engine at build time.
    pub fn config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }

    /// Injects the conditioning engine. Defaults to [`BypassEngine`].
    pub fn engine(mut self, engine: impl ConditioningEngine + 'static) -> Self {
        self.engine = Some(Box::new(engine));
        self
    }

    /// Builds the processor, pushing the configuration to the engine
    /// exactly once. No stream formats are set yet.
    pub fn build(self) -> StreamProcessor {
        let mut engine = self
            .engine
            .unwrap_or_else(|| Box::new(BypassEngine::new()));
        engine.apply_config(&self.config);
        tracing::debug!(
            echo_canceller = self.config.echo_canceller.is_some(),
            noise_suppression = self.config.noise_suppression.is_some(),
            gain_control = self.config.gain_control.is_some(),
            voice_detection = self.config.voice_detection.is_some(),
            "conditioning configuration applied"
        );
        StreamProcessor {
            engine,
            config: self.config,
            forward: None,
            reverse_input: None,
        }
    }
}

/// Stream-oriented conditioning facade.
///
/// A `StreamProcessor` owns one [`ConditioningEngine`], negotiates the
/// stream formats for the forward (capture) and reverse (render
/// reference) paths, derives the frame size from the forward input rate,
/// and moves validated PCM16 byte frames through the engine.
///
/// # Usage
///
/// 1. Create an instance via [`new()`](Self::new) or
///    [`builder()`](Self::builder).
/// 2. Negotiate formats with
///    [`set_stream_format()`](Self::set_stream_format) and, when feeding
///    reference audio,
///    [`set_reverse_stream_format()`](Self::set_reverse_stream_format).
/// 3. For each ~10 ms frame, feed the far-end frame to
///    [`process_reverse()`](Self::process_reverse), then the near-end
///    frame to [`process()`](Self::process).
///
/// Every mutating operation takes `&mut self`; there is no internal
/// locking. A processor shared between a capture and a render thread goes
/// behind a single `Mutex`.
#[derive(Debug)]
pub struct StreamProcessor {
    #[debug(skip)]
    engine: Box<dyn ConditioningEngine>,
    config: Config,
    forward: Option<FormatPair>,
    reverse_input: Option<StreamFormat>,
}

impl StreamProcessor {
    /// Creates a processor with the built-in [`BypassEngine`] and the
    /// given conditioning flags.
    ///
    /// Enabled options use their default settings (moderate noise
    /// suppression, adaptive digital gain control); disabled options stay
    /// off. Voice detection is off; enable it through
    /// [`builder()`](Self::builder).
    pub fn new(echo_cancellation: bool, noise_suppression: bool, gain_control: bool) -> Self {
        let config = Config {
            echo_canceller: echo_cancellation.then(EchoCanceller::default),
            noise_suppression: noise_suppression.then(NoiseSuppression::default),
            gain_control: gain_control.then(GainControl::default),
            voice_detection: None,
        };
        Self::builder().config(config).build()
    }

    /// Returns a builder for custom configuration or engine injection.
    pub fn builder() -> StreamProcessorBuilder {
        StreamProcessorBuilder::new()
    }

    /// Sets the forward-path format; the output format mirrors the input.
    ///
    /// Shorthand for
    /// [`set_stream_format_with_output()`](Self::set_stream_format_with_output)
    /// with `output = input`.
    pub fn set_stream_format(&mut self, input: StreamFormat) -> Result<(), Error> {
        self.set_stream_format_with_output(input, input)
    }

    /// Sets the forward-path input and output formats as one pair.
    ///
    /// Both formats are validated before either is stored; on failure the
    /// previously negotiated pair stays in effect. The new input rate
    /// drives [`frame_size()`](Self::frame_size) immediately. Re-applying
    /// the current pair is a no-op.
    pub fn set_stream_format_with_output(
        &mut self,
        input: StreamFormat,
        output: StreamFormat,
    ) -> Result<(), Error> {
        validate_format(input)?;
        validate_format(output)?;
        self.forward = Some(FormatPair { input, output });
        tracing::debug!(
            input_sample_rate_hz = input.sample_rate_hz(),
            input_num_channels = input.num_channels(),
            output_sample_rate_hz = output.sample_rate_hz(),
            output_num_channels = output.num_channels(),
            "forward stream format set"
        );
        Ok(())
    }

    /// Sets the reverse-path (render reference) input format.
    ///
    /// The forward pair is untouched; on failure the previous reverse
    /// format stays in effect.
    pub fn set_reverse_stream_format(&mut self, input: StreamFormat) -> Result<(), Error> {
        validate_format(input)?;
        self.reverse_input = Some(input);
        tracing::debug!(
            sample_rate_hz = input.sample_rate_hz(),
            num_channels = input.num_channels(),
            "reverse stream format set"
        );
        Ok(())
    }

    /// Sets the estimated delay between the reverse and forward paths:
    /// the time from a sample being rendered to its echo arriving back at
    /// the capture point.
    ///
    /// Any non-negative value is forwarded to the engine verbatim; there
    /// is no upper bound. May be called at any time, including before any
    /// stream format is set.
    pub fn set_stream_delay_ms(&mut self, delay_ms: i32) -> Result<(), Error> {
        if delay_ms < 0 {
            return Err(Error::InvalidDelay { delay_ms });
        }
        self.engine.set_stream_delay_ms(delay_ms);
        Ok(())
    }

    /// The engine's current delay estimate in milliseconds.
    pub fn stream_delay_ms(&self) -> i32 {
        self.engine.stream_delay_ms()
    }

    fn forward_pair(&self) -> Result<FormatPair, Error> {
        self.forward.ok_or(Error::NotConfigured {
            stream: StreamPath::Forward,
        })
    }

    fn reverse_format(&self) -> Result<StreamFormat, Error> {
        self.reverse_input.ok_or(Error::NotConfigured {
            stream: StreamPath::Reverse,
        })
    }

    /// The forward input sample rate in Hz.
    pub fn input_sample_rate_hz(&self) -> Result<u32, Error> {
        Ok(self.forward_pair()?.input.sample_rate_hz())
    }

    /// The forward input channel count.
    pub fn input_num_channels(&self) -> Result<u16, Error> {
        Ok(self.forward_pair()?.input.num_channels())
    }

    /// The forward output sample rate in Hz.
    pub fn output_sample_rate_hz(&self) -> Result<u32, Error> {
        Ok(self.forward_pair()?.output.sample_rate_hz())
    }

    /// The forward output channel count.
    pub fn output_num_channels(&self) -> Result<u16, Error> {
        Ok(self.forward_pair()?.output.num_channels())
    }

    /// The reverse input sample rate in Hz.
    pub fn reverse_sample_rate_hz(&self) -> Result<u32, Error> {
        Ok(self.reverse_format()?.sample_rate_hz())
    }

    /// The reverse input channel count.
    pub fn reverse_num_channels(&self) -> Result<u16, Error> {
        Ok(self.reverse_format()?.num_channels())
    }

    /// Whether echo cancellation was enabled at construction.
    pub fn echo_canceller_enabled(&self) -> bool {
        self.config.echo_canceller.is_some()
    }

    /// Whether noise suppression was enabled at construction.
    pub fn noise_suppression_enabled(&self) -> bool {
        self.config.noise_suppression.is_some()
    }

    /// Whether gain control was enabled at construction.
    pub fn gain_control_enabled(&self) -> bool {
        self.config.gain_control.is_some()
    }

    /// Whether voice detection was enabled at construction.
    pub fn voice_detection_enabled(&self) -> bool {
        self.config.voice_detection.is_some()
    }

    /// The configuration pushed to the engine at construction.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Samples per channel in one frame, derived from the forward input
    /// rate through the engine's rate-to-frame-size mapping (10 ms
    /// frames, `sample_rate_hz / 100`, for the built-in engine).
    ///
    /// The result is never cached: re-negotiating the forward format
    /// changes it immediately.
    pub fn frame_size(&self) -> Result<usize, Error> {
        let pair = self.forward_pair()?;
        Ok(self.engine.frame_size_for(pair.input.sample_rate_hz()))
    }

    /// Snapshot of the engine's statistics.
    pub fn statistics(&self) -> ConditioningStats {
        self.engine.statistics()
    }

    /// Conditions one forward-path frame of interleaved PCM16 bytes.
    ///
    /// The frame must hold exactly [`frame_size()`](Self::frame_size)
    /// samples per input channel, two bytes each in native byte order.
    /// The returned buffer holds the same number of samples per channel
    /// in the forward output layout. An empty frame short-circuits to an
    /// empty buffer without touching the engine.
    pub fn process(&mut self, frame: &[u8]) -> Result<Vec<u8>, Error> {
        let pair = self.forward_pair()?;
        if frame.is_empty() {
            return Ok(Vec::new());
        }
        let frame_size = self.engine.frame_size_for(pair.input.sample_rate_hz());
        let expected = frame_size * pair.input.num_channels() as usize * 2;
        if frame.len() != expected {
            return Err(Error::FrameSizeMismatch {
                expected,
                actual: frame.len(),
            });
        }

        let src = pcm::decode_pcm16(frame);
        let mut dest = vec![0i16; frame_size * pair.output.num_channels() as usize];
        match self.engine.process(&src, &pair.input, &pair.output, &mut dest) {
            EngineStatus::NoError => Ok(pcm::encode_pcm16(&dest)),
            status => Err(Error::Processing { status }),
        }
    }

    /// Feeds one reverse-path (render reference) frame of interleaved
    /// PCM16 bytes to the engine.
    ///
    /// Requires the reverse format and the forward pair to be set; the
    /// engine receives the forward output as the companion descriptor.
    /// The frame duration is still derived from the forward input rate,
    /// so reference audio sampled at a different rate must cover the same
    /// number of samples per channel as a forward frame. The returned
    /// buffer keeps the reverse channel layout. An empty frame
    /// short-circuits to an empty buffer without touching the engine.
    pub fn process_reverse(&mut self, frame: &[u8]) -> Result<Vec<u8>, Error> {
        let reverse = self.reverse_format()?;
        let pair = self.forward_pair()?;
        if frame.is_empty() {
            return Ok(Vec::new());
        }
        let frame_size = self.engine.frame_size_for(pair.input.sample_rate_hz());
        let expected = frame_size * reverse.num_channels() as usize * 2;
        if frame.len() != expected {
            return Err(Error::FrameSizeMismatch {
                expected,
                actual: frame.len(),
            });
        }

        let src = pcm::decode_pcm16(frame);
        let mut dest = vec![0i16; frame_size * reverse.num_channels() as usize];
        match self
            .engine
            .process_reverse(&src, &reverse, &pair.output, &mut dest)
        {
            EngineStatus::NoError => Ok(pcm::encode_pcm16(&dest)),
            status => Err(Error::Processing { status }),
        }
    }
}

impl Default for StreamProcessor {
    fn default() -> Self {
        Self::builder().build()
    }
}
