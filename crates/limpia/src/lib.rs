//! Stream-oriented audio conditioning facade.
//!
//! `limpia` enforces the format and framing contract around a pluggable
//! signal-processing engine: stream-format negotiation for the forward
//! (capture) and reverse (render reference) paths, 10 ms frame-size
//! derivation, interleaved PCM16 byte framing, and render-to-capture
//! delay bookkeeping. The conditioning algorithms themselves (echo
//! cancellation, noise suppression, gain control, voice detection) live
//! behind the [`ConditioningEngine`] trait; the built-in [`BypassEngine`]
//! passes audio through unmodified.
//!
//! # Quick Start
//!
//! ```
//! use limpia::{StreamFormat, StreamProcessor};
//!
//! # fn main() -> Result<(), limpia::Error> {
//! // Echo cancellation and noise suppression on, gain control off.
//! let mut processor = StreamProcessor::new(true, true, false);
//! processor.set_stream_format(StreamFormat::new(16_000, 1))?;
//! processor.set_reverse_stream_format(StreamFormat::new(16_000, 1))?;
//! processor.set_stream_delay_ms(30)?;
//!
//! let frame_bytes = processor.frame_size()? * 2; // mono PCM16
//! let silence = vec![0u8; frame_bytes];
//!
//! // For each ~10 ms frame: reference first, then capture.
//! let _ = processor.process_reverse(&silence)?;
//! let conditioned = processor.process(&silence)?;
//! assert_eq!(conditioned.len(), frame_bytes);
//! # Ok(())
//! # }
//! ```

pub mod config;
mod engine;
pub mod pcm;
mod processor;
pub mod stats;
mod stream_format;

// Public re-exports.
pub use config::Config;
pub use engine::{BypassEngine, ConditioningEngine, EngineStatus};
pub use processor::{Error, ErrorKind, StreamPath, StreamProcessor, StreamProcessorBuilder};
pub use stats::ConditioningStats;
pub use stream_format::{MAX_SAMPLE_RATE_HZ, MIN_SAMPLE_RATE_HZ, StreamFormat};
