//! End-to-end lifecycle tests: construct, negotiate, stream, renegotiate.

use std::sync::Once;

use limpia::config::{EchoCanceller, NoiseSuppression, NoiseSuppressionLevel, VoiceDetection};
use limpia::{Config, StreamFormat, StreamProcessor, pcm};

static INIT: Once = Once::new();

fn init_tracing() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

/// Consecutive 10 ms frames of a 440 Hz tone, every channel identical.
fn tone_frames(sample_rate_hz: u32, num_channels: u16, num_frames: usize) -> Vec<Vec<u8>> {
    let frame_size = (sample_rate_hz / 100) as usize;
    let mut frames = Vec::with_capacity(num_frames);
    let mut t = 0usize;
    for _ in 0..num_frames {
        let mut samples = Vec::with_capacity(frame_size * num_channels as usize);
        for _ in 0..frame_size {
            let phase = t as f32 * 440.0 * 2.0 * std::f32::consts::PI / sample_rate_hz as f32;
            let value = (phase.sin() * 8_000.0) as i16;
            for _ in 0..num_channels {
                samples.push(value);
            }
            t += 1;
        }
        frames.push(pcm::encode_pcm16(&samples));
    }
    frames
}

#[test]
fn full_duplex_session() {
    init_tracing();

    let config = Config {
        echo_canceller: Some(EchoCanceller::default()),
        noise_suppression: Some(NoiseSuppression {
            level: NoiseSuppressionLevel::High,
        }),
        voice_detection: Some(VoiceDetection::default()),
        ..Config::default()
    };
    let mut processor = StreamProcessor::builder().config(config).build();

    processor
        .set_stream_format(StreamFormat::new(48_000, 1))
        .unwrap();
    processor
        .set_reverse_stream_format(StreamFormat::new(48_000, 2))
        .unwrap();
    processor.set_stream_delay_ms(40).unwrap();

    let frame_bytes = processor.frame_size().unwrap() * 2;
    let capture = tone_frames(48_000, 1, 50);
    let render = tone_frames(48_000, 2, 50);

    for (capture_frame, render_frame) in capture.iter().zip(render.iter()) {
        let reference = processor.process_reverse(render_frame).unwrap();
        assert_eq!(reference.len(), render_frame.len());

        let conditioned = processor.process(capture_frame).unwrap();
        assert_eq!(conditioned.len(), frame_bytes);
    }

    assert_eq!(processor.stream_delay_ms(), 40);
}

#[test]
fn renegotiation_mid_session() {
    init_tracing();

    let mut processor = StreamProcessor::new(true, true, true);
    processor
        .set_stream_format(StreamFormat::new(16_000, 1))
        .unwrap();
    for frame in tone_frames(16_000, 1, 10) {
        processor.process(&frame).unwrap();
    }

    // Move the capture leg to 48 kHz stereo, downmixed to mono.
    processor
        .set_stream_format_with_output(StreamFormat::new(48_000, 2), StreamFormat::new(48_000, 1))
        .unwrap();
    assert_eq!(processor.frame_size(), Ok(480));
    for frame in tone_frames(48_000, 2, 10) {
        let conditioned = processor.process(&frame).unwrap();
        assert_eq!(conditioned.len(), 480 * 2);
    }
}

#[test]
fn statistics_snapshot_after_processing() {
    init_tracing();

    let mut processor = StreamProcessor::new(true, true, false);
    processor
        .set_stream_format(StreamFormat::new(16_000, 1))
        .unwrap();
    processor.process(&[0u8; 320]).unwrap();

    // The bypass engine tracks no statistics.
    let stats = processor.statistics();
    assert!(stats.voice_detected.is_none());
    assert!(stats.echo_detected.is_none());
    assert!(stats.echo_return_loss.is_none());
    assert!(stats.echo_return_loss_enhancement.is_none());
    assert!(stats.delay_ms.is_none());
}
