#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use limpia::config::{EchoCanceller, GainControl, NoiseSuppression};
use limpia::{Config, StreamFormat, StreamProcessor};

#[derive(Debug, Arbitrary)]
struct FuzzInput {
    /// Sample rate index: 0=8k, 1=16k, 2=32k, 3=48k
    sample_rate_idx: u8,
    /// Number of channels (clamped to 1-2)
    channels: u8,
    /// Raw interleaved PCM16 bytes (clamped to one frame)
    bytes: Vec<u8>,
}

fn sample_rate(idx: u8) -> u32 {
    match idx % 4 {
        0 => 8000,
        1 => 16000,
        2 => 32000,
        _ => 48000,
    }
}

fuzz_target!(|input: FuzzInput| {
    let rate = sample_rate(input.sample_rate_idx);
    let channels = u16::from(input.channels % 2) + 1;
    let frame_bytes = (rate / 100) as usize * channels as usize * 2;

    if input.bytes.len() < frame_bytes {
        return;
    }

    let config = Config {
        echo_canceller: Some(EchoCanceller::default()),
        noise_suppression: Some(NoiseSuppression::default()),
        gain_control: Some(GainControl::default()),
        ..Default::default()
    };
    let mut processor = StreamProcessor::builder().config(config).build();
    let format = StreamFormat::new(rate, channels);
    processor.set_stream_format(format).unwrap();
    processor.set_reverse_stream_format(format).unwrap();

    // A well-formed frame must come back with exactly one output frame.
    let frame = &input.bytes[..frame_bytes];
    let conditioned = processor.process(frame).unwrap();
    assert_eq!(conditioned.len(), frame_bytes);

    let reference = processor.process_reverse(frame).unwrap();
    assert_eq!(reference.len(), frame_bytes);

    // Arbitrary lengths must fail cleanly, never panic.
    let _ = processor.process(&input.bytes);
    let _ = processor.process_reverse(&input.bytes);
});
