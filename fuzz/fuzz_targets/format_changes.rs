#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use limpia::{StreamFormat, StreamProcessor};

#[derive(Debug, Arbitrary)]
struct FuzzInput {
    operations: Vec<FuzzOp>,
}

#[derive(Debug, Arbitrary)]
enum FuzzOp {
    SetFormat { rate: u32, channels: u8 },
    SetFormatWithOutput { rate: u32, channels: u8, out_rate: u32, out_channels: u8 },
    SetReverseFormat { rate: u32, channels: u8 },
    SetDelay(i32),
    Process,
    ProcessReverse,
}

/// Map raw fuzz data into 0..400k so both sides of the supported
/// 8k-384k range get exercised.
fn clamp_rate(raw: u32) -> u32 {
    raw % 400_000
}

fn clamp_channels(raw: u8) -> u16 {
    // 0 stays reachable so rejection keeps being covered.
    u16::from(raw % 4)
}

fuzz_target!(|input: FuzzInput| {
    if input.operations.is_empty() {
        return;
    }

    let mut processor = StreamProcessor::new(true, true, false);

    // Shadow copies of what each successful negotiation should leave behind.
    let mut forward: Option<(StreamFormat, StreamFormat)> = None;
    let mut reverse: Option<StreamFormat> = None;
    let mut delay_ms = 0i32;

    for op in &input.operations {
        match op {
            FuzzOp::SetFormat { rate, channels } => {
                let format = StreamFormat::new(clamp_rate(*rate), clamp_channels(*channels));
                if processor.set_stream_format(format).is_ok() {
                    forward = Some((format, format));
                }
            }
            FuzzOp::SetFormatWithOutput { rate, channels, out_rate, out_channels } => {
                let input_format =
                    StreamFormat::new(clamp_rate(*rate), clamp_channels(*channels));
                let output_format =
                    StreamFormat::new(clamp_rate(*out_rate), clamp_channels(*out_channels));
                if processor
                    .set_stream_format_with_output(input_format, output_format)
                    .is_ok()
                {
                    forward = Some((input_format, output_format));
                }
            }
            FuzzOp::SetReverseFormat { rate, channels } => {
                let format = StreamFormat::new(clamp_rate(*rate), clamp_channels(*channels));
                if processor.set_reverse_stream_format(format).is_ok() {
                    reverse = Some(format);
                }
            }
            FuzzOp::SetDelay(delay) => {
                if processor.set_stream_delay_ms(*delay).is_ok() {
                    delay_ms = *delay;
                }
            }
            FuzzOp::Process => {
                if let Some((input_format, output_format)) = forward {
                    let frame_size = (input_format.sample_rate_hz() / 100) as usize;
                    let frame =
                        vec![0u8; frame_size * input_format.num_channels() as usize * 2];
                    if input_format.sample_rate_hz() == output_format.sample_rate_hz() {
                        let conditioned = processor.process(&frame).unwrap();
                        assert_eq!(
                            conditioned.len(),
                            frame_size * output_format.num_channels() as usize * 2
                        );
                    } else {
                        // The bypass engine does not resample.
                        assert!(processor.process(&frame).is_err());
                    }
                } else {
                    assert!(processor.process(&[0u8; 320]).is_err());
                }
            }
            FuzzOp::ProcessReverse => {
                if let (Some((input_format, _)), Some(reverse_format)) = (forward, reverse) {
                    let frame_size = (input_format.sample_rate_hz() / 100) as usize;
                    let frame =
                        vec![0u8; frame_size * reverse_format.num_channels() as usize * 2];
                    let reference = processor.process_reverse(&frame).unwrap();
                    assert_eq!(reference.len(), frame.len());
                } else {
                    assert!(processor.process_reverse(&[0u8; 320]).is_err());
                }
            }
        }

        // Failed negotiations must never disturb the surviving state.
        match forward {
            Some((input_format, _)) => {
                let frame_size = processor.frame_size().unwrap();
                assert_eq!(frame_size, (input_format.sample_rate_hz() / 100) as usize);
            }
            None => assert!(processor.frame_size().is_err()),
        }
        assert_eq!(processor.stream_delay_ms(), delay_ms);
    }
});
