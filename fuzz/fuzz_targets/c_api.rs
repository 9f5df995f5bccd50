#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use limpia_ffi::functions::*;
use limpia_ffi::types::*;

#[derive(Debug, Arbitrary)]
struct FuzzInput {
    sample_rate_idx: u8,
    channels: u8,
    operations: Vec<FuzzOp>,
    bytes: Vec<u8>,
}

#[derive(Debug, Arbitrary)]
enum FuzzOp {
    Process { len: u16 },
    ProcessReverse { len: u16 },
    SetFormat { rate_idx: u8, channels: u8 },
    SetFormatPair {
        in_rate_idx: u8,
        in_channels: u8,
        out_rate_idx: u8,
        out_channels: u8,
    },
    SetReverseFormat { rate_idx: u8, channels: u8 },
    SetDelay(i32),
    GetConfig,
    GetFormats,
    FrameSize,
    GetStatistics,
}

fn sample_rate(idx: u8) -> u32 {
    match idx % 4 {
        0 => 8000,
        1 => 16000,
        2 => 32000,
        _ => 48000,
    }
}

fn format(rate_idx: u8, channels: u8) -> LimStreamFormat {
    LimStreamFormat {
        sample_rate_hz: sample_rate(rate_idx),
        num_channels: u16::from(channels % 2) + 1,
    }
}

fuzz_target!(|input: FuzzInput| {
    let processor = lim_create(true, true, false);
    if processor.is_null() {
        return;
    }

    let initial = format(input.sample_rate_idx, input.channels);
    let _ = lim_set_stream_format(processor, initial);
    let _ = lim_set_reverse_stream_format(processor, initial);

    // Room for the largest native frame (48 kHz stereo) with headroom.
    let mut output = vec![0u8; 4096];

    for op in &input.operations {
        match op {
            FuzzOp::Process { len } => {
                let frame_len = (*len as usize).min(input.bytes.len());
                let mut written = 0usize;
                let _ = lim_process(
                    processor,
                    input.bytes.as_ptr(),
                    frame_len,
                    output.as_mut_ptr(),
                    output.len(),
                    &mut written,
                );
                assert!(written <= output.len());
            }
            FuzzOp::ProcessReverse { len } => {
                let frame_len = (*len as usize).min(input.bytes.len());
                let mut written = 0usize;
                let _ = lim_process_reverse(
                    processor,
                    input.bytes.as_ptr(),
                    frame_len,
                    output.as_mut_ptr(),
                    output.len(),
                    &mut written,
                );
                assert!(written <= output.len());
            }
            FuzzOp::SetFormat { rate_idx, channels } => {
                let _ = lim_set_stream_format(processor, format(*rate_idx, *channels));
            }
            FuzzOp::SetFormatPair {
                in_rate_idx,
                in_channels,
                out_rate_idx,
                out_channels,
            } => {
                let _ = lim_set_stream_format_with_output(
                    processor,
                    format(*in_rate_idx, *in_channels),
                    format(*out_rate_idx, *out_channels),
                );
            }
            FuzzOp::SetReverseFormat { rate_idx, channels } => {
                let _ = lim_set_reverse_stream_format(processor, format(*rate_idx, *channels));
            }
            FuzzOp::SetDelay(delay) => {
                let _ = lim_set_stream_delay_ms(processor, *delay);
            }
            FuzzOp::GetConfig => {
                let mut config = lim_config_default();
                let _ = lim_get_config(processor, &mut config);
            }
            FuzzOp::GetFormats => {
                let mut format_out = LimStreamFormat {
                    sample_rate_hz: 0,
                    num_channels: 0,
                };
                let _ = lim_stream_format(processor, &mut format_out);
                let _ = lim_output_stream_format(processor, &mut format_out);
                let _ = lim_reverse_stream_format(processor, &mut format_out);
            }
            FuzzOp::FrameSize => {
                let mut frame_size = 0usize;
                let _ = lim_frame_size(processor, &mut frame_size);
            }
            FuzzOp::GetStatistics => {
                let mut stats = std::mem::MaybeUninit::<LimStats>::zeroed();
                let _ = lim_statistics(processor, stats.as_mut_ptr());
            }
        }
    }

    lim_destroy(processor);
});
