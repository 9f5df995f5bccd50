//! Record microphone audio, condition it, and write WAV files.
//!
//! Writes both raw (unconditioned) and conditioned audio to separate files
//! so you can compare them.
//!
//! ```sh
//! cargo run -p limpia --features examples --example recording -- --duration 5 --ns --agc
//! ```

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use hound::WavWriter;
use ringbuf::HeapRb;
use ringbuf::traits::{Consumer, Observer, Producer, Split};

use limpia::config::{EchoCanceller, GainControl, NoiseSuppression};
use limpia::{Config, StreamFormat, StreamProcessor, pcm};

#[allow(dead_code, reason = "shared helpers, not every example uses them all")]
mod common;

const SAMPLE_RATE: u32 = 48_000;
const NUM_CHANNELS: u16 = 1;
const FRAME_SIZE: usize = (SAMPLE_RATE / 100) as usize; // 10 ms

#[derive(Parser, Debug)]
#[command(about = "Record and condition microphone audio")]
struct Args {
    /// Recording duration in seconds.
    #[arg(short, long, default_value_t = 5)]
    duration: u64,

    /// Path for the raw (unconditioned) recording.
    #[arg(long, default_value = "raw.wav")]
    raw_output: String,

    /// Path for the conditioned recording.
    #[arg(long, default_value = "conditioned.wav")]
    conditioned_output: String,

    /// Enable echo cancellation.
    #[arg(long)]
    aec: bool,

    /// Enable noise suppression.
    #[arg(long)]
    ns: bool,

    /// Enable automatic gain control.
    #[arg(long)]
    agc: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let running = Arc::new(AtomicBool::new(true));

    ctrlc::set_handler({
        let running = running.clone();
        move || running.store(false, Ordering::SeqCst)
    })?;

    let host = cpal::default_host();
    let input_device = host
        .default_input_device()
        .context("no input device available")?;
    println!("Recording from: {}", input_device.name()?);

    let cpal_config = cpal::StreamConfig {
        channels: NUM_CHANNELS,
        sample_rate: cpal::SampleRate(SAMPLE_RATE),
        buffer_size: cpal::BufferSize::Default,
    };

    let ring_size = FRAME_SIZE * 8;
    let (mut prod, mut cons) = HeapRb::<f32>::new(ring_size).split();

    let input_stream = input_device.build_input_stream(
        &cpal_config,
        move |data: &[f32], _: &cpal::InputCallbackInfo| {
            prod.push_slice(data);
        },
        |err| eprintln!("input error: {err}"),
        None,
    )?;

    input_stream.play()?;

    // Build the conditioning options from CLI flags.
    let config = Config {
        echo_canceller: if args.aec {
            Some(EchoCanceller::default())
        } else {
            None
        },
        noise_suppression: if args.ns {
            Some(NoiseSuppression::default())
        } else {
            None
        },
        gain_control: if args.agc {
            Some(GainControl::default())
        } else {
            None
        },
        ..Default::default()
    };

    let mut processor = StreamProcessor::builder().config(config).build();
    processor.set_stream_format(StreamFormat::new(SAMPLE_RATE, NUM_CHANNELS))?;

    let spec = hound::WavSpec {
        channels: NUM_CHANNELS,
        sample_rate: SAMPLE_RATE,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };

    let mut raw_writer = WavWriter::create(&args.raw_output, spec)?;
    let mut conditioned_writer = WavWriter::create(&args.conditioned_output, spec)?;

    println!(
        "Recording for {} seconds (Ctrl+C to stop early)...",
        args.duration
    );

    let deadline = Instant::now() + Duration::from_secs(args.duration);
    let mut input_buf = vec![0.0f32; FRAME_SIZE];

    while running.load(Ordering::SeqCst) && Instant::now() < deadline {
        if cons.occupied_len() < FRAME_SIZE {
            thread::sleep(Duration::from_millis(1));
            continue;
        }

        cons.pop_slice(&mut input_buf);

        // Write the raw frame as PCM16.
        let samples: Vec<i16> = input_buf
            .iter()
            .map(|&value| common::float_to_pcm16(value))
            .collect();
        for &sample in &samples {
            raw_writer.write_sample(sample)?;
        }

        // Condition the frame and write the result.
        let conditioned = processor.process(&pcm::encode_pcm16(&samples)).unwrap();
        for sample in pcm::decode_pcm16(&conditioned) {
            conditioned_writer.write_sample(sample)?;
        }
    }

    raw_writer.finalize()?;
    conditioned_writer.finalize()?;

    println!("Wrote {} and {}", args.raw_output, args.conditioned_output);

    Ok(())
}
