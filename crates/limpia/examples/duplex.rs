//! Microphone loopback with conditioning: mic in, speakers out.
//!
//! Captured frames are conditioned and played back, and every played frame
//! is fed to the reverse path as the echo reference, so an echo-cancelling
//! engine sees what the speakers emit. Uses cpal for audio I/O and ring
//! buffers to shuttle samples between the callbacks and a processing
//! thread.
//!
//! ```sh
//! cargo run -p limpia --features examples --example duplex
//! ```

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::Duration;

use anyhow::{Context, Result};
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use ringbuf::HeapRb;
use ringbuf::traits::{Consumer, Observer, Producer, Split};

use limpia::config::{EchoCanceller, NoiseSuppression};
use limpia::{Config, StreamFormat, StreamProcessor};

#[allow(dead_code, reason = "shared helpers, not every example uses them all")]
mod common;

const SAMPLE_RATE: u32 = 48_000;
const NUM_CHANNELS: u16 = 1;
const FRAME_SIZE: usize = (SAMPLE_RATE / 100) as usize; // 10 ms

fn main() -> Result<()> {
    let running = Arc::new(AtomicBool::new(true));

    ctrlc::set_handler({
        let running = running.clone();
        move || running.store(false, Ordering::SeqCst)
    })?;

    let host = cpal::default_host();
    let input_device = host
        .default_input_device()
        .context("no input device available")?;
    let output_device = host
        .default_output_device()
        .context("no output device available")?;

    println!("Input:  {}", input_device.name()?);
    println!("Output: {}", output_device.name()?);

    let cpal_config = cpal::StreamConfig {
        channels: NUM_CHANNELS,
        sample_rate: cpal::SampleRate(SAMPLE_RATE),
        buffer_size: cpal::BufferSize::Default,
    };

    // Ring buffers: input callback → processing thread → output callback.
    let ring_size = FRAME_SIZE * 8;
    let (mut in_prod, mut in_cons) = HeapRb::<f32>::new(ring_size).split();
    let (mut out_prod, mut out_cons) = HeapRb::<f32>::new(ring_size).split();

    // Input stream: push mic samples into the ring buffer.
    let input_stream = input_device.build_input_stream(
        &cpal_config,
        move |data: &[f32], _: &cpal::InputCallbackInfo| {
            in_prod.push_slice(data);
        },
        |err| eprintln!("input error: {err}"),
        None,
    )?;

    // Output stream: pull conditioned samples from the ring buffer.
    let output_stream = output_device.build_output_stream(
        &cpal_config,
        move |data: &mut [f32], _: &cpal::OutputCallbackInfo| {
            let filled = out_cons.pop_slice(data);
            data[filled..].fill(0.0);
        },
        |err| eprintln!("output error: {err}"),
        None,
    )?;

    input_stream.play()?;
    output_stream.play()?;

    // Processing thread: read 10 ms frames, condition them, push to output.
    let running_proc = running.clone();
    let proc_thread = thread::spawn(move || {
        let config = Config {
            echo_canceller: Some(EchoCanceller::default()),
            noise_suppression: Some(NoiseSuppression::default()),
            ..Default::default()
        };
        let mut processor = StreamProcessor::builder().config(config).build();
        processor
            .set_stream_format(StreamFormat::new(SAMPLE_RATE, NUM_CHANNELS))
            .expect("valid forward format");
        processor
            .set_reverse_stream_format(StreamFormat::new(SAMPLE_RATE, NUM_CHANNELS))
            .expect("valid reverse format");
        // Half the ring buffer, as a rough loopback latency estimate.
        processor.set_stream_delay_ms(40).expect("non-negative delay");

        let mut input_buf = vec![0.0f32; FRAME_SIZE];

        while running_proc.load(Ordering::SeqCst) {
            if in_cons.occupied_len() < FRAME_SIZE {
                thread::sleep(Duration::from_millis(1));
                continue;
            }
            in_cons.pop_slice(&mut input_buf);

            // Condition the mic frame.
            let frame = common::floats_to_pcm16_bytes(&input_buf);
            let conditioned = processor.process(&frame).unwrap();

            // Tell the engine what we are sending to the speakers.
            processor.process_reverse(&conditioned).unwrap();

            out_prod.push_slice(&common::pcm16_bytes_to_floats(&conditioned));
        }
    });

    println!("Looping mic -> conditioning -> speakers (Ctrl+C to stop)");

    while running.load(Ordering::SeqCst) {
        thread::sleep(Duration::from_millis(100));
    }

    drop(input_stream);
    drop(output_stream);
    proc_thread.join().unwrap();

    println!("\nDone.");
    Ok(())
}
