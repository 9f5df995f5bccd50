//! Minimal conditioning walkthrough on synthetic audio.
//!
//! Negotiates a stereo-to-mono forward stream, feeds one second of a
//! synthetic tone through the forward and reverse paths, and prints what
//! came back.
//!
//! ```sh
//! cargo run -p limpia --example simple
//! ```

use limpia::{StreamFormat, StreamProcessor, pcm};

const SAMPLE_RATE: u32 = 48_000;

fn main() {
    let mut processor = StreamProcessor::new(true, true, false);
    processor
        .set_stream_format_with_output(
            StreamFormat::new(SAMPLE_RATE, 2),
            StreamFormat::new(SAMPLE_RATE, 1),
        )
        .expect("valid forward formats");
    processor
        .set_reverse_stream_format(StreamFormat::new(SAMPLE_RATE, 1))
        .expect("valid reverse format");
    processor.set_stream_delay_ms(30).expect("non-negative delay");

    let frame_size = processor.frame_size().expect("forward format is set");
    println!(
        "frame size: {frame_size} samples per channel ({} bytes in, {} bytes out)",
        frame_size * 2 * 2,
        frame_size * 2,
    );

    let render_silence = vec![0u8; frame_size * 2];
    let mut peak_in: i16 = 0;
    let mut peak_out: i16 = 0;

    for frame_index in 0..100 {
        let capture = stereo_tone_frame(frame_index, frame_size);

        processor
            .process_reverse(&render_silence)
            .expect("reverse frame length matches");
        let conditioned = processor
            .process(&capture)
            .expect("capture frame length matches");
        assert_eq!(conditioned.len(), frame_size * 2);

        peak_in = peak_in.max(peak(&capture));
        peak_out = peak_out.max(peak(&conditioned));
    }

    println!("peak capture sample:     {peak_in}");
    println!("peak conditioned sample: {peak_out}");
    println!("delay estimate:          {} ms", processor.stream_delay_ms());
}

/// 10 ms of a 440 Hz tone, louder on the left channel.
fn stereo_tone_frame(frame_index: usize, frame_size: usize) -> Vec<u8> {
    let mut samples = Vec::with_capacity(frame_size * 2);
    for i in 0..frame_size {
        let t = (frame_index * frame_size + i) as f32 / SAMPLE_RATE as f32;
        let tone = (t * 440.0 * 2.0 * std::f32::consts::PI).sin();
        samples.push((tone * 12_000.0) as i16);
        samples.push((tone * 6_000.0) as i16);
    }
    pcm::encode_pcm16(&samples)
}

fn peak(frame: &[u8]) -> i16 {
    pcm::decode_pcm16(frame)
        .iter()
        .map(|&sample| sample.saturating_abs())
        .max()
        .unwrap_or(0)
}
