//! Benchmarks for the frame-conditioning pipeline.

use std::hint::black_box;

use criterion::{Criterion, criterion_group, criterion_main};
use limpia::{StreamFormat, StreamProcessor, pcm};

fn prepared_processor(sample_rate_hz: u32, num_channels: u16) -> StreamProcessor {
    let mut processor = StreamProcessor::new(true, true, true);
    processor
        .set_stream_format(StreamFormat::new(sample_rate_hz, num_channels))
        .unwrap();
    processor
        .set_reverse_stream_format(StreamFormat::new(sample_rate_hz, num_channels))
        .unwrap();
    processor
}

fn tone_frame(sample_rate_hz: u32, num_channels: u16) -> Vec<u8> {
    let frame_size = (sample_rate_hz / 100) as usize;
    let samples: Vec<i16> = (0..frame_size * num_channels as usize)
        .map(|i| ((i % 128) as i16 - 64) * 250)
        .collect();
    pcm::encode_pcm16(&samples)
}

fn bench_process(c: &mut Criterion) {
    let mut group = c.benchmark_group("process");
    for (name, sample_rate_hz, num_channels) in [
        ("16k_mono", 16_000u32, 1u16),
        ("48k_mono", 48_000, 1),
        ("48k_stereo", 48_000, 2),
    ] {
        let mut processor = prepared_processor(sample_rate_hz, num_channels);
        let frame = tone_frame(sample_rate_hz, num_channels);
        // Settle allocations before measuring.
        for _ in 0..10 {
            let _ = processor.process(&frame).unwrap();
        }
        group.bench_function(name, |b| {
            b.iter(|| processor.process(black_box(&frame)).unwrap());
        });
    }
    group.finish();
}

fn bench_process_reverse(c: &mut Criterion) {
    let mut group = c.benchmark_group("process_reverse");
    for (name, sample_rate_hz, num_channels) in
        [("16k_mono", 16_000u32, 1u16), ("48k_stereo", 48_000, 2)]
    {
        let mut processor = prepared_processor(sample_rate_hz, num_channels);
        let frame = tone_frame(sample_rate_hz, num_channels);
        group.bench_function(name, |b| {
            b.iter(|| processor.process_reverse(black_box(&frame)).unwrap());
        });
    }
    group.finish();
}

fn bench_codec(c: &mut Criterion) {
    let mut group = c.benchmark_group("pcm");
    let samples: Vec<i16> = (0..480 * 2).map(|i| (i * 17) as i16).collect();
    let bytes = pcm::encode_pcm16(&samples);
    group.bench_function("encode_48k_stereo", |b| {
        b.iter(|| pcm::encode_pcm16(black_box(&samples)));
    });
    group.bench_function("decode_48k_stereo", |b| {
        b.iter(|| pcm::decode_pcm16(black_box(&bytes)));
    });
    group.finish();
}

criterion_group!(benches, bench_process, bench_process_reverse, bench_codec);
criterion_main!(benches);
