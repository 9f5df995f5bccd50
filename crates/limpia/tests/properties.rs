//! Property-based tests for format negotiation and frame framing.

use limpia::{
    Error, ErrorKind, MAX_SAMPLE_RATE_HZ, MIN_SAMPLE_RATE_HZ, StreamFormat, StreamProcessor, pcm,
};
use proptest::prelude::*;
use test_strategy::{Arbitrary, proptest};

/// Sample rates the conditioning engines run at natively.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Arbitrary)]
enum NativeRate {
    #[weight(1)]
    Hz8000,
    #[weight(2)]
    Hz16000,
    #[weight(1)]
    Hz32000,
    #[weight(2)]
    Hz48000,
}

impl NativeRate {
    fn hz(self) -> u32 {
        match self {
            Self::Hz8000 => 8_000,
            Self::Hz16000 => 16_000,
            Self::Hz32000 => 32_000,
            Self::Hz48000 => 48_000,
        }
    }
}

/// Channel layouts worth exercising.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Arbitrary)]
enum Channels {
    #[weight(3)]
    Mono,
    #[weight(3)]
    Stereo,
    #[weight(1)]
    Quad,
}

impl Channels {
    fn count(self) -> u16 {
        match self {
            Self::Mono => 1,
            Self::Stereo => 2,
            Self::Quad => 4,
        }
    }
}

fn out_of_range_rate() -> impl Strategy<Value = u32> {
    prop_oneof![
        0..MIN_SAMPLE_RATE_HZ,
        (MAX_SAMPLE_RATE_HZ + 1)..=u32::MAX,
    ]
}

fn frame_samples(rate: NativeRate, channels: Channels) -> impl Strategy<Value = Vec<i16>> {
    let len = (rate.hz() / 100) as usize * channels.count() as usize;
    proptest::collection::vec(any::<i16>(), len..=len)
}

#[proptest]
fn in_range_formats_are_accepted(
    #[strategy(MIN_SAMPLE_RATE_HZ..=MAX_SAMPLE_RATE_HZ)] sample_rate_hz: u32,
    #[strategy(1u16..=8)] num_channels: u16,
) {
    let mut processor = StreamProcessor::default();
    processor
        .set_stream_format(StreamFormat::new(sample_rate_hz, num_channels))
        .unwrap();
    prop_assert_eq!(processor.input_sample_rate_hz(), Ok(sample_rate_hz));
    prop_assert_eq!(processor.input_num_channels(), Ok(num_channels));
    prop_assert_eq!(processor.output_sample_rate_hz(), Ok(sample_rate_hz));
    prop_assert_eq!(processor.output_num_channels(), Ok(num_channels));
    prop_assert_eq!(processor.frame_size(), Ok((sample_rate_hz / 100) as usize));
}

#[proptest]
fn out_of_range_rates_are_rejected(
    #[strategy(out_of_range_rate())] sample_rate_hz: u32,
    #[strategy(1u16..=8)] num_channels: u16,
) {
    let mut processor = StreamProcessor::default();
    let err = processor
        .set_stream_format(StreamFormat::new(sample_rate_hz, num_channels))
        .unwrap_err();
    prop_assert_eq!(err, Error::UnsupportedSampleRate { sample_rate_hz });
    prop_assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    // Nothing was stored.
    prop_assert!(processor.input_sample_rate_hz().is_err());
}

#[proptest]
fn zero_channels_are_always_rejected(sample_rate_hz: u32) {
    let mut processor = StreamProcessor::default();
    let err = processor
        .set_stream_format(StreamFormat::new(sample_rate_hz, 0))
        .unwrap_err();
    prop_assert_eq!(err, Error::InvalidChannelCount);
}

#[proptest]
fn failed_negotiation_keeps_the_previous_format(
    rate: NativeRate,
    channels: Channels,
    #[strategy(out_of_range_rate())] bad_rate: u32,
) {
    let mut processor = StreamProcessor::default();
    processor
        .set_stream_format(StreamFormat::new(rate.hz(), channels.count()))
        .unwrap();
    processor
        .set_stream_format(StreamFormat::new(bad_rate, 1))
        .unwrap_err();
    prop_assert_eq!(processor.input_sample_rate_hz(), Ok(rate.hz()));
    prop_assert_eq!(processor.input_num_channels(), Ok(channels.count()));
}

#[proptest]
fn conditioned_frames_have_the_output_shape(
    rate: NativeRate,
    input_channels: Channels,
    output_channels: Channels,
    #[strategy(frame_samples(#rate, #input_channels))] samples: Vec<i16>,
) {
    let mut processor = StreamProcessor::new(true, true, true);
    processor
        .set_stream_format_with_output(
            StreamFormat::new(rate.hz(), input_channels.count()),
            StreamFormat::new(rate.hz(), output_channels.count()),
        )
        .unwrap();

    let conditioned = processor.process(&pcm::encode_pcm16(&samples)).unwrap();
    let expected = (rate.hz() / 100) as usize * output_channels.count() as usize * 2;
    prop_assert_eq!(conditioned.len(), expected);
}

#[proptest]
fn wrong_length_frames_are_rejected(
    rate: NativeRate,
    channels: Channels,
    #[strategy(0usize..8192)] frame_len: usize,
) {
    let mut processor = StreamProcessor::default();
    processor
        .set_stream_format(StreamFormat::new(rate.hz(), channels.count()))
        .unwrap();
    let expected = (rate.hz() / 100) as usize * channels.count() as usize * 2;
    prop_assume!(frame_len != expected && frame_len != 0);

    let frame = vec![0u8; frame_len];
    let err = processor.process(&frame).unwrap_err();
    prop_assert_eq!(
        err,
        Error::FrameSizeMismatch {
            expected,
            actual: frame_len,
        }
    );
}

#[proptest]
fn reverse_frames_follow_the_forward_rate(
    forward_rate: NativeRate,
    reverse_rate: NativeRate,
    reverse_channels: Channels,
) {
    let mut processor = StreamProcessor::new(true, false, false);
    processor
        .set_stream_format(StreamFormat::new(forward_rate.hz(), 1))
        .unwrap();
    processor
        .set_reverse_stream_format(StreamFormat::new(
            reverse_rate.hz(),
            reverse_channels.count(),
        ))
        .unwrap();

    let expected = (forward_rate.hz() / 100) as usize * reverse_channels.count() as usize * 2;
    let frame = vec![0u8; expected];
    let reference = processor.process_reverse(&frame).unwrap();
    prop_assert_eq!(reference.len(), expected);
}

#[proptest]
fn negative_delays_are_rejected(#[strategy(i32::MIN..0)] delay_ms: i32) {
    let mut processor = StreamProcessor::default();
    prop_assert_eq!(
        processor.set_stream_delay_ms(delay_ms),
        Err(Error::InvalidDelay { delay_ms })
    );
    prop_assert_eq!(processor.stream_delay_ms(), 0);
}

#[proptest]
fn non_negative_delays_are_stored(#[strategy(0..=i32::MAX)] delay_ms: i32) {
    let mut processor = StreamProcessor::default();
    processor.set_stream_delay_ms(delay_ms).unwrap();
    prop_assert_eq!(processor.stream_delay_ms(), delay_ms);
}

#[proptest]
fn pcm16_roundtrip(
    #[strategy(proptest::collection::vec(any::<i16>(), 0..2048))] samples: Vec<i16>,
) {
    let bytes = pcm::encode_pcm16(&samples);
    prop_assert_eq!(bytes.len(), samples.len() * 2);
    prop_assert_eq!(pcm::decode_pcm16(&bytes), samples);
}
