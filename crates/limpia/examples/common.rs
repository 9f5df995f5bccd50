//! Helpers shared by multiple examples.

/// Converts a float sample in `[-1.0, 1.0]` to PCM16.
pub(crate) fn float_to_pcm16(value: f32) -> i16 {
    (value * 32_768.0).round().clamp(-32_768.0, 32_767.0) as i16
}

/// Converts a PCM16 sample back to a float in `[-1.0, 1.0)`.
pub(crate) fn pcm16_to_float(value: i16) -> f32 {
    f32::from(value) / 32_768.0
}

/// Encodes an interleaved float frame as interleaved PCM16 bytes.
pub(crate) fn floats_to_pcm16_bytes(samples: &[f32]) -> Vec<u8> {
    let pcm: Vec<i16> = samples.iter().map(|&value| float_to_pcm16(value)).collect();
    limpia::pcm::encode_pcm16(&pcm)
}

/// Decodes interleaved PCM16 bytes into interleaved float samples.
pub(crate) fn pcm16_bytes_to_floats(bytes: &[u8]) -> Vec<f32> {
    limpia::pcm::decode_pcm16(bytes)
        .iter()
        .map(|&value| pcm16_to_float(value))
        .collect()
}
