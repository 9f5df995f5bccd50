//! PCM16 byte framing.
//!
//! Frame buffers on the byte API are interleaved signed 16-bit samples in
//! native byte order, two bytes per sample, channel-interleaved
//! (`ch0, ch1, .., ch0, ch1, ..`). The codec is explicit so the byte
//! contract never depends on pointer casts or alignment.

/// Decodes a PCM16 byte buffer into interleaved samples.
///
/// # Panics
///
/// Panics if `bytes.len()` is odd.
pub fn decode_pcm16(bytes: &[u8]) -> Vec<i16> {
    assert_eq!(bytes.len() % 2, 0, "PCM16 buffer length must be even");
    bytes
        .chunks_exact(2)
        .map(|pair| i16::from_ne_bytes([pair[0], pair[1]]))
        .collect()
}

/// Encodes interleaved samples into a PCM16 byte buffer.
pub fn encode_pcm16(samples: &[i16]) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(samples.len() * 2);
    for &sample in samples {
        bytes.extend_from_slice(&sample.to_ne_bytes());
    }
    bytes
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_known_samples() {
        let samples = [0i16, 1, -1, i16::MAX, i16::MIN];
        let mut bytes = Vec::new();
        for sample in samples {
            bytes.extend_from_slice(&sample.to_ne_bytes());
        }
        assert_eq!(decode_pcm16(&bytes), samples);
    }

    #[test]
    fn encode_known_samples() {
        let bytes = encode_pcm16(&[258, -2]);
        assert_eq!(&bytes[..2], 258i16.to_ne_bytes());
        assert_eq!(&bytes[2..], (-2i16).to_ne_bytes());
    }

    #[test]
    fn roundtrip() {
        let samples: Vec<i16> = (-500..500).map(|i| i * 7).collect();
        assert_eq!(decode_pcm16(&encode_pcm16(&samples)), samples);
    }

    #[test]
    fn empty_buffers() {
        assert!(decode_pcm16(&[]).is_empty());
        assert!(encode_pcm16(&[]).is_empty());
    }

    #[test]
    #[should_panic(expected = "must be even")]
    fn odd_length_panics() {
        let _ = decode_pcm16(&[0, 1, 2]);
    }
}
