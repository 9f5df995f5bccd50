//! Exported `extern "C"` functions for the conditioning C API.
//!
//! # Symbol prefix
//!
//! All public symbols use the `lim_` prefix.

use std::ptr;
use std::slice;

use limpia::{Config, StreamFormat, StreamProcessor};

use crate::panic_guard::{ffi_guard, ffi_guard_ptr};
use crate::types::{LimConfig, LimError, LimStats, LimStreamFormat, LimStreamProcessor};

// ─── Version ─────────────────────────────────────────────────────────

/// Returns a pointer to a static null-terminated version string.
///
/// The returned pointer is valid for the lifetime of the process.
#[unsafe(no_mangle)]
pub extern "C" fn lim_version() -> *const std::ffi::c_char {
    // Safety: the byte string is a static literal with a trailing NUL.
    c"0.1.0".as_ptr()
}

// ─── Lifecycle ───────────────────────────────────────────────────────

/// Returns a default-initialized configuration with every option disabled.
#[unsafe(no_mangle)]
pub extern "C" fn lim_config_default() -> LimConfig {
    LimConfig::from_rust(&Config::default())
}

/// Creates a new stream processor with the given conditioning flags.
///
/// Enabled options use their default settings. Returns `NULL` on
/// allocation failure or internal error. The caller owns the returned
/// pointer and must free it with [`lim_destroy()`].
#[unsafe(no_mangle)]
pub extern "C" fn lim_create(
    echo_cancellation: bool,
    noise_suppression: bool,
    gain_control: bool,
) -> *mut LimStreamProcessor {
    ffi_guard_ptr! {
        let processor = StreamProcessor::new(echo_cancellation, noise_suppression, gain_control);
        let boxed = Box::new(LimStreamProcessor { inner: processor });
        Box::into_raw(boxed)
    }
}

/// Creates a new stream processor with the given configuration.
///
/// Returns `NULL` on allocation failure or internal error. The caller
/// owns the returned pointer and must free it with [`lim_destroy()`].
#[unsafe(no_mangle)]
pub extern "C" fn lim_create_with_config(config: LimConfig) -> *mut LimStreamProcessor {
    ffi_guard_ptr! {
        let processor = StreamProcessor::builder().config(config.to_rust()).build();
        let boxed = Box::new(LimStreamProcessor { inner: processor });
        Box::into_raw(boxed)
    }
}

/// Destroys a stream processor and frees its memory.
///
/// Passing `NULL` is a safe no-op. After this call the pointer is invalid.
#[unsafe(no_mangle)]
pub extern "C" fn lim_destroy(processor: *mut LimStreamProcessor) {
    if !processor.is_null() {
        // Safety: we created this pointer via Box::into_raw in lim_create/
        // lim_create_with_config, and the caller guarantees single ownership.
        let _ = unsafe { Box::from_raw(processor) };
    }
}

/// Retrieves the configuration fixed at construction.
///
/// Returns `LimError::NullPointer` if `processor` or `config_out` is null.
#[unsafe(no_mangle)]
pub extern "C" fn lim_get_config(
    processor: *const LimStreamProcessor,
    config_out: *mut LimConfig,
) -> LimError {
    ffi_guard! {
        if processor.is_null() || config_out.is_null() {
            return LimError::NullPointer;
        }
        // Safety: the caller guarantees the pointers are valid.
        let processor = unsafe { &*processor };
        let c_config = LimConfig::from_rust(processor.inner.config());
        unsafe { ptr::write(config_out, c_config) };
        LimError::None
    }
}

// ─── Stream formats ──────────────────────────────────────────────────

/// Sets the forward-path format; the output format mirrors the input.
#[unsafe(no_mangle)]
pub extern "C" fn lim_set_stream_format(
    processor: *mut LimStreamProcessor,
    format: LimStreamFormat,
) -> LimError {
    ffi_guard! {
        if processor.is_null() {
            return LimError::NullPointer;
        }
        // Safety: the caller guarantees the pointer is valid and not aliased.
        let processor = unsafe { &mut *processor };
        match processor.inner.set_stream_format(format.to_rust()) {
            Ok(()) => LimError::None,
            Err(err) => LimError::from_rust(err),
        }
    }
}

/// Sets the forward-path input and output formats as one pair.
///
/// On failure the previously negotiated pair stays in effect.
#[unsafe(no_mangle)]
pub extern "C" fn lim_set_stream_format_with_output(
    processor: *mut LimStreamProcessor,
    input: LimStreamFormat,
    output: LimStreamFormat,
) -> LimError {
    ffi_guard! {
        if processor.is_null() {
            return LimError::NullPointer;
        }
        // Safety: the caller guarantees the pointer is valid and not aliased.
        let processor = unsafe { &mut *processor };
        match processor
            .inner
            .set_stream_format_with_output(input.to_rust(), output.to_rust())
        {
            Ok(()) => LimError::None,
            Err(err) => LimError::from_rust(err),
        }
    }
}

/// Sets the reverse-path (render reference) input format.
#[unsafe(no_mangle)]
pub extern "C" fn lim_set_reverse_stream_format(
    processor: *mut LimStreamProcessor,
    format: LimStreamFormat,
) -> LimError {
    ffi_guard! {
        if processor.is_null() {
            return LimError::NullPointer;
        }
        // Safety: the caller guarantees the pointer is valid and not aliased.
        let processor = unsafe { &mut *processor };
        match processor.inner.set_reverse_stream_format(format.to_rust()) {
            Ok(()) => LimError::None,
            Err(err) => LimError::from_rust(err),
        }
    }
}

/// Retrieves the forward input format.
///
/// Returns `LimError::NotConfigured` if the forward format was never set.
#[unsafe(no_mangle)]
pub extern "C" fn lim_stream_format(
    processor: *const LimStreamProcessor,
    format_out: *mut LimStreamFormat,
) -> LimError {
    ffi_guard! {
        if processor.is_null() || format_out.is_null() {
            return LimError::NullPointer;
        }
        // Safety: the caller guarantees the pointers are valid.
        let processor = unsafe { &*processor };
        match (
            processor.inner.input_sample_rate_hz(),
            processor.inner.input_num_channels(),
        ) {
            (Ok(sample_rate_hz), Ok(num_channels)) => {
                let format = StreamFormat::new(sample_rate_hz, num_channels);
                unsafe { ptr::write(format_out, LimStreamFormat::from_rust(format)) };
                LimError::None
            }
            (Err(err), _) | (_, Err(err)) => LimError::from_rust(err),
        }
    }
}

/// Retrieves the forward output format.
///
/// Returns `LimError::NotConfigured` if the forward format was never set.
#[unsafe(no_mangle)]
pub extern "C" fn lim_output_stream_format(
    processor: *const LimStreamProcessor,
    format_out: *mut LimStreamFormat,
) -> LimError {
    ffi_guard! {
        if processor.is_null() || format_out.is_null() {
            return LimError::NullPointer;
        }
        // Safety: the caller guarantees the pointers are valid.
        let processor = unsafe { &*processor };
        match (
            processor.inner.output_sample_rate_hz(),
            processor.inner.output_num_channels(),
        ) {
            (Ok(sample_rate_hz), Ok(num_channels)) => {
                let format = StreamFormat::new(sample_rate_hz, num_channels);
                unsafe { ptr::write(format_out, LimStreamFormat::from_rust(format)) };
                LimError::None
            }
            (Err(err), _) | (_, Err(err)) => LimError::from_rust(err),
        }
    }
}

/// Retrieves the reverse input format.
///
/// Returns `LimError::NotConfigured` if the reverse format was never set.
#[unsafe(no_mangle)]
pub extern "C" fn lim_reverse_stream_format(
    processor: *const LimStreamProcessor,
    format_out: *mut LimStreamFormat,
) -> LimError {
    ffi_guard! {
        if processor.is_null() || format_out.is_null() {
            return LimError::NullPointer;
        }
        // Safety: the caller guarantees the pointers are valid.
        let processor = unsafe { &*processor };
        match (
            processor.inner.reverse_sample_rate_hz(),
            processor.inner.reverse_num_channels(),
        ) {
            (Ok(sample_rate_hz), Ok(num_channels)) => {
                let format = StreamFormat::new(sample_rate_hz, num_channels);
                unsafe { ptr::write(format_out, LimStreamFormat::from_rust(format)) };
                LimError::None
            }
            (Err(err), _) | (_, Err(err)) => LimError::from_rust(err),
        }
    }
}

/// Retrieves the frame size: samples per channel in one ~10 ms frame,
/// derived from the forward input rate.
///
/// Returns `LimError::NotConfigured` if the forward format was never set.
#[unsafe(no_mangle)]
pub extern "C" fn lim_frame_size(
    processor: *const LimStreamProcessor,
    frame_size_out: *mut usize,
) -> LimError {
    ffi_guard! {
        if processor.is_null() || frame_size_out.is_null() {
            return LimError::NullPointer;
        }
        // Safety: the caller guarantees the pointers are valid.
        let processor = unsafe { &*processor };
        match processor.inner.frame_size() {
            Ok(frame_size) => {
                unsafe { ptr::write(frame_size_out, frame_size) };
                LimError::None
            }
            Err(err) => LimError::from_rust(err),
        }
    }
}

// ─── Stream delay ────────────────────────────────────────────────────

/// Sets the estimated delay between the reverse and forward paths.
///
/// Returns `LimError::BadDelay` if `delay_ms` is negative.
#[unsafe(no_mangle)]
pub extern "C" fn lim_set_stream_delay_ms(
    processor: *mut LimStreamProcessor,
    delay_ms: i32,
) -> LimError {
    ffi_guard! {
        if processor.is_null() {
            return LimError::NullPointer;
        }
        // Safety: the caller guarantees the pointer is valid and not aliased.
        let processor = unsafe { &mut *processor };
        match processor.inner.set_stream_delay_ms(delay_ms) {
            Ok(()) => LimError::None,
            Err(err) => LimError::from_rust(err),
        }
    }
}

/// Retrieves the engine's current delay estimate in milliseconds.
#[unsafe(no_mangle)]
pub extern "C" fn lim_stream_delay_ms(
    processor: *const LimStreamProcessor,
    delay_ms_out: *mut i32,
) -> LimError {
    ffi_guard! {
        if processor.is_null() || delay_ms_out.is_null() {
            return LimError::NullPointer;
        }
        // Safety: the caller guarantees the pointers are valid.
        let processor = unsafe { &*processor };
        unsafe { ptr::write(delay_ms_out, processor.inner.stream_delay_ms()) };
        LimError::None
    }
}

// ─── Frame processing ────────────────────────────────────────────────

/// Conditions one forward-path frame of interleaved PCM16 bytes.
///
/// `frame` must hold exactly one frame for the negotiated input format;
/// `output` must have room for one frame in the output format. The number
/// of bytes written is reported through `written_out`. An empty frame
/// (`frame_len == 0`) writes zero bytes and succeeds.
///
/// Returns `LimError::BufferTooSmall` without writing anything when
/// `output_cap` is smaller than the conditioned frame.
#[unsafe(no_mangle)]
pub extern "C" fn lim_process(
    processor: *mut LimStreamProcessor,
    frame: *const u8,
    frame_len: usize,
    output: *mut u8,
    output_cap: usize,
    written_out: *mut usize,
) -> LimError {
    ffi_guard! {
        if processor.is_null() || written_out.is_null() {
            return LimError::NullPointer;
        }
        if frame.is_null() && frame_len != 0 {
            return LimError::NullPointer;
        }
        // Safety: the caller guarantees the pointers are valid and
        // `frame` holds `frame_len` readable bytes.
        let processor = unsafe { &mut *processor };
        let frame = if frame_len == 0 {
            &[][..]
        } else {
            unsafe { slice::from_raw_parts(frame, frame_len) }
        };

        match processor.inner.process(frame) {
            Ok(conditioned) => {
                if conditioned.len() > output_cap {
                    return LimError::BufferTooSmall;
                }
                if !conditioned.is_empty() {
                    if output.is_null() {
                        return LimError::NullPointer;
                    }
                    // Safety: `output` holds at least `output_cap` writable
                    // bytes and the ranges cannot overlap.
                    unsafe {
                        ptr::copy_nonoverlapping(
                            conditioned.as_ptr(),
                            output,
                            conditioned.len(),
                        );
                    }
                }
                unsafe { ptr::write(written_out, conditioned.len()) };
                LimError::None
            }
            Err(err) => LimError::from_rust(err),
        }
    }
}

/// Feeds one reverse-path (render reference) frame of interleaved PCM16
/// bytes.
///
/// Same buffer contract as [`lim_process()`]; the output keeps the
/// reverse channel layout.
#[unsafe(no_mangle)]
pub extern "C" fn lim_process_reverse(
    processor: *mut LimStreamProcessor,
    frame: *const u8,
    frame_len: usize,
    output: *mut u8,
    output_cap: usize,
    written_out: *mut usize,
) -> LimError {
    ffi_guard! {
        if processor.is_null() || written_out.is_null() {
            return LimError::NullPointer;
        }
        if frame.is_null() && frame_len != 0 {
            return LimError::NullPointer;
        }
        // Safety: the caller guarantees the pointers are valid and
        // `frame` holds `frame_len` readable bytes.
        let processor = unsafe { &mut *processor };
        let frame = if frame_len == 0 {
            &[][..]
        } else {
            unsafe { slice::from_raw_parts(frame, frame_len) }
        };

        match processor.inner.process_reverse(frame) {
            Ok(reference) => {
                if reference.len() > output_cap {
                    return LimError::BufferTooSmall;
                }
                if !reference.is_empty() {
                    if output.is_null() {
                        return LimError::NullPointer;
                    }
                    // Safety: `output` holds at least `output_cap` writable
                    // bytes and the ranges cannot overlap.
                    unsafe {
                        ptr::copy_nonoverlapping(reference.as_ptr(), output, reference.len());
                    }
                }
                unsafe { ptr::write(written_out, reference.len()) };
                LimError::None
            }
            Err(err) => LimError::from_rust(err),
        }
    }
}

// ─── Statistics ──────────────────────────────────────────────────────

/// Retrieves a snapshot of the engine's statistics.
#[unsafe(no_mangle)]
pub extern "C" fn lim_statistics(
    processor: *const LimStreamProcessor,
    stats_out: *mut LimStats,
) -> LimError {
    ffi_guard! {
        if processor.is_null() || stats_out.is_null() {
            return LimError::NullPointer;
        }
        // Safety: the caller guarantees the pointers are valid.
        let processor = unsafe { &*processor };
        let stats = LimStats::from_rust(&processor.inner.statistics());
        unsafe { ptr::write(stats_out, stats) };
        LimError::None
    }
}

// ─── Tests ───────────────────────────────────────────────────────────
