//! C-compatible FFI layer for the `limpia` conditioning facade.
//!
//! # Symbol prefix
//!
//! - Functions: `lim_*`
//! - Types: `Lim*`
//!
//! # Conventions
//!
//! Fallible functions return [`types::LimError`] (`0` = success, negative
//! = error) and report values through out-parameters. Frame buffers are
//! interleaved PCM16 bytes in native byte order, exactly as on the Rust
//! API.
//!
//! # Thread safety
//!
//! Handles are **not thread-safe**: all calls on the same
//! [`types::LimStreamProcessor`] must be serialized by the caller.

mod conversions;
pub mod functions;
mod panic_guard;
pub mod types;
