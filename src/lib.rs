//! Erasure-coded fragment engine over GF(2^8) and threshold secret sharing
//! over a 521-bit prime field.
//!
//! This crate protects an opaque blob of bytes (the reference use case is
//! an AES-encrypted patient record) against partial loss of its storage
//! substrate: [`FragmentCodec`] splits it into `k + m` fixed-size fragments
//! of which any `k` suffice for exact reconstruction, and
//! [`ThresholdSecretSplitter`] splits its symmetric key into `N` polynomial
//! shares of which any `T` suffice to recover it.
//!
//! Both engines are pure and stateless beyond their immutable precomputed
//! tables: no I/O, no global mutable state, safe to call concurrently from
//! multiple threads on disjoint inputs. The surrounding concerns — on-disk
//! fragment/share layout, access control, audit logging, the symmetric
//! cipher itself — are the caller's responsibility; see the `demos` crate
//! for one way to wire them together.

pub mod codec;
pub mod config;
pub mod error;
pub mod field521;
pub mod fragment;
pub mod gf256;
pub mod matrix;
pub mod secret_splitter;
pub mod share;

pub use codec::{fragment_len, FragmentCodec};
pub use config::Config;
pub use error::{Error, Result};
pub use fragment::Fragment;
pub use secret_splitter::ThresholdSecretSplitter;
pub use share::Share;
