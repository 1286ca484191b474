//! Ergonomic bundling of the engine's entire configuration surface.
//!
//! `FragmentCodec::new` and `ThresholdSecretSplitter::new` together are the
//! whole configuration surface of this crate (on-disk layout and CLI
//! plumbing are out of scope per the crate docs). `Config` exists purely as
//! a convenience for constructing both engines from one small, optionally
//! file-loaded record — it carries no behavior of its own.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::codec::FragmentCodec;
use crate::error::Result;
use crate::secret_splitter::ThresholdSecretSplitter;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Config {
    /// Data fragment count for [`FragmentCodec`].
    pub k: usize,
    /// Parity fragment count for [`FragmentCodec`].
    pub m: usize,
    /// Reconstruction threshold for [`ThresholdSecretSplitter`].
    pub t: usize,
    /// Total share count for [`ThresholdSecretSplitter`].
    pub n: usize,
}

impl Config {
    pub fn new(k: usize, m: usize, t: usize, n: usize) -> Self {
        Config { k, m, t, n }
    }

    pub fn build_codec(&self) -> Result<FragmentCodec> {
        FragmentCodec::new(self.k, self.m)
    }

    pub fn build_splitter(&self) -> Result<ThresholdSecretSplitter> {
        ThresholdSecretSplitter::new(self.t, self.n)
    }
}
