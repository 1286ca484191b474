//! The opaque, position-identified output of [`crate::FragmentCodec`].

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// An immutable byte buffer produced by [`crate::FragmentCodec::encode`].
///
/// A fragment carries no index or length metadata of its own: positional
/// identity (which slot of the `k+m` fragment-set this came from) lives
/// entirely in the caller's bookkeeping. A fragment separated from its index
/// is unrecoverable.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Fragment(Vec<u8>);

impl Fragment {
    pub(crate) fn new(bytes: Vec<u8>) -> Self {
        Fragment(bytes)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.0
    }
}

impl From<Fragment> for Vec<u8> {
    fn from(f: Fragment) -> Self {
        f.0
    }
}

impl AsRef<[u8]> for Fragment {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}
