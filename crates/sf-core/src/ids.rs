use core::fmt;
use core::num::NonZeroU32;

use crate::{SfError, SfResult};

/// Largest chain the NS 12845 tree method is used for here.
pub const MAX_NODES: usize = 20;

/// 1-based position along the sprinkler chain.
///
/// Nodes and pipe sections are parallel arrays: section `n` ends at node `n`,
/// so both share this type. `NonZero` keeps `Option<Nr>` the size of `Nr`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Nr(NonZeroU32);

impl Nr {
    /// First node of the chain (the hydraulically most remote sprinkler).
    pub const FIRST: Nr = Nr(NonZeroU32::MIN);

    /// Create from a 1-based number. Returns `None` for 0.
    pub fn new(number: u32) -> Option<Self> {
        NonZeroU32::new(number).map(Self)
    }

    /// Create a number from a 0-based array index by storing index+1.
    pub fn from_index(index: usize) -> Self {
        let number = u32::try_from(index)
            .ok()
            .and_then(|i| i.checked_add(1))
            .and_then(NonZeroU32::new)
            .unwrap_or(NonZeroU32::MAX);
        Self(number)
    }

    /// Checked conversion of a wire number against the chain length.
    pub fn checked(number: u32, count: usize, what: &'static str) -> SfResult<Self> {
        match Self::new(number) {
            Some(nr) if nr.index() < count => Ok(nr),
            _ => Err(SfError::NumberOutOfRange {
                what,
                number,
                count,
            }),
        }
    }

    /// The 1-based number as seen on the wire.
    pub fn get(self) -> u32 {
        self.0.get()
    }

    /// Recover the 0-based index.
    pub fn index(self) -> usize {
        (self.0.get() - 1) as usize
    }
}

impl fmt::Debug for Nr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Nr({})", self.get())
    }
}

impl fmt::Display for Nr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.get())
    }
}

/// Domain-specific aliases for clarity (no runtime cost).
pub type NodeNr = Nr;
pub type SectionNr = Nr;
