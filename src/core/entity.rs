//! Card instance identification.
//!
//! Every spawned card gets a unique `InstanceId` from the engine's
//! `InstanceAllocator`. Ids are never reused within one engine, so a
//! handle to a torn-down instance stays stale forever instead of silently
//! pointing at a newer card in the same slot.
//!
//! ## Usage
//!
//! ```
//! use card_hand::core::{InstanceAllocator, InstanceId};
//!
//! let mut alloc = InstanceAllocator::new();
//! let first = alloc.alloc().unwrap();
//! let second = alloc.alloc().unwrap();
//!
//! assert_eq!(first, InstanceId(0));
//! assert_ne!(first, second);
//! ```

use serde::{Deserialize, Serialize};

use super::error::{HandError, HandResult};

/// Opaque handle to a spawned card instance.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct InstanceId(pub u32);

impl InstanceId {
    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl From<u32> for InstanceId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for InstanceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Instance({})", self.0)
    }
}

/// Monotonic allocator for `InstanceId`s.
#[derive(Clone, Debug, Default)]
pub struct InstanceAllocator {
    next: u32,
}

impl InstanceAllocator {
    /// Create an allocator starting at id 0.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate the next id.
    ///
    /// Fails with `InstancesExhausted` once the `u32` id space is used up.
    pub fn alloc(&mut self) -> HandResult<InstanceId> {
        let id = InstanceId(self.next);
        self.next = self.next.checked_add(1).ok_or(HandError::InstancesExhausted)?;
        Ok(id)
    }

    /// Number of ids handed out so far.
    #[must_use]
    pub fn allocated(&self) -> u32 {
        self.next
    }
}
