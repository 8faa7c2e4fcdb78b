//! Identifiers for core entities.
//!
//! Layers and strips are addressed through ids that carry their owner, so that a
//! removal request can be checked against the container it is sent to. Outputs are
//! addressed by their stable integer index.

use std::sync::atomic::{AtomicU32, Ordering};

use serde::{Deserialize, Serialize};

/// Stable index of an [`Output`](crate::output::Output) within its animation.
/// Assigned from 1 upwards and never reused.
pub type OutputIndex = i32;

/// Process-unique identity of one [`Animation`](crate::animation::Animation).
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct AnimUid(pub u32);

/// Reserved for entities that do not belong to any animation.
const DETACHED_UID: AnimUid = AnimUid(0);

static NEXT_ANIM_UID: AtomicU32 = AtomicU32::new(1);

impl AnimUid {
    pub(crate) fn fresh() -> Self {
        AnimUid(NEXT_ANIM_UID.fetch_add(1, Ordering::Relaxed))
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct LayerId {
    pub owner: AnimUid,
    pub serial: u32,
}

impl LayerId {
    /// Id of a layer that was never added to an animation.
    pub const DETACHED: LayerId = LayerId {
        owner: DETACHED_UID,
        serial: 0,
    };

    #[inline]
    pub fn is_detached(&self) -> bool {
        self.owner == DETACHED_UID
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct StripId {
    pub layer: LayerId,
    pub serial: u32,
}

impl StripId {
    /// Id of a strip that was created outside of any layer.
    pub const DETACHED: StripId = StripId {
        layer: LayerId::DETACHED,
        serial: 0,
    };
}

/// Monotonic serial allocator. Serials start at 1; 0 is reserved for detached entities.
#[derive(Default, Debug, Clone)]
pub struct IdAllocator {
    last: u32,
}

impl IdAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn alloc(&mut self) -> u32 {
        self.last = self.last.wrapping_add(1);
        self.last
    }

    /// The most recently allocated serial (0 when nothing was allocated yet).
    #[inline]
    pub fn last(&self) -> u32 {
        self.last
    }
}
