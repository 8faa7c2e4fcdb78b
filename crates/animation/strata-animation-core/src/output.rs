//! Outputs: stable identities for animated targets.
//!
//! Strips refer to outputs by [`OutputIndex`] only. The index is handed out by the
//! owning animation and survives removal of other outputs, so a strip never holds a
//! dangling reference; at worst its channels are no longer looked up.

use serde::{Deserialize, Serialize};

use crate::ids::OutputIndex;

/// Kind of data-block an output animates. `Unassigned` accepts any target.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IdType {
    #[default]
    Unassigned,
    Object,
    Armature,
    Camera,
    Light,
    Material,
    Mesh,
    Scene,
    World,
}

/// External target an output can be bound to.
pub trait AnimatedId {
    fn id_type(&self) -> IdType;
    /// Human-readable name, recorded as the output's fallback.
    fn name(&self) -> &str;
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Output {
    stable_index: OutputIndex,
    idtype: IdType,
    /// Name of the last assigned target, used when that target goes missing.
    fallback: String,
}

impl Output {
    pub(crate) fn new(stable_index: OutputIndex) -> Self {
        Self {
            stable_index,
            idtype: IdType::Unassigned,
            fallback: String::new(),
        }
    }

    #[inline]
    pub fn stable_index(&self) -> OutputIndex {
        self.stable_index
    }

    #[inline]
    pub fn idtype(&self) -> IdType {
        self.idtype
    }

    #[inline]
    pub fn fallback(&self) -> &str {
        &self.fallback
    }

    /// An output without an id type can animate anything; otherwise the types must match.
    pub fn is_suitable_for(&self, target: &dyn AnimatedId) -> bool {
        self.idtype == IdType::Unassigned || self.idtype == target.id_type()
    }

    /// Bind this output to `target`, recording its type and name.
    /// Returns `false` (and changes nothing) when the target is of another type.
    pub fn assign_id(&mut self, target: &dyn AnimatedId) -> bool {
        if !self.is_suitable_for(target) {
            log::warn!(
                "output {} ({:?}) cannot animate {:?} '{}'",
                self.stable_index,
                self.idtype,
                target.id_type(),
                target.name()
            );
            return false;
        }
        self.idtype = target.id_type();
        self.fallback = target.name().to_string();
        true
    }
}
