//! Property identity and the resolver trait.
//!
//! A property is addressed by its path on the animated target plus an index into
//! array-valued properties. Hosts implement [`PropertyResolver`] on their targets to
//! turn such an address into an opaque handle; evaluation only annotates results with
//! that handle and never reads or writes through it.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Opaque resolved-property handle (small string key, host defined).
pub type PropertyHandle = String;

/// Key of one scalar animatable property: `rna_path[array_index]`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PropertyIdentifier {
    pub rna_path: String,
    pub array_index: i32,
}

impl PropertyIdentifier {
    pub fn new(rna_path: impl Into<String>, array_index: i32) -> Self {
        Self {
            rna_path: rna_path.into(),
            array_index,
        }
    }
}

impl fmt::Display for PropertyIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[{}]", self.rna_path, self.array_index)
    }
}

/// Trait for resolving property addresses on an animated target into handles.
/// Returning `None` means the target has no such property; evaluation skips it.
pub trait PropertyResolver {
    fn resolve(&self, rna_path: &str, array_index: i32) -> Option<PropertyHandle>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use hashbrown::HashSet;

    #[test]
    fn identity_is_structural() {
        let mut set = HashSet::new();
        set.insert(PropertyIdentifier::new("location", 0));
        assert!(set.contains(&PropertyIdentifier::new(String::from("location"), 0)));
        assert!(!set.contains(&PropertyIdentifier::new("location", 1)));
        assert!(!set.contains(&PropertyIdentifier::new("rotation_euler", 0)));
    }

    #[test]
    fn display_uses_array_notation() {
        assert_eq!(
            PropertyIdentifier::new("rotation_quaternion", 3).to_string(),
            "rotation_quaternion[3]"
        );
    }
}
