//! Channel groups: all curves of one output within one keyframe strip.

use hashbrown::HashMap;

use crate::curve::{Curve, FCurve};
use crate::ids::OutputIndex;
use crate::property::PropertyIdentifier;

/// Curves of one output in one strip, keyed by property.
///
/// Curves are stored densely in creation order; the map only points into the
/// vector so that a curve's position (and so its `CurveHandle`) never changes.
#[derive(Debug, Clone)]
pub struct ChannelGroup<C = FCurve> {
    output_stable_index: OutputIndex,
    curves: Vec<(PropertyIdentifier, C)>,
    lookup: HashMap<PropertyIdentifier, usize>,
}

impl<C: Curve> ChannelGroup<C> {
    pub(crate) fn new(output_stable_index: OutputIndex) -> Self {
        Self {
            output_stable_index,
            curves: Vec::new(),
            lookup: HashMap::new(),
        }
    }

    #[inline]
    pub fn output_stable_index(&self) -> OutputIndex {
        self.output_stable_index
    }

    /// Number of curves in this group.
    #[inline]
    pub fn len(&self) -> usize {
        self.curves.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.curves.is_empty()
    }

    /// Position of the curve for `rna_path[array_index]`, if it exists.
    pub fn curve_index(&self, rna_path: &str, array_index: i32) -> Option<usize> {
        self.lookup
            .get(&PropertyIdentifier::new(rna_path, array_index))
            .copied()
    }

    pub fn curve_find(&self, rna_path: &str, array_index: i32) -> Option<&C> {
        self.curve_index(rna_path, array_index)
            .map(|i| &self.curves[i].1)
    }

    /// Position of the curve for `prop` and the curve itself, creating an empty
    /// curve on first use.
    pub(crate) fn curve_find_or_create(&mut self, prop: PropertyIdentifier) -> (usize, &mut C) {
        let index = match self.lookup.get(&prop) {
            Some(&index) => index,
            None => {
                let index = self.curves.len();
                log::debug!(
                    "creating curve {} for output {}",
                    prop,
                    self.output_stable_index
                );
                self.lookup.insert(prop.clone(), index);
                self.curves.push((prop, C::default()));
                index
            }
        };
        (index, &mut self.curves[index].1)
    }

    /// Drop curves at positions `len..`, keeping earlier positions intact.
    pub(crate) fn truncate_curves(&mut self, len: usize) {
        for (prop, _) in self.curves.drain(len.min(self.curves.len())..) {
            self.lookup.remove(&prop);
        }
    }

    pub fn curve(&self, index: usize) -> Option<(&PropertyIdentifier, &C)> {
        self.curves.get(index).map(|(p, c)| (p, c))
    }

    pub fn curve_mut(&mut self, index: usize) -> Option<(&PropertyIdentifier, &mut C)> {
        self.curves.get_mut(index).map(|(p, c)| (&*p, c))
    }

    /// All curves in creation order.
    pub fn curves(&self) -> impl Iterator<Item = (&PropertyIdentifier, &C)> {
        self.curves.iter().map(|(p, c)| (p, c))
    }
}
