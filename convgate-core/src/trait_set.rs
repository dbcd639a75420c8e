// Copyright (c) 2023-2024 CMU Database Group
//
// Use of this source code is governed by an MIT-style license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Traits a plan node delivers: the calling convention it runs in and the order of its output.

use std::fmt::Display;

use itertools::Itertools;
use serde::{Deserialize, Serialize};

/// An opaque tag naming the engine that can execute a node.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Convention(&'static str);

impl Convention {
    /// Logical nodes. Nothing executes them directly.
    pub const NONE: Convention = Convention("NONE");
    /// Generic, interpretable execution.
    pub const ENUMERABLE: Convention = Convention("ENUMERABLE");

    pub const fn new(name: &'static str) -> Self {
        Self(name)
    }

    pub fn name(&self) -> &'static str {
        self.0
    }
}

impl Display for Convention {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl Display for SortDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Asc => write!(f, "ASC"),
            Self::Desc => write!(f, "DESC"),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FieldCollation {
    pub field_index: usize,
    pub direction: SortDirection,
}

impl FieldCollation {
    pub fn new(field_index: usize, direction: SortDirection) -> Self {
        Self {
            field_index,
            direction,
        }
    }
}

impl Display for FieldCollation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{} {}", self.field_index, self.direction)
    }
}

/// Output order, most significant key first. Empty means no guaranteed order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Collation(pub Vec<FieldCollation>);

impl Collation {
    pub fn empty() -> Self {
        Self(vec![])
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn keys(&self) -> &[FieldCollation] {
        &self.0
    }

    /// A stream ordered by `self` is also ordered by every prefix of it.
    pub fn satisfies(&self, required: &Collation) -> bool {
        required.0.len() <= self.0.len() && self.0.iter().zip(&required.0).all(|(a, b)| a == b)
    }
}

impl Display for Collation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.0.iter().join(", "))
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct TraitSet {
    pub convention: Convention,
    pub collation: Collation,
}

impl TraitSet {
    pub fn new(convention: Convention, collation: Collation) -> Self {
        Self {
            convention,
            collation,
        }
    }

    pub fn of(convention: Convention) -> Self {
        Self::new(convention, Collation::empty())
    }

    /// The traits of a logical node.
    pub fn logical() -> Self {
        Self::of(Convention::NONE)
    }

    /// Same traits, different convention.
    pub fn replace(&self, convention: Convention) -> Self {
        Self {
            convention,
            collation: self.collation.clone(),
        }
    }

    pub fn replace_collation(&self, collation: Collation) -> Self {
        Self {
            convention: self.convention,
            collation,
        }
    }

    pub fn satisfies(&self, required: &TraitSet) -> bool {
        self.convention == required.convention && self.collation.satisfies(&required.collation)
    }
}

impl Display for TraitSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.collation.is_empty() {
            write!(f, "{{{}}}", self.convention)
        } else {
            write!(f, "{{{} {}}}", self.convention, self.collation)
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn asc(idx: usize) -> FieldCollation {
        FieldCollation::new(idx, SortDirection::Asc)
    }

    #[test]
    fn collation_prefix_satisfies() {
        let derived = Collation(vec![asc(0), asc(2)]);
        assert!(derived.satisfies(&Collation::empty()));
        assert!(derived.satisfies(&Collation(vec![asc(0)])));
        assert!(derived.satisfies(&derived.clone()));
        assert!(!derived.satisfies(&Collation(vec![asc(2)])));
        assert!(!derived.satisfies(&Collation(vec![FieldCollation::new(0, SortDirection::Desc)])));
        assert!(!Collation(vec![asc(0)]).satisfies(&derived));
    }

    #[test]
    fn replace_keeps_collation() {
        let traits = TraitSet::new(Convention::NONE, Collation(vec![asc(1)]));
        let replaced = traits.replace(Convention::ENUMERABLE);
        assert_eq!(replaced.convention, Convention::ENUMERABLE);
        assert_eq!(replaced.collation, traits.collation);
    }

    #[test]
    fn replace_collation_keeps_convention() {
        let native = Convention::new("NATIVE");
        let sorted = TraitSet::of(native).replace_collation(Collation(vec![asc(1)]));
        assert_eq!(sorted, TraitSet::new(native, Collation(vec![asc(1)])));
        assert_eq!(sorted.replace_collation(Collation::empty()), TraitSet::of(native));
    }

    #[test]
    fn satisfies_requires_same_convention() {
        let native = Convention::new("NATIVE");
        let sorted = TraitSet::new(native, Collation(vec![asc(0)]));
        assert!(sorted.satisfies(&TraitSet::of(native)));
        assert!(!sorted.satisfies(&TraitSet::of(Convention::ENUMERABLE)));
        assert!(!TraitSet::of(native).satisfies(&sorted));
    }

    #[test]
    fn display() {
        let traits = TraitSet::new(
            Convention::ENUMERABLE,
            Collation(vec![asc(0), FieldCollation::new(3, SortDirection::Desc)]),
        );
        assert_eq!(traits.to_string(), "{ENUMERABLE [#0 ASC, #3 DESC]}");
        assert_eq!(TraitSet::logical().to_string(), "{NONE}");
    }
}
