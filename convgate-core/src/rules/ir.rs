// Copyright (c) 2023-2024 CMU Database Group
//
// Use of this source code is governed by an MIT-style license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use std::mem::Discriminant;

use crate::nodes::NodeType;

pub enum RuleMatcher<T: NodeType> {
    /// Match a node of type `typ`.
    MatchNode { typ: T },
    /// Match a node whose type has the same variant as the one the discriminant was taken from,
    /// whatever the variant's payload is.
    MatchDiscriminant { typ_discriminant: Discriminant<T> },
    /// Match any node.
    MatchAny,
}

impl<T: NodeType> RuleMatcher<T> {
    pub fn matches(&self, typ: &T) -> bool {
        match self {
            RuleMatcher::MatchNode { typ: expected } => expected == typ,
            RuleMatcher::MatchDiscriminant { typ_discriminant } => {
                std::mem::discriminant(typ) == *typ_discriminant
            }
            RuleMatcher::MatchAny => true,
        }
    }
}
