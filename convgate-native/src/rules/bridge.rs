// Copyright (c) 2023-2024 CMU Database Group
//
// Use of this source code is governed by an MIT-style license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use convgate_core::{
    optimizer::Optimizer,
    rules::{Rule, RuleMatcher},
    trait_set::Convention,
};

use crate::plan_nodes::{ArcRelPlanNode, NativeToEnumerable, RelNodeType, RelReprPlanNode, NATIVE};

/// Lets generic execution consume a native subtree as an opaque leaf.
pub struct NativeToEnumerableRule {
    matcher: RuleMatcher<RelNodeType>,
}

impl NativeToEnumerableRule {
    pub fn new() -> Self {
        Self {
            matcher: RuleMatcher::MatchAny,
        }
    }
}

impl<O: Optimizer<RelNodeType>> Rule<RelNodeType, O> for NativeToEnumerableRule {
    fn matcher(&self) -> &RuleMatcher<RelNodeType> {
        &self.matcher
    }

    fn in_convention(&self) -> Convention {
        NATIVE
    }

    fn out_convention(&self) -> Convention {
        Convention::ENUMERABLE
    }

    /// Every node below must be native too, not just the root.
    fn guard(&self, node: &ArcRelPlanNode) -> bool {
        node.is_fully_in(NATIVE)
    }

    fn apply(&self, _optimizer: &O, node: ArcRelPlanNode) -> Option<ArcRelPlanNode> {
        if !node.is_fully_in(NATIVE) {
            return None;
        }
        Some(NativeToEnumerable::new(node).into_plan_node())
    }

    fn name(&self) -> &'static str {
        "native_to_enumerable"
    }
}
