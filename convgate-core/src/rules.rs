// Copyright (c) 2023-2024 CMU Database Group
//
// Use of this source code is governed by an MIT-style license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

mod ir;

use crate::{
    nodes::{ArcPlanNode, NodeType},
    optimizer::Optimizer,
    trait_set::Convention,
};

pub use ir::RuleMatcher;

/// A converter rule: re-expresses a node of one calling convention as an equivalent node of
/// another.
///
/// The optimizer asks `matches` first and only then calls `apply`. `apply` may still decline by
/// returning `None`, which means "this plan alternative is unavailable", never an error.
pub trait Rule<T: NodeType, O: Optimizer<T>>: 'static + Send + Sync {
    fn matcher(&self) -> &RuleMatcher<T>;

    /// Convention a node must carry for the rule to fire.
    fn in_convention(&self) -> Convention;

    /// Convention of the node the rule produces.
    fn out_convention(&self) -> Convention;

    /// Rule-specific eligibility. Must only inspect `node` and static capability facts.
    fn guard(&self, _node: &ArcPlanNode<T>) -> bool {
        true
    }

    fn matches(&self, node: &ArcPlanNode<T>) -> bool {
        self.matcher().matches(&node.typ)
            && node.convention() == self.in_convention()
            && self.guard(node)
    }

    fn apply(&self, optimizer: &O, node: ArcPlanNode<T>) -> Option<ArcPlanNode<T>>;

    fn name(&self) -> &'static str;
}
