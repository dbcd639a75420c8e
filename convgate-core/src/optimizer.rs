// Copyright (c) 2023-2024 CMU Database Group
//
// Use of this source code is governed by an MIT-style license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use anyhow::Result;

use crate::{
    nodes::{ArcPlanNode, NodeType},
    trait_set::{Convention, TraitSet},
};

/// The contract rules use to reach back into whatever drives them.
pub trait Optimizer<T: NodeType> {
    /// Requests `node` with the traits `required`. `None` when no alternative can be produced.
    fn convert(&self, node: ArcPlanNode<T>, required: &TraitSet) -> Option<ArcPlanNode<T>>;

    /// Converts every node into `convention`, keeping the rest of each node's traits. Declines as
    /// a whole if any single node declines.
    fn convert_list(
        &self,
        nodes: &[ArcPlanNode<T>],
        convention: Convention,
    ) -> Option<Vec<ArcPlanNode<T>>> {
        nodes
            .iter()
            .map(|node| {
                let required = node.traits.replace(convention);
                self.convert(node.clone(), &required)
            })
            .collect()
    }

    fn optimize(&mut self, root: ArcPlanNode<T>, required: &TraitSet) -> Result<ArcPlanNode<T>>;
}
