// Copyright (c) 2023-2024 CMU Database Group
//
// Use of this source code is governed by an MIT-style license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! A greedy driver for converter rules. It commits to the first rule whose result satisfies the
//! requested traits; there is no cost model and no memo.

use std::sync::Arc;

use anyhow::{anyhow, Result};
use serde::Deserialize;
use tracing::trace;

use crate::{
    nodes::{ArcPlanNode, NodeType},
    optimizer::Optimizer,
    rules::Rule,
    trait_set::TraitSet,
};

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct HeuristicConverterProperties {
    /// How many intermediate conventions a node may pass through before reaching the requested
    /// one. A logical node needs one hop to reach an execution convention through a backend.
    pub max_hops: usize,
}

impl Default for HeuristicConverterProperties {
    fn default() -> Self {
        Self { max_hops: 2 }
    }
}

pub struct HeuristicConverter<T: NodeType> {
    rules: Arc<[Arc<dyn Rule<T, Self>>]>,
    properties: HeuristicConverterProperties,
}

impl<T: NodeType> HeuristicConverter<T> {
    pub fn new_with_rules(rules: Vec<Arc<dyn Rule<T, Self>>>) -> Self {
        Self::new_with_properties(rules, HeuristicConverterProperties::default())
    }

    pub fn new_with_properties(
        rules: Vec<Arc<dyn Rule<T, Self>>>,
        properties: HeuristicConverterProperties,
    ) -> Self {
        Self {
            rules: rules.into(),
            properties,
        }
    }

    pub fn rules(&self) -> &[Arc<dyn Rule<T, Self>>] {
        &self.rules
    }

    pub fn properties(&self) -> &HeuristicConverterProperties {
        &self.properties
    }

    fn convert_inner(
        &self,
        node: ArcPlanNode<T>,
        required: &TraitSet,
        hops_left: usize,
    ) -> Option<ArcPlanNode<T>> {
        if node.traits.satisfies(required) {
            return Some(node);
        }
        stacker::maybe_grow(32 * 1024, 1024 * 1024, || {
            // Rules that land in the requested convention directly.
            for rule in self.rules.iter() {
                if rule.out_convention() != required.convention || !rule.matches(&node) {
                    continue;
                }
                if let Some(converted) = self.try_apply(rule, &node) {
                    if converted.traits.satisfies(required) {
                        return Some(converted);
                    }
                    trace!(
                        event = "rule_unsatisfied",
                        rule = rule.name(),
                        traits = %converted.traits,
                        required = %required
                    );
                }
            }
            if hops_left == 0 {
                return None;
            }
            // Rules that move the node into some other convention first.
            for rule in self.rules.iter() {
                let out = rule.out_convention();
                if out == required.convention || out == node.convention() || !rule.matches(&node) {
                    continue;
                }
                if let Some(converted) = self.try_apply(rule, &node) {
                    if let Some(res) = self.convert_inner(converted, required, hops_left - 1) {
                        return Some(res);
                    }
                }
            }
            None
        })
    }

    fn try_apply(
        &self,
        rule: &Arc<dyn Rule<T, Self>>,
        node: &ArcPlanNode<T>,
    ) -> Option<ArcPlanNode<T>> {
        trace!(event = "rule_apply", rule = rule.name(), node = %node.typ);
        let res = rule.apply(self, node.clone());
        match &res {
            Some(converted) => trace!(
                event = "rule_fired",
                rule = rule.name(),
                node = %node.typ,
                output = %converted.typ
            ),
            None => trace!(event = "rule_declined", rule = rule.name(), node = %node.typ),
        }
        res
    }
}

impl<T: NodeType> Optimizer<T> for HeuristicConverter<T> {
    fn convert(&self, node: ArcPlanNode<T>, required: &TraitSet) -> Option<ArcPlanNode<T>> {
        self.convert_inner(node, required, self.properties.max_hops)
    }

    fn optimize(&mut self, root: ArcPlanNode<T>, required: &TraitSet) -> Result<ArcPlanNode<T>> {
        let typ = root.typ.clone();
        let traits = root.traits.clone();
        self.convert(root, required)
            .ok_or_else(|| anyhow!("no plan for {typ} {traits} in {required}"))
    }
}
