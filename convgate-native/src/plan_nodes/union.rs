// Copyright (c) 2023-2024 CMU Database Group
//
// Use of this source code is governed by an MIT-style license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use convgate_core::nodes::Value;
use itertools::Itertools;
use pretty_xmlish::Pretty;

use super::{
    derive_traits, dispatch_plan_explain, ArcRelPlanNode, ConstantPred, RelNodeType, RelPlanNode,
    RelReprPlanNode, RelReprPredNode,
};

// A union has any number of inputs, so it is written out by hand rather than with
// define_plan_node!.
fn new_union(typ: RelNodeType, inputs: Vec<ArcRelPlanNode>, all: bool) -> ArcRelPlanNode {
    let predicates = vec![ConstantPred::bool(all).into_pred_node()];
    let traits = derive_traits(typ, &inputs, &predicates);
    RelPlanNode {
        typ,
        children: inputs,
        predicates,
        traits,
    }
    .into()
}

fn is_all(node: &RelPlanNode) -> bool {
    matches!(node.predicates[0].data, Some(Value::Bool(true)))
}

fn explain_union(name: &'static str, node: &ArcRelPlanNode) -> Pretty<'static> {
    Pretty::simple_record(
        name,
        vec![
            ("all", is_all(node).to_string().into()),
            ("traits", node.traits.to_string().into()),
        ],
        node.children
            .iter()
            .map(|x| dispatch_plan_explain(x.clone()))
            .collect_vec(),
    )
}

/// UNION (`all` false, set semantics) or UNION ALL (bag semantics) of its inputs.
#[derive(Clone, Debug)]
pub struct LogicalUnion(pub ArcRelPlanNode);

impl LogicalUnion {
    pub fn new(inputs: Vec<ArcRelPlanNode>, all: bool) -> Self {
        Self(new_union(RelNodeType::Union, inputs, all))
    }

    pub fn inputs(&self) -> Vec<ArcRelPlanNode> {
        self.0.children.clone()
    }

    pub fn all(&self) -> bool {
        is_all(&self.0)
    }
}

impl RelReprPlanNode for LogicalUnion {
    fn into_plan_node(self) -> ArcRelPlanNode {
        self.0
    }

    fn from_plan_node(plan_node: ArcRelPlanNode) -> Option<Self> {
        if plan_node.typ != RelNodeType::Union {
            return None;
        }
        Some(Self(plan_node))
    }

    fn explain(&self) -> Pretty<'static> {
        explain_union("LogicalUnion", &self.0)
    }
}

#[derive(Clone, Debug)]
pub struct NativeUnion(pub ArcRelPlanNode);

impl NativeUnion {
    pub fn new(inputs: Vec<ArcRelPlanNode>, all: bool) -> Self {
        Self(new_union(RelNodeType::NativeUnion, inputs, all))
    }

    pub fn inputs(&self) -> Vec<ArcRelPlanNode> {
        self.0.children.clone()
    }

    pub fn all(&self) -> bool {
        is_all(&self.0)
    }
}

impl RelReprPlanNode for NativeUnion {
    fn into_plan_node(self) -> ArcRelPlanNode {
        self.0
    }

    fn from_plan_node(plan_node: ArcRelPlanNode) -> Option<Self> {
        if plan_node.typ != RelNodeType::NativeUnion {
            return None;
        }
        Some(Self(plan_node))
    }

    fn explain(&self) -> Pretty<'static> {
        explain_union("NativeUnion", &self.0)
    }
}
