// Copyright (c) 2023-2024 CMU Database Group
//
// Use of this source code is governed by an MIT-style license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Expressions whose value is only known while the query runs.

use convgate_core::nodes::Value;
use pretty_xmlish::Pretty;

use crate::plan_nodes::{ArcRelPredNode, RelPredNode, RelPredType, RelReprPredNode};

/// A bind parameter, `?0`, `?1`, ...
#[derive(Clone, Debug)]
pub struct DynamicParamPred(pub ArcRelPredNode);

impl DynamicParamPred {
    pub fn new(param_idx: usize) -> Self {
        DynamicParamPred(
            RelPredNode {
                typ: RelPredType::DynamicParam,
                children: vec![],
                data: Some(Value::UInt64(param_idx as u64)),
            }
            .into(),
        )
    }

    pub fn index(&self) -> usize {
        self.0.data.as_ref().unwrap().as_u64() as usize
    }
}

impl RelReprPredNode for DynamicParamPred {
    fn into_pred_node(self) -> ArcRelPredNode {
        self.0
    }

    fn from_pred_node(pred_node: ArcRelPredNode) -> Option<Self> {
        if pred_node.typ != RelPredType::DynamicParam {
            return None;
        }
        Some(Self(pred_node))
    }

    fn explain(&self) -> Pretty<'static> {
        Pretty::display(&format!("?{}", self.index()))
    }
}

/// A correlation variable set by a join and read by the subquery on its right side.
#[derive(Clone, Debug)]
pub struct CorrelationIdPred(pub ArcRelPredNode);

impl CorrelationIdPred {
    pub fn new(id: u32) -> Self {
        CorrelationIdPred(
            RelPredNode {
                typ: RelPredType::CorrelationId,
                children: vec![],
                data: Some(Value::UInt32(id)),
            }
            .into(),
        )
    }

    pub fn id(&self) -> u32 {
        match self.0.data {
            Some(Value::UInt32(id)) => id,
            _ => panic!("not a correlation id"),
        }
    }
}

impl RelReprPredNode for CorrelationIdPred {
    fn into_pred_node(self) -> ArcRelPredNode {
        self.0
    }

    fn from_pred_node(pred_node: ArcRelPredNode) -> Option<Self> {
        if pred_node.typ != RelPredType::CorrelationId {
            return None;
        }
        Some(Self(pred_node))
    }

    fn explain(&self) -> Pretty<'static> {
        Pretty::display(&format!("$cor{}", self.id()))
    }
}
