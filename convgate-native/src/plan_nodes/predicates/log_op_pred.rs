// Copyright (c) 2023-2024 CMU Database Group
//
// Use of this source code is governed by an MIT-style license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use std::fmt::Display;

use itertools::Itertools;
use pretty_xmlish::Pretty;

use crate::plan_nodes::{
    dispatch_pred_explain, ArcRelPredNode, RelPredNode, RelPredType, RelReprPredNode,
};

#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum LogOpType {
    And,
    Or,
}

impl Display for LogOpType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

#[derive(Clone, Debug)]
pub struct LogOpPred(pub ArcRelPredNode);

impl LogOpPred {
    pub fn new(op_type: LogOpType, preds: Vec<ArcRelPredNode>) -> Self {
        LogOpPred(
            RelPredNode {
                typ: RelPredType::LogOp(op_type),
                children: preds,
                data: None,
            }
            .into(),
        )
    }

    pub fn children(&self) -> Vec<ArcRelPredNode> {
        self.0.children.clone()
    }

    pub fn child(&self, idx: usize) -> ArcRelPredNode {
        self.0.child(idx)
    }

    pub fn op_type(&self) -> LogOpType {
        if let RelPredType::LogOp(op_type) = self.0.typ {
            op_type
        } else {
            panic!("not a log op")
        }
    }
}

impl RelReprPredNode for LogOpPred {
    fn into_pred_node(self) -> ArcRelPredNode {
        self.0
    }

    fn from_pred_node(pred_node: ArcRelPredNode) -> Option<Self> {
        if !matches!(pred_node.typ, RelPredType::LogOp(_)) {
            return None;
        }
        Some(Self(pred_node))
    }

    fn explain(&self) -> Pretty<'static> {
        Pretty::simple_record(
            self.op_type().to_string(),
            vec![],
            self.0
                .children
                .iter()
                .map(|x| dispatch_pred_explain(x.clone()))
                .collect_vec(),
        )
    }
}
