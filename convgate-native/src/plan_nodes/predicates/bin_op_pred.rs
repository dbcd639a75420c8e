// Copyright (c) 2023-2024 CMU Database Group
//
// Use of this source code is governed by an MIT-style license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use std::fmt::Display;

use pretty_xmlish::Pretty;

use crate::plan_nodes::{
    dispatch_pred_explain, ArcRelPredNode, RelPredNode, RelPredType, RelReprPredNode,
};

#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum BinOpType {
    // numerical
    Add,
    Sub,
    Mul,
    Div,
    Mod,

    // comparison
    Eq,
    Neq,
    Gt,
    Lt,
    Geq,
    Leq,
}

impl Display for BinOpType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

impl BinOpType {
    pub fn is_numerical(&self) -> bool {
        matches!(self, Self::Add | Self::Sub | Self::Mul | Self::Div | Self::Mod)
    }

    pub fn is_comparison(&self) -> bool {
        !self.is_numerical()
    }
}

#[derive(Clone, Debug)]
pub struct BinOpPred(pub ArcRelPredNode);

impl BinOpPred {
    pub fn new(left: ArcRelPredNode, right: ArcRelPredNode, op_type: BinOpType) -> Self {
        BinOpPred(
            RelPredNode {
                typ: RelPredType::BinOp(op_type),
                children: vec![left, right],
                data: None,
            }
            .into(),
        )
    }

    pub fn left_child(&self) -> ArcRelPredNode {
        self.0.child(0)
    }

    pub fn right_child(&self) -> ArcRelPredNode {
        self.0.child(1)
    }

    pub fn op_type(&self) -> BinOpType {
        if let RelPredType::BinOp(op_type) = self.0.typ {
            op_type
        } else {
            panic!("not a bin op")
        }
    }
}

impl RelReprPredNode for BinOpPred {
    fn into_pred_node(self) -> ArcRelPredNode {
        self.0
    }

    fn from_pred_node(pred_node: ArcRelPredNode) -> Option<Self> {
        if !matches!(pred_node.typ, RelPredType::BinOp(_)) {
            return None;
        }
        Some(Self(pred_node))
    }

    fn explain(&self) -> Pretty<'static> {
        Pretty::simple_record(
            self.op_type().to_string(),
            vec![],
            vec![
                dispatch_pred_explain(self.left_child()),
                dispatch_pred_explain(self.right_child()),
            ],
        )
    }
}
