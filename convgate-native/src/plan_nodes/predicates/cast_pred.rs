// Copyright (c) 2023-2024 CMU Database Group
//
// Use of this source code is governed by an MIT-style license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use arrow_schema::DataType;
use pretty_xmlish::Pretty;

use super::DataTypePred;
use crate::plan_nodes::{
    dispatch_pred_explain, ArcRelPredNode, RelPredNode, RelPredType, RelReprPredNode,
};

#[derive(Clone, Debug)]
pub struct CastPred(pub ArcRelPredNode);

impl CastPred {
    pub fn new(child: ArcRelPredNode, cast_to: DataType) -> Self {
        CastPred(
            RelPredNode {
                typ: RelPredType::Cast,
                children: vec![child, DataTypePred::new(cast_to).into_pred_node()],
                data: None,
            }
            .into(),
        )
    }

    pub fn child(&self) -> ArcRelPredNode {
        self.0.child(0)
    }

    pub fn cast_to(&self) -> DataType {
        DataTypePred::from_pred_node(self.0.child(1))
            .unwrap()
            .data_type()
    }
}

impl RelReprPredNode for CastPred {
    fn into_pred_node(self) -> ArcRelPredNode {
        self.0
    }

    fn from_pred_node(pred_node: ArcRelPredNode) -> Option<Self> {
        if !matches!(pred_node.typ, RelPredType::Cast) {
            return None;
        }
        Some(Self(pred_node))
    }

    fn explain(&self) -> Pretty<'static> {
        Pretty::simple_record(
            "Cast",
            vec![
                ("cast_to", format!("{}", self.cast_to()).into()),
                ("expr", dispatch_pred_explain(self.child())),
            ],
            vec![],
        )
    }
}
