// Copyright (c) 2023-2024 CMU Database Group
//
// Use of this source code is governed by an MIT-style license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use arrow_schema::DataType;
use pretty_xmlish::Pretty;

use crate::plan_nodes::{ArcRelPredNode, RelPredNode, RelPredType, RelReprPredNode};

#[derive(Clone, Debug)]
pub struct DataTypePred(pub ArcRelPredNode);

impl DataTypePred {
    pub fn new(typ: DataType) -> Self {
        DataTypePred(
            RelPredNode {
                typ: RelPredType::DataType(typ),
                children: vec![],
                data: None,
            }
            .into(),
        )
    }

    pub fn data_type(&self) -> DataType {
        if let RelPredType::DataType(data_type) = &self.0.typ {
            data_type.clone()
        } else {
            panic!("not a data type")
        }
    }
}

impl RelReprPredNode for DataTypePred {
    fn into_pred_node(self) -> ArcRelPredNode {
        self.0
    }

    fn from_pred_node(pred_node: ArcRelPredNode) -> Option<Self> {
        if !matches!(pred_node.typ, RelPredType::DataType(_)) {
            return None;
        }
        Some(Self(pred_node))
    }

    fn explain(&self) -> Pretty<'static> {
        Pretty::display(&self.data_type().to_string())
    }
}
