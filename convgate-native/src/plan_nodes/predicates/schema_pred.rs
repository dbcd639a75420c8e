// Copyright (c) 2023-2024 CMU Database Group
//
// Use of this source code is governed by an MIT-style license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use std::sync::Arc;

use convgate_core::nodes::Value;
use itertools::Itertools;
use pretty_xmlish::Pretty;

use crate::{
    plan_nodes::{ArcRelPredNode, RelPredNode, RelPredType, RelReprPredNode},
    schema::Schema,
};

/// The declared output schema of a projection, stored as an opaque blob.
#[derive(Clone, Debug)]
pub struct SchemaPred(pub ArcRelPredNode);

impl SchemaPred {
    pub fn new(schema: &Schema) -> Self {
        let serialized_data: Arc<[u8]> = bincode::serialize(schema).unwrap().into_iter().collect();
        SchemaPred(
            RelPredNode {
                typ: RelPredType::Schema,
                children: vec![],
                data: Some(Value::Serialized(serialized_data)),
            }
            .into(),
        )
    }

    pub fn schema(&self) -> Schema {
        let serialized_data = self.0.data.as_ref().unwrap().as_slice();
        bincode::deserialize(serialized_data.as_ref()).unwrap()
    }
}

impl RelReprPredNode for SchemaPred {
    fn into_pred_node(self) -> ArcRelPredNode {
        self.0
    }

    fn from_pred_node(pred_node: ArcRelPredNode) -> Option<Self> {
        if pred_node.typ != RelPredType::Schema {
            return None;
        }
        Some(Self(pred_node))
    }

    fn explain(&self) -> Pretty<'static> {
        Pretty::display(&format!(
            "[{}]",
            self.schema().fields.iter().map(|f| f.to_string()).join(", ")
        ))
    }
}
