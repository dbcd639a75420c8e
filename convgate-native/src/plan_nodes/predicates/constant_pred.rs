// Copyright (c) 2023-2024 CMU Database Group
//
// Use of this source code is governed by an MIT-style license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use std::sync::Arc;

use convgate_core::nodes::Value;
use ordered_float::OrderedFloat;
use pretty_xmlish::Pretty;
use serde::{Deserialize, Serialize};

use crate::plan_nodes::{ArcRelPredNode, RelPredNode, RelPredType, RelReprPredNode};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ConstantType {
    Bool,
    Utf8String,
    UInt8,
    UInt16,
    UInt32,
    UInt64,
    Int8,
    Int16,
    Int32,
    Int64,
    Float64,
    Null,
}

#[derive(Clone, Debug)]
pub struct ConstantPred(pub ArcRelPredNode);

impl ConstantPred {
    pub fn new_with_type(value: Option<Value>, typ: ConstantType) -> Self {
        ConstantPred(
            RelPredNode {
                typ: RelPredType::Constant(typ),
                children: vec![],
                data: value,
            }
            .into(),
        )
    }

    pub fn null() -> Self {
        Self::new_with_type(None, ConstantType::Null)
    }

    pub fn bool(value: bool) -> Self {
        Self::new_with_type(Some(Value::Bool(value)), ConstantType::Bool)
    }

    pub fn string(value: impl AsRef<str>) -> Self {
        Self::new_with_type(
            Some(Value::String(value.as_ref().into())),
            ConstantType::Utf8String,
        )
    }

    pub fn uint64(value: u64) -> Self {
        Self::new_with_type(Some(Value::UInt64(value)), ConstantType::UInt64)
    }

    pub fn int32(value: i32) -> Self {
        Self::new_with_type(Some(Value::Int32(value)), ConstantType::Int32)
    }

    pub fn int64(value: i64) -> Self {
        Self::new_with_type(Some(Value::Int64(value)), ConstantType::Int64)
    }

    pub fn float64(value: f64) -> Self {
        Self::new_with_type(Some(Value::Float(OrderedFloat(value))), ConstantType::Float64)
    }

    /// Gets the constant value. `None` for the null constant.
    pub fn value(&self) -> Option<Value> {
        self.0.data.clone()
    }

    pub fn is_null(&self) -> bool {
        self.0.data.is_none()
    }

    pub fn as_str(&self) -> Option<Arc<str>> {
        match &self.0.data {
            Some(Value::String(s)) => Some(s.clone()),
            _ => None,
        }
    }
}

impl RelReprPredNode for ConstantPred {
    fn into_pred_node(self) -> ArcRelPredNode {
        self.0
    }

    fn from_pred_node(pred_node: ArcRelPredNode) -> Option<Self> {
        if let RelPredType::Constant(_) = pred_node.typ {
            Some(Self(pred_node))
        } else {
            None
        }
    }

    fn explain(&self) -> Pretty<'static> {
        match self.value() {
            Some(value) => Pretty::display(&value),
            None => Pretty::display(&"NULL"),
        }
    }
}
