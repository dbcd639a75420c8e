// Copyright (c) 2023-2024 CMU Database Group
//
// Use of this source code is governed by an MIT-style license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use convgate_core::nodes::Value;
use itertools::Itertools;
use pretty_xmlish::Pretty;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

use super::{ColumnRefPred, ListPred};
use crate::plan_nodes::{ArcRelPredNode, RelPredNode, RelPredType, RelReprPredNode};

/// Aggregate functions an aggregate call may invoke.
#[derive(
    Copy,
    Clone,
    PartialEq,
    Eq,
    Hash,
    Debug,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum AggFuncType {
    Count,
    Sum,
    Min,
    Max,
    Avg,
    /// Fails at run time if the group holds more than one row.
    SingleValue,
    AnyValue,
    StddevPop,
    StddevSamp,
    VarPop,
    VarSamp,
    Listagg,
}

/// One aggregate call of an aggregate node: function, DISTINCT flag and argument columns.
#[derive(Clone, Debug)]
pub struct AggCallPred(pub ArcRelPredNode);

impl AggCallPred {
    pub fn new(func: AggFuncType, distinct: bool, args: Vec<usize>) -> Self {
        let args = ListPred::new(
            args.into_iter()
                .map(|idx| ColumnRefPred::new(idx).into_pred_node())
                .collect(),
        );
        AggCallPred(
            RelPredNode {
                typ: RelPredType::AggCall(func),
                children: vec![args.into_pred_node()],
                data: Some(Value::Bool(distinct)),
            }
            .into(),
        )
    }

    pub fn func(&self) -> AggFuncType {
        if let RelPredType::AggCall(func) = self.0.typ {
            func
        } else {
            panic!("not an aggregate call")
        }
    }

    pub fn is_distinct(&self) -> bool {
        matches!(self.0.data, Some(Value::Bool(true)))
    }

    /// Argument column indexes. `None` if an argument is not a plain column.
    pub fn arg_columns(&self) -> Option<Vec<usize>> {
        ListPred::from_pred_node(self.0.children.first()?.clone())?
            .to_vec()
            .into_iter()
            .map(|arg| ColumnRefPred::from_pred_node(arg).map(|col| col.index()))
            .collect()
    }
}

impl RelReprPredNode for AggCallPred {
    fn into_pred_node(self) -> ArcRelPredNode {
        self.0
    }

    fn from_pred_node(pred_node: ArcRelPredNode) -> Option<Self> {
        if !matches!(pred_node.typ, RelPredType::AggCall(_)) {
            return None;
        }
        Some(Self(pred_node))
    }

    fn explain(&self) -> Pretty<'static> {
        let args = self
            .arg_columns()
            .unwrap_or_default()
            .into_iter()
            .map(|idx| format!("#{idx}"))
            .join(", ");
        let distinct = if self.is_distinct() { "DISTINCT " } else { "" };
        Pretty::display(&format!("{}({distinct}{args})", self.func()))
    }
}
