// Copyright (c) 2023-2024 CMU Database Group
//
// Use of this source code is governed by an MIT-style license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use pretty_xmlish::Pretty;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

use super::ListPred;
use crate::plan_nodes::{ArcRelPredNode, RelPredNode, RelPredType, RelReprPredNode};

/// Built-in scalar functions. Names follow their SQL spelling.
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
pub enum ScalarFunction {
    Abs,
    Ceil,
    Floor,
    Round,
    Sqrt,
    Lower,
    Upper,
    Trim,
    Substring,
    Concat,
    CharLength,
    Coalesce,
    NullIf,
    DatePart,
    RegexpMatch,
    Random,
}

#[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum FuncType {
    Scalar(ScalarFunction),
    Case,
}

impl std::fmt::Display for FuncType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Scalar(func) => write!(f, "{func}"),
            Self::Case => write!(f, "CASE"),
        }
    }
}

#[derive(Clone, Debug)]
pub struct FuncPred(pub ArcRelPredNode);

impl FuncPred {
    pub fn new(func_id: FuncType, argv: ListPred) -> Self {
        FuncPred(
            RelPredNode {
                typ: RelPredType::Func(func_id),
                children: vec![argv.into_pred_node()],
                data: None,
            }
            .into(),
        )
    }

    /// Get all children.
    pub fn children(&self) -> ListPred {
        ListPred::from_pred_node(self.0.child(0)).unwrap()
    }

    /// Gets the function id.
    pub fn func(&self) -> FuncType {
        if let RelPredType::Func(func) = &self.0.typ {
            func.clone()
        } else {
            panic!("not a function")
        }
    }
}

impl RelReprPredNode for FuncPred {
    fn into_pred_node(self) -> ArcRelPredNode {
        self.0
    }

    fn from_pred_node(pred_node: ArcRelPredNode) -> Option<Self> {
        if !matches!(pred_node.typ, RelPredType::Func(_)) {
            return None;
        }
        Some(Self(pred_node))
    }

    fn explain(&self) -> Pretty<'static> {
        Pretty::simple_record(
            self.func().to_string(),
            vec![],
            vec![self.children().explain()],
        )
    }
}
