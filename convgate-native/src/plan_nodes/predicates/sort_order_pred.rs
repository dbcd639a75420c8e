// Copyright (c) 2023-2024 CMU Database Group
//
// Use of this source code is governed by an MIT-style license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use std::fmt::Display;

use convgate_core::trait_set::{FieldCollation, SortDirection};
use pretty_xmlish::Pretty;

use super::ColumnRefPred;
use crate::plan_nodes::{
    dispatch_pred_explain, ArcRelPredNode, RelPredNode, RelPredType, RelReprPredNode,
};

#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum SortOrderType {
    Asc,
    Desc,
}

impl Display for SortOrderType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

impl From<SortDirection> for SortOrderType {
    fn from(direction: SortDirection) -> Self {
        match direction {
            SortDirection::Asc => Self::Asc,
            SortDirection::Desc => Self::Desc,
        }
    }
}

impl From<SortOrderType> for SortDirection {
    fn from(order: SortOrderType) -> Self {
        match order {
            SortOrderType::Asc => Self::Asc,
            SortOrderType::Desc => Self::Desc,
        }
    }
}

#[derive(Clone, Debug)]
pub struct SortOrderPred(pub ArcRelPredNode);

impl SortOrderPred {
    pub fn new(order: SortOrderType, child: ArcRelPredNode) -> Self {
        SortOrderPred(
            RelPredNode {
                typ: RelPredType::SortOrder(order),
                children: vec![child],
                data: None,
            }
            .into(),
        )
    }

    pub fn from_field_collation(key: FieldCollation) -> Self {
        Self::new(
            key.direction.into(),
            ColumnRefPred::new(key.field_index).into_pred_node(),
        )
    }

    pub fn child(&self) -> ArcRelPredNode {
        self.0.child(0)
    }

    pub fn order(&self) -> SortOrderType {
        if let RelPredType::SortOrder(order) = self.0.typ {
            order
        } else {
            panic!("not a sort order expr")
        }
    }

    /// Only keys over a plain column describe a collation.
    pub fn to_field_collation(&self) -> Option<FieldCollation> {
        let column = ColumnRefPred::from_pred_node(self.0.children.first()?.clone())?;
        Some(FieldCollation::new(column.index(), self.order().into()))
    }
}

impl RelReprPredNode for SortOrderPred {
    fn into_pred_node(self) -> ArcRelPredNode {
        self.0
    }

    fn from_pred_node(pred_node: ArcRelPredNode) -> Option<Self> {
        if !matches!(pred_node.typ, RelPredType::SortOrder(_)) {
            return None;
        }
        Some(Self(pred_node))
    }

    fn explain(&self) -> Pretty<'static> {
        Pretty::simple_record(
            "SortOrder",
            vec![("order", self.order().to_string().into())],
            vec![dispatch_pred_explain(self.child())],
        )
    }
}
