// Copyright (c) 2023-2024 CMU Database Group
//
// Use of this source code is governed by an MIT-style license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

mod agg_call_pred;
mod bin_op_pred;
mod cast_pred;
mod column_ref_pred;
mod constant_pred;
mod data_type_pred;
mod func_pred;
mod list_pred;
mod log_op_pred;
mod param_pred;
mod schema_pred;
mod sort_order_pred;
mod un_op_pred;

pub use agg_call_pred::{AggCallPred, AggFuncType};
pub use bin_op_pred::{BinOpPred, BinOpType};
pub use cast_pred::CastPred;
pub use column_ref_pred::ColumnRefPred;
pub use constant_pred::{ConstantPred, ConstantType};
use convgate_core::trait_set::Collation;
pub use data_type_pred::DataTypePred;
pub use func_pred::{FuncPred, FuncType, ScalarFunction};
pub use list_pred::ListPred;
pub use log_op_pred::{LogOpPred, LogOpType};
pub use param_pred::{CorrelationIdPred, DynamicParamPred};
pub use schema_pred::SchemaPred;
pub use sort_order_pred::{SortOrderPred, SortOrderType};
pub use un_op_pred::{UnOpPred, UnOpType};

use super::{ArcRelPredNode, RelReprPredNode};

/// Builds the sort key list of a sort node from a collation.
pub fn sort_exprs(collation: &Collation) -> ArcRelPredNode {
    ListPred::new(
        collation
            .keys()
            .iter()
            .map(|key| SortOrderPred::from_field_collation(*key).into_pred_node())
            .collect(),
    )
    .into_pred_node()
}

/// Reads a sort key list back as a collation. Keys that are not `SortOrder(ColumnRef)` make the
/// list malformed.
pub fn collation_from_exprs(exprs: &ArcRelPredNode) -> Option<Collation> {
    let list = ListPred::from_pred_node(exprs.clone())?;
    list.to_vec()
        .into_iter()
        .map(|key| SortOrderPred::from_pred_node(key)?.to_field_collation())
        .collect::<Option<Vec<_>>>()
        .map(Collation)
}

/// `None` for the `Null` constant that marks an absent optional payload.
pub fn non_null(pred: ArcRelPredNode) -> Option<ArcRelPredNode> {
    match ConstantPred::from_pred_node(pred.clone()) {
        Some(constant) if constant.is_null() => None,
        _ => Some(pred),
    }
}
