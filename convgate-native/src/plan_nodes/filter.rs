// Copyright (c) 2023-2024 CMU Database Group
//
// Use of this source code is governed by an MIT-style license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::macros::define_plan_node;
use super::{
    derive_traits, dispatch_plan_explain, dispatch_pred_explain, ArcRelPlanNode, ArcRelPredNode,
    RelNodeType, RelPlanNode, RelReprPlanNode,
};

#[derive(Clone, Debug)]
pub struct LogicalFilter(pub ArcRelPlanNode);

define_plan_node!(
    LogicalFilter : RelPlanNode,
    Filter, [
        { 0, child: ArcRelPlanNode }
    ], [
        { 0, cond: ArcRelPredNode }
    ]
);

#[derive(Clone, Debug)]
pub struct NativeFilter(pub ArcRelPlanNode);

define_plan_node!(
    NativeFilter : RelPlanNode,
    NativeFilter, [
        { 0, child: ArcRelPlanNode }
    ], [
        { 0, cond: ArcRelPredNode }
    ]
);
