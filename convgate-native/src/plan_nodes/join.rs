// Copyright (c) 2023-2024 CMU Database Group
//
// Use of this source code is governed by an MIT-style license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use core::fmt;
use std::fmt::Display;

use super::macros::define_plan_node;
use super::{
    derive_traits, dispatch_plan_explain, dispatch_pred_explain, ArcRelPlanNode, ArcRelPredNode,
    RelNodeType, RelPlanNode, RelReprPlanNode,
};

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum JoinType {
    Inner = 1,
    FullOuter,
    LeftOuter,
    RightOuter,
    LeftSemi,
    LeftAnti,
}

impl Display for JoinType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

#[derive(Clone, Debug)]
pub struct LogicalJoin(pub ArcRelPlanNode);

// `variables_stopped` lists the correlation ids this join sets for its right side
define_plan_node!(
    LogicalJoin : RelPlanNode,
    Join, [
        { 0, left: ArcRelPlanNode },
        { 1, right: ArcRelPlanNode }
    ], [
        { 0, cond: ArcRelPredNode },
        { 1, variables_stopped: ArcRelPredNode }
    ], { join_type: JoinType }
);

#[derive(Clone, Debug)]
pub struct NativeJoin(pub ArcRelPlanNode);

define_plan_node!(
    NativeJoin : RelPlanNode,
    NativeJoin, [
        { 0, left: ArcRelPlanNode },
        { 1, right: ArcRelPlanNode }
    ], [
        { 0, cond: ArcRelPredNode },
        { 1, variables_stopped: ArcRelPredNode }
    ], { join_type: JoinType }
);
