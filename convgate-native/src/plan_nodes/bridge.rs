// Copyright (c) 2023-2024 CMU Database Group
//
// Use of this source code is governed by an MIT-style license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::macros::define_plan_node;
use super::{
    derive_traits, dispatch_plan_explain, ArcRelPlanNode, ArcRelPredNode, RelNodeType,
    RelPlanNode, RelReprPlanNode,
};

/// Runs a native subtree as an opaque leaf of generic execution.
#[derive(Clone, Debug)]
pub struct NativeToEnumerable(pub ArcRelPlanNode);

define_plan_node!(
    NativeToEnumerable : RelPlanNode,
    NativeToEnumerable, [
        { 0, child: ArcRelPlanNode }
    ], []
);
