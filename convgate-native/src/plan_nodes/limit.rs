// Copyright (c) 2023-2024 CMU Database Group
//
// Use of this source code is governed by an MIT-style license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::macros::define_plan_node;
use super::{
    derive_traits, dispatch_plan_explain, dispatch_pred_explain, non_null, ArcRelPlanNode,
    ArcRelPredNode, ConstantPred, RelNodeType, RelPlanNode, RelReprPlanNode, RelReprPredNode,
};

/// Skips `offset` rows and returns at most `fetch` rows of its input, in input order.
#[derive(Clone, Debug)]
pub struct NativeLimit(pub ArcRelPlanNode);

define_plan_node!(
    NativeLimit : RelPlanNode,
    NativeLimit, [
        { 0, child: ArcRelPlanNode }
    ], [
        { 0, offset: ArcRelPredNode },
        { 1, fetch: ArcRelPredNode }
    ]
);

impl NativeLimit {
    /// The row count, once folded to a constant. `None` means no limit.
    pub fn fetch_count(&self) -> Option<u64> {
        non_null(self.fetch())
            .and_then(ConstantPred::from_pred_node)
            .and_then(|x| x.value())
            .and_then(|x| x.to_u64())
    }

    pub fn offset_expr(&self) -> Option<ArcRelPredNode> {
        non_null(self.offset())
    }
}
