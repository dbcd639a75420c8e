// Copyright (c) 2023-2024 CMU Database Group
//
// Use of this source code is governed by an MIT-style license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use convgate_core::trait_set::Collation;

use super::macros::define_plan_node;
use super::{
    collation_from_exprs, derive_traits, dispatch_plan_explain, dispatch_pred_explain,
    non_null, sort_exprs, ArcRelPlanNode, ArcRelPredNode, ConstantPred, ListPred, RelNodeType,
    RelPlanNode, RelReprPlanNode, RelReprPredNode,
};

#[derive(Clone, Debug)]
pub struct LogicalSort(pub ArcRelPlanNode);

// each key in `exprs` is a SortOrder over a column ref
// `offset` and `fetch` hold the Null constant when absent
define_plan_node!(
    LogicalSort : RelPlanNode,
    Sort, [
        { 0, child: ArcRelPlanNode }
    ], [
        { 0, exprs: ArcRelPredNode },
        { 1, offset: ArcRelPredNode },
        { 2, fetch: ArcRelPredNode }
    ]
);

impl LogicalSort {
    /// An order-only sort.
    pub fn new_ordered(child: ArcRelPlanNode, collation: &Collation) -> Self {
        Self::new(
            child,
            sort_exprs(collation),
            ConstantPred::null().into_pred_node(),
            ConstantPred::null().into_pred_node(),
        )
    }

    /// The keys as a collation. `None` if a key is not a plain column.
    pub fn collation(&self) -> Option<Collation> {
        collation_from_exprs(&self.exprs())
    }

    pub fn has_collation(&self) -> bool {
        ListPred::from_pred_node(self.exprs()).map_or(false, |keys| !keys.is_empty())
    }

    pub fn offset_expr(&self) -> Option<ArcRelPredNode> {
        non_null(self.offset())
    }

    pub fn fetch_expr(&self) -> Option<ArcRelPredNode> {
        non_null(self.fetch())
    }

    pub fn has_offset_or_fetch(&self) -> bool {
        self.offset_expr().is_some() || self.fetch_expr().is_some()
    }

    /// Orders rows without skipping or truncating.
    pub fn is_sort_only(&self) -> bool {
        self.has_collation() && !self.has_offset_or_fetch()
    }
}

#[derive(Clone, Debug)]
pub struct NativeSort(pub ArcRelPlanNode);

define_plan_node!(
    NativeSort : RelPlanNode,
    NativeSort, [
        { 0, child: ArcRelPlanNode }
    ], [
        { 0, exprs: ArcRelPredNode }
    ]
);
