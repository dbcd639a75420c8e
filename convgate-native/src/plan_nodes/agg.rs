// Copyright (c) 2023-2024 CMU Database Group
//
// Use of this source code is governed by an MIT-style license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use std::collections::BTreeSet;

use itertools::Itertools;

use super::macros::define_plan_node;
use super::{
    derive_traits, dispatch_plan_explain, dispatch_pred_explain, AggCallPred, AggFuncType,
    ArcRelPlanNode, ArcRelPredNode, ColumnRefPred, ConstantPred, ListPred, RelNodeType,
    RelPlanNode, RelReprPlanNode, RelReprPredNode,
};

/// How the grouping sets of an aggregate relate to its group set.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum GroupType {
    /// One grouping set, equal to the group set.
    Simple,
    /// The group set, then the same with its highest key dropped, down to the empty set.
    Rollup,
    /// Every subset of the group set.
    Cube,
    Other,
}

impl GroupType {
    pub fn induce(group_set: &[usize], group_sets: &[Vec<usize>]) -> GroupType {
        let group_set: BTreeSet<usize> = group_set.iter().copied().collect();
        let group_sets: Vec<BTreeSet<usize>> = group_sets
            .iter()
            .map(|set| set.iter().copied().collect())
            .collect();
        if !group_sets.iter().all(|set| set.is_subset(&group_set)) {
            return GroupType::Other;
        }
        if group_sets.len() == 1 && group_sets[0] == group_set {
            return GroupType::Simple;
        }
        if Self::is_rollup(&group_set, &group_sets) {
            return GroupType::Rollup;
        }
        let n = group_set.len();
        if n < usize::BITS as usize
            && group_sets.len() == 1 << n
            && group_sets.iter().all_unique()
        {
            return GroupType::Cube;
        }
        GroupType::Other
    }

    fn is_rollup(group_set: &BTreeSet<usize>, group_sets: &[BTreeSet<usize>]) -> bool {
        if group_sets.len() != group_set.len() + 1 {
            return false;
        }
        let mut expected = group_set.clone();
        for set in group_sets {
            if *set != expected {
                return false;
            }
            expected.pop_last();
        }
        true
    }
}

#[derive(Clone, Debug)]
pub struct LogicalAgg(pub ArcRelPlanNode);

// `group_set` is a list of column refs, `group_sets` a list of such lists,
// `indicator` a bool constant and `agg_calls` a list of AggCall
define_plan_node!(
    LogicalAgg : RelPlanNode,
    Agg, [
        { 0, child: ArcRelPlanNode }
    ], [
        { 0, group_set: ArcRelPredNode },
        { 1, group_sets: ArcRelPredNode },
        { 2, indicator: ArcRelPredNode },
        { 3, agg_calls: ArcRelPredNode }
    ]
);

#[derive(Clone, Debug)]
pub struct NativeAgg(pub ArcRelPlanNode);

define_plan_node!(
    NativeAgg : RelPlanNode,
    NativeAgg, [
        { 0, child: ArcRelPlanNode }
    ], [
        { 0, group_set: ArcRelPredNode },
        { 1, group_sets: ArcRelPredNode },
        { 2, indicator: ArcRelPredNode },
        { 3, agg_calls: ArcRelPredNode }
    ]
);

fn column_list(columns: &[usize]) -> ArcRelPredNode {
    ListPred::new(
        columns
            .iter()
            .map(|idx| ColumnRefPred::new(*idx).into_pred_node())
            .collect(),
    )
    .into_pred_node()
}

fn decode_column_list(pred: ArcRelPredNode) -> Option<Vec<usize>> {
    ListPred::from_pred_node(pred)?
        .to_vec()
        .into_iter()
        .map(|x| ColumnRefPred::from_pred_node(x).map(|col| col.index()))
        .collect()
}

impl LogicalAgg {
    /// A plain GROUP BY: one grouping set equal to the group set.
    pub fn new_simple(
        child: ArcRelPlanNode,
        group_set: Vec<usize>,
        agg_calls: Vec<AggCallPred>,
    ) -> Self {
        let group_sets = vec![group_set.clone()];
        Self::new_with_sets(child, group_set, group_sets, false, agg_calls)
    }

    pub fn new_with_sets(
        child: ArcRelPlanNode,
        group_set: Vec<usize>,
        group_sets: Vec<Vec<usize>>,
        indicator: bool,
        agg_calls: Vec<AggCallPred>,
    ) -> Self {
        Self::new(
            child,
            column_list(&group_set),
            ListPred::new(group_sets.iter().map(|set| column_list(set)).collect()).into_pred_node(),
            ConstantPred::bool(indicator).into_pred_node(),
            ListPred::new(agg_calls.into_iter().map(|x| x.into_pred_node()).collect())
                .into_pred_node(),
        )
    }

    pub fn group_keys(&self) -> Option<Vec<usize>> {
        decode_column_list(self.group_set())
    }

    pub fn grouping_sets(&self) -> Option<Vec<Vec<usize>>> {
        ListPred::from_pred_node(self.group_sets())?
            .to_vec()
            .into_iter()
            .map(decode_column_list)
            .collect()
    }

    pub fn agg_call_list(&self) -> Option<Vec<AggCallPred>> {
        ListPred::from_pred_node(self.agg_calls())?
            .to_vec()
            .into_iter()
            .map(AggCallPred::from_pred_node)
            .collect()
    }

    /// `Other` when the group payload is malformed.
    pub fn group_type(&self) -> GroupType {
        match (self.group_keys(), self.grouping_sets()) {
            (Some(group_set), Some(group_sets)) => GroupType::induce(&group_set, &group_sets),
            _ => GroupType::Other,
        }
    }

    /// The shape planned for a scalar subquery that must produce at most one row per key:
    /// `SINGLE_VALUE` over one non-key column, grouped by a non-empty key.
    pub fn is_single_value_check(&self) -> bool {
        let (Some(group_set), Some(calls)) = (self.group_keys(), self.agg_call_list()) else {
            return false;
        };
        if group_set.is_empty() || calls.len() != 1 {
            return false;
        }
        let call = &calls[0];
        if call.func() != AggFuncType::SingleValue || call.is_distinct() {
            return false;
        }
        match call.arg_columns().as_deref() {
            Some([arg]) => !group_set.contains(arg),
            _ => false,
        }
    }
}
