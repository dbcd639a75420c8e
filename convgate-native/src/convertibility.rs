// Copyright (c) 2023-2024 CMU Database Group
//
// Use of this source code is governed by an MIT-style license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Decides, per operator, whether a logical node can be expressed in the native convention. Every
//! check inspects only the node itself and the capability facts; children are converted (or not)
//! by the rules.

use std::sync::Arc;

use crate::{
    capabilities::{CapabilityOracle, StaticCapabilities},
    config::NativeRuleConfig,
    plan_nodes::{
        ArcRelPredNode, GroupType, LogicalAgg, LogicalFilter, LogicalJoin, LogicalProjection,
        LogicalSort, LogicalUnion,
    },
};

#[derive(Clone)]
pub struct ConvertibilityOracle {
    capabilities: Arc<dyn CapabilityOracle>,
    config: NativeRuleConfig,
}

impl ConvertibilityOracle {
    pub fn new(capabilities: Arc<dyn CapabilityOracle>, config: NativeRuleConfig) -> Self {
        Self {
            capabilities,
            config,
        }
    }

    /// Uses the static capabilities described by `config`.
    pub fn from_config(config: &NativeRuleConfig) -> Self {
        Self::new(
            Arc::new(StaticCapabilities::new(&config.capabilities)),
            config.clone(),
        )
    }

    pub fn capabilities(&self) -> &Arc<dyn CapabilityOracle> {
        &self.capabilities
    }

    pub fn config(&self) -> &NativeRuleConfig {
        &self.config
    }

    /// The row count `fetch` folds to. Negative or non-integer results are not a row count.
    pub fn static_fetch(&self, fetch: &ArcRelPredNode) -> Option<u64> {
        self.capabilities
            .evaluate_static_constant(fetch)
            .and_then(|value| value.to_u64())
    }

    pub fn is_sort_convertible(&self, sort: &LogicalSort) -> bool {
        if sort.offset_expr().is_some() {
            return false;
        }
        if let Some(fetch) = sort.fetch_expr() {
            if self.static_fetch(&fetch).is_none() {
                return false;
            }
        }
        sort.collation().is_some()
    }

    pub fn is_filter_convertible(&self, filter: &LogicalFilter) -> bool {
        self.capabilities.is_expression_supported(&filter.cond())
    }

    pub fn is_project_convertible(&self, projection: &LogicalProjection) -> bool {
        projection.expr_list().map_or(false, |exprs| {
            exprs
                .iter()
                .all(|expr| self.capabilities.is_expression_supported(expr))
        })
    }

    pub fn is_aggregate_convertible(&self, agg: &LogicalAgg) -> bool {
        if agg.is_single_value_check() {
            return true;
        }
        let (Some(group_sets), Some(calls)) = (agg.grouping_sets(), agg.agg_call_list()) else {
            return false;
        };
        if group_sets.len() > 1 || agg.group_type() != GroupType::Simple {
            return false;
        }
        calls.iter().all(|call| {
            !call.is_distinct()
                && call.arg_columns().is_some()
                && self.capabilities.is_aggregate_function_supported(call.func())
        })
    }

    /// Only the condition is checked. Whether the inputs convert is left to the rule.
    pub fn is_join_convertible(&self, join: &LogicalJoin) -> bool {
        self.capabilities.is_expression_supported(&join.cond())
    }

    pub fn is_union_convertible(&self, _union: &LogicalUnion) -> bool {
        self.config.enable_union
    }
}

impl std::fmt::Debug for ConvertibilityOracle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConvertibilityOracle")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use convgate_core::trait_set::{Collation, FieldCollation, SortDirection};
    use test_case::test_case;

    use super::*;
    use crate::{
        plan_nodes::{
            sort_exprs, AggCallPred, AggFuncType, BinOpPred, BinOpType, ConstantPred,
            DynamicParamPred, JoinType, ListPred, RelPredNode, RelPredType, RelReprPredNode,
            ScalarFunction, SortOrderPred, SortOrderType,
        },
        testing::{col, col_eq, scan, udf_call, TestCapabilities},
    };

    fn oracle() -> ConvertibilityOracle {
        ConvertibilityOracle::from_config(&NativeRuleConfig::default())
    }

    fn sort(offset: ArcRelPredNode, fetch: ArcRelPredNode) -> LogicalSort {
        LogicalSort::new(
            scan("t1"),
            sort_exprs(&Collation(vec![FieldCollation::new(0, SortDirection::Asc)])),
            offset,
            fetch,
        )
    }

    fn null() -> ArcRelPredNode {
        ConstantPred::null().into_pred_node()
    }

    fn param() -> ArcRelPredNode {
        DynamicParamPred::new(0).into_pred_node()
    }

    #[test_case(null(), null(), true ; "order only")]
    #[test_case(ConstantPred::uint64(5).into_pred_node(), null(), false ; "constant offset")]
    #[test_case(param(), null(), false ; "dynamic offset")]
    #[test_case(ConstantPred::uint64(0).into_pred_node(), ConstantPred::uint64(10).into_pred_node(), false ; "offset with fetch")]
    #[test_case(null(), ConstantPred::uint64(10).into_pred_node(), true ; "constant fetch")]
    #[test_case(null(), ConstantPred::int32(0).into_pred_node(), true ; "zero fetch")]
    #[test_case(null(), BinOpPred::new(ConstantPred::int64(2).into_pred_node(), ConstantPred::int64(5).into_pred_node(), BinOpType::Mul).into_pred_node(), true ; "folded fetch")]
    #[test_case(null(), param(), false ; "dynamic fetch")]
    #[test_case(null(), ConstantPred::int64(-1).into_pred_node(), false ; "negative fetch")]
    #[test_case(null(), ConstantPred::string("10").into_pred_node(), false ; "string fetch")]
    #[test_case(null(), ConstantPred::float64(10.0).into_pred_node(), false ; "float fetch")]
    fn sort_convertibility(offset: ArcRelPredNode, fetch: ArcRelPredNode, expected: bool) {
        assert_eq!(oracle().is_sort_convertible(&sort(offset, fetch)), expected);
    }

    #[test]
    fn sort_key_must_be_column() {
        let key = SortOrderPred::new(SortOrderType::Asc, ConstantPred::int64(1).into_pred_node());
        let sort = LogicalSort::new(
            scan("t1"),
            ListPred::new(vec![key.into_pred_node()]).into_pred_node(),
            null(),
            null(),
        );
        assert!(!oracle().is_sort_convertible(&sort));
    }

    fn malformed(typ: RelPredType, children: Vec<ArcRelPredNode>) -> ArcRelPredNode {
        RelPredNode {
            typ,
            children,
            data: None,
        }
        .into()
    }

    #[test]
    fn malformed_payload_is_not_convertible() {
        let oracle = oracle();
        // A cast that lost its target type.
        let fetch = malformed(RelPredType::Cast, vec![ConstantPred::int64(10).into_pred_node()]);
        assert!(!oracle.is_sort_convertible(&sort(null(), fetch)));

        let keys = |key| {
            LogicalSort::new(scan("t1"), ListPred::new(vec![key]).into_pred_node(), null(), null())
        };
        let keyless = malformed(RelPredType::SortOrder(SortOrderType::Asc), vec![]);
        assert!(!oracle.is_sort_convertible(&keys(keyless)));
        let unindexed = malformed(
            RelPredType::SortOrder(SortOrderType::Desc),
            vec![malformed(RelPredType::ColumnRef, vec![])],
        );
        assert!(!oracle.is_sort_convertible(&keys(unindexed)));
    }

    #[test]
    fn filter_follows_expression_support() {
        let oracle = oracle();
        assert!(oracle.is_filter_convertible(&LogicalFilter::new(scan("t1"), col_eq(0, 1))));
        let unsupported = BinOpPred::new(
            udf_call(ScalarFunction::RegexpMatch, vec![col(0)]),
            ConstantPred::bool(true).into_pred_node(),
            BinOpType::Eq,
        );
        let filter = LogicalFilter::new(scan("t1"), unsupported.into_pred_node());
        assert!(!oracle.is_filter_convertible(&filter));
    }

    #[test]
    fn project_needs_every_expression() {
        let oracle = oracle();
        let project = |exprs| {
            LogicalProjection::new(scan("t1"), ListPred::new(exprs).into_pred_node(), null())
        };
        let upper = udf_call(ScalarFunction::Upper, vec![col(1)]);
        assert!(oracle.is_project_convertible(&project(vec![col(0), upper])));
        let random = udf_call(ScalarFunction::Random, vec![]);
        assert!(!oracle.is_project_convertible(&project(vec![col(0), random])));
        assert!(oracle.is_project_convertible(&project(vec![])));
    }

    fn agg_with(group_sets: Vec<Vec<usize>>, calls: Vec<AggCallPred>) -> LogicalAgg {
        LogicalAgg::new_with_sets(scan("t1"), vec![0, 1], group_sets, false, calls)
    }

    #[test]
    fn aggregate_convertibility() {
        let oracle = oracle();
        let count = || AggCallPred::new(AggFuncType::Count, false, vec![2]);
        assert!(oracle.is_aggregate_convertible(&agg_with(vec![vec![0, 1]], vec![count()])));
        assert!(oracle.is_aggregate_convertible(&agg_with(vec![vec![0, 1]], vec![])));
        // Rollup.
        let rollup = agg_with(vec![vec![0, 1], vec![0], vec![]], vec![count()]);
        assert!(!oracle.is_aggregate_convertible(&rollup));
        // One grouping set, but not the group set.
        assert!(!oracle.is_aggregate_convertible(&agg_with(vec![vec![0]], vec![count()])));
        assert!(!oracle.is_aggregate_convertible(&agg_with(
            vec![vec![0, 1]],
            vec![count(), AggCallPred::new(AggFuncType::Sum, true, vec![2])],
        )));
        assert!(!oracle.is_aggregate_convertible(&agg_with(
            vec![vec![0, 1]],
            vec![AggCallPred::new(AggFuncType::Listagg, false, vec![2])],
        )));
    }

    #[test]
    fn single_value_check_bypasses_capabilities() {
        let oracle = ConvertibilityOracle::new(
            Arc::new(TestCapabilities::supporting_nothing()),
            NativeRuleConfig::default(),
        );
        let check = LogicalAgg::new_simple(
            scan("t1"),
            vec![0],
            vec![AggCallPred::new(AggFuncType::SingleValue, false, vec![1])],
        );
        assert!(oracle.is_aggregate_convertible(&check));
        let single_value = || vec![AggCallPred::new(AggFuncType::SingleValue, false, vec![2])];
        let rollup = agg_with(vec![vec![0, 1], vec![0], vec![]], single_value());
        assert_eq!(rollup.group_type(), GroupType::Rollup);
        assert!(oracle.is_aggregate_convertible(&rollup));
        let repeated = agg_with(vec![vec![0, 1], vec![0, 1]], single_value());
        assert_eq!(repeated.group_type(), GroupType::Other);
        assert!(oracle.is_aggregate_convertible(&repeated));
        let count = LogicalAgg::new_simple(
            scan("t1"),
            vec![0],
            vec![AggCallPred::new(AggFuncType::Count, false, vec![1])],
        );
        assert!(!oracle.is_aggregate_convertible(&count));
    }

    #[test]
    fn join_checks_only_condition() {
        let oracle = oracle();
        let join = |cond| {
            let stopped = ListPred::new(vec![]).into_pred_node();
            LogicalJoin::new(scan("t1"), scan("t2"), cond, stopped, JoinType::Inner)
        };
        assert!(oracle.is_join_convertible(&join(col_eq(0, 3))));
        assert!(!oracle.is_join_convertible(&join(udf_call(ScalarFunction::Random, vec![]))));
    }

    #[test]
    fn union_needs_flag() {
        let union = LogicalUnion::new(vec![scan("t1"), scan("t2")], true);
        assert!(!oracle().is_union_convertible(&union));
        let enabled = ConvertibilityOracle::from_config(&NativeRuleConfig {
            enable_union: true,
            ..Default::default()
        });
        assert!(enabled.is_union_convertible(&union));
    }
}
