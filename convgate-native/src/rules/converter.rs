// Copyright (c) 2023-2024 CMU Database Group
//
// Use of this source code is governed by an MIT-style license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use std::sync::Arc;

use convgate_core::{
    optimizer::Optimizer,
    rules::{Rule, RuleMatcher},
    trait_set::Convention,
};
use strum::{Display, EnumIter};
use tracing::debug;

use crate::{
    convertibility::ConvertibilityOracle,
    plan_nodes::{
        ArcRelPlanNode, ConstantPred, JoinType, LogicalAgg, LogicalFilter, LogicalJoin,
        LogicalProjection, LogicalSort, LogicalUnion, NativeAgg, NativeFilter, NativeJoin,
        NativeLimit, NativeProjection, NativeSort, NativeUnion, RelNodeType, RelReprPlanNode,
        RelReprPredNode, NATIVE,
    },
};

/// The operators that have a native counterpart. A logical sort is served by two rules: one for
/// plain ordering, one for sorts that also skip or truncate.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Display, EnumIter)]
#[strum(serialize_all = "snake_case")]
pub enum ConverterKind {
    Sort,
    Limit,
    Filter,
    Project,
    Aggregate,
    Union,
    Join,
}

impl ConverterKind {
    /// The logical operator this kind converts. Join matches every join type.
    pub fn logical_type(&self) -> RelNodeType {
        match self {
            Self::Sort | Self::Limit => RelNodeType::Sort,
            Self::Filter => RelNodeType::Filter,
            Self::Project => RelNodeType::Projection,
            Self::Aggregate => RelNodeType::Agg,
            Self::Union => RelNodeType::Union,
            Self::Join => RelNodeType::Join(JoinType::Inner),
        }
    }

    pub fn rule_name(&self) -> &'static str {
        match self {
            Self::Sort => "native_sort",
            Self::Limit => "native_limit",
            Self::Filter => "native_filter",
            Self::Project => "native_project",
            Self::Aggregate => "native_aggregate",
            Self::Union => "native_union",
            Self::Join => "native_join",
        }
    }
}

/// Converts one kind of logical operator into its native counterpart.
pub struct ConverterRule {
    kind: ConverterKind,
    matcher: RuleMatcher<RelNodeType>,
    oracle: Arc<ConvertibilityOracle>,
}

impl ConverterRule {
    pub fn new(kind: ConverterKind, oracle: Arc<ConvertibilityOracle>) -> Self {
        Self {
            kind,
            matcher: RuleMatcher::MatchDiscriminant {
                typ_discriminant: std::mem::discriminant(&kind.logical_type()),
            },
            oracle,
        }
    }

    pub fn kind(&self) -> ConverterKind {
        self.kind
    }

    /// Whether this rule can convert `node` right now.
    pub fn is_applicable(&self, node: &ArcRelPlanNode) -> bool {
        let oracle = &self.oracle;
        match self.kind {
            ConverterKind::Sort => LogicalSort::from_plan_node(node.clone())
                .map_or(false, |x| x.is_sort_only() && oracle.is_sort_convertible(&x)),
            ConverterKind::Limit => LogicalSort::from_plan_node(node.clone())
                .map_or(false, |x| x.has_offset_or_fetch() && oracle.is_sort_convertible(&x)),
            ConverterKind::Filter => LogicalFilter::from_plan_node(node.clone())
                .map_or(false, |x| oracle.is_filter_convertible(&x)),
            ConverterKind::Project => LogicalProjection::from_plan_node(node.clone())
                .map_or(false, |x| oracle.is_project_convertible(&x)),
            ConverterKind::Aggregate => LogicalAgg::from_plan_node(node.clone())
                .map_or(false, |x| oracle.is_aggregate_convertible(&x)),
            ConverterKind::Union => LogicalUnion::from_plan_node(node.clone())
                .map_or(false, |x| oracle.is_union_convertible(&x)),
            ConverterKind::Join => LogicalJoin::from_plan_node(node.clone())
                .map_or(false, |x| oracle.is_join_convertible(&x)),
        }
    }

    fn convert_input<O: Optimizer<RelNodeType>>(
        &self,
        optimizer: &O,
        input: ArcRelPlanNode,
    ) -> Option<ArcRelPlanNode> {
        let required = input.traits.replace(NATIVE);
        let typ = input.typ;
        let converted = optimizer.convert(input, &required);
        if converted.is_none() {
            debug!(event = "input_declined", rule = self.kind.rule_name(), input = %typ);
        }
        converted
    }

    fn convert_sort<O: Optimizer<RelNodeType>>(
        &self,
        optimizer: &O,
        sort: LogicalSort,
    ) -> Option<ArcRelPlanNode> {
        let input = self.convert_input(optimizer, sort.child())?;
        Some(NativeSort::new(input, sort.exprs()).into_plan_node())
    }

    // Ordering is applied below the limit: sort, then skip and truncate.
    fn convert_limit<O: Optimizer<RelNodeType>>(
        &self,
        optimizer: &O,
        sort: LogicalSort,
    ) -> Option<ArcRelPlanNode> {
        let fetch = match sort.fetch_expr() {
            Some(fetch) => ConstantPred::uint64(self.oracle.static_fetch(&fetch)?),
            None => ConstantPred::null(),
        };
        let mut input = self.convert_input(optimizer, sort.child())?;
        if sort.has_collation() {
            input = NativeSort::new(input, sort.exprs()).into_plan_node();
        }
        Some(NativeLimit::new(input, sort.offset(), fetch.into_pred_node()).into_plan_node())
    }

    fn convert_filter<O: Optimizer<RelNodeType>>(
        &self,
        optimizer: &O,
        filter: LogicalFilter,
    ) -> Option<ArcRelPlanNode> {
        let input = self.convert_input(optimizer, filter.child())?;
        Some(NativeFilter::new(input, filter.cond()).into_plan_node())
    }

    fn convert_project<O: Optimizer<RelNodeType>>(
        &self,
        optimizer: &O,
        projection: LogicalProjection,
    ) -> Option<ArcRelPlanNode> {
        let input = self.convert_input(optimizer, projection.child())?;
        Some(NativeProjection::new(input, projection.exprs(), projection.schema()).into_plan_node())
    }

    fn convert_aggregate<O: Optimizer<RelNodeType>>(
        &self,
        optimizer: &O,
        agg: LogicalAgg,
    ) -> Option<ArcRelPlanNode> {
        let input = self.convert_input(optimizer, agg.child())?;
        Some(
            NativeAgg::new(
                input,
                agg.group_set(),
                agg.group_sets(),
                agg.indicator(),
                agg.agg_calls(),
            )
            .into_plan_node(),
        )
    }

    fn convert_union<O: Optimizer<RelNodeType>>(
        &self,
        optimizer: &O,
        union: LogicalUnion,
    ) -> Option<ArcRelPlanNode> {
        let inputs = union
            .inputs()
            .into_iter()
            .map(|input| self.convert_input(optimizer, input))
            .collect::<Option<Vec<_>>>()?;
        Some(NativeUnion::new(inputs, union.all()).into_plan_node())
    }

    // Either side declining declines the whole join; the driver then keeps the logical join.
    fn convert_join<O: Optimizer<RelNodeType>>(
        &self,
        optimizer: &O,
        join: LogicalJoin,
    ) -> Option<ArcRelPlanNode> {
        let left = self.convert_input(optimizer, join.left())?;
        let right = self.convert_input(optimizer, join.right())?;
        Some(
            NativeJoin::new(
                left,
                right,
                join.cond(),
                join.variables_stopped(),
                join.join_type(),
            )
            .into_plan_node(),
        )
    }
}

impl<O: Optimizer<RelNodeType>> Rule<RelNodeType, O> for ConverterRule {
    fn matcher(&self) -> &RuleMatcher<RelNodeType> {
        &self.matcher
    }

    fn in_convention(&self) -> Convention {
        Convention::NONE
    }

    fn out_convention(&self) -> Convention {
        NATIVE
    }

    fn guard(&self, node: &ArcRelPlanNode) -> bool {
        self.is_applicable(node)
    }

    fn apply(&self, optimizer: &O, node: ArcRelPlanNode) -> Option<ArcRelPlanNode> {
        // The node may differ from the one the guard saw.
        if !self.is_applicable(&node) {
            return None;
        }
        match self.kind {
            ConverterKind::Sort => self.convert_sort(optimizer, LogicalSort::from_plan_node(node)?),
            ConverterKind::Limit => {
                self.convert_limit(optimizer, LogicalSort::from_plan_node(node)?)
            }
            ConverterKind::Filter => {
                self.convert_filter(optimizer, LogicalFilter::from_plan_node(node)?)
            }
            ConverterKind::Project => {
                self.convert_project(optimizer, LogicalProjection::from_plan_node(node)?)
            }
            ConverterKind::Aggregate => {
                self.convert_aggregate(optimizer, LogicalAgg::from_plan_node(node)?)
            }
            ConverterKind::Union => {
                self.convert_union(optimizer, LogicalUnion::from_plan_node(node)?)
            }
            ConverterKind::Join => self.convert_join(optimizer, LogicalJoin::from_plan_node(node)?),
        }
    }

    fn name(&self) -> &'static str {
        self.kind.rule_name()
    }
}

#[cfg(test)]
mod tests {
    use convgate_core::trait_set::{Collation, FieldCollation, SortDirection, TraitSet};
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{
        config::NativeRuleConfig,
        plan_nodes::{
            explain_plan, sort_exprs, AggCallPred, AggFuncType, CorrelationIdPred,
            DynamicParamPred, ListPred, ScalarFunction,
        },
        schema::{Field, Schema},
        testing::{col, col_eq, native_scan, native_test_converter, scan, udf_call},
    };

    fn to_native(node: ArcRelPlanNode) -> Option<ArcRelPlanNode> {
        let converter = native_test_converter(&NativeRuleConfig::default());
        converter.convert(node.clone(), &node.traits.replace(NATIVE))
    }

    fn col_a_asc() -> Collation {
        Collation(vec![FieldCollation::new(0, SortDirection::Asc)])
    }

    #[test]
    fn sort_with_fetch_becomes_limit_over_sort() {
        let child = native_scan("t1");
        let sort = LogicalSort::new(
            child.clone(),
            sort_exprs(&col_a_asc()),
            ConstantPred::null().into_pred_node(),
            ConstantPred::int32(10).into_pred_node(),
        );
        let converted = to_native(sort.into_plan_node()).unwrap();

        let limit = NativeLimit::from_plan_node(converted).unwrap();
        assert_eq!(limit.fetch_count(), Some(10));
        assert!(limit.offset_expr().is_none());
        let native_sort = NativeSort::from_plan_node(limit.child()).unwrap();
        assert_eq!(native_sort.0.traits.collation, col_a_asc());
        assert_eq!(native_sort.child(), child);
        // The limit keeps the order produced below it.
        assert_eq!(limit.0.traits, TraitSet::new(NATIVE, col_a_asc()));
    }

    #[test]
    fn fetch_without_order_is_a_bare_limit() {
        let sort = LogicalSort::new(
            native_scan("t1"),
            ListPred::new(vec![]).into_pred_node(),
            ConstantPred::null().into_pred_node(),
            ConstantPred::uint64(3).into_pred_node(),
        );
        let converted = to_native(sort.into_plan_node()).unwrap();
        let limit = NativeLimit::from_plan_node(converted).unwrap();
        assert_eq!(limit.child().typ, RelNodeType::NativeScan);
        assert_eq!(limit.fetch_count(), Some(3));
    }

    #[test]
    fn order_only_sort() {
        let sort = LogicalSort::new_ordered(native_scan("t1"), &col_a_asc());
        let converted = to_native(sort.clone().into_plan_node()).unwrap();
        let native_sort = NativeSort::from_plan_node(converted).unwrap();
        assert_eq!(native_sort.exprs(), sort.exprs());
    }

    #[test]
    fn sort_rules_split_by_shape() {
        let oracle = Arc::new(ConvertibilityOracle::from_config(&NativeRuleConfig::default()));
        let sort_rule = ConverterRule::new(ConverterKind::Sort, oracle.clone());
        let limit_rule = ConverterRule::new(ConverterKind::Limit, oracle);
        let ordered = LogicalSort::new_ordered(scan("t1"), &col_a_asc()).into_plan_node();
        let limited = LogicalSort::new(
            scan("t1"),
            sort_exprs(&col_a_asc()),
            ConstantPred::null().into_pred_node(),
            ConstantPred::uint64(1).into_pred_node(),
        )
        .into_plan_node();
        let dynamic = LogicalSort::new(
            scan("t1"),
            sort_exprs(&col_a_asc()),
            ConstantPred::null().into_pred_node(),
            DynamicParamPred::new(0).into_pred_node(),
        )
        .into_plan_node();
        assert!(sort_rule.is_applicable(&ordered));
        assert!(!limit_rule.is_applicable(&ordered));
        assert!(!sort_rule.is_applicable(&limited));
        assert!(limit_rule.is_applicable(&limited));
        assert!(!sort_rule.is_applicable(&dynamic));
        assert!(!limit_rule.is_applicable(&dynamic));
    }

    #[test]
    fn filter_keeps_condition() {
        let cond = col_eq(0, 42);
        let filter = LogicalFilter::new(native_scan("t1"), cond.clone());
        let converted = to_native(filter.into_plan_node()).unwrap();
        let native_filter = NativeFilter::from_plan_node(converted).unwrap();
        assert_eq!(native_filter.cond(), cond);
    }

    #[test]
    fn unsupported_filter_stays_logical() {
        let cond = udf_call(ScalarFunction::RegexpMatch, vec![col(1)]);
        let filter = LogicalFilter::new(native_scan("t1"), cond);
        assert!(to_native(filter.into_plan_node()).is_none());
    }

    #[test]
    fn project_keeps_expressions_and_schema() {
        let schema = Schema::new(vec![
            Field::new("a", arrow_schema::DataType::Int64, false),
            Field::new("b", arrow_schema::DataType::Utf8, true),
        ]);
        let projection = LogicalProjection::new_with_schema(
            native_scan("t1"),
            vec![col(0), udf_call(ScalarFunction::Upper, vec![col(2)])],
            &schema,
        );
        let converted = to_native(projection.clone().into_plan_node()).unwrap();
        let native = NativeProjection::from_plan_node(converted).unwrap();
        assert_eq!(native.exprs(), projection.exprs());
        assert_eq!(native.output_schema(), Some(schema));
    }

    #[test]
    fn aggregate_keeps_payload() {
        let agg = LogicalAgg::new_simple(
            native_scan("t1"),
            vec![0],
            vec![
                AggCallPred::new(AggFuncType::Count, false, vec![1]),
                AggCallPred::new(AggFuncType::Max, false, vec![2]),
            ],
        );
        let converted = to_native(agg.clone().into_plan_node()).unwrap();
        let native = NativeAgg::from_plan_node(converted).unwrap();
        assert_eq!(native.0.predicates, agg.0.predicates);
    }

    #[test]
    fn union_declines_while_disabled() {
        let union = LogicalUnion::new(vec![native_scan("t1"), native_scan("t2")], true);
        assert!(to_native(union.into_plan_node()).is_none());
    }

    #[test]
    fn union_converts_every_input_when_enabled() {
        let converter = native_test_converter(&NativeRuleConfig {
            enable_union: true,
            ..Default::default()
        });
        let filter = LogicalFilter::new(native_scan("t2"), col_eq(0, 1)).into_plan_node();
        let union = LogicalUnion::new(vec![native_scan("t1"), filter], false).into_plan_node();
        let converted = converter
            .convert(union.clone(), &union.traits.replace(NATIVE))
            .unwrap();
        let native = NativeUnion::from_plan_node(converted).unwrap();
        assert!(!native.all());
        assert_eq!(native.inputs()[1].typ, RelNodeType::NativeFilter);
    }

    #[test]
    fn join_keeps_type_and_condition() {
        let cond = col_eq(0, 2);
        let stopped = ListPred::new(vec![]).into_pred_node();
        let join = LogicalJoin::new(
            native_scan("t1"),
            LogicalFilter::new(native_scan("t2"), col_eq(1, 5)).into_plan_node(),
            cond.clone(),
            stopped.clone(),
            JoinType::LeftSemi,
        );
        let converted = to_native(join.into_plan_node()).unwrap();
        let native = NativeJoin::from_plan_node(converted).unwrap();
        assert_eq!(native.join_type(), JoinType::LeftSemi);
        assert_eq!(native.cond(), cond);
        assert_eq!(native.variables_stopped(), stopped);
        assert!(native.0.is_fully_in(NATIVE));
    }

    #[test]
    fn join_keeps_stopped_variables() {
        let stopped = ListPred::new(vec![
            CorrelationIdPred::new(0).into_pred_node(),
            CorrelationIdPred::new(3).into_pred_node(),
        ])
        .into_pred_node();
        let join = LogicalJoin::new(
            native_scan("t1"),
            native_scan("t2"),
            col_eq(0, 2),
            stopped.clone(),
            JoinType::Inner,
        );
        let converted = to_native(join.into_plan_node()).unwrap();
        let native = NativeJoin::from_plan_node(converted).unwrap();
        assert_eq!(native.variables_stopped(), stopped);
        let ids = ListPred::from_pred_node(native.variables_stopped())
            .unwrap()
            .to_vec()
            .into_iter()
            .map(|x| CorrelationIdPred::from_pred_node(x).unwrap().id())
            .collect::<Vec<_>>();
        assert_eq!(ids, vec![0, 3]);
        assert!(native.explain_to_string().contains("$cor3"));
    }

    #[test]
    fn join_declines_with_unconvertible_side() {
        let right = LogicalFilter::new(
            native_scan("t2"),
            udf_call(ScalarFunction::Random, vec![]),
        );
        let join = LogicalJoin::new(
            native_scan("t1"),
            right.into_plan_node(),
            col_eq(0, 2),
            ListPred::new(vec![]).into_pred_node(),
            JoinType::Inner,
        );
        let oracle = Arc::new(ConvertibilityOracle::from_config(&NativeRuleConfig::default()));
        let rule = ConverterRule::new(ConverterKind::Join, oracle);
        // The guard looks at the condition only.
        assert!(rule.is_applicable(&join.0));
        assert!(to_native(join.into_plan_node()).is_none());
    }

    #[test]
    fn apply_rechecks_guard() {
        let oracle = Arc::new(ConvertibilityOracle::from_config(&NativeRuleConfig::default()));
        let rule = ConverterRule::new(ConverterKind::Filter, oracle);
        let converter = native_test_converter(&NativeRuleConfig::default());
        let filter =
            LogicalFilter::new(native_scan("t1"), udf_call(ScalarFunction::Random, vec![]));
        assert!(Rule::apply(&rule, &converter, filter.into_plan_node()).is_none());
        // A node of another kind is simply not converted.
        let sort = LogicalSort::new_ordered(native_scan("t1"), &col_a_asc());
        assert!(Rule::apply(&rule, &converter, sort.into_plan_node()).is_none());
    }

    #[test]
    fn conversion_is_deterministic() {
        let plan = LogicalFilter::new(
            LogicalSort::new_ordered(native_scan("t1"), &col_a_asc()).into_plan_node(),
            col_eq(0, 1),
        )
        .into_plan_node();
        let first = to_native(plan.clone()).unwrap();
        let second = to_native(plan.clone()).unwrap();
        assert_eq!(first, second);
        assert_eq!(explain_plan(first), explain_plan(second));
        // The input is left untouched.
        assert_eq!(plan.typ, RelNodeType::Filter);
        assert_eq!(plan.child(0).typ, RelNodeType::Sort);
    }
}
