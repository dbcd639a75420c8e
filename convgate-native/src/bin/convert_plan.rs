// Copyright (c) 2023-2024 CMU Database Group
//
// Use of this source code is governed by an MIT-style license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use anyhow::Result;
use arrow_schema::DataType;
use convgate_core::{
    optimizer::Optimizer,
    trait_set::{Collation, Convention, FieldCollation, SortDirection, TraitSet},
};
use convgate_native::{
    config::NativeRuleConfig,
    new_native_converter,
    plan_nodes::{
        explain_plan, sort_exprs, AggCallPred, AggFuncType, BinOpPred, BinOpType, ColumnRefPred,
        ConstantPred, FuncPred, FuncType, JoinType, ListPred, LogicalAgg, LogicalFilter,
        LogicalJoin, LogicalProjection, LogicalSort, NativeScan, RelReprPlanNode, RelReprPredNode,
        ScalarFunction,
    },
    schema::{Field, Schema},
};
use tracing::Level;

/// Usage: `convert_plan [LEVEL]`, where LEVEL is a tracing level (default `trace`).
pub fn main() -> Result<()> {
    let level = match std::env::args().nth(1) {
        Some(level) => level.parse::<Level>()?,
        None => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_ansi(false)
        .with_target(false)
        .init();

    // The plan: sort(agg(project(filter(t1) join t2))) limit 10
    let scan1 = NativeScan::new_table("t1");
    let filter_cond = BinOpPred::new(
        ColumnRefPred::new(1).into_pred_node(),
        ConstantPred::int64(2).into_pred_node(),
        BinOpType::Gt,
    );
    let filter1 = LogicalFilter::new(scan1.into_plan_node(), filter_cond.into_pred_node());
    let scan2 = NativeScan::new_table("t2");
    let join_cond = BinOpPred::new(
        ColumnRefPred::new(0).into_pred_node(),
        ColumnRefPred::new(3).into_pred_node(),
        BinOpType::Eq,
    );
    let join = LogicalJoin::new(
        filter1.into_plan_node(),
        scan2.into_plan_node(),
        join_cond.into_pred_node(),
        ListPred::new(vec![]).into_pred_node(),
        JoinType::Inner,
    );
    let upper = FuncPred::new(
        FuncType::Scalar(ScalarFunction::Upper),
        ListPred::new(vec![ColumnRefPred::new(4).into_pred_node()]),
    );
    let projection = LogicalProjection::new_with_schema(
        join.into_plan_node(),
        vec![ColumnRefPred::new(0).into_pred_node(), upper.into_pred_node()],
        &Schema::new(vec![
            Field::new("id", DataType::Int64, false),
            Field::new("name", DataType::Utf8, true),
        ]),
    );
    let agg = LogicalAgg::new_simple(
        projection.into_plan_node(),
        vec![1],
        vec![AggCallPred::new(AggFuncType::Count, false, vec![0])],
    );
    let collation = Collation(vec![FieldCollation::new(1, SortDirection::Desc)]);
    let sort = LogicalSort::new(
        agg.into_plan_node(),
        sort_exprs(&collation),
        ConstantPred::null().into_pred_node(),
        ConstantPred::uint64(10).into_pred_node(),
    );

    let plan = sort.into_plan_node();
    println!("{}", explain_plan(plan.clone()));

    let mut converter = new_native_converter(&NativeRuleConfig::default());
    let node = converter.optimize(plan, &TraitSet::new(Convention::ENUMERABLE, collation))?;
    println!("{}", explain_plan(node));
    Ok(())
}
