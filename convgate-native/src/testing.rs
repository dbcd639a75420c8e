// Copyright (c) 2023-2024 CMU Database Group
//
// Use of this source code is governed by an MIT-style license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Plan builders and a test capability oracle.

use std::collections::HashSet;

use convgate_core::nodes::Value;

use crate::{
    capabilities::CapabilityOracle,
    config::NativeRuleConfig,
    new_native_converter,
    plan_nodes::{
        AggFuncType, ArcRelPlanNode, ArcRelPredNode, BinOpPred, BinOpType, ColumnRefPred,
        ConstantPred, FuncPred, FuncType, ListPred, LogicalScan, NativeScan, RelReprPlanNode,
        RelReprPredNode, ScalarFunction,
    },
    NativeConverter,
};

pub fn scan(table: &str) -> ArcRelPlanNode {
    LogicalScan::new_table(table).into_plan_node()
}

/// Tables are read by the native backend directly.
pub fn native_scan(table: &str) -> ArcRelPlanNode {
    NativeScan::new_table(table).into_plan_node()
}

pub fn col(idx: usize) -> ArcRelPredNode {
    ColumnRefPred::new(idx).into_pred_node()
}

/// `#idx = value`
pub fn col_eq(idx: usize, value: i64) -> ArcRelPredNode {
    BinOpPred::new(col(idx), ConstantPred::int64(value).into_pred_node(), BinOpType::Eq)
        .into_pred_node()
}

pub fn udf_call(func: ScalarFunction, args: Vec<ArcRelPredNode>) -> ArcRelPredNode {
    FuncPred::new(FuncType::Scalar(func), ListPred::new(args)).into_pred_node()
}

pub fn native_test_converter(config: &NativeRuleConfig) -> NativeConverter {
    new_native_converter(config)
}

/// Supports exactly what it is told to and folds nothing.
pub struct TestCapabilities {
    expressions: bool,
    aggregates: HashSet<AggFuncType>,
}

impl TestCapabilities {
    pub fn supporting_nothing() -> Self {
        Self {
            expressions: false,
            aggregates: HashSet::new(),
        }
    }
}

impl CapabilityOracle for TestCapabilities {
    fn is_expression_supported(&self, _expr: &ArcRelPredNode) -> bool {
        self.expressions
    }

    fn is_aggregate_function_supported(&self, func: AggFuncType) -> bool {
        self.aggregates.contains(&func)
    }

    fn evaluate_static_constant(&self, _expr: &ArcRelPredNode) -> Option<Value> {
        None
    }
}
