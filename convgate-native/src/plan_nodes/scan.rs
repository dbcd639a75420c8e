// Copyright (c) 2023-2024 CMU Database Group
//
// Use of this source code is governed by an MIT-style license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use std::sync::Arc;

use super::macros::define_plan_node;
use super::{
    derive_traits, dispatch_pred_explain, ArcRelPlanNode, ArcRelPredNode, ConstantPred,
    RelNodeType, RelPlanNode, RelReprPlanNode, RelReprPredNode,
};

#[derive(Clone, Debug)]
pub struct LogicalScan(pub ArcRelPlanNode);

define_plan_node!(
    LogicalScan : RelPlanNode,
    Scan, [], [
        { 0, table_name: ArcRelPredNode }
    ]
);

#[derive(Clone, Debug)]
pub struct NativeScan(pub ArcRelPlanNode);

define_plan_node!(
    NativeScan : RelPlanNode,
    NativeScan, [], [
        { 0, table_name: ArcRelPredNode }
    ]
);

fn table_of(pred: ArcRelPredNode) -> Arc<str> {
    ConstantPred::from_pred_node(pred)
        .and_then(|x| x.as_str())
        .unwrap()
}

impl LogicalScan {
    pub fn new_table(table: impl AsRef<str>) -> Self {
        Self::new(ConstantPred::string(table).into_pred_node())
    }

    pub fn table(&self) -> Arc<str> {
        table_of(self.table_name())
    }
}

impl NativeScan {
    pub fn new_table(table: impl AsRef<str>) -> Self {
        Self::new(ConstantPred::string(table).into_pred_node())
    }

    pub fn table(&self) -> Arc<str> {
        table_of(self.table_name())
    }
}
