// Copyright (c) 2023-2024 CMU Database Group
//
// Use of this source code is governed by an MIT-style license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::macros::define_plan_node;
use super::{
    derive_traits, dispatch_plan_explain, dispatch_pred_explain, ArcRelPlanNode, ArcRelPredNode,
    ListPred, RelNodeType, RelPlanNode, RelReprPlanNode, RelReprPredNode, SchemaPred,
};
use crate::schema::Schema;

#[derive(Clone, Debug)]
pub struct LogicalProjection(pub ArcRelPlanNode);

define_plan_node!(
    LogicalProjection : RelPlanNode,
    Projection, [
        { 0, child: ArcRelPlanNode }
    ], [
        { 0, exprs: ArcRelPredNode },
        { 1, schema: ArcRelPredNode }
    ]
);

#[derive(Clone, Debug)]
pub struct NativeProjection(pub ArcRelPlanNode);

define_plan_node!(
    NativeProjection : RelPlanNode,
    NativeProjection, [
        { 0, child: ArcRelPlanNode }
    ], [
        { 0, exprs: ArcRelPredNode },
        { 1, schema: ArcRelPredNode }
    ]
);

impl LogicalProjection {
    pub fn new_with_schema(
        child: ArcRelPlanNode,
        exprs: Vec<ArcRelPredNode>,
        schema: &Schema,
    ) -> Self {
        Self::new(
            child,
            ListPred::new(exprs).into_pred_node(),
            SchemaPred::new(schema).into_pred_node(),
        )
    }

    /// The projected expressions. `None` if the payload is not a list.
    pub fn expr_list(&self) -> Option<Vec<ArcRelPredNode>> {
        ListPred::from_pred_node(self.exprs()).map(|x| x.to_vec())
    }

    pub fn output_schema(&self) -> Option<Schema> {
        SchemaPred::from_pred_node(self.schema()).map(|x| x.schema())
    }
}

impl NativeProjection {
    pub fn output_schema(&self) -> Option<Schema> {
        SchemaPred::from_pred_node(self.schema()).map(|x| x.schema())
    }
}
