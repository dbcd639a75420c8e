// Copyright (c) 2023-2024 CMU Database Group
//
// Use of this source code is governed by an MIT-style license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Typed interface of plan nodes.

mod agg;
mod bridge;
mod filter;
mod join;
mod limit;
pub(super) mod macros;
mod predicates;
mod projection;
mod scan;
mod sort;
mod union;

use arrow_schema::DataType;
use convgate_core::{
    nodes::{ArcPlanNode, ArcPredNode, NodeType, PlanNode, PredNode},
    trait_set::{Collation, Convention, TraitSet},
};
use pretty_xmlish::{Pretty, PrettyConfig};

pub use agg::{GroupType, LogicalAgg, NativeAgg};
pub use bridge::NativeToEnumerable;
pub use filter::{LogicalFilter, NativeFilter};
pub use join::{JoinType, LogicalJoin, NativeJoin};
pub use limit::NativeLimit;
pub use predicates::{
    collation_from_exprs, non_null, sort_exprs, AggCallPred, AggFuncType, BinOpPred, BinOpType,
    CastPred, ColumnRefPred, ConstantPred, ConstantType, CorrelationIdPred, DataTypePred,
    DynamicParamPred, FuncPred, FuncType, ListPred, LogOpPred, LogOpType, ScalarFunction,
    SchemaPred, SortOrderPred, SortOrderType, UnOpPred, UnOpType,
};
pub use projection::{LogicalProjection, NativeProjection};
pub use scan::{LogicalScan, NativeScan};
pub use sort::{LogicalSort, NativeSort};
pub use union::{LogicalUnion, NativeUnion};

/// The calling convention of nodes the native backend executes itself.
pub const NATIVE: Convention = Convention::new("NATIVE");

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RelPredType {
    Constant(ConstantType),
    ColumnRef,
    DynamicParam,
    CorrelationId,
    List,
    UnOp(UnOpType),
    BinOp(BinOpType),
    LogOp(LogOpType),
    Func(FuncType),
    Cast,
    DataType(DataType),
    SortOrder(SortOrderType),
    AggCall(AggFuncType),
    Schema,
}

impl std::fmt::Display for RelPredType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// RelNodeType FAQ:
///   - The define_plan_node!() macro defines what the children of each node are
///   - Every type lives in exactly one convention, see `convention`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RelNodeType {
    // Developers: update `convention` and `input_convention` after adding new plan nodes
    // Logical plan nodes
    Scan,
    Sort,
    Filter,
    Projection,
    Agg,
    Join(JoinType),
    Union,
    // Native plan nodes
    NativeScan,
    NativeSort,
    NativeLimit,
    NativeFilter,
    NativeProjection,
    NativeAgg,
    NativeJoin(JoinType),
    NativeUnion,
    // Runs a native subtree from generic execution
    NativeToEnumerable,
}

impl std::fmt::Display for RelNodeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

impl RelNodeType {
    pub fn convention(&self) -> Convention {
        match self {
            Self::Scan
            | Self::Sort
            | Self::Filter
            | Self::Projection
            | Self::Agg
            | Self::Join(_)
            | Self::Union => Convention::NONE,
            Self::NativeToEnumerable => Convention::ENUMERABLE,
            _ => NATIVE,
        }
    }

    /// The convention every child must carry. Logical nodes accept inputs of any convention.
    pub fn input_convention(&self) -> Option<Convention> {
        match self {
            Self::NativeToEnumerable => Some(NATIVE),
            x if x.is_logical() => None,
            x => Some(x.convention()),
        }
    }
}

impl NodeType for RelNodeType {
    type PredType = RelPredType;

    fn is_logical(&self) -> bool {
        self.convention() == Convention::NONE
    }
}

pub type RelPlanNode = PlanNode<RelNodeType>;
pub type ArcRelPlanNode = ArcPlanNode<RelNodeType>;
pub type RelPredNode = PredNode<RelNodeType>;
pub type ArcRelPredNode = ArcPredNode<RelNodeType>;

/// Computes the traits of a node being built from its type and inputs.
pub(crate) fn derive_traits(
    typ: RelNodeType,
    children: &[ArcRelPlanNode],
    predicates: &[ArcRelPredNode],
) -> TraitSet {
    debug_assert!(
        typ.input_convention()
            .map_or(true, |conv| children.iter().all(|c| c.convention() == conv)),
        "{typ} built over an input of the wrong convention"
    );
    let traits = TraitSet::of(typ.convention());
    match typ {
        RelNodeType::NativeSort => traits.replace_collation(
            collation_from_exprs(&predicates[0]).unwrap_or_else(Collation::empty),
        ),
        RelNodeType::NativeLimit | RelNodeType::NativeFilter | RelNodeType::NativeToEnumerable => {
            traits.replace_collation(children[0].traits.collation.clone())
        }
        _ => traits,
    }
}

pub trait RelReprPlanNode: 'static + Clone {
    fn into_plan_node(self) -> ArcRelPlanNode;

    fn from_plan_node(plan_node: ArcRelPlanNode) -> Option<Self>;

    fn explain(&self) -> Pretty<'static>;

    fn explain_to_string(&self) -> String {
        explain_to_string(&self.explain())
    }
}

pub trait RelReprPredNode: 'static + Clone {
    fn into_pred_node(self) -> ArcRelPredNode;

    fn from_pred_node(pred_node: ArcRelPredNode) -> Option<Self>;

    fn explain(&self) -> Pretty<'static>;

    fn explain_to_string(&self) -> String {
        explain_to_string(&self.explain())
    }
}

fn explain_to_string(pretty: &Pretty) -> String {
    let mut config = PrettyConfig {
        need_boundaries: false,
        reduced_spaces: false,
        width: 300,
        ..Default::default()
    };
    let mut out = String::new();
    config.unicode(&mut out, pretty);
    out
}

/// Renders any plan node, whatever its type.
pub fn explain_plan(plan_node: ArcRelPlanNode) -> String {
    explain_to_string(&dispatch_plan_explain(plan_node))
}

pub fn dispatch_plan_explain(plan_node: ArcRelPlanNode) -> Pretty<'static> {
    // Every arm names the wrapper whose `from_plan_node` accepts exactly this type.
    let explained = match plan_node.typ {
        RelNodeType::Scan => LogicalScan::from_plan_node(plan_node.clone()).map(|x| x.explain()),
        RelNodeType::Sort => LogicalSort::from_plan_node(plan_node.clone()).map(|x| x.explain()),
        RelNodeType::Filter => {
            LogicalFilter::from_plan_node(plan_node.clone()).map(|x| x.explain())
        }
        RelNodeType::Projection => {
            LogicalProjection::from_plan_node(plan_node.clone()).map(|x| x.explain())
        }
        RelNodeType::Agg => LogicalAgg::from_plan_node(plan_node.clone()).map(|x| x.explain()),
        RelNodeType::Join(_) => {
            LogicalJoin::from_plan_node(plan_node.clone()).map(|x| x.explain())
        }
        RelNodeType::Union => LogicalUnion::from_plan_node(plan_node.clone()).map(|x| x.explain()),
        RelNodeType::NativeScan => {
            NativeScan::from_plan_node(plan_node.clone()).map(|x| x.explain())
        }
        RelNodeType::NativeSort => {
            NativeSort::from_plan_node(plan_node.clone()).map(|x| x.explain())
        }
        RelNodeType::NativeLimit => {
            NativeLimit::from_plan_node(plan_node.clone()).map(|x| x.explain())
        }
        RelNodeType::NativeFilter => {
            NativeFilter::from_plan_node(plan_node.clone()).map(|x| x.explain())
        }
        RelNodeType::NativeProjection => {
            NativeProjection::from_plan_node(plan_node.clone()).map(|x| x.explain())
        }
        RelNodeType::NativeAgg => NativeAgg::from_plan_node(plan_node.clone()).map(|x| x.explain()),
        RelNodeType::NativeJoin(_) => {
            NativeJoin::from_plan_node(plan_node.clone()).map(|x| x.explain())
        }
        RelNodeType::NativeUnion => {
            NativeUnion::from_plan_node(plan_node.clone()).map(|x| x.explain())
        }
        RelNodeType::NativeToEnumerable => {
            NativeToEnumerable::from_plan_node(plan_node.clone()).map(|x| x.explain())
        }
    };
    explained.unwrap_or_else(|| Pretty::display(&plan_node))
}

pub fn dispatch_pred_explain(pred_node: ArcRelPredNode) -> Pretty<'static> {
    let explained = match &pred_node.typ {
        RelPredType::Constant(_) => {
            ConstantPred::from_pred_node(pred_node.clone()).map(|x| x.explain())
        }
        RelPredType::ColumnRef => {
            ColumnRefPred::from_pred_node(pred_node.clone()).map(|x| x.explain())
        }
        RelPredType::DynamicParam => {
            DynamicParamPred::from_pred_node(pred_node.clone()).map(|x| x.explain())
        }
        RelPredType::CorrelationId => {
            CorrelationIdPred::from_pred_node(pred_node.clone()).map(|x| x.explain())
        }
        RelPredType::List => ListPred::from_pred_node(pred_node.clone()).map(|x| x.explain()),
        RelPredType::UnOp(_) => UnOpPred::from_pred_node(pred_node.clone()).map(|x| x.explain()),
        RelPredType::BinOp(_) => {
            BinOpPred::from_pred_node(pred_node.clone()).map(|x| x.explain())
        }
        RelPredType::LogOp(_) => {
            LogOpPred::from_pred_node(pred_node.clone()).map(|x| x.explain())
        }
        RelPredType::Func(_) => FuncPred::from_pred_node(pred_node.clone()).map(|x| x.explain()),
        RelPredType::Cast => CastPred::from_pred_node(pred_node.clone()).map(|x| x.explain()),
        RelPredType::DataType(_) => {
            DataTypePred::from_pred_node(pred_node.clone()).map(|x| x.explain())
        }
        RelPredType::SortOrder(_) => {
            SortOrderPred::from_pred_node(pred_node.clone()).map(|x| x.explain())
        }
        RelPredType::AggCall(_) => {
            AggCallPred::from_pred_node(pred_node.clone()).map(|x| x.explain())
        }
        RelPredType::Schema => SchemaPred::from_pred_node(pred_node.clone()).map(|x| x.explain()),
    };
    explained.unwrap_or_else(|| Pretty::display(&pred_node))
}
