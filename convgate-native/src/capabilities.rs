// Copyright (c) 2023-2024 CMU Database Group
//
// Use of this source code is governed by an MIT-style license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Facts about what the native backend can evaluate, consulted by the convertibility oracle.

use std::collections::HashSet;

use arrow_schema::DataType;
use convgate_core::nodes::Value;

use crate::{
    config::CapabilityConfig,
    plan_nodes::{
        AggFuncType, ArcRelPredNode, BinOpType, ConstantPred, DataTypePred, FuncType, RelPredType,
        RelReprPredNode, ScalarFunction, UnOpType,
    },
};

/// Answers are treated as ground truth and never cached by the rules. Implementations are shared
/// between threads that convert plans concurrently.
pub trait CapabilityOracle: Send + Sync {
    /// Whether the backend can evaluate `expr` and every expression below it.
    fn is_expression_supported(&self, expr: &ArcRelPredNode) -> bool;

    fn is_aggregate_function_supported(&self, func: AggFuncType) -> bool;

    /// Folds `expr` to a literal without running the query, if possible.
    fn evaluate_static_constant(&self, expr: &ArcRelPredNode) -> Option<Value>;
}

/// Capabilities from a fixed list of supported functions.
#[derive(Clone, Debug)]
pub struct StaticCapabilities {
    scalar_functions: HashSet<ScalarFunction>,
    aggregate_functions: HashSet<AggFuncType>,
}

impl StaticCapabilities {
    pub fn new(config: &CapabilityConfig) -> Self {
        Self {
            scalar_functions: config.scalar_functions.iter().copied().collect(),
            aggregate_functions: config.aggregate_functions.iter().copied().collect(),
        }
    }

    fn is_scalar_function_supported(&self, func: &FuncType) -> bool {
        match func {
            FuncType::Scalar(func) => self.scalar_functions.contains(func),
            FuncType::Case => true,
        }
    }

    /// Malformed operands (missing children, a cast target that is not a type) do not fold.
    fn evaluate(&self, expr: &ArcRelPredNode) -> Option<i128> {
        match &expr.typ {
            RelPredType::Constant(_) => ConstantPred::from_pred_node(expr.clone())?
                .value()?
                .to_i128(),
            RelPredType::UnOp(UnOpType::Neg) => {
                self.evaluate(expr.children.first()?)?.checked_neg()
            }
            RelPredType::BinOp(op) => {
                let left = self.evaluate(expr.children.first()?)?;
                let right = self.evaluate(expr.children.get(1)?)?;
                match op {
                    BinOpType::Add => left.checked_add(right),
                    BinOpType::Sub => left.checked_sub(right),
                    BinOpType::Mul => left.checked_mul(right),
                    BinOpType::Div => left.checked_div(right),
                    _ => None,
                }
            }
            RelPredType::Cast => {
                let cast_to = DataTypePred::from_pred_node(expr.children.get(1)?.clone())?;
                let value = self.evaluate(expr.children.first()?)?;
                integer_value(value, &cast_to.data_type())?.to_i128()
            }
            _ => None,
        }
    }
}

impl Default for StaticCapabilities {
    fn default() -> Self {
        Self::new(&CapabilityConfig::default())
    }
}

/// Narrows `value` into an integer type. `None` if it does not fit or the type is not an integer.
fn integer_value(value: i128, typ: &DataType) -> Option<Value> {
    Some(match typ {
        DataType::Int8 => Value::Int8(value.try_into().ok()?),
        DataType::Int16 => Value::Int16(value.try_into().ok()?),
        DataType::Int32 => Value::Int32(value.try_into().ok()?),
        DataType::Int64 => Value::Int64(value.try_into().ok()?),
        DataType::UInt8 => Value::UInt8(value.try_into().ok()?),
        DataType::UInt16 => Value::UInt16(value.try_into().ok()?),
        DataType::UInt32 => Value::UInt32(value.try_into().ok()?),
        DataType::UInt64 => Value::UInt64(value.try_into().ok()?),
        _ => return None,
    })
}

impl CapabilityOracle for StaticCapabilities {
    fn is_expression_supported(&self, expr: &ArcRelPredNode) -> bool {
        let node_supported = match &expr.typ {
            RelPredType::Constant(_)
            | RelPredType::ColumnRef
            | RelPredType::DynamicParam
            | RelPredType::CorrelationId
            | RelPredType::List
            | RelPredType::UnOp(_)
            | RelPredType::BinOp(_)
            | RelPredType::LogOp(_)
            | RelPredType::Cast
            | RelPredType::DataType(_) => true,
            RelPredType::Func(func) => self.is_scalar_function_supported(func),
            // Not scalar expressions.
            RelPredType::SortOrder(_) | RelPredType::AggCall(_) | RelPredType::Schema => false,
        };
        node_supported
            && expr
                .children
                .iter()
                .all(|child| self.is_expression_supported(child))
    }

    fn is_aggregate_function_supported(&self, func: AggFuncType) -> bool {
        self.aggregate_functions.contains(&func)
    }

    fn evaluate_static_constant(&self, expr: &ArcRelPredNode) -> Option<Value> {
        if let Some(constant) = ConstantPred::from_pred_node(expr.clone()) {
            return constant.value();
        }
        // Folded results are reported as BIGINT.
        let value = self.evaluate(expr)?;
        integer_value(value, &DataType::Int64)
    }
}
