// Copyright (c) 2023-2024 CMU Database Group
//
// Use of this source code is governed by an MIT-style license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The PlanNode is the basic data structure of the rule set. It is dynamically typed and is
//! the internal representation of the plan nodes.

use std::{fmt::Debug, hash::Hash, sync::Arc};

use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};

use crate::trait_set::{Convention, TraitSet};

pub trait NodeType:
    PartialEq + Eq + Hash + Clone + 'static + std::fmt::Display + Debug + Send + Sync
{
    type PredType: PartialEq
        + Eq
        + Hash
        + Clone
        + 'static
        + std::fmt::Display
        + Debug
        + Send
        + Sync;

    fn is_logical(&self) -> bool;
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Value {
    UInt8(u8),
    UInt16(u16),
    UInt32(u32),
    UInt64(u64),
    Int8(i8),
    Int16(i16),
    Int32(i32),
    Int64(i64),
    Float(OrderedFloat<f64>),
    String(Arc<str>),
    Bool(bool),
    Serialized(Arc<[u8]>),
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UInt8(x) => write!(f, "{x}(u8)"),
            Self::UInt16(x) => write!(f, "{x}(u16)"),
            Self::UInt32(x) => write!(f, "{x}(u32)"),
            Self::UInt64(x) => write!(f, "{x}(u64)"),
            Self::Int8(x) => write!(f, "{x}(i8)"),
            Self::Int16(x) => write!(f, "{x}(i16)"),
            Self::Int32(x) => write!(f, "{x}(i32)"),
            Self::Int64(x) => write!(f, "{x}(i64)"),
            Self::Float(x) => write!(f, "{x}(float)"),
            Self::String(x) => write!(f, "\"{x}\""),
            Self::Bool(x) => write!(f, "{x}"),
            Self::Serialized(x) => write!(f, "<len:{}>", x.len()),
        }
    }
}

impl Value {
    pub fn as_u64(&self) -> u64 {
        match self {
            Value::UInt64(i) => *i,
            _ => panic!("Value is not an u64"),
        }
    }

    pub fn as_slice(&self) -> Arc<[u8]> {
        match self {
            Value::Serialized(v) => v.clone(),
            _ => panic!("Value is not a serialized"),
        }
    }

    /// Widens any integer value. Floats, strings and blobs have no integer view.
    pub fn to_i128(&self) -> Option<i128> {
        match self {
            Value::UInt8(x) => Some(*x as i128),
            Value::UInt16(x) => Some(*x as i128),
            Value::UInt32(x) => Some(*x as i128),
            Value::UInt64(x) => Some(*x as i128),
            Value::Int8(x) => Some(*x as i128),
            Value::Int16(x) => Some(*x as i128),
            Value::Int32(x) => Some(*x as i128),
            Value::Int64(x) => Some(*x as i128),
            _ => None,
        }
    }

    /// Converts an integer value into a row count. Negative or non-integer values yield `None`.
    pub fn to_u64(&self) -> Option<u64> {
        self.to_i128().and_then(|x| u64::try_from(x).ok())
    }
}

pub type ArcPlanNode<T> = Arc<PlanNode<T>>;
pub type ArcPredNode<T> = Arc<PredNode<T>>;

/// A plan node: an operator, its inputs, its payload and the traits it delivers.
#[derive(Clone, Debug, Hash, PartialEq, Eq)]
pub struct PlanNode<T: NodeType> {
    /// A generic plan node type
    pub typ: T,
    /// Child plan nodes. Shared subtrees are shared `Arc`s.
    pub children: Vec<ArcPlanNode<T>>,
    /// Operator payload
    pub predicates: Vec<ArcPredNode<T>>,
    /// Calling convention and physical properties of the output
    pub traits: TraitSet,
}

impl<T: NodeType> std::fmt::Display for PlanNode<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({} {}", self.typ, self.traits)?;
        for pred in &self.predicates {
            write!(f, " {pred}")?;
        }
        for child in &self.children {
            write!(f, " {child}")?;
        }
        write!(f, ")")
    }
}

impl<T: NodeType> PlanNode<T> {
    pub fn child(&self, idx: usize) -> ArcPlanNode<T> {
        self.children[idx].clone()
    }

    pub fn predicate(&self, idx: usize) -> ArcPredNode<T> {
        self.predicates[idx].clone()
    }

    pub fn convention(&self) -> Convention {
        self.traits.convention
    }

    /// Whether every node in this subtree carries `convention`.
    pub fn is_fully_in(&self, convention: Convention) -> bool {
        self.convention() == convention && self.children.iter().all(|c| c.is_fully_in(convention))
    }
}

/// An expression tree node attached to a plan node.
#[derive(Clone, Debug, Hash, PartialEq, Eq)]
pub struct PredNode<T: NodeType> {
    /// A generic predicate node type
    pub typ: T::PredType,
    /// Child predicate nodes, always materialized
    pub children: Vec<ArcPredNode<T>>,
    /// Data associated with the predicate, if any
    pub data: Option<Value>,
}

impl<T: NodeType> std::fmt::Display for PredNode<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}", self.typ)?;
        for child in &self.children {
            write!(f, " {child}")?;
        }
        if let Some(data) = &self.data {
            write!(f, " {data}")?;
        }
        write!(f, ")")
    }
}

impl<T: NodeType> PredNode<T> {
    pub fn child(&self, idx: usize) -> ArcPredNode<T> {
        self.children[idx].clone()
    }
}
