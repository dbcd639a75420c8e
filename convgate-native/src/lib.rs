// Copyright (c) 2023-2024 CMU Database Group
//
// Use of this source code is governed by an MIT-style license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::new_without_default)]

use std::sync::Arc;

use config::NativeRuleConfig;
use convertibility::ConvertibilityOracle;
use convgate_core::heuristics::{HeuristicConverter, HeuristicConverterProperties};
use plan_nodes::RelNodeType;

pub use convgate_core::nodes::Value;

pub mod capabilities;
pub mod config;
pub mod convertibility;
pub mod plan_nodes;
pub mod rules;
pub mod schema;
#[cfg(test)]
mod testing;

pub type NativeConverter = HeuristicConverter<RelNodeType>;

/// A greedy converter loaded with every native rule.
pub fn new_native_converter(config: &NativeRuleConfig) -> NativeConverter {
    new_native_converter_with_properties(config, HeuristicConverterProperties::default())
}

pub fn new_native_converter_with_properties(
    config: &NativeRuleConfig,
    properties: HeuristicConverterProperties,
) -> NativeConverter {
    let oracle = Arc::new(ConvertibilityOracle::from_config(config));
    HeuristicConverter::new_with_properties(rules::native_rules(oracle), properties)
}
