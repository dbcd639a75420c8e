// Copyright (c) 2023-2024 CMU Database Group
//
// Use of this source code is governed by an MIT-style license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use serde::Deserialize;
use strum::IntoEnumIterator;

use crate::plan_nodes::{AggFuncType, ScalarFunction};

/// What the native backend can evaluate. Functions are named by their SQL spelling, e.g.
/// `"CHAR_LENGTH"` or `"SINGLE_VALUE"`.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CapabilityConfig {
    pub scalar_functions: Vec<ScalarFunction>,
    pub aggregate_functions: Vec<AggFuncType>,
}

impl Default for CapabilityConfig {
    fn default() -> Self {
        Self {
            scalar_functions: ScalarFunction::iter()
                .filter(|f| !matches!(f, ScalarFunction::RegexpMatch | ScalarFunction::Random))
                .collect(),
            aggregate_functions: vec![
                AggFuncType::Count,
                AggFuncType::Sum,
                AggFuncType::Min,
                AggFuncType::Max,
                AggFuncType::Avg,
                AggFuncType::SingleValue,
            ],
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct NativeRuleConfig {
    /// The native backend has no union operator yet. Leave off until it does.
    pub enable_union: bool,
    pub capabilities: CapabilityConfig,
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn empty_config_is_default() {
        let config: NativeRuleConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, NativeRuleConfig::default());
        assert!(!config.enable_union);
        assert!(config
            .capabilities
            .scalar_functions
            .contains(&ScalarFunction::Upper));
        assert!(!config
            .capabilities
            .scalar_functions
            .contains(&ScalarFunction::RegexpMatch));
    }

    #[test]
    fn reads_function_names() {
        let config: NativeRuleConfig = serde_json::from_str(
            r#"{
                "enable_union": true,
                "capabilities": {
                    "scalar_functions": ["CHAR_LENGTH", "REGEXP_MATCH"],
                    "aggregate_functions": ["COUNT", "SINGLE_VALUE"]
                }
            }"#,
        )
        .unwrap();
        assert!(config.enable_union);
        assert_eq!(
            config.capabilities.scalar_functions,
            vec![ScalarFunction::CharLength, ScalarFunction::RegexpMatch]
        );
        assert_eq!(
            config.capabilities.aggregate_functions,
            vec![AggFuncType::Count, AggFuncType::SingleValue]
        );
    }

    #[test]
    fn partial_capabilities_keep_other_defaults() {
        let config: NativeRuleConfig =
            serde_json::from_str(r#"{ "capabilities": { "aggregate_functions": [] } }"#).unwrap();
        assert!(config.capabilities.aggregate_functions.is_empty());
        assert_eq!(
            config.capabilities.scalar_functions,
            CapabilityConfig::default().scalar_functions
        );
    }

    #[test]
    fn rejects_unknown_function() {
        let res = serde_json::from_str::<CapabilityConfig>(r#"{ "scalar_functions": ["NOPE"] }"#);
        assert!(res.is_err());
    }
}
