// Copyright (c) 2023-2024 CMU Database Group
//
// Use of this source code is governed by an MIT-style license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

mod bridge;
mod converter;

use std::sync::Arc;

use convgate_core::{optimizer::Optimizer, rules::Rule};
use strum::IntoEnumIterator;

pub use bridge::NativeToEnumerableRule;
pub use converter::{ConverterKind, ConverterRule};

use crate::{convertibility::ConvertibilityOracle, plan_nodes::RelNodeType};

/// Every rule of the native backend: the bridge first, then one converter per kind. The order
/// only affects which alternative a greedy driver finds first.
pub fn native_rules<O: Optimizer<RelNodeType>>(
    oracle: Arc<ConvertibilityOracle>,
) -> Vec<Arc<dyn Rule<RelNodeType, O>>> {
    let mut rules: Vec<Arc<dyn Rule<RelNodeType, O>>> =
        vec![Arc::new(NativeToEnumerableRule::new())];
    for kind in ConverterKind::iter() {
        rules.push(Arc::new(ConverterRule::new(kind, oracle.clone())));
    }
    rules
}

#[cfg(test)]
mod tests {
    use convgate_core::trait_set::{Convention, TraitSet};
    use itertools::Itertools;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{
        config::NativeRuleConfig,
        plan_nodes::{LogicalFilter, RelReprPlanNode, NATIVE},
        testing::{col_eq, native_scan, native_test_converter},
        NativeConverter,
    };

    #[test]
    fn registry_order() {
        let oracle = Arc::new(ConvertibilityOracle::from_config(&NativeRuleConfig::default()));
        let rules = native_rules::<NativeConverter>(oracle);
        assert_eq!(
            rules.iter().map(|x| x.name()).collect_vec(),
            vec![
                "native_to_enumerable",
                "native_sort",
                "native_limit",
                "native_filter",
                "native_project",
                "native_aggregate",
                "native_union",
                "native_join",
            ]
        );
        assert!(rules[1..].iter().all(|x| x.in_convention() == Convention::NONE
            && x.out_convention() == NATIVE));
    }

    #[test]
    fn concurrent_conversions_share_rules() {
        let converter = native_test_converter(&NativeRuleConfig::default());
        let results = std::thread::scope(|s| {
            let handles = (0..8)
                .map(|i| {
                    let converter = &converter;
                    s.spawn(move || {
                        let plan = LogicalFilter::new(native_scan(&format!("t{i}")), col_eq(0, i))
                            .into_plan_node();
                        converter.convert(plan, &TraitSet::of(NATIVE))
                    })
                })
                .collect_vec();
            handles.into_iter().map(|h| h.join().unwrap()).collect_vec()
        });
        for (i, res) in results.into_iter().enumerate() {
            let res = res.unwrap();
            assert_eq!(res.typ, RelNodeType::NativeFilter);
            assert_eq!(res.predicates[0], col_eq(0, i as i64));
        }
    }
}
