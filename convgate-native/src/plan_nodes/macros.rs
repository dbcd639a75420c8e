// Copyright (c) 2023-2024 CMU Database Group
//
// Use of this source code is governed by an MIT-style license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

macro_rules! define_plan_node {
    (
        $struct_name:ident : $meta_typ:tt,
        $variant:ident,
        [ $({ $child_id:literal, $child_name:ident : $child_meta_typ:ty }),* ] ,
        [ $({ $attr_id:literal, $attr_name:ident : $attr_meta_typ:ty }),* ]
        $(, { $inner_name:ident : $inner_typ:ty })?
    ) => {
        impl RelReprPlanNode for $struct_name {
            fn into_plan_node(self) -> ArcRelPlanNode {
                self.0
            }

            fn from_plan_node(plan_node: ArcRelPlanNode) -> Option<Self> {
                #[allow(unused_variables)]
                if let RelNodeType :: $variant $( ($inner_name) )? = plan_node.typ {
                    Some(Self(plan_node))
                } else {
                    None
                }
            }

            fn explain(&self) -> pretty_xmlish::Pretty<'static> {
                #[allow(unused_mut)]
                let mut fields: Vec<(&'static str, pretty_xmlish::Pretty<'static>)> = vec![
                    $( (stringify!($inner_name), self.$inner_name().to_string().into() ) , )?
                    $( (stringify!($attr_name), dispatch_pred_explain(self.$attr_name()) ) ),*
                ];
                fields.push(("traits", self.0.traits.to_string().into()));

                pretty_xmlish::Pretty::simple_record(
                    stringify!($struct_name),
                    fields,
                    vec![
                        $( dispatch_plan_explain(self.$child_name()) ),*
                    ],
                )
            }
        }

        impl $struct_name {
            pub fn new(
                $($child_name : $child_meta_typ,)*
                $($attr_name : $attr_meta_typ),*
                $(, $inner_name : $inner_typ)?
            ) -> $struct_name {
                let typ = RelNodeType::$variant $( ($inner_name) )?;
                let children: Vec<ArcRelPlanNode> = vec![$($child_name,)*];
                let predicates: Vec<ArcRelPredNode> = vec![$($attr_name,)*];
                let traits = derive_traits(typ, &children, &predicates);
                $struct_name(
                    RelPlanNode {
                        typ,
                        children,
                        predicates,
                        traits,
                    }
                    .into(),
                )
            }

            $(
                pub fn $child_name(&self) -> $child_meta_typ {
                    self.0.child($child_id)
                }
            )*

            $(
                pub fn $attr_name(&self) -> $attr_meta_typ {
                    self.0.predicate($attr_id)
                }
            )*

            $(
                pub fn $inner_name(&self) -> $inner_typ {
                    if let RelNodeType :: $variant ($inner_name) = self.0.typ {
                        $inner_name
                    } else {
                        unreachable!();
                    }
                }
            )?
        }
    };
}

pub(crate) use define_plan_node;

#[cfg(test)]
mod tests {
    use convgate_core::trait_set::{Collation, FieldCollation, SortDirection};

    use crate::plan_nodes::*;
    use crate::testing::{col_eq, native_scan, scan};

    #[test]
    fn generated_accessors() {
        let cond = col_eq(1, 7);
        let join = LogicalJoin::new(
            scan("t1"),
            scan("t2"),
            cond.clone(),
            ListPred::new(vec![]).into_pred_node(),
            JoinType::LeftOuter,
        );
        assert_eq!(join.join_type(), JoinType::LeftOuter);
        assert_eq!(join.cond(), cond);
        assert_eq!(LogicalScan::from_plan_node(join.left()).unwrap().table().as_ref(), "t1");
        assert!(LogicalSort::from_plan_node(join.clone().into_plan_node()).is_none());
        assert!(LogicalJoin::from_plan_node(join.into_plan_node()).is_some());
    }

    #[test]
    fn explain_lists_payload_and_traits() {
        let sort = NativeSort::new(
            native_scan("t1"),
            sort_exprs(&Collation(vec![FieldCollation::new(0, SortDirection::Asc)])),
        );
        let explained = sort.explain_to_string();
        assert!(explained.starts_with("NativeSort"));
        assert!(explained.contains("{NATIVE [#0 ASC]}"));
        assert!(explained.contains("NativeScan"));
    }
}
