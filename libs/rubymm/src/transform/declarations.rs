//! # Declaration Transformation
//!
//! Method, class and module definitions.

use super::control_flow::ProtectedBody;
use super::Transformer;
use crate::error::TransformError;
use crate::model::{ClassDecl, Def, ModelNode, ModuleDecl};
use ruby_cst::CstNode;

impl Transformer<'_> {
    /// `def name(args); body; end`
    pub(super) fn method_definition(
        &mut self,
        name: &str,
        args: Option<&CstNode>,
        body: Option<&CstNode>,
    ) -> Result<ModelNode, TransformError> {
        let def = self.definition(name, args, body)?;
        Ok(ModelNode::Def(def))
    }

    /// `def receiver.name(args); body; end`
    pub(super) fn singleton_method_definition(
        &mut self,
        name: &str,
        receiver: Option<&CstNode>,
        args: Option<&CstNode>,
        body: Option<&CstNode>,
    ) -> Result<ModelNode, TransformError> {
        let receiver = self.boxed(receiver)?;
        let def = self.definition(name, args, body)?;
        Ok(ModelNode::Def(Def {
            receiver,
            onself: true,
            ..def
        }))
    }

    fn definition(
        &mut self,
        name: &str,
        args: Option<&CstNode>,
        body: Option<&CstNode>,
    ) -> Result<Def, TransformError> {
        let args = self.normalize_optional_args(args)?;
        let ProtectedBody {
            body,
            rescue_clauses,
            else_body,
            ensure_body,
        } = self.protected_body(body)?;
        Ok(Def {
            name: name.to_string(),
            receiver: None,
            onself: false,
            args,
            body,
            rescue_clauses,
            else_body,
            ensure_body,
        })
    }

    /// `class Name < Super; body; end`
    ///
    /// ## Example CST
    ///
    /// ```text
    /// CLASSNODE
    /// ├── cpath       COLON2NODE "Name"
    /// ├── super_node  CONSTNODE "Super"
    /// └── body_node   BLOCKNODE (statements spliced into contents)
    /// ```
    pub(super) fn class_declaration(
        &mut self,
        cpath: &CstNode,
        super_node: Option<&CstNode>,
        body: Option<&CstNode>,
    ) -> Result<ModelNode, TransformError> {
        let mut decl = ClassDecl {
            defname: self.boxed(Some(cpath))?,
            super_class: self.boxed(super_node)?,
            contents: Vec::new(),
        };
        self.body_node_to_contents(body, &mut decl)?;
        Ok(ModelNode::ClassDecl(decl))
    }

    /// `module Name; body; end`
    pub(super) fn module_declaration(
        &mut self,
        cpath: &CstNode,
        body: Option<&CstNode>,
    ) -> Result<ModelNode, TransformError> {
        let mut decl = ModuleDecl {
            defname: self.boxed(Some(cpath))?,
            contents: Vec::new(),
        };
        self.body_node_to_contents(body, &mut decl)?;
        Ok(ModelNode::ModuleDecl(decl))
    }
}

#[cfg(test)]
mod tests {
    use super::super::Transformer;
    use crate::error::TransformError;
    use crate::model::{ClassDecl, Def, ModelNode, ModuleDecl};
    use config::constants::TransformConfig;
    use pretty_assertions::assert_eq;
    use ruby_cst::build::*;
    use ruby_cst::CstNode;

    fn transform(node: &CstNode) -> Result<Option<ModelNode>, TransformError> {
        let config = TransformConfig::default();
        Transformer::new(&config).transform_node(node)
    }

    fn boxed(model: ModelNode) -> Option<Box<ModelNode>> {
        Some(Box::new(model))
    }

    fn named(name: &str) -> Option<Box<ModelNode>> {
        boxed(ModelNode::Constant {
            name: name.to_string(),
            container: None,
        })
    }

    #[test]
    fn test_def_with_signature() {
        // def m(a, b = 1, *rest, &blk); a; end
        let params = formal_args(
            vec![argument("a")],
            vec![opt_arg("b", fixnum(1))],
            Some(rest_arg(Some("rest"))),
            vec![],
            Some(block_arg("blk")),
        );
        let node = defn("m", Some(params), Some(newline(local_var("a"))));
        let arg = |name: &str, default_value| ModelNode::Argument {
            name: name.to_string(),
            default_value,
        };
        assert_eq!(
            transform(&node).unwrap(),
            Some(ModelNode::Def(Def {
                name: "m".to_string(),
                args: vec![
                    arg("a", None),
                    arg("b", boxed(ModelNode::int(1))),
                    ModelNode::splat(arg("rest", None)),
                    ModelNode::BlockReference {
                        value: boxed(arg("blk", None)),
                    },
                ],
                body: boxed(ModelNode::local_var("a")),
                ..Def::default()
            }))
        );
    }

    #[test]
    fn test_def_with_rescue_lifts_clauses() {
        // def m; 1; rescue; 2; end
        let body = rescue(Some(fixnum(1)), Some(rescue_body(None, Some(fixnum(2)), None)));
        let Some(ModelNode::Def(def)) = transform(&defn("m", None, Some(body))).unwrap() else {
            panic!("Expected Def");
        };
        assert_eq!(def.body, boxed(ModelNode::int(1)));
        assert_eq!(
            def.rescue_clauses,
            vec![ModelNode::RescueClause {
                exceptions: Vec::new(),
                body: boxed(ModelNode::int(2)),
            }]
        );
        assert_eq!(def.ensure_body, None);
    }

    #[test]
    fn test_def_with_modifier_rescue_statement() {
        // def m; foo rescue nil; end
        let statement = rescue(Some(vcall("foo")), Some(rescue_body(None, Some(nil()), None)));
        let node = defn("m", None, Some(newline(statement)));
        let Some(ModelNode::Def(def)) = transform(&node).unwrap() else {
            panic!("Expected Def");
        };
        assert_eq!(
            def.body.map(|body| *body),
            Some(ModelNode::RescueStatement {
                body: boxed(ModelNode::Call {
                    name: "foo".to_string(),
                    receiver: None,
                    args: Vec::new(),
                    block_arg: None,
                    implicit_receiver: false,
                }),
                value: boxed(ModelNode::NilLiteral),
            })
        );
        assert!(def.rescue_clauses.is_empty());
    }

    #[test]
    fn test_def_with_ensure() {
        // def m; 1; ensure; 2; end
        let body = ensure(Some(fixnum(1)), Some(fixnum(2)));
        let Some(ModelNode::Def(def)) = transform(&defn("m", None, Some(body))).unwrap() else {
            panic!("Expected Def");
        };
        assert_eq!(def.body, boxed(ModelNode::int(1)));
        assert!(def.rescue_clauses.is_empty());
        assert_eq!(def.ensure_body, boxed(ModelNode::int(2)));
    }

    #[test]
    fn test_empty_def() {
        let Some(ModelNode::Def(def)) = transform(&defn("m", None, None)).unwrap() else {
            panic!("Expected Def");
        };
        assert_eq!(def.body, None);
        assert!(def.args.is_empty());
        assert!(!def.onself);
    }

    #[test]
    fn test_singleton_def() {
        // def self.m; end
        let node = defs(self_(), "m", None, None);
        let Some(ModelNode::Def(def)) = transform(&node).unwrap() else {
            panic!("Expected Def");
        };
        assert!(def.onself);
        assert_eq!(def.receiver, boxed(ModelNode::SelfReference));
    }

    #[test]
    fn test_class_with_super_class() {
        // class A < B; 1; end
        let node = class(colon2(None, "A"), Some(constant("B")), Some(newline(fixnum(1))));
        assert_eq!(
            transform(&node).unwrap(),
            Some(ModelNode::ClassDecl(ClassDecl {
                defname: named("A"),
                super_class: named("B"),
                contents: vec![ModelNode::int(1)],
            }))
        );
    }

    #[test]
    fn test_module_body_is_spliced() {
        // module M; 1; 2; end
        let node = module(
            colon2(None, "M"),
            Some(block(vec![newline(fixnum(1)), newline(fixnum(2))])),
        );
        assert_eq!(
            transform(&node).unwrap(),
            Some(ModelNode::ModuleDecl(ModuleDecl {
                defname: named("M"),
                contents: vec![ModelNode::int(1), ModelNode::int(2)],
            }))
        );
    }
}
