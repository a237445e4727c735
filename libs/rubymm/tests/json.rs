//! The JSON entry point, from serialized raw tree to serialized model.

use config::constants::TransformConfig;
use pretty_assertions::assert_eq;
use rubymm::{parse_json, ModelNode, ParseError, TransformError};
use serde_json::json;

const CLASS_WITH_METHOD: &str = r#"{
    "type": "ROOTNODE",
    "body": {
        "type": "CLASSNODE",
        "position": { "start_line": 1, "end_line": 5 },
        "cpath": { "type": "COLON2NODE", "name": "Greeter" },
        "body_node": {
            "type": "NEWLINENODE",
            "next_node": {
                "type": "DEFNNODE",
                "position": { "start_line": 2, "end_line": 4 },
                "name": "greet",
                "args_node": {
                    "type": "ARGSNODE",
                    "pre": { "type": "LISTNODE", "elements": [ { "type": "ARGUMENTNODE", "name": "who" } ] }
                },
                "body": {
                    "type": "NEWLINENODE",
                    "next_node": {
                        "type": "FCALLNODE",
                        "name": "puts",
                        "args": {
                            "type": "ARRAYNODE",
                            "elements": [
                                {
                                    "type": "DSTRNODE",
                                    "pieces": [
                                        { "type": "STRNODE", "value": "Hello " },
                                        { "type": "EVSTRNODE", "body": { "type": "LOCALVARNODE", "name": "who" } }
                                    ]
                                }
                            ]
                        }
                    }
                }
            }
        }
    }
}"#;

#[test]
fn class_with_method() {
    let model = parse_json(CLASS_WITH_METHOD, &TransformConfig::default()).unwrap();
    let value = serde_json::to_value(&model.root).unwrap();
    assert_eq!(
        value,
        json!({
            "type": "ClassDecl",
            "defname": { "type": "Constant", "name": "Greeter", "container": null },
            "super_class": null,
            "contents": [{
                "type": "Def",
                "name": "greet",
                "receiver": null,
                "onself": false,
                "args": [{ "type": "Argument", "name": "who", "default_value": null }],
                "body": {
                    "type": "Call",
                    "name": "puts",
                    "receiver": null,
                    "args": [{
                        "type": "StringLiteral",
                        "value": null,
                        "dynamic": true,
                        "pieces": [
                            { "type": "StringLiteral", "value": "Hello ", "dynamic": false, "pieces": [] },
                            { "type": "LocalVarAccess", "name": "who" }
                        ]
                    }],
                    "block_arg": null,
                    "implicit_receiver": true
                },
                "rescue_clauses": [],
                "else_body": null,
                "ensure_body": null
            }]
        })
    );
}

#[test]
fn model_round_trips_through_json() {
    let model = parse_json(CLASS_WITH_METHOD, &TransformConfig::default()).unwrap();
    let text = serde_json::to_string(&model).unwrap();
    let back: rubymm::ModelTree = serde_json::from_str(&text).unwrap();
    assert_eq!(back, model);
}

#[test]
fn malformed_input_is_a_load_error() {
    let err = parse_json("{ \"type\": ", &TransformConfig::default()).unwrap_err();
    assert!(matches!(err, ParseError::Load(_)));
}

#[test]
fn non_root_input_is_a_transform_error() {
    let err = parse_json(r#"{ "type": "FIXNUMNODE", "value": 1 }"#, &TransformConfig::default())
        .unwrap_err();
    assert!(matches!(
        err,
        ParseError::Transform(TransformError::RootExpected { .. })
    ));
}

#[test]
fn skipped_nodes_are_reported_in_permissive_mode() {
    let json = r#"{
        "type": "ROOTNODE",
        "body": {
            "type": "BLOCKNODE",
            "statements": [
                { "type": "FIXNUMNODE", "value": 1 },
                { "type": "FORNODE", "position": { "start_line": 3 } }
            ]
        }
    }"#;
    let model = parse_json(json, &TransformConfig::permissive()).unwrap();
    assert_eq!(
        model.root,
        Some(ModelNode::Block(rubymm::Block {
            contents: vec![ModelNode::int(1)],
        }))
    );
    let diagnostics = serde_json::to_value(&model.diagnostics).unwrap();
    assert_eq!(
        diagnostics,
        json!([{
            "message": "skipping FORNODE at line 3",
            "node_type": "FORNODE",
            "line": 3,
            "hint": "the node has no metamodel counterpart and is left out"
        }])
    );
}

const PROGRAM_WITH_UNLISTED_NODE: &str = r#"{
    "type": "ROOTNODE",
    "body": {
        "type": "BLOCKNODE",
        "statements": [
            {
                "type": "LOCALASGNNODE",
                "position": { "start_line": 1 },
                "name": "a",
                "value": { "type": "FIXNUMNODE", "value": 1 }
            },
            { "type": "BIGNUMNODE", "position": { "start_line": 2 }, "value": "18446744073709551616" },
            { "type": "VCALLNODE", "position": { "start_line": 3 }, "name": "b" }
        ]
    }
}"#;

#[test]
fn unlisted_node_type_fails_a_strict_run() {
    let err = parse_json(PROGRAM_WITH_UNLISTED_NODE, &TransformConfig::default()).unwrap_err();
    assert!(matches!(
        &err,
        ParseError::Transform(TransformError::UnrecognizedNodeKind { node_type, line: 2, .. })
            if node_type == "BIGNUMNODE"
    ));
}

#[test]
fn unlisted_node_type_is_skipped_in_permissive_mode() {
    let model = parse_json(PROGRAM_WITH_UNLISTED_NODE, &TransformConfig::permissive()).unwrap();
    let Some(ModelNode::Block(block)) = model.root else {
        panic!("Expected Block");
    };
    assert_eq!(block.contents.len(), 2);
    assert_eq!(model.diagnostics.len(), 1);
    assert_eq!(model.diagnostics[0].node_type, "BIGNUMNODE");
    assert_eq!(model.diagnostics[0].line, 2);
}
