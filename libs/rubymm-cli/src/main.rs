//! `rubymm`: reads a serialized Ruby syntax tree and prints its metamodel.
//!
//! ```bash
//! rubymm tree.json
//! some-ruby-parser --dump-json app.rb | rubymm --permissive --compact
//! ```
//!
//! The model goes to stdout, diagnostics for skipped nodes go to stderr.
//! Any load or transformation failure exits with a non-zero status.

mod args;
mod logging;

use anyhow::{Context, Result};
use args::CliArgs;
use clap::Parser;
use ruby_cst::CstNode;
use rubymm::ModelTree;
use std::fs::File;
use std::io::{BufReader, Read};
use tracing::debug;

fn main() -> Result<()> {
    let args = CliArgs::parse();
    logging::init_tracing(args.verbose);

    let tree = load_tree(&args)?;
    let config = args.transform_config();
    debug!(%config, root = tree.node_type(), "loaded serialized tree");

    let model = rubymm::tree_to_model(&tree, &config).context("failed to build the metamodel")?;
    for diagnostic in &model.diagnostics {
        eprintln!("{diagnostic}");
    }
    println!("{}", render(&model, args.compact)?);
    Ok(())
}

fn load_tree(args: &CliArgs) -> Result<CstNode> {
    match args.input_path() {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("failed to open {}", path.display()))?;
            read_tree(BufReader::new(file), &path.display().to_string())
        }
        None => read_tree(std::io::stdin().lock(), "stdin"),
    }
}

fn read_tree(reader: impl Read, source: &str) -> Result<CstNode> {
    ruby_cst::from_reader(reader)
        .with_context(|| format!("failed to load the syntax tree from {source}"))
}

/// Serializes the model root; an empty program renders as `null`.
fn render(model: &ModelTree, compact: bool) -> Result<String> {
    let json = if compact {
        serde_json::to_string(&model.root)
    } else {
        serde_json::to_string_pretty(&model.root)
    };
    json.context("failed to serialize the metamodel")
}

#[cfg(test)]
mod tests {
    use super::*;
    use config::constants::TransformConfig;
    use pretty_assertions::assert_eq;
    use ruby_cst::build::{fixnum, root};

    #[test]
    fn test_render_compact() {
        let model = rubymm::tree_to_model(&root(Some(fixnum(7))), &TransformConfig::default()).unwrap();
        assert_eq!(
            render(&model, true).unwrap(),
            r#"{"type":"IntLiteral","value":7}"#
        );
    }

    #[test]
    fn test_render_empty_program() {
        let model = rubymm::tree_to_model(&root(None), &TransformConfig::default()).unwrap();
        assert_eq!(render(&model, false).unwrap(), "null");
    }

    #[test]
    fn test_read_tree_then_render() {
        let input = br#"{ "type": "ROOTNODE", "body": { "type": "FIXNUMNODE", "value": 3 } }"#;
        let tree = read_tree(&input[..], "stdin").unwrap();
        let model = rubymm::tree_to_model(&tree, &TransformConfig::default()).unwrap();
        assert_eq!(
            render(&model, true).unwrap(),
            r#"{"type":"IntLiteral","value":3}"#
        );
    }

    #[test]
    fn test_load_failure_is_reported_with_context() {
        let err = read_tree(&b"[]"[..], "stdin").unwrap_err();
        assert_eq!(err.to_string(), "failed to load the syntax tree from stdin");
        assert!(format!("{err:#}").contains("invalid serialized syntax tree"));
    }
}
