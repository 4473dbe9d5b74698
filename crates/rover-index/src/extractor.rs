//! Definition extraction via tree-sitter.

use std::path::Path;

use tree_sitter::{Node, Parser};

use crate::error::{IndexError, Result};
use crate::languages::{Lang, detect_language, is_extractable};

/// One named definition lifted out of a source file.
#[derive(Debug, Clone)]
pub struct CodeObject {
    pub name: String,
    pub source: String,
}

/// A definition paired with the file it came from.
#[derive(Debug, Clone)]
pub struct ExtractedObject {
    pub file_path: String,
    pub name: String,
    pub source: String,
}

/// Result of walking a working tree.
#[derive(Debug, Default)]
pub struct TreeScan {
    pub objects: Vec<ExtractedObject>,
    pub files_scanned: usize,
    pub files_skipped: usize,
}

/// Parse a source file and extract every function/class definition.
///
/// Traversal depth is unrestricted: a nested definition yields its own
/// object in addition to appearing inside its parent's source text.
///
/// # Errors
///
/// Returns an error if tree-sitter cannot parse the source or the file
/// contains syntax errors.
pub fn extract_file(source: &str, lang: Lang) -> Result<Vec<CodeObject>> {
    let grammar = lang.grammar().ok_or(IndexError::UnsupportedLanguage)?;

    let mut parser = Parser::new();
    parser
        .set_language(&grammar)
        .map_err(|e| IndexError::Parse(format!("set_language failed: {e}")))?;

    let tree = parser
        .parse(source, None)
        .ok_or_else(|| IndexError::Parse("parse produced no tree".into()))?;

    let root = tree.root_node();
    if root.has_error() {
        return Err(IndexError::Parse("syntax error".into()));
    }

    let mut objects = Vec::new();
    collect_definitions(&root, source, lang, &mut objects);
    Ok(objects)
}

/// Walk a working tree and extract definitions from every recognized file.
///
/// A file that cannot be read or parsed is skipped with a logged warning;
/// the scan continues with remaining files.
pub async fn scan_tree(root: &Path) -> TreeScan {
    let mut scan = TreeScan::default();

    let entries: Vec<_> = ignore::WalkBuilder::new(root)
        .hidden(true)
        .git_ignore(true)
        .build()
        .flatten()
        .filter(|e| e.file_type().is_some_and(|ft| ft.is_file()) && is_extractable(e.path()))
        .collect();

    for entry in entries {
        scan.files_scanned += 1;
        let rel_path = entry
            .path()
            .strip_prefix(root)
            .unwrap_or(entry.path())
            .to_string_lossy()
            .to_string();

        let source = match tokio::fs::read_to_string(entry.path()).await {
            Ok(s) => s,
            Err(e) => {
                tracing::warn!("could not read {rel_path}: {e}");
                scan.files_skipped += 1;
                continue;
            }
        };

        let Some(lang) = detect_language(entry.path()) else {
            continue;
        };

        match extract_file(&source, lang) {
            Ok(objects) => {
                scan.objects.extend(objects.into_iter().map(|o| ExtractedObject {
                    file_path: rel_path.clone(),
                    name: o.name,
                    source: o.source,
                }));
            }
            Err(e) => {
                tracing::warn!("could not parse {rel_path}: {e}");
                scan.files_skipped += 1;
            }
        }
    }

    scan
}

fn collect_definitions(node: &Node, source: &str, lang: Lang, output: &mut Vec<CodeObject>) {
    if lang.definition_node_kinds().contains(&node.kind()) {
        let name = definition_name(node, source).unwrap_or_else(|| node.kind().to_string());
        output.push(CodeObject {
            name,
            source: source[node.byte_range()].to_string(),
        });
    }

    let child_count = u32::try_from(node.named_child_count()).unwrap_or(u32::MAX);
    for i in 0..child_count {
        if let Some(child) = node.named_child(i) {
            collect_definitions(&child, source, lang, output);
        }
    }
}

fn definition_name(node: &Node, source: &str) -> Option<String> {
    // tree-sitter-rust: impl_item uses "type" field, most others use "name"
    node.child_by_field_name("name")
        .or_else(|| node.child_by_field_name("type"))
        .map(|n| source[n.byte_range()].to_string())
}
