//! Swift source emission.
//!
//! Rendering is a pure function of the tree and the options. Every level is
//! sorted before it is written, so the order in which keys were inserted
//! never shows up in the output.

use serde::{Deserialize, Serialize};

use crate::{
    entry::Entry,
    escape::{escape_identifier, string_literal},
    tree::{NamespaceTree, NodeId},
};

const INDENT: &str = "    ";

/// Access modifier applied to every generated declaration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum AccessLevel {
    #[default]
    Public,
    /// Swift's implicit default; no modifier is written.
    Internal,
}

impl AccessLevel {
    fn modifier(&self) -> &'static str {
        match self {
            AccessLevel::Public => "public ",
            AccessLevel::Internal => "",
        }
    }
}

impl std::str::FromStr for AccessLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "public" => Ok(AccessLevel::Public),
            "internal" => Ok(AccessLevel::Internal),
            other => Err(format!(
                "unknown access level `{}`, expected `public` or `internal`",
                other
            )),
        }
    }
}

/// Options controlling the shape of the generated Swift.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct EmitOptions {
    /// Name of the outermost struct.
    pub root_name: String,
    pub access: AccessLevel,
    /// Look strings up in the Swift package's resource bundle (`bundle: .module`).
    pub package: bool,
    /// Strings table to look up, when not `Localizable`.
    pub table: Option<String>,
}

impl Default for EmitOptions {
    fn default() -> Self {
        EmitOptions {
            root_name: "LocalizedString".to_string(),
            access: AccessLevel::Public,
            package: false,
            table: None,
        }
    }
}

impl EmitOptions {
    /// The `NSLocalizedString` call that fetches `key`.
    fn lookup(&self, key: &str) -> String {
        let mut call = format!("NSLocalizedString({}", string_literal(key));
        if let Some(table) = &self.table {
            call.push_str(&format!(", tableName: {}", string_literal(table)));
        }
        if self.package {
            call.push_str(", bundle: .module");
        }
        call.push_str(", comment: \"\")");
        call
    }
}

/// Renders the whole tree as a single Swift struct declaration.
///
/// ```rust
/// use stringsgen::{emit::{render, EmitOptions}, tree::NamespaceTree};
/// let tree = NamespaceTree::new();
/// assert_eq!(render(&tree, &EmitOptions::default()), "public struct LocalizedString {\n}\n");
/// ```
pub fn render(tree: &NamespaceTree, options: &EmitOptions) -> String {
    let mut out = format!(
        "{}struct {} {{\n",
        options.access.modifier(),
        escape_identifier(&options.root_name)
    );
    render_body(&mut out, tree, tree.entries(), tree.roots(), 1, options);
    out.push_str("}\n");
    out
}

fn render_body(
    out: &mut String,
    tree: &NamespaceTree,
    entries: &[Entry],
    nodes: &[NodeId],
    depth: usize,
    options: &EmitOptions,
) {
    let indent = INDENT.repeat(depth);

    let mut entries = entries.iter().collect::<Vec<_>>();
    entries.sort_by(|a, b| a.identifier.cmp(&b.identifier).then_with(|| a.key.cmp(&b.key)));
    for entry in entries {
        render_entry(out, entry, &indent, options);
    }

    let mut nodes = nodes
        .iter()
        .map(|&id| (tree.node(id).struct_name(), id))
        .collect::<Vec<_>>();
    nodes.sort_by(|(a_name, a), (b_name, b)| {
        a_name
            .cmp(b_name)
            .then_with(|| tree.node(*a).identifier.cmp(&tree.node(*b).identifier))
    });
    for (name, id) in nodes {
        let node = tree.node(id);
        out.push('\n');
        out.push_str(&format!(
            "{}{}struct {} {{\n",
            indent,
            options.access.modifier(),
            escape_identifier(&name)
        ));
        render_body(out, tree, &node.entries, &node.children, depth + 1, options);
        out.push_str(&format!("{}}}\n", indent));
    }
}

fn render_entry(out: &mut String, entry: &Entry, indent: &str, options: &EmitOptions) {
    let access = options.access.modifier();
    let lookup = options.lookup(&entry.key);

    if entry.is_constant() {
        out.push_str(&format!(
            "{}{}static let {} = {}\n",
            indent, access, entry.name, lookup
        ));
        return;
    }

    out.push_str(&format!(
        "{}{}static func {}({}) -> String {{\n",
        indent,
        access,
        entry.name,
        entry.parameter_list()
    ));
    out.push_str(&format!(
        "{}{}return String(format: {}, {})\n",
        indent,
        INDENT,
        lookup,
        entry.format_arguments()
    ));
    out.push_str(&format!("{}}}\n", indent));
}
