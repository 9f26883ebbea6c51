//! The namespace tree.
//!
//! Dotted keys map onto nested namespaces: `section1.subsection2.title`
//! lives in node `subsection2`, itself a child of node `section1`. Nodes are
//! stored in an arena and refer to each other by [`NodeId`]; the parent link
//! is only used to rebuild dotted paths.

use std::fmt::{Display, Formatter};

use tracing::warn;

use crate::{entry::Entry, error::Error, specifier::ArgumentType};

/// Index of a [`Node`] inside its [`NamespaceTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

/// A namespace, rendered as a nested struct.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub identifier: String,
    pub parent: Option<NodeId>,
    /// Child namespaces in insertion order, unique by identifier.
    pub children: Vec<NodeId>,
    /// Entries declared directly in this namespace, in insertion order.
    pub entries: Vec<Entry>,
}

impl Node {
    fn new(identifier: &str, parent: Option<NodeId>) -> Self {
        Node {
            identifier: identifier.to_string(),
            parent,
            children: Vec::new(),
            entries: Vec::new(),
        }
    }

    /// The identifier with its first character uppercased.
    pub fn struct_name(&self) -> String {
        let mut chars = self.identifier.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NamespaceTree {
    nodes: Vec<Node>,
    roots: Vec<NodeId>,
    entries: Vec<Entry>,
}

impl NamespaceTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Places the entry for `key` at the depth given by its dotted path,
    /// creating the intermediate namespaces it needs.
    ///
    /// Fails only when the key's labels disagree with `arguments`.
    pub fn insert(&mut self, key: &str, arguments: Vec<ArgumentType>) -> Result<(), Error> {
        let segments = key.split('.').filter(|s| !s.is_empty()).collect::<Vec<_>>();
        let Some((leaf, namespaces)) = segments.split_last() else {
            warn!(key, "skipping key without identifier");
            return Ok(());
        };
        if leaf.chars().all(|c| c == '_') {
            warn!(key, "skipping key without a member name");
            return Ok(());
        }

        let mut parent = None;
        for segment in namespaces {
            parent = Some(self.resolve(parent, segment));
        }

        let path = match parent {
            Some(id) => format!("{}.{}", self.full_path(id), leaf),
            None => leaf.to_string(),
        };
        let entry = Entry::new(&path, key, leaf, arguments)?;

        match parent {
            Some(id) => self.nodes[id.0].entries.push(entry),
            None => self.entries.push(entry),
        }
        Ok(())
    }

    /// Looks up the child `identifier` of `parent` (or of the root), creating it if missing.
    fn resolve(&mut self, parent: Option<NodeId>, identifier: &str) -> NodeId {
        let siblings = match parent {
            Some(id) => &self.nodes[id.0].children,
            None => &self.roots,
        };
        if let Some(&existing) = siblings
            .iter()
            .find(|id| self.nodes[id.0].identifier == identifier)
        {
            return existing;
        }

        let id = NodeId(self.nodes.len());
        self.nodes.push(Node::new(identifier, parent));
        match parent {
            Some(parent) => self.nodes[parent.0].children.push(id),
            None => self.roots.push(id),
        }
        id
    }

    /// The dotted path from the root to `id`.
    pub fn full_path(&self, id: NodeId) -> String {
        let mut segments = Vec::new();
        let mut current = Some(id);
        while let Some(id) = current {
            let node = self.node(id);
            segments.push(node.identifier.as_str());
            current = node.parent;
        }
        segments.reverse();
        segments.join(".")
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    /// Top-level namespaces in insertion order.
    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    /// Entries declared outside any namespace, in insertion order.
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    /// Looks up a namespace by its dotted path.
    pub fn find(&self, path: &str) -> Option<NodeId> {
        let mut siblings = &self.roots;
        let mut found = None;
        for segment in path.split('.') {
            let id = *siblings
                .iter()
                .find(|id| self.nodes[id.0].identifier == segment)?;
            siblings = &self.nodes[id.0].children;
            found = Some(id);
        }
        found
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Total number of entries across every namespace.
    pub fn entry_count(&self) -> usize {
        self.entries.len() + self.nodes.iter().map(|n| n.entries.len()).sum::<usize>()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty() && self.roots.is_empty()
    }

    /// Dotted paths of namespaces whose struct name equals a sibling's,
    /// such as `settings` and `Settings`. Swift rejects the rendered output.
    pub fn struct_name_collisions(&self) -> Vec<String> {
        let levels = std::iter::once(self.roots.as_slice())
            .chain(self.nodes.iter().map(|node| node.children.as_slice()));

        let mut collisions = Vec::new();
        for siblings in levels {
            for (i, &id) in siblings.iter().enumerate() {
                let name = self.node(id).struct_name();
                let clashes = siblings
                    .iter()
                    .enumerate()
                    .any(|(j, &other)| i != j && self.node(other).struct_name() == name);
                if clashes {
                    collisions.push(self.full_path(id));
                }
            }
        }
        collisions.sort();
        collisions
    }

    fn fmt_node(&self, f: &mut Formatter<'_>, id: NodeId, depth: usize) -> std::fmt::Result {
        let node = self.node(id);
        let indent = "    ".repeat(depth);
        writeln!(f, "{}{}/", indent, node.identifier)?;
        for entry in &node.entries {
            writeln!(f, "{}    {}", indent, entry)?;
        }
        for &child in &node.children {
            self.fmt_node(f, child, depth + 1)?;
        }
        Ok(())
    }
}

/// A human-readable dump of the tree, in insertion order.
impl Display for NamespaceTree {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for entry in &self.entries {
            writeln!(f, "{}", entry)?;
        }
        for &id in &self.roots {
            self.fmt_node(f, id, 0)?;
        }
        Ok(())
    }
}
