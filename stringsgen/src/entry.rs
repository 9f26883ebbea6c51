//! Parsed localization keys.
//!
//! The leaf segment of a key encodes the accessor signature: the first
//! underscore-separated piece is the method name and every following piece
//! declares one argument label. `dynamicText_:_param2` becomes
//! `dynamicText(_ arg0: .., param2 arg1: ..)`.

use std::fmt::{Display, Formatter};

use crate::{
    error::Error,
    escape::{escape_identifier, escape_label},
    specifier::ArgumentType,
};

/// One declared accessor argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Binding {
    /// Public argument label; `None` renders as `_`.
    pub label: Option<String>,
    /// Parameter name used inside the accessor body (`arg0`, `arg1`, ...).
    pub private_name: String,
}

impl Binding {
    fn from_piece(index: usize, piece: &str) -> Self {
        let anonymous = piece == ":" || piece == "*";
        Binding {
            label: (!anonymous).then(|| escape_label(piece)),
            private_name: format!("arg{}", index),
        }
    }

    /// The `label name` pair as written in a Swift parameter list.
    pub fn parameter(&self) -> String {
        format!(
            "{} {}",
            self.label.as_deref().unwrap_or("_"),
            self.private_name
        )
    }
}

/// A validated localization key, ready to be rendered as an accessor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    /// The complete key, used verbatim for the runtime lookup.
    pub key: String,
    /// The leaf segment of the key as written.
    pub identifier: String,
    /// The (escaped) Swift member name.
    pub name: String,
    pub bindings: Vec<Binding>,
    pub arguments: Vec<ArgumentType>,
}

impl Entry {
    /// Parses the leaf `identifier` of `key` against the argument types found
    /// in its value.
    ///
    /// `path` is the dotted location of the entry and is only used to report
    /// an argument-count mismatch.
    pub fn new(
        path: &str,
        key: &str,
        identifier: &str,
        arguments: Vec<ArgumentType>,
    ) -> Result<Self, Error> {
        // Leading, trailing and repeated underscores separate nothing.
        let mut pieces = identifier.split('_').filter(|piece| !piece.is_empty());
        let name = escape_identifier(pieces.next().unwrap_or_default());

        let bindings = pieces
            .enumerate()
            .map(|(index, piece)| Binding::from_piece(index, piece))
            .collect::<Vec<_>>();

        if bindings.len() != arguments.len() {
            return Err(Error::argument_count_mismatch(
                path,
                arguments.len(),
                bindings.len(),
            ));
        }

        Ok(Entry {
            key: key.to_string(),
            identifier: identifier.to_string(),
            name,
            bindings,
            arguments,
        })
    }

    /// Whether the entry renders as a constant rather than a function.
    pub fn is_constant(&self) -> bool {
        self.arguments.is_empty()
    }

    /// The Swift parameter list, e.g. `_ arg0: String, count arg1: Int`.
    pub fn parameter_list(&self) -> String {
        self.bindings
            .iter()
            .zip(&self.arguments)
            .map(|(binding, argument)| format!("{}: {}", binding.parameter(), argument))
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// The private argument names in format order, e.g. `arg0, arg1`.
    pub fn format_arguments(&self) -> String {
        self.bindings
            .iter()
            .map(|binding| binding.private_name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl Display for Entry {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.identifier)?;
        if !self.arguments.is_empty() {
            let types = self
                .arguments
                .iter()
                .map(ArgumentType::swift_type)
                .collect::<Vec<_>>();
            write!(f, "({})", types.join(", "))?;
        }
        Ok(())
    }
}
