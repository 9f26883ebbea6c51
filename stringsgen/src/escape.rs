//! Escaping of generated Swift identifiers and string literals.

/// Words that cannot be used as bare Swift identifiers.
const SWIFT_KEYWORDS: &[&str] = &[
    // Declarations
    "associatedtype",
    "class",
    "deinit",
    "enum",
    "extension",
    "fileprivate",
    "func",
    "import",
    "init",
    "inout",
    "internal",
    "let",
    "open",
    "operator",
    "private",
    "protocol",
    "public",
    "static",
    "struct",
    "subscript",
    "typealias",
    "var",
    // Statements
    "break",
    "case",
    "continue",
    "default",
    "defer",
    "do",
    "else",
    "fallthrough",
    "for",
    "guard",
    "if",
    "in",
    "repeat",
    "return",
    "switch",
    "where",
    "while",
    // Expressions and types
    "as",
    "Any",
    "catch",
    "false",
    "is",
    "nil",
    "rethrows",
    "super",
    "self",
    "Self",
    "throw",
    "throws",
    "true",
    "try",
    // Contextual
    "associativity",
    "convenience",
    "dynamic",
    "didSet",
    "final",
    "get",
    "infix",
    "indirect",
    "lazy",
    "left",
    "mutating",
    "none",
    "nonmutating",
    "optional",
    "override",
    "postfix",
    "precedence",
    "prefix",
    "Protocol",
    "required",
    "right",
    "set",
    "Type",
    "unowned",
    "weak",
    "willSet",
];

/// Keywords Swift rejects as argument labels.
const RESERVED_LABELS: &[&str] = &["inout", "var", "let"];

/// Wraps `name` in backticks when it collides with a Swift keyword.
///
/// ```rust
/// use stringsgen::escape::escape_identifier;
/// assert_eq!(escape_identifier("class"), "`class`");
/// assert_eq!(escape_identifier("title"), "title");
/// ```
pub fn escape_identifier(name: &str) -> String {
    if SWIFT_KEYWORDS.contains(&name) {
        format!("`{}`", name)
    } else {
        name.to_string()
    }
}

/// Escapes an argument label. Most keywords are legal labels; only a few are not.
pub fn escape_label(label: &str) -> String {
    if RESERVED_LABELS.contains(&label) {
        format!("`{}`", label)
    } else {
        label.to_string()
    }
}

/// Renders `value` as a Swift string literal, quotes included.
pub fn string_literal(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for c in value.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}
