//! Format specifier scanning and classification.
//!
//! Localized values carry `printf`-style placeholders (`%@`, `%1$d`, `%6.4f`,
//! `%lld`, ...). Every recognized placeholder becomes one [`ArgumentType`],
//! which in turn decides the Swift parameter type of the generated accessor.

use std::fmt::{Display, Formatter};

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // `%%` is listed first so an escaped percent is consumed before it can
    // start a specifier.
    static ref SPECIFIER_REGEX: Regex = Regex::new(
        r"%%|%(?:\d+\$)?[+-]?(?:[lh]{0,2})(?:[qLztj])?(?:[ 0]|'.)?\d*(?:\.\d+)?([@dDiuUxXoOfFeEgGcCsSpaAn])"
    )
    .unwrap();
}

/// The semantic kind of a single format specifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArgumentType {
    /// `%@`
    Object,
    /// A single C character.
    Character,
    /// `%d`, `%D`
    SignedInteger,
    /// `%u`, `%U`
    UnsignedDecimal,
    /// `%x`, `%X`
    UnsignedHex,
    /// `%o`, `%O`
    UnsignedOctal,
    /// `%f`, `%F`
    FixedFloat,
    /// `%e`, `%E`
    ExponentFloat,
    /// `%g`, `%G`
    ShortestFloat,
    /// `%a`, `%A`
    HexFloat,
    /// `%c`, `%C`
    UnsignedChar,
    /// `%s`, `%S`
    CString,
    /// `%p`
    Pointer,
}

impl ArgumentType {
    /// Maps a conversion character to its argument type.
    ///
    /// Returns `None` for conversions that have no accessor parameter
    /// (`%i`, `%n`) or are not conversions at all.
    pub fn from_conversion(conversion: char) -> Option<Self> {
        let kind = match conversion {
            '@' => ArgumentType::Object,
            '%' => ArgumentType::Character,
            'd' | 'D' => ArgumentType::SignedInteger,
            'u' | 'U' => ArgumentType::UnsignedDecimal,
            'x' | 'X' => ArgumentType::UnsignedHex,
            'o' | 'O' => ArgumentType::UnsignedOctal,
            'f' | 'F' => ArgumentType::FixedFloat,
            'e' | 'E' => ArgumentType::ExponentFloat,
            'g' | 'G' => ArgumentType::ShortestFloat,
            'a' | 'A' => ArgumentType::HexFloat,
            'c' | 'C' => ArgumentType::UnsignedChar,
            's' | 'S' => ArgumentType::CString,
            'p' => ArgumentType::Pointer,
            _ => return None,
        };
        Some(kind)
    }

    /// The Swift type an accessor declares for this argument.
    pub fn swift_type(&self) -> &'static str {
        match self {
            ArgumentType::Object => "String",
            ArgumentType::Character => "CChar",
            ArgumentType::SignedInteger => "Int",
            ArgumentType::UnsignedDecimal
            | ArgumentType::UnsignedHex
            | ArgumentType::UnsignedOctal => "UInt32",
            ArgumentType::FixedFloat
            | ArgumentType::ExponentFloat
            | ArgumentType::ShortestFloat
            | ArgumentType::HexFloat => "Double",
            ArgumentType::UnsignedChar => "CUnsignedChar",
            ArgumentType::CString => "UnsafePointer<CChar>",
            ArgumentType::Pointer => "UnsafeRawPointer",
        }
    }
}

impl Display for ArgumentType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.swift_type())
    }
}

/// Returns the argument types of every format specifier in `value`, in the
/// order they appear in the text.
///
/// Positional indices (`%2$@`) are accepted but do not reorder the result.
///
/// ```rust
/// use stringsgen::specifier::{classify, ArgumentType};
/// assert_eq!(
///     classify("%2$@ has %1$d new messages"),
///     vec![ArgumentType::Object, ArgumentType::SignedInteger]
/// );
/// assert!(classify("Plain text").is_empty());
/// ```
pub fn classify(value: &str) -> Vec<ArgumentType> {
    SPECIFIER_REGEX
        .captures_iter(value)
        .filter_map(|captures| captures.get(1))
        .filter_map(|conversion| conversion.as_str().chars().next())
        .filter_map(ArgumentType::from_conversion)
        .collect()
}
