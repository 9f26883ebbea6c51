//! Support for the Apple `.stringsdict` plural dictionary format.
//!
//! A `.stringsdict` file is an XML property list. Each top-level key maps to
//! a dictionary with a `NSStringLocalizedFormatKey` such as
//! `"%#@items@ in %@"`, plus one dictionary per `%#@variable@` describing the
//! plural variants of that variable. Only the format key and the
//! `NSStringFormatValueTypeKey` of each variable matter for code generation:
//! the variable reference is replaced by a plain specifier of that type, so
//! `"%#@items@ in %@"` with value type `d` becomes `"%d in %@"`.

use std::io::BufRead;

use lazy_static::lazy_static;
use quick_xml::{Reader, events::Event, name::QName};
use regex::{Captures, Regex};
use tracing::debug;

use crate::{error::Error, traits::Parser};

const FORMAT_KEY: &str = "NSStringLocalizedFormatKey";
const VALUE_TYPE_KEY: &str = "NSStringFormatValueTypeKey";

lazy_static! {
    static ref VARIABLE_REGEX: Regex = Regex::new(r"%(\d+\$)?#@([^%#@]+)@").unwrap();
}

/// A property list value. Only strings, dictionaries and arrays are kept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlistValue {
    String(String),
    /// Key/value pairs in document order.
    Dict(Vec<(String, PlistValue)>),
    Array(Vec<PlistValue>),
    /// Numbers, dates, data and booleans.
    Other,
}

impl PlistValue {
    /// Looks up `key` when this value is a dictionary.
    pub fn get(&self, key: &str) -> Option<&PlistValue> {
        match self {
            PlistValue::Dict(pairs) => pairs.iter().find(|(k, _)| k == key).map(|(_, v)| v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            PlistValue::String(s) => Some(s),
            _ => None,
        }
    }
}

/// Represents an Apple `.stringsdict` file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Format {
    /// Top-level keys and their rule dictionaries, in document order.
    pub rules: Vec<(String, PlistValue)>,
}

impl Format {
    /// Flattens every rule into a single format string.
    ///
    /// Keys without a `NSStringLocalizedFormatKey` are skipped.
    pub fn flatten(&self) -> Vec<(String, String)> {
        self.rules
            .iter()
            .filter_map(|(key, rule)| match flatten_rule(rule) {
                Some(format) => Some((key.clone(), format)),
                None => {
                    debug!(key, "stringsdict entry has no {}", FORMAT_KEY);
                    None
                }
            })
            .collect()
    }
}

/// Replaces each `%#@variable@` of the rule's format key with `%<type>`.
///
/// References whose variable declares no value type are kept as written.
fn flatten_rule(rule: &PlistValue) -> Option<String> {
    let format = rule.get(FORMAT_KEY)?.as_str()?;
    let flattened = VARIABLE_REGEX.replace_all(format, |captures: &Captures| {
        let position = captures.get(1).map_or("", |m| m.as_str());
        match rule
            .get(&captures[2])
            .and_then(|variable| variable.get(VALUE_TYPE_KEY))
            .and_then(PlistValue::as_str)
        {
            Some(value_type) => format!("%{}{}", position, value_type),
            None => captures[0].to_string(),
        }
    });
    Some(flattened.into_owned())
}

impl Parser for Format {
    fn from_reader<R: BufRead>(mut reader: R) -> Result<Self, Error> {
        if reader.fill_buf()?.starts_with(b"bplist") {
            return Err(Error::InvalidPlist(
                "binary property lists are not supported".to_string(),
            ));
        }

        let mut xml_reader = Reader::from_reader(reader);
        let mut buf = Vec::new();

        let root = loop {
            match xml_reader.read_event_into(&mut buf) {
                Ok(Event::Start(ref e)) if e.name().as_ref() == b"plist" => {}
                Ok(Event::Start(ref e)) => {
                    let name = e.name().as_ref().to_vec();
                    break parse_value(&mut xml_reader, &name)?;
                }
                Ok(Event::Empty(ref e)) => break empty_value(e.name().as_ref()),
                Ok(Event::Eof) => {
                    return Err(Error::InvalidPlist("missing root dictionary".to_string()));
                }
                Ok(_) => {}
                Err(e) => return Err(Error::XmlParse(e)),
            }
            buf.clear();
        };

        match root {
            PlistValue::Dict(rules) => Ok(Format { rules }),
            _ => Err(Error::InvalidPlist("root is not a dictionary".to_string())),
        }
    }

    fn into_pairs(self) -> Vec<(String, String)> {
        self.flatten()
    }
}

fn empty_value(tag: &[u8]) -> PlistValue {
    match tag {
        b"string" => PlistValue::String(String::new()),
        b"dict" => PlistValue::Dict(Vec::new()),
        b"array" => PlistValue::Array(Vec::new()),
        _ => PlistValue::Other,
    }
}

/// Parses the value whose start tag `tag` was just read.
fn parse_value<R: BufRead>(xml_reader: &mut Reader<R>, tag: &[u8]) -> Result<PlistValue, Error> {
    match tag {
        b"dict" => parse_dict(xml_reader),
        b"array" => parse_array(xml_reader),
        b"string" => read_text(xml_reader, b"string").map(PlistValue::String),
        _ => {
            let mut buf = Vec::new();
            xml_reader.read_to_end_into(QName(tag), &mut buf)?;
            Ok(PlistValue::Other)
        }
    }
}

fn parse_dict<R: BufRead>(xml_reader: &mut Reader<R>) -> Result<PlistValue, Error> {
    let mut buf = Vec::new();
    let mut pairs = Vec::new();
    let mut pending_key: Option<String> = None;

    loop {
        let value = match xml_reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) if e.name().as_ref() == b"key" => {
                pending_key = Some(read_text(xml_reader, b"key")?);
                None
            }
            Ok(Event::Start(ref e)) => {
                let name = e.name().as_ref().to_vec();
                Some(parse_value(xml_reader, &name)?)
            }
            Ok(Event::Empty(ref e)) if e.name().as_ref() == b"key" => {
                pending_key = Some(String::new());
                None
            }
            Ok(Event::Empty(ref e)) => Some(empty_value(e.name().as_ref())),
            Ok(Event::End(ref e)) if e.name().as_ref() == b"dict" => break,
            Ok(Event::Eof) => {
                return Err(Error::InvalidPlist("unterminated <dict>".to_string()));
            }
            Ok(_) => None,
            Err(e) => return Err(Error::XmlParse(e)),
        };

        if let Some(value) = value {
            let key = pending_key.take().ok_or_else(|| {
                Error::InvalidPlist("dictionary value without a <key>".to_string())
            })?;
            pairs.push((key, value));
        }
        buf.clear();
    }

    Ok(PlistValue::Dict(pairs))
}

fn parse_array<R: BufRead>(xml_reader: &mut Reader<R>) -> Result<PlistValue, Error> {
    let mut buf = Vec::new();
    let mut items = Vec::new();

    loop {
        match xml_reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => {
                let name = e.name().as_ref().to_vec();
                items.push(parse_value(xml_reader, &name)?);
            }
            Ok(Event::Empty(ref e)) => items.push(empty_value(e.name().as_ref())),
            Ok(Event::End(ref e)) if e.name().as_ref() == b"array" => break,
            Ok(Event::Eof) => {
                return Err(Error::InvalidPlist("unterminated <array>".to_string()));
            }
            Ok(_) => {}
            Err(e) => return Err(Error::XmlParse(e)),
        }
        buf.clear();
    }

    Ok(PlistValue::Array(items))
}

/// Reads the text content up to the closing `tag`.
fn read_text<R: BufRead>(xml_reader: &mut Reader<R>, tag: &[u8]) -> Result<String, Error> {
    let mut buf = Vec::new();
    let mut text = String::new();

    loop {
        match xml_reader.read_event_into(&mut buf) {
            Ok(Event::Text(e)) => text.push_str(&e.unescape().map_err(Error::XmlParse)?),
            Ok(Event::CData(e)) => text.push_str(&String::from_utf8_lossy(&e)),
            Ok(Event::End(ref e)) if e.name().as_ref() == tag => break,
            Ok(Event::Eof) => {
                return Err(Error::InvalidPlist(format!(
                    "unterminated <{}>",
                    String::from_utf8_lossy(tag)
                )));
            }
            Ok(_) => {}
            Err(e) => return Err(Error::XmlParse(e)),
        }
        buf.clear();
    }

    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::Parser;
    use indoc::indoc;

    const PLURALS: &str = indoc! {r#"
        <?xml version="1.0" encoding="UTF-8"?>
        <!DOCTYPE plist PUBLIC "-//Apple//DTD PLIST 1.0//EN" "http://www.apple.com/DTDs/PropertyList-1.0.dtd">
        <plist version="1.0">
        <dict>
            <key>time.days_:</key>
            <dict>
                <key>NSStringLocalizedFormatKey</key>
                <string>%#@VARIABLE@</string>
                <key>VARIABLE</key>
                <dict>
                    <key>NSStringFormatSpecTypeKey</key>
                    <string>NSStringPluralRuleType</string>
                    <key>NSStringFormatValueTypeKey</key>
                    <string>d</string>
                    <key>one</key>
                    <string>1 day</string>
                    <key>other</key>
                    <string>%d days</string>
                </dict>
            </dict>
            <key>multivariable_string_int1_int2</key>
            <dict>
                <key>NSStringLocalizedFormatKey</key>
                <string>Multivariable string of %@ with %#@item1@ and %#@item2@</string>
                <key>item1</key>
                <dict>
                    <key>NSStringFormatSpecTypeKey</key>
                    <string>NSStringPluralRuleType</string>
                    <key>NSStringFormatValueTypeKey</key>
                    <string>d</string>
                    <key>one</key>
                    <string>1 item 1</string>
                    <key>other</key>
                    <string>%d item 1's</string>
                </dict>
                <key>item2</key>
                <dict>
                    <key>NSStringFormatSpecTypeKey</key>
                    <string>NSStringPluralRuleType</string>
                    <key>NSStringFormatValueTypeKey</key>
                    <string>ld</string>
                    <key>other</key>
                    <string>%ld item 2's</string>
                </dict>
            </dict>
        </dict>
        </plist>
    "#};

    #[test]
    fn test_flatten_plural_rules() {
        let format = Format::from_str(PLURALS).unwrap();
        assert_eq!(format.rules.len(), 2);
        assert_eq!(
            format.into_pairs(),
            vec![
                ("time.days_:".to_string(), "%d".to_string()),
                (
                    "multivariable_string_int1_int2".to_string(),
                    "Multivariable string of %@ with %d and %ld".to_string()
                ),
            ]
        );
    }

    #[test]
    fn test_positional_variable_reference() {
        let plist = r#"<plist><dict>
            <key>greeting</key>
            <dict>
                <key>NSStringLocalizedFormatKey</key>
                <string>%2$@ has %1$#@count@</string>
                <key>count</key>
                <dict><key>NSStringFormatValueTypeKey</key><string>u</string></dict>
            </dict>
        </dict></plist>"#;
        let pairs = Format::from_str(plist).unwrap().into_pairs();
        assert_eq!(pairs, vec![("greeting".to_string(), "%2$@ has %1$u".to_string())]);
    }

    #[test]
    fn test_variable_without_type_is_kept() {
        let plist = r#"<plist><dict>
            <key>apples</key>
            <dict>
                <key>NSStringLocalizedFormatKey</key>
                <string>%#@count@</string>
                <key>count</key>
                <dict><key>other</key><string>many</string></dict>
            </dict>
        </dict></plist>"#;
        let pairs = Format::from_str(plist).unwrap().into_pairs();
        assert_eq!(pairs, vec![("apples".to_string(), "%#@count@".to_string())]);
    }

    #[test]
    fn test_entries_without_format_key_are_skipped() {
        let plist = r#"<plist><dict>
            <key>broken</key>
            <dict><key>count</key><integer>3</integer><key>flag</key><true/></dict>
            <key>list</key>
            <array><string>a</string><dict/></array>
        </dict></plist>"#;
        let format = Format::from_str(plist).unwrap();
        assert_eq!(format.rules.len(), 2);
        assert_eq!(
            format.rules[0].1.get("count"),
            Some(&PlistValue::Other)
        );
        assert!(format.flatten().is_empty());
    }

    #[test]
    fn test_escaped_text() {
        let plist = r#"<plist><dict>
            <key>terms</key>
            <dict>
                <key>NSStringLocalizedFormatKey</key>
                <string>Fish &amp; chips for %@</string>
            </dict>
        </dict></plist>"#;
        let pairs = Format::from_str(plist).unwrap().into_pairs();
        assert_eq!(pairs[0].1, "Fish & chips for %@");
    }

    #[test]
    fn test_binary_plist_is_rejected() {
        let err = Format::from_bytes(b"bplist00\xd1\x01\x02").unwrap_err();
        assert!(matches!(err, Error::InvalidPlist(_)));
    }

    #[test]
    fn test_root_must_be_dictionary() {
        let err = Format::from_str("<plist><array/></plist>").unwrap_err();
        assert!(matches!(err, Error::InvalidPlist(_)));
        let err = Format::from_str("").unwrap_err();
        assert!(matches!(err, Error::InvalidPlist(_)));
    }

    #[test]
    fn test_unterminated_dictionary() {
        let err = Format::from_str("<plist><dict><key>a</key>").unwrap_err();
        assert!(matches!(err, Error::InvalidPlist(_) | Error::XmlParse(_)));
    }
}
