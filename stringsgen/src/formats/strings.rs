//! Support for the Apple `.strings` localization format.
//!
//! A `.strings` file is a list of `"key" = "value";` statements with
//! optional `//` and `/* */` comments. Keys may be written without quotes.

use std::{
    fs::File,
    io::{BufRead, Read},
    iter::Peekable,
    path::Path,
    str::Chars,
};

use crate::{error::Error, traits::Parser};

/// Represents an Apple `.strings` localization file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Format {
    /// All key-value pairs in file order, duplicates included.
    pub pairs: Vec<Pair>,
}

/// A single key-value statement of a `.strings` file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pair {
    pub key: String,
    /// The unescaped value, with line breaks removed.
    pub value: String,
}

impl Parser for Format {
    fn from_reader<R: BufRead>(mut reader: R) -> Result<Self, Error> {
        let mut content = String::new();
        reader.read_to_string(&mut content)?;
        let content = content.trim_start_matches('\u{feff}');

        let mut scanner = Scanner {
            chars: content.chars().peekable(),
        };
        let mut pairs = Vec::new();
        while let Some(pair) = scanner.next_pair() {
            pairs.extend(pair);
        }
        Ok(Format { pairs })
    }

    /// Override default file reading to support BOM-aware decoding (e.g., UTF-16 Apple .strings)
    fn read_from<P: AsRef<Path>>(path: P) -> Result<Self, Error>
    where
        Self: Sized,
    {
        let file = File::open(path).map_err(Error::Io)?;
        // Auto-detect BOM, decode to UTF-8; passthrough UTF-8
        let mut decoder = encoding_rs_io::DecodeReaderBytesBuilder::new()
            .bom_override(true)
            .build(file);

        let mut decoded = String::new();
        decoder.read_to_string(&mut decoded).map_err(Error::Io)?;

        Self::from_str(&decoded)
    }

    fn into_pairs(self) -> Vec<(String, String)> {
        self.pairs
            .into_iter()
            .map(|pair| (pair.key, pair.value))
            .collect()
    }
}

struct Scanner<'a> {
    chars: Peekable<Chars<'a>>,
}

impl Scanner<'_> {
    /// Reads the next statement.
    ///
    /// Returns `None` at the end of input and `Some(None)` for a malformed
    /// statement, which is skipped.
    fn next_pair(&mut self) -> Option<Option<Pair>> {
        self.skip_trivia();
        self.chars.peek()?;
        let Some(key) = self.token() else {
            self.skip_statement();
            return Some(None);
        };

        self.skip_trivia();
        if self.chars.peek() != Some(&'=') {
            self.skip_statement();
            return Some(None);
        }
        self.chars.next();

        self.skip_trivia();
        let Some(value) = self.token() else {
            return Some(None);
        };

        self.skip_trivia();
        if self.chars.peek() == Some(&';') {
            self.chars.next();
        }

        Some(Some(Pair {
            key,
            value: value.chars().filter(|c| !matches!(c, '\n' | '\r')).collect(),
        }))
    }

    /// Skips whitespace and comments.
    fn skip_trivia(&mut self) {
        while let Some(&c) = self.chars.peek() {
            if c.is_whitespace() {
                self.chars.next();
                continue;
            }
            if c != '/' {
                return;
            }

            let mut lookahead = self.chars.clone();
            lookahead.next();
            match lookahead.peek() {
                Some(&'/') => {
                    for c in self.chars.by_ref() {
                        if c == '\n' {
                            break;
                        }
                    }
                }
                Some(&'*') => {
                    self.chars.next();
                    self.chars.next();
                    let mut previous = '\0';
                    for c in self.chars.by_ref() {
                        if previous == '*' && c == '/' {
                            break;
                        }
                        previous = c;
                    }
                }
                _ => return,
            }
        }
    }

    /// Consumes the rest of a malformed statement.
    fn skip_statement(&mut self) {
        for c in self.chars.by_ref() {
            if c == ';' || c == '\n' {
                break;
            }
        }
    }

    /// Reads a quoted string or a bare word.
    fn token(&mut self) -> Option<String> {
        match *self.chars.peek()? {
            '"' => {
                self.chars.next();
                Some(self.quoted())
            }
            '=' | ';' => None,
            _ => {
                let mut word = String::new();
                while let Some(&c) = self.chars.peek() {
                    if c.is_whitespace() || c == '=' || c == ';' {
                        break;
                    }
                    word.push(c);
                    self.chars.next();
                }
                Some(word)
            }
        }
    }

    /// Reads the body of a quoted string, the opening quote already consumed.
    fn quoted(&mut self) -> String {
        let mut out = String::new();
        while let Some(c) = self.chars.next() {
            match c {
                '"' => break,
                '\\' => match self.chars.next() {
                    Some('n') => out.push('\n'),
                    Some('r') => out.push('\r'),
                    Some('t') => out.push('\t'),
                    Some('U') | Some('u') => out.push_str(&self.unicode_escape()),
                    Some(other) => out.push(other),
                    None => out.push('\\'),
                },
                c => out.push(c),
            }
        }
        out
    }

    /// Decodes the four hex digits of a `\U` escape.
    fn unicode_escape(&mut self) -> String {
        let mut digits = String::new();
        while digits.len() < 4 {
            match self.chars.peek() {
                Some(c) if c.is_ascii_hexdigit() => {
                    digits.push(*c);
                    self.chars.next();
                }
                _ => break,
            }
        }
        u32::from_str_radix(&digits, 16)
            .ok()
            .and_then(char::from_u32)
            .map(String::from)
            .unwrap_or_else(|| format!("\\U{}", digits))
    }
}
