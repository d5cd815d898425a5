//! Statement splitting and MySQL parsing.
//!
//! The input text is cut into statements on `;` terminators that sit outside
//! string literals, quoted identifiers and comments. Each piece is handed to
//! `sqlparser` on its own so every parsed statement keeps the exact source
//! text it came from.

use crate::error::GenerateError;
use sqlparser::ast::{Ident, ObjectName, Statement};
use sqlparser::dialect::MySqlDialect;
use sqlparser::parser::{Parser as SqlParser, ParserError};

/// A slice of the input holding one statement, terminator included.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatementSpan<'a> {
    pub text: &'a str,
    /// Byte offset of `text` within the input
    pub offset: usize,
    /// 1-based line of the first character
    pub line: usize,
    /// 1-based column of the first character
    pub column: usize,
}

impl StatementSpan<'_> {
    /// Statement text shifted so that parser locations match the full input
    fn positioned_text(&self) -> String {
        let mut padded = String::with_capacity(self.line + self.column + self.text.len());
        padded.extend(std::iter::repeat('\n').take(self.line - 1));
        padded.extend(std::iter::repeat(' ').take(self.column - 1));
        padded.push_str(self.text);
        padded
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LexState {
    Normal,
    SingleQuote,
    DoubleQuote,
    Backtick,
    LineComment,
    BlockComment,
}

/// Iterator over the statements of a SQL script.
pub struct StatementSplitter<'a> {
    sql: &'a str,
    pos: usize,
    line: usize,
    column: usize,
}

impl<'a> StatementSplitter<'a> {
    pub fn new(sql: &'a str) -> Self {
        Self {
            sql,
            pos: 0,
            line: 1,
            column: 1,
        }
    }

    /// Byte index just past the terminator of the statement starting at `start`
    fn statement_end(&self, start: usize) -> usize {
        let bytes = self.sql.as_bytes();
        let mut state = LexState::Normal;
        let mut escaped = false;
        let mut i = start;

        while i < bytes.len() {
            let b = bytes[i];
            let next = bytes.get(i + 1).copied();

            match state {
                LexState::Normal => match b {
                    b'\'' => state = LexState::SingleQuote,
                    b'"' => state = LexState::DoubleQuote,
                    b'`' => state = LexState::Backtick,
                    b'#' => state = LexState::LineComment,
                    b'-' if next == Some(b'-') => {
                        state = LexState::LineComment;
                        i += 1;
                    }
                    b'/' if next == Some(b'*') => {
                        state = LexState::BlockComment;
                        i += 1;
                    }
                    b';' => return i + 1,
                    _ => {}
                },
                LexState::SingleQuote | LexState::DoubleQuote => {
                    let quote = if state == LexState::SingleQuote {
                        b'\''
                    } else {
                        b'"'
                    };
                    if escaped {
                        escaped = false;
                    } else if b == b'\\' {
                        escaped = true;
                    } else if b == quote {
                        state = LexState::Normal;
                    }
                }
                LexState::Backtick => {
                    if b == b'`' {
                        state = LexState::Normal;
                    }
                }
                LexState::LineComment => {
                    if b == b'\n' {
                        state = LexState::Normal;
                    }
                }
                LexState::BlockComment => {
                    if b == b'*' && next == Some(b'/') {
                        state = LexState::Normal;
                        i += 1;
                    }
                }
            }
            i += 1;
        }

        bytes.len()
    }

    fn advance_position(&mut self, text: &str) {
        for ch in text.chars() {
            if ch == '\n' {
                self.line += 1;
                self.column = 1;
            } else {
                self.column += 1;
            }
        }
    }
}

impl<'a> Iterator for StatementSplitter<'a> {
    type Item = StatementSpan<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        while self.pos < self.sql.len() {
            let start = self.pos;
            let end = self.statement_end(start);
            let text = &self.sql[start..end];
            let span = StatementSpan {
                text,
                offset: start,
                line: self.line,
                column: self.column,
            };

            self.advance_position(text);
            self.pos = end;

            if !text.trim().is_empty() {
                return Some(span);
            }
        }
        None
    }
}

/// One parsed statement and the source text it was parsed from
#[derive(Debug, Clone)]
pub struct ParsedStatement {
    pub statement: Statement,
    pub source: String,
}

/// The parser's output normalized to a sequence of statements.
///
/// A lone statement converts into a one-element sequence, so consumers never
/// branch on the single/many shape.
#[derive(Debug, Clone, Default)]
pub struct ParsedSql {
    statements: Vec<ParsedStatement>,
}

impl ParsedSql {
    pub fn len(&self) -> usize {
        self.statements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ParsedStatement> {
        self.statements.iter()
    }
}

impl From<ParsedStatement> for ParsedSql {
    fn from(statement: ParsedStatement) -> Self {
        Self {
            statements: vec![statement],
        }
    }
}

impl From<Vec<ParsedStatement>> for ParsedSql {
    fn from(statements: Vec<ParsedStatement>) -> Self {
        Self { statements }
    }
}

impl<'a> IntoIterator for &'a ParsedSql {
    type Item = &'a ParsedStatement;
    type IntoIter = std::slice::Iter<'a, ParsedStatement>;

    fn into_iter(self) -> Self::IntoIter {
        self.statements.iter()
    }
}

/// Parse a MySQL script into statements.
///
/// Any statement that fails to parse fails the whole call; the error message
/// carries the line and column within `sql`.
pub fn parse_sql(sql: &str) -> Result<ParsedSql, GenerateError> {
    let sql = sql.strip_prefix('\u{feff}').unwrap_or(sql);
    let dialect = MySqlDialect {};
    let mut statements = Vec::new();

    for span in StatementSplitter::new(sql) {
        let parsed = match SqlParser::parse_sql(&dialect, span.text) {
            Ok(parsed) => parsed,
            Err(_) => {
                // Re-parse with padding so the reported location is absolute
                let err = SqlParser::parse_sql(&dialect, &span.positioned_text())
                    .err()
                    .unwrap_or_else(|| {
                        ParserError::ParserError(format!(
                            "invalid statement at Line: {}, Column: {}",
                            span.line, span.column
                        ))
                    });
                return Err(GenerateError::Parse {
                    message: parser_error_message(err),
                });
            }
        };

        statements.extend(parsed.into_iter().map(|statement| ParsedStatement {
            statement,
            source: span.text.to_string(),
        }));
    }

    tracing::debug!(count = statements.len(), "parsed statements");
    Ok(ParsedSql { statements })
}

fn parser_error_message(err: ParserError) -> String {
    match err {
        ParserError::TokenizerError(msg) | ParserError::ParserError(msg) => msg,
        other => other.to_string(),
    }
}

/// Plain name of an identifier, quotes stripped
pub fn ident_name(ident: &Ident) -> String {
    ident.value.clone()
}

/// Table part of a possibly schema-qualified name
pub fn object_table_name(name: &ObjectName) -> Option<String> {
    name.0
        .last()
        .map(ident_name)
        .filter(|name| !name.is_empty())
}
