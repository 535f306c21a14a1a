use std::borrow::Cow;
use std::io::{self, Write};
use thiserror::Error;

/// Column at which loop rows are folded onto a new line.
pub const DEFAULT_LINE_WIDTH: usize = 80;

const RESERVED_WORDS: [&str; 4] = ["save_", "loop_", "stop_", "global_"];

#[derive(Debug, Error)]
pub enum CifError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Row for loop '{category}' is missing column '{column}'")]
    MissingColumn { category: String, column: String },
    #[error("Loop '{category}' has no column named '{column}'")]
    UnknownColumn { category: String, column: String },
    #[error("Row for loop '{category}' supplies column '{column}' more than once")]
    DuplicateColumn { category: String, column: String },
    #[error("Value of '{category}.{column}' has a line starting with ';' and cannot be a text field")]
    SemicolonLine { category: String, column: String },
}

/// A single value written to a category or loop.
///
/// `Omitted` marks a field that does not apply (`.`), while `Unknown` marks a field whose
/// value was not determined (`?`). The two are never interchangeable.
#[derive(Debug, Clone, PartialEq)]
pub enum CifValue {
    Text(String),
    Int(i64),
    UInt(u64),
    Float(f64),
    Bool(bool),
    Omitted,
    Unknown,
}

impl From<&str> for CifValue {
    fn from(value: &str) -> Self {
        CifValue::Text(value.to_string())
    }
}

impl From<String> for CifValue {
    fn from(value: String) -> Self {
        CifValue::Text(value)
    }
}

impl From<&String> for CifValue {
    fn from(value: &String) -> Self {
        CifValue::Text(value.clone())
    }
}

impl From<i64> for CifValue {
    fn from(value: i64) -> Self {
        CifValue::Int(value)
    }
}

impl From<u64> for CifValue {
    fn from(value: u64) -> Self {
        CifValue::UInt(value)
    }
}

impl From<usize> for CifValue {
    fn from(value: usize) -> Self {
        CifValue::UInt(value as u64)
    }
}

impl From<f64> for CifValue {
    fn from(value: f64) -> Self {
        CifValue::Float(value)
    }
}

impl From<bool> for CifValue {
    fn from(value: bool) -> Self {
        CifValue::Bool(value)
    }
}

impl<T: Into<CifValue>> From<Option<T>> for CifValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(CifValue::Omitted, Into::into)
    }
}

enum Token<'v> {
    Inline(Cow<'v, str>),
    TextField(&'v str),
}

impl CifValue {
    fn token(&self) -> Token<'_> {
        match self {
            CifValue::Omitted => Token::Inline(Cow::Borrowed(".")),
            CifValue::Unknown => Token::Inline(Cow::Borrowed("?")),
            CifValue::Int(v) => Token::Inline(Cow::Owned(v.to_string())),
            CifValue::UInt(v) => Token::Inline(Cow::Owned(v.to_string())),
            CifValue::Float(v) => Token::Inline(Cow::Owned(format!("{:.3}", v))),
            CifValue::Bool(v) => Token::Inline(Cow::Borrowed(if *v { "YES" } else { "NO" })),
            CifValue::Text(text) => quote_text(text),
        }
    }
}

fn needs_quoting(text: &str) -> bool {
    let lower = text.to_ascii_lowercase();
    text.is_empty()
        || text == "."
        || text == "?"
        || text.starts_with(['_', '#', '$', ';', '[', ']'])
        || lower.starts_with("data_")
        || RESERVED_WORDS.contains(&lower.as_str())
        || text
            .chars()
            .any(|c| c.is_whitespace() || c == '\'' || c == '"')
}

fn quote_text(text: &str) -> Token<'_> {
    if text.contains(['\n', '\r']) {
        return Token::TextField(text);
    }
    if !needs_quoting(text) {
        return Token::Inline(Cow::Borrowed(text));
    }
    match (text.contains('\''), text.contains('"')) {
        (false, _) => Token::Inline(Cow::Owned(format!("'{}'", text))),
        (true, false) => Token::Inline(Cow::Owned(format!("\"{}\"", text))),
        (true, true) => Token::TextField(text),
    }
}

/// A line of a text field that starts with `;` would close the field early.
fn check_text_field(category: &str, column: &str, value: &CifValue) -> Result<(), CifError> {
    match value {
        CifValue::Text(text) if text.contains("\n;") || text.contains("\r;") => {
            Err(CifError::SemicolonLine {
                category: category.to_string(),
                column: column.to_string(),
            })
        }
        _ => Ok(()),
    }
}

fn write_text_field(out: &mut dyn Write, text: &str) -> io::Result<()> {
    write!(out, ";{}", text)?;
    if !text.ends_with('\n') {
        writeln!(out)?;
    }
    writeln!(out, ";")
}

/// Block name used when nothing of the requested name survives sanitizing.
pub const FALLBACK_BLOCK_NAME: &str = "model";

/// Strips every character that may not appear in a data block name.
pub fn data_block_name(name: &str) -> String {
    let sanitized: String = name
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_')
        .collect();
    if sanitized.is_empty() {
        FALLBACK_BLOCK_NAME.to_string()
    } else {
        sanitized
    }
}

/// Writes syntactically valid CIF to an append-only sink.
///
/// The writer knows nothing about the mmCIF dictionary; it only formats categories and
/// loops. Which categories exist and what goes in them is decided by the dumpers.
pub struct CifWriter<'w> {
    out: &'w mut dyn Write,
    line_width: usize,
}

impl<'w> CifWriter<'w> {
    pub fn new(out: &'w mut dyn Write) -> Self {
        Self {
            out,
            line_width: DEFAULT_LINE_WIDTH,
        }
    }

    pub fn with_line_width(mut self, line_width: usize) -> Self {
        self.line_width = line_width;
        self
    }

    /// Starts a new data block named after `name`.
    pub fn write_data_block(&mut self, name: &str) -> Result<(), CifError> {
        writeln!(self.out, "data_{}", data_block_name(name))?;
        Ok(())
    }

    /// Writes a singleton category as one `category.key value` line per field.
    pub fn write_category(
        &mut self,
        category: &str,
        fields: &[(&str, CifValue)],
    ) -> Result<(), CifError> {
        for (key, value) in fields {
            check_text_field(category, key, value)?;
        }
        for (key, value) in fields {
            match value.token() {
                Token::Inline(token) => writeln!(self.out, "{}.{} {}", category, key, token)?,
                Token::TextField(text) => {
                    writeln!(self.out, "{}.{}", category, key)?;
                    write_text_field(self.out, text)?;
                }
            }
        }
        Ok(())
    }

    /// Writes a loop whose rows are supplied by `body`.
    ///
    /// The loop header is only written once the first row arrives, so a loop without rows
    /// leaves no trace in the output.
    ///
    /// # Return
    ///
    /// The number of rows written.
    ///
    /// # Errors
    ///
    /// Propagates any error returned by `body`, and I/O failures of the sink.
    pub fn write_loop<F, E>(&mut self, category: &str, columns: &[&str], body: F) -> Result<usize, E>
    where
        F: FnOnce(&mut LoopWriter<'_>) -> Result<(), E>,
        E: From<CifError>,
    {
        let mut loop_writer = LoopWriter {
            out: &mut *self.out,
            line_width: self.line_width,
            category,
            columns,
            rows: 0,
        };
        body(&mut loop_writer)?;
        let rows = loop_writer.rows;
        if rows > 0 {
            writeln!(self.out, "#").map_err(CifError::from)?;
        }
        Ok(rows)
    }

    pub fn flush(&mut self) -> Result<(), CifError> {
        self.out.flush()?;
        Ok(())
    }
}

/// Row sink handed out by [`CifWriter::write_loop`].
pub struct LoopWriter<'l> {
    out: &'l mut dyn Write,
    line_width: usize,
    category: &'l str,
    columns: &'l [&'l str],
    rows: usize,
}

impl LoopWriter<'_> {
    /// Writes one row; `values` must name every declared column exactly once.
    pub fn row(&mut self, values: &[(&str, CifValue)]) -> Result<(), CifError> {
        let ordered = self.order_values(values)?;
        for (column, value) in self.columns.iter().zip(&ordered) {
            check_text_field(self.category, column, value)?;
        }
        if self.rows == 0 {
            self.write_header()?;
        }

        let mut column = 0;
        for value in ordered {
            match value.token() {
                Token::Inline(token) => {
                    if column > 0 {
                        if column + token.len() + 1 > self.line_width {
                            writeln!(self.out)?;
                            column = 0;
                        } else {
                            write!(self.out, " ")?;
                            column += 1;
                        }
                    }
                    write!(self.out, "{}", token)?;
                    column += token.len();
                }
                Token::TextField(text) => {
                    if column > 0 {
                        writeln!(self.out)?;
                    }
                    write_text_field(self.out, text)?;
                    column = 0;
                }
            }
        }
        if column > 0 {
            writeln!(self.out)?;
        }
        self.rows += 1;
        Ok(())
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    fn write_header(&mut self) -> io::Result<()> {
        writeln!(self.out, "#")?;
        writeln!(self.out, "loop_")?;
        for column in self.columns {
            writeln!(self.out, "{}.{}", self.category, column)?;
        }
        Ok(())
    }

    fn order_values<'v>(
        &self,
        values: &'v [(&str, CifValue)],
    ) -> Result<Vec<&'v CifValue>, CifError> {
        for (i, (name, _)) in values.iter().enumerate() {
            if !self.columns.contains(name) {
                return Err(CifError::UnknownColumn {
                    category: self.category.to_string(),
                    column: name.to_string(),
                });
            }
            if values[..i].iter().any(|(previous, _)| previous == name) {
                return Err(CifError::DuplicateColumn {
                    category: self.category.to_string(),
                    column: name.to_string(),
                });
            }
        }
        self.columns
            .iter()
            .map(|column| {
                values
                    .iter()
                    .find(|(name, _)| name == column)
                    .map(|(_, value)| value)
                    .ok_or_else(|| CifError::MissingColumn {
                        category: self.category.to_string(),
                        column: column.to_string(),
                    })
            })
            .collect()
    }
}
