//! CSV output configuration.

/// Whether fields are wrapped in the quote character.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Quoting {
    /// Quote every field, including the header
    Always,
    /// Never quote; special characters must be escaped
    Never,
}

/// Delimiter, quote and escape characters for the CSV sink.
///
/// Each character is a single ASCII byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutputConfig {
    /// Field delimiter
    pub delimiter: u8,
    /// Quote character; `None` disables quoting
    pub quote: Option<u8>,
    /// Escape character, only consulted when quoting is disabled
    pub escape: Option<u8>,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            delimiter: b',',
            quote: Some(b'"'),
            escape: None,
        }
    }
}

impl OutputConfig {
    /// Quoting mode implied by the quote character.
    pub const fn quoting(&self) -> Quoting {
        match self.quote {
            Some(_) => Quoting::Always,
            None => Quoting::Never,
        }
    }

    /// Builder method to set the delimiter.
    pub const fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Builder method to set or clear the quote character.
    pub const fn with_quote(mut self, quote: Option<u8>) -> Self {
        self.quote = quote;
        self
    }

    /// Builder method to set or clear the escape character.
    pub const fn with_escape(mut self, escape: Option<u8>) -> Self {
        self.escape = escape;
        self
    }
}

/// Parses a CSV control character given on the command line.
///
/// Returns `None` for the empty string, which callers treat as "disabled".
///
/// # Errors
/// Returns a configuration error unless `value` is empty or exactly one
/// ASCII character.
pub fn parse_csv_char(name: &str, value: &str) -> crate::Result<Option<u8>> {
    let invalid = || {
        crate::error::SchemaDumpError::configuration(format!(
            "{name} must be a single ASCII character, got {value:?}"
        ))
    };

    let mut chars = value.chars();
    match (chars.next(), chars.next()) {
        (None, _) => Ok(None),
        (Some(c), None) if c.is_ascii() => u8::try_from(c).map(Some).map_err(|_| invalid()),
        _ => Err(invalid()),
    }
}
