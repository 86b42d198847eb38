//! CSV sink for schema rows.
//!
//! Every record is flushed as soon as it is written, so consumers can start
//! reading before a long dump finishes and rows written before a failure
//! stay on the output.

use crate::adapters::{OutputConfig, Quoting};
use crate::models::{CSV_HEADER, SchemaRow};
use crate::{Result, error::SchemaDumpError};
use std::borrow::Cow;
use std::io::Write;

/// Streams the header and schema rows to a writer as CSV.
pub struct CsvSink<W: Write> {
    writer: csv::Writer<W>,
    config: OutputConfig,
}

impl<W: Write> std::fmt::Debug for CsvSink<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CsvSink")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl<W: Write> CsvSink<W> {
    /// Creates a sink; nothing is written until [`CsvSink::write_header`].
    ///
    /// Records end in CRLF. With a quote character every field is quoted and
    /// embedded quotes are doubled; without one nothing is quoted.
    pub fn new(writer: W, config: &OutputConfig) -> Self {
        let mut builder = csv::WriterBuilder::new();
        builder
            .delimiter(config.delimiter)
            .has_headers(false)
            .terminator(csv::Terminator::CRLF);

        match config.quote {
            Some(quote) => builder
                .quote(quote)
                .quote_style(csv::QuoteStyle::Always)
                .double_quote(true),
            None => builder.quote_style(csv::QuoteStyle::Never),
        };

        Self {
            writer: builder.from_writer(writer),
            config: *config,
        }
    }

    /// Writes the `database,table,column,type` header.
    ///
    /// # Errors
    /// Returns an I/O error if the underlying writer fails.
    pub fn write_header(&mut self) -> Result<()> {
        let header = CSV_HEADER
            .iter()
            .map(|field| self.escape_field(field))
            .collect::<Result<Vec<_>>>()?;
        self.writer.write_record(header.iter().map(|f| f.as_bytes()))?;
        self.flush()
    }

    /// Writes one row and flushes it to the underlying writer.
    ///
    /// # Errors
    /// Returns an encoding error when quoting is disabled and a field holds
    /// the delimiter, the escape character, CR or LF but no escape character
    /// is configured. Nothing is written for that row in that case.
    pub fn write_row(&mut self, row: &SchemaRow) -> Result<()> {
        match self.config.quoting() {
            Quoting::Always => self.writer.serialize(row)?,
            Quoting::Never => {
                let escaped = SchemaRow {
                    database: self.escape_field(&row.database)?.into_owned(),
                    table: self.escape_field(&row.table)?.into_owned(),
                    column: self.escape_field(&row.column)?.into_owned(),
                    column_type: self.escape_field(&row.column_type)?.into_owned(),
                };
                self.writer.serialize(&escaped)?;
            }
        }
        self.flush()
    }

    /// Returns the underlying writer after flushing.
    ///
    /// # Errors
    /// Returns an I/O error if the final flush fails.
    pub fn into_inner(self) -> Result<W> {
        self.writer.into_inner().map_err(|e| {
            SchemaDumpError::io(
                "Failed to flush CSV output",
                std::io::Error::new(e.error().kind(), e.error().to_string()),
            )
        })
    }

    fn flush(&mut self) -> Result<()> {
        self.writer
            .flush()
            .map_err(|e| SchemaDumpError::io("Failed to flush CSV output", e))
    }

    /// Prefixes special characters with the escape character when quoting
    /// is disabled. Quoted output needs no escaping.
    fn escape_field<'a>(&self, field: &'a str) -> Result<Cow<'a, str>> {
        if self.config.quoting() == Quoting::Always {
            return Ok(Cow::Borrowed(field));
        }

        let delimiter = char::from(self.config.delimiter);
        let escape = self.config.escape.map(char::from);
        let needs_escape = |c: char| c == delimiter || c == '\r' || c == '\n' || Some(c) == escape;

        if !field.chars().any(needs_escape) {
            return Ok(Cow::Borrowed(field));
        }

        let Some(escape) = escape else {
            return Err(SchemaDumpError::encoding(
                field,
                "need to escape, but no escapechar set",
            ));
        };

        let mut escaped = String::with_capacity(field.len().saturating_add(2));
        for c in field.chars() {
            if needs_escape(c) {
                escaped.push(escape);
            }
            escaped.push(c);
        }
        Ok(Cow::Owned(escaped))
    }
}
