//! Purpose: Runtime decode entrypoints from text, bytes, or readers into a `Dataset`.
//! Exports: `from_str`, `from_slice`, `from_reader`, `ParseFailureCategory`, `categorize_error`, `hint_for_error`.
//! Role: Parser boundary that owns serde_json usage and maps its failures to crate errors.
//! Invariants: The whole document is consumed; trailing non-whitespace is malformed input.
//! Invariants: Failures inside a recognized field name that field; reader failures are `Io`.
use crate::core::collect::{Collector, Field};
use crate::core::dataset::Dataset;
use crate::core::error::{Error, ErrorKind};
use crate::core::link::link;
use serde::de::DeserializeSeed;
use serde_json::error::Category;
use std::io::Read;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum ParseFailureCategory {
    Syntax,
    Eof,
    Data,
    Io,
}

impl ParseFailureCategory {
    fn label(self) -> &'static str {
        match self {
            ParseFailureCategory::Syntax => "syntax",
            ParseFailureCategory::Eof => "eof",
            ParseFailureCategory::Data => "data",
            ParseFailureCategory::Io => "io",
        }
    }
}

pub(crate) fn categorize_error(err: &serde_json::Error) -> ParseFailureCategory {
    match err.classify() {
        Category::Io => ParseFailureCategory::Io,
        Category::Syntax => ParseFailureCategory::Syntax,
        Category::Data => ParseFailureCategory::Data,
        Category::Eof => ParseFailureCategory::Eof,
    }
}

pub(crate) fn hint_for_error(err: &serde_json::Error, context: &str) -> String {
    let category = categorize_error(err);
    let advice = match category {
        ParseFailureCategory::Syntax => "The document is not valid JSON.",
        ParseFailureCategory::Eof => "The document ended early; check for truncation.",
        ParseFailureCategory::Data => "The JSON is valid but a value has the wrong shape.",
        ParseFailureCategory::Io => "The input could not be read.",
    };
    format!(
        "{advice} (parse category: {}, context: {context}, line {}, column {})",
        category.label(),
        err.line(),
        err.column()
    )
}

pub(crate) fn from_str(input: &str) -> Result<Dataset, Error> {
    decode(serde_json::Deserializer::from_str(input))
}

pub(crate) fn from_slice(input: &[u8]) -> Result<Dataset, Error> {
    decode(serde_json::Deserializer::from_slice(input))
}

pub(crate) fn from_reader<R: Read>(reader: R) -> Result<Dataset, Error> {
    decode(serde_json::Deserializer::from_reader(reader))
}

fn decode<'de, R>(mut deserializer: serde_json::Deserializer<R>) -> Result<Dataset, Error>
where
    R: serde_json::de::Read<'de>,
{
    let mut failed = None;
    let raw = Collector::new(&mut failed)
        .deserialize(&mut deserializer)
        .map_err(|err| decode_error(err, failed))?;
    deserializer.end().map_err(|err| decode_error(err, None))?;
    link(raw)
}

fn decode_error(err: serde_json::Error, failed: Option<Field>) -> Error {
    if categorize_error(&err) == ParseFailureCategory::Io {
        return Error::new(ErrorKind::Io)
            .with_message("failed to read input")
            .with_source(err);
    }
    match failed {
        Some(field) => Error::malformed(field.as_str())
            .with_hint(hint_for_error(&err, field.as_str()))
            .with_source(err),
        None => Error::new(ErrorKind::MalformedInput)
            .with_message("input is not a JSON-stat dataset object")
            .with_hint(hint_for_error(&err, "document"))
            .with_source(err),
    }
}
