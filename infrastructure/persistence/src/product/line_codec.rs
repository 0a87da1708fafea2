//! One product per line: `Id;Name;Definition;Price;Image`.
//!
//! Files written by this store start with [`HEADER`]. Inside a field of such a
//! file, `\`, `;`, CR and LF are written as `\\`, `\;`, `\r` and `\n`; an absent
//! Definition or Image is the bare field `\0`, so an empty string survives a
//! round trip. Any other backslash pair reads back literally.
//!
//! Files without the header come from the older unescaped writer: a line is
//! split on every `;`, backslashes are plain text and an empty optional field
//! reads back as absent.

use std::str::FromStr;

use bigdecimal::BigDecimal;
use uuid::Uuid;

use business::domain::product::model::Product;

pub const HEADER: &str = "#products v2";

const DELIMITER: char = ';';
const ESCAPE: char = '\\';
const ABSENT: &str = "\\0";
const FIELD_COUNT: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// Unescaped lines, no header.
    Legacy,
    /// Backslash-escaped lines under [`HEADER`].
    Escaped,
}

impl Format {
    /// Picks the format from the first non-blank line of a file.
    pub fn detect(first_line: Option<&str>) -> Self {
        match first_line {
            Some(line) if line.trim_end() == HEADER => Format::Escaped,
            _ => Format::Legacy,
        }
    }
}

pub fn encode(product: &Product) -> String {
    let fields = [
        product.id.to_string(),
        escape(&product.name),
        encode_optional(product.definition.as_deref()),
        product.price.to_string(),
        encode_optional(product.image.as_deref()),
    ];
    fields.join(";")
}

/// Returns `None` when the field count is wrong or the Id or Price does not parse.
pub fn decode(line: &str, format: Format) -> Option<Product> {
    let fields: Vec<Option<String>> = match format {
        Format::Legacy => line.split(DELIMITER).map(legacy_field).collect(),
        Format::Escaped => split_escaped(line).into_iter().map(escaped_field).collect(),
    };
    let [id, name, definition, price, image]: [Option<String>; FIELD_COUNT] =
        fields.try_into().ok()?;

    let id = Uuid::parse_str(&id?).ok()?;
    let price = BigDecimal::from_str(&price?).ok()?;

    Some(Product::from_repository(
        id,
        name.unwrap_or_default(),
        definition,
        price,
        image,
    ))
}

fn encode_optional(value: Option<&str>) -> String {
    value.map_or_else(|| ABSENT.to_string(), escape)
}

fn escape(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            ESCAPE => escaped.push_str("\\\\"),
            DELIMITER => escaped.push_str("\\;"),
            '\n' => escaped.push_str("\\n"),
            '\r' => escaped.push_str("\\r"),
            other => escaped.push(other),
        }
    }
    escaped
}

fn legacy_field(raw: &str) -> Option<String> {
    (!raw.is_empty()).then(|| raw.to_string())
}

fn escaped_field(raw: &str) -> Option<String> {
    (raw != ABSENT).then(|| unescape(raw))
}

/// Splits on delimiters that are not preceded by an escape.
fn split_escaped(line: &str) -> Vec<&str> {
    let mut fields = Vec::with_capacity(FIELD_COUNT);
    let mut start = 0;
    let mut chars = line.char_indices();

    while let Some((index, c)) = chars.next() {
        match c {
            ESCAPE => {
                chars.next();
            }
            DELIMITER => {
                fields.push(&line[start..index]);
                start = index + c.len_utf8();
            }
            _ => {}
        }
    }
    fields.push(&line[start..]);

    fields
}

fn unescape(raw: &str) -> String {
    let mut value = String::with_capacity(raw.len());
    let mut chars = raw.chars();

    while let Some(c) = chars.next() {
        if c != ESCAPE {
            value.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => value.push('\n'),
            Some('r') => value.push('\r'),
            Some(literal @ (ESCAPE | DELIMITER)) => value.push(literal),
            Some(other) => {
                value.push(ESCAPE);
                value.push(other);
            }
            None => value.push(ESCAPE),
        }
    }
    value
}
