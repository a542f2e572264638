use crate::ParseError;
use quick_xml::events::{BytesRef, BytesStart, BytesText};
use quick_xml::reader::Reader;
use std::borrow::Cow;

/// The parts of a start tag the TOC parser cares about.
#[derive(Debug, Clone, Default)]
pub struct Element {
    pub tag: String,
    pub classes: Vec<String>,
    pub href: Option<String>,
    pub aria_hidden: bool,
}

impl Element {
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }
}

/// HTML elements that never have a closing tag.
pub fn is_void(tag: &str) -> bool {
    matches!(
        tag,
        "br" | "hr" | "img" | "wbr" | "input" | "meta" | "link" | "source"
    )
}

pub fn position(reader: &Reader<&[u8]>) -> u64 {
    reader.buffer_position() as u64
}

pub fn decode_tag_name(reader: &Reader<&[u8]>, name: &[u8]) -> Result<String, ParseError> {
    let decoded = reader
        .decoder()
        .decode(name)
        .map_err(|err| ParseError::markup(err, position(reader)))?;
    Ok(decoded.to_ascii_lowercase())
}

pub fn element_from_start(
    reader: &Reader<&[u8]>,
    start: &BytesStart<'_>,
) -> Result<Element, ParseError> {
    let mut element = Element {
        tag: decode_tag_name(reader, start.name().as_ref())?,
        ..Element::default()
    };

    for attr in start.html_attributes().flatten() {
        let key = match reader.decoder().decode(attr.key.as_ref()) {
            Ok(key) => key.to_ascii_lowercase(),
            Err(_) => continue,
        };
        let value = match attr.decode_and_unescape_value(reader.decoder()) {
            Ok(value) => value.into_owned(),
            // unknown HTML entities are not errors in a browser either
            Err(_) => match reader.decoder().decode(&attr.value) {
                Ok(value) => value.into_owned(),
                Err(_) => continue,
            },
        };
        match key.as_str() {
            "class" => {
                element.classes = value.split_whitespace().map(str::to_string).collect();
            }
            "href" => element.href = Some(value),
            "aria-hidden" => element.aria_hidden = value == "true",
            _ => {}
        }
    }

    Ok(element)
}

pub fn decode_text<'a>(
    reader: &Reader<&[u8]>,
    text: &'a BytesText<'_>,
) -> Result<Cow<'a, str>, ParseError> {
    text.decode()
        .map_err(|err| ParseError::markup(err, position(reader)))
}

/// Expands an entity reference. Names XML does not know (`&nbsp;`, ...) are
/// kept as written.
pub fn decode_entity(reader: &Reader<&[u8]>, entity: &BytesRef<'_>) -> Result<String, ParseError> {
    let name = entity
        .decode()
        .map_err(|err| ParseError::markup(err, position(reader)))?;
    let raw = format!("&{};", name);
    Ok(match quick_xml::escape::unescape(&raw) {
        Ok(text) => text.into_owned(),
        Err(_) => match name.as_ref() {
            "nbsp" => "\u{a0}".to_string(),
            _ => raw,
        },
    })
}

/// Collapses runs of whitespace the way a browser lays out inline text.
pub fn collapse_whitespace(text: &str) -> String {
    text.split_ascii_whitespace().collect::<Vec<&str>>().join(" ")
}
