//! Push-style markup parser for comps catalogs.
//!
//! Walks a document once, left to right, and reports element starts, text
//! and element ends to a [`MarkupHandler`]. No tree is built; everything the
//! caller wants to remember lives in the handler.

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::borrow::Cow;
use thiserror::Error;

/// Receives parser events in document order.
///
/// Text between two tags is delivered as one call, even when the underlying
/// reader splits it (entities, CDATA sections).
pub trait MarkupHandler {
    fn start_element(&mut self, name: &str, attributes: &[(String, String)]);
    fn text(&mut self, text: &str);
    fn end_element(&mut self, name: &str);
}

/// Why a document was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message} (at byte {position})")]
pub struct MarkupError {
    /// Byte offset the reader had reached.
    pub position: u64,
    pub message: String,
}

/// Parse `bytes` and drive `handler` with its events.
///
/// Events already delivered before an error are not retracted; callers that
/// need all-or-nothing semantics should collect into scratch state.
pub fn parse_markup<H: MarkupHandler + ?Sized>(
    bytes: &[u8],
    handler: &mut H,
) -> Result<(), MarkupError> {
    let mut reader = Reader::from_reader(bytes);
    let config = reader.config_mut();
    config.trim_text(false);
    config.check_end_names = true;

    let mut buf = Vec::new();
    let mut open: Vec<String> = Vec::new();
    let mut pending_text = String::new();
    let mut saw_root = false;

    loop {
        let position = reader.buffer_position();
        let fail = |message: String| MarkupError { position, message };

        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) => {
                flush_text(&mut pending_text, open.is_empty(), handler).map_err(fail)?;
                if open.is_empty() && saw_root {
                    return Err(fail("more than one root element".to_string()));
                }
                let (name, attributes) = element_parts(&e).map_err(fail)?;
                handler.start_element(&name, &attributes);
                open.push(name);
                saw_root = true;
            }
            Ok(Event::Empty(e)) => {
                flush_text(&mut pending_text, open.is_empty(), handler).map_err(fail)?;
                if open.is_empty() && saw_root {
                    return Err(fail("more than one root element".to_string()));
                }
                let (name, attributes) = element_parts(&e).map_err(fail)?;
                handler.start_element(&name, &attributes);
                handler.end_element(&name);
                saw_root = true;
            }
            Ok(Event::End(e)) => {
                let name = utf8(e.name().as_ref()).map_err(fail)?.into_owned();
                match open.pop() {
                    Some(expected) if expected == name => {}
                    Some(expected) => {
                        return Err(fail(format!(
                            "element <{}> closed by </{}>",
                            expected, name
                        )))
                    }
                    None => return Err(fail(format!("unexpected closing tag </{}>", name))),
                }
                flush_text(&mut pending_text, false, handler).map_err(fail)?;
                handler.end_element(&name);
            }
            Ok(Event::Text(e)) => {
                let text = e
                    .unescape()
                    .map_err(|err| fail(format!("invalid text: {}", err)))?;
                pending_text.push_str(&text);
            }
            Ok(Event::CData(e)) => {
                let raw = e.into_inner();
                pending_text.push_str(&utf8(&raw).map_err(fail)?);
            }
            Ok(Event::Eof) => {
                if let Some(name) = open.last() {
                    return Err(fail(format!("unclosed element <{}>", name)));
                }
                flush_text(&mut pending_text, true, handler).map_err(fail)?;
                if !saw_root {
                    return Err(fail(
                        "document was empty or contained only whitespace".to_string(),
                    ));
                }
                return Ok(());
            }
            // Declarations, comments, processing instructions and doctypes
            // carry nothing a catalog reader needs.
            Ok(_) => {}
            Err(err) => return Err(fail(err.to_string())),
        }
        buf.clear();
    }
}

fn flush_text<H: MarkupHandler + ?Sized>(
    pending: &mut String,
    outside_root: bool,
    handler: &mut H,
) -> Result<(), String> {
    if pending.is_empty() {
        return Ok(());
    }
    if outside_root {
        if !pending.trim().is_empty() {
            return Err("text outside of the root element".to_string());
        }
    } else {
        handler.text(pending);
    }
    pending.clear();
    Ok(())
}

fn element_parts(e: &BytesStart<'_>) -> Result<(String, Vec<(String, String)>), String> {
    let name = utf8(e.name().as_ref())?.into_owned();
    let mut attributes = Vec::new();
    for attr in e.attributes() {
        let attr = attr.map_err(|err| format!("invalid attribute on <{}>: {}", name, err))?;
        let key = utf8(attr.key.as_ref())?.into_owned();
        let value = attr
            .unescape_value()
            .map_err(|err| format!("invalid value for attribute {}: {}", key, err))?
            .into_owned();
        attributes.push((key, value));
    }
    Ok((name, attributes))
}

fn utf8(bytes: &[u8]) -> Result<Cow<'_, str>, String> {
    std::str::from_utf8(bytes)
        .map(Cow::Borrowed)
        .map_err(|err| format!("invalid UTF-8: {}", err))
}
