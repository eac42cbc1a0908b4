//! Forward-only XML cursor shared by the converter tree.
//!
//! The cursor wraps a namespace-aware `quick_xml` reader and keeps the stack
//! of currently open elements, so converters can check that every element
//! they were handed has been consumed up to its closing tag.

use std::fs::File;
use std::io::{BufRead, BufReader, Cursor};
use std::path::Path;
use std::str::FromStr;

use chrono::NaiveDateTime;
use quick_xml::events::Event;
use quick_xml::name::ResolveResult;
use quick_xml::NsReader;

use super::name::ElementName;
use super::values::{parse_bool, parse_datetime};
use crate::diagnostics::{Diagnostic, DiagnosticSink};
use crate::error::{ImportError, Result};

/// One token of the XML stream as seen by converters.
///
/// Comments, processing instructions and declarations are never surfaced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    Start(ElementName),
    End(ElementName),
    Text(String),
    Eof,
}

/// Forward-only cursor over one XML document.
pub struct XmlCursor {
    reader: NsReader<Box<dyn BufRead + Send>>,
    buf: Vec<u8>,
    open: Vec<ElementName>,
    /// Reader offset before the last opening tag was read. Whitespace
    /// dropped by `trim_text` lies between it and the `<`.
    position: u64,
}

impl XmlCursor {
    /// Create a cursor over any buffered reader.
    pub fn from_reader(reader: impl BufRead + Send + 'static) -> Self {
        let boxed: Box<dyn BufRead + Send> = Box::new(reader);
        let mut reader = NsReader::from_reader(boxed);
        let config = reader.config_mut();
        config.trim_text(true);
        // `<a/>` becomes a start/end pair so every element has a closing tag
        config.expand_empty_elements = true;

        Self {
            reader,
            buf: Vec::new(),
            open: Vec::new(),
            position: 0,
        }
    }

    /// Create a cursor over an in-memory document.
    ///
    /// # Examples
    /// ```
    /// use ruian_import::xml::{Token, XmlCursor};
    ///
    /// let mut cursor = XmlCursor::from_xml("<a>text</a>");
    /// assert!(matches!(cursor.next_token().unwrap(), Token::Start(_)));
    /// assert_eq!(cursor.read_text().unwrap(), "text");
    /// assert_eq!(cursor.next_token().unwrap(), Token::Eof);
    /// ```
    #[must_use]
    pub fn from_xml(xml: &str) -> Self {
        Self::from_reader(Cursor::new(xml.as_bytes().to_vec()))
    }

    /// Open a document file.
    pub fn open(path: &Path) -> Result<Self> {
        let file = File::open(path)?;
        Ok(Self::from_reader(BufReader::new(file)))
    }

    /// Number of currently open elements.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.open.len()
    }

    /// Advance to the next token.
    ///
    /// Reaching the end of the stream while elements are open is an error.
    pub fn next_token(&mut self) -> Result<Token> {
        loop {
            self.buf.clear();
            let position = self.reader.buffer_position() as u64;
            let (resolved, event) = self
                .reader
                .read_resolved_event_into(&mut self.buf)
                .map_err(|source| ImportError::Xml { position, source })?;

            match event {
                Event::Start(start) => {
                    let namespace_uri = match resolved {
                        ResolveResult::Bound(ns) => String::from_utf8_lossy(ns.as_ref()).into_owned(),
                        ResolveResult::Unbound => String::new(),
                        ResolveResult::Unknown(prefix) => {
                            return Err(ImportError::UnboundPrefix {
                                prefix: String::from_utf8_lossy(&prefix).into_owned(),
                                position,
                            })
                        }
                    };
                    let local_name = String::from_utf8_lossy(start.local_name().as_ref()).into_owned();
                    let name = ElementName::new(namespace_uri, local_name);

                    self.position = position;
                    self.open.push(name.clone());
                    return Ok(Token::Start(name));
                }
                Event::End(_) => {
                    // quick_xml already rejects mismatched closing tags
                    let name = self
                        .open
                        .pop()
                        .ok_or(ImportError::UnmatchedEndTag { position })?;
                    return Ok(Token::End(name));
                }
                Event::Text(text) => {
                    let text = text
                        .unescape()
                        .map_err(|err| ImportError::Xml {
                            position,
                            source: err.into(),
                        })?
                        .into_owned();
                    return Ok(Token::Text(text));
                }
                Event::CData(data) => {
                    return Ok(Token::Text(String::from_utf8_lossy(&data).into_owned()));
                }
                Event::Eof => {
                    return match self.open.last() {
                        Some(element) => Err(ImportError::UnexpectedEof {
                            element: element.to_string(),
                        }),
                        None => Ok(Token::Eof),
                    };
                }
                _ => {}
            }
        }
    }

    /// Advance to the next child element of the element open at `depth`.
    ///
    /// Returns `None` once that element's closing tag has been consumed.
    /// Text between children is ignored. Fails if the previous child was
    /// not consumed up to its own closing tag.
    pub fn next_child(&mut self, depth: usize) -> Result<Option<ElementName>> {
        if self.open.len() != depth {
            return Err(ImportError::UnconsumedElement {
                element: self.open.last().map(ToString::to_string).unwrap_or_default(),
            });
        }

        loop {
            match self.next_token()? {
                Token::Start(name) => return Ok(Some(name)),
                Token::End(_) => return Ok(None),
                Token::Text(_) => {}
                Token::Eof => {
                    return Err(ImportError::UnexpectedEof {
                        element: "document".to_string(),
                    })
                }
            }
        }
    }

    /// Read the text of the current element up to its closing tag.
    pub fn read_text(&mut self) -> Result<String> {
        let element = self.current_name();
        let mut text = String::new();

        loop {
            match self.next_token()? {
                Token::Text(part) => text.push_str(&part),
                Token::End(_) => return Ok(text),
                Token::Start(_) => {
                    return Err(ImportError::NonTextContent {
                        element,
                        position: self.position,
                    })
                }
                Token::Eof => return Err(ImportError::UnexpectedEof { element }),
            }
        }
    }

    /// Read the current element's text and parse it with `FromStr`.
    pub fn read_parsed<T>(&mut self) -> Result<T>
    where
        T: FromStr,
        T::Err: std::fmt::Display,
    {
        self.read_with(|text| text.trim().parse::<T>().map_err(|err| err.to_string()))
    }

    /// Read the current element's text as an `xs:boolean`.
    pub fn read_bool(&mut self) -> Result<bool> {
        self.read_with(parse_bool)
    }

    /// Read the current element's text as an `xs:dateTime`.
    pub fn read_datetime(&mut self) -> Result<NaiveDateTime> {
        self.read_with(parse_datetime)
    }

    /// Consume the current element and its whole subtree.
    pub fn skip_element(&mut self) -> Result<()> {
        let depth = self.open.len();
        loop {
            match self.next_token()? {
                Token::End(_) if self.open.len() < depth => return Ok(()),
                Token::Eof => {
                    return Err(ImportError::UnexpectedEof {
                        element: "document".to_string(),
                    })
                }
                _ => {}
            }
        }
    }

    /// Report the current element as unknown and skip its subtree.
    pub fn skip_unknown(&mut self, sink: &mut dyn DiagnosticSink) -> Result<()> {
        if let Some(element) = self.open.last() {
            tracing::debug!(element = %element, position = self.position, "Skipping unknown element");
            sink.record(Diagnostic {
                element: element.clone(),
                position: self.position,
            });
        }
        self.skip_element()
    }

    fn read_with<T>(&mut self, parse: impl FnOnce(&str) -> std::result::Result<T, String>) -> Result<T> {
        let element = self.current_name();
        let position = self.position;
        let text = self.read_text()?;

        parse(&text).map_err(|reason| ImportError::InvalidValue {
            element,
            value: text,
            position,
            reason,
        })
    }

    fn current_name(&self) -> String {
        self.open.last().map(ToString::to_string).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::xml::Namespace;
    use pretty_assertions::assert_eq;

    const COM: &str = "urn:cz:isvs:ruian:schemas:CommonTypy:v1";

    fn start(cursor: &mut XmlCursor) -> ElementName {
        match cursor.next_token().unwrap() {
            Token::Start(name) => name,
            other => panic!("expected start tag, got {other:?}"),
        }
    }

    #[test]
    fn test_tokens_resolve_namespaces() {
        let xml = format!(r#"<com:a xmlns:com="{COM}"><com:b>1</com:b><c/></com:a>"#);
        let mut cursor = XmlCursor::from_xml(&xml);

        assert!(start(&mut cursor).is(Namespace::Common, "a"));
        assert!(start(&mut cursor).is(Namespace::Common, "b"));
        assert_eq!(cursor.next_token().unwrap(), Token::Text("1".to_string()));
        assert!(matches!(cursor.next_token().unwrap(), Token::End(_)));

        let c = start(&mut cursor);
        assert_eq!(c.namespace(), None);
        assert_eq!(c.local_name(), "c");
        assert!(matches!(cursor.next_token().unwrap(), Token::End(_)));
        assert!(matches!(cursor.next_token().unwrap(), Token::End(_)));
        assert_eq!(cursor.next_token().unwrap(), Token::Eof);
    }

    #[test]
    fn test_same_local_name_in_different_namespaces() {
        let xml = format!(
            r#"<r xmlns:a="{COM}" xmlns:b="urn:cz:isvs:ruian:schemas:ObecIntTypy:v1"><a:Kod/><b:Kod/></r>"#
        );
        let mut cursor = XmlCursor::from_xml(&xml);
        start(&mut cursor);

        let first = start(&mut cursor);
        cursor.skip_element().unwrap();
        let second = start(&mut cursor);

        assert_eq!(first.namespace(), Some(Namespace::Common));
        assert_eq!(second.namespace(), Some(Namespace::Obec));
        assert_ne!(first, second);
    }

    #[test]
    fn test_read_text_stops_at_closing_tag() {
        let mut cursor = XmlCursor::from_xml("<r><a>  hello &amp; bye </a><b/></r>");
        start(&mut cursor);
        start(&mut cursor);

        assert_eq!(cursor.read_text().unwrap(), "hello & bye");
        assert_eq!(cursor.depth(), 1);
        assert_eq!(start(&mut cursor).local_name(), "b");
    }

    #[test]
    fn test_read_text_rejects_child_elements() {
        let mut cursor = XmlCursor::from_xml("<a>x<b/></a>");
        start(&mut cursor);

        let err = cursor.read_text().unwrap_err();
        assert!(matches!(err, ImportError::NonTextContent { .. }));
    }

    #[test]
    fn test_read_parsed_reports_element_and_position() {
        let mut cursor = XmlCursor::from_xml("<r><Kod>abc</Kod></r>");
        start(&mut cursor);
        start(&mut cursor);

        match cursor.read_parsed::<i32>().unwrap_err() {
            ImportError::InvalidValue {
                element,
                value,
                position,
                ..
            } => {
                assert_eq!(element, "Kod");
                assert_eq!(value, "abc");
                assert_eq!(position, 3);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_position_precedes_indented_tag() {
        let xml = "<r>\n    <unknown/></r>";
        let mut cursor = XmlCursor::from_xml(xml);
        let mut sink: Vec<Diagnostic> = Vec::new();
        start(&mut cursor);
        start(&mut cursor);

        cursor.skip_unknown(&mut sink).unwrap();

        let tag = xml.find("<unknown").unwrap() as u64;
        assert!(sink[0].position >= 3);
        assert!(sink[0].position <= tag);
    }

    #[test]
    fn test_skip_element_consumes_subtree() {
        let mut cursor = XmlCursor::from_xml("<r><x><y><z>1</z></y><y/></x><next/></r>");
        start(&mut cursor);
        start(&mut cursor);

        cursor.skip_element().unwrap();
        assert_eq!(cursor.depth(), 1);
        assert_eq!(start(&mut cursor).local_name(), "next");
    }

    #[test]
    fn test_skip_unknown_records_diagnostic() {
        let mut cursor = XmlCursor::from_xml("<r><unknown><deep/></unknown></r>");
        let mut sink: Vec<Diagnostic> = Vec::new();
        start(&mut cursor);
        start(&mut cursor);

        cursor.skip_unknown(&mut sink).unwrap();

        assert_eq!(sink.len(), 1);
        assert_eq!(sink[0].element.local_name(), "unknown");
        assert_eq!(sink[0].position, 3);
        assert_eq!(cursor.next_child(1).unwrap(), None);
    }

    #[test]
    fn test_next_child_detects_unconsumed_child() {
        let mut cursor = XmlCursor::from_xml("<r><a>1</a></r>");
        start(&mut cursor);
        assert!(cursor.next_child(1).unwrap().is_some());

        let err = cursor.next_child(1).unwrap_err();
        assert!(matches!(err, ImportError::UnconsumedElement { .. }));
    }

    #[test]
    fn test_truncated_document_is_fatal() {
        let mut cursor = XmlCursor::from_xml("<r><a>1</a>");
        start(&mut cursor);
        start(&mut cursor);
        cursor.read_text().unwrap();

        let err = cursor.next_child(1).unwrap_err();
        assert!(matches!(err, ImportError::UnexpectedEof { .. }));
    }

    #[test]
    fn test_unbound_prefix_is_fatal() {
        let mut cursor = XmlCursor::from_xml("<x:r/>");
        let err = cursor.next_token().unwrap_err();
        assert!(matches!(err, ImportError::UnboundPrefix { .. }));
    }
}
