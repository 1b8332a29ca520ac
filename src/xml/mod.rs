//! XML loading
//!
//! Builds an owned, namespace-resolved element tree from text using `quick-xml`.
//! The METS engine only ever navigates this tree; it never sees raw XML.

pub mod element;

pub use element::{Descendants, Name, XmlAttribute, XmlElement, XmlNode};

use crate::error::{MetsError, Result};
use quick_xml::events::{BytesStart, Event};
use quick_xml::name::ResolveResult;
use quick_xml::NsReader;

/// A parsed XML document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlDocument {
    pub root: XmlElement,
}

impl XmlDocument {
    pub fn parse(input: &str) -> Result<Self> {
        let mut reader = NsReader::from_str(input);
        let mut open: Vec<XmlElement> = Vec::new();
        let mut root: Option<XmlElement> = None;

        loop {
            let (resolved, event) = reader.read_resolved_event()?;
            let namespace = namespace_of(resolved);
            match event {
                Event::Start(start) => {
                    open.push(open_element(&reader, namespace, &start)?);
                }
                Event::Empty(start) => {
                    let element = open_element(&reader, namespace, &start)?;
                    close_element(&mut open, &mut root, element)?;
                }
                Event::End(_) => {
                    let element = open
                        .pop()
                        .ok_or_else(|| MetsError::XmlError("unexpected closing tag".to_string()))?;
                    close_element(&mut open, &mut root, element)?;
                }
                Event::Text(text) => {
                    if let Some(parent) = open.last_mut() {
                        parent
                            .children
                            .push(XmlNode::Text(text.unescape()?.into_owned()));
                    }
                }
                Event::CData(data) => {
                    if let Some(parent) = open.last_mut() {
                        let text = String::from_utf8_lossy(&data.into_inner()).into_owned();
                        parent.children.push(XmlNode::Text(text));
                    }
                }
                Event::Eof => break,
                _ => {}
            }
        }

        if let Some(unclosed) = open.last() {
            return Err(MetsError::XmlError(format!(
                "unclosed element: {}",
                unclosed.local_name
            )));
        }

        root.map(|root| XmlDocument { root })
            .ok_or_else(|| MetsError::XmlError("document has no root element".to_string()))
    }

    /// All elements in document order, including the root.
    pub fn descendants(&self) -> impl Iterator<Item = &XmlElement> {
        std::iter::once(&self.root).chain(self.root.descendants())
    }

    pub fn descendants_named(&self, name: Name) -> impl Iterator<Item = &XmlElement> {
        self.descendants().filter(move |el| el.is(name))
    }

    pub fn descendant(&self, name: Name) -> Option<&XmlElement> {
        self.descendants_named(name).next()
    }
}

fn namespace_of(resolved: ResolveResult<'_>) -> Option<String> {
    match resolved {
        ResolveResult::Bound(ns) => Some(String::from_utf8_lossy(ns.as_ref()).into_owned()),
        _ => None,
    }
}

fn open_element<R>(
    reader: &NsReader<R>,
    namespace: Option<String>,
    start: &BytesStart<'_>,
) -> Result<XmlElement> {
    let mut element = XmlElement::new(
        namespace,
        String::from_utf8_lossy(start.local_name().as_ref()).into_owned(),
    );

    for attr in start.attributes() {
        let attr = attr.map_err(|e| MetsError::XmlError(e.to_string()))?;
        let key = attr.key.as_ref();
        if key == b"xmlns" || key.starts_with(b"xmlns:") {
            continue;
        }
        let (resolved, local) = reader.resolve_attribute(attr.key);
        element.attributes.push(XmlAttribute {
            namespace: namespace_of(resolved),
            local_name: String::from_utf8_lossy(local.as_ref()).into_owned(),
            value: attr.unescape_value()?.into_owned(),
        });
    }

    Ok(element)
}

fn close_element(
    open: &mut [XmlElement],
    root: &mut Option<XmlElement>,
    element: XmlElement,
) -> Result<()> {
    match open.last_mut() {
        Some(parent) => parent.children.push(XmlNode::Element(element)),
        None if root.is_none() => *root = Some(element),
        None => {
            return Err(MetsError::XmlError(
                "more than one root element".to_string(),
            ))
        }
    }
    Ok(())
}
