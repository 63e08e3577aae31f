//! A small owned XML element tree.
//!
//! BigBlueButton responses are shallow documents of named fields, so the
//! tree only keeps what lookups need: element names, attributes, text and
//! children. Namespaces are reduced to local names.
//!
//! Text follows the ElementTree model: `text` is the character data before
//! the first child, `tail` the character data after an element's end tag.

use std::collections::BTreeMap;
use std::io::Read;

use thiserror::Error;
use ::xml::reader::{EventReader, XmlEvent};

#[derive(Debug, Error)]
pub enum XmlError {
    #[error("malformed XML: {0}")]
    Syntax(#[from] ::xml::reader::Error),

    #[error("document has no root element")]
    NoRootElement,

    #[error("text outside the root element")]
    TextOutsideRoot,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub name: String,
    pub attributes: BTreeMap<String, String>,
    pub children: Vec<Element>,
    text: String,
    tail: String,
}

impl Element {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: BTreeMap::new(),
            children: Vec::new(),
            text: String::new(),
            tail: String::new(),
        }
    }

    /// Parse a complete document and return its root element
    pub fn parse(bytes: &[u8]) -> Result<Element, XmlError> {
        Self::parse_reader(bytes)
    }

    pub fn parse_reader<R: Read>(reader: R) -> Result<Element, XmlError> {
        let mut stack: Vec<Element> = Vec::new();
        let mut root: Option<Element> = None;

        for event in EventReader::new(reader) {
            match event? {
                XmlEvent::StartElement {
                    name, attributes, ..
                } => {
                    let mut element = Element::new(name.local_name);
                    for attribute in attributes {
                        element
                            .attributes
                            .insert(attribute.name.local_name, attribute.value);
                    }
                    stack.push(element);
                }
                XmlEvent::EndElement { .. } => {
                    let Some(finished) = stack.pop() else {
                        return Err(XmlError::NoRootElement);
                    };
                    match stack.last_mut() {
                        Some(parent) => parent.children.push(finished),
                        None => root = Some(finished),
                    }
                }
                XmlEvent::Characters(text) | XmlEvent::CData(text) => match stack.last_mut() {
                    // Text after a child belongs to that child's tail
                    Some(current) => match current.children.last_mut() {
                        Some(previous) => previous.tail.push_str(&text),
                        None => current.text.push_str(&text),
                    },
                    None => return Err(XmlError::TextOutsideRoot),
                },
                _ => {}
            }
        }

        root.ok_or(XmlError::NoRootElement)
    }

    /// Character data before the first child, `None` when there is none
    pub fn text(&self) -> Option<&str> {
        non_empty(&self.text)
    }

    /// Character data following this element inside its parent
    pub fn tail(&self) -> Option<&str> {
        non_empty(&self.tail)
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    /// Find the first element matching an ElementTree-style path.
    ///
    /// The path is relative to `self` and supports:
    ///
    /// - `tag`: direct children named `tag`; `a/b` walks down one level per step
    /// - `*`: any child
    /// - `.`: the current element, so `find(".")` returns `self`
    /// - `//`: all descendants, e.g. `.//running` or `attendees//role`
    ///
    /// Absolute paths, `..` and `[...]` predicates are not supported and
    /// match nothing.
    pub fn find(&self, path: &str) -> Option<&Element> {
        self.find_all(path).into_iter().next()
    }

    /// All elements matching `path`, in document order. See [`Element::find`].
    pub fn find_all(&self, path: &str) -> Vec<&Element> {
        if path.is_empty() || path.starts_with('/') {
            return Vec::new();
        }

        let mut selected: Vec<&Element> = vec![self];
        let mut descendants = false;

        for step in path.split('/') {
            match step {
                // Empty step between two slashes: the next step searches the subtree
                "" => {
                    descendants = true;
                    continue;
                }
                "." => {
                    if descendants {
                        selected = selected
                            .into_iter()
                            .flat_map(|element| {
                                let mut all = vec![element];
                                element.collect_descendants(&mut all);
                                all
                            })
                            .collect();
                    }
                }
                ".." => return Vec::new(),
                _ if step.contains(['[', ']', '@', '(']) => return Vec::new(),
                tag => {
                    selected = selected
                        .into_iter()
                        .flat_map(|element| {
                            let mut candidates = Vec::new();
                            if descendants {
                                element.collect_descendants(&mut candidates);
                            } else {
                                candidates.extend(element.children.iter());
                            }
                            candidates
                        })
                        .filter(|candidate| tag == "*" || candidate.name == tag)
                        .collect();
                }
            }
            descendants = false;
        }

        selected
    }

    /// Pre-order walk of everything below `self`
    fn collect_descendants<'a>(&'a self, out: &mut Vec<&'a Element>) {
        for child in &self.children {
            out.push(child);
            child.collect_descendants(out);
        }
    }

    /// Text of the first element matching `path`
    pub fn find_text(&self, path: &str) -> Option<&str> {
        self.find(path).and_then(Element::text)
    }

    /// All direct children with the given name
    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Element> + 'a {
        self.children.iter().filter(move |child| child.name == name)
    }
}

fn non_empty(value: &str) -> Option<&str> {
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}
