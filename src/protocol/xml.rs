/*
 * Copyright (c) 2025 Fotki Client Contributors.
 * Licensed under either of
 *  - Apache License, Version 2.0 <http://www.apache.org/licenses/LICENSE-2.0> OR
 *  - MIT license <http://opensource.org/licenses/MIT>
 *  at your option.
 */
use crate::protocol::errors::FotkiError;
use crate::protocol::properties::ATOM_NS;
use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};
use quick_xml::name::ResolveResult;
use quick_xml::reader::NsReader;
use quick_xml::writer::Writer;
use std::str;

/// A namespace resolved XML element.
///
/// Attributes are kept with their qualified names as they appeared in the document,
/// including any `xmlns` declarations, so a parsed node can be written back.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Element {
    namespace: Option<String>,
    prefix: Option<String>,
    name: String,
    attributes: Vec<(String, String)>,
    text: String,
    children: Vec<Element>,
}

impl Element {
    pub fn new(namespace: Option<&str>, name: &str) -> Self {
        Self {
            namespace: namespace.map(str::to_string),
            name: name.to_string(),
            ..Default::default()
        }
    }

    /// Builds a minimal Atom entry carrying only a title.
    ///
    /// Serializes as `<entry xmlns="http://www.w3.org/2005/Atom"><title>..</title></entry>`
    pub fn new_entry(title: &str) -> Self {
        let mut title_node = Element::new(Some(ATOM_NS), "title");
        title_node.set_text(title);

        let mut entry = Element::new(Some(ATOM_NS), "entry");
        entry.set_attr("xmlns", ATOM_NS);
        entry.push_child(title_node);
        entry
    }

    /// Parses a raw document and returns its root element
    pub fn parse(document: &[u8]) -> Result<Self, FotkiError> {
        let mut reader = NsReader::from_reader(document);
        let mut stack: Vec<Element> = Vec::new();
        let mut root = None;

        loop {
            match reader.read_resolved_event()? {
                (ns, Event::Start(start)) => stack.push(Self::from_start(ns, &start)?),
                (ns, Event::Empty(start)) => {
                    let element = Self::from_start(ns, &start)?;
                    Self::attach(&mut stack, &mut root, element);
                }
                (_, Event::End(_)) => {
                    if let Some(element) = stack.pop() {
                        Self::attach(&mut stack, &mut root, element.closed());
                    }
                }
                (_, Event::Text(text)) => {
                    if let Some(current) = stack.last_mut() {
                        current.text.push_str(&text.unescape()?);
                    }
                }
                (_, Event::CData(data)) => {
                    if let Some(current) = stack.last_mut() {
                        current.text.push_str(str::from_utf8(&data)?);
                    }
                }
                (_, Event::Eof) => break,
                _ => (),
            }
        }

        root.ok_or(FotkiError::DocumentEmpty())
    }

    /// Serializes this element and its subtree.
    ///
    /// Namespaces used in the subtree but declared on an ancestor are declared on
    /// the written root, so a node taken out of a feed is still a standalone document.
    pub fn to_bytes(&self) -> Result<Vec<u8>, FotkiError> {
        let mut used = Vec::new();
        self.collect_namespaces(&mut used);
        let declarations: Vec<(String, &str)> = used
            .into_iter()
            .filter(|(key, _)| self.attr(key).is_none())
            .collect();

        let mut writer = Writer::new(Vec::new());
        self.write(&mut writer, &declarations)?;
        Ok(writer.into_inner())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn namespace(&self) -> Option<&str> {
        self.namespace.as_deref()
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    pub fn attr(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn set_attr(&mut self, key: &str, value: &str) {
        match self.attributes.iter_mut().find(|(k, _)| k == key) {
            Some((_, v)) => *v = value.to_string(),
            None => self.attributes.push((key.to_string(), value.to_string())),
        }
    }

    pub fn children(&self) -> &[Element] {
        &self.children
    }

    pub fn push_child(&mut self, child: Element) {
        self.children.push(child);
    }

    /// True if this element has the given namespace and local name
    pub fn is(&self, ns: &str, name: &str) -> bool {
        self.namespace.as_deref() == Some(ns) && self.name == name
    }

    /// First direct child with the given namespace and local name
    pub fn find(&self, ns: &str, name: &str) -> Option<&Element> {
        self.children.iter().find(|c| c.is(ns, name))
    }

    pub fn find_mut(&mut self, ns: &str, name: &str) -> Option<&mut Element> {
        self.children.iter_mut().find(|c| c.is(ns, name))
    }

    /// First direct child matching namespace and name whose attribute `key` equals `value`
    pub fn find_with_attr(&self, ns: &str, name: &str, key: &str, value: &str) -> Option<&Element> {
        self.children
            .iter()
            .find(|c| c.is(ns, name) && c.attr(key) == Some(value))
    }

    /// All elements below this one matching namespace and name, depth first in document order
    pub fn descendants<'a>(&'a self, ns: &str, name: &str) -> Vec<&'a Element> {
        let mut found = Vec::new();
        self.collect_descendants(ns, name, &mut found);
        found
    }

    /// The `href` of the first atom `link` child with the given `rel`
    pub fn link_href(&self, rel: &str) -> Option<&str> {
        self.find_with_attr(ATOM_NS, "link", "rel", rel)
            .and_then(|link| link.attr("href"))
    }

    /// Consumes this element, returning the direct children matching namespace and name
    pub fn into_children_named(self, ns: &str, name: &str) -> Vec<Element> {
        self.children
            .into_iter()
            .filter(|c| c.is(ns, name))
            .collect()
    }

    fn collect_descendants<'a>(&'a self, ns: &str, name: &str, found: &mut Vec<&'a Element>) {
        for child in &self.children {
            if child.is(ns, name) {
                found.push(child);
            }
            child.collect_descendants(ns, name, found);
        }
    }

    fn qualified_name(&self) -> String {
        match &self.prefix {
            Some(prefix) => format!("{}:{}", prefix, self.name),
            None => self.name.clone(),
        }
    }

    fn collect_namespaces<'a>(&'a self, used: &mut Vec<(String, &'a str)>) {
        if let Some(ns) = &self.namespace {
            let key = match &self.prefix {
                Some(prefix) => format!("xmlns:{prefix}"),
                None => "xmlns".to_string(),
            };
            if !used.iter().any(|(k, _)| *k == key) {
                used.push((key, ns));
            }
        }
        for child in &self.children {
            child.collect_namespaces(used);
        }
    }

    fn write(&self, writer: &mut Writer<Vec<u8>>, declarations: &[(String, &str)]) -> Result<(), FotkiError> {
        let qname = self.qualified_name();
        let mut start = BytesStart::new(qname.as_str());
        for (key, value) in declarations {
            start.push_attribute((key.as_str(), *value));
        }
        for (key, value) in &self.attributes {
            start.push_attribute((key.as_str(), value.as_str()));
        }

        if self.text.is_empty() && self.children.is_empty() {
            writer.write_event(Event::Empty(start))?;
            return Ok(());
        }

        writer.write_event(Event::Start(start))?;
        if !self.text.is_empty() {
            writer.write_event(Event::Text(BytesText::new(&self.text)))?;
        }
        for child in &self.children {
            child.write(writer, &[])?;
        }
        writer.write_event(Event::End(BytesEnd::new(qname.as_str())))?;
        Ok(())
    }

    fn from_start(ns: ResolveResult, start: &BytesStart) -> Result<Self, FotkiError> {
        let namespace = match ns {
            ResolveResult::Bound(ns) => Some(str::from_utf8(ns.as_ref())?.to_string()),
            _ => None,
        };
        let qname = start.name();
        let prefix = match qname.prefix() {
            Some(prefix) => Some(str::from_utf8(prefix.as_ref())?.to_string()),
            None => None,
        };
        let name = str::from_utf8(qname.local_name().as_ref())?.to_string();

        let mut attributes = Vec::new();
        for attr in start.attributes() {
            let attr = attr?;
            let key = str::from_utf8(attr.key.as_ref())?.to_string();
            attributes.push((key, attr.unescape_value()?.into_owned()));
        }

        Ok(Self {
            namespace,
            prefix,
            name,
            attributes,
            text: String::new(),
            children: Vec::new(),
        })
    }

    // Indentation between child elements is not content
    fn closed(mut self) -> Self {
        if !self.children.is_empty() && self.text.trim().is_empty() {
            self.text.clear();
        }
        self
    }

    fn attach(stack: &mut [Element], root: &mut Option<Element>, element: Element) {
        match stack.last_mut() {
            Some(parent) => parent.children.push(element),
            None if root.is_none() => *root = Some(element),
            None => (),
        }
    }
}
