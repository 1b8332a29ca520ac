//! Owned XML element tree with namespace-resolved names.

/// A qualified name that matches one local name in any of several namespaces.
///
/// Producers disagree on vocabulary versions (PREMIS v2 and v3, for example), so
/// a name carries every namespace it is accepted in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Name {
    pub namespaces: &'static [&'static str],
    pub local: &'static str,
}

impl Name {
    pub fn matches(&self, namespace: Option<&str>, local: &str) -> bool {
        self.local == local && namespace.is_some_and(|ns| self.namespaces.contains(&ns))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlAttribute {
    pub namespace: Option<String>,
    pub local_name: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum XmlNode {
    Element(XmlElement),
    Text(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlElement {
    pub namespace: Option<String>,
    pub local_name: String,
    pub attributes: Vec<XmlAttribute>,
    pub children: Vec<XmlNode>,
}

impl XmlElement {
    pub fn new(namespace: Option<String>, local_name: impl Into<String>) -> Self {
        Self {
            namespace,
            local_name: local_name.into(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn is(&self, name: Name) -> bool {
        name.matches(self.namespace.as_deref(), &self.local_name)
    }

    /// Unqualified attribute value (`ID`, `TYPE`, `ADMID`, ...).
    pub fn attr(&self, local_name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|a| a.namespace.is_none() && a.local_name == local_name)
            .map(|a| a.value.as_str())
    }

    /// Unqualified attribute value, treating empty or blank values as absent.
    pub fn attr_text(&self, local_name: &str) -> Option<&str> {
        self.attr(local_name).filter(|v| !v.trim().is_empty())
    }

    /// Namespace-qualified attribute value (`xlink:href`).
    pub fn attr_ns(&self, name: Name) -> Option<&str> {
        self.attributes
            .iter()
            .find(|a| name.matches(a.namespace.as_deref(), &a.local_name))
            .map(|a| a.value.as_str())
    }

    /// Direct child elements.
    pub fn elements(&self) -> impl Iterator<Item = &XmlElement> {
        self.children.iter().filter_map(|child| match child {
            XmlNode::Element(el) => Some(el),
            XmlNode::Text(_) => None,
        })
    }

    pub fn elements_named(&self, name: Name) -> impl Iterator<Item = &XmlElement> {
        self.elements().filter(move |el| el.is(name))
    }

    pub fn element(&self, name: Name) -> Option<&XmlElement> {
        self.elements_named(name).next()
    }

    /// All descendant elements in document order, excluding `self`.
    pub fn descendants(&self) -> Descendants<'_> {
        Descendants {
            stack: vec![self.children.iter()],
        }
    }

    pub fn descendants_named(&self, name: Name) -> impl Iterator<Item = &XmlElement> {
        self.descendants().filter(move |el| el.is(name))
    }

    pub fn descendant(&self, name: Name) -> Option<&XmlElement> {
        self.descendants_named(name).next()
    }

    /// Trimmed text of the first descendant named `name`, if it has any.
    pub fn descendant_value(&self, name: Name) -> Option<String> {
        self.descendant(name)
            .map(XmlElement::value)
            .filter(|v| !v.is_empty())
    }

    /// Concatenated text of this element and all descendants, trimmed.
    pub fn value(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out.trim().to_string()
    }

    fn collect_text(&self, out: &mut String) {
        for child in &self.children {
            match child {
                XmlNode::Text(text) => out.push_str(text),
                XmlNode::Element(el) => el.collect_text(out),
            }
        }
    }
}

/// Pre-order iterator over descendant elements.
pub struct Descendants<'a> {
    stack: Vec<std::slice::Iter<'a, XmlNode>>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = &'a XmlElement;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let top = self.stack.last_mut()?;
            match top.next() {
                Some(XmlNode::Element(el)) => {
                    self.stack.push(el.children.iter());
                    return Some(el);
                }
                Some(XmlNode::Text(_)) => continue,
                None => {
                    self.stack.pop();
                }
            }
        }
    }
}
