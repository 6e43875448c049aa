//! Forward-only cursor over the nodes of an XML document.
//!
//! The document is parsed up front, so a malformed reply is reported when the
//! cursor is opened and `advance` only ever answers "next node" or "end of
//! document". Only element and text nodes are visited; comments and
//! processing instructions are dropped.

use crate::lyrics::error::XmlError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlNode {
    /// Tag name for elements, empty for text.
    name: String,
    /// Text content, only set on text nodes.
    value: Option<String>,
    attributes: Vec<(String, String)>,
    /// Nesting level; the root element sits at 0.
    depth: usize,
}

impl XmlNode {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn is_element(&self) -> bool {
        !self.name.is_empty()
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }
}

/// Outcome of moving the cursor one node forward.
#[derive(Debug, PartialEq, Eq)]
pub enum Step<'a> {
    Node(&'a XmlNode),
    EndOfDocument,
}

#[derive(Debug)]
pub struct XmlCursor {
    nodes: Vec<XmlNode>,
    /// Number of nodes advanced over; the current node is `nodes[consumed - 1]`.
    consumed: usize,
}

impl XmlCursor {
    pub fn parse(text: &str) -> Result<Self, XmlError> {
        let doc = roxmltree::Document::parse(text)?;
        let nodes = doc
            .root()
            .descendants()
            .skip(1)
            .filter_map(|node| {
                // ancestors() yields the node itself and the document root as well
                let depth = node.ancestors().count().saturating_sub(2);
                if node.is_element() {
                    Some(XmlNode {
                        name: node.tag_name().name().to_string(),
                        value: None,
                        attributes: node
                            .attributes()
                            .map(|a| (a.name().to_string(), a.value().to_string()))
                            .collect(),
                        depth,
                    })
                } else if node.is_text() {
                    Some(XmlNode {
                        name: String::new(),
                        value: node.text().map(str::to_string),
                        attributes: Vec::new(),
                        depth,
                    })
                } else {
                    None
                }
            })
            .collect();

        Ok(Self { nodes, consumed: 0 })
    }

    /// Move to the next node in document order.
    pub fn advance(&mut self) -> Step<'_> {
        if self.consumed < self.nodes.len() {
            self.consumed += 1;
            Step::Node(&self.nodes[self.consumed - 1])
        } else {
            self.consumed = self.nodes.len() + 1;
            Step::EndOfDocument
        }
    }

    /// The node the next `advance` will land on.
    pub fn peek(&self) -> Option<&XmlNode> {
        self.nodes.get(self.consumed)
    }

    pub fn current(&self) -> Option<&XmlNode> {
        self.consumed
            .checked_sub(1)
            .and_then(|index| self.nodes.get(index))
    }

    pub fn current_name(&self) -> &str {
        self.current().map(XmlNode::name).unwrap_or("")
    }

    pub fn current_value(&self) -> Option<&str> {
        self.current().and_then(XmlNode::value)
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.current().and_then(|node| node.attribute(name))
    }

    pub fn depth(&self) -> Option<usize> {
        self.current().map(XmlNode::depth)
    }

    fn at_element(&self, name: &str) -> bool {
        self.current()
            .is_some_and(|node| node.is_element() && node.name == name)
    }

    /// Advance until an element called `name`. Returns false at end of document.
    pub fn seek(&mut self, name: &str) -> bool {
        loop {
            if let Step::EndOfDocument = self.advance() {
                return false;
            }
            if self.at_element(name) {
                return true;
            }
        }
    }

    /// Like [`seek`](Self::seek), but gives up without leaving the subtree of
    /// the element at `scope` depth.
    pub fn seek_within(&mut self, name: &str, scope: usize) -> bool {
        loop {
            match self.peek() {
                Some(next) if next.depth > scope => {}
                _ => return false,
            }
            self.advance();
            if self.at_element(name) {
                return true;
            }
        }
    }

    /// Advance to the next element inside the subtree of the element at
    /// `scope` depth and return its name.
    pub fn next_element_within(&mut self, scope: usize) -> Option<String> {
        loop {
            match self.peek() {
                Some(next) if next.depth > scope => {}
                _ => return None,
            }
            if let Step::Node(node) = self.advance()
                && node.is_element()
            {
                return Some(node.name.clone());
            }
        }
    }

    /// Consume the current element's subtree and return its text, trimmed.
    ///
    /// Returns `None` when not on an element or when the text is blank.
    pub fn read_text(&mut self) -> Option<String> {
        let scope = self
            .current()
            .filter(|node| node.is_element())
            .map(XmlNode::depth)?;

        let mut text = String::new();
        while let Some(next) = self.peek() {
            if next.depth <= scope {
                break;
            }
            if let Some(value) = &next.value {
                text.push_str(value);
            }
            self.consumed += 1;
        }

        let trimmed = text.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOC: &str = r#"<root>
  <item id="1" kind="a">first</item>
  <item id="2"><inner>  nested  </inner></item>
  <!-- dropped -->
  <tail/>
</root>"#;

    #[test]
    fn test_walks_document_order() {
        let mut cursor = XmlCursor::parse(DOC).unwrap();
        assert_eq!(cursor.current_name(), "");

        assert!(matches!(cursor.advance(), Step::Node(n) if n.name() == "root"));
        assert_eq!(cursor.depth(), Some(0));

        // whitespace between elements is a text node
        assert!(matches!(cursor.advance(), Step::Node(n) if n.name().is_empty()));
        assert!(matches!(cursor.advance(), Step::Node(n) if n.name() == "item"));
        assert_eq!(cursor.attribute("id"), Some("1"));
        assert_eq!(cursor.attribute("kind"), Some("a"));
        assert_eq!(cursor.attribute("missing"), None);
        assert_eq!(cursor.current_value(), None);

        cursor.advance();
        assert_eq!(cursor.current_value(), Some("first"));
        assert_eq!(cursor.depth(), Some(2));
    }

    #[test]
    fn test_end_of_document_is_sticky() {
        let mut cursor = XmlCursor::parse("<a>x</a>").unwrap();
        assert!(matches!(cursor.advance(), Step::Node(_)));
        assert!(matches!(cursor.advance(), Step::Node(_)));
        assert_eq!(cursor.advance(), Step::EndOfDocument);
        assert_eq!(cursor.advance(), Step::EndOfDocument);
        assert!(cursor.current().is_none());
        assert_eq!(cursor.current_name(), "");
    }

    #[test]
    fn test_malformed_is_an_error() {
        let err = XmlCursor::parse("<a><b></a>").unwrap_err();
        assert!(matches!(err, XmlError::Malformed(_)));

        assert!(XmlCursor::parse("").is_err());
    }

    #[test]
    fn test_seek() {
        let mut cursor = XmlCursor::parse(DOC).unwrap();
        assert!(cursor.seek("tail"));
        assert_eq!(cursor.current_name(), "tail");
        assert!(!cursor.seek("item"));
    }

    #[test]
    fn test_seek_within_stays_in_scope() {
        let mut cursor = XmlCursor::parse(DOC).unwrap();
        assert!(cursor.seek("item"));
        let scope = cursor.depth().unwrap();

        assert!(!cursor.seek_within("inner", scope));
        // stopped before leaving the first item
        assert_eq!(cursor.peek().map(XmlNode::name), Some(""));

        assert!(cursor.seek("item"));
        let scope = cursor.depth().unwrap();
        assert!(cursor.seek_within("inner", scope));
    }

    #[test]
    fn test_next_element_within() {
        let mut cursor = XmlCursor::parse(DOC).unwrap();
        cursor.seek("item");
        cursor.seek("item");
        let scope = cursor.depth().unwrap();
        assert_eq!(cursor.next_element_within(scope).as_deref(), Some("inner"));
        assert_eq!(cursor.next_element_within(scope), None);
        assert!(cursor.seek("tail"));
    }

    #[test]
    fn test_read_text() {
        let mut cursor = XmlCursor::parse(DOC).unwrap();
        cursor.seek("item");
        assert_eq!(cursor.read_text().as_deref(), Some("first"));

        cursor.seek("item");
        assert_eq!(cursor.read_text().as_deref(), Some("nested"));

        cursor.seek("tail");
        assert_eq!(cursor.read_text(), None);
    }

    #[test]
    fn test_read_text_decodes_entities_and_cdata() {
        let mut cursor = XmlCursor::parse("<t>Rock &amp; Roll <![CDATA[<live>]]></t>").unwrap();
        cursor.seek("t");
        assert_eq!(cursor.read_text().as_deref(), Some("Rock & Roll <live>"));
    }
}
