//!
//! In-memory DOM, used for server side rendering and for testing.
//!

use crate::error::Error;
use crate::{AsNode, Dom, MARKER_TAG_NAME, MARKER_TYPE};

mod server_dom;

pub use server_dom::{Node, NodeKind, RcNode};

impl AsNode<ServerDom> for RcNode {
    #[inline]
    fn as_node(&self) -> &RcNode {
        self
    }
}

pub struct ServerDom {
    body: RcNode,
    marker_template: RcNode,
}

impl ServerDom {
    pub fn new() -> Self {
        Self {
            body: Node::create_element("body"),
            marker_template: Node::create_element_with(MARKER_TAG_NAME, &[("type", MARKER_TYPE)]),
        }
    }

    pub fn body(&self) -> &RcNode {
        &self.body
    }

    pub fn create_element(&self, tag_name: &str) -> RcNode {
        Node::create_element(tag_name)
    }

    pub fn create_text(&self, text: &str) -> RcNode {
        Node::create_text(text.to_string())
    }

    pub fn render(&self) -> String {
        self.body.to_string()
    }
}

impl Default for ServerDom {
    fn default() -> Self {
        Self::new()
    }
}

impl Dom for ServerDom {
    type Node = RcNode;
    type Element = RcNode;

    fn clone_marker(&self) -> Result<RcNode, Error> {
        Ok(self.marker_template.clone_shallow())
    }

    fn insert_before(reference: &RcNode, node: &RcNode) -> Result<(), Error> {
        let parent = reference.parent().ok_or(Error::Detached)?;
        parent.insert_before(node.clone(), Some(reference.clone()))?;
        Ok(())
    }

    fn remove_child(parent: &RcNode, child: &RcNode) -> Result<(), Error> {
        parent.remove_child(child.clone())?;
        Ok(())
    }

    fn parent_of(node: &RcNode) -> Option<RcNode> {
        node.parent()
    }

    fn next_sibling(node: &RcNode) -> Option<RcNode> {
        node.next_sibling()
    }

    fn is_same_node(a: &RcNode, b: &RcNode) -> bool {
        a.is(b)
    }

    fn get_attribute(element: &RcNode, name: &str) -> Option<String> {
        element.get_attribute(name)
    }
}
