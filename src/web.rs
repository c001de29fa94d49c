//!
//! Browser DOM, through web-sys.
//!

use crate::error::Error;
use crate::{AsNode, Dom, MARKER_TAG_NAME, MARKER_TYPE};

pub struct WebDom {
    document: web_sys::Document,
    marker_template: web_sys::Node,
}

impl WebDom {
    pub fn new() -> Result<Self, Error> {
        let document = web_sys::window()
            .and_then(|window| window.document())
            .ok_or(Error::JsError)?;

        let marker = document.create_element(MARKER_TAG_NAME)?;
        marker.set_attribute("type", MARKER_TYPE)?;

        Ok(Self {
            document,
            marker_template: marker.into(),
        })
    }

    pub fn document(&self) -> &web_sys::Document {
        &self.document
    }
}

impl AsNode<WebDom> for web_sys::Element {
    #[inline]
    fn as_node(&self) -> &web_sys::Node {
        self
    }
}

impl Dom for WebDom {
    type Node = web_sys::Node;
    type Element = web_sys::Element;

    fn clone_marker(&self) -> Result<web_sys::Node, Error> {
        Ok(self.marker_template.clone_node()?)
    }

    fn insert_before(reference: &web_sys::Node, node: &web_sys::Node) -> Result<(), Error> {
        let parent = reference.parent_node().ok_or(Error::Detached)?;
        parent.insert_before(node, Some(reference))?;
        Ok(())
    }

    fn remove_child(parent: &web_sys::Node, child: &web_sys::Node) -> Result<(), Error> {
        parent.remove_child(child)?;
        Ok(())
    }

    fn parent_of(node: &web_sys::Node) -> Option<web_sys::Node> {
        node.parent_node()
    }

    fn next_sibling(node: &web_sys::Node) -> Option<web_sys::Node> {
        node.next_sibling()
    }

    fn is_same_node(a: &web_sys::Node, b: &web_sys::Node) -> bool {
        a.is_same_node(Some(b))
    }

    fn get_attribute(element: &web_sys::Element, name: &str) -> Option<String> {
        element.get_attribute(name)
    }
}

impl From<wasm_bindgen::JsValue> for Error {
    fn from(_js_error: wasm_bindgen::JsValue) -> Self {
        Error::JsError
    }
}
