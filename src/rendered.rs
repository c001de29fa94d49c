//!
//! Content that is rendered into the live tree.
//!
//! The rendered region is bracketed by two marker nodes. Everything
//! strictly between them is owned by the [RenderedContent], and nothing
//! outside of them is ever touched.
//!

use std::cell::RefCell;

use crate::error::Error;
use crate::{AsNode, Dom};

///
/// Two marker nodes bracketing the currently projected nodes.
/// Created once, never moved.
///
pub struct AnchorPair<D: Dom> {
    pub begin: D::Node,
    pub end: D::Node,
}

impl<D: Dom> AnchorPair<D> {
    ///
    /// Replace `content_el` in its parent by an adjacent pair of markers.
    ///
    fn replace(dom: &D, content_el: &D::Node) -> Result<Self, Error> {
        let parent = D::parent_of(content_el).ok_or(Error::Detached)?;

        let begin = dom.clone_marker()?;
        let end = dom.clone_marker()?;

        D::insert_before(content_el, &begin)?;
        D::insert_before(content_el, &end)?;
        D::remove_child(&parent, content_el)?;

        Ok(Self { begin, end })
    }

    /// Remove every node following `begin` until `stop` is reached.
    fn remove_nodes_until(&self, stop: &D::Node) -> Result<(), Error> {
        let parent = D::parent_of(&self.begin).ok_or(Error::Detached)?;

        loop {
            let next = D::next_sibling(&self.begin)
                .ok_or(Error::DomCorruption("begin anchor has no next sibling"))?;

            if D::is_same_node(&next, stop) {
                return Ok(());
            }
            if D::is_same_node(&next, &self.end) {
                return Err(Error::DomCorruption("reached end anchor while sweeping"));
            }

            tracing::trace!(node = ?next, "sweep");
            D::remove_child(&parent, &next)?;
        }
    }
}

pub struct RenderedContent<D: Dom> {
    anchors: AnchorPair<D>,
    nodes: RefCell<Vec<D::Node>>,
}

impl<D: Dom> RenderedContent<D> {
    ///
    /// Take the place of the `<content>` element in the tree.
    /// The element must have a parent.
    ///
    pub fn new(dom: &D, content_el: &D::Element) -> Result<Self, Error> {
        Ok(Self {
            anchors: AnchorPair::replace(dom, content_el.as_node())?,
            nodes: RefCell::new(vec![]),
        })
    }

    pub fn anchors(&self) -> &AnchorPair<D> {
        &self.anchors
    }

    pub fn nodes(&self) -> Vec<D::Node> {
        self.nodes.borrow().clone()
    }

    ///
    /// Make `nodes` the exact content between the anchors.
    ///
    /// New nodes go in before the old ones are swept, so the region
    /// is bracketed by both anchors at every step.
    ///
    pub fn insert(&self, nodes: Vec<D::Node>) -> Result<(), Error> {
        self.ensure_valid(&nodes)?;
        self.nodes.replace(nodes);

        let nodes = self.nodes.borrow();
        D::insert_all_before(&self.anchors.end, &nodes)?;

        let stop = nodes.first().unwrap_or(&self.anchors.end);
        self.anchors.remove_nodes_until(stop)
    }

    /// Checked before anything is recorded or moved.
    fn ensure_valid(&self, nodes: &[D::Node]) -> Result<(), Error> {
        let AnchorPair { begin, end } = &self.anchors;

        for (index, node) in nodes.iter().enumerate() {
            if D::is_same_node(node, begin) || D::is_same_node(node, end) {
                return Err(Error::AnchorAsContent);
            }
            if nodes[index + 1..]
                .iter()
                .any(|other| D::is_same_node(node, other))
            {
                return Err(Error::DuplicateNode);
            }
        }
        Ok(())
    }
}
