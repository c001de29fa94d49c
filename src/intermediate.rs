use std::cell::RefCell;
use std::rc::Rc;

use crate::error::Error;
use crate::{Dom, LightDom};

///
/// Content nested directly inside another component's light DOM.
///
/// It is never rendered itself. Its nodes are input to the destination's
/// own distribution, so every change is relayed there.
///
pub struct IntermediateContent<D: Dom> {
    destination: Rc<dyn LightDom>,
    nodes: RefCell<Vec<D::Node>>,
}

impl<D: Dom> IntermediateContent<D> {
    pub fn new(destination: Rc<dyn LightDom>) -> Self {
        Self {
            destination,
            nodes: RefCell::new(vec![]),
        }
    }

    pub fn destination(&self) -> &Rc<dyn LightDom> {
        &self.destination
    }

    pub fn nodes(&self) -> Vec<D::Node> {
        self.nodes.borrow().clone()
    }

    ///
    /// Record the nodes, then ask the destination to redistribute.
    /// The destination may read [Self::nodes] while doing so.
    ///
    pub fn insert(&self, nodes: Vec<D::Node>) -> Result<(), Error> {
        self.nodes.replace(nodes);
        self.destination.redistribute()
    }
}
