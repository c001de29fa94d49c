#![forbid(unsafe_code)]

//!
//! The hypp_content crate emulates shadow DOM content projection.
//!
//! A `<content>` placeholder inside a component template is bound to a
//! [ContentDirective]. The light DOM aggregator computes which nodes belong
//! to each placeholder and hands them over through [ContentDirective::insert].
//! Depending on where the placeholder lives, the nodes are either rendered
//! into the live tree between two marker nodes, or relayed upwards to
//! another aggregator.
//!

use std::fmt::Debug;

pub mod content;
pub mod error;
pub mod intermediate;
pub mod rendered;
pub mod server;

#[cfg(feature = "web")]
pub mod web;

pub use content::{ContentDirective, ContentStrategy};
pub use error::Error;
pub use intermediate::IntermediateContent;
pub use rendered::{AnchorPair, RenderedContent};

/// Tag name of the marker nodes bracketing rendered content.
pub const MARKER_TAG_NAME: &str = "script";

/// `type` attribute of the marker nodes, so browsers never execute them.
pub const MARKER_TYPE: &str = "ng/content";

/// Attribute of the `<content>` element holding the selection filter.
pub const SELECT_ATTRIBUTE: &str = "select";

///
/// "upcast" a DOM node of a specific type to its generic type
///
pub trait AsNode<D: Dom> {
    fn as_node(&self) -> &D::Node;
}

///
/// The DOM adapter.
///
/// We abstract over the type of DOM we are targeting. All tree
/// mutation is synchronous, and fails loudly on detached nodes.
///
pub trait Dom: Sized {
    type Node: Clone + Debug;
    type Element: Clone + AsNode<Self>;

    /// Produce a fresh copy of the marker node template.
    fn clone_marker(&self) -> Result<Self::Node, Error>;

    /// Insert `node` as the previous sibling of `reference`.
    fn insert_before(reference: &Self::Node, node: &Self::Node) -> Result<(), Error>;

    /// Insert all `nodes`, in order, before `reference`.
    fn insert_all_before(reference: &Self::Node, nodes: &[Self::Node]) -> Result<(), Error> {
        for node in nodes {
            Self::insert_before(reference, node)?;
        }
        Ok(())
    }

    fn remove_child(parent: &Self::Node, child: &Self::Node) -> Result<(), Error>;

    fn parent_of(node: &Self::Node) -> Option<Self::Node>;

    fn next_sibling(node: &Self::Node) -> Option<Self::Node>;

    /// Node identity, not structural equality.
    fn is_same_node(a: &Self::Node, b: &Self::Node) -> bool;

    fn get_attribute(element: &Self::Element, name: &str) -> Option<String>;
}

///
/// The light DOM aggregator of a component.
///
/// It owns the projection decision: which nodes go into which content
/// occurrence. This crate only ever asks it to recompute.
///
pub trait LightDom {
    /// Recompute the distribution of nodes across the content occurrences,
    /// calling [ContentDirective::insert] on each of them.
    fn redistribute(&self) -> Result<(), Error>;
}
