use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// A node that must live in a tree has no parent.
    #[error("node is detached from the tree")]
    Detached,

    #[error("node is not a child of the given parent")]
    RemoveChild,

    /// A node was inserted into itself or one of its descendants.
    #[error("node cannot be inserted into its own subtree")]
    Hierarchy,

    #[error("node is not an element")]
    NotAnElement,

    /// The anchor bracketing of a content region is broken.
    #[error("DOM corruption: {0}")]
    DomCorruption(&'static str),

    /// The same node was passed twice to a single insert.
    #[error("node appears more than once in the inserted sequence")]
    DuplicateNode,

    /// One of the region's own anchors was passed as content.
    #[error("anchor node cannot be projected as content")]
    AnchorAsContent,

    #[error("redistribution failed: {0}")]
    Redistribute(String),

    #[cfg(feature = "web")]
    #[error("javascript error")]
    JsError,
}
