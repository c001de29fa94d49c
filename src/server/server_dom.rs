use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use crate::error::Error;

pub type RcNode = Rc<Node>;

pub struct Node {
    pub kind: NodeKind,

    links: RefCell<Links>,
}

pub enum NodeKind {
    Text(RefCell<String>),
    Element {
        tag_name: String,
        attributes: RefCell<Vec<(String, String)>>,
    },
}

#[derive(Default)]
struct Links {
    pub parent: Option<Weak<Node>>,

    pub next_sibling: Option<RcNode>,
    pub prev_sibling: Option<Weak<Node>>,

    pub first_child: Option<RcNode>,
    pub last_child: Option<Weak<Node>>,
}

impl Node {
    pub fn is(&self, other: &Node) -> bool {
        self as *const _ == other as *const _
    }

    pub fn create_element(tag_name: &str) -> RcNode {
        Self::create_element_with(tag_name, &[])
    }

    pub fn create_element_with(tag_name: &str, attributes: &[(&str, &str)]) -> RcNode {
        Rc::new(Node {
            kind: NodeKind::Element {
                tag_name: tag_name.to_string(),
                attributes: RefCell::new(
                    attributes
                        .iter()
                        .map(|(name, value)| (name.to_string(), value.to_string()))
                        .collect(),
                ),
            },
            links: RefCell::new(Links::default()),
        })
    }

    pub fn create_text(text: String) -> RcNode {
        Rc::new(Node {
            kind: NodeKind::Text(RefCell::new(text)),
            links: RefCell::new(Links::default()),
        })
    }

    /// Copy of this node without its children and without tree links.
    pub fn clone_shallow(&self) -> RcNode {
        let kind = match &self.kind {
            NodeKind::Text(text) => NodeKind::Text(RefCell::new(text.borrow().clone())),
            NodeKind::Element {
                tag_name,
                attributes,
            } => NodeKind::Element {
                tag_name: tag_name.clone(),
                attributes: RefCell::new(attributes.borrow().clone()),
            },
        };

        Rc::new(Node {
            kind,
            links: RefCell::new(Links::default()),
        })
    }

    pub fn set_attribute(&self, name: &str, value: &str) -> Result<(), Error> {
        match &self.kind {
            NodeKind::Element { attributes, .. } => {
                let mut attributes = attributes.borrow_mut();
                match attributes.iter_mut().find(|(key, _)| key == name) {
                    Some((_, old_value)) => *old_value = value.to_string(),
                    None => attributes.push((name.to_string(), value.to_string())),
                }
                Ok(())
            }
            NodeKind::Text(_) => Err(Error::NotAnElement),
        }
    }

    pub fn get_attribute(&self, name: &str) -> Option<String> {
        match &self.kind {
            NodeKind::Element { attributes, .. } => attributes
                .borrow()
                .iter()
                .find(|(key, _)| key == name)
                .map(|(_, value)| value.clone()),
            NodeKind::Text(_) => None,
        }
    }

    pub fn parent(&self) -> Option<RcNode> {
        self.links
            .borrow()
            .parent
            .as_ref()
            .and_then(|parent| parent.upgrade())
    }

    pub fn first_child(&self) -> Option<RcNode> {
        self.links.borrow().first_child.clone()
    }

    pub fn last_child(&self) -> Option<RcNode> {
        self.links
            .borrow()
            .last_child
            .as_ref()
            .and_then(|weak| weak.upgrade())
    }

    pub fn next_sibling(&self) -> Option<RcNode> {
        self.links.borrow().next_sibling.clone()
    }

    pub fn prev_sibling(&self) -> Option<RcNode> {
        self.links
            .borrow()
            .prev_sibling
            .as_ref()
            .and_then(|weak| weak.upgrade())
    }

    /// Whether `self` is `other` or one of its descendants.
    pub fn is_inclusive_descendant_of(&self, other: &Node) -> bool {
        if self.is(other) {
            return true;
        }

        let mut ancestor = self.parent();
        while let Some(node) = ancestor {
            if node.is(other) {
                return true;
            }
            ancestor = node.parent();
        }
        false
    }

    /// The direct children, first to last.
    pub fn children(&self) -> Vec<RcNode> {
        let mut children = vec![];
        let mut next = self.first_child();

        while let Some(child) = next {
            next = child.next_sibling();
            children.push(child);
        }

        children
    }

    pub fn append_child(self: &Rc<Self>, child: RcNode) -> Result<RcNode, Error> {
        self.insert_before(child, None)
    }

    pub fn insert_before(
        self: &Rc<Self>,
        child: RcNode,
        reference: Option<RcNode>,
    ) -> Result<RcNode, Error> {
        if self.is_inclusive_descendant_of(&child) {
            return Err(Error::Hierarchy);
        }

        if let Some(reference) = &reference {
            match reference.parent() {
                Some(parent) if parent.is(self) => {}
                _ => return Err(Error::Detached),
            }
            if reference.is(&child) {
                return Ok(child);
            }
        }

        child.unlink()?;

        {
            let mut parent_links = self.links.borrow_mut();
            let mut child_links = child.links.borrow_mut();

            child_links.parent = Some(Rc::downgrade(self));

            if let Some(reference) = reference {
                // Set up next sibling owned pointer
                child_links.next_sibling = Some(reference.clone());

                let mut next_links = reference.links.borrow_mut();

                match next_links.prev_sibling.take() {
                    // first child
                    None => {
                        next_links.prev_sibling = Some(Rc::downgrade(&child));
                        parent_links.first_child = Some(child.clone());
                    }
                    // not first
                    Some(old_prev) => {
                        let old_prev = old_prev
                            .upgrade()
                            .ok_or(Error::DomCorruption("dangling previous sibling"))?;
                        let mut old_prev_links = old_prev.links.borrow_mut();

                        old_prev_links.next_sibling = Some(child.clone());
                        next_links.prev_sibling = Some(Rc::downgrade(&child));
                        child_links.prev_sibling = Some(Rc::downgrade(&old_prev));
                    }
                }
            } else {
                // Append

                if let Some(last_child) = parent_links
                    .last_child
                    .take()
                    .and_then(|child| child.upgrade())
                {
                    child_links.prev_sibling = Some(Rc::downgrade(&last_child));
                    last_child.links.borrow_mut().next_sibling = Some(child.clone());
                } else {
                    // Add the first child
                    parent_links.first_child = Some(child.clone());
                }

                parent_links.last_child = Some(Rc::downgrade(&child));
            }
        }

        Ok(child)
    }

    pub fn remove_child(&self, child: RcNode) -> Result<RcNode, Error> {
        match child.parent() {
            Some(parent) if parent.is(self) => {
                child.unlink()?;
                Ok(child)
            }
            _ => Err(Error::RemoveChild),
        }
    }

    /// Unlink from current child list
    fn unlink(&self) -> Result<(), Error> {
        let mut self_links = self.links.borrow_mut();
        if let Some(parent) = self_links.parent.take().and_then(|parent| parent.upgrade()) {
            let mut parent_links = parent.links.borrow_mut();

            let prev = match self_links.prev_sibling.take() {
                Some(prev) => Some(
                    prev.upgrade()
                        .ok_or(Error::DomCorruption("dangling previous sibling"))?,
                ),
                None => None,
            };

            match (prev, self_links.next_sibling.take()) {
                // only child:
                (None, None) => {
                    parent_links.last_child = None;
                    parent_links.first_child = None;
                }
                // first child:
                (None, Some(next)) => {
                    next.links.borrow_mut().prev_sibling = None;
                    parent_links.first_child = Some(next);
                }
                // last child:
                (Some(prev), None) => {
                    prev.links.borrow_mut().next_sibling = None;
                    parent_links.last_child = Some(Rc::downgrade(&prev));
                }
                // internal child:
                (Some(prev), Some(next)) => {
                    next.links.borrow_mut().prev_sibling = Some(Rc::downgrade(&prev));
                    prev.links.borrow_mut().next_sibling = Some(next);
                }
            }
        } else {
            self_links.prev_sibling = None;
            self_links.next_sibling = None;
        }

        Ok(())
    }
}

impl Drop for Node {
    // Unlink all the nodes in the direct child list
    fn drop(&mut self) {
        let mut next_sibling = {
            let self_links = self.links.borrow_mut();
            self_links.first_child.clone()
        };

        while let Some(sibling) = next_sibling.take() {
            next_sibling = {
                let mut links = sibling.links.borrow_mut();

                links.parent = None;
                links.prev_sibling = None;
                links.next_sibling.take()
            }
        }
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            NodeKind::Element {
                tag_name,
                attributes,
            } => {
                write!(f, "<{}", tag_name)?;
                for (name, value) in attributes.borrow().iter() {
                    write!(f, " {}=\"{}\"", name, value)?;
                }

                let children = self.children();
                if children.is_empty() {
                    write!(f, "/>")
                } else {
                    write!(f, ">")?;
                    for child in children {
                        write!(f, "{}", child)?;
                    }
                    write!(f, "</{}>", tag_name)
                }
            }
            NodeKind::Text(text) => write!(f, "{}", text.borrow()),
        }
    }
}

impl fmt::Debug for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Node({})", self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tree_stuff() {
        let parent = Node::create_element("div");
        let child0 = Node::create_text("Foo".into());
        let child1 = Node::create_element("a");
        let child2 = Node::create_text("Baz".into());

        child1
            .append_child(Node::create_text("Bar".into()))
            .unwrap();

        parent.append_child(child0.clone()).unwrap();
        parent.append_child(child1.clone()).unwrap();
        parent.append_child(child2.clone()).unwrap();

        let verify_tree = || {
            assert_eq!(parent.to_string(), "<div>Foo<a>Bar</a>Baz</div>");

            assert!(child0.next_sibling().unwrap().is(&child1));
            assert!(child1.next_sibling().unwrap().is(&child2));
            assert!(child2.next_sibling().is_none());

            assert!(child2.prev_sibling().unwrap().is(&child1));
            assert!(child1.prev_sibling().unwrap().is(&child0));
            assert!(child0.prev_sibling().is_none());

            assert!(child0.parent().unwrap().is(&parent));
            assert!(child1.parent().unwrap().is(&parent));
            assert!(child2.parent().unwrap().is(&parent));
        };

        verify_tree();

        parent.remove_child(child0.clone()).unwrap();
        assert_eq!(parent.to_string(), "<div><a>Bar</a>Baz</div>");
        parent
            .insert_before(child0.clone(), Some(child1.clone()))
            .unwrap();
        verify_tree();

        parent.remove_child(child1.clone()).unwrap();
        assert_eq!(parent.to_string(), "<div>FooBaz</div>");
        parent
            .insert_before(child1.clone(), Some(child2.clone()))
            .unwrap();
        verify_tree();

        parent.remove_child(child2.clone()).unwrap();
        assert_eq!(parent.to_string(), "<div>Foo<a>Bar</a></div>");
        parent.insert_before(child2.clone(), None).unwrap();
        verify_tree();

        // Dropping the parent should "unnest" its child list
        drop(parent);

        assert!(child0.next_sibling().is_none());
        assert!(child1.next_sibling().is_none());

        assert!(child0.parent().is_none());
        assert!(child1.parent().is_none());
        assert!(child2.parent().is_none());

        // child1 should still render as before
        assert_eq!(child1.to_string(), "<a>Bar</a>");
    }

    #[test]
    fn moving_within_same_parent() {
        let parent = Node::create_element("ul");
        let a = Node::create_text("a".into());
        let b = Node::create_text("b".into());
        let c = Node::create_text("c".into());

        parent.append_child(a.clone()).unwrap();
        parent.append_child(b.clone()).unwrap();
        parent.append_child(c.clone()).unwrap();

        parent.insert_before(a.clone(), Some(c.clone())).unwrap();
        assert_eq!(parent.to_string(), "<ul>bac</ul>");
        assert!(parent.first_child().unwrap().is(&b));
        assert!(parent.last_child().unwrap().is(&c));

        // Inserting a node before its own next sibling is a no-op
        parent.insert_before(a.clone(), Some(c.clone())).unwrap();
        assert_eq!(parent.to_string(), "<ul>bac</ul>");
    }

    #[test]
    fn insert_before_foreign_reference_fails() {
        let parent = Node::create_element("div");
        let other = Node::create_element("div");
        let reference = Node::create_text("ref".into());
        other.append_child(reference.clone()).unwrap();

        let result = parent.insert_before(Node::create_text("x".into()), Some(reference));
        assert!(matches!(result, Err(Error::Detached)));
    }

    #[test]
    fn insert_into_own_subtree_fails() {
        let outer = Node::create_element("div");
        let inner = Node::create_element("span");
        let leaf = Node::create_text("leaf".into());
        outer.append_child(inner.clone()).unwrap();
        inner.append_child(leaf.clone()).unwrap();

        assert!(matches!(
            outer.append_child(outer.clone()),
            Err(Error::Hierarchy)
        ));
        assert!(matches!(
            inner.insert_before(outer.clone(), Some(leaf.clone())),
            Err(Error::Hierarchy)
        ));

        // The tree is left as it was
        assert_eq!(outer.to_string(), "<div><span>leaf</span></div>");
        assert!(outer.parent().is_none());
    }

    #[test]
    fn text_nodes_have_no_attributes() {
        let text = Node::create_text("plain".into());

        assert!(matches!(
            text.set_attribute("class", "x"),
            Err(Error::NotAnElement)
        ));
        assert_eq!(text.get_attribute("class"), None);
    }

    #[test]
    fn remove_non_child_fails() {
        let parent = Node::create_element("div");
        let stranger = Node::create_text("stranger".into());

        assert!(matches!(
            parent.remove_child(stranger),
            Err(Error::RemoveChild)
        ));
    }

    #[test]
    fn attributes_render_and_clone() {
        let script = Node::create_element("script");
        script.set_attribute("type", "ng/content").unwrap();

        let copy = script.clone_shallow();
        assert!(!copy.is(&script));
        assert_eq!(copy.to_string(), "<script type=\"ng/content\"/>");
        assert_eq!(copy.get_attribute("type").as_deref(), Some("ng/content"));
        assert_eq!(copy.get_attribute("select"), None);
    }
}
