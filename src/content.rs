use std::rc::Rc;

use crate::error::Error;
use crate::intermediate::IntermediateContent;
use crate::rendered::RenderedContent;
use crate::{Dom, LightDom, SELECT_ATTRIBUTE};

///
/// How a content occurrence handles the nodes projected into it.
///
pub enum ContentStrategy<D: Dom> {
    /// A final insertion point in the live tree.
    Rendered(RenderedContent<D>),

    /// A placeholder inside another component's light DOM,
    /// relaying changes to that component's aggregator.
    Intermediate(IntermediateContent<D>),
}

impl<D: Dom> ContentStrategy<D> {
    pub fn nodes(&self) -> Vec<D::Node> {
        match self {
            Self::Rendered(rendered) => rendered.nodes(),
            Self::Intermediate(intermediate) => intermediate.nodes(),
        }
    }

    pub fn insert(&self, nodes: Vec<D::Node>) -> Result<(), Error> {
        match self {
            Self::Rendered(rendered) => rendered.insert(nodes),
            Self::Intermediate(intermediate) => intermediate.insert(nodes),
        }
    }
}

///
/// The directive bound to a `<content>` element.
///
/// The strategy is chosen once, at construction: when a destination
/// light DOM is given, the content is intermediate. Otherwise it is
/// rendered in place of the element.
///
pub struct ContentDirective<D: Dom> {
    select: Option<String>,
    strategy: ContentStrategy<D>,
}

impl<D: Dom> ContentDirective<D> {
    pub fn new(
        dom: &D,
        destination: Option<Rc<dyn LightDom>>,
        content_el: &D::Element,
    ) -> Result<Self, Error> {
        let select = D::get_attribute(content_el, SELECT_ATTRIBUTE);

        let strategy = match destination {
            Some(destination) => {
                tracing::debug!(?select, "intermediate content");
                ContentStrategy::Intermediate(IntermediateContent::new(destination))
            }
            None => {
                tracing::debug!(?select, "rendered content");
                ContentStrategy::Rendered(RenderedContent::new(dom, content_el)?)
            }
        };

        Ok(Self { select, strategy })
    }

    /// The selection filter, for the aggregator's benefit.
    pub fn select(&self) -> Option<&str> {
        self.select.as_deref()
    }

    pub fn strategy(&self) -> &ContentStrategy<D> {
        &self.strategy
    }

    pub fn is_rendered(&self) -> bool {
        matches!(self.strategy, ContentStrategy::Rendered(_))
    }

    pub fn nodes(&self) -> Vec<D::Node> {
        self.strategy.nodes()
    }

    pub fn insert(&self, nodes: Vec<D::Node>) -> Result<(), Error> {
        tracing::debug!(count = nodes.len(), select = ?self.select, "insert");
        self.strategy.insert(nodes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::server::ServerDom;

    struct Noop;

    impl LightDom for Noop {
        fn redistribute(&self) -> Result<(), Error> {
            Ok(())
        }
    }

    #[test]
    fn select_attribute_is_read_once() {
        let dom = ServerDom::new();
        let content_el = dom.create_element("content");
        content_el.set_attribute("select", ".title").unwrap();
        dom.body().append_child(content_el.clone()).unwrap();

        let directive = ContentDirective::new(&dom, None, &content_el).unwrap();
        content_el.set_attribute("select", ".changed").unwrap();

        assert_eq!(directive.select(), Some(".title"));
        assert!(directive.is_rendered());
    }

    #[test]
    fn missing_select_attribute() {
        let dom = ServerDom::new();
        let content_el = dom.create_element("content");

        let directive = ContentDirective::new(&dom, Some(Rc::new(Noop)), &content_el).unwrap();

        assert_eq!(directive.select(), None);
        assert!(!directive.is_rendered());
        assert!(matches!(
            directive.strategy(),
            ContentStrategy::Intermediate(_)
        ));
    }
}
