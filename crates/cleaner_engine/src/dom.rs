//! Live page model the cleaner operates on.
//!
//! The page is a [`scraper::Html`]; nodes live in its [`ego_tree::Tree`] and
//! are never freed while the document exists, so a [`NodeId`] kept by the
//! backup store can go stale (detached) but never dangle. Every child-list
//! change goes through [`Document`] so it can be journaled for observers.

use ego_tree::{NodeId, NodeRef};
use html5ever::serialize::{serialize, SerializeOpts, TraversalScope};
use html5ever::tendril::StrTendril;
use html5ever::{ns, Attribute, LocalName, QualName};
use scraper::node::{Element, Text};
use scraper::{ElementRef, Html, Node, Selector};

use crate::observe::{MutationJournal, MutationRecord};
use crate::types::DomError;

pub struct Document {
    pub(crate) page: Html,
    pub(crate) journal: MutationJournal,
}

impl Default for Document {
    fn default() -> Self {
        Self::empty()
    }
}

impl Document {
    /// A document with nothing but its root node.
    pub fn empty() -> Self {
        Self::from_html(Html::new_document())
    }

    pub(crate) fn from_html(page: Html) -> Self {
        Self {
            page,
            journal: MutationJournal::default(),
        }
    }

    /// The underlying scraper document, detached subtrees included.
    pub fn page(&self) -> &Html {
        &self.page
    }

    pub fn root(&self) -> NodeId {
        self.page.tree.root().id()
    }

    pub fn node(&self, id: NodeId) -> Result<NodeRef<'_, Node>, DomError> {
        self.page.tree.get(id).ok_or(DomError::MissingNode(id))
    }

    pub fn element(&self, id: NodeId) -> Result<&Element, DomError> {
        self.node(id)?
            .value()
            .as_element()
            .ok_or(DomError::NotAnElement(id))
    }

    pub fn html_element(&self) -> Option<NodeId> {
        self.page
            .tree
            .root()
            .children()
            .find(|child| is_element_named(child, "html"))
            .map(|child| child.id())
    }

    pub fn body(&self) -> Option<NodeId> {
        let html = self.page.tree.get(self.html_element()?)?;
        html.children()
            .find(|child| is_element_named(child, "body"))
            .map(|child| child.id())
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.page.tree.get(id)?.parent().map(|parent| parent.id())
    }

    pub fn next_sibling(&self, id: NodeId) -> Option<NodeId> {
        self.page
            .tree
            .get(id)?
            .next_sibling()
            .map(|sibling| sibling.id())
    }

    pub fn children(&self, id: NodeId) -> Vec<NodeId> {
        self.page
            .tree
            .get(id)
            .map(|node| node.children().map(|child| child.id()).collect())
            .unwrap_or_default()
    }

    /// True when `ancestor` is `node` or one of its ancestors.
    pub fn contains(&self, ancestor: NodeId, node: NodeId) -> bool {
        self.inclusive_ancestors(node).contains(&ancestor)
    }

    /// True when the node is reachable from the document root.
    pub fn is_connected(&self, id: NodeId) -> bool {
        self.contains(self.root(), id)
    }

    pub fn text_content(&self, id: NodeId) -> String {
        let Some(node) = self.page.tree.get(id) else {
            return String::new();
        };
        node.descendants()
            .filter_map(|descendant| descendant.value().as_text().map(|text| &**text))
            .collect()
    }

    pub fn element_by_id(&self, id: &str) -> Option<NodeId> {
        self.page
            .tree
            .root()
            .descendants()
            .find(|node| node.value().as_element().and_then(|element| element.id()) == Some(id))
            .map(|node| node.id())
    }

    /// Elements below `scope` matching `selector`, in document order.
    pub fn select(&self, scope: NodeId, selector: &Selector) -> Vec<NodeId> {
        let Some(scope) = self.page.tree.get(scope) else {
            return Vec::new();
        };
        scope
            .descendants()
            .skip(1)
            .filter_map(ElementRef::wrap)
            .filter(|element| selector.matches(element))
            .map(|element| element.id())
            .collect()
    }

    pub fn select_first(&self, scope: NodeId, selector: &Selector) -> Option<NodeId> {
        self.select(scope, selector).into_iter().next()
    }

    /// Parses `css` and selects with it.
    pub fn select_css(&self, scope: NodeId, css: &str) -> Result<Vec<NodeId>, DomError> {
        Ok(self.select(scope, &parse_selector(css)?))
    }

    pub fn matches(&self, id: NodeId, selector: &Selector) -> bool {
        self.page
            .tree
            .get(id)
            .and_then(ElementRef::wrap)
            .is_some_and(|element| selector.matches(&element))
    }

    /// The node itself or its nearest ancestor matching `selector`.
    pub fn closest(&self, id: NodeId, selector: &Selector) -> Option<NodeId> {
        self.inclusive_ancestors(id)
            .into_iter()
            .find(|&candidate| self.matches(candidate, selector))
    }

    pub fn inner_html(&self, id: NodeId) -> Result<String, DomError> {
        self.write_html(id, TraversalScope::ChildrenOnly(None))
    }

    pub fn outer_html(&self, id: NodeId) -> Result<String, DomError> {
        self.write_html(id, TraversalScope::IncludeNode)
    }

    /// Creates a detached HTML element; attach it with one of the insertion methods.
    pub fn create_element(&mut self, name: &str, attrs: &[(&str, &str)]) -> NodeId {
        let attributes = attrs
            .iter()
            .map(|&(name, value)| Attribute {
                name: attribute_name(name),
                value: StrTendril::from_slice(value),
            })
            .collect();
        let name = QualName::new(None, ns!(html), LocalName::from(name.to_ascii_lowercase()));
        self.page
            .tree
            .orphan(Node::Element(Element::new(name, attributes)))
            .id()
    }

    pub fn create_text(&mut self, text: &str) -> NodeId {
        let text = Text {
            text: StrTendril::from_slice(text),
        };
        self.page.tree.orphan(Node::Text(text)).id()
    }

    pub(crate) fn create_fragment(&mut self) -> NodeId {
        self.page.tree.orphan(Node::Fragment).id()
    }

    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), DomError> {
        self.check_insertion(parent, child)?;
        self.detach_recorded(child)?;
        self.page
            .tree
            .get_mut(parent)
            .ok_or(DomError::MissingNode(parent))?
            .append_id(child);
        self.record(parent, vec![child], Vec::new());
        Ok(())
    }

    pub fn insert_before(&mut self, reference: NodeId, child: NodeId) -> Result<(), DomError> {
        if reference == child {
            return Ok(());
        }
        let parent = self.parent(reference).ok_or(DomError::Detached(reference))?;
        self.check_insertion(parent, child)?;
        self.detach_recorded(child)?;
        self.page
            .tree
            .get_mut(reference)
            .ok_or(DomError::MissingNode(reference))?
            .insert_id_before(child);
        self.record(parent, vec![child], Vec::new());
        Ok(())
    }

    pub fn insert_after(&mut self, reference: NodeId, child: NodeId) -> Result<(), DomError> {
        if reference == child {
            return Ok(());
        }
        let parent = self.parent(reference).ok_or(DomError::Detached(reference))?;
        self.check_insertion(parent, child)?;
        self.detach_recorded(child)?;
        self.page
            .tree
            .get_mut(reference)
            .ok_or(DomError::MissingNode(reference))?
            .insert_id_after(child);
        self.record(parent, vec![child], Vec::new());
        Ok(())
    }

    /// Detaches a node (and its subtree) from its parent.
    pub fn remove(&mut self, id: NodeId) -> Result<(), DomError> {
        if self.parent(id).is_none() {
            return Err(DomError::Detached(id));
        }
        self.detach_recorded(id)
    }

    /// Moves every child of `source` into `target`, replacing what `target` held.
    pub fn replace_children(&mut self, target: NodeId, source: NodeId) -> Result<(), DomError> {
        if !can_hold_children(self.node(target)?.value()) {
            return Err(DomError::NotAnElement(target));
        }
        if self.contains(source, target) {
            return Err(DomError::Cycle {
                parent: target,
                child: source,
            });
        }
        for child in self.children(target) {
            self.detach_recorded(child)?;
        }
        for child in self.children(source) {
            self.append_child(target, child)?;
        }
        Ok(())
    }

    pub fn set_text_content(&mut self, target: NodeId, text: &str) -> Result<(), DomError> {
        let replacement = self.create_fragment();
        if !text.is_empty() {
            let text_node = self.create_text(text);
            self.append_child(replacement, text_node)?;
        }
        self.replace_children(target, replacement)
    }

    /// Sets an attribute, keeping its original position when it already exists.
    pub fn set_attr(&mut self, id: NodeId, name: &str, value: &str) -> Result<(), DomError> {
        let rebuilt = with_attribute(self.element(id)?, name, value);
        let mut node = self
            .page
            .tree
            .get_mut(id)
            .ok_or(DomError::MissingNode(id))?;
        *node.value() = Node::Element(rebuilt);
        Ok(())
    }

    fn write_html(&self, id: NodeId, traversal_scope: TraversalScope) -> Result<String, DomError> {
        let element = ElementRef::wrap(self.node(id)?).ok_or(DomError::NotAnElement(id))?;
        // Fragments are parsed with scripting on; `<noscript>` text must be written back raw.
        let opts = SerializeOpts {
            scripting_enabled: true,
            traversal_scope,
            create_missing_parent: false,
        };
        let mut buf = Vec::new();
        serialize(&mut buf, &element, opts).map_err(|err| DomError::Serialize(err.to_string()))?;
        String::from_utf8(buf).map_err(|err| DomError::Serialize(err.to_string()))
    }

    fn inclusive_ancestors(&self, id: NodeId) -> Vec<NodeId> {
        let Some(node) = self.page.tree.get(id) else {
            return Vec::new();
        };
        std::iter::once(id)
            .chain(node.ancestors().map(|ancestor| ancestor.id()))
            .collect()
    }

    fn check_insertion(&self, parent: NodeId, child: NodeId) -> Result<(), DomError> {
        if !can_hold_children(self.node(parent)?.value()) {
            return Err(DomError::NotAnElement(parent));
        }
        self.node(child)?;
        if self.contains(child, parent) {
            return Err(DomError::Cycle { parent, child });
        }
        Ok(())
    }

    fn detach_recorded(&mut self, id: NodeId) -> Result<(), DomError> {
        if let Some(parent) = self.parent(id) {
            self.record(parent, Vec::new(), vec![id]);
        }
        self.page
            .tree
            .get_mut(id)
            .ok_or(DomError::MissingNode(id))?
            .detach();
        Ok(())
    }

    fn record(&mut self, target: NodeId, added: Vec<NodeId>, removed: Vec<NodeId>) {
        let scope = self.inclusive_ancestors(target);
        self.journal.record(
            &scope,
            MutationRecord {
                target,
                added,
                removed,
            },
        );
    }
}

pub(crate) fn parse_selector(css: &str) -> Result<Selector, DomError> {
    Selector::parse(css).map_err(|err| DomError::Selector {
        selector: css.to_string(),
        reason: err.to_string(),
    })
}

fn can_hold_children(node: &Node) -> bool {
    matches!(node, Node::Document | Node::Fragment | Node::Element(_))
}

fn is_element_named(node: &NodeRef<'_, Node>, name: &str) -> bool {
    node.value()
        .as_element()
        .is_some_and(|element| element.name() == name)
}

fn attribute_name(name: &str) -> QualName {
    QualName::new(None, ns!(), LocalName::from(name.to_ascii_lowercase()))
}

/// Copy of `element` with one attribute set. Rebuilt rather than patched so
/// the element's cached id and class list follow the new attributes.
fn with_attribute(element: &Element, name: &str, new_value: &str) -> Element {
    let key = attribute_name(name);
    let mut replaced = false;
    let mut attributes: Vec<Attribute> = element
        .attrs
        .iter()
        .map(|(name, value)| {
            let value = if *name == key {
                replaced = true;
                StrTendril::from_slice(new_value)
            } else {
                value.clone()
            };
            Attribute {
                name: name.clone(),
                value,
            }
        })
        .collect();
    if !replaced {
        attributes.push(Attribute {
            name: key,
            value: StrTendril::from_slice(new_value),
        });
    }
    Element::new(element.name.clone(), attributes)
}
