use ego_tree::NodeId;
use scraper::Html;

use crate::dom::Document;
use crate::types::DomError;

impl Document {
    /// Parses a full HTML document; html5ever fills in `html`/`head`/`body`.
    pub fn parse(source: &str) -> Self {
        Self::from_html(Html::parse_document(source))
    }

    /// Parses `source` in a body context into a detached container node.
    ///
    /// The parsed tree is merged into this document as-is, so namespaced
    /// names survive. Move the container's children into the live tree with
    /// [`Document::replace_children`].
    pub fn parse_fragment(&mut self, source: &str) -> Result<NodeId, DomError> {
        let parsed = Html::parse_fragment(source);
        let root = self.page.tree.extend_tree(parsed.tree).id();
        self.node(root)?
            .children()
            .find(|child| child.value().is_element())
            .map(|container| container.id())
            .ok_or_else(|| DomError::Parse("fragment has no context element".to_string()))
    }
}
