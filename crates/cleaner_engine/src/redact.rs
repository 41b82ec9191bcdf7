//! Reversible hiding of quoted history inside one message.

use cleaner_logging::cleaner_warn;
use ego_tree::NodeId;
use scraper::Node;

use crate::dom::Document;
use crate::types::{DomError, RedactReport, SkippedNode};

const HIDDEN_STYLE: &str = "display: none;";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Outcome {
    Hidden,
    Untouched,
}

/// Hides each marker and the siblings that follow it, up to the next marker
/// or the end of the marker's parent.
///
/// Nothing is removed: elements get `display: none`, non-blank text is moved
/// into a hidden `<span>`. Markers outside `message` and nodes that have been
/// detached are skipped and reported.
pub fn hide_history(document: &mut Document, message: NodeId, markers: &[NodeId]) -> RedactReport {
    let mut report = RedactReport::default();

    for (index, &marker) in markers.iter().enumerate() {
        if !document.contains(message, marker) {
            skip(&mut report, marker, DomError::Detached(marker));
            continue;
        }
        let boundary = markers.get(index + 1).copied();
        let mut cursor = document.next_sibling(marker);
        apply(document, marker, &mut report);

        while let Some(node) = cursor {
            if Some(node) == boundary {
                break;
            }
            // Wrapping moves text under a new span; read the sibling first.
            cursor = document.next_sibling(node);
            apply(document, node, &mut report);
        }
    }

    report
}

fn apply(document: &mut Document, node: NodeId, report: &mut RedactReport) {
    match hide_node(document, node) {
        Ok(Outcome::Hidden) => report.hidden += 1,
        Ok(Outcome::Untouched) => {}
        Err(reason) => skip(report, node, reason),
    }
}

fn skip(report: &mut RedactReport, node: NodeId, reason: DomError) {
    cleaner_warn!("Ignored node {:?} during cleaning: {}", node, reason);
    report.skipped.push(SkippedNode { node, reason });
}

fn hide_node(document: &mut Document, node: NodeId) -> Result<Outcome, DomError> {
    if document.parent(node).is_none() {
        return Err(DomError::Detached(node));
    }
    let (is_element, is_visible_text) = match document.node(node)?.value() {
        Node::Element(_) => (true, false),
        Node::Text(text) => (false, !text.trim().is_empty()),
        _ => (false, false),
    };

    if is_element {
        document.set_style_property(node, "display", "none")?;
        return Ok(Outcome::Hidden);
    }
    if is_visible_text {
        let wrapper = document.create_element("span", &[("style", HIDDEN_STYLE)]);
        document.insert_before(node, wrapper)?;
        document.append_child(wrapper, node)?;
        return Ok(Outcome::Hidden);
    }
    Ok(Outcome::Untouched)
}

/// True when the node itself carries `display: none`.
pub fn is_hidden(document: &Document, node: NodeId) -> bool {
    document
        .style_property(node, "display")
        .is_some_and(|value| value.eq_ignore_ascii_case("none"))
}
