//! Caret locator: native selection positions to linear offsets and back.
//!
//! The flattened text is every text node concatenated in document order,
//! so an offset is independent of how the surface happens to be split
//! into nodes.

use super::{Bias, NodePosition, RenderNode, Selection, SelectionPoint, Surface};

/// Linear offset of the caret, counted in chars from the start of the
/// flattened text.
///
/// Returns `None` when there is no selection, when the selection is not
/// collapsed, or when its anchor lies outside the surface.
pub fn current_offset<S: Surface + ?Sized>(surface: &S) -> Option<usize> {
    let selection = surface.selection()?;
    if !selection.is_collapsed() {
        return None;
    }
    let SelectionPoint::Inside(anchor) = selection.anchor else {
        return None;
    };
    let nodes = surface.nodes();
    let node = nodes.get(anchor.node)?;
    let before: usize = nodes[..anchor.node].iter().map(RenderNode::char_len).sum();
    Some(before + anchor.offset.min(node.char_len()))
}

/// Node position whose flattened prefix is exactly `offset` chars long.
///
/// `offset` is clamped to the flattened length. On a boundary between two
/// text nodes the end of the earlier node is chosen. Returns `None` only
/// when the surface has no text nodes at all.
pub fn locate<S: Surface + ?Sized>(surface: &S, offset: usize) -> Option<NodePosition> {
    let nodes = surface.nodes();
    let offset = offset.min(surface.char_len());
    locate_in(nodes, offset, Bias::Before).or_else(|| last_text_end(nodes))
}

/// Collapse the selection at linear `offset` and return where it landed.
///
/// An empty surface gets an empty text node first so the caret has a
/// text-bearing home.
pub fn place_caret<S: Surface + ?Sized>(surface: &mut S, offset: usize) -> NodePosition {
    let position = match locate(surface, offset) {
        Some(position) => position,
        None => NodePosition::new(surface.append_text_node(), 0),
    };
    surface.set_selection(Some(Selection::caret(position)));
    position
}

pub(crate) fn locate_in(nodes: &[RenderNode], offset: usize, bias: Bias) -> Option<NodePosition> {
    let mut remaining = offset;
    for (idx, node) in nodes.iter().enumerate() {
        if node.text().is_none() {
            continue;
        }
        let len = node.char_len();
        let fits = match bias {
            Bias::Before => remaining <= len,
            Bias::After => remaining < len,
        };
        if fits {
            return Some(NodePosition::new(idx, remaining));
        }
        remaining -= len;
    }
    None
}

fn last_text_end(nodes: &[RenderNode]) -> Option<NodePosition> {
    nodes
        .iter()
        .enumerate()
        .rev()
        .find(|(_, node)| node.text().is_some())
        .map(|(idx, node)| NodePosition::new(idx, node.char_len()))
}
