//! Editable surface abstraction.
//!
//! A surface presents the buffer to the user as an ordered list of render
//! nodes. How the text is split across nodes is a rendering detail: the
//! rest of the crate only ever reasons about linear offsets into the
//! flattened text, which [`caret`] maps to and from node positions.

pub mod caret;

pub use caret::{current_offset, locate, place_caret};

/// A node of the rendered surface, in document order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderNode {
    /// A text-bearing node.
    Text(String),
    /// A non-text node (line-break element, empty span). Contributes
    /// nothing to the flattened text.
    Element,
}

impl RenderNode {
    /// Text carried by this node, if it is text-bearing.
    pub fn text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            Self::Element => None,
        }
    }

    /// Number of chars this node contributes to the flattened text.
    pub fn char_len(&self) -> usize {
        self.text().map_or(0, |t| t.chars().count())
    }
}

/// A point inside the surface: a node index and a char offset within it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodePosition {
    pub node: usize,
    pub offset: usize,
}

impl NodePosition {
    pub const fn new(node: usize, offset: usize) -> Self {
        Self { node, offset }
    }
}

/// One end of a native selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionPoint {
    Inside(NodePosition),
    /// The point lives somewhere else in the host document.
    Outside,
}

/// The host's active selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    pub anchor: SelectionPoint,
    pub focus: SelectionPoint,
}

impl Selection {
    /// A collapsed selection (a caret) at `position`.
    pub const fn caret(position: NodePosition) -> Self {
        Self {
            anchor: SelectionPoint::Inside(position),
            focus: SelectionPoint::Inside(position),
        }
    }

    /// A selection spanning from `anchor` to `focus`.
    pub const fn range(anchor: NodePosition, focus: NodePosition) -> Self {
        Self {
            anchor: SelectionPoint::Inside(anchor),
            focus: SelectionPoint::Inside(focus),
        }
    }

    pub fn is_collapsed(&self) -> bool {
        self.anchor == self.focus
    }
}

/// An editable region owned by the host.
///
/// The core reads nodes and the selection, and writes only through
/// [`Surface::set_text`], [`Surface::append_text_node`] and
/// [`Surface::set_selection`].
pub trait Surface {
    /// Render nodes in document order.
    fn nodes(&self) -> &[RenderNode];

    /// The active selection, if any.
    fn selection(&self) -> Option<Selection>;

    fn set_selection(&mut self, selection: Option<Selection>);

    /// Replace all content with `text`, like assigning text content.
    ///
    /// Leaves a single text node, or no nodes at all when `text` is empty.
    /// The selection is dropped.
    fn set_text(&mut self, text: &str);

    /// Materialize an empty text node at the end and return its index.
    fn append_text_node(&mut self) -> usize;

    /// Opaque style attribute persisted next to the content.
    fn style(&self) -> Option<&str>;

    fn set_style(&mut self, style: Option<String>);

    /// The flattened text: all text nodes concatenated in document order.
    fn text(&self) -> String {
        self.nodes().iter().filter_map(RenderNode::text).collect()
    }

    /// Length of the flattened text in chars.
    fn char_len(&self) -> usize {
        self.nodes().iter().map(RenderNode::char_len).sum()
    }
}

/// In-memory surface that keeps node fragmentation across native edits.
///
/// Native typing goes into whichever text node holds the caret, the way a
/// browser edits an existing text node in place. Only programmatic
/// replacement through [`Surface::set_text`] collapses the nodes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FragmentedSurface {
    nodes: Vec<RenderNode>,
    selection: Option<Selection>,
    style: Option<String>,
}

impl FragmentedSurface {
    /// Create an empty surface with no nodes and no selection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a surface holding `text` in a single node.
    pub fn from_text(text: &str) -> Self {
        let mut surface = Self::new();
        surface.set_text(text);
        surface
    }

    /// Create a surface whose text is split across the given text nodes.
    pub fn from_fragments<I, T>(fragments: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        Self::from_nodes(
            fragments
                .into_iter()
                .map(|f| RenderNode::Text(f.into()))
                .collect(),
        )
    }

    pub const fn from_nodes(nodes: Vec<RenderNode>) -> Self {
        Self {
            nodes,
            selection: None,
            style: None,
        }
    }

    /// Insert `text` at the caret inside the caret's own node.
    ///
    /// A non-collapsed selection is collapsed to its focus first. Returns
    /// `false` when there is no caret inside the surface.
    pub fn insert_at_caret(&mut self, text: &str) -> bool {
        let Some(offset) = self.native_caret() else {
            return false;
        };
        let position = self.text_position(offset);
        let RenderNode::Text(node_text) = &mut self.nodes[position.node] else {
            return false;
        };
        let byte = byte_index(node_text, position.offset);
        node_text.insert_str(byte, text);
        let moved = NodePosition::new(position.node, position.offset + text.chars().count());
        self.selection = Some(Selection::caret(moved));
        true
    }

    /// Delete the char before the caret, across node boundaries.
    ///
    /// Returns `true` if a char was deleted.
    pub fn delete_before_caret(&mut self) -> bool {
        let Some(offset) = self.native_caret() else {
            return false;
        };
        if offset == 0 {
            return false;
        }
        let position = caret::locate_in(&self.nodes, offset - 1, Bias::After);
        let Some(position) = position else {
            return false;
        };
        let RenderNode::Text(node_text) = &mut self.nodes[position.node] else {
            return false;
        };
        let byte = byte_index(node_text, position.offset);
        node_text.remove(byte);
        self.selection = Some(Selection::caret(position));
        true
    }

    /// Collapse any selection onto its focus and return that offset.
    fn native_caret(&mut self) -> Option<usize> {
        let selection = self.selection?;
        if !selection.is_collapsed() {
            self.selection = Some(Selection {
                anchor: selection.focus,
                focus: selection.focus,
            });
        }
        let offset = current_offset(self)?;
        if self.nodes.iter().all(|n| n.text().is_none()) {
            self.append_text_node();
        }
        Some(offset)
    }

    /// Node position for `offset`, always landing in a text node.
    fn text_position(&mut self, offset: usize) -> NodePosition {
        if let Some(Selection {
            focus: SelectionPoint::Inside(position),
            ..
        }) = self.selection
            && self
                .nodes
                .get(position.node)
                .is_some_and(|n| n.text().is_some() && position.offset <= n.char_len())
        {
            return position;
        }
        place_caret(self, offset)
    }
}

/// Which node wins when an offset sits on a boundary between two nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Bias {
    /// End of the earlier node.
    Before,
    /// Start of the later node, so the char at the offset is inside it.
    After,
}

impl Surface for FragmentedSurface {
    fn nodes(&self) -> &[RenderNode] {
        &self.nodes
    }

    fn selection(&self) -> Option<Selection> {
        self.selection
    }

    fn set_selection(&mut self, selection: Option<Selection>) {
        self.selection = selection;
    }

    fn set_text(&mut self, text: &str) {
        self.nodes.clear();
        if !text.is_empty() {
            self.nodes.push(RenderNode::Text(text.to_string()));
        }
        self.selection = None;
    }

    fn append_text_node(&mut self) -> usize {
        self.nodes.push(RenderNode::Text(String::new()));
        self.nodes.len() - 1
    }

    fn style(&self) -> Option<&str> {
        self.style.as_deref()
    }

    fn set_style(&mut self, style: Option<String>) {
        self.style = style;
    }
}

/// Byte index of the `char_idx`-th char of `s`, clamped to its length.
pub(crate) fn byte_index(s: &str, char_idx: usize) -> usize {
    s.char_indices().nth(char_idx).map_or(s.len(), |(i, _)| i)
}
