//! Arena-backed document tree.
//!
//! The engine does not own a browser DOM; it operates on this minimal ordered
//! tree instead. Nodes live in slots inside a [`Document`] arena and are
//! addressed by [`NodeId`]. Freed slots go on a free-list and are reused by
//! later allocations, so ids are only meaningful while their node is live.
//!
//! # Offsets
//!
//! Every offset into a text node is a **character** offset, never bytes.
//! Offsets into element nodes are child indices. This matches the position
//! model used by [`crate::selection`].
//!
//! # Invariants
//!
//! - The root is an element and is never detached or freed.
//! - A node has at most one parent; attaching an already-attached node is an
//!   error (detach first).
//! - Decoration elements (flag [`NodeFlags::DECORATION`]) wrap exactly one
//!   text child and never nest. The passes maintain this; the arena itself
//!   does not enforce it.

use bitflags::bitflags;

use crate::error::{Error, Result};

/// ID addressing a node slot in the document arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    /// Slot index backing this id.
    #[must_use]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

bitflags! {
    /// Behavioral flags carried by element nodes.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    pub struct NodeFlags: u8 {
        /// Marker element wrapping exactly one misspelled word's text.
        const DECORATION = 1 << 0;
        /// Host opt-out: the subtree is never tokenized or decorated.
        const SPELLCHECK_OFF = 1 << 1;
    }
}

/// Element tag names understood by the engine.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Tag {
    Div,
    Paragraph,
    Span,
    Code,
    Anchor,
    Pre,
}

impl Tag {
    /// Whether subtrees under this tag are exempt from spellchecking.
    ///
    /// Code, links, and preformatted text are never tokenized or decorated.
    #[must_use]
    pub fn is_excluded(self) -> bool {
        matches!(self, Self::Code | Self::Anchor | Self::Pre)
    }

    /// Lowercase tag name, as a serializer would emit it.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Div => "div",
            Self::Paragraph => "p",
            Self::Span => "span",
            Self::Code => "code",
            Self::Anchor => "a",
            Self::Pre => "pre",
        }
    }
}

/// Class attribute applied to decoration elements.
///
/// External serializers that do not call [`crate::strip_for_sending`] must
/// strip elements carrying this class before treating content as plain text.
pub const DECORATION_CLASS: &str = "misspelled";

/// Payload of a node: either text content or an element.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NodeKind {
    /// A run of text. Offsets into it are character offsets.
    Text(String),
    /// An element with a tag, optional class, flags, and ordered children.
    Element {
        tag: Tag,
        class: Option<String>,
        flags: NodeFlags,
        children: Vec<NodeId>,
    },
}

/// A single node in the arena.
#[derive(Clone, Debug)]
struct Node {
    parent: Option<NodeId>,
    kind: NodeKind,
}

const NO_CHILDREN: &[NodeId] = &[];

/// Ordered tree of text and element nodes.
///
/// The editable document is one such tree rooted at an editor root. The
/// engine mutates it in place but never owns its root; hosts clone the
/// document when they need a disposable copy (e.g. for the send-time strip).
#[derive(Clone, Debug)]
pub struct Document {
    slots: Vec<Option<Node>>,
    free_list: Vec<u32>,
    root: NodeId,
}

impl Document {
    /// Create a document whose root is an element with the given tag.
    #[must_use]
    pub fn new(root_tag: Tag) -> Self {
        let root = Node {
            parent: None,
            kind: NodeKind::Element {
                tag: root_tag,
                class: None,
                flags: NodeFlags::empty(),
                children: Vec::new(),
            },
        };
        Self {
            slots: vec![Some(root)],
            free_list: Vec::new(),
            root: NodeId(0),
        }
    }

    /// The editor root.
    #[must_use]
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Number of live nodes, root included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len() - self.free_list.len()
    }

    /// Whether the document holds only its root.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 1
    }

    /// Whether `id` resolves to a live node.
    #[must_use]
    pub fn contains(&self, id: NodeId) -> bool {
        self.slots
            .get(id.index())
            .is_some_and(std::option::Option::is_some)
    }

    fn alloc(&mut self, node: Node) -> NodeId {
        if let Some(slot) = self.free_list.pop() {
            self.slots[slot as usize] = Some(node);
            NodeId(slot)
        } else {
            self.slots.push(Some(node));
            NodeId((self.slots.len() - 1) as u32)
        }
    }

    fn node(&self, id: NodeId) -> Result<&Node> {
        self.slots
            .get(id.index())
            .and_then(std::option::Option::as_ref)
            .ok_or(Error::NodeNotFound(id))
    }

    fn node_mut(&mut self, id: NodeId) -> Result<&mut Node> {
        self.slots
            .get_mut(id.index())
            .and_then(std::option::Option::as_mut)
            .ok_or(Error::NodeNotFound(id))
    }

    /// Create a detached text node.
    pub fn create_text(&mut self, text: &str) -> NodeId {
        self.alloc(Node {
            parent: None,
            kind: NodeKind::Text(text.to_owned()),
        })
    }

    /// Create a detached element with no class and empty flags.
    pub fn create_element(&mut self, tag: Tag) -> NodeId {
        self.create_element_with(tag, None, NodeFlags::empty())
    }

    /// Create a detached element with an explicit class and flags.
    pub fn create_element_with(
        &mut self,
        tag: Tag,
        class: Option<&str>,
        flags: NodeFlags,
    ) -> NodeId {
        self.alloc(Node {
            parent: None,
            kind: NodeKind::Element {
                tag,
                class: class.map(str::to_owned),
                flags,
                children: Vec::new(),
            },
        })
    }

    /// Parent of `id`, if attached.
    #[must_use]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).ok().and_then(|n| n.parent)
    }

    /// Ordered children of `id`. Empty for text nodes and unknown ids.
    #[must_use]
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        match self.node(id) {
            Ok(Node {
                kind: NodeKind::Element { children, .. },
                ..
            }) => children,
            _ => NO_CHILDREN,
        }
    }

    /// Tag of `id`, if it is an element.
    #[must_use]
    pub fn tag(&self, id: NodeId) -> Option<Tag> {
        match self.node(id) {
            Ok(Node {
                kind: NodeKind::Element { tag, .. },
                ..
            }) => Some(*tag),
            _ => None,
        }
    }

    /// Flags of `id`. Empty for text nodes and unknown ids.
    #[must_use]
    pub fn flags(&self, id: NodeId) -> NodeFlags {
        match self.node(id) {
            Ok(Node {
                kind: NodeKind::Element { flags, .. },
                ..
            }) => *flags,
            _ => NodeFlags::empty(),
        }
    }

    /// Class attribute of `id`, if any.
    #[must_use]
    pub fn class(&self, id: NodeId) -> Option<&str> {
        match self.node(id) {
            Ok(Node {
                kind: NodeKind::Element { class, .. },
                ..
            }) => class.as_deref(),
            _ => None,
        }
    }

    /// Whether `id` is a text node.
    #[must_use]
    pub fn is_text(&self, id: NodeId) -> bool {
        matches!(
            self.node(id),
            Ok(Node {
                kind: NodeKind::Text(_),
                ..
            })
        )
    }

    /// Whether `id` is a decoration marker element.
    #[must_use]
    pub fn is_decoration(&self, id: NodeId) -> bool {
        self.flags(id).contains(NodeFlags::DECORATION)
    }

    /// Text content of `id`, if it is a text node.
    #[must_use]
    pub fn text(&self, id: NodeId) -> Option<&str> {
        match self.node(id) {
            Ok(Node {
                kind: NodeKind::Text(s),
                ..
            }) => Some(s),
            _ => None,
        }
    }

    /// Character length of a text node.
    #[must_use]
    pub fn text_len(&self, id: NodeId) -> Option<usize> {
        self.text(id).map(|s| s.chars().count())
    }

    /// Overwrite the content of a text node.
    pub fn set_text(&mut self, id: NodeId, text: &str) -> Result<()> {
        match &mut self.node_mut(id)?.kind {
            NodeKind::Text(s) => {
                s.clear();
                s.push_str(text);
                Ok(())
            }
            NodeKind::Element { .. } => Err(Error::NotATextNode(id)),
        }
    }

    /// Index of `child` within its parent's child list.
    #[must_use]
    pub fn index_of(&self, child: NodeId) -> Option<usize> {
        let parent = self.parent(child)?;
        self.children(parent).iter().position(|&c| c == child)
    }

    /// Append a detached node to the end of `parent`'s children.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> Result<()> {
        let index = self.children(parent).len();
        self.insert_child(parent, index, child)
    }

    /// Insert a detached node at `index` within `parent`'s children.
    pub fn insert_child(&mut self, parent: NodeId, index: usize, child: NodeId) -> Result<()> {
        if self.node(child)?.parent.is_some() {
            return Err(Error::AlreadyAttached(child));
        }
        match &mut self.node_mut(parent)?.kind {
            NodeKind::Element { children, .. } => {
                let index = index.min(children.len());
                children.insert(index, child);
            }
            NodeKind::Text(_) => return Err(Error::NotAnElement(parent)),
        }
        self.node_mut(child)?.parent = Some(parent);
        Ok(())
    }

    /// Remove `id` from its parent's child list. No-op if already detached.
    pub fn detach(&mut self, id: NodeId) -> Result<()> {
        let Some(parent) = self.node(id)?.parent else {
            return Ok(());
        };
        if let NodeKind::Element { children, .. } = &mut self.node_mut(parent)?.kind {
            children.retain(|&c| c != id);
        }
        self.node_mut(id)?.parent = None;
        Ok(())
    }

    /// Detach `id` and free its slot along with every descendant's.
    ///
    /// The freed ids may be handed out again by later allocations.
    pub fn remove(&mut self, id: NodeId) -> Result<()> {
        if id == self.root {
            return Err(Error::DetachedNode(id));
        }
        self.detach(id)?;
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            if let Some(node) = self.slots.get_mut(current.index()).and_then(|slot| slot.take()) {
                if let NodeKind::Element { children, .. } = node.kind {
                    stack.extend(children);
                }
                self.free_list.push(current.0);
            }
        }
        Ok(())
    }

    /// Put `new` in `old`'s place within `old`'s parent. `old` is detached
    /// but stays live; `new` must be detached beforehand.
    pub fn replace_child(&mut self, old: NodeId, new: NodeId) -> Result<()> {
        let index = self.index_of(old).ok_or(Error::DetachedNode(old))?;
        let parent = self.parent(old).ok_or(Error::DetachedNode(old))?;
        self.detach(old)?;
        self.insert_child(parent, index, new)
    }

    /// Split a text node at a character offset.
    ///
    /// The node keeps `[0, offset)`; a new text node holding `[offset, ..)`
    /// is inserted as its next sibling and returned. The node must be
    /// attached so the sibling has somewhere to go.
    pub fn split_text(&mut self, id: NodeId, offset: usize) -> Result<NodeId> {
        let parent = self.node(id)?.parent.ok_or(Error::DetachedNode(id))?;
        let tail = match &mut self.node_mut(id)?.kind {
            NodeKind::Text(s) => {
                let len = s.chars().count();
                let byte = char_to_byte(s, offset)
                    .ok_or(Error::OffsetOutOfBounds { offset, len })?;
                let tail = s[byte..].to_owned();
                s.truncate(byte);
                tail
            }
            NodeKind::Element { .. } => return Err(Error::NotATextNode(id)),
        };
        let tail_id = self.create_text(&tail);
        let index = self.index_of(id).ok_or(Error::DetachedNode(id))? + 1;
        self.insert_child(parent, index, tail_id)?;
        Ok(tail_id)
    }

    /// Replace `[start, start + len)` (chars) of a text node with `replacement`.
    pub fn replace_text_range(
        &mut self,
        id: NodeId,
        start: usize,
        len: usize,
        replacement: &str,
    ) -> Result<()> {
        match &mut self.node_mut(id)?.kind {
            NodeKind::Text(s) => {
                let total = s.chars().count();
                let from = char_to_byte(s, start).ok_or(Error::OffsetOutOfBounds {
                    offset: start,
                    len: total,
                })?;
                let to = char_to_byte(s, start + len).ok_or(Error::OffsetOutOfBounds {
                    offset: start + len,
                    len: total,
                })?;
                s.replace_range(from..to, replacement);
                Ok(())
            }
            NodeKind::Element { .. } => Err(Error::NotATextNode(id)),
        }
    }

    /// Whether `id` is reachable from the root by parent links.
    #[must_use]
    pub fn is_attached(&self, id: NodeId) -> bool {
        let mut current = id;
        loop {
            if current == self.root {
                return true;
            }
            match self.parent(current) {
                Some(parent) => current = parent,
                None => return false,
            }
        }
    }

    /// Pre-order iterator over the subtree rooted at `id`, `id` included.
    #[must_use]
    pub fn pre_order(&self, id: NodeId) -> PreOrder<'_> {
        PreOrder {
            doc: self,
            stack: if self.contains(id) { vec![id] } else { Vec::new() },
        }
    }

    /// Concatenated text content of the subtree rooted at `id`.
    #[must_use]
    pub fn flatten_text(&self, id: NodeId) -> String {
        let mut out = String::new();
        for node in self.pre_order(id) {
            if let Some(text) = self.text(node) {
                out.push_str(text);
            }
        }
        out
    }
}

/// Pre-order traversal over a [`Document`] subtree.
pub struct PreOrder<'a> {
    doc: &'a Document,
    stack: Vec<NodeId>,
}

impl Iterator for PreOrder<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let id = self.stack.pop()?;
        self.stack.extend(self.doc.children(id).iter().rev());
        Some(id)
    }
}

/// Byte index of the `offset`-th character of `s`, or `s.len()` for the
/// one-past-the-end offset. `None` when past the end.
pub(crate) fn char_to_byte(s: &str, offset: usize) -> Option<usize> {
    let mut remaining = offset;
    for (byte, _) in s.char_indices() {
        if remaining == 0 {
            return Some(byte);
        }
        remaining -= 1;
    }
    (remaining == 0).then_some(s.len())
}
