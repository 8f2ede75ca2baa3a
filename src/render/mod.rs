//! Renderer boundary.
//!
//! The surface tree only ever talks to a [`Renderer`]: it creates drawable
//! nodes, parents them, sets their local geometry and toggles a handful of
//! presentation flags. [`RenderTree`] is the retained headless implementation
//! used by the demo binary and the tests; [`paint`] draws a window manager's
//! tree into a `ratatui` buffer.

pub mod paint;

use slotmap::{SlotMap, new_key_type};

use crate::geometry::{Bounds, Point, Size};

new_key_type! {
    pub struct RenderKey;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PresentationFlag {
    Visible,
    Enabled,
    Active,
    Selected,
    Topmost,
    OwnedRaise,
    Design,
}

impl PresentationFlag {
    const fn bit(self) -> u8 {
        match self {
            PresentationFlag::Visible => 0x01,
            PresentationFlag::Enabled => 0x02,
            PresentationFlag::Active => 0x04,
            PresentationFlag::Selected => 0x08,
            PresentationFlag::Topmost => 0x10,
            PresentationFlag::OwnedRaise => 0x20,
            PresentationFlag::Design => 0x40,
        }
    }
}

pub trait Renderer {
    fn create_node(&mut self) -> RenderKey;
    fn remove_node(&mut self, node: RenderKey);
    /// Parent `node` under `parent`, before `before` when given, else last.
    fn attach(&mut self, node: RenderKey, parent: RenderKey, before: Option<RenderKey>);
    fn detach(&mut self, node: RenderKey);
    /// Position and size in the parent node's local coordinates.
    fn set_geometry(&mut self, node: RenderKey, rect: Bounds);
    fn set_flag(&mut self, node: RenderKey, flag: PresentationFlag, on: bool);
    /// Scrollable extent of the node's content, if the node exists.
    fn scroll_extent(&self, node: RenderKey) -> Option<Size>;
    fn scroll_offset(&self, node: RenderKey) -> Point;
    fn set_scroll_offset(&mut self, node: RenderKey, offset: Point);
}

#[derive(Debug, Clone, Default)]
struct RenderNode {
    parent: Option<RenderKey>,
    children: Vec<RenderKey>,
    rect: Bounds,
    scroll: Point,
    flags: u8,
}

/// Retained node tree mirroring what a real renderer would hold.
#[derive(Debug, Default)]
pub struct RenderTree {
    nodes: SlotMap<RenderKey, RenderNode>,
}

impl RenderTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn contains(&self, node: RenderKey) -> bool {
        self.nodes.contains_key(node)
    }

    pub fn parent(&self, node: RenderKey) -> Option<RenderKey> {
        self.nodes.get(node).and_then(|n| n.parent)
    }

    pub fn children(&self, node: RenderKey) -> &[RenderKey] {
        self.nodes
            .get(node)
            .map(|n| n.children.as_slice())
            .unwrap_or(&[])
    }

    pub fn local_rect(&self, node: RenderKey) -> Option<Bounds> {
        self.nodes.get(node).map(|n| n.rect)
    }

    /// Rectangle in root coordinates, accumulating every ancestor's origin.
    pub fn absolute_rect(&self, node: RenderKey) -> Option<Bounds> {
        let mut rect = self.nodes.get(node)?.rect;
        let mut cur = self.nodes.get(node)?.parent;
        while let Some(p) = cur {
            let pn = self.nodes.get(p)?;
            rect = rect.offset(pn.rect.x - pn.scroll.x, pn.rect.y - pn.scroll.y, 0.0, 0.0);
            cur = pn.parent;
        }
        Some(rect)
    }

    pub fn flag(&self, node: RenderKey, flag: PresentationFlag) -> bool {
        self.nodes
            .get(node)
            .is_some_and(|n| n.flags & flag.bit() != 0)
    }
}

impl Renderer for RenderTree {
    fn create_node(&mut self) -> RenderKey {
        self.nodes.insert(RenderNode {
            flags: PresentationFlag::Visible.bit() | PresentationFlag::Enabled.bit(),
            ..RenderNode::default()
        })
    }

    fn remove_node(&mut self, node: RenderKey) {
        self.detach(node);
        if let Some(removed) = self.nodes.remove(node) {
            for child in removed.children {
                if let Some(c) = self.nodes.get_mut(child) {
                    c.parent = None;
                }
            }
        }
    }

    fn attach(&mut self, node: RenderKey, parent: RenderKey, before: Option<RenderKey>) {
        if node == parent || !self.nodes.contains_key(node) || !self.nodes.contains_key(parent) {
            return;
        }
        self.detach(node);
        if let Some(p) = self.nodes.get_mut(parent) {
            let at = before
                .and_then(|b| p.children.iter().position(|c| *c == b))
                .unwrap_or(p.children.len());
            p.children.insert(at, node);
        }
        if let Some(n) = self.nodes.get_mut(node) {
            n.parent = Some(parent);
        }
    }

    fn detach(&mut self, node: RenderKey) {
        let Some(parent) = self.nodes.get_mut(node).and_then(|n| n.parent.take()) else {
            return;
        };
        if let Some(p) = self.nodes.get_mut(parent)
            && let Some(at) = p.children.iter().rposition(|c| *c == node)
        {
            p.children.remove(at);
        }
    }

    fn set_geometry(&mut self, node: RenderKey, rect: Bounds) {
        if let Some(n) = self.nodes.get_mut(node) {
            n.rect = rect;
        }
    }

    fn set_flag(&mut self, node: RenderKey, flag: PresentationFlag, on: bool) {
        if let Some(n) = self.nodes.get_mut(node) {
            if on {
                n.flags |= flag.bit();
            } else {
                n.flags &= !flag.bit();
            }
        }
    }

    fn scroll_extent(&self, node: RenderKey) -> Option<Size> {
        let n = self.nodes.get(node)?;
        let mut width = n.rect.width;
        let mut height = n.rect.height;
        for child in &n.children {
            if let Some(c) = self.nodes.get(*child) {
                width = width.max(c.rect.right());
                height = height.max(c.rect.bottom());
            }
        }
        Some(Size::new(width, height))
    }

    fn scroll_offset(&self, node: RenderKey) -> Point {
        self.nodes.get(node).map(|n| n.scroll).unwrap_or(Point::ZERO)
    }

    fn set_scroll_offset(&mut self, node: RenderKey, offset: Point) {
        if let Some(n) = self.nodes.get_mut(node) {
            n.scroll = offset;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn attach_orders_children_and_reparents() {
        let mut tree = RenderTree::new();
        let root = tree.create_node();
        let a = tree.create_node();
        let b = tree.create_node();
        tree.attach(a, root, None);
        tree.attach(b, root, Some(a));
        assert_eq!(tree.children(root), &[b, a]);
        tree.attach(b, a, None);
        assert_eq!(tree.children(root), &[a]);
        assert_eq!(tree.parent(b), Some(a));
    }

    #[test]
    fn absolute_rect_accumulates_origins() {
        let mut tree = RenderTree::new();
        let root = tree.create_node();
        let child = tree.create_node();
        tree.attach(child, root, None);
        tree.set_geometry(root, Bounds::new(2.0, 3.0, 50.0, 50.0));
        tree.set_geometry(child, Bounds::new(4.0, 1.0, 5.0, 5.0));
        assert_eq!(
            tree.absolute_rect(child),
            Some(Bounds::new(6.0, 4.0, 5.0, 5.0))
        );
    }

    #[test]
    fn scroll_extent_covers_children() {
        let mut tree = RenderTree::new();
        let root = tree.create_node();
        let child = tree.create_node();
        tree.attach(child, root, None);
        tree.set_geometry(root, Bounds::new(0.0, 0.0, 10.0, 10.0));
        tree.set_geometry(child, Bounds::new(8.0, 2.0, 10.0, 3.0));
        assert_eq!(tree.scroll_extent(root), Some(Size::new(18.0, 10.0)));
    }

    #[test]
    fn flags_default_to_visible_and_enabled() {
        let mut tree = RenderTree::new();
        let n = tree.create_node();
        assert!(tree.flag(n, PresentationFlag::Visible));
        assert!(!tree.flag(n, PresentationFlag::Active));
        tree.set_flag(n, PresentationFlag::Active, true);
        assert!(tree.flag(n, PresentationFlag::Active));
    }
}
