//! Design sessions: select, move and resize the design-mode descendants of a
//! surface with the pointer, snapping to a grid.
//!
//! A session is rooted at one surface. Input is captured on the root's
//! parent, which is also the frame the selection outlines and the resize
//! handle are reported in. The root itself can be selected but never moved.

use bitflags::bitflags;

use crate::error::{DisplayError, Result};
use crate::geometry::{Bounds, Point};
use crate::layout::snap::{resize_remainders, snap_remainder};
use crate::ownership::SurfaceKey;
use crate::render::Renderer;
use crate::window::{Notification, WindowManager};

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct SelectionOp: u8 {
        const SELECT = 0x01;
        const DESELECT = 0x02;
        const TOGGLE = Self::SELECT.bits() | Self::DESELECT.bits();
        const CLEAR = 0x04;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DesignDrag {
    #[default]
    Idle,
    Move,
    Resize,
    /// Pressed on an already selected surface: becomes a move of the whole
    /// selection if the pointer moves, a plain select on release otherwise.
    Pending,
}

#[derive(Debug, Clone)]
pub struct DesignSession {
    root: SurfaceKey,
    selection: Vec<SurfaceKey>,
    drag: DesignDrag,
    anchor: Point,
    target: Option<SurfaceKey>,
}

impl DesignSession {
    fn new(root: SurfaceKey) -> Self {
        Self {
            root,
            selection: Vec::new(),
            drag: DesignDrag::Idle,
            anchor: Point::ZERO,
            target: None,
        }
    }

    pub fn root(&self) -> SurfaceKey {
        self.root
    }

    pub fn selection(&self) -> &[SurfaceKey] {
        &self.selection
    }

    pub fn drag(&self) -> DesignDrag {
        self.drag
    }
}

impl<R: Renderer> WindowManager<R> {
    /// Start designing `root`. It must have a parent and be visible,
    /// created and in design mode. The root starts out selected.
    pub fn design_surface(&mut self, root: SurfaceKey) -> Result<()> {
        let node = self.live(root)?;
        if node.links.parent.is_none()
            || !node.is_created()
            || !node.design_mode
            || !self.is_visible(root)
        {
            return Err(DisplayError::InvalidState(
                "cannot design surface in its current state",
            ));
        }
        if self.is_designing(root) {
            return Err(DisplayError::InvalidState("surface is already being designed"));
        }
        self.designs.push(DesignSession::new(root));
        tracing::debug!(surface = ?root, "design session started");
        self.set_design_selection(root, Some(root), SelectionOp::SELECT | SelectionOp::CLEAR)
    }

    pub fn stop_design(&mut self, root: SurfaceKey) -> Result<()> {
        let idx = self.session_index(root)?;
        self.designs.remove(idx);
        tracing::debug!(surface = ?root, "design session stopped");
        Ok(())
    }

    pub fn is_designing(&self, root: SurfaceKey) -> bool {
        self.designs.iter().any(|d| d.root == root)
    }

    pub fn design_session(&self, root: SurfaceKey) -> Option<&DesignSession> {
        self.designs.iter().find(|d| d.root == root)
    }

    fn session_index(&self, root: SurfaceKey) -> Result<usize> {
        self.designs
            .iter()
            .position(|d| d.root == root)
            .ok_or(DisplayError::InvalidState("surface is not being designed"))
    }

    /// Change the selection of the session rooted at `root`. `None`, the
    /// root itself, or `CLEAR | DESELECT` all reset the selection to just
    /// the root. Selected surfaces always share one parent; selecting a
    /// surface with a different parent replaces the selection.
    pub fn set_design_selection(
        &mut self,
        root: SurfaceKey,
        s: Option<SurfaceKey>,
        op: SelectionOp,
    ) -> Result<()> {
        let idx = self.session_index(root)?;
        let (s, mut op) = match s {
            Some(s) if s != root && !op.contains(SelectionOp::CLEAR | SelectionOp::DESELECT) => {
                (s, op)
            }
            _ => (root, SelectionOp::SELECT | SelectionOp::CLEAR),
        };
        let selected = self.designs[idx].selection.contains(&s);
        if op.contains(SelectionOp::TOGGLE) {
            if selected {
                op.remove(SelectionOp::SELECT);
            } else {
                op.remove(SelectionOp::DESELECT);
            }
        }
        if op.intersects(SelectionOp::SELECT | SelectionOp::CLEAR) {
            if s != root && !self.is_ancestor(root, s) {
                return Err(DisplayError::InvalidParent(
                    "surface is not part of the designed surface",
                ));
            }
            self.live(s)?;
        }
        if !op.contains(SelectionOp::CLEAR)
            && op.contains(SelectionOp::SELECT)
            && let Some(first) = self.designs[idx].selection.first()
            && self.parent(s) != self.parent(*first)
        {
            op |= SelectionOp::CLEAR;
        }

        let session = &mut self.designs[idx];
        if op.contains(SelectionOp::CLEAR) {
            session.selection.clear();
            session.selection.push(s);
        } else if op.contains(SelectionOp::SELECT) {
            if !selected {
                session.selection.push(s);
            }
        } else if op.contains(SelectionOp::DESELECT) {
            session.selection.retain(|k| *k != s);
        }
        tracing::trace!(root = ?root, selection = ?session.selection, "design selection");
        self.emit(Notification::DesignSelectionChanged { root });
        Ok(())
    }

    pub fn is_design_selected(&self, root: SurfaceKey, s: SurfaceKey) -> bool {
        self.design_session(root)
            .is_some_and(|d| d.selection.contains(&s))
    }

    pub fn design_selection(&self, root: SurfaceKey) -> Vec<SurfaceKey> {
        self.design_session(root)
            .map(|d| d.selection.clone())
            .unwrap_or_default()
    }

    /// Re-check the first selected surface matching `s` (any with `None`).
    /// A surface that is no longer created is dropped from the selection; if
    /// it was the only one, its last known parent is selected instead.
    pub fn design_update(&mut self, root: SurfaceKey, s: Option<SurfaceKey>) -> Result<()> {
        let idx = self.session_index(root)?;
        let selection = self.designs[idx].selection.clone();
        let Some(sel) = selection.iter().copied().find(|k| s.is_none_or(|s| s == *k)) else {
            return Ok(());
        };
        if self.nodes.get(sel).is_some_and(|n| n.is_created()) {
            return Ok(());
        }
        if selection.len() == 1 {
            if sel == root {
                return Err(DisplayError::InvalidState("designed surface was destroyed"));
            }
            let parent = self.last_known_parent(sel);
            self.set_design_selection(root, parent, SelectionOp::SELECT | SelectionOp::CLEAR)
        } else {
            self.set_design_selection(root, Some(sel), SelectionOp::DESELECT)
        }
    }

    /// Destroy hook: sessions rooted at `s` stop, selections holding `s` are
    /// repaired.
    pub(crate) fn design_surface_destroyed(&mut self, s: SurfaceKey) {
        if self.is_designing(s) {
            self.designs.retain(|d| d.root != s);
            tracing::debug!(surface = ?s, "design session stopped by destroy");
        }
        let roots: Vec<SurfaceKey> = self
            .designs
            .iter()
            .filter(|d| d.selection.contains(&s) || d.target == Some(s))
            .map(|d| d.root)
            .collect();
        for root in roots {
            if let Ok(idx) = self.session_index(root)
                && self.designs[idx].target == Some(s)
            {
                self.designs[idx].drag = DesignDrag::Idle;
                self.designs[idx].target = None;
            }
            if let Err(err) = self.design_update(root, Some(s)) {
                tracing::debug!(root = ?root, %err, "design selection repair failed");
            }
        }
    }

    /// Bounds of `s` in the client frame of the root's parent, adjusted for
    /// the root's scroll offset.
    fn design_frame(&self, root: SurfaceKey, s: SurfaceKey) -> Result<Bounds> {
        let b = self.bounds(s);
        if s == root {
            return Ok(b);
        }
        let xp = self
            .parent(root)
            .ok_or(DisplayError::InvalidState("designed surface has no parent"))?;
        let sp = self
            .parent(s)
            .ok_or(DisplayError::InvalidParent("selected surface has no parent"))?;
        let mapped = self.map_point(sp, b.origin(), Some(xp))?;
        let scroll = self.scroll_offset(root);
        Ok(Bounds::new(
            mapped.x - scroll.x,
            mapped.y - scroll.y,
            b.width,
            b.height,
        ))
    }

    /// Outline rectangle for a selected surface: half outside and half
    /// inside its bounds.
    pub fn design_outline(&self, root: SurfaceKey, s: SurfaceKey) -> Result<Bounds> {
        let half = crate::constants::DESIGN_OUTLINE_WIDTH / 2.0;
        Ok(self
            .design_frame(root, s)?
            .offset(-half, -half, half * 2.0, half * 2.0))
    }

    /// Resize handle at the bottom-right corner of a single selection.
    pub fn design_resize_handle(&self, root: SurfaceKey) -> Option<Bounds> {
        let session = self.design_session(root)?;
        let [only] = session.selection.as_slice() else {
            return None;
        };
        let frame = self.design_frame(root, *only).ok()?;
        let size = self.config.design_handle_size;
        Some(Bounds::new(frame.right(), frame.bottom(), size, size))
    }

    /// Root of the session whose captured input area holds `s`: the root
    /// itself, one of its descendants, or its parent.
    pub fn design_root_for(&self, s: SurfaceKey) -> Option<SurfaceKey> {
        self.designs
            .iter()
            .map(|d| d.root)
            .find(|root| *root == s || self.is_ancestor(*root, s) || self.parent(*root) == Some(s))
    }

    /// Root of the session with a press or drag in progress.
    pub fn design_dragging(&self) -> Option<SurfaceKey> {
        self.designs
            .iter()
            .find(|d| d.drag != DesignDrag::Idle)
            .map(|d| d.root)
    }

    /// Point in screen coordinates translated into the root parent's client
    /// frame.
    fn design_local(&self, root: SurfaceKey, screen: Point) -> Option<Point> {
        let parent = self.parent(root)?;
        let origin = self.map_point(parent, Point::ZERO, None).ok()?;
        Some(Point::new(screen.x - origin.x, screen.y - origin.y))
    }

    fn design_activate(&mut self, s: SurfaceKey) -> Result<()> {
        if self.nodes.get(s).is_some_and(|n| n.is_window()) {
            self.activate(s, None)
        } else if let Some(w) = self.find_parent_window(s) {
            self.activate(w, Some(s))
        } else {
            Ok(())
        }
    }

    /// Pointer pressed over `target` during the session rooted at `root`.
    /// Returns whether the press was captured by the session.
    pub fn design_pointer_down(
        &mut self,
        root: SurfaceKey,
        target: SurfaceKey,
        screen: Point,
        ctrl: bool,
    ) -> Result<bool> {
        let idx = self.session_index(root)?;
        let Some(parent) = self.parent(root) else {
            return Ok(false);
        };
        if !self.is_enabled(parent) {
            return Ok(false);
        }
        let on_handle = self
            .design_resize_handle(root)
            .zip(self.design_local(root, screen))
            .is_some_and(|(h, pt)| h.contains(pt));
        if on_handle {
            let sf = self.designs[idx].selection[0];
            let session = &mut self.designs[idx];
            session.drag = DesignDrag::Resize;
            session.anchor = screen;
            session.target = Some(sf);
            self.design_activate(sf)?;
            return Ok(true);
        }
        if target == parent || !self.design_mode(target) {
            return Ok(false);
        }
        if target != root && !self.is_ancestor(root, target) {
            return Ok(false);
        }
        self.design_activate(target)?;
        if target != root && self.is_design_selected(root, target) {
            let session = &mut self.designs[idx];
            session.drag = DesignDrag::Pending;
            session.anchor = screen;
            session.target = Some(target);
        } else {
            let op = if ctrl {
                SelectionOp::TOGGLE
            } else {
                SelectionOp::SELECT | SelectionOp::CLEAR
            };
            self.set_design_selection(root, Some(target), op)?;
            if target != root {
                let session = &mut self.designs[idx];
                session.drag = DesignDrag::Move;
                session.anchor = screen;
                session.target = Some(target);
            }
        }
        Ok(true)
    }

    /// Pointer moved during a press in the session. Holding Ctrl disables
    /// snapping. A move with no buttons held behaves like a release.
    pub fn design_pointer_move(
        &mut self,
        root: SurfaceKey,
        screen: Point,
        buttons_held: bool,
        ctrl: bool,
    ) -> Result<bool> {
        let idx = self.session_index(root)?;
        let session = &self.designs[idx];
        let drag = session.drag;
        let Some(s) = session.target else {
            return Ok(false);
        };
        if drag == DesignDrag::Idle {
            return Ok(false);
        }
        if !buttons_held {
            self.design_pointer_up(root, ctrl)?;
            return Ok(true);
        }
        if drag == DesignDrag::Pending {
            self.designs[idx].drag = DesignDrag::Move;
        }
        let grid = self.config.design_grid;
        let b = self.bounds(s);
        let anchor = self.designs[idx].anchor;
        let dx = screen.x - anchor.x;
        let dy = screen.y - anchor.y;
        let mut anchor = screen;

        match self.designs[idx].drag {
            DesignDrag::Move => {
                let mut x = b.x + dx;
                let mut y = b.y + dy;
                if !ctrl {
                    let xd = snap_remainder(x, grid);
                    let yd = snap_remainder(y, grid);
                    x -= xd;
                    y -= yd;
                    anchor = anchor.offset(-xd, -yd);
                }
                self.designs[idx].anchor = anchor;
                let moved = Bounds::new(x, y, b.width, b.height);
                if moved != b {
                    self.set_bounds(s, moved)?;
                    self.emit(Notification::DesignMoved { root, surface: s });
                    let (mx, my) = (x - b.x, y - b.y);
                    for other in self.design_selection(root) {
                        if other == s {
                            continue;
                        }
                        let ob = self.bounds(other).offset(mx, my, 0.0, 0.0);
                        self.set_bounds(other, ob)?;
                        self.emit(Notification::DesignMoved {
                            root,
                            surface: other,
                        });
                    }
                }
            }
            DesignDrag::Resize => {
                let mut w = b.width + dx;
                let mut h = b.height + dy;
                if !ctrl {
                    let client = self.surface(s).is_some_and(|n| n.is_container()).then(|| {
                        let ib = self.client_bounds(s);
                        (ib.width + dx, ib.height + dy)
                    });
                    let (wd, hd) = resize_remainders(w, h, client, grid);
                    w -= wd;
                    h -= hd;
                    anchor = anchor.offset(-wd, -hd);
                }
                self.designs[idx].anchor = anchor;
                let resized = Bounds::new(b.x, b.y, w, h);
                if resized != b {
                    self.set_bounds(s, resized)?;
                    self.emit(Notification::DesignResized { root, surface: s });
                }
            }
            DesignDrag::Idle | DesignDrag::Pending => {}
        }
        Ok(true)
    }

    /// Pointer released. A press on a selected surface that never moved
    /// selects it (alone, or toggled with Ctrl).
    pub fn design_pointer_up(&mut self, root: SurfaceKey, ctrl: bool) -> Result<bool> {
        let idx = self.session_index(root)?;
        let session = &mut self.designs[idx];
        let drag = std::mem::take(&mut session.drag);
        let target = session.target.take();
        match (drag, target) {
            (DesignDrag::Idle, _) => Ok(false),
            (DesignDrag::Pending, Some(t)) => {
                let op = if ctrl {
                    SelectionOp::TOGGLE
                } else {
                    SelectionOp::SELECT | SelectionOp::CLEAR
                };
                self.set_design_selection(root, Some(t), op)?;
                Ok(true)
            }
            _ => Ok(true),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ownership::{DisplayKey, SurfaceId};
    use crate::surface::{Capabilities, SurfaceKind};

    struct Fixture {
        wm: WindowManager,
        d: DisplayKey,
        root: SurfaceKey,
    }

    fn fixture() -> Fixture {
        let mut wm = WindowManager::new();
        let d = wm.create_display("main").unwrap();
        let desk = wm
            .create_desktop(d, Bounds::new(0.0, 0.0, 200.0, 100.0))
            .unwrap();
        let root = wm
            .create_surface(d, SurfaceId::new(1), SurfaceKind::Workspace)
            .unwrap();
        wm.set_parent(root, Some(desk)).unwrap();
        wm.set_bounds(root, Bounds::new(0.0, 0.0, 200.0, 100.0)).unwrap();
        wm.set_design_mode(root, true).unwrap();
        Fixture { wm, d, root }
    }

    fn child(f: &mut Fixture, parent: SurfaceKey, id: i64, bounds: Bounds) -> SurfaceKey {
        let s = f
            .wm
            .create_surface(f.d, SurfaceId::new(id), SurfaceKind::Control(Capabilities::CONTAINER))
            .unwrap();
        f.wm.set_parent(s, Some(parent)).unwrap();
        f.wm.set_bounds(s, bounds).unwrap();
        f.wm.set_design_mode(s, true).unwrap();
        s
    }

    #[test]
    fn design_requires_state() {
        let mut f = fixture();
        let detached = f
            .wm
            .create_surface(f.d, SurfaceId::new(9), SurfaceKind::Workspace)
            .unwrap();
        assert!(matches!(
            f.wm.design_surface(detached),
            Err(DisplayError::InvalidState(_))
        ));
        f.wm.set_design_mode(f.root, false).unwrap();
        assert!(f.wm.design_surface(f.root).is_err());
        f.wm.set_design_mode(f.root, true).unwrap();
        f.wm.design_surface(f.root).unwrap();
        assert_eq!(f.wm.design_selection(f.root), vec![f.root]);
        assert!(f.wm.design_surface(f.root).is_err());
        f.wm.stop_design(f.root).unwrap();
        assert!(!f.wm.is_designing(f.root));
    }

    #[test]
    fn selection_rules() {
        let mut f = fixture();
        let root = f.root;
        let a = child(&mut f, root, 2, Bounds::new(0.0, 0.0, 8.0, 8.0));
        let b = child(&mut f, root, 3, Bounds::new(16.0, 0.0, 8.0, 8.0));
        let c = child(&mut f, a, 4, Bounds::new(1.0, 1.0, 2.0, 2.0));
        f.wm.design_surface(root).unwrap();

        f.wm.set_design_selection(root, Some(a), SelectionOp::SELECT | SelectionOp::CLEAR)
            .unwrap();
        f.wm.set_design_selection(root, Some(b), SelectionOp::SELECT).unwrap();
        assert_eq!(f.wm.design_selection(root), vec![a, b]);
        // Different parent replaces the selection.
        f.wm.set_design_selection(root, Some(c), SelectionOp::SELECT).unwrap();
        assert_eq!(f.wm.design_selection(root), vec![c]);
        f.wm.set_design_selection(root, Some(c), SelectionOp::TOGGLE).unwrap();
        assert!(f.wm.design_selection(root).is_empty());
        f.wm.set_design_selection(root, Some(a), SelectionOp::TOGGLE).unwrap();
        assert_eq!(f.wm.design_selection(root), vec![a]);
        f.wm.set_design_selection(root, Some(a), SelectionOp::CLEAR | SelectionOp::DESELECT)
            .unwrap();
        assert_eq!(f.wm.design_selection(root), vec![root]);
        f.wm.set_design_selection(root, None, SelectionOp::SELECT).unwrap();
        assert_eq!(f.wm.design_selection(root), vec![root]);
    }

    #[test]
    fn destroyed_selection_is_repaired() {
        let mut f = fixture();
        let root = f.root;
        let a = child(&mut f, root, 2, Bounds::new(0.0, 0.0, 8.0, 8.0));
        let x = child(&mut f, a, 3, Bounds::new(0.0, 0.0, 2.0, 2.0));
        let y = child(&mut f, a, 4, Bounds::new(4.0, 0.0, 2.0, 2.0));
        f.wm.design_surface(root).unwrap();

        f.wm.set_design_selection(root, Some(x), SelectionOp::SELECT | SelectionOp::CLEAR)
            .unwrap();
        f.wm.set_design_selection(root, Some(y), SelectionOp::SELECT).unwrap();
        f.wm.destroy(x).unwrap();
        assert_eq!(f.wm.design_selection(root), vec![y]);
        f.wm.destroy(y).unwrap();
        assert_eq!(f.wm.design_selection(root), vec![a]);
        f.wm.destroy(root).unwrap();
        assert!(!f.wm.is_designing(root));
    }

    #[test]
    fn outline_and_handle_follow_mapping() {
        let mut f = fixture();
        let root = f.root;
        f.wm.set_bounds(root, Bounds::new(10.0, 5.0, 100.0, 50.0)).unwrap();
        let a = child(&mut f, root, 2, Bounds::new(2.0, 3.0, 6.0, 4.0));
        f.wm.design_surface(root).unwrap();
        f.wm.set_design_selection(root, Some(a), SelectionOp::SELECT | SelectionOp::CLEAR)
            .unwrap();
        assert_eq!(
            f.wm.design_outline(root, a).unwrap(),
            Bounds::new(11.0, 7.0, 8.0, 6.0)
        );
        assert_eq!(
            f.wm.design_resize_handle(root),
            Some(Bounds::new(18.0, 12.0, 8.0, 8.0))
        );
        let b = child(&mut f, root, 3, Bounds::new(20.0, 3.0, 6.0, 4.0));
        f.wm.set_design_selection(root, Some(b), SelectionOp::SELECT).unwrap();
        assert_eq!(f.wm.design_resize_handle(root), None);
    }

    #[test]
    fn drag_snaps_to_grid() {
        let mut f = fixture();
        let root = f.root;
        let a = child(&mut f, root, 2, Bounds::new(80.0, 16.0, 10.0, 8.0));
        f.wm.design_surface(root).unwrap();
        assert!(f.wm.design_pointer_down(root, a, Point::new(81.0, 17.0), false).unwrap());
        assert_eq!(f.wm.design_selection(root), vec![a]);
        f.wm.design_pointer_move(root, Point::new(84.0, 17.0), true, false)
            .unwrap();
        assert_eq!(f.wm.bounds(a).x, 80.0);
        f.wm.design_pointer_move(root, Point::new(86.0, 17.0), true, false)
            .unwrap();
        assert_eq!(f.wm.bounds(a), Bounds::new(88.0, 16.0, 10.0, 8.0));
        f.wm.design_pointer_up(root, false).unwrap();
        assert!(f.wm.take_notifications().contains(&Notification::DesignMoved {
            root,
            surface: a
        }));
    }

    #[test]
    fn ctrl_disables_snapping() {
        let mut f = fixture();
        let root = f.root;
        let a = child(&mut f, root, 2, Bounds::new(80.0, 16.0, 10.0, 8.0));
        f.wm.design_surface(root).unwrap();
        f.wm.design_pointer_down(root, a, Point::new(81.0, 17.0), false)
            .unwrap();
        f.wm.design_pointer_move(root, Point::new(84.0, 18.0), true, true)
            .unwrap();
        assert_eq!(f.wm.bounds(a), Bounds::new(83.0, 17.0, 10.0, 8.0));
    }

    #[test]
    fn pending_press_moves_whole_selection() {
        let mut f = fixture();
        let root = f.root;
        let a = child(&mut f, root, 2, Bounds::new(8.0, 8.0, 8.0, 8.0));
        let b = child(&mut f, root, 3, Bounds::new(32.0, 8.0, 8.0, 8.0));
        f.wm.design_surface(root).unwrap();
        f.wm.design_pointer_down(root, a, Point::new(9.0, 9.0), false)
            .unwrap();
        f.wm.design_pointer_up(root, false).unwrap();
        f.wm.design_pointer_down(root, b, Point::new(33.0, 9.0), true)
            .unwrap();
        f.wm.design_pointer_up(root, true).unwrap();
        assert_eq!(f.wm.design_selection(root), vec![a, b]);

        f.wm.design_pointer_down(root, a, Point::new(9.0, 9.0), false)
            .unwrap();
        assert_eq!(f.wm.design_session(root).map(|s| s.drag()), Some(DesignDrag::Pending));
        f.wm.design_pointer_move(root, Point::new(17.0, 9.0), true, false)
            .unwrap();
        assert_eq!(f.wm.bounds(a).x, 16.0);
        assert_eq!(f.wm.bounds(b).x, 40.0);
        f.wm.design_pointer_up(root, false).unwrap();
        assert_eq!(f.wm.design_selection(root), vec![a, b]);

        // Press and release without moving narrows to the pressed surface.
        f.wm.design_pointer_down(root, a, Point::new(17.0, 9.0), false)
            .unwrap();
        f.wm.design_pointer_up(root, false).unwrap();
        assert_eq!(f.wm.design_selection(root), vec![a]);
    }

    #[test]
    fn handle_resizes_with_snapping() {
        let mut f = fixture();
        let root = f.root;
        let a = child(&mut f, root, 2, Bounds::new(80.0, 16.0, 10.0, 8.0));
        f.wm.design_surface(root).unwrap();
        f.wm.set_design_selection(root, Some(a), SelectionOp::SELECT | SelectionOp::CLEAR)
            .unwrap();
        assert!(f.wm.design_pointer_down(root, root, Point::new(91.0, 25.0), false).unwrap());
        assert_eq!(f.wm.design_session(root).map(|s| s.drag()), Some(DesignDrag::Resize));
        f.wm.design_pointer_move(root, Point::new(94.0, 25.0), true, false)
            .unwrap();
        assert_eq!(f.wm.bounds(a), Bounds::new(80.0, 16.0, 16.0, 8.0));
        f.wm.design_pointer_move(root, Point::new(94.0, 25.0), false, false)
            .unwrap();
        assert_eq!(f.wm.design_session(root).map(|s| s.drag()), Some(DesignDrag::Idle));
    }

    #[test]
    fn root_cannot_be_dragged() {
        let mut f = fixture();
        let root = f.root;
        f.wm.design_surface(root).unwrap();
        assert!(f.wm.design_pointer_down(root, root, Point::new(150.0, 80.0), false).unwrap());
        assert_eq!(f.wm.design_session(root).map(|s| s.drag()), Some(DesignDrag::Idle));
        f.wm.design_pointer_move(root, Point::new(160.0, 90.0), true, false)
            .unwrap();
        assert_eq!(f.wm.bounds(root), Bounds::new(0.0, 0.0, 200.0, 100.0));
    }
}
