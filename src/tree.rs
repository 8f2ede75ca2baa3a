//! Hierarchy operations: lifecycle, parenting, sibling order, visibility,
//! focus and coordinate mapping.

use crate::error::{DisplayError, Result};
use crate::events::Key;
use crate::geometry::{Bounds, Point};
use crate::ownership::{DisplayKey, SurfaceId, SurfaceKey};
use crate::render::{PresentationFlag, Renderer};
use crate::surface::{Capabilities, Lifecycle, RenderNodes, SurfaceKind, SurfaceNode};
use crate::window::{Notification, WindowManager};

impl<R: Renderer> WindowManager<R> {
    /// Display-scoped factory. The identity is registered immediately; a
    /// failed registration leaves the display and the arena untouched.
    pub fn create_surface(
        &mut self,
        display: DisplayKey,
        id: SurfaceId,
        kind: SurfaceKind,
    ) -> Result<SurfaceKey> {
        let desktop = matches!(kind, SurfaceKind::Desktop);
        self.displays
            .get(display)
            .ok_or(DisplayError::InvalidState("unknown display"))?
            .check_surface(id, desktop)?;

        let outer = self.renderer.create_node();
        let client = if kind.separate_client() {
            let client = self.renderer.create_node();
            self.renderer.attach(client, outer, None);
            client
        } else {
            outer
        };
        let key = self
            .nodes
            .insert(SurfaceNode::new(id, display, kind, RenderNodes { outer, client }));
        if let Some(d) = self.displays.get_mut(display) {
            d.register_surface(id, key, desktop);
        }
        if self.nodes[key].is_window() {
            self.windows.push(key);
        }
        tracing::debug!(surface = ?key, %id, ?kind, "registered surface");

        self.apply_bounds(key);
        if desktop {
            self.create(key)?;
        }
        Ok(key)
    }

    /// Create and size the display's desktop root.
    pub fn create_desktop(&mut self, display: DisplayKey, bounds: Bounds) -> Result<SurfaceKey> {
        let bounds = bounds.validate()?;
        let key = self.create_surface(display, SurfaceId::DESKTOP, SurfaceKind::Desktop)?;
        self.set_bounds(key, bounds)?;
        Ok(key)
    }

    /// Move a surface to `Created`. Repeated calls are no-ops.
    pub fn create(&mut self, s: SurfaceKey) -> Result<()> {
        let node = self.live(s)?;
        if node.is_created() {
            return Ok(());
        }
        let container = node.is_container();
        let window = node.is_window();
        if let Some(n) = self.nodes.get_mut(s) {
            n.lifecycle = Lifecycle::Created;
        }
        tracing::debug!(surface = ?s, "created surface");
        if container {
            self.container_resized(s);
        }
        if window {
            self.apply_state_bounds(s)?;
        }
        Ok(())
    }

    pub fn destroy(&mut self, s: SurfaceKey) -> Result<()> {
        let node = self
            .nodes
            .get(s)
            .ok_or(DisplayError::InvalidState("unknown surface"))?;
        if node.is_destroyed() {
            return Ok(());
        }
        let display = node.display;
        let id = node.id;

        if node.is_window() {
            let was_active = self.active == Some(s);
            self.deactivate(s)?;
            if was_active
                && self.active.is_none()
                && let Some(desk) = self.desktop(display)
                && desk != s
            {
                self.focus(desk);
            }
        }

        while let Some(last) = self.nodes.get(s).and_then(|n| n.links.last_child) {
            self.destroy(last)?;
        }

        self.unlink(s);
        let render = self.nodes[s].render;
        if render.separate() {
            self.renderer.remove_node(render.client);
        }
        self.renderer.remove_node(render.outer);
        if let Some(d) = self.displays.get_mut(display) {
            d.unregister_surface(id, s);
        }
        self.nodes[s].lifecycle = Lifecycle::Destroyed;

        if self.focused == Some(s) {
            self.set_focus(None);
        }
        if self.active == Some(s) {
            self.active = None;
        }
        if self.nodes[s].is_window() {
            self.windows.retain(|w| *w != s);
        }
        for w in &self.windows {
            if let Some(data) = self.nodes.get_mut(*w).and_then(|n| n.window.as_mut()) {
                if data.owner == Some(s) {
                    data.owner = None;
                    data.owned_raise = false;
                }
                if data.selected == Some(s) {
                    data.selected = None;
                }
            }
        }
        if self.window_drag.as_ref().is_some_and(|d| d.window == s) {
            self.window_drag = None;
        }
        self.switcher.forget(s);
        self.design_surface_destroyed(s);

        tracing::debug!(surface = ?s, %id, "destroyed surface");
        self.emit(Notification::Destroyed { surface: s, id });
        Ok(())
    }

    /// Attach to `parent`, or detach with `None`. Validation completes before
    /// anything is mutated.
    pub fn set_parent(&mut self, child: SurfaceKey, parent: Option<SurfaceKey>) -> Result<()> {
        let node = self.live(child)?;
        if node.links.parent == parent {
            return Ok(());
        }
        match parent {
            None => {
                self.unlink(child);
                self.window_parent_changed(child);
                Ok(())
            }
            Some(p) => {
                self.validate_attach(child, p)?;
                self.attach(child, p, None)
            }
        }
    }

    /// Insert `child` into `parent` before `before`, or last with `None`.
    pub fn insert_child(
        &mut self,
        parent: SurfaceKey,
        child: SurfaceKey,
        before: Option<SurfaceKey>,
    ) -> Result<()> {
        self.live(parent)?;
        self.live(child)?;
        if before == Some(child) {
            return Ok(());
        }
        if let Some(b) = before
            && self.nodes.get(b).and_then(|n| n.links.parent) != Some(parent)
        {
            return Err(DisplayError::InvalidParent(
                "insertion point is not a child of the parent",
            ));
        }
        if self.nodes[child].links.parent == Some(parent) {
            self.unlink(child);
            self.link(child, parent, before);
            return Ok(());
        }
        self.validate_attach(child, parent)?;
        self.attach(child, parent, before)
    }

    pub fn bring_to_front(&mut self, s: SurfaceKey) -> Result<()> {
        let node = self.live(s)?;
        if let Some(p) = node.links.parent
            && self.nodes[p].links.last_child != Some(s)
        {
            self.unlink(s);
            self.link(s, p, None);
            tracing::trace!(surface = ?s, "brought to front");
        }
        Ok(())
    }

    fn validate_attach(&self, child: SurfaceKey, parent: SurfaceKey) -> Result<()> {
        let c = self.live(child)?;
        let p = self.live(parent)?;
        if c.display != p.display {
            return Err(DisplayError::CrossDisplay);
        }
        if child == parent {
            return Err(DisplayError::InvalidParent(
                "a surface cannot be its own parent",
            ));
        }
        if c.caps.contains(Capabilities::DESKTOP) {
            return Err(DisplayError::InvalidParent("the desktop cannot have a parent"));
        }
        if !p.is_container() {
            return Err(DisplayError::InvalidParent("parent is not a container"));
        }
        if self.is_ancestor(child, parent) {
            return Err(DisplayError::InvalidParent(
                "parent is a descendant of the child",
            ));
        }
        Ok(())
    }

    fn attach(
        &mut self,
        child: SurfaceKey,
        parent: SurfaceKey,
        before: Option<SurfaceKey>,
    ) -> Result<()> {
        self.unlink(child);
        self.link(child, parent, before);
        self.apply_bounds(child);
        tracing::trace!(surface = ?child, parent = ?parent, "attached surface");
        self.create(child)?;
        self.window_parent_changed(child);
        Ok(())
    }

    fn unlink(&mut self, s: SurfaceKey) {
        let links = self.nodes[s].links;
        let Some(p) = links.parent else {
            return;
        };
        match links.prev_sibling {
            Some(prev) => self.nodes[prev].links.next_sibling = links.next_sibling,
            None => self.nodes[p].links.first_child = links.next_sibling,
        }
        match links.next_sibling {
            Some(next) => self.nodes[next].links.prev_sibling = links.prev_sibling,
            None => self.nodes[p].links.last_child = links.prev_sibling,
        }
        let l = &mut self.nodes[s].links;
        l.parent = None;
        l.next_sibling = None;
        l.prev_sibling = None;
        l.last_parent = Some(p);
        let outer = self.nodes[s].render.outer;
        self.renderer.detach(outer);
    }

    /// Caller guarantees `s` is detached and `before`, if any, is a child of `p`.
    fn link(&mut self, s: SurfaceKey, p: SurfaceKey, before: Option<SurfaceKey>) {
        match before {
            Some(b) => {
                let prev = self.nodes[b].links.prev_sibling;
                self.nodes[s].links.prev_sibling = prev;
                self.nodes[s].links.next_sibling = Some(b);
                self.nodes[b].links.prev_sibling = Some(s);
                match prev {
                    Some(pr) => self.nodes[pr].links.next_sibling = Some(s),
                    None => self.nodes[p].links.first_child = Some(s),
                }
            }
            None => {
                let last = self.nodes[p].links.last_child;
                self.nodes[s].links.prev_sibling = last;
                self.nodes[s].links.next_sibling = None;
                match last {
                    Some(l) => self.nodes[l].links.next_sibling = Some(s),
                    None => self.nodes[p].links.first_child = Some(s),
                }
                self.nodes[p].links.last_child = Some(s);
            }
        }
        self.nodes[s].links.parent = Some(p);
        self.nodes[s].links.last_parent = Some(p);
        let outer = self.nodes[s].render.outer;
        let client = self.nodes[p].render.client;
        let before_node = before.map(|b| self.nodes[b].render.outer);
        self.renderer.attach(outer, client, before_node);
    }

    pub fn parent(&self, s: SurfaceKey) -> Option<SurfaceKey> {
        self.nodes.get(s).and_then(|n| n.links.parent)
    }

    /// Live parent, or for a detached or destroyed surface the parent it had
    /// last. Diagnostic only.
    pub fn last_known_parent(&self, s: SurfaceKey) -> Option<SurfaceKey> {
        self.nodes
            .get(s)
            .and_then(|n| n.links.parent.or(n.links.last_parent))
    }

    pub fn first_child(&self, s: SurfaceKey) -> Option<SurfaceKey> {
        self.nodes.get(s).and_then(|n| n.links.first_child)
    }

    pub fn last_child(&self, s: SurfaceKey) -> Option<SurfaceKey> {
        self.nodes.get(s).and_then(|n| n.links.last_child)
    }

    pub fn next_sibling(&self, s: SurfaceKey) -> Option<SurfaceKey> {
        self.nodes.get(s).and_then(|n| n.links.next_sibling)
    }

    pub fn previous_sibling(&self, s: SurfaceKey) -> Option<SurfaceKey> {
        self.nodes.get(s).and_then(|n| n.links.prev_sibling)
    }

    pub fn children(&self, s: SurfaceKey) -> Vec<SurfaceKey> {
        let mut out = Vec::new();
        let mut cur = self.first_child(s);
        while let Some(c) = cur {
            out.push(c);
            cur = self.next_sibling(c);
        }
        out
    }

    /// Children in paint order: normal, then owned-raise, then topmost
    /// windows, each group in sibling order.
    pub fn paint_order(&self, s: SurfaceKey) -> Vec<SurfaceKey> {
        let mut out = self.children(s);
        out.sort_by_key(|c| self.window(*c).map(|w| w.layer()).unwrap_or(0));
        out
    }

    pub(crate) fn is_front_child(&self, s: SurfaceKey) -> bool {
        self.parent(s)
            .is_some_and(|p| self.last_child(p) == Some(s))
    }

    /// True if `a` is a strict ancestor of `b`.
    pub fn is_ancestor(&self, a: SurfaceKey, b: SurfaceKey) -> bool {
        let mut cur = self.parent(b);
        while let Some(p) = cur {
            if p == a {
                return true;
            }
            cur = self.parent(p);
        }
        false
    }

    pub fn set_visible(&mut self, s: SurfaceKey, visible: bool) -> Result<()> {
        self.live(s)?;
        let outer = self.nodes[s].render.outer;
        self.nodes[s].visible = visible;
        self.renderer
            .set_flag(outer, PresentationFlag::Visible, visible);
        self.window_availability_changed(s, self.is_visible(s))
    }

    /// Effective visibility: the surface and every ancestor are visible.
    pub fn is_visible(&self, s: SurfaceKey) -> bool {
        let mut cur = Some(s);
        while let Some(k) = cur {
            match self.nodes.get(k) {
                Some(n) if n.visible => cur = n.links.parent,
                _ => return false,
            }
        }
        true
    }

    pub fn set_enabled(&mut self, s: SurfaceKey, enabled: bool) -> Result<()> {
        self.live(s)?;
        let outer = self.nodes[s].render.outer;
        self.nodes[s].enabled = enabled;
        self.renderer
            .set_flag(outer, PresentationFlag::Enabled, enabled);
        self.window_availability_changed(s, self.is_enabled(s))
    }

    pub fn is_enabled(&self, s: SurfaceKey) -> bool {
        let mut cur = Some(s);
        while let Some(k) = cur {
            match self.nodes.get(k) {
                Some(n) if n.enabled => cur = n.links.parent,
                _ => return false,
            }
        }
        true
    }

    pub fn set_text(&mut self, s: SurfaceKey, text: &str) -> Result<()> {
        self.live(s)?;
        self.nodes[s].text = text.to_string();
        Ok(())
    }

    pub fn text(&self, s: SurfaceKey) -> &str {
        self.nodes.get(s).map(|n| n.text.as_str()).unwrap_or("")
    }

    pub fn set_design_mode(&mut self, s: SurfaceKey, on: bool) -> Result<()> {
        self.live(s)?;
        let outer = self.nodes[s].render.outer;
        self.nodes[s].design_mode = on;
        self.renderer.set_flag(outer, PresentationFlag::Design, on);
        Ok(())
    }

    pub fn design_mode(&self, s: SurfaceKey) -> bool {
        self.nodes.get(s).is_some_and(|n| n.design_mode)
    }

    /// Let a surface consume Tab, Enter, Esc and the arrow keys itself.
    pub fn set_navigation_keys(&mut self, s: SurfaceKey, consume: bool) -> Result<()> {
        self.live(s)?;
        self.nodes[s].navigation_keys = consume;
        Ok(())
    }

    /// Whether the surface handles `key` itself instead of leaving it to
    /// window navigation.
    pub fn is_input_key(&self, s: SurfaceKey, key: Key) -> bool {
        if key.is_navigation() {
            self.nodes.get(s).is_some_and(|n| n.navigation_keys)
        } else {
            true
        }
    }

    pub fn can_focus(&self, s: SurfaceKey) -> bool {
        self.nodes.get(s).is_some_and(|n| n.is_created())
            && self.is_enabled(s)
            && self.is_visible(s)
    }

    pub fn can_select(&self, s: SurfaceKey) -> bool {
        self.nodes
            .get(s)
            .is_some_and(|n| n.caps.contains(Capabilities::SELECTABLE))
            && self.can_focus(s)
    }

    /// Nearest window strictly above `s`.
    pub fn find_parent_window(&self, s: SurfaceKey) -> Option<SurfaceKey> {
        let mut cur = self.parent(s);
        while let Some(p) = cur {
            if self.nodes.get(p).is_some_and(|n| n.is_window()) {
                return Some(p);
            }
            cur = self.parent(p);
        }
        None
    }

    /// Move keyboard focus to `s`. Only surfaces inside the active window,
    /// the active top-level window itself, or surfaces outside any window
    /// (such as the desktop) can take focus. Returns whether focus moved.
    pub fn focus(&mut self, s: SurfaceKey) -> bool {
        if !self.can_focus(s) {
            return false;
        }
        let parent_window = self.find_parent_window(s);
        let allowed = match parent_window {
            Some(w) => self.window(w).is_some_and(|w| w.active),
            None => match self.window(s) {
                Some(w) => w.active,
                None => true,
            },
        };
        if !allowed {
            tracing::debug!(surface = ?s, "not focusing in inactive window");
            return false;
        }
        self.set_focus(Some(s));
        if self.nodes[s].caps.contains(Capabilities::SELECTABLE)
            && let Some(w) = parent_window
            && let Some(data) = self.window_mut(w)
        {
            data.selected = Some(s);
        }
        true
    }

    pub fn has_focus(&self, s: SurfaceKey) -> bool {
        self.focused == Some(s)
    }

    pub(crate) fn set_focus(&mut self, to: Option<SurfaceKey>) {
        let from = self.focused;
        if from == to {
            return;
        }
        if let Some(old) = from.and_then(|k| self.nodes.get(k)) {
            let node = old.render.outer;
            self.renderer
                .set_flag(node, PresentationFlag::Selected, false);
        }
        if let Some(new) = to.and_then(|k| self.nodes.get(k)) {
            let node = new.render.outer;
            self.renderer
                .set_flag(node, PresentationFlag::Selected, true);
        }
        self.focused = to;
        tracing::trace!(?from, ?to, "focus changed");
        self.emit(Notification::FocusChanged { from, to });
    }

    /// Map a point in `s`'s client coordinates into the client coordinates of
    /// the ancestor `to`, or into root coordinates with `None`.
    pub fn map_point(&self, s: SurfaceKey, pt: Point, to: Option<SurfaceKey>) -> Result<Point> {
        let mut out = pt;
        let mut cur = Some(s);
        loop {
            if cur == to {
                break;
            }
            let Some(k) = cur else {
                return Err(DisplayError::InvalidParent("not an ancestor"));
            };
            let n = self
                .nodes
                .get(k)
                .ok_or(DisplayError::InvalidState("unknown surface"))?;
            out = out.offset(n.bounds.x + n.padding.left, n.bounds.y + n.padding.top);
            cur = n.links.parent;
        }
        Ok(out)
    }

    /// Outer rectangle in root coordinates.
    pub fn screen_bounds(&self, s: SurfaceKey) -> Option<Bounds> {
        let n = self.nodes.get(s)?;
        let origin = self
            .map_point(s, Point::new(-n.padding.left, -n.padding.top), None)
            .ok()?;
        Some(n.bounds.with_origin(origin))
    }

    /// Deepest visible surface under `pt` (root coordinates) starting at
    /// `root`, honouring paint order.
    pub fn hit_test(&self, root: SurfaceKey, pt: Point) -> Option<SurfaceKey> {
        let rect = self.screen_bounds(root)?;
        self.hit_test_at(root, rect, pt)
    }

    fn hit_test_at(&self, s: SurfaceKey, rect: Bounds, pt: Point) -> Option<SurfaceKey> {
        let n = self.nodes.get(s)?;
        if !n.visible || n.is_destroyed() || !rect.contains(pt) {
            return None;
        }
        let client = rect.origin().offset(n.padding.left, n.padding.top);
        for child in self.paint_order(s).into_iter().rev() {
            let Some(c) = self.nodes.get(child) else {
                continue;
            };
            let crect = c.bounds.with_origin(client.offset(c.bounds.x, c.bounds.y));
            if let Some(hit) = self.hit_test_at(child, crect, pt) {
                return Some(hit);
            }
        }
        Some(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Padding;
    use crate::window::WindowStyle;

    fn setup() -> (WindowManager, DisplayKey, SurfaceKey) {
        let mut wm = WindowManager::new();
        let d = wm.create_display("main").unwrap();
        let desk = wm
            .create_desktop(d, Bounds::new(0.0, 0.0, 80.0, 24.0))
            .unwrap();
        (wm, d, desk)
    }

    fn control(wm: &mut WindowManager, d: DisplayKey, id: i64) -> SurfaceKey {
        wm.create_surface(d, SurfaceId::new(id), SurfaceKind::Control(Capabilities::SELECTABLE))
            .unwrap()
    }

    #[test]
    fn create_is_idempotent() {
        let (mut wm, d, _) = setup();
        let s = control(&mut wm, d, 1);
        wm.create(s).unwrap();
        let before = wm.take_notifications();
        wm.create(s).unwrap();
        assert!(wm.take_notifications().is_empty());
        assert!(before.is_empty());
        assert_eq!(wm.surface(s).map(|n| n.lifecycle()), Some(Lifecycle::Created));
    }

    #[test]
    fn attach_auto_creates_and_orders_children() {
        let (mut wm, d, desk) = setup();
        let a = control(&mut wm, d, 1);
        let b = control(&mut wm, d, 2);
        let c = control(&mut wm, d, 3);
        wm.set_parent(a, Some(desk)).unwrap();
        wm.set_parent(c, Some(desk)).unwrap();
        wm.insert_child(desk, b, Some(c)).unwrap();
        assert_eq!(wm.children(desk), vec![a, b, c]);
        assert!(wm.surface(b).unwrap().is_created());
        wm.bring_to_front(a).unwrap();
        assert_eq!(wm.children(desk), vec![b, c, a]);
        assert_eq!(wm.previous_sibling(a), Some(c));
        assert_eq!(wm.next_sibling(a), None);
    }

    #[test]
    fn invalid_parents_are_rejected_without_mutation() {
        let (mut wm, d, desk) = setup();
        let outer = wm
            .create_surface(d, SurfaceId::new(1), SurfaceKind::Workspace)
            .unwrap();
        let inner = wm
            .create_surface(d, SurfaceId::new(2), SurfaceKind::Workspace)
            .unwrap();
        let leaf = control(&mut wm, d, 3);
        wm.set_parent(outer, Some(desk)).unwrap();
        wm.set_parent(inner, Some(outer)).unwrap();

        assert!(matches!(
            wm.set_parent(outer, Some(outer)),
            Err(DisplayError::InvalidParent(_))
        ));
        assert!(matches!(
            wm.set_parent(outer, Some(inner)),
            Err(DisplayError::InvalidParent(_))
        ));
        assert!(matches!(
            wm.set_parent(inner, Some(leaf)),
            Err(DisplayError::InvalidParent(_))
        ));
        assert_eq!(wm.parent(outer), Some(desk));
        assert_eq!(wm.parent(inner), Some(outer));

        let other = wm.create_display("other").unwrap();
        let foreign = control(&mut wm, other, 1);
        assert_eq!(
            wm.set_parent(foreign, Some(desk)),
            Err(DisplayError::CrossDisplay)
        );
        assert_eq!(wm.parent(foreign), None);
        assert!(wm.children(desk).iter().all(|c| *c != foreign));
    }

    #[test]
    fn destroy_keeps_last_known_parent() {
        let (mut wm, d, desk) = setup();
        let s = control(&mut wm, d, 1);
        wm.set_parent(s, Some(desk)).unwrap();
        wm.destroy(s).unwrap();
        assert_eq!(wm.parent(s), None);
        assert_eq!(wm.last_known_parent(s), Some(desk));
        assert!(wm.children(desk).is_empty());
        assert_eq!(wm.lookup(d, SurfaceId::new(1)), None);
        wm.destroy(s).unwrap();
    }

    #[test]
    fn destroying_a_wide_workspace_releases_every_child() {
        let (mut wm, d, desk) = setup();
        let owner = wm
            .create_surface(d, SurfaceId::new(1), SurfaceKind::Window(WindowStyle::framed()))
            .unwrap();
        wm.set_parent(owner, Some(desk)).unwrap();
        let tool = wm
            .create_surface(d, SurfaceId::new(2), SurfaceKind::Window(WindowStyle::framed()))
            .unwrap();
        wm.set_parent(tool, Some(desk)).unwrap();
        wm.set_owner(tool, Some(owner)).unwrap();
        let render_nodes = wm.renderer().len();

        let space = wm
            .create_surface(d, SurfaceId::new(3), SurfaceKind::Workspace)
            .unwrap();
        wm.set_parent(space, Some(owner)).unwrap();
        for id in 10..20_010 {
            let c = control(&mut wm, d, id);
            wm.set_parent(c, Some(space)).unwrap();
        }
        wm.destroy(space).unwrap();
        assert_eq!(wm.renderer().len(), render_nodes);
        assert_eq!(wm.display(d).unwrap().surfaces().len(), 2);
        assert_eq!(wm.windows, vec![owner, tool]);

        wm.destroy(owner).unwrap();
        assert_eq!(wm.windows, vec![tool]);
        assert_eq!(wm.owner(tool), None);
        assert!(!wm.window(tool).unwrap().owned_raise());
    }

    #[test]
    fn effective_visibility_follows_ancestors() {
        let (mut wm, d, desk) = setup();
        let panel = wm
            .create_surface(d, SurfaceId::new(1), SurfaceKind::Panel)
            .unwrap();
        let s = control(&mut wm, d, 2);
        wm.set_parent(panel, Some(desk)).unwrap();
        wm.set_parent(s, Some(panel)).unwrap();
        assert!(wm.can_select(s));
        wm.set_visible(panel, false).unwrap();
        assert!(!wm.is_visible(s));
        assert!(!wm.can_focus(s));
        wm.set_visible(panel, true).unwrap();
        wm.set_enabled(panel, false).unwrap();
        assert!(!wm.is_enabled(s));
    }

    #[test]
    fn map_point_accumulates_bounds_and_padding() {
        let (mut wm, d, desk) = setup();
        let panel = wm
            .create_surface(d, SurfaceId::new(1), SurfaceKind::Panel)
            .unwrap();
        let s = control(&mut wm, d, 2);
        wm.set_parent(panel, Some(desk)).unwrap();
        wm.set_parent(s, Some(panel)).unwrap();
        wm.set_bounds(panel, Bounds::new(10.0, 5.0, 30.0, 10.0)).unwrap();
        wm.set_padding(panel, Padding::uniform(1.0)).unwrap();
        wm.set_bounds(s, Bounds::new(2.0, 3.0, 4.0, 1.0)).unwrap();
        assert_eq!(
            wm.map_point(s, Point::ZERO, Some(desk)).unwrap(),
            Point::new(13.0, 9.0)
        );
        assert_eq!(
            wm.screen_bounds(s),
            Some(Bounds::new(13.0, 9.0, 4.0, 1.0))
        );
        assert!(wm.map_point(desk, Point::ZERO, Some(s)).is_err());
        assert_eq!(wm.hit_test(desk, Point::new(14.0, 9.0)), Some(s));
        assert_eq!(wm.hit_test(desk, Point::new(11.0, 6.0)), Some(panel));
    }

    #[test]
    fn focus_requires_active_window() {
        let (mut wm, d, desk) = setup();
        let w = wm
            .create_surface(d, SurfaceId::new(1), SurfaceKind::Window(WindowStyle::framed()))
            .unwrap();
        let s = control(&mut wm, d, 2);
        wm.set_parent(s, Some(w)).unwrap();
        assert!(!wm.focus(s));
        assert!(wm.focus(desk));
        wm.set_parent(w, Some(desk)).unwrap();
        wm.flush_deferred();
        assert_eq!(wm.active_window(), Some(w));
        assert!(wm.focus(s));
        assert_eq!(wm.window(w).and_then(|w| w.selected), Some(s));
    }
}
