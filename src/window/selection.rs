//! Selection inside a window and keyboard traversal.

use crate::error::Result;
use crate::events::Key;
use crate::ownership::SurfaceKey;
use crate::render::Renderer;
use crate::surface::Capabilities;

use super::WindowManager;

impl<R: Renderer> WindowManager<R> {
    /// The selected surface of `w`. A stale selection (destroyed or moved
    /// out of the window) falls back to the first auto-select descendant.
    pub fn selected(&self, w: SurfaceKey) -> Option<SurfaceKey> {
        let data = self.window(w)?;
        if let Some(s) = data.selected
            && self.is_live(s)
            && self.find_parent_window(s) == Some(w)
        {
            return Some(s);
        }
        self.next_selection(w, None, true, true)
    }

    /// Select `s` in `w`, focusing it when `w` is active. `s` must be a
    /// selectable surface whose nearest window is `w`.
    pub fn set_selected(&mut self, w: SurfaceKey, s: SurfaceKey) -> bool {
        if self.find_parent_window(s) != Some(w) || !self.can_select(s) {
            return false;
        }
        let active = match self.window_mut(w) {
            Some(data) => {
                data.selected = Some(s);
                data.active
            }
            None => return false,
        };
        if active {
            self.focus(s);
        }
        true
    }

    /// Next selectable surface of `w` in tree order after `start` (or the
    /// first when `start` is `None`), wrapping around. Nested windows are
    /// skipped together with their contents. With `auto_select_only`, only
    /// `AUTO_SELECT` surfaces qualify. Falls back to `start` when nothing
    /// qualifies.
    pub fn next_selection(
        &self,
        w: SurfaceKey,
        start: Option<SurfaceKey>,
        forward: bool,
        auto_select_only: bool,
    ) -> Option<SurfaceKey> {
        let order = self.tab_order(w);
        if order.is_empty() {
            return start;
        }
        let qualifies = |s: SurfaceKey| {
            self.can_select(s)
                && (!auto_select_only
                    || self
                        .nodes
                        .get(s)
                        .is_some_and(|n| n.caps.contains(Capabilities::AUTO_SELECT)))
        };
        let len = order.len();
        let pos = start.and_then(|s| order.iter().position(|k| *k == s));
        let candidates: Box<dyn Iterator<Item = usize>> = match (pos, forward) {
            (Some(p), true) => Box::new((1..=len).map(move |i| (p + i) % len)),
            (Some(p), false) => Box::new((1..=len).map(move |i| (p + len - i) % len)),
            (None, true) => Box::new(0..len),
            (None, false) => Box::new((0..len).rev()),
        };
        candidates.map(|i| order[i]).find(|s| qualifies(*s)).or(start)
    }

    /// Descendants of `w` in depth-first order, not entering nested windows.
    fn tab_order(&self, w: SurfaceKey) -> Vec<SurfaceKey> {
        let mut out = Vec::new();
        let mut stack: Vec<SurfaceKey> = self.children(w).into_iter().rev().collect();
        while let Some(s) = stack.pop() {
            if self.nodes.get(s).is_some_and(|n| n.is_window()) {
                continue;
            }
            out.push(s);
            stack.extend(self.children(s).into_iter().rev());
        }
        out
    }

    /// Window-level handling of a key nobody inside the window consumed.
    /// Returns whether the key was used.
    pub fn window_key(&mut self, w: SurfaceKey, key: Key) -> Result<bool> {
        let forward = match key {
            Key::Tab | Key::Right | Key::Down => true,
            Key::BackTab | Key::Left | Key::Up => false,
            Key::Enter => return Ok(self.perform_default_action(w)),
            Key::Esc => return self.perform_cancel_action(w),
            _ => return Ok(false),
        };
        let current = self
            .focused
            .filter(|f| self.find_parent_window(*f) == Some(w));
        match self.next_selection(w, current, forward, false) {
            Some(next) => Ok(self.set_selected(w, next)),
            None => Ok(false),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::events::Key;
    use crate::geometry::Bounds;
    use crate::ownership::{DisplayKey, SurfaceId, SurfaceKey};
    use crate::surface::{Capabilities, SurfaceKind};
    use crate::window::{WindowManager, WindowStyle};

    fn setup() -> (WindowManager, DisplayKey, SurfaceKey) {
        let mut wm = WindowManager::new();
        let d = wm.create_display("main").unwrap();
        let desk = wm
            .create_desktop(d, Bounds::new(0.0, 0.0, 80.0, 24.0))
            .unwrap();
        (wm, d, desk)
    }

    fn add(wm: &mut WindowManager, d: DisplayKey, parent: SurfaceKey, id: i64, kind: SurfaceKind) -> SurfaceKey {
        let s = wm.create_surface(d, SurfaceId::new(id), kind).unwrap();
        wm.set_parent(s, Some(parent)).unwrap();
        s
    }

    const FIELD: SurfaceKind = SurfaceKind::Control(Capabilities::SELECTABLE);

    #[test]
    fn tab_walks_tree_order_and_wraps() {
        let (mut wm, d, desk) = setup();
        let w = add(&mut wm, d, desk, 1, SurfaceKind::Window(WindowStyle::framed()));
        let a = add(&mut wm, d, w, 2, SurfaceKind::Workspace);
        let b = add(&mut wm, d, a, 3, FIELD);
        let c = add(&mut wm, d, a, 4, FIELD);
        let dd = add(&mut wm, d, w, 5, FIELD);
        wm.flush_deferred();
        assert!(wm.set_selected(w, b));
        assert_eq!(wm.focused(), Some(b));
        let mut seen = Vec::new();
        for _ in 0..3 {
            wm.window_key(w, Key::Tab).unwrap();
            seen.push(wm.focused().unwrap());
        }
        assert_eq!(seen, vec![c, dd, b]);
        wm.window_key(w, Key::BackTab).unwrap();
        assert_eq!(wm.focused(), Some(dd));
    }

    #[test]
    fn auto_select_fallback() {
        let (mut wm, d, desk) = setup();
        let w = add(&mut wm, d, desk, 1, SurfaceKind::Window(WindowStyle::framed()));
        let _plain = add(&mut wm, d, w, 2, FIELD);
        let auto = add(
            &mut wm,
            d,
            w,
            3,
            SurfaceKind::Control(Capabilities::SELECTABLE | Capabilities::AUTO_SELECT),
        );
        assert_eq!(wm.selected(w), Some(auto));
        wm.flush_deferred();
        assert_eq!(wm.focused(), Some(auto));
    }

    #[test]
    fn nested_windows_are_not_traversed() {
        let (mut wm, d, desk) = setup();
        let w = add(&mut wm, d, desk, 1, SurfaceKind::Window(WindowStyle::framed()));
        let a = add(&mut wm, d, w, 2, FIELD);
        let inner = add(&mut wm, d, w, 3, SurfaceKind::Window(WindowStyle::PLAIN));
        let hidden = add(&mut wm, d, inner, 4, FIELD);
        assert_eq!(wm.next_selection(w, Some(a), true, false), Some(a));
        assert!(!wm.set_selected(w, hidden));
    }

    #[test]
    fn disabled_surfaces_are_skipped() {
        let (mut wm, d, desk) = setup();
        let w = add(&mut wm, d, desk, 1, SurfaceKind::Window(WindowStyle::framed()));
        let a = add(&mut wm, d, w, 2, FIELD);
        let b = add(&mut wm, d, w, 3, FIELD);
        let c = add(&mut wm, d, w, 4, FIELD);
        wm.set_enabled(b, false).unwrap();
        assert_eq!(wm.next_selection(w, Some(a), true, false), Some(c));
        assert_eq!(wm.next_selection(w, Some(a), false, false), Some(c));
    }

    #[test]
    fn start_is_returned_when_nothing_qualifies() {
        let (mut wm, d, desk) = setup();
        let w = add(&mut wm, d, desk, 1, SurfaceKind::Window(WindowStyle::framed()));
        let label = add(&mut wm, d, w, 2, SurfaceKind::Control(Capabilities::empty()));
        assert_eq!(wm.next_selection(w, Some(label), true, false), Some(label));
        assert_eq!(wm.next_selection(w, Some(label), false, false), Some(label));
        assert_eq!(wm.next_selection(w, None, true, false), None);

        let empty = add(&mut wm, d, desk, 3, SurfaceKind::Window(WindowStyle::framed()));
        assert_eq!(wm.next_selection(empty, Some(label), true, false), Some(label));
    }
}
