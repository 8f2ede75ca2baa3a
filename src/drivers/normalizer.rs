//! Smooths over terminal differences before events reach the dispatcher.
use crossterm::event::{Event, KeyCode, KeyEventKind, KeyModifiers, MouseEventKind};

#[derive(Debug, Default)]
pub struct InputNormalizer {
    esc_down: bool,
    last_drag: Option<(u16, u16)>,
}

impl InputNormalizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `None` for events the window manager should never see:
    /// key releases, a held Esc repeating, and drags that did not move.
    pub fn normalize(&mut self, evt: Event) -> Option<Event> {
        match evt {
            Event::Key(mut key) => {
                if key.code == KeyCode::Tab && key.modifiers.contains(KeyModifiers::SHIFT) {
                    key.code = KeyCode::BackTab;
                    key.modifiers.remove(KeyModifiers::SHIFT);
                }
                match key.kind {
                    KeyEventKind::Release => {
                        if key.code == KeyCode::Esc {
                            self.esc_down = false;
                        }
                        return None;
                    }
                    KeyEventKind::Repeat if key.code == KeyCode::Esc => return None,
                    KeyEventKind::Repeat => key.kind = KeyEventKind::Press,
                    KeyEventKind::Press => {}
                }
                if key.code == KeyCode::Esc {
                    // Windows consoles report a held Esc as repeated presses.
                    if cfg!(windows) && self.esc_down {
                        return None;
                    }
                    self.esc_down = true;
                } else {
                    self.esc_down = false;
                }
                Some(Event::Key(key))
            }
            Event::Mouse(mouse) => {
                match mouse.kind {
                    MouseEventKind::Drag(_) => {
                        let at = (mouse.column, mouse.row);
                        if self.last_drag == Some(at) {
                            return None;
                        }
                        self.last_drag = Some(at);
                    }
                    _ => self.last_drag = None,
                }
                Some(Event::Mouse(mouse))
            }
            other => Some(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyEvent, MouseButton, MouseEvent};

    fn drag(column: u16, row: u16) -> Event {
        Event::Mouse(MouseEvent {
            kind: MouseEventKind::Drag(MouseButton::Left),
            column,
            row,
            modifiers: KeyModifiers::NONE,
        })
    }

    #[test]
    fn tab_with_shift_becomes_backtab() {
        let mut norm = InputNormalizer::new();
        let out = norm
            .normalize(Event::Key(KeyEvent::new(KeyCode::Tab, KeyModifiers::SHIFT)))
            .expect("should return event");
        let Event::Key(k) = out else {
            panic!("expected key event");
        };
        assert_eq!(k.code, KeyCode::BackTab);
        assert!(!k.modifiers.contains(KeyModifiers::SHIFT));
    }

    #[test]
    fn releases_are_dropped_and_repeats_become_presses() {
        let mut norm = InputNormalizer::new();
        let mut key = KeyEvent::new(KeyCode::Char('a'), KeyModifiers::NONE);
        key.kind = KeyEventKind::Release;
        assert!(norm.normalize(Event::Key(key)).is_none());

        key.kind = KeyEventKind::Repeat;
        let Some(Event::Key(out)) = norm.normalize(Event::Key(key)) else {
            panic!("expected key event");
        };
        assert_eq!(out.kind, KeyEventKind::Press);
    }

    #[test]
    fn stationary_drags_are_coalesced() {
        let mut norm = InputNormalizer::new();
        assert!(norm.normalize(drag(3, 4)).is_some());
        assert!(norm.normalize(drag(3, 4)).is_none());
        assert!(norm.normalize(drag(4, 4)).is_some());
        assert!(norm.normalize(Event::Resize(10, 20)).is_some());
    }
}
