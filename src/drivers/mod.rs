pub mod console;
pub mod normalizer;

use std::collections::VecDeque;
use std::io;
use std::time::Duration;

use ::crossterm::event::Event;

/// Source of raw terminal events for an [`EventLoop`](crate::event_loop::EventLoop).
pub trait InputDriver {
    fn poll(&mut self, timeout: Duration) -> io::Result<bool>;
    fn read(&mut self) -> io::Result<Event>;
    fn set_mouse_capture(&mut self, _enabled: bool) -> io::Result<()> {
        Ok(())
    }
}

impl<T: InputDriver + ?Sized> InputDriver for &mut T {
    fn poll(&mut self, timeout: Duration) -> io::Result<bool> {
        (**self).poll(timeout)
    }

    fn read(&mut self) -> io::Result<Event> {
        (**self).read()
    }

    fn set_mouse_capture(&mut self, enabled: bool) -> io::Result<()> {
        (**self).set_mouse_capture(enabled)
    }
}

/// Replays a fixed list of events, then reports an empty queue forever.
/// Used for headless runs and tests.
#[derive(Debug, Default)]
pub struct ScriptedDriver {
    events: VecDeque<Event>,
    mouse_capture: bool,
}

impl ScriptedDriver {
    pub fn new(events: impl IntoIterator<Item = Event>) -> Self {
        Self {
            events: events.into_iter().collect(),
            mouse_capture: false,
        }
    }

    pub fn push(&mut self, event: Event) {
        self.events.push_back(event);
    }

    pub fn remaining(&self) -> usize {
        self.events.len()
    }

    pub fn mouse_capture(&self) -> bool {
        self.mouse_capture
    }
}

impl InputDriver for ScriptedDriver {
    fn poll(&mut self, _timeout: Duration) -> io::Result<bool> {
        Ok(!self.events.is_empty())
    }

    fn read(&mut self) -> io::Result<Event> {
        self.events
            .pop_front()
            .ok_or_else(|| io::Error::new(io::ErrorKind::UnexpectedEof, "script exhausted"))
    }

    fn set_mouse_capture(&mut self, enabled: bool) -> io::Result<()> {
        self.mouse_capture = enabled;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scripted_driver_drains_in_order() {
        let mut d = ScriptedDriver::new([Event::Resize(10, 5), Event::FocusGained]);
        assert!(d.poll(Duration::ZERO).unwrap());
        assert_eq!(d.read().unwrap(), Event::Resize(10, 5));
        assert_eq!(d.read().unwrap(), Event::FocusGained);
        assert!(!d.poll(Duration::ZERO).unwrap());
        assert!(d.read().is_err());
    }

    #[test]
    fn borrowed_driver_forwards() {
        fn capture<D: InputDriver>(mut driver: D) {
            driver.set_mouse_capture(true).unwrap();
        }
        let mut d = ScriptedDriver::default();
        capture(&mut d);
        assert!(d.mouse_capture());
    }
}
