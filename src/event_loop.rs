use std::io;
use std::time::{Duration, Instant};

use crossterm::event::Event;

use crate::drivers::InputDriver;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlFlow {
    Continue,
    /// Keep going, but wake no later than the given instant (the next
    /// deferred window-manager task).
    WaitUntil(Instant),
    Quit,
}

/// The single input pump for the UI thread.
///
/// The handler is called with `None` once per iteration before polling, so
/// it can run due deferred tasks and redraw, then with `Some(event)` for
/// every event the driver has queued. Bursts (drags, scrolling) are drained
/// in one go so rendering never falls behind the input stream.
pub struct EventLoop<D> {
    driver: D,
    poll_interval: Duration,
}

/// How long to block waiting for input given an optional wake-up deadline.
pub fn poll_timeout(interval: Duration, deadline: Option<Instant>, now: Instant) -> Duration {
    match deadline {
        Some(due) => interval.min(due.saturating_duration_since(now)),
        None => interval,
    }
}

impl<D: InputDriver> EventLoop<D> {
    pub fn new(driver: D, poll_interval: Duration) -> Self {
        Self {
            driver,
            poll_interval,
        }
    }

    pub fn poll_interval(&self) -> Duration {
        self.poll_interval
    }

    pub fn poll(&mut self) -> io::Result<Option<Event>> {
        if self.driver.poll(self.poll_interval)? {
            Ok(Some(self.driver.read()?))
        } else {
            Ok(None)
        }
    }

    pub fn driver(&mut self) -> &mut D {
        &mut self.driver
    }

    pub fn into_driver(self) -> D {
        self.driver
    }

    /// Runs until the handler returns [`ControlFlow::Quit`].
    pub fn run<F>(&mut self, mut handler: F) -> io::Result<()>
    where
        F: FnMut(&mut D, Option<Event>) -> io::Result<ControlFlow>,
    {
        loop {
            let deadline = match handler(&mut self.driver, None)? {
                ControlFlow::Quit => break,
                ControlFlow::WaitUntil(due) => Some(due),
                ControlFlow::Continue => None,
            };
            let timeout = poll_timeout(self.poll_interval, deadline, Instant::now());

            if self.driver.poll(timeout)? {
                loop {
                    let event = self.driver.read()?;
                    if let ControlFlow::Quit = handler(&mut self.driver, Some(event))? {
                        return Ok(());
                    }
                    if !self.driver.poll(Duration::ZERO)? {
                        break;
                    }
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::drivers::ScriptedDriver;

    #[test]
    fn timeout_shrinks_to_deadline() {
        let now = Instant::now();
        let interval = Duration::from_millis(50);
        assert_eq!(poll_timeout(interval, None, now), interval);
        assert_eq!(
            poll_timeout(interval, Some(now + Duration::from_millis(20)), now),
            Duration::from_millis(20)
        );
        assert_eq!(
            poll_timeout(interval, Some(now - Duration::from_millis(5)), now),
            Duration::ZERO
        );
    }

    #[test]
    fn drains_burst_then_ticks() {
        let driver = ScriptedDriver::new([Event::Resize(1, 1), Event::Resize(2, 2)]);
        let mut ev = EventLoop::new(driver, Duration::ZERO);
        let mut seen = Vec::new();
        ev.run(|_, event| {
            seen.push(event.clone());
            Ok(if event.is_none() && seen.len() > 1 {
                ControlFlow::Quit
            } else {
                ControlFlow::Continue
            })
        })
        .unwrap();
        assert_eq!(
            seen,
            vec![
                None,
                Some(Event::Resize(1, 1)),
                Some(Event::Resize(2, 2)),
                None
            ]
        );
    }
}
