use std::sync::mpsc::{self, Receiver, RecvError};
use std::thread;
use std::time::{Duration, Instant};

use crossterm::event::{self, Event as TermEvent, KeyEvent, MouseEventKind};

use crate::pace::StepDirection;

#[derive(Debug, PartialEq)]
pub enum Event {
    Key(KeyEvent),
    /// Mouse wheel over the terminal
    Scroll(StepDirection),
    Tick,
}

/// Terminal events the dashboard reacts to; everything else is dropped.
fn translate(raw: TermEvent) -> Option<Event> {
    match raw {
        TermEvent::Key(key) => Some(Event::Key(key)),
        TermEvent::Mouse(mouse) => match mouse.kind {
            MouseEventKind::ScrollUp => Some(Event::Scroll(StepDirection::Up)),
            MouseEventKind::ScrollDown => Some(Event::Scroll(StepDirection::Down)),
            _ => None,
        },
        _ => None,
    }
}

pub struct EventHandler {
    rx: Receiver<Event>,
}

impl EventHandler {
    pub fn new(tick_rate_ms: u64) -> Self {
        let (tx, rx) = mpsc::channel();
        let tick_rate = Duration::from_millis(tick_rate_ms);

        thread::spawn(move || {
            let mut last_tick = Instant::now();
            loop {
                let wait = tick_rate.saturating_sub(last_tick.elapsed());

                let forwarded = match event::poll(wait) {
                    Ok(true) => match event::read() {
                        Ok(raw) => translate(raw),
                        Err(_) => return,
                    },
                    Ok(false) => None,
                    Err(_) => return,
                };
                if let Some(ev) = forwarded {
                    if tx.send(ev).is_err() {
                        return;
                    }
                }

                if last_tick.elapsed() >= tick_rate {
                    if tx.send(Event::Tick).is_err() {
                        return;
                    }
                    last_tick = Instant::now();
                }
            }
        });

        Self { rx }
    }

    pub fn next(&self) -> Result<Event, RecvError> {
        self.rx.recv()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyModifiers, MouseEvent};

    fn mouse(kind: MouseEventKind) -> TermEvent {
        TermEvent::Mouse(MouseEvent {
            kind,
            column: 0,
            row: 0,
            modifiers: KeyModifiers::NONE,
        })
    }

    #[test]
    fn wheel_maps_to_pace_steps() {
        assert_eq!(
            translate(mouse(MouseEventKind::ScrollUp)),
            Some(Event::Scroll(StepDirection::Up))
        );
        assert_eq!(
            translate(mouse(MouseEventKind::ScrollDown)),
            Some(Event::Scroll(StepDirection::Down))
        );
        assert_eq!(translate(mouse(MouseEventKind::Moved)), None);
    }

    #[test]
    fn keys_pass_through_and_resizes_are_dropped() {
        let key = KeyEvent::new(KeyCode::Char('w'), KeyModifiers::NONE);
        assert_eq!(translate(TermEvent::Key(key)), Some(Event::Key(key)));
        assert_eq!(translate(TermEvent::Resize(80, 24)), None);
    }
}
