//! Keyboard input: the handful of keys the game understands, and the
//! per-frame batching of terminal key events into press/release pairs.

use std::collections::HashMap;

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Key {
    /// Draws the bow while held, shoots on release.
    Charge,
    Up,
    Down,
    Confirm,
    Escape,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputEvent {
    Pressed(Key),
    Released(Key),
}

/// What a single terminal key event means to the game.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RawInput {
    Key(Key, KeyEventKind),
    /// Ctrl+C: the terminal equivalent of closing the window.
    CloseRequested,
    Ignored,
}

pub fn translate(event: &KeyEvent) -> RawInput {
    if event.modifiers.contains(KeyModifiers::CONTROL) && event.code == KeyCode::Char('c') {
        return RawInput::CloseRequested;
    }
    let key = match event.code {
        KeyCode::Char(' ') => Key::Charge,
        KeyCode::Up => Key::Up,
        KeyCode::Down => Key::Down,
        KeyCode::Enter => Key::Confirm,
        KeyCode::Esc => Key::Escape,
        _ => return RawInput::Ignored,
    };
    RawInput::Key(key, event.kind)
}

/// Turns the raw press/repeat/release stream into one clean batch per frame:
/// exactly one `Pressed` when a key goes down and one `Released` when it
/// comes up, never both for the same key in the same frame. A second change
/// to a key within one frame is carried over to the next.
#[derive(Debug)]
pub struct KeyTracker {
    reports_release: bool,
    /// Frames without a press or repeat after which a key counts as released.
    /// Ignored when the terminal reports releases.
    hold_frames: u64,
    /// Held keys and the frame they were last pressed or repeated.
    held: HashMap<Key, u64>,
    carry: Vec<(Key, KeyEventKind)>,
    frame: u64,
}

impl KeyTracker {
    /// `reports_release` is true on terminals with keyboard enhancement
    /// (kitty protocol); elsewhere releases are inferred after `hold_frames`
    /// silent frames.
    pub fn new(reports_release: bool, hold_frames: u64) -> Self {
        KeyTracker {
            reports_release,
            hold_frames,
            held: HashMap::new(),
            carry: Vec::new(),
            frame: 0,
        }
    }

    /// Consume the raw events gathered during one frame.
    pub fn frame(&mut self, raw: &[(Key, KeyEventKind)]) -> Vec<InputEvent> {
        self.frame += 1;
        let frame = self.frame;
        let mut batch = Vec::new();
        let mut changed: Vec<Key> = Vec::new();

        let carried = std::mem::take(&mut self.carry);
        for &(key, kind) in carried.iter().chain(raw) {
            let waiting = self.carry.iter().any(|(k, _)| *k == key);
            let is_press = matches!(kind, KeyEventKind::Press | KeyEventKind::Repeat);
            let held = self.held.contains_key(&key);
            if !is_press && !held && !waiting {
                continue; // release of a key never seen going down
            }

            if is_press && held && !waiting {
                self.held.insert(key, frame);
            } else if waiting || changed.contains(&key) {
                self.carry.push((key, kind));
            } else if is_press {
                self.held.insert(key, frame);
                changed.push(key);
                batch.push(InputEvent::Pressed(key));
            } else {
                self.held.remove(&key);
                changed.push(key);
                batch.push(InputEvent::Released(key));
            }
        }

        if !self.reports_release {
            let mut expired: Vec<Key> = self
                .held
                .iter()
                .filter(|(key, last_seen)| {
                    frame.saturating_sub(**last_seen) > self.hold_frames
                        && !changed.contains(*key)
                        && !self.carry.iter().any(|(k, _)| k == *key)
                })
                .map(|(key, _)| *key)
                .collect();
            expired.sort();
            for key in expired {
                self.held.remove(&key);
                batch.push(InputEvent::Released(key));
            }
        }

        batch
    }
}
