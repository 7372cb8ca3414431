use crossterm::event::{poll, read, Event, KeyCode, KeyModifiers};
use crossterm::terminal;
use log::warn;
use std::collections::{HashMap, VecDeque};
use std::io;
use std::time::Duration;

/// map of terminal characters onto the hex keypad, using the left-hand side
/// of a qwerty keyboard:
///   1 2 3 4      1 2 3 C
///   q w e r  =>  4 5 6 D
///   a s d f      7 8 9 E
///   z x c v      A 0 B F
const CHIP8_CONVENTIONAL_KEYMAP: [(char, u8); 16] = [
    ('x', 0x00),
    ('1', 0x01),
    ('2', 0x02),
    ('3', 0x03),
    ('q', 0x04),
    ('w', 0x05),
    ('e', 0x06),
    ('a', 0x07),
    ('s', 0x08),
    ('d', 0x09),
    ('z', 0x0a),
    ('c', 0x0b),
    ('4', 0x0c),
    ('r', 0x0d),
    ('f', 0x0e),
    ('v', 0x0f),
];

/// terminals only report presses, so a key counts as held for this many polls
const HOLD_POLLS: u8 = 6;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyEvent {
    Pressed(u8),
    Released(u8),
    Quit,
}

/// reads keypresses
pub trait Input {
    /// everything that happened since the last poll, oldest first
    fn poll(&mut self) -> Result<Vec<KeyEvent>, io::Error>;
}

/// Input from the controlling terminal, via crossterm in raw mode
pub struct TerminalInput {
    keymap: HashMap<char, u8>,
    held: HashMap<u8, u8>,
}

impl TerminalInput {
    pub fn new() -> Result<Self, io::Error> {
        terminal::enable_raw_mode()?;
        Ok(TerminalInput {
            keymap: HashMap::from(CHIP8_CONVENTIONAL_KEYMAP),
            held: HashMap::new(),
        })
    }

    fn age_held(&mut self, events: &mut Vec<KeyEvent>) {
        self.held.retain(|key, polls| {
            *polls = polls.saturating_sub(1);
            if *polls == 0 {
                events.push(KeyEvent::Released(*key));
                false
            } else {
                true
            }
        });
    }
}

impl Drop for TerminalInput {
    fn drop(&mut self) {
        let _ = terminal::disable_raw_mode();
    }
}

impl Input for TerminalInput {
    fn poll(&mut self) -> Result<Vec<KeyEvent>, io::Error> {
        let mut events = Vec::new();
        self.age_held(&mut events);
        while poll(Duration::from_millis(0))? {
            match read()? {
                Event::Key(evt) => match evt.code {
                    KeyCode::Esc => events.push(KeyEvent::Quit),
                    KeyCode::Char('c') if evt.modifiers.contains(KeyModifiers::CONTROL) => {
                        events.push(KeyEvent::Quit)
                    }
                    KeyCode::Char(key) => match self.keymap.get(&key.to_ascii_lowercase()) {
                        Some(mapped_key) => {
                            if self.held.insert(*mapped_key, HOLD_POLLS).is_none() {
                                events.push(KeyEvent::Pressed(*mapped_key));
                            }
                        }
                        None => warn!("can't map {:?} to a CHIP-8 key", key),
                    },
                    _ => warn!("unknown key event received"),
                },
                // resizes and the like are none of our business
                _ => {}
            }
        }
        Ok(events)
    }
}

/// dummy Input implementation for testing; hands out one scripted batch of
/// events per poll
pub struct DummyInput {
    batches: VecDeque<Vec<KeyEvent>>,
}

impl DummyInput {
    pub fn new(batches: Vec<Vec<KeyEvent>>) -> Self {
        DummyInput {
            batches: batches.into(),
        }
    }
}

impl Input for DummyInput {
    fn poll(&mut self) -> Result<Vec<KeyEvent>, io::Error> {
        Ok(self.batches.pop_front().unwrap_or_default())
    }
}
