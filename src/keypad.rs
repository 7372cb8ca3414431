use std::collections::HashSet;

/// which keys are currently held; anything not recorded is up
#[derive(Clone, Debug, Default)]
pub struct Keypad {
    pressed: HashSet<u8>,
}

impl Keypad {
    pub fn new() -> Self {
        Keypad::default()
    }

    pub fn press(&mut self, key: u8) {
        self.pressed.insert(key);
    }

    pub fn release(&mut self, key: u8) {
        self.pressed.remove(&key);
    }

    pub fn is_pressed(&self, key: u8) -> bool {
        self.pressed.contains(&key)
    }

    pub fn clear(&mut self) {
        self.pressed.clear();
    }
}
