/// The delay and sound timers. Both count down to zero and stay there.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Timers {
    pub delay: u8,
    pub sound: u8,
}

impl Timers {
    pub fn new() -> Self {
        Timers::default()
    }

    pub fn reset(&mut self) {
        *self = Timers::default();
    }

    /// decay both timers by one; returns true when the sound timer just ran
    /// out and a tone is due
    pub fn tick(&mut self) -> bool {
        if self.delay > 0 {
            self.delay -= 1;
        }
        let tone = self.sound == 1;
        if self.sound > 0 {
            self.sound -= 1;
        }
        tone
    }
}
