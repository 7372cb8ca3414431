use beep::beep;
use std::error::Error;
use std::time::{Duration, Instant};

pub trait Sound {
    /// sound the tone; called when the sound timer runs out
    fn beep(&mut self) -> Result<(), Box<dyn Error>>;

    /// called once per frame so a tone can end on its own
    fn update(&mut self) -> Result<(), Box<dyn Error>> {
        Ok(())
    }

    fn stop(&mut self) -> Result<(), Box<dyn Error>>;
}

impl<T: Sound + ?Sized> Sound for Box<T> {
    fn beep(&mut self) -> Result<(), Box<dyn Error>> {
        (**self).beep()
    }

    fn update(&mut self) -> Result<(), Box<dyn Error>> {
        (**self).update()
    }

    fn stop(&mut self) -> Result<(), Box<dyn Error>> {
        (**self).stop()
    }
}

const SIMPLEBEEP_PITCH: u16 = 2093; // C
const SIMPLEBEEP_LENGTH: Duration = Duration::from_millis(100);

/// PC speaker tone via the beep crate, silenced after a short while
pub struct SimpleBeep {
    started: Option<Instant>,
}

impl SimpleBeep {
    pub fn new() -> Self {
        SimpleBeep { started: None }
    }

    pub fn is_beeping(&self) -> bool {
        self.started.is_some()
    }
}

impl Default for SimpleBeep {
    fn default() -> Self {
        Self::new()
    }
}

impl Sound for SimpleBeep {
    fn beep(&mut self) -> Result<(), Box<dyn Error>> {
        beep(SIMPLEBEEP_PITCH)?;
        self.started = Some(Instant::now());
        Ok(())
    }

    fn update(&mut self) -> Result<(), Box<dyn Error>> {
        match self.started {
            Some(t) if t.elapsed() >= SIMPLEBEEP_LENGTH => self.stop(),
            _ => Ok(()),
        }
    }

    fn stop(&mut self) -> Result<(), Box<dyn Error>> {
        beep(0)?;
        self.started = None;
        Ok(())
    }
}

/// no audio at all
#[derive(Default)]
pub struct Mute {}

impl Mute {
    pub fn new() -> Self {
        Mute {}
    }
}

impl Sound for Mute {
    fn beep(&mut self) -> Result<(), Box<dyn Error>> {
        Ok(())
    }

    fn stop(&mut self) -> Result<(), Box<dyn Error>> {
        Ok(())
    }
}

/// counts beeps, for tests
#[derive(Debug, Default)]
pub struct CountingSound {
    pub beeps: usize,
}

impl Sound for CountingSound {
    fn beep(&mut self) -> Result<(), Box<dyn Error>> {
        self.beeps += 1;
        Ok(())
    }

    fn stop(&mut self) -> Result<(), Box<dyn Error>> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mute_is_silent() {
        let mut m = Mute::new();
        assert!(m.beep().is_ok());
        assert!(m.update().is_ok());
        assert!(m.stop().is_ok());
    }

    #[test]
    fn test_counting_sound() {
        let mut s = CountingSound::default();
        s.beep().unwrap();
        s.beep().unwrap();
        assert_eq!(s.beeps, 2);
    }

    #[test]
    fn test_simple_beep_starts_quiet() {
        let b = SimpleBeep::new();
        assert!(!b.is_beeping());
    }
}
