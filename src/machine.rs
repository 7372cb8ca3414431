//! # machine
//!
//! The scheduler around the interpreter. A host drives it one presentation
//! frame at a time through `on_tick`:
//!
//!  * run up to `cycles_per_frame` instructions while the machine is running
//!  * hand the framebuffer to the display if anything was drawn
//!  * every `timer_divider` frames, decay the timers and beep if the sound
//!    timer just ran out
//!
//! FX0A parks the machine in `WaitingForKey`. The next `set_key` is routed to
//! the waiting register instead of the keypad and restarts the machine.

use crate::clock::FrameClock;
use crate::config::Config;
use crate::display::Display;
use crate::error::{Chip8Error, Result};
use crate::input::{Input, KeyEvent};
use crate::interpreter::{Chip8Interpreter, Flow};
use crate::sound::Sound;
use log::{debug, error, info};
use std::io;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RunState {
    Stopped,
    Running,
    /// suspended on FX0A; the next key pressed lands in this register
    WaitingForKey { register: usize },
    /// a fatal instruction was hit; only `reset` gets out of here
    Halted { opcode: u16 },
}

pub struct Chip8Machine<D: Display, S: Sound> {
    interpreter: Chip8Interpreter,
    display: Option<D>,
    sound: S,
    config: Config,
    state: RunState,
    frame: u64,
}

impl<D: Display, S: Sound> Chip8Machine<D, S> {
    pub fn new(sound: S, config: Config) -> Self {
        let interpreter = match config.seed {
            Some(seed) => Chip8Interpreter::with_seed(seed),
            None => Chip8Interpreter::new(),
        };
        Chip8Machine {
            interpreter,
            display: None,
            sound,
            config,
            state: RunState::Stopped,
            frame: 0,
        }
    }

    pub fn attach_display(&mut self, display: D) {
        self.display = Some(display);
    }

    pub fn display(&self) -> Option<&D> {
        self.display.as_ref()
    }

    pub fn sound(&self) -> &S {
        &self.sound
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn interpreter(&self) -> &Chip8Interpreter {
        &self.interpreter
    }

    pub fn interpreter_mut(&mut self) -> &mut Chip8Interpreter {
        &mut self.interpreter
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == RunState::Running
    }

    /// frames seen since the last reset
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// fresh machine state, stopped; load a program next
    pub fn reset(&mut self) {
        self.interpreter.reset();
        self.state = RunState::Stopped;
        self.frame = 0;
        debug!("machine reset");
    }

    pub fn load_program(&mut self, program: &[u8]) {
        self.interpreter.load_program(program);
    }

    pub fn load_program_from(&mut self, reader: &mut impl io::Read) -> Result<usize> {
        self.interpreter.load_program_from(reader)
    }

    pub fn start(&mut self) -> Result<()> {
        if self.display.is_none() {
            return Err(Chip8Error::NoDisplay);
        }
        match self.state {
            RunState::Halted { opcode } => return Err(Chip8Error::Halted { opcode }),
            // only a key press ends the wait
            RunState::WaitingForKey { .. } => return Ok(()),
            RunState::Stopped | RunState::Running => {}
        }
        self.state = RunState::Running;
        debug!("machine started at pc {:#05x}", self.interpreter.registers().pc);
        Ok(())
    }

    /// Stop running cycles. Idempotent; a pending key wait stays pending and
    /// a halted machine stays halted.
    pub fn stop(&mut self) {
        if self.state == RunState::Running {
            self.state = RunState::Stopped;
            debug!("machine stopped");
        }
    }

    /// a key went down; consumed by a pending FX0A if there is one
    pub fn set_key(&mut self, key: u8) -> Result<()> {
        match self.state {
            RunState::WaitingForKey { register } => {
                self.interpreter.registers_mut().v[register] = key;
                debug!("key {:#x} -> V{:X}, resuming", key, register);
                self.state = RunState::Stopped;
                self.start()
            }
            _ => {
                self.interpreter.keypad_mut().press(key);
                Ok(())
            }
        }
    }

    pub fn unset_key(&mut self, key: u8) {
        self.interpreter.keypad_mut().release(key);
    }

    /// one presentation frame's worth of work
    pub fn on_tick(&mut self) -> Result<()> {
        let mut fault = None;
        for _ in 0..self.config.cycles_per_frame {
            if !self.is_running() {
                break;
            }
            if let Err(e) = self.cycle() {
                fault = Some(e);
                break;
            }
        }

        // sprites drawn before a fault still reach the screen
        if self.interpreter.take_draw_pending() {
            if let Some(display) = self.display.as_mut() {
                display.render(self.interpreter.framebuffer().as_slice())?;
            }
        }
        if let Some(e) = fault {
            return Err(e);
        }

        if self.frame % self.config.timer_divider.max(1) == 0 && self.interpreter.timers_mut().tick()
        {
            self.sound
                .beep()
                .map_err(|e| Chip8Error::Audio(e.to_string()))?;
        }
        self.frame += 1;

        self.sound
            .update()
            .map_err(|e| Chip8Error::Audio(e.to_string()))
    }

    fn cycle(&mut self) -> Result<()> {
        let opcode = self.interpreter.current_opcode();
        match self.interpreter.step() {
            Ok(Flow::Continue) => Ok(()),
            Ok(Flow::ClearScreen) => match self.display.as_mut() {
                Some(display) => Ok(display.clear()?),
                None => Ok(()),
            },
            Ok(Flow::WaitForKey(register)) => {
                debug!("waiting for a key for V{:X}", register);
                self.state = RunState::WaitingForKey { register };
                Ok(())
            }
            Err(e) => {
                if e.is_fatal_instruction() {
                    error!("halting: {}", e);
                    self.state = RunState::Halted { opcode };
                }
                Err(e)
            }
        }
    }

    /// Drive the machine from a clock and an input source until the input
    /// asks to quit, `max_frames` have gone by, or something fatal happens.
    pub fn run(
        &mut self,
        clock: &mut impl FrameClock,
        input: &mut impl Input,
        max_frames: Option<u64>,
    ) -> Result<()> {
        self.start()?;
        let mut frames = 0u64;
        while max_frames.map_or(true, |max| frames < max) {
            clock.wait_frame();
            for event in input.poll()? {
                match event {
                    KeyEvent::Pressed(key) => self.set_key(key)?,
                    KeyEvent::Released(key) => self.unset_key(key),
                    KeyEvent::Quit => {
                        info!("quit requested after {} frames", frames);
                        self.stop();
                        return Ok(());
                    }
                }
            }
            self.on_tick()?;
            frames += 1;
        }
        self.stop();
        Ok(())
    }
}
