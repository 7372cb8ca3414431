//! A CHIP-8 virtual machine.
//!
//! ## Design
//!
//! * the interpreter owns all machine state and executes one instruction per
//!   `step`, reporting side effects (clear screen, wait for key) back to the
//!   caller instead of calling out
//! * the machine (scheduler) runs a fixed batch of instructions per
//!   presentation frame, decays the timers every other frame, and routes key
//!   presses, including the one that satisfies a blocking key wait
//! * pacing comes from an injected `FrameClock`, so tests can tick the
//!   machine by hand
//! * display, input and audio sit behind traits so alternatives plug in;
//!   the terminal ones use tui/crossterm and the beep crate
//!
//! Model
//!
//! Chip8Machine
//!  |-- display, sound, config
//!  |-- Chip8Interpreter
//!  |    |-- memory (glyphs at 0x000, program at 0x200)
//!  |    |-- registers, framebuffer, timers, keypad
//!  |    `-- instruction decoder
//!  `-- on_tick()
//!       |-- up to 10 x interpreter.step() while running
//!       |-- display.render() if a sprite was drawn
//!       `-- timers.tick() on even frames, beep when the sound timer expires
pub mod clock;
pub mod config;
pub mod display;
pub mod error;
pub mod framebuffer;
pub mod input;
pub mod instruction;
pub mod interpreter;
pub mod keypad;
pub mod machine;
pub mod memory;
pub mod registers;
pub mod sound;
pub mod timers;

pub use config::Config;
pub use error::{Chip8Error, Result};
pub use interpreter::{Chip8Interpreter, Flow};
pub use machine::{Chip8Machine, RunState};
