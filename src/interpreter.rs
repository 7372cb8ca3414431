//! # interpreter
//!
//! Owns the whole machine state (memory, registers, display buffer, timers,
//! keypad) and executes one instruction per `step`. It knows nothing about
//! renderers, speakers or pacing; anything that has to leave the core comes
//! back to the caller as a `Flow`, and the scheduler in `machine` acts on it.

use crate::error::Result;
use crate::framebuffer::FrameBuffer;
use crate::instruction::Instruction;
use crate::keypad::Keypad;
use crate::memory::{Chip8MemoryMap, MemoryMap};
use crate::registers::{Registers, FLAG};
use crate::timers::Timers;
use log::{trace, warn};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::io;

/// what the caller has to do after a step
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Flow {
    Continue,
    /// the screen was cleared; the renderer should blank its surface
    ClearScreen,
    /// suspend until a key arrives, then store it in this register
    WaitForKey(usize),
}

pub struct Chip8Interpreter {
    memory: Chip8MemoryMap,
    registers: Registers,
    framebuffer: FrameBuffer,
    timers: Timers,
    keypad: Keypad,
    rng: StdRng,
    draw_pending: bool,
}

impl Chip8Interpreter {
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    /// deterministic random bytes, for tests and replays
    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    fn with_rng(rng: StdRng) -> Self {
        Chip8Interpreter {
            memory: Chip8MemoryMap::new(),
            registers: Registers::new(),
            framebuffer: FrameBuffer::new(),
            timers: Timers::new(),
            keypad: Keypad::new(),
            rng,
            draw_pending: false,
        }
    }

    /// back to power-on state: glyphs only in memory, pc at 0x200
    pub fn reset(&mut self) {
        self.memory.reset();
        self.registers.reset();
        self.framebuffer.clear();
        self.timers.reset();
        self.keypad.clear();
        self.draw_pending = false;
    }

    /// load a chip8 program
    pub fn load_program(&mut self, program: &[u8]) {
        self.memory.load_program(program)
    }

    /// load a chip8 program from a file or similar
    pub fn load_program_from(&mut self, reader: &mut impl io::Read) -> Result<usize> {
        Ok(self.memory.load_program_from(reader)?)
    }

    pub fn memory(&self) -> &Chip8MemoryMap {
        &self.memory
    }

    pub fn registers(&self) -> &Registers {
        &self.registers
    }

    pub fn registers_mut(&mut self) -> &mut Registers {
        &mut self.registers
    }

    pub fn framebuffer(&self) -> &FrameBuffer {
        &self.framebuffer
    }

    pub fn timers(&self) -> &Timers {
        &self.timers
    }

    pub fn timers_mut(&mut self) -> &mut Timers {
        &mut self.timers
    }

    pub fn keypad(&self) -> &Keypad {
        &self.keypad
    }

    pub fn keypad_mut(&mut self) -> &mut Keypad {
        &mut self.keypad
    }

    /// Checks and clears the draw-pending flag
    pub fn take_draw_pending(&mut self) -> bool {
        std::mem::take(&mut self.draw_pending)
    }

    /// word at pc, without executing it
    pub fn current_opcode(&self) -> u16 {
        self.memory.get_word(self.registers.pc)
    }

    /// fetch, decode and execute one instruction
    pub fn step(&mut self) -> Result<Flow> {
        let opcode = self.current_opcode();
        self.registers.pc = self.registers.pc.wrapping_add(2);
        let ins = Instruction::decode(opcode)?;
        trace!("{:#05x}: {:04x} {}", self.registers.pc.wrapping_sub(2), opcode, ins);
        self.execute(ins)
    }

    fn execute(&mut self, ins: Instruction) -> Result<Flow> {
        use Instruction::*;
        let r = &mut self.registers;
        match ins {
            ClearScreen => {
                self.framebuffer.clear();
                return Ok(Flow::ClearScreen);
            }
            Return => r.pop()?,
            Jump(addr) => r.pc = addr,
            Call(addr) => {
                r.push()?;
                r.pc = addr;
            }
            SkipIfEqImm(x, nn) => {
                if r.v[x] == nn {
                    r.skip();
                }
            }
            SkipIfNeImm(x, nn) => {
                if r.v[x] != nn {
                    r.skip();
                }
            }
            SkipIfEqReg(x, y) => {
                if r.v[x] == r.v[y] {
                    r.skip();
                }
            }
            SkipIfNeReg(x, y) => {
                if r.v[x] != r.v[y] {
                    r.skip();
                }
            }
            LoadImm(x, nn) => r.v[x] = nn,
            AddImm(x, nn) => r.v[x] = r.v[x].wrapping_add(nn),
            Copy(x, y) => r.v[x] = r.v[y],
            Or(x, y) => r.v[x] |= r.v[y],
            And(x, y) => r.v[x] &= r.v[y],
            Xor(x, y) => r.v[x] ^= r.v[y],
            AddReg(x, y) => {
                let (sum, carry) = r.v[x].overflowing_add(r.v[y]);
                r.v[x] = sum;
                r.set_flag(carry);
            }
            SubReg(x, y) => {
                let no_borrow = r.v[x] > r.v[y];
                r.v[x] = r.v[x].wrapping_sub(r.v[y]);
                r.set_flag(no_borrow);
            }
            SubReverse(x, y) => {
                let no_borrow = r.v[y] > r.v[x];
                r.v[x] = r.v[y].wrapping_sub(r.v[x]);
                r.set_flag(no_borrow);
            }
            ShiftRight(x) => {
                let out = r.v[x] & 0x01;
                r.v[x] >>= 1;
                r.v[FLAG] = out;
            }
            ShiftLeft(x) => {
                let out = r.v[x] >> 7;
                r.v[x] <<= 1;
                r.v[FLAG] = out;
            }
            LoadIndex(addr) => r.i = addr,
            JumpOffset(addr) => r.pc = addr + r.v[0] as u16,
            Random(x, nn) => r.v[x] = self.rng.gen::<u8>() & nn,
            Draw(x, y, height) => self.draw_sprite(x, y, height),
            SkipIfKey(x) => {
                if self.keypad.is_pressed(r.v[x]) {
                    r.skip();
                }
            }
            SkipIfNotKey(x) => {
                if !self.keypad.is_pressed(r.v[x]) {
                    r.skip();
                }
            }
            ReadDelay(x) => r.v[x] = self.timers.delay,
            WaitKey(x) => return Ok(Flow::WaitForKey(x)),
            SetDelay(x) => self.timers.delay = r.v[x],
            SetSound(x) => self.timers.sound = r.v[x],
            AddIndex(x) => r.i = r.i.wrapping_add(r.v[x] as u16),
            Glyph(x) => r.i = self.memory.glyph_address(r.v[x]),
            Bcd(x) => {
                let n = r.v[x];
                self.memory.write(&[n / 100, n / 10 % 10, n % 10], r.i);
            }
            StoreRegs(x) => self.memory.write(&r.v[..=x], r.i),
            LoadRegs(x) => {
                for reg in 0..=x {
                    r.v[reg] = self.memory.read_byte(r.i.wrapping_add(reg as u16));
                }
            }
            Ignored(opcode) => warn!("ignoring undefined opcode {:#06x}", opcode),
        }
        Ok(Flow::Continue)
    }

    /// XOR `height` rows of 8 pixels from memory at I onto the screen; VF
    /// reports whether anything got erased
    fn draw_sprite(&mut self, x: usize, y: usize, height: u8) {
        let left = self.registers.v[x] as i32;
        let top = self.registers.v[y] as i32;
        let mut collision = false;
        for row in 0..height {
            let sprite = self
                .memory
                .read_byte(self.registers.i.wrapping_add(row as u16));
            for col in 0..8 {
                if sprite & (0x80 >> col) != 0 {
                    collision |= self
                        .framebuffer
                        .set_pixel(left + col, top + row as i32);
                }
            }
        }
        self.registers.set_flag(collision);
        self.draw_pending = true;
    }
}

impl Default for Chip8Interpreter {
    fn default() -> Self {
        Self::new()
    }
}
