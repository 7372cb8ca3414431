use crate::error::{Chip8Error, Result};
use crate::memory::CHIP8_PROGRAM_ADDR;

pub const REGISTER_COUNT: usize = 16;
pub const STACK_DEPTH: usize = 16;

/// index of VF, which doubles as the carry/borrow/collision flag
pub const FLAG: usize = 0xf;

/// The CHIP-8 register file
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Registers {
    pub v: [u8; REGISTER_COUNT],
    pub i: u16,
    pub pc: u16,
    pub sp: usize,
    pub stack: [u16; STACK_DEPTH],
}

impl Registers {
    pub fn new() -> Self {
        Registers {
            v: [0; REGISTER_COUNT],
            i: 0,
            pc: CHIP8_PROGRAM_ADDR,
            sp: 0,
            stack: [0; STACK_DEPTH],
        }
    }

    pub fn reset(&mut self) {
        *self = Registers::new();
    }

    pub fn flag(&self) -> u8 {
        self.v[FLAG]
    }

    pub fn set_flag(&mut self, set: bool) {
        self.v[FLAG] = set as u8;
    }

    /// push the current pc ahead of a call
    pub fn push(&mut self) -> Result<()> {
        if self.sp >= STACK_DEPTH {
            return Err(Chip8Error::StackOverflow { pc: self.pc });
        }
        self.stack[self.sp] = self.pc;
        self.sp += 1;
        Ok(())
    }

    /// pop a return address into pc
    pub fn pop(&mut self) -> Result<()> {
        if self.sp == 0 {
            return Err(Chip8Error::StackUnderflow { pc: self.pc });
        }
        self.sp -= 1;
        self.pc = self.stack[self.sp];
        Ok(())
    }

    pub fn skip(&mut self) {
        self.pc = self.pc.wrapping_add(2);
    }
}

impl Default for Registers {
    fn default() -> Self {
        Self::new()
    }
}
