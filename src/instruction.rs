use crate::error::{Chip8Error, Result};
use std::fmt;

/// A decoded CHIP-8 instruction. Register operands are 0..=15.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Instruction {
    /// 00E0
    ClearScreen,
    /// 00EE
    Return,
    /// 1NNN
    Jump(u16),
    /// 2NNN
    Call(u16),
    /// 3XNN
    SkipIfEqImm(usize, u8),
    /// 4XNN
    SkipIfNeImm(usize, u8),
    /// 5XY_
    SkipIfEqReg(usize, usize),
    /// 6XNN
    LoadImm(usize, u8),
    /// 7XNN, wraps, leaves VF alone
    AddImm(usize, u8),
    /// 8XY0
    Copy(usize, usize),
    /// 8XY1
    Or(usize, usize),
    /// 8XY2
    And(usize, usize),
    /// 8XY3
    Xor(usize, usize),
    /// 8XY4
    AddReg(usize, usize),
    /// 8XY5
    SubReg(usize, usize),
    /// 8XY6
    ShiftRight(usize),
    /// 8XY7
    SubReverse(usize, usize),
    /// 8XYE
    ShiftLeft(usize),
    /// 9XY_
    SkipIfNeReg(usize, usize),
    /// ANNN
    LoadIndex(u16),
    /// BNNN
    JumpOffset(u16),
    /// CXNN
    Random(usize, u8),
    /// DXYN
    Draw(usize, usize, u8),
    /// EX9E
    SkipIfKey(usize),
    /// EXA1
    SkipIfNotKey(usize),
    /// FX07
    ReadDelay(usize),
    /// FX0A
    WaitKey(usize),
    /// FX15
    SetDelay(usize),
    /// FX18
    SetSound(usize),
    /// FX1E
    AddIndex(usize),
    /// FX29
    Glyph(usize),
    /// FX33
    Bcd(usize),
    /// FX55
    StoreRegs(usize),
    /// FX65
    LoadRegs(usize),
    /// an undefined variant inside a known group, including 0NNN machine calls
    Ignored(u16),
}

impl Instruction {
    /// Split a word into an instruction. Only a top nibble that belongs to no
    /// group is an error; unknown variants inside a group come back as
    /// `Ignored`.
    pub fn decode(opcode: u16) -> Result<Instruction> {
        let x = ((opcode & 0x0f00) >> 8) as usize;
        let y = ((opcode & 0x00f0) >> 4) as usize;
        let n = (opcode & 0x000f) as u8;
        let nn = (opcode & 0x00ff) as u8;
        let nnn = opcode & 0x0fff;

        use Instruction::*;
        let ins = match opcode >> 12 {
            0x0 => match opcode {
                0x00e0 => ClearScreen,
                0x00ee => Return,
                _ => Ignored(opcode),
            },
            0x1 => Jump(nnn),
            0x2 => Call(nnn),
            0x3 => SkipIfEqImm(x, nn),
            0x4 => SkipIfNeImm(x, nn),
            0x5 => SkipIfEqReg(x, y),
            0x6 => LoadImm(x, nn),
            0x7 => AddImm(x, nn),
            0x8 => match n {
                0x0 => Copy(x, y),
                0x1 => Or(x, y),
                0x2 => And(x, y),
                0x3 => Xor(x, y),
                0x4 => AddReg(x, y),
                0x5 => SubReg(x, y),
                0x6 => ShiftRight(x),
                0x7 => SubReverse(x, y),
                0xe => ShiftLeft(x),
                _ => Ignored(opcode),
            },
            0x9 => SkipIfNeReg(x, y),
            0xa => LoadIndex(nnn),
            0xb => JumpOffset(nnn),
            0xc => Random(x, nn),
            0xd => Draw(x, y, n),
            0xe => match nn {
                0x9e => SkipIfKey(x),
                0xa1 => SkipIfNotKey(x),
                _ => Ignored(opcode),
            },
            0xf => match nn {
                0x07 => ReadDelay(x),
                0x0a => WaitKey(x),
                0x15 => SetDelay(x),
                0x18 => SetSound(x),
                0x1e => AddIndex(x),
                0x29 => Glyph(x),
                0x33 => Bcd(x),
                0x55 => StoreRegs(x),
                0x65 => LoadRegs(x),
                _ => Ignored(opcode),
            },
            _ => return Err(Chip8Error::UnknownOpcode { opcode }),
        };
        Ok(ins)
    }
}

/// Octo-ish mnemonics, handy in trace logs
impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use Instruction::*;
        match *self {
            ClearScreen => write!(f, "CLS"),
            Return => write!(f, "RET"),
            Jump(a) => write!(f, "JP {:#05x}", a),
            Call(a) => write!(f, "CALL {:#05x}", a),
            SkipIfEqImm(x, nn) => write!(f, "SE V{:X}, {:#04x}", x, nn),
            SkipIfNeImm(x, nn) => write!(f, "SNE V{:X}, {:#04x}", x, nn),
            SkipIfEqReg(x, y) => write!(f, "SE V{:X}, V{:X}", x, y),
            LoadImm(x, nn) => write!(f, "LD V{:X}, {:#04x}", x, nn),
            AddImm(x, nn) => write!(f, "ADD V{:X}, {:#04x}", x, nn),
            Copy(x, y) => write!(f, "LD V{:X}, V{:X}", x, y),
            Or(x, y) => write!(f, "OR V{:X}, V{:X}", x, y),
            And(x, y) => write!(f, "AND V{:X}, V{:X}", x, y),
            Xor(x, y) => write!(f, "XOR V{:X}, V{:X}", x, y),
            AddReg(x, y) => write!(f, "ADD V{:X}, V{:X}", x, y),
            SubReg(x, y) => write!(f, "SUB V{:X}, V{:X}", x, y),
            ShiftRight(x) => write!(f, "SHR V{:X}", x),
            SubReverse(x, y) => write!(f, "SUBN V{:X}, V{:X}", x, y),
            ShiftLeft(x) => write!(f, "SHL V{:X}", x),
            SkipIfNeReg(x, y) => write!(f, "SNE V{:X}, V{:X}", x, y),
            LoadIndex(a) => write!(f, "LD I, {:#05x}", a),
            JumpOffset(a) => write!(f, "JP V0, {:#05x}", a),
            Random(x, nn) => write!(f, "RND V{:X}, {:#04x}", x, nn),
            Draw(x, y, n) => write!(f, "DRW V{:X}, V{:X}, {}", x, y, n),
            SkipIfKey(x) => write!(f, "SKP V{:X}", x),
            SkipIfNotKey(x) => write!(f, "SKNP V{:X}", x),
            ReadDelay(x) => write!(f, "LD V{:X}, DT", x),
            WaitKey(x) => write!(f, "LD V{:X}, K", x),
            SetDelay(x) => write!(f, "LD DT, V{:X}", x),
            SetSound(x) => write!(f, "LD ST, V{:X}", x),
            AddIndex(x) => write!(f, "ADD I, V{:X}", x),
            Glyph(x) => write!(f, "LD F, V{:X}", x),
            Bcd(x) => write!(f, "LD B, V{:X}", x),
            StoreRegs(x) => write!(f, "LD [I], V{:X}", x),
            LoadRegs(x) => write!(f, "LD V{:X}, [I]", x),
            Ignored(op) => write!(f, "DW {:#06x}", op),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use Instruction::*;

    #[test]
    fn test_decode_control_flow() -> Result<()> {
        assert_eq!(Instruction::decode(0x00e0)?, ClearScreen);
        assert_eq!(Instruction::decode(0x00ee)?, Return);
        assert_eq!(Instruction::decode(0x1a5f)?, Jump(0xa5f));
        assert_eq!(Instruction::decode(0x2300)?, Call(0x300));
        assert_eq!(Instruction::decode(0xb123)?, JumpOffset(0x123));
        Ok(())
    }

    #[test]
    fn test_decode_operands() -> Result<()> {
        assert_eq!(Instruction::decode(0x62c5)?, LoadImm(2, 0xc5));
        assert_eq!(Instruction::decode(0x8ab4)?, AddReg(0xa, 0xb));
        assert_eq!(Instruction::decode(0xd01f)?, Draw(0, 1, 0xf));
        assert_eq!(Instruction::decode(0xf733)?, Bcd(7));
        assert_eq!(Instruction::decode(0xe49e)?, SkipIfKey(4));
        Ok(())
    }

    #[test]
    fn test_low_nibble_ignored_for_register_skips() -> Result<()> {
        assert_eq!(Instruction::decode(0x5127)?, SkipIfEqReg(1, 2));
        assert_eq!(Instruction::decode(0x912f)?, SkipIfNeReg(1, 2));
        Ok(())
    }

    #[test]
    fn test_unknown_sub_opcodes_are_ignored() -> Result<()> {
        assert_eq!(Instruction::decode(0x0123)?, Ignored(0x0123));
        assert_eq!(Instruction::decode(0x8128)?, Ignored(0x8128));
        assert_eq!(Instruction::decode(0xe1ff)?, Ignored(0xe1ff));
        assert_eq!(Instruction::decode(0xf1ff)?, Ignored(0xf1ff));
        Ok(())
    }

    #[test]
    fn test_mnemonics() -> Result<()> {
        assert_eq!(Instruction::decode(0x6001)?.to_string(), "LD V0, 0x01");
        assert_eq!(Instruction::decode(0x2300)?.to_string(), "CALL 0x300");
        assert_eq!(Instruction::decode(0xd125)?.to_string(), "DRW V1, V2, 5");
        Ok(())
    }
}
