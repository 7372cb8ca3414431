use std::io;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Chip8Error>;

/// Everything that can stop the machine. Guest programs doing odd but legal
/// things (unknown sub-opcodes, keys never pressed) never end up here.
#[derive(Debug, Error)]
pub enum Chip8Error {
    #[error("unknown opcode {opcode:#06x}, terminating")]
    UnknownOpcode { opcode: u16 },

    #[error("call stack overflow at pc {pc:#05x}")]
    StackOverflow { pc: u16 },

    #[error("return with empty call stack at pc {pc:#05x}")]
    StackUnderflow { pc: u16 },

    #[error("a display must be attached before the machine can start")]
    NoDisplay,

    #[error("machine halted after fatal opcode {opcode:#06x}; reset before running again")]
    Halted { opcode: u16 },

    #[error("io error: {0}")]
    Io(#[from] io::Error),

    #[error("audio error: {0}")]
    Audio(String),
}

impl Chip8Error {
    /// whether the fault came from the guest program rather than a collaborator
    pub fn is_fatal_instruction(&self) -> bool {
        matches!(
            self,
            Chip8Error::UnknownOpcode { .. }
                | Chip8Error::StackOverflow { .. }
                | Chip8Error::StackUnderflow { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_opcode_message_has_word() {
        let e = Chip8Error::UnknownOpcode { opcode: 0xf123 };
        assert_eq!(e.to_string(), "unknown opcode 0xf123, terminating");
    }

    #[test]
    fn test_fatal_classification() {
        assert!(Chip8Error::StackUnderflow { pc: 0x200 }.is_fatal_instruction());
        assert!(!Chip8Error::NoDisplay.is_fatal_instruction());
        let io_err = io::Error::new(io::ErrorKind::Other, "gone");
        assert!(!Chip8Error::from(io_err).is_fatal_instruction());
    }
}
