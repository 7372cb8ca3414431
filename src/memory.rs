use std::io;

// NB. addresses are u16 as per the chip-8; every access is wrapped to the size
//     of RAM so guest programs can never reach outside it

/// Represents a flat, wrapping, byte-addressable memory
pub trait MemoryMap {
    /// number of addressable bytes
    fn size(&self) -> usize;

    /// read one byte; the address is taken modulo the memory size
    fn read_byte(&self, addr: u16) -> u8;

    /// write one byte; the address is taken modulo the memory size
    fn write_byte(&mut self, addr: u16, value: u8);

    /// write a chunk of bytes starting at addr, wrapping at the top of memory
    fn write(&mut self, data: &[u8], addr: u16) {
        for (offset, byte) in data.iter().enumerate() {
            self.write_byte(addr.wrapping_add(offset as u16), *byte);
        }
    }

    /// write unknown len of data into memory at a particular address
    fn write_any(&mut self, reader: &mut impl io::Read, addr: u16) -> Result<usize, io::Error> {
        let mut buf = Vec::new();
        let len = reader.read_to_end(&mut buf)?;
        self.write(buf.as_slice(), addr);
        Ok(len)
    }

    /// get a big-endian two-byte word (instructions)
    fn get_word(&self, addr: u16) -> u16 {
        ((self.read_byte(addr) as u16) << 8) | self.read_byte(addr.wrapping_add(1)) as u16
    }
}

/// how much RAM we have
pub const CHIP8_RAM_SIZE_BYTES: usize = 4096;

/// where the program is loaded
pub const CHIP8_PROGRAM_ADDR: u16 = 0x0200;

/// where the hex digit glyphs live; each one is 5 bytes tall
pub const CHIP8_GLYPH_ADDR: u16 = 0x000;
pub const CHIP8_GLYPH_BYTES: u16 = 5;

/// Defines the CHIP-8 memory map
///   0x0000-0x004f  hex digit glyphs
///   0x0050-0x01ff  reserved
///   0x0200-0x0fff  program
pub struct Chip8MemoryMap {
    bytes: Box<[u8]>,
    pub program_addr: u16,
    pub glyph_addr: u16,
}

impl MemoryMap for Chip8MemoryMap {
    fn size(&self) -> usize {
        self.bytes.len()
    }
    fn read_byte(&self, addr: u16) -> u8 {
        self.bytes[addr as usize % self.bytes.len()]
    }
    fn write_byte(&mut self, addr: u16, value: u8) {
        let len = self.bytes.len();
        self.bytes[addr as usize % len] = value;
    }
}

impl Chip8MemoryMap {
    /// zeroed RAM with the glyphs baked in
    pub fn new() -> Self {
        let mut mm = Chip8MemoryMap {
            bytes: vec![0u8; CHIP8_RAM_SIZE_BYTES].into_boxed_slice(),
            program_addr: CHIP8_PROGRAM_ADDR,
            glyph_addr: CHIP8_GLYPH_ADDR,
        };
        mm.reset();
        mm
    }

    /// zero everything, then re-seed the glyphs
    pub fn reset(&mut self) {
        self.bytes.fill(0);
        self.write(&CHIP8_FONT, self.glyph_addr);
    }

    /// copy a CHIP-8 program in at 0x200
    pub fn load_program(&mut self, program: &[u8]) {
        self.write(program, self.program_addr);
    }

    /// read a CHIP-8 program from somewhere and copy it in at 0x200
    pub fn load_program_from(&mut self, reader: &mut impl io::Read) -> Result<usize, io::Error> {
        self.write_any(reader, self.program_addr)
    }

    /// address of the glyph for the low nibble of digit
    pub fn glyph_address(&self, digit: u8) -> u16 {
        self.glyph_addr + (digit & 0x0f) as u16 * CHIP8_GLYPH_BYTES
    }
}

impl Default for Chip8MemoryMap {
    fn default() -> Self {
        Self::new()
    }
}

pub const CHIP8_FONT: [u8; 80] = [
    0xF0, 0x90, 0x90, 0x90, 0xF0, // 0
    0x20, 0x60, 0x20, 0x20, 0x70, // 1
    0xF0, 0x10, 0xF0, 0x80, 0xF0, // 2
    0xF0, 0x10, 0xF0, 0x10, 0xF0, // 3
    0x90, 0x90, 0xF0, 0x10, 0x10, // 4
    0xF0, 0x80, 0xF0, 0x10, 0xF0, // 5
    0xF0, 0x80, 0xF0, 0x90, 0xF0, // 6
    0xF0, 0x10, 0x20, 0x40, 0x40, // 7
    0xF0, 0x90, 0xF0, 0x90, 0xF0, // 8
    0xF0, 0x90, 0xF0, 0x10, 0xF0, // 9
    0xF0, 0x90, 0xF0, 0x90, 0x90, // A
    0xE0, 0x90, 0xE0, 0x90, 0xE0, // B
    0xF0, 0x80, 0x80, 0x80, 0xF0, // C
    0xE0, 0x90, 0x90, 0x90, 0xE0, // D
    0xF0, 0x80, 0xF0, 0x80, 0xF0, // E
    0xF0, 0x80, 0xF0, 0x80, 0x80, // F
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_zeroed() {
        let m = Chip8MemoryMap::new();
        // NB. memory is zeroed from 0x50 because before that we bake in the font
        assert!(m.bytes[0x50..].iter().all(|b| *b == 0));
        assert_eq!(m.size(), CHIP8_RAM_SIZE_BYTES);
    }

    #[test]
    fn test_font_seeded() {
        let m = Chip8MemoryMap::new();
        assert_eq!(m.bytes[..80], CHIP8_FONT);
    }

    #[test]
    fn test_write_any_data_ok() -> Result<(), io::Error> {
        let mut dst = Chip8MemoryMap::new();
        let mut src: &[u8] = &[0, 1, 2, 3, 4, 5, 6, 7];
        let len = dst.write_any(&mut src, 0x308)?;
        assert_eq!(len, 8);
        assert_eq!(
            dst.bytes[0x300..0x310],
            [0, 0, 0, 0, 0, 0, 0, 0, 0, 1, 2, 3, 4, 5, 6, 7]
        );
        Ok(())
    }

    #[test]
    fn test_read_word() {
        let mut m = Chip8MemoryMap::new();
        m.write(&[0, 1, 2, 3, 4, 5, 6, 7], 0x400);
        assert_eq!(m.get_word(0x404), 0x0405);
    }

    #[test]
    fn test_addresses_wrap() {
        let mut m = Chip8MemoryMap::new();
        m.write_byte(0x1005, 0xab);
        assert_eq!(m.read_byte(0x005), 0xab);
        assert_eq!(m.read_byte(0xf005), 0xab);
    }

    #[test]
    fn test_write_past_top_wraps() {
        let mut m = Chip8MemoryMap::new();
        m.write(&[0x11, 0x22, 0x33, 0x44], 0x0ffe);
        assert_eq!(m.bytes[0xffe..], [0x11, 0x22]);
        assert_eq!(m.bytes[..2], [0x33, 0x44]);
    }

    #[test]
    fn test_word_at_top_wraps() {
        let mut m = Chip8MemoryMap::new();
        m.write_byte(0x0fff, 0x12);
        assert_eq!(m.get_word(0x0fff), 0x12f0);
    }

    #[test]
    fn test_program_load_ok() -> Result<(), io::Error> {
        let mut dst = Chip8MemoryMap::new();
        let mut prog: &[u8] = &[0x00, 0xe0]; // clear screen
        dst.load_program_from(&mut prog)?;
        assert_eq!(dst.bytes[0x200..0x202], [0x00, 0xe0]);
        Ok(())
    }

    #[test]
    fn test_reset_wipes_program() {
        let mut m = Chip8MemoryMap::new();
        m.load_program(&[0x12, 0x34]);
        m.write(&[0xff; 10], 0);
        m.reset();
        assert_eq!(m.get_word(0x200), 0);
        assert_eq!(m.bytes[..80], CHIP8_FONT);
    }

    #[test]
    fn test_glyph_address() {
        let m = Chip8MemoryMap::new();
        assert_eq!(m.glyph_address(0x0), 0);
        assert_eq!(m.glyph_address(0xa), 50);
        assert_eq!(m.glyph_address(0x1f), 75);
    }
}
