use chip8vm::framebuffer::{FrameBuffer, SCREEN_HEIGHT, SCREEN_WIDTH};
use chip8vm::memory::{MemoryMap, CHIP8_FONT};
use chip8vm::Chip8Interpreter;
use proptest::prelude::*;

/// run a single instruction with V0 = a and V1 = b
fn alu(opcode: u16, a: u8, b: u8) -> Chip8Interpreter {
    let mut cpu = Chip8Interpreter::with_seed(0);
    cpu.load_program(&opcode.to_be_bytes());
    cpu.registers_mut().v[0] = a;
    cpu.registers_mut().v[1] = b;
    cpu.step().unwrap();
    cpu
}

proptest! {
    #[test]
    fn add_sets_carry(a in any::<u8>(), b in any::<u8>()) {
        let cpu = alu(0x8014, a, b);
        let sum = a as u16 + b as u16;
        prop_assert_eq!(cpu.registers().v[0] as u16, sum % 256);
        prop_assert_eq!(cpu.registers().v[0xf], (sum > 255) as u8);
    }

    #[test]
    fn sub_sets_no_borrow(a in any::<u8>(), b in any::<u8>()) {
        let cpu = alu(0x8015, a, b);
        prop_assert_eq!(cpu.registers().v[0], a.wrapping_sub(b));
        prop_assert_eq!(cpu.registers().v[0xf], (a > b) as u8);
    }

    #[test]
    fn reverse_sub_sets_no_borrow(a in any::<u8>(), b in any::<u8>()) {
        let cpu = alu(0x8017, a, b);
        prop_assert_eq!(cpu.registers().v[0], b.wrapping_sub(a));
        prop_assert_eq!(cpu.registers().v[0xf], (b > a) as u8);
    }

    #[test]
    fn add_immediate_wraps(a in any::<u8>(), nn in any::<u8>()) {
        let cpu = alu(0x7000 | nn as u16, a, 0);
        prop_assert_eq!(cpu.registers().v[0] as u16, (a as u16 + nn as u16) % 256);
    }

    #[test]
    fn shifts_report_shifted_bit(a in any::<u8>()) {
        let right = alu(0x8006, a, 0);
        prop_assert_eq!(right.registers().v[0], a >> 1);
        prop_assert_eq!(right.registers().v[0xf], a & 1);
        let left = alu(0x800e, a, 0);
        prop_assert_eq!(left.registers().v[0], a << 1);
        prop_assert_eq!(left.registers().v[0xf], a >> 7);
    }

    #[test]
    fn set_pixel_is_its_own_inverse(
        x in -(SCREEN_WIDTH as i32)..(2 * SCREEN_WIDTH as i32),
        y in -(SCREEN_HEIGHT as i32)..(2 * SCREEN_HEIGHT as i32),
        lit in any::<bool>(),
    ) {
        let mut fb = FrameBuffer::new();
        if lit {
            fb.set_pixel(x, y);
        }
        let before = fb.as_slice().to_vec();
        let first = fb.set_pixel(x, y);
        let second = fb.set_pixel(x, y);
        prop_assert_eq!(fb.as_slice(), before.as_slice());
        prop_assert_eq!(first, lit);
        prop_assert_eq!(second, !lit);
    }

    #[test]
    fn set_pixel_wraps_one_frame(y in 0..SCREEN_HEIGHT as i32, x in 0..SCREEN_WIDTH as i32) {
        let mut a = FrameBuffer::new();
        let mut b = FrameBuffer::new();
        a.set_pixel(x + SCREEN_WIDTH as i32, y);
        b.set_pixel(x, y);
        prop_assert_eq!(a.as_slice(), b.as_slice());
        a.set_pixel(x - SCREEN_WIDTH as i32, y);
        prop_assert!(a.as_slice().iter().all(|p| *p == 0));
    }

    #[test]
    fn glyph_address_is_five_times_digit(r in 0u8..16) {
        let cpu = alu(0xf029, r, 0);
        let i = cpu.registers().i;
        prop_assert_eq!(i, 5 * r as u16);
        let glyph: Vec<u8> = (0..5).map(|n| cpu.memory().read_byte(i + n)).collect();
        prop_assert_eq!(glyph.as_slice(), &CHIP8_FONT[i as usize..i as usize + 5]);
    }

    #[test]
    fn bcd_writes_decimal_digits(n in any::<u8>()) {
        let mut cpu = Chip8Interpreter::with_seed(0);
        cpu.load_program(&[0xf0, 0x33]);
        cpu.registers_mut().v[0] = n;
        cpu.registers_mut().i = 0x400;
        cpu.step().unwrap();
        let m = cpu.memory();
        prop_assert_eq!(m.read_byte(0x400), n / 100);
        prop_assert_eq!(m.read_byte(0x401), (n / 10) % 10);
        prop_assert_eq!(m.read_byte(0x402), n % 10);
    }
}
