/// internal resolution of the CHIP-8 display
pub const SCREEN_WIDTH: usize = 64;
pub const SCREEN_HEIGHT: usize = 32;
pub const SCREEN_PIXELS: usize = SCREEN_WIDTH * SCREEN_HEIGHT;

/// One byte per pixel, each always 0 or 1, row-major from the top left.
pub struct FrameBuffer {
    cells: Box<[u8]>,
}

impl FrameBuffer {
    pub fn new() -> Self {
        FrameBuffer {
            cells: vec![0u8; SCREEN_PIXELS].into_boxed_slice(),
        }
    }

    pub fn clear(&mut self) {
        self.cells.fill(0);
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.cells
    }

    pub fn get(&self, x: usize, y: usize) -> u8 {
        self.cells[(x + y * SCREEN_WIDTH) % SCREEN_PIXELS]
    }

    /// XOR one pixel; returns true if that erased a lit pixel.
    ///
    /// Coordinates are pulled back on screen by a single width/height, not a
    /// full modulo. Anything further out lands wherever its linear index
    /// falls, which is itself wrapped to the buffer.
    pub fn set_pixel(&mut self, mut x: i32, mut y: i32) -> bool {
        let (w, h) = (SCREEN_WIDTH as i32, SCREEN_HEIGHT as i32);
        if x >= w {
            x -= w;
        } else if x < 0 {
            x += w;
        }
        if y >= h {
            y -= h;
        } else if y < 0 {
            y += h;
        }
        let location = (x + y * w).rem_euclid(SCREEN_PIXELS as i32) as usize;
        self.cells[location] ^= 1;
        self.cells[location] == 0
    }
}

impl Default for FrameBuffer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_blank() {
        let fb = FrameBuffer::new();
        assert_eq!(fb.as_slice().len(), 2048);
        assert!(fb.as_slice().iter().all(|p| *p == 0));
    }

    #[test]
    fn test_set_pixel_on_then_off() {
        let mut fb = FrameBuffer::new();
        assert!(!fb.set_pixel(3, 4));
        assert_eq!(fb.get(3, 4), 1);
        assert_eq!(fb.as_slice()[3 + 4 * 64], 1);
        assert!(fb.set_pixel(3, 4));
        assert_eq!(fb.get(3, 4), 0);
    }

    #[test]
    fn test_wrap_right_edge() {
        let mut fb = FrameBuffer::new();
        fb.set_pixel(64, 5);
        assert_eq!(fb.get(0, 5), 1);
    }

    #[test]
    fn test_wrap_left_edge() {
        let mut fb = FrameBuffer::new();
        fb.set_pixel(-1, 5);
        assert_eq!(fb.get(63, 5), 1);
    }

    #[test]
    fn test_wrap_vertical() {
        let mut fb = FrameBuffer::new();
        fb.set_pixel(7, 32);
        fb.set_pixel(8, -1);
        assert_eq!(fb.get(7, 0), 1);
        assert_eq!(fb.get(8, 31), 1);
    }

    #[test]
    fn test_single_step_wrap_only() {
        // 130 comes back to 66, which spills into the next row
        let mut fb = FrameBuffer::new();
        fb.set_pixel(130, 0);
        assert_eq!(fb.get(2, 1), 1);
    }

    #[test]
    fn test_clear() {
        let mut fb = FrameBuffer::new();
        fb.set_pixel(1, 1);
        fb.set_pixel(63, 31);
        fb.clear();
        assert!(fb.as_slice().iter().all(|p| *p == 0));
    }
}
