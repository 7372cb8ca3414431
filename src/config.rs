/// Knobs for the scheduler. The defaults are the classic pacing: 10
/// instructions per frame, timers decaying every other frame, 60 frames a
/// second.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    pub cycles_per_frame: usize,
    /// decay the timers once every this many frames
    pub timer_divider: u64,
    /// only used by the real-time clock
    pub frame_rate: u32,
    /// seed for CXNN; entropy when unset
    pub seed: Option<u64>,
}

pub const DEFAULT_CYCLES_PER_FRAME: usize = 10;
pub const DEFAULT_TIMER_DIVIDER: u64 = 2;
pub const DEFAULT_FRAME_RATE: u32 = 60;

impl Default for Config {
    fn default() -> Self {
        Config {
            cycles_per_frame: DEFAULT_CYCLES_PER_FRAME,
            timer_divider: DEFAULT_TIMER_DIVIDER,
            frame_rate: DEFAULT_FRAME_RATE,
            seed: None,
        }
    }
}
