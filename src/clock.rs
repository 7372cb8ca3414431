use std::time::{Duration, Instant};

/// Source of presentation ticks. The machine does no timing of its own; it
/// asks the clock to wait for the next frame and then does one frame of work.
pub trait FrameClock {
    /// block (or not) until the next frame is due
    fn wait_frame(&mut self);
}

/// real-time clock, paced with spin_sleep so frames land close to on time
pub struct SpinClock {
    period: Duration,
    next: Instant,
    sleeper: spin_sleep::SpinSleeper,
}

impl SpinClock {
    pub fn new(frame_rate: u32) -> Self {
        let period = Duration::from_secs(1) / frame_rate.max(1);
        SpinClock {
            period,
            next: Instant::now() + period,
            sleeper: spin_sleep::SpinSleeper::default(),
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }
}

impl FrameClock for SpinClock {
    fn wait_frame(&mut self) {
        let now = Instant::now();
        if self.next > now {
            self.sleeper.sleep(self.next - now);
            self.next += self.period;
        } else {
            // fell behind; don't try to catch up with a burst of frames
            self.next = now + self.period;
        }
    }
}

/// never waits, just counts; useful for tests and headless runs
#[derive(Debug, Default)]
pub struct ManualClock {
    pub frames: u64,
}

impl ManualClock {
    pub fn new() -> Self {
        ManualClock::default()
    }
}

impl FrameClock for ManualClock {
    fn wait_frame(&mut self) {
        self.frames += 1;
    }
}
