//! Hero slider: autoplaying carousel at the top of the page.
//!
//! Time is fed in explicitly through [`Slider::tick`], so the slider works the
//! same under a real event loop and under replay.

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Slider {
    count: usize,
    current: usize,
    interval_ms: u64,
    elapsed_ms: u64,
}

impl Slider {
    pub fn new(count: usize, interval_ms: u64) -> Self {
        Self {
            count,
            current: 0,
            interval_ms: interval_ms.max(1),
            elapsed_ms: 0,
        }
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn count(&self) -> usize {
        self.count
    }

    /// Show slide `index`, wrapping any integer into range.
    pub fn show(&mut self, index: i64) {
        if self.count == 0 {
            return;
        }
        self.current = index.rem_euclid(self.count as i64) as usize;
    }

    pub fn advance(&mut self, step: i64) {
        if self.count == 0 {
            return;
        }
        let step = step.rem_euclid(self.count as i64);
        self.show(self.current as i64 + step);
    }

    /// Let `elapsed_ms` pass; advances once per full interval.
    /// Returns how many slides were advanced.
    pub fn tick(&mut self, elapsed_ms: u64) -> u64 {
        if self.count == 0 {
            return 0;
        }
        self.elapsed_ms = self.elapsed_ms.saturating_add(elapsed_ms);
        let steps = self.elapsed_ms / self.interval_ms;
        self.elapsed_ms %= self.interval_ms;
        let wrapped = (steps % self.count as u64) as i64;
        self.advance(wrapped);
        steps
    }

    /// Manual prev/next: move and restart the autoplay timer.
    pub fn control(&mut self, step: i64) {
        self.advance(step);
        self.elapsed_ms = 0;
    }
}
