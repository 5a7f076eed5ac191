use std::time::Instant;

use crate::buffer::PackedBuffer;
use crate::error::Result;
use crate::kernel;

/// Elapsed-unit counter wrapped around a kernel call. The units are the
/// counter's business; the simulation only forwards the readings.
pub trait StepCounter {
    fn start(&mut self);
    fn stop(&mut self);
    /// Count accumulated between the last `start`/`stop` pair.
    fn read(&self) -> u64;
}

/// Runs exactly one [`kernel::advance`] between `start` and `stop` and
/// returns the counter's reading. Adds no behavior of its own.
pub fn timed_advance(
    src: &PackedBuffer,
    dest: &mut PackedBuffer,
    counter: &mut impl StepCounter,
) -> Result<u64> {
    counter.start();
    let outcome = kernel::advance(src, dest);
    counter.stop();
    outcome?;
    Ok(counter.read())
}

/// [`StepCounter`] backed by the host monotonic clock, counting
/// nanoseconds. A reading too large for 64 bits saturates instead of
/// wrapping, so a pathologically slow step can only misreport its cost,
/// never corrupt anything.
#[derive(Default)]
pub struct WallClockCounter {
    started: Option<Instant>,
    elapsed: u64,
}

impl WallClockCounter {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StepCounter for WallClockCounter {
    fn start(&mut self) {
        self.elapsed = 0;
        self.started = Some(Instant::now());
    }

    fn stop(&mut self) {
        if let Some(started) = self.started.take() {
            self.elapsed = u64::try_from(started.elapsed().as_nanos()).unwrap_or(u64::MAX);
        }
    }

    fn read(&self) -> u64 {
        self.elapsed
    }
}

/// How much of the frame interval a step consumed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Band {
    /// Under 30% of the budget.
    Low,
    /// Under 50%.
    Medium,
    /// 50% or more.
    High,
}

/// Per-step budget in counter units, classifying readings into the three
/// display bands.
#[derive(Clone, Copy, Debug)]
pub struct FrameBudget {
    units: u64,
}

impl FrameBudget {
    pub const fn new(units: u64) -> Self {
        assert!(units > 0);
        Self { units }
    }

    pub const fn units(&self) -> u64 {
        self.units
    }

    pub fn fraction(&self, elapsed: u64) -> f64 {
        elapsed as f64 / self.units as f64
    }

    pub fn band(&self, elapsed: u64) -> Band {
        let (elapsed, units) = (elapsed as u128, self.units as u128);
        if elapsed * 10 < units * 3 {
            Band::Low
        } else if elapsed * 10 < units * 5 {
            Band::Medium
        } else {
            Band::High
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::Layout;

    #[test]
    fn bands_switch_at_30_and_50_percent() {
        let budget = FrameBudget::new(1000);
        assert_eq!(budget.band(0), Band::Low);
        assert_eq!(budget.band(299), Band::Low);
        assert_eq!(budget.band(300), Band::Medium);
        assert_eq!(budget.band(499), Band::Medium);
        assert_eq!(budget.band(500), Band::High);
        assert_eq!(budget.band(u64::MAX), Band::High);
    }

    #[test]
    fn fraction_is_linear() {
        let budget = FrameBudget::new(200);
        assert!((budget.fraction(50) - 0.25).abs() < 1e-12);
        assert!((budget.fraction(200) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn counter_reads_zero_until_a_full_pair() {
        let mut counter = WallClockCounter::new();
        assert_eq!(counter.read(), 0);
        counter.stop();
        assert_eq!(counter.read(), 0);
    }

    #[test]
    fn timed_advance_matches_plain_advance() {
        let layout = Layout::new(64, 8).unwrap();
        let src = PackedBuffer::random(layout, Some(3), 0.4);
        let mut timed = PackedBuffer::new(layout);
        let mut plain = PackedBuffer::new(layout);
        let mut counter = WallClockCounter::new();
        timed_advance(&src, &mut timed, &mut counter).unwrap();
        kernel::advance(&src, &mut plain).unwrap();
        assert_eq!(timed.words(), plain.words());
    }

    #[test]
    fn timed_advance_propagates_contract_errors() {
        let src = PackedBuffer::new(Layout::new(64, 8).unwrap());
        let mut dest = PackedBuffer::new(Layout::new(128, 8).unwrap());
        let mut counter = WallClockCounter::new();
        assert!(timed_advance(&src, &mut dest, &mut counter).is_err());
    }
}
