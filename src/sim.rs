use rand::RngCore;

use crate::buffer::PackedBuffer;
use crate::error::{Error, Result};
use crate::kernel::advance;
use crate::layout::Layout;
use crate::pattern::Pattern;
use crate::rng::Xorshift96;
use crate::timing::{timed_advance, StepCounter};

/// Owner of the two packed buffers, advancing the grid one generation per
/// step and exchanging the buffer roles afterwards. The buffers are
/// allocated here once and only ever re-initialized.
///
/// The generator is constructed together with the simulation and advances
/// once per step; resets never reseed it, so the contents picked up by a
/// random reset depend on how long the previous run lasted.
pub struct Simulation {
    current: PackedBuffer,
    next: PackedBuffer,
    rng: Xorshift96,
    generation: u64,
}

impl Simulation {
    pub fn new(layout: Layout) -> Self {
        Self {
            current: PackedBuffer::new(layout),
            next: PackedBuffer::new(layout),
            rng: Xorshift96::new(),
            generation: 0,
        }
    }

    pub fn layout(&self) -> Layout {
        self.current.layout()
    }

    /// The live generation.
    pub fn current(&self) -> &PackedBuffer {
        &self.current
    }

    /// Mutable access for external seeding. Padding contents are the
    /// caller's responsibility, as for any writer.
    pub fn current_mut(&mut self) -> &mut PackedBuffer {
        &mut self.current
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Advances one generation.
    pub fn step(&mut self) -> Result<()> {
        advance(&self.current, &mut self.next)?;
        self.finish_step();
        Ok(())
    }

    /// Advances one generation with the kernel call wrapped in `counter`,
    /// returning the elapsed count.
    pub fn step_timed(&mut self, counter: &mut impl StepCounter) -> Result<u64> {
        let elapsed = timed_advance(&self.current, &mut self.next, counter)?;
        self.finish_step();
        Ok(elapsed)
    }

    fn finish_step(&mut self) {
        std::mem::swap(&mut self.current, &mut self.next);
        self.generation += 1;
        self.rng.next_u32();
    }

    /// Clears both buffers and stamps `pattern` centered on the grid.
    /// Does not touch the generator.
    pub fn reset_to(&mut self, pattern: &Pattern) -> Result<()> {
        let layout = self.layout();
        let (cols, rows) = (layout.cols(), layout.rows());
        let overflow = Error::PatternOverflow {
            pattern: (pattern.width(), pattern.height()),
            grid: (cols, rows),
        };
        let col = cols.checked_sub(pattern.width()).ok_or(overflow.clone())? / 2;
        let row = rows.checked_sub(pattern.height()).ok_or(overflow)? / 2;

        self.current.clear();
        self.next.clear();
        self.current.write_pattern(pattern, col, row)?;
        self.generation = 0;
        Ok(())
    }

    /// Clears both buffers and refills the active area at roughly 25%
    /// density from the generator, leaving the padding rows dead. Does not
    /// reseed the generator.
    pub fn reset_random(&mut self) {
        let layout = self.layout();
        self.current.clear();
        self.next.clear();
        for strip in 0..layout.word_cols() {
            for buf_row in 1..=layout.rows() {
                let word = self.rng.next_u64() & self.rng.next_u64();
                let index = layout.word_index(strip, buf_row);
                self.current.words_mut()[index] = word;
            }
        }
        self.generation = 0;
    }
}
