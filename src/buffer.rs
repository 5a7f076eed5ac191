use crate::error::{Error, Result};
use crate::layout::Layout;
use crate::pattern::Pattern;

/// One packed grid snapshot: `(cols / 64) * (rows + 2)` words under a
/// [`Layout`]. Two of these are kept alive by the owner and exchanged each
/// step; the buffer itself is allocated once and re-initialized in place.
#[derive(Clone)]
pub struct PackedBuffer {
    layout: Layout,
    words: Vec<u64>,
}

impl PackedBuffer {
    /// An all-dead buffer, padding rows included.
    pub fn new(layout: Layout) -> Self {
        Self {
            layout,
            words: vec![0; layout.words_len()],
        }
    }

    /// Buffer with every active cell drawn independently at `fill_rate`,
    /// seeded for reproducibility. Padding rows stay dead.
    pub fn random(layout: Layout, seed: Option<u64>, fill_rate: f64) -> Self {
        use rand::{Rng, SeedableRng};
        use rand_chacha::ChaCha8Rng;

        let mut rng = if let Some(x) = seed {
            ChaCha8Rng::seed_from_u64(x)
        } else {
            ChaCha8Rng::from_entropy()
        };
        let mut result = Self::new(layout);
        for row in 0..layout.rows() {
            for col in 0..layout.cols() {
                result.set(col, row, rng.gen_bool(fill_rate));
            }
        }
        result
    }

    pub fn layout(&self) -> Layout {
        self.layout
    }

    pub fn words(&self) -> &[u64] {
        &self.words
    }

    pub(crate) fn words_mut(&mut self) -> &mut [u64] {
        &mut self.words
    }

    /// State of an active cell.
    pub fn get(&self, col: usize, row: usize) -> bool {
        let (word, bit) = self.layout.cell_word(col, row);
        (self.words[word] >> bit) & 1 != 0
    }

    pub fn set(&mut self, col: usize, row: usize, alive: bool) {
        let (word, bit) = self.layout.cell_word(col, row);
        let mask = 1u64 << bit;
        if alive {
            self.words[word] |= mask;
        } else {
            self.words[word] &= !mask;
        }
    }

    /// State of any buffer cell, padding rows included. `buf_row` 0 is the
    /// top padding row; active row `r` is buffer row `r + 1`.
    pub fn get_buf(&self, col: usize, buf_row: usize) -> bool {
        debug_assert!(col < self.layout.cols() && buf_row < self.layout.buffer_rows());
        let word = self.layout.word_index(col / Layout::CELLS_PER_WORD, buf_row);
        (self.words[word] >> (col % Layout::CELLS_PER_WORD)) & 1 != 0
    }

    /// Write any buffer cell, padding rows included. Padding contents are
    /// the owner's responsibility; the kernel only passes them through.
    pub fn set_buf(&mut self, col: usize, buf_row: usize, alive: bool) {
        debug_assert!(col < self.layout.cols() && buf_row < self.layout.buffer_rows());
        let word = self.layout.word_index(col / Layout::CELLS_PER_WORD, buf_row);
        let mask = 1u64 << (col % Layout::CELLS_PER_WORD);
        if alive {
            self.words[word] |= mask;
        } else {
            self.words[word] &= !mask;
        }
    }

    /// Kill every cell, padding included, without reallocating.
    pub fn clear(&mut self) {
        self.words.fill(0);
    }

    /// Number of live active cells; padding rows are not counted.
    pub fn population(&self) -> usize {
        let stride = self.layout.buffer_rows();
        self.words
            .iter()
            .enumerate()
            .filter(|(i, _)| !self.layout.is_border(i % stride))
            .map(|(_, word)| word.count_ones() as usize)
            .sum()
    }

    /// Overwrite the `pattern.width() x pattern.height()` rectangle whose
    /// top-left active cell is (`col`, `row`) with the pattern's cells.
    pub fn write_pattern(&mut self, pattern: &Pattern, col: usize, row: usize) -> Result<()> {
        if col + pattern.width() > self.layout.cols() || row + pattern.height() > self.layout.rows()
        {
            return Err(Error::PatternOverflow {
                pattern: (pattern.width(), pattern.height()),
                grid: (self.layout.cols(), self.layout.rows()),
            });
        }
        for y in 0..pattern.height() {
            for x in 0..pattern.width() {
                self.set(col + x, row + y, pattern.get(x, y));
            }
        }
        Ok(())
    }
}
