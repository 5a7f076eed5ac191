use crate::error::{Error, Result};

/// Addressing scheme of a packed grid buffer.
///
/// The grid is stored column-major by word strip: each strip covers 64
/// adjacent columns, and within a strip successive buffer rows are
/// contiguous. Every strip carries one padding row above and one below the
/// active area, so active row `r` lives at buffer row `r + 1`. There is no
/// side padding; columns outside the grid read as dead.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Layout {
    cols: usize,
    rows: usize,
}

impl Layout {
    pub const CELLS_PER_WORD: usize = u64::BITS as usize;

    pub fn new(cols: usize, rows: usize) -> Result<Self> {
        if cols == 0 || rows == 0 || cols % Self::CELLS_PER_WORD != 0 {
            return Err(Error::BadDimensions { cols, rows });
        }
        Ok(Self { cols, rows })
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of 64-column strips.
    pub fn word_cols(&self) -> usize {
        self.cols / Self::CELLS_PER_WORD
    }

    /// Rows per strip, padding included.
    pub fn buffer_rows(&self) -> usize {
        self.rows + 2
    }

    /// Total words in one packed buffer.
    pub fn words_len(&self) -> usize {
        self.word_cols() * self.buffer_rows()
    }

    /// Word position of `buf_row` inside `strip`. Bijective over the whole
    /// buffer: no two (strip, buffer row) pairs collide.
    pub fn word_index(&self, strip: usize, buf_row: usize) -> usize {
        debug_assert!(strip < self.word_cols() && buf_row < self.buffer_rows());
        strip * self.buffer_rows() + buf_row
    }

    /// Word position and bit offset of an active cell.
    pub fn cell_word(&self, col: usize, row: usize) -> (usize, u32) {
        debug_assert!(col < self.cols && row < self.rows);
        let word = self.word_index(col / Self::CELLS_PER_WORD, row + 1);
        (word, (col % Self::CELLS_PER_WORD) as u32)
    }

    /// Whether a buffer row is padding. Padding rows are read as neighbor
    /// input but never subject to the update rule.
    pub fn is_border(&self, buf_row: usize) -> bool {
        buf_row == 0 || buf_row == self.rows + 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_bad_dimensions() {
        assert_eq!(
            Layout::new(0, 8),
            Err(Error::BadDimensions { cols: 0, rows: 8 })
        );
        assert_eq!(
            Layout::new(64, 0),
            Err(Error::BadDimensions { cols: 64, rows: 0 })
        );
        assert_eq!(
            Layout::new(100, 8),
            Err(Error::BadDimensions { cols: 100, rows: 8 })
        );
        assert!(Layout::new(64, 1).is_ok());
        assert!(Layout::new(320, 200).is_ok());
    }

    #[test]
    fn word_index_is_a_bijection() {
        let layout = Layout::new(256, 20).unwrap();
        let mut seen = vec![false; layout.words_len()];
        for strip in 0..layout.word_cols() {
            for buf_row in 0..layout.buffer_rows() {
                let index = layout.word_index(strip, buf_row);
                assert!(index < layout.words_len());
                assert!(!seen[index], "collision at strip {strip}, row {buf_row}");
                seen[index] = true;
            }
        }
        assert!(seen.iter().all(|&v| v));
    }

    #[test]
    fn active_rows_skip_the_top_padding_row() {
        let layout = Layout::new(128, 10).unwrap();
        assert_eq!(layout.cell_word(0, 0), (1, 0));
        assert_eq!(layout.cell_word(63, 9), (10, 63));
        assert_eq!(layout.cell_word(64, 0), (layout.buffer_rows() + 1, 0));
    }

    #[test]
    fn padding_rows_are_first_and_last() {
        let layout = Layout::new(64, 10).unwrap();
        assert!(layout.is_border(0));
        assert!(layout.is_border(11));
        for buf_row in 1..=10 {
            assert!(!layout.is_border(buf_row));
        }
    }
}
