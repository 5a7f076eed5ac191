use crate::buffer::PackedBuffer;
use crate::error::{Error, Result};

/// Scalar reference implementation of [`crate::advance`]: same contract,
/// same padding policy, one cell at a time. Kept as the parity oracle for
/// tests and the baseline for benchmarks.
pub fn advance_naive(src: &PackedBuffer, dest: &mut PackedBuffer) -> Result<()> {
    if src.layout() != dest.layout() {
        return Err(Error::GridMismatch);
    }
    let layout = src.layout();

    for strip in 0..layout.word_cols() {
        let top = layout.word_index(strip, 0);
        let bottom = layout.word_index(strip, layout.rows() + 1);
        dest.words_mut()[top] = src.words()[top];
        dest.words_mut()[bottom] = src.words()[bottom];
    }

    for row in 0..layout.rows() {
        for col in 0..layout.cols() {
            let neighbors = count_neighbors(src, col, row);
            let alive = if src.get(col, row) {
                neighbors == 2 || neighbors == 3
            } else {
                neighbors == 3
            };
            dest.set(col, row, alive);
        }
    }
    Ok(())
}

fn count_neighbors(src: &PackedBuffer, col: usize, row: usize) -> u32 {
    let cols = src.layout().cols() as isize;
    let (col, buf_row) = (col as isize, row as isize + 1);
    let mut count = 0;
    for dr in -1..=1 {
        for dc in -1..=1 {
            if dr == 0 && dc == 0 {
                continue;
            }
            let c = col + dc;
            if c < 0 || c >= cols {
                continue;
            }
            if src.get_buf(c as usize, (buf_row + dr) as usize) {
                count += 1;
            }
        }
    }
    count
}
