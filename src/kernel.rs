use crate::buffer::PackedBuffer;
use crate::error::{Error, Result};

const EDGE: u32 = u64::BITS - 1;

/// Result of a bit-parallel addition stage.
#[derive(Copy, Clone)]
struct Add {
    sum: u64,
    carry: u64,
}

#[inline(always)]
fn half_add(a: u64, b: u64) -> Add {
    Add {
        sum: a ^ b,
        carry: a & b,
    }
}

#[inline(always)]
fn full_add(a: u64, b: u64, c: u64) -> Add {
    let r0 = half_add(a, b);
    let r1 = half_add(r0.sum, c);
    Add {
        sum: r1.sum,
        carry: r0.carry | r1.carry,
    }
}

/// Plane of west neighbors for a word row given as [left, mid, right].
#[inline(always)]
fn west(row: &[u64; 3]) -> u64 {
    (row[1] << 1) | (row[0] >> EDGE)
}

/// Plane of east neighbors.
#[inline(always)]
fn east(row: &[u64; 3]) -> u64 {
    (row[1] >> 1) | (row[2] << EDGE)
}

/// Next state for 64 cells at once. Each input row is [left, mid, right]
/// source words; the two cells at the ends of `mid` take their missing
/// neighbor bits from the adjacent words.
#[inline(always)]
fn life_word(above: &[u64; 3], current: &[u64; 3], below: &[u64; 3]) -> u64 {
    // Row-wise neighbor sums, then a reduction into ones/twos/fours
    // bit-planes of the eight-cell neighborhood count.
    let top = full_add(west(above), above[1], east(above));
    let mid = half_add(west(current), east(current));
    let bot = full_add(west(below), below[1], east(below));

    let ones = full_add(top.sum, mid.sum, bot.sum);
    let twos = full_add(top.carry, mid.carry, bot.carry);
    let high = half_add(twos.sum, ones.carry);

    // A cell is set iff the count with the cell's own state folded into the
    // low bit reads exactly 0b011. Counts of 8 and 9 alias to 0 and 1 in
    // the low bits but are cleared by the carry masks like every count
    // above 3.
    (ones.sum | current[1]) & high.sum & !twos.carry & !high.carry
}

/// Computes the next generation of `src` into `dest`.
///
/// Every active cell of `dest` is overwritten with the Life rule applied to
/// its eight neighbors in `src`; `dest` is never read. Padding rows are
/// copied verbatim from `src`, and columns outside the grid count as dead.
/// The two buffers cannot alias (distinct `&`/`&mut` receivers); the only
/// runtime contract check is that their layouts agree.
///
/// Allocation-free: the kernel works directly on the two buffers with a
/// three-row sliding window of locals.
pub fn advance(src: &PackedBuffer, dest: &mut PackedBuffer) -> Result<()> {
    if src.layout() != dest.layout() {
        return Err(Error::GridMismatch);
    }
    let layout = src.layout();
    let (strips, stride) = (layout.word_cols(), layout.buffer_rows());
    let src_words = src.words();
    let dest_words = dest.words_mut();

    for strip in 0..strips {
        let base = strip * stride;
        let left = if strip > 0 { Some(base - stride) } else { None };
        let right = if strip + 1 < strips {
            Some(base + stride)
        } else {
            None
        };
        let window = |buf_row: usize| -> [u64; 3] {
            [
                left.map_or(0, |b| src_words[b + buf_row]),
                src_words[base + buf_row],
                right.map_or(0, |b| src_words[b + buf_row]),
            ]
        };

        dest_words[base] = src_words[base];
        dest_words[base + stride - 1] = src_words[base + stride - 1];

        let mut above = window(0);
        let mut current = window(1);
        for buf_row in 1..=layout.rows() {
            let below = window(buf_row + 1);
            dest_words[base + buf_row] = life_word(&above, &current, &below);
            above = current;
            current = below;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::Layout;

    #[test]
    fn life_word_grows_a_vertical_blinker() {
        let column = 1u64 << 4;
        let row = [0, column, 0];
        let next = life_word(&row, &row, &row);
        assert_eq!(next, (1 << 3) | (1 << 4) | (1 << 5));
    }

    #[test]
    fn life_word_clears_overcrowded_cells() {
        let full = [u64::MAX, u64::MAX, u64::MAX];
        assert_eq!(life_word(&full, &full, &full), 0);
        let empty = [0, 0, 0];
        assert_eq!(life_word(&empty, &empty, &empty), 0);
    }

    #[test]
    fn life_word_reads_the_adjacent_word() {
        // Lone east neighbors in the next strip: cell 63 of an otherwise
        // empty row sees three live cells in column 64.
        let spill = [0, 0, 1];
        assert_eq!(life_word(&spill, &spill, &spill), 1 << 63);
        let spill_back = [1 << 63, 0, 0];
        assert_eq!(life_word(&spill_back, &spill_back, &spill_back), 1);
    }

    #[test]
    fn rejects_mismatched_layouts() {
        let src = PackedBuffer::new(Layout::new(64, 8).unwrap());
        let mut dest = PackedBuffer::new(Layout::new(64, 9).unwrap());
        assert_eq!(advance(&src, &mut dest), Err(Error::GridMismatch));
    }
}
