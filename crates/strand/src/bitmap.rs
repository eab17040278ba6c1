//! Occupancy bitmap for arena slots.
//!
//! [`SlotBitmap`] stores one bit per slot in 64-bit words. Bit `i` is set
//! iff slot `i` holds a live node. The slot count is always a whole number
//! of words, so a bitmap built for `n` bits may address more than `n`.
//!
//! Words live in a `SmallVec`: arenas of up to 128 slots keep their bitmap
//! inline next to the arena header instead of in a separate heap block.

use smallvec::SmallVec;

type Word = u64;

/// Bits per bitmap word.
pub const BITS_PER_WORD: usize = Word::BITS as usize;

/// Fixed-size occupancy bitmap.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SlotBitmap {
    words: SmallVec<[Word; 2]>,
}

impl SlotBitmap {
    /// Number of words needed to hold `bit_count` bits.
    pub const fn size_in_words(bit_count: usize) -> usize {
        bit_count.div_ceil(BITS_PER_WORD)
    }

    /// Create a zeroed bitmap with room for at least `bit_count` bits.
    pub fn with_bit_count(bit_count: usize) -> Self {
        Self {
            words: SmallVec::from_elem(0, Self::size_in_words(bit_count)),
        }
    }

    /// Number of addressable bits (always a multiple of [`BITS_PER_WORD`]).
    pub fn bit_count(&self) -> usize {
        self.words.len() * BITS_PER_WORD
    }

    /// Number of backing words.
    pub fn word_count(&self) -> usize {
        self.words.len()
    }

    /// Read bit `i`.
    ///
    /// # Panics
    ///
    /// Panics if `i >= bit_count()`.
    pub fn get(&self, i: usize) -> bool {
        let (word, mask) = self.locate(i);
        self.words[word] & mask != 0
    }

    /// Write bit `i`.
    ///
    /// # Panics
    ///
    /// Panics if `i >= bit_count()`.
    pub fn set(&mut self, i: usize, value: bool) {
        let (word, mask) = self.locate(i);
        if value {
            self.words[word] |= mask;
        } else {
            self.words[word] &= !mask;
        }
    }

    /// Clear every bit.
    pub fn zero_fill(&mut self) {
        self.words.fill(0);
    }

    /// Lowest clear bit, or `None` when every bit is set.
    ///
    /// Scans for the first word that is not all ones, then takes the lowest
    /// zero bit inside it.
    pub fn find_hole(&self) -> Option<usize> {
        self.words
            .iter()
            .position(|&w| w != Word::MAX)
            .map(|word| word * BITS_PER_WORD + self.words[word].trailing_ones() as usize)
    }

    /// Number of set bits.
    pub fn count_ones(&self) -> usize {
        self.words.iter().map(|w| w.count_ones() as usize).sum()
    }

    fn locate(&self, i: usize) -> (usize, Word) {
        assert!(
            i < self.bit_count(),
            "bit {i} out of range for bitmap of {} bits",
            self.bit_count()
        );
        (i / BITS_PER_WORD, 1 << (i % BITS_PER_WORD))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn size_rounds_up_to_whole_words() {
        assert_eq!(SlotBitmap::size_in_words(0), 0);
        assert_eq!(SlotBitmap::size_in_words(1), 1);
        assert_eq!(SlotBitmap::size_in_words(64), 1);
        assert_eq!(SlotBitmap::size_in_words(65), 2);
        assert_eq!(SlotBitmap::with_bit_count(32).bit_count(), 64);
        assert_eq!(SlotBitmap::with_bit_count(100).bit_count(), 128);
    }

    #[test]
    fn new_bitmap_is_clear() {
        let bm = SlotBitmap::with_bit_count(128);
        assert_eq!(bm.count_ones(), 0);
        assert!((0..128).all(|i| !bm.get(i)));
    }

    #[test]
    fn set_and_clear_single_bits() {
        let mut bm = SlotBitmap::with_bit_count(128);
        bm.set(3, true);
        bm.set(64, true);
        bm.set(127, true);
        assert!(bm.get(3) && bm.get(64) && bm.get(127));
        assert!(!bm.get(4));
        assert_eq!(bm.count_ones(), 3);

        bm.set(64, false);
        assert!(!bm.get(64));
        assert_eq!(bm.count_ones(), 2);
    }

    #[test]
    fn find_hole_returns_lowest_free_bit() {
        let mut bm = SlotBitmap::with_bit_count(64);
        assert_eq!(bm.find_hole(), Some(0));
        bm.set(0, true);
        bm.set(1, true);
        bm.set(3, true);
        assert_eq!(bm.find_hole(), Some(2));
    }

    #[test]
    fn find_hole_reports_global_index_in_later_words() {
        let mut bm = SlotBitmap::with_bit_count(192);
        for i in 0..70 {
            bm.set(i, true);
        }
        assert_eq!(bm.find_hole(), Some(70));

        for i in 70..128 {
            bm.set(i, true);
        }
        assert_eq!(bm.find_hole(), Some(128));
    }

    #[test]
    fn find_hole_none_when_full() {
        let mut bm = SlotBitmap::with_bit_count(64);
        for i in 0..64 {
            bm.set(i, true);
        }
        assert_eq!(bm.find_hole(), None);
        assert_eq!(SlotBitmap::with_bit_count(0).find_hole(), None);
    }

    #[test]
    fn zero_fill_clears_everything() {
        let mut bm = SlotBitmap::with_bit_count(128);
        bm.set(5, true);
        bm.set(100, true);
        bm.zero_fill();
        assert_eq!(bm.count_ones(), 0);
        assert_eq!(bm.bit_count(), 128);
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn get_past_end_panics() {
        let bm = SlotBitmap::with_bit_count(64);
        bm.get(64);
    }

    #[cfg(not(miri))]
    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn find_hole_matches_linear_scan(
                bits in proptest::collection::vec(any::<bool>(), 1..300),
            ) {
                let mut bm = SlotBitmap::with_bit_count(bits.len());
                for (i, &b) in bits.iter().enumerate() {
                    bm.set(i, b);
                }
                let expected = (0..bm.bit_count()).find(|&i| !bm.get(i));
                prop_assert_eq!(bm.find_hole(), expected);
                prop_assert_eq!(bm.count_ones(), bits.iter().filter(|&&b| b).count());
            }
        }
    }
}
