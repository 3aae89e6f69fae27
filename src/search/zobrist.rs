//! Zobrist hashing for position identification
//!
//! Zobrist hashing allows O(1) incremental hash updates when placing or
//! taking back a token. This is essential for efficient result-cache lookups
//! during search.
//!
//! # Example
//!
//! ```
//! use connectx::board::Board;
//! use connectx::search::ZobristTable;
//! use rand::SeedableRng;
//! use rand_xoshiro::Xoshiro256PlusPlus;
//!
//! let mut rng = Xoshiro256PlusPlus::seed_from_u64(7);
//! let zt = ZobristTable::new(6, 7, &mut rng);
//! let mut board = Board::new(6, 7, 4);
//!
//! let hash1 = zt.hash_of(board.occupied_cells());
//! board.place(3).unwrap();
//! let placed = board.last_move().unwrap();
//!
//! // Incremental update is equivalent to full recomputation
//! let hash2 = zt.toggle(hash1, placed);
//! assert_eq!(hash2, zt.hash_of(board.occupied_cells()));
//! // ...and applying it again restores the previous value
//! assert_eq!(zt.toggle(hash2, placed), hash1);
//! ```

use rand::Rng;

use crate::board::{Placement, Player};

/// Zobrist hash table for position hashing.
///
/// One random key per (row, column, player). A position's hash is the XOR of
/// the keys of its occupied cells. No side-to-move key is needed: in a
/// gravity game the side to move follows from the token count.
#[derive(Debug, Clone)]
pub struct ZobristTable {
    columns: usize,
    /// `keys[row * columns + column][player]`
    keys: Vec<[u64; 2]>,
}

impl ZobristTable {
    /// Draw a fresh key for every (row, column, player) slot.
    ///
    /// Keys come from the caller's generator, so hashes are only comparable
    /// within one table.
    #[must_use]
    pub fn new<R: Rng>(rows: usize, columns: usize, rng: &mut R) -> Self {
        let keys = (0..rows * columns)
            .map(|_| [rng.random::<u64>(), rng.random::<u64>()])
            .collect();
        Self { columns, keys }
    }

    #[inline]
    pub fn key(&self, row: usize, column: usize, player: Player) -> u64 {
        self.keys[row * self.columns + column][player.index()]
    }

    /// Compute the full hash from a set of occupied cells.
    ///
    /// Used once per turn to seed the incremental hash.
    #[must_use]
    pub fn hash_of<I>(&self, cells: I) -> u64
    where
        I: IntoIterator<Item = Placement>,
    {
        cells
            .into_iter()
            .fold(0, |h, p| h ^ self.key(p.row, p.column, p.player))
    }

    /// Incrementally add or remove one token.
    ///
    /// XOR is its own inverse: toggling the same placement twice is the
    /// identity.
    #[inline]
    #[must_use]
    pub fn toggle(&self, hash: u64, placement: Placement) -> u64 {
        hash ^ self.key(placement.row, placement.column, placement.player)
    }
}
