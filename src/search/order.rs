//! Center-first column ordering
//!
//! Central columns take part in the most lines, so trying them first gives
//! alpha-beta its cutoffs early. The order is computed once per engine.

/// Fixed permutation of `[0, N)`: center first, alternating outward.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveOrder {
    columns: Vec<usize>,
    /// Inverse permutation: `rank[column]` is the column's position in `columns`
    rank: Vec<usize>,
}

impl MoveOrder {
    /// Build the order for a board `n` columns wide.
    ///
    /// Odd `n` starts at `n / 2` then goes right-left outward
    /// (`7 -> [3, 4, 2, 5, 1, 6, 0]`); even `n` emits both center columns
    /// first (`4 -> [2, 1, 3, 0]`).
    #[must_use]
    pub fn center_out(n: usize) -> Self {
        let half = n / 2;
        let mut columns = Vec::with_capacity(n);
        if n % 2 == 1 {
            columns.push(half);
            for offset in 1..=half {
                columns.push(half + offset);
                columns.push(half - offset);
            }
        } else {
            for offset in 0..half {
                columns.push(half + offset);
                columns.push(half - offset - 1);
            }
        }

        let mut rank = vec![0; n];
        for (i, &column) in columns.iter().enumerate() {
            rank[column] = i;
        }
        Self { columns, rank }
    }

    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.columns.iter().copied()
    }

    #[inline]
    pub fn as_slice(&self) -> &[usize] {
        &self.columns
    }

    /// The column searched first (`None` only for a zero-width board)
    #[inline]
    pub fn first(&self) -> Option<usize> {
        self.columns.first().copied()
    }

    /// Position of `column` in the order
    #[inline]
    pub fn rank_of(&self, column: usize) -> usize {
        self.rank[column]
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_standard_width() {
        let order = MoveOrder::center_out(7);
        assert_eq!(order.as_slice(), &[3, 4, 2, 5, 1, 6, 0]);
        assert_eq!(order.first(), Some(3));
    }

    #[test]
    fn test_order_even_width() {
        assert_eq!(MoveOrder::center_out(4).as_slice(), &[2, 1, 3, 0]);
        assert_eq!(MoveOrder::center_out(2).as_slice(), &[1, 0]);
    }

    #[test]
    fn test_order_is_permutation() {
        for n in 1..=16 {
            let order = MoveOrder::center_out(n);
            let mut sorted = order.as_slice().to_vec();
            sorted.sort_unstable();
            assert_eq!(sorted, (0..n).collect::<Vec<_>>(), "width {n}");
            if n % 2 == 1 {
                assert_eq!(order.first(), Some(n / 2), "width {n}");
            }
        }
    }

    #[test]
    fn test_rank_is_inverse() {
        let order = MoveOrder::center_out(9);
        for (i, column) in order.iter().enumerate() {
            assert_eq!(order.rank_of(column), i);
        }
    }

    #[test]
    fn test_outermost_last() {
        let order = MoveOrder::center_out(8);
        let last = order.as_slice()[7];
        assert!(last == 0 || last == 7);
    }

    #[test]
    fn test_empty_width() {
        let order = MoveOrder::center_out(0);
        assert!(order.is_empty());
        assert_eq!(order.first(), None);
    }
}
