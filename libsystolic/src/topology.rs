//! Static wiring of the cell array: the Moore neighborhood used for rule evaluation and the
//! linear row-major shift chain used for serial I/O.

use itertools::Itertools;
use log::debug;

use crate::{error::ConfigError, pos::Position};

/// Compass offsets as `(d_row, d_col)`, starting north-west and going clockwise.
pub const NEIGHBOR_OFFSETS: [(isize, isize); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
    (1, 0),
    (1, -1),
    (0, -1),
];

/// Neighbor chain indices of one cell, `None` where the offset falls outside the grid.
pub type NeighborSet = [Option<usize>; 8];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridTopology {
    rows: usize,
    columns: usize,
    neighbors: Vec<NeighborSet>,
}

impl GridTopology {
    pub fn new(rows: usize, columns: usize) -> Result<Self, ConfigError> {
        if rows < 1 || columns < 1 {
            return Err(ConfigError::EmptyGrid { rows, columns });
        }

        let neighbors = (0..rows)
            .cartesian_product(0..columns)
            .map(|(row, col)| Self::wire_neighbors(rows, columns, Position { row, col }))
            .collect_vec();

        debug!("Wired {rows}x{columns} topology ({} cells)", neighbors.len());

        Ok(Self {
            rows,
            columns,
            neighbors,
        })
    }

    fn wire_neighbors(rows: usize, columns: usize, center: Position) -> NeighborSet {
        NEIGHBOR_OFFSETS.map(|(d_row, d_col)| {
            let Position { row, col } = center.offset(d_row, d_col)?;
            (row < rows && col < columns).then_some(row * columns + col)
        })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn dimensions(&self) -> (usize, usize) {
        (self.rows, self.columns)
    }

    /// Number of cells, which is also the length of the shift chain.
    pub fn len(&self) -> usize {
        self.rows * self.columns
    }

    /// Always false, construction rejects empty grids.
    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn neighbors(&self, index: usize) -> Option<&NeighborSet> {
        self.neighbors.get(index)
    }

    /// Indices of the wired neighbors of `index`, skipping the edge gaps.
    pub fn wired_neighbors(&self, index: usize) -> impl Iterator<Item = usize> + '_ {
        self.neighbors
            .get(index)
            .into_iter()
            .flat_map(|set| set.iter().flatten().copied())
    }

    pub fn chain_index<P>(&self, pos: P) -> Option<usize>
    where
        P: Into<Position>,
    {
        let Position { row, col } = pos.into();
        (row < self.rows && col < self.columns).then_some(row * self.columns + col)
    }

    pub fn chain_position(&self, index: usize) -> Option<Position> {
        (index < self.len()).then(|| Position {
            row: index / self.columns,
            col: index % self.columns,
        })
    }

    /// The cell this one shifts from. `None` for the entry cell, which reads the external data line.
    pub fn chain_predecessor(&self, index: usize) -> Option<usize> {
        (index > 0 && index < self.len()).then(|| index - 1)
    }

    /// The cell this one shifts into. `None` for the exit cell, whose bit leaves the array.
    pub fn chain_successor(&self, index: usize) -> Option<usize> {
        (index + 1 < self.len()).then(|| index + 1)
    }

    pub fn entry(&self) -> usize {
        0
    }

    pub fn exit(&self) -> usize {
        self.len() - 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wired_count(topology: &GridTopology, pos: (usize, usize)) -> usize {
        let index = topology.chain_index(pos).unwrap();
        topology.wired_neighbors(index).count()
    }

    #[test]
    fn rejects_empty_dimensions() {
        assert_eq!(
            GridTopology::new(0, 5),
            Err(ConfigError::EmptyGrid { rows: 0, columns: 5 })
        );
        assert_eq!(
            GridTopology::new(3, 0),
            Err(ConfigError::EmptyGrid { rows: 3, columns: 0 })
        );
    }

    #[test]
    fn edges_are_truncated() {
        let topology = GridTopology::new(4, 5).unwrap();

        for corner in [(0, 0), (0, 4), (3, 0), (3, 4)] {
            assert_eq!(wired_count(&topology, corner), 3, "corner {corner:?}");
        }

        for edge in [(0, 2), (3, 2), (1, 0), (2, 4)] {
            assert_eq!(wired_count(&topology, edge), 5, "edge {edge:?}");
        }

        assert_eq!(wired_count(&topology, (2, 2)), 8);
    }

    #[test]
    fn single_cell_has_no_neighbors() {
        let topology = GridTopology::new(1, 1).unwrap();

        assert_eq!(topology.neighbors(0), Some(&[None; 8]));
        assert_eq!(topology.entry(), topology.exit());
    }

    #[test]
    fn neighbors_follow_offsets() {
        let topology = GridTopology::new(3, 3).unwrap();
        let center = topology.chain_index((1, 1)).unwrap();

        let expected = [0, 1, 2, 5, 8, 7, 6, 3].map(Some);
        assert_eq!(topology.neighbors(center), Some(&expected));

        // North-west corner only sees east, south-east and south.
        assert_eq!(
            topology.neighbors(0),
            Some(&[None, None, None, Some(1), Some(4), Some(3), None, None])
        );
    }

    #[test]
    fn neighbor_relation_is_symmetric() {
        let topology = GridTopology::new(4, 6).unwrap();

        for index in 0..topology.len() {
            for neighbor in topology.wired_neighbors(index) {
                assert!(topology.wired_neighbors(neighbor).any(|back| back == index));
            }
        }
    }

    #[test]
    fn chain_wraps_row_ends() {
        let topology = GridTopology::new(3, 4).unwrap();

        assert_eq!(topology.chain_predecessor(0), None);
        assert_eq!(topology.chain_predecessor(1), Some(0));

        let row_start = topology.chain_index((1, 0)).unwrap();
        let prev_row_end = topology.chain_index((0, 3)).unwrap();
        assert_eq!(topology.chain_predecessor(row_start), Some(prev_row_end));
        assert_eq!(topology.chain_successor(prev_row_end), Some(row_start));

        assert_eq!(topology.exit(), 11);
        assert_eq!(topology.chain_successor(topology.exit()), None);
        assert_eq!(topology.chain_position(11), Some(Position::new(2, 3)));
        assert_eq!(topology.chain_position(12), None);
    }
}
