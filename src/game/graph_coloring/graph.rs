use crate::error::{PuzzleError, Result};

/// Square boolean adjacency matrix stored row-major
///
/// Node `j` is a neighbor of node `i` iff `is_adjacent(i, j)`. Matrices built
/// from edge lists are symmetric without self-loops; matrices built from
/// rows are taken as given.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdjacencyMatrix {
    num_nodes: usize,
    entries: Vec<bool>,
}

impl AdjacencyMatrix {
    /// Graph with `num_nodes` nodes and no edges
    pub fn with_nodes(num_nodes: usize) -> Result<Self> {
        if num_nodes == 0 {
            return Err(PuzzleError::InvalidGraph(
                "graph must have at least one node".to_string(),
            ));
        }
        Ok(Self::empty(num_nodes))
    }

    /// Edgeless graph; callers guarantee `num_nodes > 0`
    pub(crate) fn empty(num_nodes: usize) -> Self {
        Self {
            num_nodes,
            entries: vec![false; num_nodes * num_nodes],
        }
    }

    /// Build an undirected graph from an edge list
    pub fn from_edges(num_nodes: usize, edges: &[(usize, usize)]) -> Result<Self> {
        let mut matrix = Self::with_nodes(num_nodes)?;
        for &(a, b) in edges {
            if a >= num_nodes || b >= num_nodes {
                return Err(PuzzleError::InvalidGraph(format!(
                    "edge ({a}, {b}) references a node outside 0..{num_nodes}"
                )));
            }
            if a == b {
                return Err(PuzzleError::InvalidGraph(format!("self-loop on node {a}")));
            }
            matrix.add_edge(a, b);
        }
        Ok(matrix)
    }

    /// Build a matrix from its rows; the rows must form a square
    pub fn from_rows(rows: &[Vec<bool>]) -> Result<Self> {
        let num_nodes = rows.len();
        let mut matrix = Self::with_nodes(num_nodes)?;
        for (i, row) in rows.iter().enumerate() {
            if row.len() != num_nodes {
                return Err(PuzzleError::InvalidGraph(format!(
                    "row {i} has {} entries, expected {num_nodes}",
                    row.len()
                )));
            }
            matrix.entries[i * num_nodes..(i + 1) * num_nodes].copy_from_slice(row);
        }
        Ok(matrix)
    }

    pub(crate) fn add_edge(&mut self, a: usize, b: usize) {
        self.entries[a * self.num_nodes + b] = true;
        self.entries[b * self.num_nodes + a] = true;
    }

    pub fn num_nodes(&self) -> usize {
        self.num_nodes
    }

    pub fn is_adjacent(&self, i: usize, j: usize) -> bool {
        self.entries[i * self.num_nodes + j]
    }

    /// Neighbors of `node` in increasing order
    pub fn neighbors(&self, node: usize) -> impl Iterator<Item = usize> + '_ {
        let row = &self.entries[node * self.num_nodes..(node + 1) * self.num_nodes];
        row.iter()
            .enumerate()
            .filter_map(|(j, &adjacent)| adjacent.then_some(j))
    }

    pub fn degree(&self, node: usize) -> usize {
        self.neighbors(node).count()
    }

    /// Number of unordered node pairs joined in either direction
    pub fn num_edges(&self) -> usize {
        (0..self.num_nodes)
            .flat_map(|i| (i + 1..self.num_nodes).map(move |j| (i, j)))
            .filter(|&(i, j)| self.is_adjacent(i, j) || self.is_adjacent(j, i))
            .count()
    }

    /// Row-major entries, `num_nodes * num_nodes` long
    pub fn entries(&self) -> &[bool] {
        &self.entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_edges_is_symmetric() {
        let graph = AdjacencyMatrix::from_edges(4, &[(0, 1), (1, 2)]).unwrap();
        assert!(graph.is_adjacent(0, 1));
        assert!(graph.is_adjacent(1, 0));
        assert!(graph.is_adjacent(2, 1));
        assert!(!graph.is_adjacent(0, 2));
        assert_eq!(graph.neighbors(1).collect::<Vec<_>>(), vec![0, 2]);
        assert_eq!(graph.degree(3), 0);
        assert_eq!(graph.num_edges(), 2);
        assert_eq!(graph.entries().len(), 16);
    }

    #[test]
    fn test_from_edges_rejects_bad_edges() {
        assert!(AdjacencyMatrix::from_edges(3, &[(0, 3)]).is_err());
        assert!(AdjacencyMatrix::from_edges(3, &[(1, 1)]).is_err());
        assert!(AdjacencyMatrix::from_edges(0, &[]).is_err());
    }

    #[test]
    fn test_from_rows() {
        let rows = vec![
            vec![false, true, false],
            vec![true, false, false],
            vec![false, false, false],
        ];
        let graph = AdjacencyMatrix::from_rows(&rows).unwrap();
        assert_eq!(graph.num_nodes(), 3);
        assert!(graph.is_adjacent(0, 1));
        assert_eq!(graph.num_edges(), 1);

        let ragged = vec![vec![false, true], vec![true]];
        assert!(AdjacencyMatrix::from_rows(&ragged).is_err());
    }
}
