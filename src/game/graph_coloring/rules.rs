//! Graph coloring rules: legal colors for a node and coloring checks

use super::graph::AdjacencyMatrix;

/// Color value of a node that has not been colored yet
pub const UNCOLORED: i32 = -1;

/// Legal colors for `node`
///
/// Entry `k` is true iff no neighbor of `node` currently holds color `k`.
/// An isolated node accepts every color; a node whose neighbors already use
/// all `num_colors` colors gets an all-false mask.
pub fn get_valid_colors(
    adj_matrix: &AdjacencyMatrix,
    colors: &[i32],
    node: usize,
    num_colors: usize,
) -> Vec<bool> {
    let mut mask = vec![true; num_colors];
    for neighbor in adj_matrix.neighbors(node) {
        let color = colors[neighbor];
        if color != UNCOLORED && (color as usize) < num_colors {
            mask[color as usize] = false;
        }
    }
    mask
}

/// Legal colors for every node at once, indexed by node
pub fn valid_colors_all_nodes(
    adj_matrix: &AdjacencyMatrix,
    colors: &[i32],
    num_colors: usize,
) -> Vec<Vec<bool>> {
    (0..adj_matrix.num_nodes())
        .map(|node| get_valid_colors(adj_matrix, colors, node, num_colors))
        .collect()
}

/// True iff every node is colored and no edge joins two equal colors
pub fn is_proper_coloring(adj_matrix: &AdjacencyMatrix, colors: &[i32]) -> bool {
    if colors.iter().any(|&color| color == UNCOLORED) {
        return false;
    }
    (0..adj_matrix.num_nodes()).all(|node| {
        adj_matrix
            .neighbors(node)
            .all(|neighbor| neighbor == node || colors[neighbor] != colors[node])
    })
}

/// Number of distinct colors assigned so far
pub fn num_colors_used(colors: &[i32]) -> usize {
    let mut used: Vec<i32> = colors
        .iter()
        .copied()
        .filter(|&color| color != UNCOLORED)
        .collect();
    used.sort_unstable();
    used.dedup();
    used.len()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle_plus_isolated() -> AdjacencyMatrix {
        // 0-1-2 triangle, node 3 isolated
        AdjacencyMatrix::from_edges(4, &[(0, 1), (1, 2), (0, 2)]).unwrap()
    }

    #[test]
    fn test_isolated_node_accepts_all_colors() {
        let graph = triangle_plus_isolated();
        let colors = [0, 1, 2, UNCOLORED];
        assert_eq!(get_valid_colors(&graph, &colors, 3, 4), vec![true; 4]);
        let colors = [UNCOLORED; 4];
        assert_eq!(get_valid_colors(&graph, &colors, 3, 2), vec![true; 2]);
    }

    #[test]
    fn test_neighbor_colors_are_excluded() {
        let graph = triangle_plus_isolated();
        let colors = [2, UNCOLORED, UNCOLORED, 0];
        // Node 3 holds color 0 but is not a neighbor of node 1
        assert_eq!(
            get_valid_colors(&graph, &colors, 1, 4),
            vec![true, true, false, true]
        );
    }

    #[test]
    fn test_fully_constrained_node() {
        let graph = triangle_plus_isolated();
        let colors = [0, 1, UNCOLORED, UNCOLORED];
        assert_eq!(get_valid_colors(&graph, &colors, 2, 2), vec![false, false]);
    }

    #[test]
    fn test_all_nodes_at_once() {
        let graph = triangle_plus_isolated();
        let colors = [0, UNCOLORED, UNCOLORED, UNCOLORED];
        let masks = valid_colors_all_nodes(&graph, &colors, 3);
        assert_eq!(masks.len(), 4);
        assert_eq!(masks[1], vec![false, true, true]);
        assert_eq!(masks[2], vec![false, true, true]);
        assert_eq!(masks[3], vec![true, true, true]);
    }

    #[test]
    fn test_proper_coloring() {
        let graph = triangle_plus_isolated();
        assert!(is_proper_coloring(&graph, &[0, 1, 2, 0]));
        assert!(!is_proper_coloring(&graph, &[0, 1, 0, 2]));
        assert!(!is_proper_coloring(&graph, &[0, 1, 2, UNCOLORED]));
    }

    #[test]
    fn test_num_colors_used() {
        assert_eq!(num_colors_used(&[UNCOLORED, UNCOLORED]), 0);
        assert_eq!(num_colors_used(&[3, 1, 3, UNCOLORED]), 2);
    }
}
