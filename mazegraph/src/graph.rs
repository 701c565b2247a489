use std::collections::HashMap;

use log::debug;

use crate::grid::{Maze, Point};

/// Adjacency lists keyed by passage pixel
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Graph {
    adjacency: HashMap<Point, Vec<Point>>,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Scans every pixel of the maze and links each passage pixel to its in-bounds
    /// passage neighbors (left, up, right, down). Diagonals are never considered.
    pub fn build<M: Maze>(maze: &M) -> Self {
        let mut adjacency = HashMap::new();

        for x in 0..maze.width() {
            for y in 0..maze.height() {
                let node = Point { x, y };
                if !maze.is_passage(node) {
                    continue;
                }

                let neighbors: Vec<Point> = node
                    .neighbors_four()
                    .filter(|p| maze.contains(*p) && maze.is_passage(*p))
                    .collect();

                adjacency.insert(node, neighbors);
            }
        }

        let graph = Self { adjacency };
        debug!(
            "built graph with {} nodes and {} edges from {}x{} maze",
            graph.node_count(),
            graph.edge_count(),
            maze.width(),
            maze.height()
        );
        graph
    }

    pub fn contains(&self, node: Point) -> bool {
        self.adjacency.contains_key(&node)
    }

    /// The neighbor list of `node`, empty if the node is not part of the graph
    pub fn neighbors_of(&self, node: Point) -> &[Point] {
        self.adjacency.get(&node).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn has_edge(&self, a: Point, b: Point) -> bool {
        self.neighbors_of(a).contains(&b)
    }

    pub fn node_count(&self) -> usize {
        self.adjacency.len()
    }

    /// Number of undirected edges
    pub fn edge_count(&self) -> usize {
        self.adjacency.values().map(Vec::len).sum::<usize>() / 2
    }

    pub fn is_empty(&self) -> bool {
        self.adjacency.is_empty()
    }

    /// All nodes in column-major order (the order the builder scans pixels in)
    pub fn nodes(&self) -> Vec<Point> {
        let mut nodes: Vec<Point> = self.adjacency.keys().copied().collect();
        nodes.sort_unstable();
        nodes
    }

    /// Adds the undirected edge `a <-> b`, skipping sides that already have it
    pub fn add_edge(&mut self, a: Point, b: Point) {
        if a == b {
            return;
        }
        let list = self.adjacency.entry(a).or_default();
        if !list.contains(&b) {
            list.push(b);
        }
        let list = self.adjacency.entry(b).or_default();
        if !list.contains(&a) {
            list.push(a);
        }
    }

    pub fn remove_edge(&mut self, a: Point, b: Point) {
        if let Some(list) = self.adjacency.get_mut(&a) {
            list.retain(|p| *p != b);
        }
        if let Some(list) = self.adjacency.get_mut(&b) {
            list.retain(|p| *p != a);
        }
    }

    /// Single optimization pass collapsing degree-2 nodes that sit on a straight corridor.
    ///
    /// Candidates are the nodes present when the pass starts, deletions happen once every
    /// candidate has been evaluated. A collapsed node is replaced by a direct edge between its
    /// two neighbors, so a reduced edge may stand for an arbitrarily long corridor and searching
    /// the result only minimizes the number of edges, not pixels.
    ///
    /// Returns the number of nodes removed.
    pub fn optimize(&mut self) -> usize {
        let mut to_delete = Vec::new();

        for node in self.nodes() {
            let (a, b) = match self.neighbors_of(node) {
                &[a, b] => (a, b),
                _ => continue,
            };

            // corners have neighbors that share neither column nor row
            if !a.is_aligned_with(&b) {
                continue;
            }

            self.add_edge(a, b);
            self.remove_edge(a, node);
            self.remove_edge(b, node);
            to_delete.push(node);
        }

        for node in &to_delete {
            self.adjacency.remove(node);
        }

        debug!(
            "optimization pass removed {} nodes, {} left",
            to_delete.len(),
            self.node_count()
        );
        to_delete.len()
    }

    /// Consuming variant of `optimize`, for use as a pipeline stage
    pub fn optimized(mut self) -> Self {
        self.optimize();
        self
    }

    /// Repeats `optimize` until a pass removes nothing. Returns the number of passes that
    /// removed at least one node.
    pub fn optimize_fully(&mut self) -> usize {
        let mut passes = 0;
        while self.optimize() > 0 {
            passes += 1;
        }
        debug!("optimization reached a fixed point after {} passes", passes);
        passes
    }
}

#[cfg(test)]
mod test {

    use super::*;
    use crate::grid::GridMap;

    fn create_basic_map() -> GridMap {
        [
            "#######",
            "#.###.#",
            "#.###.#",
            "#.#...#",
            "#.#.###",
            "#......",
            "#######",
        ]
        .join("\n")
        .parse()
        .unwrap()
    }

    fn assert_symmetric(graph: &Graph) {
        for a in graph.nodes() {
            for b in graph.neighbors_of(a) {
                assert!(graph.has_edge(*b, a), "{} -> {} is one-sided", a, b);
            }
        }
    }

    fn assert_no_duplicates_or_loops(graph: &Graph) {
        for a in graph.nodes() {
            let list = graph.neighbors_of(a);
            assert!(!list.contains(&a), "{} lists itself", a);
            for (i, b) in list.iter().enumerate() {
                assert!(!list[i + 1..].contains(b), "{} lists {} twice", a, b);
            }
        }
    }

    #[test]
    fn test_build_vertical_line() {
        let map: GridMap = "#.#\n#.#\n#.#".parse().unwrap();
        let graph = Graph::build(&map);

        assert_eq!(graph.node_count(), 3);
        assert_eq!(graph.edge_count(), 2);
        assert_eq!(graph.neighbors_of(Point::new(1, 0)), &[Point::new(1, 1)]);
        assert_eq!(
            graph.neighbors_of(Point::new(1, 1)),
            &[Point::new(1, 0), Point::new(1, 2)]
        );
        assert_eq!(graph.neighbors_of(Point::new(1, 2)), &[Point::new(1, 1)]);
    }

    #[test]
    fn test_build_one_node_per_passage() {
        let map = create_basic_map();
        let graph = Graph::build(&map);

        let passages = map
            .cells
            .iter()
            .flatten()
            .filter(|c| **c == crate::grid::Cell::Valid)
            .count();
        assert_eq!(graph.node_count(), passages);

        for node in graph.nodes() {
            assert!(map.is_passage(node));
            for n in graph.neighbors_of(node) {
                assert!(map.is_passage(*n));
                assert_eq!(node.x.abs_diff(n.x) + node.y.abs_diff(n.y), 1);
            }
        }
    }

    #[test]
    fn test_build_is_symmetric() {
        let graph = Graph::build(&create_basic_map());
        assert_symmetric(&graph);
        assert_no_duplicates_or_loops(&graph);
    }

    #[test]
    fn test_build_edges_of_image_are_not_neighbors() {
        // passage pixels touching every border, the probes past the edge must be ignored
        let map: GridMap = "...\n...\n...".parse().unwrap();
        let graph = Graph::build(&map);

        assert_eq!(graph.node_count(), 9);
        assert_eq!(graph.edge_count(), 12);
        assert_eq!(graph.neighbors_of(Point::new(0, 0)).len(), 2);
        assert_eq!(graph.neighbors_of(Point::new(2, 2)).len(), 2);
        assert_eq!(graph.neighbors_of(Point::new(1, 1)).len(), 4);
    }

    #[test]
    fn test_build_no_diagonals() {
        let map: GridMap = ".#\n#.".parse().unwrap();
        let graph = Graph::build(&map);

        assert_eq!(graph.node_count(), 2);
        assert_eq!(graph.edge_count(), 0);
    }

    #[test]
    fn test_optimize_vertical_line() {
        let map: GridMap = "#.#\n#.#\n#.#".parse().unwrap();
        let mut graph = Graph::build(&map);

        assert_eq!(graph.optimize(), 1);
        assert_eq!(graph.node_count(), 2);
        assert!(!graph.contains(Point::new(1, 1)));
        assert_eq!(graph.neighbors_of(Point::new(1, 0)), &[Point::new(1, 2)]);
        assert_eq!(graph.neighbors_of(Point::new(1, 2)), &[Point::new(1, 0)]);
    }

    #[test]
    fn test_optimize_keeps_corners() {
        let map: GridMap = ".##\n...".parse().unwrap();
        let mut graph = Graph::build(&map);

        // (0, 1) is a corner, (1, 1) sits between (0, 1) and (2, 1)
        graph.optimize();

        assert!(graph.contains(Point::new(0, 1)));
        assert!(!graph.contains(Point::new(1, 1)));
        assert!(graph.has_edge(Point::new(0, 1), Point::new(2, 1)));
    }

    #[test]
    fn test_optimize_long_corridor() {
        let map: GridMap = "#.#\n#.#\n#.#\n#.#\n#.#\n#.#".parse().unwrap();
        let mut graph = Graph::build(&map);
        graph.optimize_fully();

        assert_eq!(graph.nodes(), vec![Point::new(1, 0), Point::new(1, 5)]);
        assert!(graph.has_edge(Point::new(1, 0), Point::new(1, 5)));
    }

    #[test]
    fn test_optimize_preserves_invariants() {
        let map = create_basic_map();
        let original = Graph::build(&map);
        let mut graph = original.clone();
        graph.optimize();

        assert!(graph.node_count() < original.node_count());
        assert_symmetric(&graph);
        assert_no_duplicates_or_loops(&graph);
        for node in graph.nodes() {
            // nodes are removed, never fabricated
            assert!(original.contains(node));
            for n in graph.neighbors_of(node) {
                assert!(graph.contains(*n));
                assert!(node.is_aligned_with(n));
            }
        }
    }

    #[test]
    fn test_optimize_fixed_point_is_idempotent() {
        let mut graph = Graph::build(&create_basic_map());
        graph.optimize_fully();

        let settled = graph.clone();
        assert_eq!(graph.optimize(), 0);
        assert_eq!(graph, settled);
        assert_eq!(graph.optimize_fully(), 0);
        assert_eq!(graph, settled);
    }

    #[test]
    fn test_add_and_remove_edge() {
        let mut graph = Graph::new();
        let a = Point::new(0, 0);
        let b = Point::new(0, 3);

        graph.add_edge(a, b);
        graph.add_edge(b, a);
        graph.add_edge(a, a);
        assert_eq!(graph.edge_count(), 1);
        assert_eq!(graph.neighbors_of(a), &[b]);

        graph.remove_edge(b, a);
        assert_eq!(graph.edge_count(), 0);
        assert!(graph.contains(a));
        assert!(graph.neighbors_of(Point::new(9, 9)).is_empty());
    }
}
