use std::collections::{HashMap, VecDeque};

use serde::{Deserialize, Serialize};

use crate::{graph::Graph, grid::Point};

#[derive(Debug, PartialEq, Clone, Eq, Serialize, Deserialize)]
pub struct PathResult {
    /// Nodes from start to goal, both included
    pub path: Vec<Point>,
    pub start: Point,
    pub goal: Point,
}

impl PathResult {
    /// Number of graph edges the path crosses
    pub fn edges(&self) -> usize {
        self.path.len().saturating_sub(1)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathFinderState {
    Computing,
    NoPathFound,
    PathFound(PathResult),
}

impl PathFinderState {
    fn is_done(&self) -> bool {
        !matches!(self, PathFinderState::Computing)
    }
}

/// Breadth-first search over a [`Graph`].
///
/// The search does not stop when it reaches the goal, it runs until the whole component
/// reachable from the start has been visited and only then backtracks from the goal.
#[derive(Debug)]
pub struct PathFinder {
    start: Point,
    goal: Point,
    /// visited nodes and the node they were reached from (`None` for the start)
    visited: HashMap<Point, Option<Point>>,
    visit_list: VecDeque<Point>,
    state: PathFinderState,
}

impl PathFinder {
    pub fn new(start: Point, goal: Point) -> Self {
        Self {
            start,
            goal,
            visited: HashMap::from([(start, None)]),
            visit_list: VecDeque::from([start]),
            state: PathFinderState::Computing,
        }
    }

    pub fn finish(mut self, graph: &Graph) -> PathFinderState {
        loop {
            match self.step(graph) {
                PathFinderState::Computing => {}
                s => return s,
            }
        }
    }

    /// Expands a single node from the queue
    pub fn step(&mut self, graph: &Graph) -> PathFinderState {
        if self.state.is_done() {
            return self.state.clone();
        }

        if let Some(node) = self.visit_list.pop_front() {
            for &next in graph.neighbors_of(node) {
                if !self.visited.contains_key(&next) {
                    self.visited.insert(next, Some(node));
                    self.visit_list.push_back(next);
                }
            }
        } else {
            self.state = match self.backtrack() {
                Some(path) => PathFinderState::PathFound(PathResult {
                    path,
                    start: self.start,
                    goal: self.goal,
                }),
                None => PathFinderState::NoPathFound,
            };
        }

        self.state.clone()
    }

    /// Follows the predecessors from the goal back to the start
    fn backtrack(&self) -> Option<Vec<Point>> {
        if !self.visited.contains_key(&self.goal) {
            return None;
        }

        let mut path = vec![self.goal];
        let mut current = self.goal;
        while let Some(Some(from)) = self.visited.get(&current) {
            path.push(*from);
            current = *from;
        }

        path.reverse();
        Some(path)
    }

    pub fn state(&self) -> &PathFinderState {
        &self.state
    }

    pub fn is_visited(&self, node: Point) -> bool {
        self.visited.contains_key(&node)
    }

    pub fn visited_count(&self) -> usize {
        self.visited.len()
    }

    pub fn start(&self) -> Point {
        self.start
    }

    pub fn goal(&self) -> Point {
        self.goal
    }
}

/// Shortest path by edge count from `start` to `goal`, empty when `goal` is unreachable
pub fn shortest_path(graph: &Graph, start: Point, goal: Point) -> Vec<Point> {
    match PathFinder::new(start, goal).finish(graph) {
        PathFinderState::PathFound(result) => result.path,
        _ => Vec::new(),
    }
}
