use crate::foundation::core::Point;

/// Ordered waypoints from the planner: first is the start, last the goal (or
/// the nearest state reached). May be empty when no solution was found.
pub type SolutionPath = Vec<Point>;

/// One explored transition in the planner's search structure.
///
/// Edges arrive as a stream through [`GraphVisitor`] and are never
/// materialized as a collection.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GraphEdge {
    /// Tail endpoint in pixel space.
    pub from: Point,
    /// Head endpoint in pixel space.
    pub to: Point,
}

impl GraphEdge {
    /// Create an edge between two pixel-space points.
    pub fn new(from: Point, to: Point) -> Self {
        Self { from, to }
    }
}

/// Push-style callbacks a planner invokes while walking its search graph.
///
/// The planner drives the iteration in an order of its choosing: `vertex`
/// announces a state, `edge` one explored transition. Implementations react;
/// they cannot fail or reorder the stream.
pub trait GraphVisitor {
    /// Called once per visited vertex.
    fn vertex(&mut self, q: Point);
    /// Called once per explored edge, after the `vertex` call for its tail.
    fn edge(&mut self, from: Point, to: Point);
}
