//! Search node representation.

use crate::core::{NodeKey, Point3};

/// One node per discrete cell considered during a search session.
///
/// `weight` is sealed: it always equals `origin_cost + destin_cost` and is
/// recomputed whenever either cost changes. The session exclusively owns
/// every node it creates; parent links are non-owning key references that
/// form a tree rooted at the start node. A node is only ever linked to an
/// already-expanded predecessor, so the links cannot cycle.
#[derive(Clone, Copy, Debug)]
pub struct SearchNode {
    key: NodeKey,
    position: Point3,
    origin_cost: f32,
    destin_cost: f32,
    weight: f32,
    parent: Option<NodeKey>,
}

impl SearchNode {
    /// Create a node with the given costs; weight is derived immediately.
    pub fn new(
        key: NodeKey,
        position: Point3,
        origin_cost: f32,
        destin_cost: f32,
        parent: Option<NodeKey>,
    ) -> Self {
        Self {
            key,
            position,
            origin_cost,
            destin_cost,
            weight: origin_cost + destin_cost,
            parent,
        }
    }

    /// Discrete cell identity.
    #[inline]
    pub fn key(&self) -> NodeKey {
        self.key
    }

    /// Resolved 3D position (horizontal quantized, height from the oracle).
    #[inline]
    pub fn position(&self) -> Point3 {
        self.position
    }

    /// Accumulated cost from the start node (g).
    #[inline]
    pub fn origin_cost(&self) -> f32 {
        self.origin_cost
    }

    /// Heuristic estimate to the goal (h).
    #[inline]
    pub fn destin_cost(&self) -> f32 {
        self.destin_cost
    }

    /// Total estimated cost (f = g + h).
    #[inline]
    pub fn weight(&self) -> f32 {
        self.weight
    }

    /// Predecessor cell, `None` for the start node.
    #[inline]
    pub fn parent(&self) -> Option<NodeKey> {
        self.parent
    }

    /// A cheaper route to this cell was found: lower g, switch parent,
    /// re-derive weight. Only the open list calls this, as part of a
    /// decrease-key.
    pub(super) fn reroute(&mut self, origin_cost: f32, parent: NodeKey) {
        self.origin_cost = origin_cost;
        self.parent = Some(parent);
        self.weight = self.origin_cost + self.destin_cost;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_weight_derived() {
        let node = SearchNode::new(NodeKey::new(0, 0), Point3::ZERO, 3.0, 4.0, None);
        assert_relative_eq!(node.weight(), 7.0);
    }

    #[test]
    fn test_reroute_recomputes_weight() {
        let mut node = SearchNode::new(NodeKey::new(1, 1), Point3::ZERO, 10.0, 4.0, None);
        node.reroute(6.0, NodeKey::new(0, 1));
        assert_relative_eq!(node.weight(), 10.0);
        assert_eq!(node.parent(), Some(NodeKey::new(0, 1)));
    }
}
