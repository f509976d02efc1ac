//! blackwell Tree Builder - Explicit game tree construction
//!
//! Expands every line of play from sum 0 into a flat-array tree annotated
//! with Bellman values and optimal moves. The tree grows exponentially in
//! `N`, so construction is capped by a node limit and is intended for small
//! parameters (inspection, rendering, cross-checking the search counters).

pub mod node;

use log::debug;
use thiserror::Error;

use blackwell_engine::{GameParams, Move, Player, Solution, Sum};

use crate::node::{GameTree, Node, NodeId};

/// Default cap on the number of nodes a tree may hold.
pub const DEFAULT_NODE_LIMIT: usize = 10_000;

/// Error types for game tree construction.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TreeError {
    #[error("game tree for {params} exceeds {limit} nodes")]
    TreeTooLarge { params: GameParams, limit: usize },
}

struct Builder<'a> {
    solution: &'a Solution,
    limit: usize,
    nodes: Vec<Node>,
}

impl Builder<'_> {
    fn next_id(&self) -> Result<NodeId, TreeError> {
        if self.nodes.len() >= self.limit {
            return Err(TreeError::TreeTooLarge {
                params: self.solution.params(),
                limit: self.limit,
            });
        }
        NodeId::try_from(self.nodes.len()).map_err(|_| TreeError::TreeTooLarge {
            params: self.solution.params(),
            limit: self.limit,
        })
    }

    /// Push a decision node at `sum` and expand its subtree depth-first.
    fn expand(
        &mut self,
        parent: Option<NodeId>,
        via: Option<Move>,
        mover: Player,
        sum: Sum,
    ) -> Result<NodeId, TreeError> {
        let params = self.solution.params();
        let width = params.k().min(self.limit);
        let id = self.next_id()?;
        self.nodes.push(Node::Decision {
            id,
            parent,
            via,
            mover,
            sum,
            value: self.solution.values()[sum],
            optimal: self.solution.best_move(sum),
            children: Vec::new(),
        });

        let mut children = Vec::with_capacity(width);
        for i in params.legal_moves(sum) {
            let next = params.apply_move(sum, i);
            let child = if params.is_bust(sum, i) {
                let child = self.next_id()?;
                self.nodes.push(Node::Bust {
                    id: child,
                    parent: id,
                    via: i,
                    loser: mover,
                    sum: next,
                });
                child
            } else {
                self.expand(Some(id), Some(i), mover.opponent(), next)?
            };
            children.push(child);
        }

        if let Some(Node::Decision { children: slot, .. }) = self.nodes.get_mut(id as usize) {
            *slot = children;
        }
        Ok(id)
    }
}

/// Build the full game tree from sum 0, Player I to move.
pub fn build_tree(solution: &Solution, limit: usize) -> Result<GameTree, TreeError> {
    let mut builder = Builder {
        solution,
        limit,
        nodes: Vec::new(),
    };
    builder.expand(None, None, Player::I, 0)?;
    debug!(
        "built game tree for {}: {} nodes",
        solution.params(),
        builder.nodes.len()
    );
    Ok(GameTree {
        nodes: builder.nodes,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use blackwell_engine::{LOSS, WIN};

    fn tree_for(k: usize, n: Sum) -> GameTree {
        let solution = Solution::compute(GameParams::new(k, n).unwrap());
        build_tree(&solution, DEFAULT_NODE_LIMIT).unwrap()
    }

    #[test]
    fn test_threshold_zero_tree() {
        let tree = tree_for(2, 0);
        // Root plus one bust leaf per move
        assert_eq!(tree.len(), 3);
        assert_eq!(tree.decision_count(), 1);
        assert_eq!(tree.bust_count(), 2);
        match tree.root().unwrap() {
            Node::Decision {
                value,
                optimal,
                children,
                ..
            } => {
                assert_eq!(*value, LOSS);
                assert_eq!(*optimal, None);
                assert_eq!(children, &vec![1, 2]);
            }
            other => panic!("root should be a decision node: {other:?}"),
        }
    }

    #[test]
    fn test_nodes_stored_in_id_order() {
        let tree = tree_for(2, 4);
        for (idx, node) in tree.nodes.iter().enumerate() {
            assert_eq!(node.id() as usize, idx);
            for &child in node.children() {
                assert_eq!(tree.get(child).unwrap().parent(), Some(node.id()));
            }
        }
    }

    #[test]
    fn test_root_annotations_k3_n4() {
        let tree = tree_for(3, 4);
        match tree.root().unwrap() {
            Node::Decision {
                mover,
                value,
                optimal,
                children,
                ..
            } => {
                assert_eq!(*mover, Player::I);
                assert_eq!(*value, LOSS);
                assert_eq!(*optimal, Some(1));
                assert_eq!(children.len(), 3);
            }
            other => panic!("root should be a decision node: {other:?}"),
        }
        let first_child = tree.get(1).unwrap();
        assert_eq!(first_child.sum(), 1);
        assert_eq!(first_child.via(), Some(1));
        if let Node::Decision { mover, value, .. } = first_child {
            assert_eq!(*mover, Player::II);
            assert_eq!(*value, WIN);
        }
    }

    #[test]
    fn test_bust_leaves_mark_the_mover() {
        let tree = tree_for(3, 5);
        for node in &tree.nodes {
            if let Node::Bust { parent, loser, sum, .. } = node {
                assert!(*sum > 5);
                match tree.get(*parent).unwrap() {
                    Node::Decision { mover, .. } => assert_eq!(mover, loser),
                    other => panic!("bust parent should be a decision node: {other:?}"),
                }
            }
        }
    }

    #[test]
    fn test_node_limit_enforced() {
        let solution = Solution::compute(GameParams::new(4, 20).unwrap());
        let err = build_tree(&solution, 1_000).unwrap_err();
        assert!(matches!(err, TreeError::TreeTooLarge { limit: 1_000, .. }));
    }
}
