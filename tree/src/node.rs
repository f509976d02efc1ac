//! Node definitions for the explicit game tree
//!
//! Nodes live in a flat array indexed by [`NodeId`] and are immutable once
//! built. Values stored on decision nodes come from the Bellman tables, so
//! they are always from the mover's perspective.

use blackwell_engine::{Move, Player, Sum, Value};

/// Node ID type (index into flat array storage)
pub type NodeId = u32;

/// Represents a node in the game tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// A player must add a number to the sum
    Decision {
        /// Unique identifier for this node (index in flat array)
        id: NodeId,
        /// Parent node ID (None for root)
        parent: Option<NodeId>,
        /// Move that led here from the parent
        via: Option<Move>,
        /// Player to move
        mover: Player,
        /// Running sum before the move
        sum: Sum,
        /// Bellman value to the mover
        value: Value,
        /// Optimal move from the policy table (None at the threshold)
        optimal: Option<Move>,
        /// Child node IDs, one per move 1..=k
        children: Vec<NodeId>,
    },
    /// The parent's move pushed the sum above N
    Bust {
        /// Unique identifier for this node
        id: NodeId,
        /// Parent node ID
        parent: NodeId,
        /// Move that busted
        via: Move,
        /// Player who busted and loses
        loser: Player,
        /// Sum after the busting move
        sum: Sum,
    },
}

impl Node {
    /// Get the node ID
    pub fn id(&self) -> NodeId {
        match self {
            Node::Decision { id, .. } => *id,
            Node::Bust { id, .. } => *id,
        }
    }

    /// Get the parent node ID
    pub fn parent(&self) -> Option<NodeId> {
        match self {
            Node::Decision { parent, .. } => *parent,
            Node::Bust { parent, .. } => Some(*parent),
        }
    }

    /// Get child node IDs
    pub fn children(&self) -> &[NodeId] {
        match self {
            Node::Decision { children, .. } => children,
            Node::Bust { .. } => &[],
        }
    }

    /// Move that led to this node
    pub fn via(&self) -> Option<Move> {
        match self {
            Node::Decision { via, .. } => *via,
            Node::Bust { via, .. } => Some(*via),
        }
    }

    pub fn sum(&self) -> Sum {
        match self {
            Node::Decision { sum, .. } => *sum,
            Node::Bust { sum, .. } => *sum,
        }
    }

    /// Check if this is a bust node
    pub fn is_bust(&self) -> bool {
        matches!(self, Node::Bust { .. })
    }

    /// Check if this is a decision node
    pub fn is_decision(&self) -> bool {
        matches!(self, Node::Decision { .. })
    }
}

/// Game tree wrapper
///
/// Contains a flat array of nodes for efficient traversal; the root is
/// always node 0.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameTree {
    /// Flat array of nodes indexed by NodeId
    pub nodes: Vec<Node>,
}

impl GameTree {
    /// Create a new empty game tree
    pub fn new() -> Self {
        GameTree { nodes: Vec::new() }
    }

    /// Get a node by ID
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id as usize)
    }

    pub fn root(&self) -> Option<&Node> {
        self.get(0)
    }

    /// Get the number of nodes
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if the tree is empty
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Number of decision nodes, one per position a search would visit.
    pub fn decision_count(&self) -> usize {
        self.nodes.iter().filter(|n| n.is_decision()).count()
    }

    /// Number of bust leaves.
    pub fn bust_count(&self) -> usize {
        self.nodes.iter().filter(|n| n.is_bust()).count()
    }
}

impl Default for GameTree {
    fn default() -> Self {
        Self::new()
    }
}
