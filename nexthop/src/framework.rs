use std::fmt::{Debug, Display};
use std::hash::Hash;
use std::sync::atomic::AtomicBool;

use cfg_if::cfg_if;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::feedback::StepError;

/// Opaque per-node attributes, as written by topology ingestion.
pub type Metadata = Map<String, Value>;

cfg_if! {
    if #[cfg(feature = "parallel")] {
        /// Nodes are shared across worker threads when resolution fans out.
        pub trait NodeBound: Sync {}
        impl<T: Sync> NodeBound for T {}
    } else {
        pub trait NodeBound {}
        impl<T> NodeBound for T {}
    }
}

/// A vertex of the host's property graph, seen read-only.
pub trait TopologyNode: NodeBound {
    /// Identity of the node in the graph, MUST be unique within a snapshot
    type NodeId: Ord + Clone + Hash + Debug + Display + Serialize;
    fn id(&self) -> &Self::NodeId;
    fn metadata(&self) -> &Metadata;
    fn params() -> ResolverParams {
        Default::default()
    }
}

/// A parameter handed to a step by the host query parser.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StepParam {
    Str(String),
    Int(i64),
    Float(f64),
    Bool(bool),
}

/// What flows from one pipeline step into the next.
pub enum Traversal<'g, N: TopologyNode> {
    /// a set of graph vertices, as selected by `g.V()` and friends
    Vertices(Vec<&'g N>),
    /// derived values, produced by steps that end a vertex walk
    Values(Vec<Value>),
}

/// One stage of a query pipeline.
pub trait TraversalStep<N: TopologyNode> {
    type Output;

    fn exec(&self, last: &Traversal<'_, N>) -> Result<Self::Output, StepError> {
        self.exec_cancellable(last, &AtomicBool::new(false))
    }

    /// Same as [`TraversalStep::exec`], but gives up with [`StepError::Cancelled`] once `cancel`
    /// is raised. The flag is only checked between nodes.
    fn exec_cancellable(
        &self,
        last: &Traversal<'_, N>,
        cancel: &AtomicBool,
    ) -> Result<Self::Output, StepError>;
}

/// The hook through which the host grammar learns about extra steps.
pub trait TraversalExtension<N: TopologyNode> {
    type Step: TraversalStep<N>;

    /// whether `ident` names a step owned by this extension
    fn scan_ident(&self, ident: &str) -> bool;

    /// Builds the step for `ident`, or returns `Ok(None)` if the identifier belongs to someone else.
    /// Argument errors are reported here, before any node is visited.
    fn parse_step(&self, ident: &str, params: &[StepParam]) -> Result<Option<Self::Step>, StepError>;
}

/// Resolver configuration
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolverParams {
    /// metadata key holding the node's routing tables
    pub routing_tables_key: String,
    /// metadata key holding the node's neighbour cache
    pub neighbours_key: String,
    /// number of nodes above which resolution is spread over the rayon pool
    pub parallel_threshold: usize,
}

impl Default for ResolverParams {
    fn default() -> Self {
        Self {
            routing_tables_key: "RoutingTables".to_string(),
            neighbours_key: "Neighbors".to_string(),
            parallel_threshold: 64,
        }
    }
}
