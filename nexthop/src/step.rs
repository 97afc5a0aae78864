use std::collections::BTreeMap;
use std::marker::PhantomData;
use std::net::IpAddr;
use std::str::FromStr;
use std::sync::atomic::{AtomicBool, Ordering};

use educe::Educe;
use log::{debug, warn};
use serde::Serialize;
use serde_json::Value;

use crate::feedback::{AttributeError, NotFound, StepError, StepWarning};
use crate::framework::{
    ResolverParams, StepParam, TopologyNode, Traversal, TraversalExtension, TraversalStep,
};
use crate::resolver::{NextHopResolver, ResolvedNextHop};

/// How the step is spelled in queries, e.g. `g.V().NextHop('10.0.0.1')`
pub const NEXT_HOP_IDENT: &str = "NextHop";

/// Host grammars upper-case identifiers, so matching ignores case
pub fn is_next_hop_ident(ident: &str) -> bool {
    ident.eq_ignore_ascii_case(NEXT_HOP_IDENT)
}

/// Registers the `NextHop` step with a host query engine.
#[derive(Educe)]
#[educe(Clone(bound()), Debug(bound()))]
pub struct NextHopExtension<N: TopologyNode> {
    params: Option<ResolverParams>,
    #[educe(Debug(ignore))]
    _node: PhantomData<fn() -> N>,
}

impl<N: TopologyNode> Default for NextHopExtension<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N: TopologyNode> NextHopExtension<N> {
    /// uses [`TopologyNode::params`] of the host's node type
    pub fn new() -> Self {
        Self {
            params: None,
            _node: PhantomData,
        }
    }

    pub fn with_params(params: ResolverParams) -> Self {
        Self {
            params: Some(params),
            _node: PhantomData,
        }
    }
}

impl<N: TopologyNode> TraversalExtension<N> for NextHopExtension<N> {
    type Step = NextHopStep;

    fn scan_ident(&self, ident: &str) -> bool {
        is_next_hop_ident(ident)
    }

    fn parse_step(&self, ident: &str, params: &[StepParam]) -> Result<Option<NextHopStep>, StepError> {
        if !is_next_hop_ident(ident) {
            return Ok(None);
        }
        let [param] = params else {
            return Err(StepError::ParamCount {
                step: NEXT_HOP_IDENT,
                got: params.len(),
            });
        };
        let StepParam::Str(literal) = param else {
            return Err(StepError::ParamType {
                step: NEXT_HOP_IDENT,
            });
        };
        let params = self.params.clone().unwrap_or_else(N::params);
        NextHopStep::parse(literal, params).map(Some)
    }
}

/// The `NextHop` step: maps every vertex to its next hop toward one destination.
#[derive(Clone, Debug)]
pub struct NextHopStep {
    destination: IpAddr,
    resolver: NextHopResolver,
}

impl NextHopStep {
    pub fn new(destination: IpAddr, params: ResolverParams) -> Self {
        Self {
            destination,
            resolver: NextHopResolver::new(params),
        }
    }

    /// Fails with [`StepError::InvalidArgument`] unless `literal` is an IPv4 or IPv6 address
    pub fn parse(literal: &str, params: ResolverParams) -> Result<Self, StepError> {
        let destination = IpAddr::from_str(literal).map_err(|_| StepError::InvalidArgument {
            step: NEXT_HOP_IDENT,
            value: literal.to_string(),
        })?;
        Ok(Self::new(destination, params))
    }

    pub fn destination(&self) -> IpAddr {
        self.destination
    }

    fn resolve_one<N: TopologyNode>(
        &self,
        node: &N,
        cancel: &AtomicBool,
    ) -> Result<Result<ResolvedNextHop, NotFound>, StepError> {
        if cancel.load(Ordering::Relaxed) {
            return Err(StepError::Cancelled);
        }
        Ok(self.resolver.resolve(node, self.destination))
    }

    fn resolve_sequential<'g, N: TopologyNode>(
        &self,
        nodes: &[&'g N],
        cancel: &AtomicBool,
    ) -> Result<Vec<Result<ResolvedNextHop, NotFound>>, StepError> {
        nodes
            .iter()
            .map(|node| self.resolve_one(*node, cancel))
            .collect()
    }

    #[cfg(feature = "parallel")]
    fn resolve_all<'g, N: TopologyNode>(
        &self,
        nodes: &[&'g N],
        cancel: &AtomicBool,
    ) -> Result<Vec<Result<ResolvedNextHop, NotFound>>, StepError> {
        use rayon::prelude::*;

        if nodes.len() <= self.resolver.params().parallel_threshold {
            return self.resolve_sequential(nodes, cancel);
        }
        nodes
            .par_iter()
            .map(|node| self.resolve_one(*node, cancel))
            .collect()
    }

    #[cfg(not(feature = "parallel"))]
    fn resolve_all<'g, N: TopologyNode>(
        &self,
        nodes: &[&'g N],
        cancel: &AtomicBool,
    ) -> Result<Vec<Result<ResolvedNextHop, NotFound>>, StepError> {
        self.resolve_sequential(nodes, cancel)
    }
}

impl<N: TopologyNode> TraversalStep<N> for NextHopStep {
    type Output = NextHopValues<N>;

    fn exec_cancellable(
        &self,
        last: &Traversal<'_, N>,
        cancel: &AtomicBool,
    ) -> Result<NextHopValues<N>, StepError> {
        let Traversal::Vertices(nodes) = last else {
            return Err(StepError::UnsupportedInput {
                step: NEXT_HOP_IDENT,
            });
        };

        let outcomes = self.resolve_all(nodes, cancel)?;
        let mut values = NextHopValues::default();
        for (node, outcome) in nodes.iter().zip(outcomes) {
            values.record(node.id(), self.destination, outcome);
        }
        Ok(values)
    }
}

/// Output of the `NextHop` step. Only nodes that resolved are present; the others are listed in
/// [`NextHopValues::warnings`]. Serialises as a JSON object keyed by node id.
#[derive(Educe, Serialize)]
#[educe(Clone(bound()), Debug(bound()))]
#[serde(bound = "", transparent)]
pub struct NextHopValues<N: TopologyNode> {
    hops: BTreeMap<N::NodeId, ResolvedNextHop>,
    #[serde(skip)]
    warnings: Vec<StepWarning<N>>,
}

impl<N: TopologyNode> Default for NextHopValues<N> {
    fn default() -> Self {
        Self {
            hops: BTreeMap::new(),
            warnings: Vec::new(),
        }
    }
}

impl<N: TopologyNode> NextHopValues<N> {
    fn record(
        &mut self,
        node: &N::NodeId,
        destination: IpAddr,
        outcome: Result<ResolvedNextHop, NotFound>,
    ) {
        match outcome {
            Ok(hop) => {
                debug!(
                    "next hop of {} toward {} is {} on interface {}",
                    node, destination, hop.ip, hop.if_index
                );
                self.hops.insert(node.clone(), hop);
            }
            Err(reason) => {
                if let NotFound::Attribute(AttributeError::Malformed { .. }) = &reason {
                    warn!("skipping {}: {}", node, reason);
                } else {
                    debug!("no next hop for {} toward {}: {}", node, destination, reason);
                }
                self.warnings.push(StepWarning::NodeSkipped {
                    node: node.clone(),
                    reason,
                });
            }
        }
    }

    pub fn get(&self, node: &N::NodeId) -> Option<&ResolvedNextHop> {
        self.hops.get(node)
    }

    pub fn len(&self) -> usize {
        self.hops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hops.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&N::NodeId, &ResolvedNextHop)> {
        self.hops.iter()
    }

    pub fn hops(&self) -> &BTreeMap<N::NodeId, ResolvedNextHop> {
        &self.hops
    }

    /// why each missing node was left out
    pub fn warnings(&self) -> &[StepWarning<N>] {
        &self.warnings
    }

    pub fn into_hops(self) -> BTreeMap<N::NodeId, ResolvedNextHop> {
        self.hops
    }

    /// The whole map as a single pipeline value, for steps chained after this one
    pub fn into_traversal<'g>(self) -> Result<Traversal<'g, N>, serde_json::Error> {
        let value: Value = serde_json::to_value(&self)?;
        Ok(Traversal::Values(vec![value]))
    }
}
