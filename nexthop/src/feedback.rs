use std::net::IpAddr;

use educe::Educe;
use thiserror::Error;

use crate::concepts::prefix::Prefix;
use crate::framework::TopologyNode;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PrefixError {
    #[error("mask length {len} exceeds the {max} bits of {addr}")]
    MaskLength { addr: IpAddr, len: u8, max: u8 },
    #[error("\"{value}\" is not a network prefix")]
    Parse { value: String },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RouteError {
    /// Every route must name at least one next hop
    #[error("route {prefix} has no next hop candidates")]
    NoCandidates { prefix: Prefix },
}

/// Raised by the typed metadata accessors instead of silently falling back to a default.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AttributeError {
    #[error("node has no \"{key}\" attribute")]
    Absent { key: String },
    #[error("node attribute \"{key}\" is malformed: {reason}")]
    Malformed { key: String, reason: String },
}

/// Why a node has no next hop. This is a normal outcome, the node is simply left out of the result.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NotFound {
    #[error(transparent)]
    Attribute(#[from] AttributeError),
    #[error("no route matches {destination}")]
    NoMatchingRoute { destination: IpAddr },
}

/// These abort the whole query.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StepError {
    #[error("{step} expects an IP address literal, got \"{value}\"")]
    InvalidArgument { step: &'static str, value: String },
    #[error("{step} accepts exactly one parameter, got {got}")]
    ParamCount { step: &'static str, got: usize },
    #[error("{step} parameter has to be a string")]
    ParamType { step: &'static str },
    #[error("{step} can only be applied to a set of vertices")]
    UnsupportedInput { step: &'static str },
    #[error("traversal was cancelled")]
    Cancelled,
}

/// Although this is an error enum, these should be treated as diagnostics.
#[derive(Error)]
#[derive(Educe)]
#[educe(Debug(bound()), Clone(bound()), PartialEq(bound()))]
pub enum StepWarning<N: TopologyNode> {
    /// The node was dropped from the output, `reason` tells missing data apart from a routing miss
    #[error("skipped node {node}: {reason}")]
    NodeSkipped { node: N::NodeId, reason: NotFound },
}
