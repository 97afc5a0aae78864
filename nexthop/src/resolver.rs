use std::net::IpAddr;

use log::trace;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::concepts::neighbour::Neighbours;
use crate::concepts::route::{longest_prefix_match, RoutingTable, RoutingTables};
use crate::feedback::{AttributeError, NotFound};
use crate::framework::{Metadata, ResolverParams, TopologyNode};
use crate::util::canonical;

/// Where a packet toward some destination leaves the node.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ResolvedNextHop {
    /// the gateway, or the destination itself when it sits on a connected network
    #[serde(rename = "IP")]
    pub ip: IpAddr,
    pub if_index: u32,
}

/// Reads the node's routing tables. A missing (or null) attribute is reported as
/// [`AttributeError::Absent`], one that does not decode as [`AttributeError::Malformed`].
/// The tables are decoded into an owned copy, the node is never touched.
pub fn routing_tables<N: TopologyNode>(
    node: &N,
    params: &ResolverParams,
) -> Result<RoutingTables, AttributeError> {
    read_attribute(node.metadata(), &params.routing_tables_key)
}

pub fn neighbours<N: TopologyNode>(
    node: &N,
    params: &ResolverParams,
) -> Result<Neighbours, AttributeError> {
    read_attribute(node.metadata(), &params.neighbours_key)
}

fn read_attribute<T: DeserializeOwned>(metadata: &Metadata, key: &str) -> Result<T, AttributeError> {
    let value = match metadata.get(key) {
        None | Some(Value::Null) => {
            return Err(AttributeError::Absent {
                key: key.to_string(),
            })
        }
        Some(value) => value,
    };
    T::deserialize(value).map_err(|err| AttributeError::Malformed {
        key: key.to_string(),
        reason: err.to_string(),
    })
}

/// Resolves next hops from a node's locally observed routing tables. Holds no state besides its
/// configuration, so resolving the same pair twice gives the same answer.
#[derive(Clone, Debug, Default)]
pub struct NextHopResolver {
    params: ResolverParams,
}

impl NextHopResolver {
    pub fn new(params: ResolverParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &ResolverParams {
        &self.params
    }

    pub fn resolve<N: TopologyNode>(
        &self,
        node: &N,
        destination: IpAddr,
    ) -> Result<ResolvedNextHop, NotFound> {
        let tables = routing_tables(node, &self.params)?;
        Self::resolve_in(&tables, destination)
    }

    /// The algorithm proper.
    ///
    /// All tables are searched as one pool of routes, there is no priority between them. The
    /// first candidate of the winning route is used; if it has no gateway, `destination` is on
    /// a connected network and becomes the next hop itself.
    pub fn resolve_in(
        tables: &[RoutingTable],
        destination: IpAddr,
    ) -> Result<ResolvedNextHop, NotFound> {
        let destination = canonical(destination);
        let routes = tables.iter().flat_map(|table| table.routes.iter());
        let route = longest_prefix_match(routes, &destination)
            .ok_or(NotFound::NoMatchingRoute { destination })?;
        trace!("{} matched route {}", destination, route.prefix());

        let candidate = route.primary();
        Ok(ResolvedNextHop {
            ip: candidate.ip.unwrap_or(destination),
            if_index: candidate.if_index,
        })
    }
}
