use std::net::IpAddr;

use serde::{Deserialize, Serialize};

use crate::concepts::prefix::Prefix;
use crate::feedback::RouteError;

/// One way out of a route. A missing `ip` means the network is directly connected over `if_index`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct NextHop {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<i64>,
    /// the gateway address, absent for connected routes
    #[serde(rename = "IP", default, skip_serializing_if = "Option::is_none")]
    pub ip: Option<IpAddr>,
    pub if_index: u32,
}

impl NextHop {
    pub fn via(ip: IpAddr, if_index: u32) -> Self {
        Self {
            priority: None,
            ip: Some(ip),
            if_index,
        }
    }

    pub fn connected(if_index: u32) -> Self {
        Self {
            priority: None,
            ip: None,
            if_index,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", try_from = "RouteRepr")]
pub struct Route {
    #[serde(skip_serializing_if = "Option::is_none")]
    protocol: Option<i64>,
    prefix: Prefix,
    /// never empty
    next_hops: Vec<NextHop>,
}

/// Wire shape of a route, before its invariants are checked.
/// Ingestion leaves the prefix out for the IPv4 default route.
#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct RouteRepr {
    protocol: Option<i64>,
    #[serde(default = "Prefix::ipv4_default")]
    prefix: Prefix,
    next_hops: Vec<NextHop>,
}

impl TryFrom<RouteRepr> for Route {
    type Error = RouteError;

    fn try_from(repr: RouteRepr) -> Result<Self, Self::Error> {
        Ok(Route::new(repr.prefix, repr.next_hops)?.with_protocol(repr.protocol))
    }
}

impl Route {
    pub fn new(prefix: Prefix, next_hops: Vec<NextHop>) -> Result<Self, RouteError> {
        if next_hops.is_empty() {
            return Err(RouteError::NoCandidates { prefix });
        }
        Ok(Self {
            protocol: None,
            prefix,
            next_hops,
        })
    }

    pub fn with_protocol(mut self, protocol: Option<i64>) -> Self {
        self.protocol = protocol;
        self
    }

    pub fn prefix(&self) -> &Prefix {
        &self.prefix
    }

    pub fn next_hops(&self) -> &[NextHop] {
        &self.next_hops
    }

    pub fn protocol(&self) -> Option<i64> {
        self.protocol
    }

    /// The candidate used for forwarding: the first one listed.
    /// Equal-cost selection between candidates is not attempted.
    pub fn primary(&self) -> &NextHop {
        &self.next_hops[0]
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RoutingTable {
    #[serde(rename = "ID")]
    pub id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub src: Option<IpAddr>,
    #[serde(default)]
    pub routes: Vec<Route>,
}

/// Everything a node knows about routing, one entry per kernel table
pub type RoutingTables = Vec<RoutingTable>;

impl RoutingTable {
    pub fn new(id: i64) -> Self {
        Self {
            id,
            ..Default::default()
        }
    }

    pub fn with_route(mut self, route: Route) -> Self {
        self.routes.push(route);
        self
    }

    pub fn lookup(&self, destination: &IpAddr) -> Option<&Route> {
        longest_prefix_match(&self.routes, destination)
    }
}

/// Picks the most specific route whose prefix contains `destination`.
/// On equal specificity the route met first wins. Linear in the number of routes, which is fine for
/// host-sized tables.
pub fn longest_prefix_match<'a, I>(routes: I, destination: &IpAddr) -> Option<&'a Route>
where
    I: IntoIterator<Item = &'a Route>,
{
    let mut best: Option<&'a Route> = None;
    for route in routes {
        if !route.prefix.contains(destination) {
            continue;
        }
        match best {
            Some(cur) if cur.prefix.specificity() >= route.prefix.specificity() => {}
            _ => best = Some(route),
        }
    }
    best
}
