use std::net::IpAddr;

use serde::{Deserialize, Serialize};

/// An entry of a node's neighbour (ARP/NDP) cache. Carried alongside the routing tables by
/// ingestion, next-hop resolution does not depend on it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Neighbour {
    #[serde(rename = "IP")]
    pub ip: IpAddr,
    pub if_index: u32,
    /// link-layer address, as reported by the kernel
    #[serde(rename = "MAC", default)]
    pub mac: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub state: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub flags: Vec<String>,
}

pub type Neighbours = Vec<Neighbour>;
