use nexthop::concepts::node::Node;
use serde_json::json;

use crate::common::snapshot::node;

/// 192.168.0.0/24 via 10.16.0.2, with the gateway in the neighbour cache
pub fn single_route(id: &str) -> Node {
    node(id, json!({
        "Neighbors": [{"IP": "10.16.0.2", "IfIndex": 2, "MAC": "fa:16:3e:c1:e8:d1"}],
        "RoutingTables": [{
            "ID": 255,
            "Routes": [{"Prefix": "192.168.0.0/24", "NextHops": [{"IP": "10.16.0.2", "IfIndex": 2}]}]
        }]
    }))
}

/// only a default route, written the way ingestion writes it (no prefix)
pub fn default_only(id: &str) -> Node {
    node(id, json!({
        "Neighbors": [{"IP": "10.16.0.12", "IfIndex": 2, "MAC": "fa:16:3e:ce:e8:d1"}],
        "RoutingTables": [{
            "ID": 255,
            "Routes": [{"NextHops": [{"IP": "10.16.0.12", "IfIndex": 2}]}]
        }]
    }))
}

/// a default route followed by a more specific 10.16.0.0/24
pub fn default_and_specific(id: &str) -> Node {
    node(id, json!({
        "Neighbors": [
            {"IP": "10.16.0.12", "IfIndex": 2, "MAC": "fa:16:3e:ce:e8:d1"},
            {"IP": "192.64.0.1", "IfIndex": 2, "MAC": "af:16:3e:de:e8:d3"}
        ],
        "RoutingTables": [{
            "ID": 255,
            "Routes": [
                {"NextHops": [{"IP": "10.16.0.12", "IfIndex": 2}]},
                {"Prefix": "10.16.0.0/24", "NextHops": [{"IP": "192.64.0.1", "IfIndex": 2}]}
            ]
        }]
    }))
}

/// a connected 10.60.0.0/24 on interface 5, no neighbour cache at all
pub fn connected(id: &str) -> Node {
    node(id, json!({
        "RoutingTables": [{
            "ID": 255,
            "Routes": [{"Prefix": "10.60.0.0/24", "NextHops": [{"IfIndex": 5}]}]
        }]
    }))
}

/// main and local tables plus a policy table, as a linux host would report them
pub fn policy_routed(id: &str) -> Node {
    node(id, json!({
        "RoutingTables": [
            {
                "ID": 254,
                "Routes": [
                    {"Prefix": "0.0.0.0/0", "NextHops": [{"IP": "10.0.0.1", "IfIndex": 1}]},
                    {"Prefix": "10.0.0.0/24", "NextHops": [{"IfIndex": 1}]}
                ]
            },
            {
                "ID": 100,
                "Routes": [
                    {"Prefix": "172.16.0.0/12", "NextHops": [{"IP": "10.0.0.254", "IfIndex": 3}]},
                    {"Prefix": "172.16.5.0/24", "NextHops": [
                        {"IP": "10.0.0.253", "IfIndex": 4},
                        {"IP": "10.0.0.252", "IfIndex": 6}
                    ]}
                ]
            },
            {
                "ID": 255,
                "Routes": [
                    {"Prefix": "2001:db8::/32", "NextHops": [{"IP": "fe80::1", "IfIndex": 7}]},
                    {"Prefix": "2001:db8:1::/48", "NextHops": [{"IfIndex": 8}]}
                ]
            }
        ]
    }))
}

pub fn bare(id: &str) -> Node {
    node(id, json!({"Name": id, "Type": "host"}))
}

/// routing tables that cannot be decoded
pub fn garbled(id: &str) -> Node {
    node(id, json!({
        "RoutingTables": [{"ID": 255, "Routes": [{"Prefix": "10.0.0.0/8", "NextHops": []}]}]
    }))
}
