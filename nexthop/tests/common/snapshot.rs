use nexthop::concepts::node::Node;
use nexthop::feedback::StepError;
use nexthop::framework::{Metadata, StepParam, Traversal, TraversalExtension, TraversalStep};
use nexthop::resolver::ResolvedNextHop;
use nexthop::step::{NextHopExtension, NextHopValues};
use serde_json::Value;

/// A frozen graph, queried the way `g.V().NextHop('<destination>')` would be.
pub struct Snapshot {
    pub nodes: Vec<Node>,
}

pub fn node(id: &str, metadata: Value) -> Node {
    Node {
        id: id.to_string(),
        metadata: metadata.as_object().cloned().unwrap_or_else(Metadata::new),
    }
}

impl Snapshot {
    pub fn new(nodes: Vec<Node>) -> Snapshot {
        Snapshot { nodes }
    }

    pub fn vertices(&self) -> Traversal<'_, Node> {
        Traversal::Vertices(self.nodes.iter().collect())
    }

    pub fn try_query(&self, params: &[StepParam]) -> Result<NextHopValues<Node>, StepError> {
        let extension = NextHopExtension::<Node>::new();
        let step = extension
            .parse_step("NextHop", params)?
            .expect("NextHop should be owned by the extension");
        step.exec(&self.vertices())
    }

    pub fn query(&self, destination: &str) -> NextHopValues<Node> {
        self.try_query(&[StepParam::Str(destination.to_string())])
            .unwrap_or_else(|err| panic!("query toward {destination} failed: {err}"))
    }

    pub fn next_hop(&self, node: &str, destination: &str) -> ResolvedNextHop {
        *self
            .query(destination)
            .get(&node.to_string())
            .unwrap_or_else(|| panic!("No next hop for {node} toward {destination}"))
    }
}
