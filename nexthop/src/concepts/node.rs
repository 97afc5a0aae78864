use serde::{Deserialize, Serialize};

use crate::framework::{Metadata, TopologyNode};

/// A plain owned graph vertex, the shape a topology snapshot dump carries.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Node {
    #[serde(rename = "ID")]
    pub id: String,
    #[serde(default)]
    pub metadata: Metadata,
}

impl Node {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            metadata: Metadata::new(),
        }
    }

    /// Stores `value` under `key`, replacing what was there
    pub fn with_attribute<V: Serialize>(
        mut self,
        key: impl Into<String>,
        value: &V,
    ) -> Result<Self, serde_json::Error> {
        self.metadata.insert(key.into(), serde_json::to_value(value)?);
        Ok(self)
    }
}

impl TopologyNode for Node {
    type NodeId = String;

    fn id(&self) -> &String {
        &self.id
    }

    fn metadata(&self) -> &Metadata {
        &self.metadata
    }
}
