use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
/// Origins of the services around the viewer.
pub struct HostOptions {
    /// Origin serving model files, laid out as `{orgId}/{assetId}/`.
    pub media_host: String,
    /// Base URL of the map manifest API (`{api_host}/getMap`).
    pub api_host: String,
    /// Public origin of the viewer itself, used for share links.
    pub self_host: String,
}

impl Default for HostOptions {
    fn default() -> Self {
        Self {
            media_host: "http://localhost:3001".into(),
            api_host: "http://localhost:3001/api".into(),
            self_host: "http://localhost:8080".into(),
        }
    }
}
