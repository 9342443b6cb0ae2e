//! X-Plane web API message types.
//!
//! REST dataref lookup:
//! ```json
//! {"data":[{"id":1234,"name":"sim/flightmodel/position/latitude","value_type":"double"}]}
//! ```
//!
//! WebSocket update frame (values keyed by dataref id as a string):
//! ```json
//! {"req_id":1,"type":"dataref_update_values","success":true,"data":{"1234":37.5}}
//! ```

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::domain::DatarefId;

/// Request id used for the one subscription request sent per session.
pub const SUBSCRIBE_REQ_ID: u64 = 1;

/// Dataref metadata returned by `GET /api/v3/datarefs`.
#[derive(Debug, Clone, Deserialize)]
pub struct DatarefInfo {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub value_type: String,
}

/// Response envelope for dataref queries.
#[derive(Debug, Deserialize)]
pub struct DatarefResponse {
    #[serde(default)]
    pub data: Vec<DatarefInfo>,
}

/// Subscription request sent over the WebSocket.
#[derive(Debug, Serialize)]
pub struct SubscribeMessage {
    pub req_id: u64,
    #[serde(rename = "type")]
    pub msg_type: &'static str,
    pub params: SubscribeParams,
}

#[derive(Debug, Serialize)]
pub struct SubscribeParams {
    pub datarefs: Vec<DatarefRef>,
}

#[derive(Debug, Serialize)]
pub struct DatarefRef {
    pub id: DatarefId,
}

impl SubscribeMessage {
    pub fn new(ids: impl IntoIterator<Item = DatarefId>) -> Self {
        Self {
            req_id: SUBSCRIBE_REQ_ID,
            msg_type: "dataref_subscribe_values",
            params: SubscribeParams {
                datarefs: ids.into_iter().map(|id| DatarefRef { id }).collect(),
            },
        }
    }
}

/// Any message received over the WebSocket.
///
/// Subscription acknowledgements and value updates share this shape; only
/// updates carry `data`.
#[derive(Debug, Deserialize)]
pub struct UpdateMessage {
    #[serde(default)]
    pub req_id: Option<u64>,
    #[serde(rename = "type", default)]
    pub msg_type: String,
    #[serde(default = "default_success")]
    pub success: bool,
    #[serde(default)]
    pub data: Option<Map<String, Value>>,
}

fn default_success() -> bool {
    true
}
