//! Public IP geolocation lookup against ip-api.com.

use crate::app::Event;
use serde::Deserialize;
use std::io;
use std::sync::mpsc::Sender;
use std::thread;
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_ENDPOINT: &str = "http://ip-api.com/json/";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Decoded geolocation payload. Every field defaults when absent so a
/// degraded upstream body (e.g. `"status": "fail"`, which omits most
/// fields) still decodes.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LocationRecord {
    pub query: String,
    pub status: String,
    pub country: String,
    pub country_code: String,
    pub region: String,
    pub region_name: String,
    pub city: String,
    pub zip: String,
    pub lat: f64,
    pub lon: f64,
    pub timezone: String,
    pub isp: String,
    pub org: String,
    #[serde(rename = "as")]
    pub autonomous_system: String,
}

/// Lookup failure with the underlying cause attached. All variants are
/// presented identically to the user ("lookup failed").
#[derive(Debug, Error)]
pub enum LookupError {
    #[error("request failed: {0}")]
    Transport(#[from] Box<ureq::Error>),
    #[error("unreadable response: {0}")]
    Read(#[from] io::Error),
    #[error("malformed response: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Client for the single geolocation request made per process.
pub struct GeoLookupClient {
    endpoint: String,
    agent: ureq::Agent,
}

impl GeoLookupClient {
    pub fn new(endpoint: String, timeout: Duration) -> Self {
        let agent = ureq::AgentBuilder::new().timeout(timeout).build();
        Self { endpoint, agent }
    }

    /// Single attempt, no retries. Any body that decodes is treated as
    /// success; the upstream `status` field is not inspected.
    pub fn fetch(&self) -> Result<LocationRecord, LookupError> {
        let response = self.agent.get(&self.endpoint).call().map_err(Box::new)?;
        let body = response.into_string()?;
        Ok(serde_json::from_str(&body)?)
    }
}

/// Run the lookup on a background thread and deliver the outcome as an
/// event. The request is abandoned if the process exits first.
pub fn spawn(client: GeoLookupClient, tx: Sender<Event>) {
    thread::spawn(move || {
        let event = match client.fetch() {
            Ok(record) => Event::LookupSucceeded(record),
            Err(err) => Event::LookupFailed(err),
        };
        let _ = tx.send(event);
    });
}
