//! Relational snapshot fetched from the sync backend.
//!
//! The snapshot is read-only input: the topology graph is rebuilt from
//! scratch on every load, nothing here is mutated or persisted locally.

use serde::Deserialize;
use thiserror::Error;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::Response;

pub const TOPOLOGY_ENDPOINT: &str = "/api/sync/topology";

#[derive(Clone, Debug, Deserialize)]
pub struct Vendor {
	pub id: i64,
	pub name: String,
}

#[derive(Clone, Debug, Deserialize)]
pub struct VendorKey {
	pub id: i64,
	pub vendor_id: i64,
	pub label: String,
}

#[derive(Clone, Debug, Deserialize)]
pub struct Provider {
	pub id: i64,
	#[serde(default)]
	pub vendor_key_id: Option<i64>,
	pub name: String,
}

#[derive(Clone, Debug, Deserialize)]
pub struct Adapter {
	pub id: String,
	pub label: String,
	#[serde(default)]
	pub services: Vec<String>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct Binding {
	pub provider_id: i64,
	pub adapter_id: String,
	/// Empty string means the binding names no target service.
	#[serde(default)]
	pub target_provider_name: String,
}

impl Binding {
	pub fn target(&self) -> Option<&str> {
		if self.target_provider_name.is_empty() {
			None
		} else {
			Some(&self.target_provider_name)
		}
	}
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct Snapshot {
	#[serde(default)]
	pub vendors: Vec<Vendor>,
	#[serde(default)]
	pub keys: Vec<VendorKey>,
	#[serde(default)]
	pub providers: Vec<Provider>,
	#[serde(default)]
	pub adapters: Vec<Adapter>,
	#[serde(default)]
	pub bindings: Vec<Binding>,
}

/// The one fallible boundary of the topology view (see the dashboard page
/// for the warn-and-fallback policy).
#[derive(Debug, Error)]
pub enum SnapshotError {
	#[error("no window object")]
	NoWindow,
	#[error("topology request failed: {0}")]
	Request(String),
	#[error("topology request returned status {0}")]
	Status(u16),
	#[error("malformed topology payload: {0}")]
	Decode(#[from] serde_json::Error),
}

fn js_err(value: wasm_bindgen::JsValue) -> SnapshotError {
	SnapshotError::Request(format!("{value:?}"))
}

/// Fetch the relational snapshot from the backend.
pub async fn fetch_snapshot() -> Result<Snapshot, SnapshotError> {
	let window = web_sys::window().ok_or(SnapshotError::NoWindow)?;
	let response = JsFuture::from(window.fetch_with_str(TOPOLOGY_ENDPOINT))
		.await
		.map_err(js_err)?;
	let response: Response = response
		.dyn_into()
		.map_err(|_| SnapshotError::Request("fetch did not yield a response".into()))?;
	if !response.ok() {
		return Err(SnapshotError::Status(response.status()));
	}
	let text = JsFuture::from(response.text().map_err(js_err)?)
		.await
		.map_err(js_err)?;
	let text = text
		.as_string()
		.ok_or_else(|| SnapshotError::Request("response body was not text".into()))?;
	Ok(serde_json::from_str(&text)?)
}
