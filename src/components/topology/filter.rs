//! Click routing: a topology node selects a dashboard-wide filter.

/// Mutually exclusive filter shapes the dashboard widgets re-query by.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DashboardFilter {
	Vendor { vendor_id: i64 },
	VendorKey { vendor_key_id: i64 },
	Provider { provider_id: i64 },
	Adapter { adapter_id: String },
}

/// A filter plus the human-readable label shown on the active-filter chip.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FilterSelection {
	pub filter: DashboardFilter,
	pub label: String,
}

/// Map a clicked node to its filter. Pure; no network call. Returns `None`
/// for unknown prefixes or ids that fail to parse.
pub fn filter_for_node(name: &str, display_name: &str) -> Option<FilterSelection> {
	if let Some(id) = name.strip_prefix("v_") {
		return Some(FilterSelection {
			filter: DashboardFilter::Vendor {
				vendor_id: id.parse().ok()?,
			},
			label: format!("Vendor: {display_name}"),
		});
	}
	if let Some(id) = name.strip_prefix("k_") {
		return Some(FilterSelection {
			filter: DashboardFilter::VendorKey {
				vendor_key_id: id.parse().ok()?,
			},
			label: format!("Key: {display_name}"),
		});
	}
	if let Some(id) = name.strip_prefix("p_") {
		return Some(FilterSelection {
			filter: DashboardFilter::Provider {
				provider_id: id.parse().ok()?,
			},
			label: format!("Endpoint: {display_name}"),
		});
	}
	if let Some(id) = name.strip_prefix("a_") {
		return Some(FilterSelection {
			filter: DashboardFilter::Adapter {
				adapter_id: id.to_string(),
			},
			label: format!("Service: {display_name}"),
		});
	}
	if let Some(rest) = name.strip_prefix("s_") {
		// s_{adapter_id}_{service}: the adapter id runs to the first
		// separator, matching how service names are composed.
		let adapter_id = rest.split('_').next().unwrap_or(rest);
		return Some(FilterSelection {
			filter: DashboardFilter::Adapter {
				adapter_id: adapter_id.to_string(),
			},
			label: format!("Service endpoint: {display_name}"),
		});
	}
	None
}
