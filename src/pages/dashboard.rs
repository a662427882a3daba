use leptos::prelude::*;
use leptos::task::spawn_local;
use log::warn;

use crate::components::topology::{FilterSelection, Snapshot, TopologyCanvas, fetch_snapshot};

/// Dashboard page: loads the topology snapshot once on mount and hands it to
/// the canvas. On a failed or malformed fetch the surface stays
/// uninitialized and a static fallback message is shown instead; there is no
/// automatic retry, the user reloads.
#[component]
pub fn Dashboard() -> impl IntoView {
	let (snapshot, set_snapshot) = signal(None::<Snapshot>);
	let (load_failed, set_load_failed) = signal(false);
	let (filter, set_filter) = signal(None::<FilterSelection>);

	spawn_local(async move {
		match fetch_snapshot().await {
			Ok(snap) => set_snapshot.set(Some(snap)),
			Err(e) => {
				warn!("Topology load failed: {e}");
				set_load_failed.set(true);
			}
		}
	});

	let on_filter = Callback::new(move |selection: FilterSelection| {
		// The other dashboard widgets re-query off this filter; here it
		// drives the active-filter chip.
		set_filter.set(Some(selection));
	});

	view! {
		<div class="dashboard">
			<h1>"Sync Topology"</h1>
			{move || {
				filter
					.get()
					.map(|sel| view! { <span class="filter-chip">{sel.label}</span> })
			}}
			<Show
				when=move || !load_failed.get()
				fallback=|| {
					view! {
						<div class="topology-fallback">
							"Failed to load topology data. Reload to try again."
						</div>
					}
				}
			>
				<div class="topology-container">
					<TopologyCanvas snapshot=snapshot on_filter=on_filter />
				</div>
			</Show>
		</div>
	}
}
