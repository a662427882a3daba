use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent};

use super::filter::FilterSelection;
use super::render::{self, CanvasSurface};
use super::snapshot::Snapshot;
use super::view::TopologyView;

struct CanvasState {
	view: TopologyView,
	surface: CanvasSurface,
	ctx: CanvasRenderingContext2d,
}

/// Interactive topology diagram. Rebuilds the whole graph whenever the
/// snapshot signal produces a new value; hover traces the full path through
/// the layers, clicking a node emits a dashboard filter.
#[component]
pub fn TopologyCanvas(
	#[prop(into)] snapshot: Signal<Option<Snapshot>>,
	#[prop(into)] on_filter: Callback<FilterSelection>,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let state: Rc<RefCell<Option<CanvasState>>> = Rc::new(RefCell::new(None));

	let state_init = state.clone();
	Effect::new(move |_| {
		let Some(snap) = snapshot.get() else {
			return;
		};
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let width = canvas
			.parent_element()
			.map(|p| p.client_width() as f64)
			.unwrap_or(900.0);

		// One synchronous pass per completed load: build, lay out, draw.
		// The previous view is replaced wholesale, never merged.
		let view = TopologyView::new(&snap, width);
		canvas.set_width(width as u32);
		canvas.set_height(view.height() as u32);

		let ctx: CanvasRenderingContext2d = canvas
			.get_context("2d")
			.unwrap()
			.unwrap()
			.dyn_into()
			.unwrap();
		let mut surface = CanvasSurface::default();
		view.present(&mut surface);
		render::render(&surface, &ctx);
		*state_init.borrow_mut() = Some(CanvasState { view, surface, ctx });
	});

	let cursor_pos = move |ev: &MouseEvent| {
		let canvas: HtmlCanvasElement = canvas_ref.get().unwrap().into();
		let rect = canvas.get_bounding_client_rect();
		(
			ev.client_x() as f64 - rect.left(),
			ev.client_y() as f64 - rect.top(),
		)
	};

	let state_mm = state.clone();
	let on_mousemove = move |ev: MouseEvent| {
		let (x, y) = cursor_pos(&ev);
		if let Some(ref mut s) = *state_mm.borrow_mut() {
			let name = s.view.node_at(x, y).map(String::from);
			if s.view.hovered() == name.as_deref() {
				return;
			}
			s.view.hover(name.as_deref(), &mut s.surface);
			render::render(&s.surface, &s.ctx);

			let canvas: HtmlCanvasElement = canvas_ref.get().unwrap().into();
			let cursor = if name.is_some() { "pointer" } else { "default" };
			let _ = web_sys::HtmlElement::style(&canvas).set_property("cursor", cursor);
		}
	};

	let state_ml = state.clone();
	let on_mouseleave = move |_: MouseEvent| {
		if let Some(ref mut s) = *state_ml.borrow_mut() {
			s.view.hover(None, &mut s.surface);
			render::render(&s.surface, &s.ctx);
		}
	};

	let state_ck = state.clone();
	let on_click = move |ev: MouseEvent| {
		let (x, y) = cursor_pos(&ev);
		if let Some(ref s) = *state_ck.borrow() {
			let selection = s.view.node_at(x, y).and_then(|name| s.view.click(name));
			if let Some(selection) = selection {
				on_filter.run(selection);
			}
		}
	};

	view! {
		<canvas
			node_ref=canvas_ref
			class="topology-canvas"
			on:mousemove=on_mousemove
			on:mouseleave=on_mouseleave
			on:click=on_click
			style="display: block;"
		/>
	}
}
