use scrollbox_common::markers;
use scrollbox_runtime::{PageContext, ScrollPlan, Sidebar};
use std::cell::RefCell;
use std::rc::Rc;
use tracing::debug;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{
    AddEventListenerOptions, Element, Event, HtmlElement, ScrollIntoViewOptions,
    ScrollLogicalPosition,
};

mod click;
use click::{handle_click, ClickKind};

mod mount;
use mount::{mount, Mount};

mod storage;
use storage::SessionStore;

mod utils;

const ROW_SELECTOR: &str = "li.chapter-item, li.spacer, li.part-title";

#[wasm_bindgen(start)]
fn main() -> Result<(), JsValue> {
    utils::set_panic_hook();
    utils::set_logger();
    Ok(())
}

/// Fills `container` with the sidebar for the current page and wires up
/// its click handling.
///
/// Nothing here fails. Markup that does not parse is shown as given, a
/// missing location means nothing is active, and without session storage
/// nothing is restored.
#[wasm_bindgen]
pub fn connect(container: HtmlElement, toc_markup: &str, path_to_root: &str) {
    let current_url = web_sys::window()
        .and_then(|window| window.location().href().ok())
        .unwrap_or_default();

    let page = PageContext::new(current_url, path_to_root);
    let Mount {
        sidebar,
        markup,
        plan,
    } = mount(toc_markup, page, SessionStore::new());

    container.set_inner_html(&markup);
    apply_scroll_plan(&container, plan);

    listen_for_clicks(container, Rc::new(RefCell::new(sidebar)));
}

fn apply_scroll_plan(container: &HtmlElement, plan: ScrollPlan) {
    match plan {
        ScrollPlan::Restore(offset) => container.set_scroll_top(offset as i32),
        ScrollPlan::Center(_) => {
            let selector = format!(".{}", markers::ACTIVE);
            if let Ok(Some(active)) = container.query_selector(&selector) {
                let options = ScrollIntoViewOptions::new();
                options.set_block(ScrollLogicalPosition::Center);
                active.scroll_into_view_with_scroll_into_view_options(&options);
            }
        }
        ScrollPlan::Stay => {}
    }
}

/// Position of `row` among the rendered rows of `container`.
fn row_position(container: &HtmlElement, row: &Element) -> Option<usize> {
    let rows = container.query_selector_all(ROW_SELECTOR).ok()?;
    (0..rows.length())
        .find(|&index| {
            rows.item(index)
                .is_some_and(|node| node.is_same_node(Some(row.as_ref())))
        })
        .map(|index| index as usize)
}

fn listen_for_clicks(container: HtmlElement, sidebar: Rc<RefCell<Sidebar>>) {
    let target = container.clone();
    let on_click = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
        let Some(anchor) = event
            .target()
            .and_then(|target| target.dyn_into::<Element>().ok())
            .and_then(|element| element.closest("a").ok().flatten())
        else {
            return;
        };

        let kind = if anchor.class_list().contains(markers::TOGGLE) {
            ClickKind::Toggle
        } else {
            ClickKind::Link
        };
        let item = anchor.closest("li").ok().flatten();
        let row = item
            .as_ref()
            .and_then(|item| row_position(&container, item));
        let offset = f64::from(container.scroll_top());

        let state = handle_click(
            &mut sidebar.borrow_mut(),
            kind,
            row,
            offset,
            SessionStore::new(),
        );
        if let (ClickKind::Toggle, Some(item)) = (kind, item) {
            let classes = item.class_list();
            let toggled = match state {
                Some(state) => classes.toggle_with_force(markers::EXPANDED, state.is_expanded()),
                None => classes.toggle(markers::EXPANDED),
            };
            if let Err(err) = toggled {
                debug!(?err, "could not flip the expanded class");
            }
        }
    });

    let options = AddEventListenerOptions::new();
    options.set_passive(true);
    if let Err(err) = target.add_event_listener_with_callback_and_add_event_listener_options(
        "click",
        on_click.as_ref().unchecked_ref(),
        &options,
    ) {
        debug!(?err, "sidebar click listener was not attached");
    }
    on_click.forget();
}
