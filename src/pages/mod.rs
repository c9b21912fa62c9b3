use crate::components::ui::{Button, ButtonSize, ButtonVariant, ConfirmDialog, Input};
use crate::drag::DragSource;
use crate::models::ItemId;
use crate::session::SubmitMode;
use crate::state::{AppContext, ListController};
use crate::storage::BrowserStore;
use crate::util::{first_touch, notify, row_at_point, row_at_target};
use crate::view::SlotKey;
use icons::{Minus, Pen, Plus};
use leptos::prelude::*;
use leptos_dom::helpers::set_timeout;
use std::time::Duration;

type ListSignal = RwSignal<ListController<BrowserStore>>;

/// Runs `f` on the next tick, after the browser has finished the current
/// event (and, for dragstart, captured the drag image).
fn next_tick(f: impl FnOnce() + 'static) {
    set_timeout(f, Duration::ZERO);
}

#[component]
pub fn ListPage() -> impl IntoView {
    let app_state = expect_context::<AppContext>();
    let list = app_state.0.list;

    let input: RwSignal<String> = RwSignal::new(String::new());
    let filter: RwSignal<String> = RwSignal::new(String::new());
    let confirm_open: RwSignal<bool> = RwSignal::new(false);

    let has_rows = move || list.with(|c| c.view().has_rows());
    let controls_style = move || {
        if has_rows() {
            "display: block"
        } else {
            "display: none"
        }
    };
    let is_updating = move || list.with(|c| c.submit_mode() == SubmitMode::Update);

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();

        let raw = input.get_untracked();
        match list.try_update(|c| c.submit(&raw)) {
            Some(Ok(outcome)) => {
                tracing::debug!(?outcome, "submit applied");
                input.set(String::new());
            }
            Some(Err(e)) => notify(&e.to_string()),
            None => {}
        }
    };

    let on_form_keydown = move |ev: web_sys::KeyboardEvent| {
        if ev.key() == "Escape" && list.with_untracked(|c| c.session().editing().is_some()) {
            list.update(|c| c.cancel_edit());
            input.set(String::new());
        }
    };

    let on_filter = Callback::new(move |query: String| {
        list.update(|c| c.filter(&query));
    });

    let on_clear_confirmed = Callback::new(move |_: ()| {
        list.update(|c| c.clear_all());
        input.set(String::new());
        filter.set(String::new());
    });

    view! {
        <div class="min-h-screen bg-background">
            <div class="mx-auto flex w-full max-w-md flex-col gap-4 px-4 py-12">
                <header class="flex items-center gap-2">
                    <h1 class="text-xl font-semibold">"Shopping List"</h1>
                </header>

                <form id="item-form" class="flex flex-col gap-2" on:submit=on_submit on:keydown=on_form_keydown>
                    <Input id="item-input" placeholder="Enter Item" bind_value=input />
                    <Show
                        when=is_updating
                        fallback=move || view! {
                            <Button class="w-fit">
                                <Plus />
                                {SubmitMode::Add.to_string()}
                            </Button>
                        }
                    >
                        <Button class="w-fit" variant=ButtonVariant::Success>
                            <Pen />
                            {SubmitMode::Update.to_string()}
                        </Button>
                    </Show>
                </form>

                <div style=controls_style>
                    <Input id="filter" placeholder="Filter Items" bind_value=filter on_value=on_filter />
                </div>

                <ItemList list=list input=input />

                <div style=controls_style>
                    <Button
                        class="w-full"
                        variant=ButtonVariant::Outline
                        attr:id="clear"
                        on:click=move |_| confirm_open.set(true)
                    >
                        "Clear All"
                    </Button>
                </div>

                <ConfirmDialog
                    open=confirm_open
                    title="Clear all items?"
                    description="This removes every item from the list. It cannot be undone."
                    confirm_label="Clear"
                    on_confirm=on_clear_confirmed
                />
            </div>
        </div>
    }
}

/// The reorderable list. Drag-over, drop, drag-end and the touch move/end
/// events are handled here for all rows at once.
#[component]
fn ItemList(list: ListSignal, input: RwSignal<String>) -> impl IntoView {
    let on_dragover = move |ev: web_sys::DragEvent| {
        ev.prevent_default();
        let Some((target, rect)) = row_at_target(ev.target()) else {
            return;
        };
        let y = f64::from(ev.client_y());
        list.maybe_update(|c| c.hover(target, rect, y));
    };

    let on_drop = move |ev: web_sys::DragEvent| {
        ev.prevent_default();
        list.maybe_update(|c| c.drop_dragged());
    };

    let on_dragend = move |_ev: web_sys::DragEvent| {
        next_tick(move || {
            list.update(|c| {
                c.end_drag();
            });
        });
    };

    let on_touchmove = move |ev: web_sys::TouchEvent| {
        if !list.with_untracked(|c| c.is_touch_dragging()) {
            return;
        }
        ev.prevent_default();
        let Some((x, y)) = first_touch(&ev) else {
            return;
        };
        let Some((target, rect)) = row_at_point(x, y) else {
            return;
        };
        list.maybe_update(|c| c.hover(target, rect, y));
    };

    let on_touchend = move |_ev: web_sys::TouchEvent| {
        if list.with_untracked(|c| c.is_touch_dragging()) {
            list.update(|c| {
                c.touch_end();
            });
        }
    };

    let on_touchcancel = move |_ev: web_sys::TouchEvent| {
        if list.with_untracked(|c| c.is_touch_dragging()) {
            list.update(|c| {
                c.end_drag();
            });
        }
    };

    view! {
        <ul
            id="item-list"
            class="flex flex-col gap-2"
            on:dragover=on_dragover
            on:drop=on_drop
            on:dragend=on_dragend
            on:touchmove=on_touchmove
            on:touchend=on_touchend
            on:touchcancel=on_touchcancel
        >
            <For
                each=move || list.with(|c| c.view().slot_keys())
                key=|slot| *slot
                children=move |slot| match slot {
                    SlotKey::Placeholder => view! {
                        <li
                            data-name="Placeholder"
                            class="h-[30px] m-[5px] rounded-md border-2 border-[#ccc] bg-[#f0f0f0]"
                        />
                    }
                    .into_any(),
                    SlotKey::Row(id) => view! { <ItemRow id=id list=list input=input /> }.into_any(),
                }
            />
        </ul>
    }
}

#[component]
fn ItemRow(id: ItemId, list: ListSignal, input: RwSignal<String>) -> impl IntoView {
    let class = move || {
        let base = "item-row flex items-center justify-between rounded-md border px-4 py-2 cursor-pointer select-none";
        if list.with(|c| c.view().is_editing(id)) {
            format!("{base} edit-mode opacity-60 border-[#388E3C]")
        } else {
            base.to_string()
        }
    };
    let style = move || {
        if list.with(|c| c.view().is_visible(id)) {
            "display: flex"
        } else {
            "display: none"
        }
    };
    let text = move || list.with(|c| c.view().text_of(id).unwrap_or_default().to_string());

    // Picking up a row abandons any edit, so the input is cleared with it.
    let begin_drag = move |source: DragSource| {
        let was_editing = list.with_untracked(|c| c.session().editing().is_some());
        let started = list
            .try_update(|c| c.start_drag(id, source))
            .unwrap_or(false);
        if started && was_editing {
            input.set(String::new());
        }
        started
    };

    let on_dragstart = move |ev: web_sys::DragEvent| {
        if !begin_drag(DragSource::Pointer) {
            ev.prevent_default();
            return;
        }
        // Firefox only starts a drag when data is set.
        if let Some(dt) = ev.data_transfer() {
            let _ = dt.set_data("text/plain", &id.to_string());
            dt.set_effect_allowed("move");
        }
        next_tick(move || {
            list.maybe_update(|c| c.conceal_dragged());
        });
    };

    let on_touchstart = move |_ev: web_sys::TouchEvent| {
        begin_drag(DragSource::Touch);
    };

    let on_click = move |_ev: web_sys::MouseEvent| {
        if let Some(current) = list.try_update(|c| c.select_row(id)).flatten() {
            input.set(current);
        }
    };

    let on_remove = move |ev: web_sys::MouseEvent| {
        ev.stop_propagation();
        list.update(|c| {
            c.remove(id);
        });
    };

    view! {
        <li
            draggable="true"
            data-item-id=id.to_string()
            class=class
            style=style
            on:dragstart=on_dragstart
            on:touchstart=on_touchstart
            on:click=on_click
        >
            <span class="item-text truncate">{text}</span>
            <Button
                variant=ButtonVariant::Ghost
                size=ButtonSize::Icon
                class="remove-item"
                attr:title="Remove"
                on:click=on_remove
            >
                <Minus />
            </Button>
        </li>
    }
}

