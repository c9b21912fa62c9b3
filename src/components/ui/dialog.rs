use leptos::prelude::*;
use leptos_ui::clx;

use crate::components::ui::button::{Button, ButtonVariant};

mod components {
    use super::*;
    clx! {DialogBody, div, "flex flex-col gap-4"}
    clx! {DialogHeader, div, "flex flex-col gap-2 text-center sm:text-left"}
    clx! {DialogTitle, h3, "text-lg leading-none font-semibold"}
    clx! {DialogDescription, p, "text-muted-foreground text-sm"}
    clx! {DialogFooter, footer, "flex flex-col-reverse gap-2 sm:flex-row sm:justify-end"}
}

pub use components::*;

/// Modal asking the user to confirm a destructive action.
///
/// Cancel, a backdrop click and Escape all close it without confirming.
#[component]
pub fn ConfirmDialog(
    open: RwSignal<bool>,
    #[prop(into)] title: String,
    #[prop(into)] description: String,
    #[prop(into, default = "Confirm".to_string())] confirm_label: String,
    on_confirm: Callback<()>,
) -> impl IntoView {
    let close = move || open.set(false);
    let title = StoredValue::new(title);
    let description = StoredValue::new(description);
    let confirm_label = StoredValue::new(confirm_label);

    view! {
        <Show when=move || open.get() fallback=|| ().into_view()>
            <div
                data-name="DialogBackdrop"
                class="fixed inset-0 z-60 bg-black/50"
                on:click=move |_| close()
            />
            <div
                data-name="DialogContent"
                role="dialog"
                aria-modal="true"
                tabindex="-1"
                class="fixed top-[50%] left-[50%] z-100 w-full max-w-[calc(100%-2rem)] sm:max-w-md translate-x-[-50%] translate-y-[-50%] rounded-2xl border bg-background p-6 shadow-lg"
                on:keydown=move |ev: web_sys::KeyboardEvent| {
                    if ev.key() == "Escape" {
                        ev.prevent_default();
                        close();
                    }
                }
            >
                <DialogBody>
                    <DialogHeader>
                        <DialogTitle>{title.get_value()}</DialogTitle>
                        <DialogDescription>{description.get_value()}</DialogDescription>
                    </DialogHeader>
                    <DialogFooter>
                        <Button
                            variant=ButtonVariant::Outline
                            on:click=move |_| close()
                        >
                            "Cancel"
                        </Button>
                        <Button
                            variant=ButtonVariant::Destructive
                            on:click=move |_| {
                                on_confirm.run(());
                                close();
                            }
                        >
                            {confirm_label.get_value()}
                        </Button>
                    </DialogFooter>
                </DialogBody>
            </div>
        </Show>
    }
}
