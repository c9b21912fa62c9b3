mod components;
pub mod config;
pub mod drag;
pub mod error;
pub mod models;
mod pages;
pub mod registry;
pub mod session;
pub mod state;
pub mod storage;
mod util;
pub mod view;

use crate::config::AppConfig;
use crate::pages::ListPage;
use crate::state::{AppContext, AppState};
use leptos::prelude::*;

// Needed for `#[wasm_bindgen(start)]` on the wasm entrypoint.
#[cfg(all(target_arch = "wasm32", not(test)))]
use wasm_bindgen::prelude::wasm_bindgen;

#[component]
pub fn App(config: AppConfig) -> impl IntoView {
    provide_context(AppContext(AppState::new(&config)));

    view! { <ListPage /> }
}

#[cfg(target_arch = "wasm32")]
fn init_logging(config: &AppConfig) {
    let layer_config = tracing_wasm::WASMLayerConfigBuilder::new()
        .set_max_level(config.max_level())
        .build();
    tracing_wasm::set_as_global_default_with_config(layer_config);
}

#[cfg(not(target_arch = "wasm32"))]
fn init_logging(_config: &AppConfig) {}

// Only register the WASM start function for normal builds (not for tests),
// otherwise wasm-bindgen-test will end up with multiple entry symbols.
#[cfg_attr(all(target_arch = "wasm32", not(test)), wasm_bindgen(start))]
pub fn main() {
    console_error_panic_hook::set_once();

    let config = AppConfig::from_window();
    init_logging(&config);
    tracing::info!(
        items_key = %config.items_key,
        order_key = %config.order_key,
        "starting item list"
    );

    mount_to_body(move || view! { <App config=config /> });
}
