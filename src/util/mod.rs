use crate::drag::RowRect;
use crate::models::ItemId;
use wasm_bindgen::JsCast;

/// Attribute carrying the item id on every rendered row.
pub(crate) const ROW_ID_ATTR: &str = "data-item-id";
const ROW_SELECTOR: &str = "li[data-item-id]";

fn row_hit(el: &web_sys::Element) -> Option<(ItemId, RowRect)> {
    let row = el.closest(ROW_SELECTOR).ok().flatten()?;
    let id = row.get_attribute(ROW_ID_ATTR)?.parse().ok()?;
    let rect = row.get_bounding_client_rect();
    Some((id, RowRect::new(rect.top(), rect.height())))
}

/// Resolves the row an event landed on. Text nodes resolve via their parent.
pub(crate) fn row_at_target(target: Option<web_sys::EventTarget>) -> Option<(ItemId, RowRect)> {
    let target = target?;
    if let Some(el) = target.dyn_ref::<web_sys::Element>() {
        return row_hit(el);
    }
    let parent = target.dyn_ref::<web_sys::Node>()?.parent_element()?;
    row_hit(&parent)
}

/// Hit-tests the document at a client position.
pub(crate) fn row_at_point(x: f64, y: f64) -> Option<(ItemId, RowRect)> {
    let doc = web_sys::window()?.document()?;
    let el = doc.element_from_point(x as f32, y as f32)?;
    row_hit(&el)
}

/// Client position of the first active touch.
pub(crate) fn first_touch(ev: &web_sys::TouchEvent) -> Option<(f64, f64)> {
    let touch = ev.touches().get(0)?;
    Some((f64::from(touch.client_x()), f64::from(touch.client_y())))
}

/// Blocking notice.
pub(crate) fn notify(message: &str) {
    tracing::warn!(notice = message, "user notice shown");
    if let Some(window) = web_sys::window() {
        let _ = window.alert_with_message(message);
    }
}
