pub mod button;
pub mod dialog;
pub mod input;

// Re-export component symbols so callers can `use crate::components::ui::Button` etc.
pub use button::*;
pub use dialog::*;
pub use input::*;
