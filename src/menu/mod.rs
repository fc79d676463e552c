//! Menus
//!
//! Menu items are rebuilt from current state on every render; the user menu
//! projects the registry into one selectable item per user.

pub mod item;
pub mod render;
pub mod users;

pub use item::{MenuItem, SelectedFn, SubMenuFn, selected_fn};
pub use render::run_menu;
pub use users::{USER_INFO_KEY, build_user_menu, selected_user};
