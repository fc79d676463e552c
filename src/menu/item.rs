//! Module `menu::item`
//!
//! Defines the `MenuItem` node and the callback types a menu consumes.

use futures_util::future::BoxFuture;
use std::collections::HashMap;
use std::sync::Arc;

use crate::error::UserError;
use crate::session::Session;

/// Runs when an item is chosen. Receives the item's index, the item and the session.
pub type SelectedFn = Arc<
    dyn for<'a> Fn(usize, &'a MenuItem, &'a mut Session) -> BoxFuture<'a, Result<(), UserError>>
        + Send
        + Sync,
>;

/// Builds the child items shown after an item is chosen.
pub type SubMenuFn = Arc<dyn Fn(usize, &MenuItem) -> Vec<MenuItem> + Send + Sync>;

/// Wraps a closure as a `SelectedFn`, pinning down its higher-ranked signature.
pub fn selected_fn<F>(f: F) -> SelectedFn
where
    F: for<'a> Fn(usize, &'a MenuItem, &'a mut Session) -> BoxFuture<'a, Result<(), UserError>>
        + Send
        + Sync
        + 'static,
{
    Arc::new(f)
}

/// One selectable line of a menu.
#[derive(Clone)]
pub struct MenuItem {
    pub label: String,
    /// Extra values for callbacks, e.g. the registry key of a user
    pub info: HashMap<String, String>,
    pub sub_menu_title: Option<String>,
    pub selected: Option<SelectedFn>,
    pub sub_menu: Option<SubMenuFn>,
    /// Return to the parent menu once `selected` has run
    pub back_after_selected: bool,
}

impl MenuItem {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            info: HashMap::new(),
            sub_menu_title: None,
            selected: None,
            sub_menu: None,
            back_after_selected: false,
        }
    }

    pub fn on_selected(mut self, selected: SelectedFn) -> Self {
        self.selected = Some(selected);
        self
    }

    pub fn with_sub_menu(mut self, title: impl Into<String>, sub_menu: SubMenuFn) -> Self {
        self.sub_menu_title = Some(title.into());
        self.sub_menu = Some(sub_menu);
        self
    }

    pub fn back_after_selected(mut self, back: bool) -> Self {
        self.back_after_selected = back;
        self
    }

    /// Title shown above this item's children.
    pub fn child_title(&self) -> &str {
        self.sub_menu_title.as_deref().unwrap_or(&self.label)
    }
}
