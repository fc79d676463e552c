//! User menu builder
//!
//! Projects the registry into menu items, sorted by registry key (not by
//! username), each carrying its key under `USER_INFO_KEY`.

use std::collections::HashMap;
use std::sync::Arc;

use crate::menu::{MenuItem, SelectedFn, SubMenuFn};
use crate::users::{User, UserRegistry};

/// Info key under which a user item stores its registry key.
pub const USER_INFO_KEY: &str = "user_key";

const USER_SUB_MENU_TITLE: &str = "Please select.";

/// Returns a submenu builder listing every user currently in `registry`.
///
/// The registry is read on each call, so the list is never stale. Choosing a
/// user runs `selected` and goes back to the parent menu.
pub fn build_user_menu(registry: UserRegistry, selected: SelectedFn) -> SubMenuFn {
    Arc::new(move |_index: usize, _parent: &MenuItem| {
        registry
            .users()
            .into_iter()
            .map(|(key, user)| MenuItem {
                label: user.username,
                info: HashMap::from([(USER_INFO_KEY.to_string(), key)]),
                sub_menu_title: Some(USER_SUB_MENU_TITLE.to_string()),
                selected: Some(Arc::clone(&selected)),
                sub_menu: None,
                back_after_selected: true,
            })
            .collect()
    })
}

/// Resolves an item built by `build_user_menu` back to its user.
pub fn selected_user(registry: &UserRegistry, item: &MenuItem) -> Option<(String, User)> {
    let key = item.info.get(USER_INFO_KEY)?;
    registry.get(key).map(|user| (key.clone(), user))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::UserError;
    use crate::menu::selected_fn;
    use crate::users::NewUser;

    fn noop() -> SelectedFn {
        selected_fn(|_, _, _| Box::pin(async { Ok::<(), UserError>(()) }))
    }

    fn add(registry: &UserRegistry, username: &str) -> String {
        registry
            .insert(NewUser {
                username: username.to_string(),
                password_hash: "h".into(),
                is_admin: false,
                public_key: String::new(),
            })
            .unwrap()
            .0
    }

    #[test]
    fn empty_registry_gives_empty_menu() {
        let build = build_user_menu(UserRegistry::new(), noop());
        assert!(build(0, &MenuItem::new("Users")).is_empty());
    }

    #[test]
    fn items_are_sorted_by_key_and_carry_it() {
        let registry = UserRegistry::new();
        for name in ["zed", "amy", "mia", "bob"] {
            add(&registry, name);
        }

        let items = build_user_menu(registry.clone(), noop())(0, &MenuItem::new("Users"));
        let mut expected = registry.users();
        expected.sort_by(|a, b| a.0.cmp(&b.0));

        assert_eq!(items.len(), 4);
        for (item, (key, user)) in items.iter().zip(&expected) {
            assert_eq!(item.label, user.username);
            assert_eq!(item.info.get(USER_INFO_KEY), Some(key));
            assert!(item.back_after_selected);
            assert!(item.selected.is_some());
            assert_eq!(item.sub_menu_title.as_deref(), Some("Please select."));
        }
    }

    #[test]
    fn menu_reflects_registry_at_build_time() {
        let registry = UserRegistry::new();
        let build = build_user_menu(registry.clone(), noop());
        let parent = MenuItem::new("Users");

        assert!(build(0, &parent).is_empty());
        let key = add(&registry, "alice");

        let items = build(0, &parent);
        assert_eq!(items.len(), 1);
        let (found_key, user) = selected_user(&registry, &items[0]).unwrap();
        assert_eq!(found_key, key);
        assert_eq!(user.username, "alice");
    }
}
