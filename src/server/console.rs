//! Session console
//!
//! What a remote session sees once accepted: the first-admin bootstrap on an
//! empty registry, then the user management menu.

use log::info;

use crate::error::UserError;
use crate::error::handlers::error_to_session_line;
use crate::menu::{MenuItem, SelectedFn, build_user_menu, run_menu, selected_fn, selected_user};
use crate::session::Session;
use crate::users::UserRegistry;
use crate::workflow::{change_password, create_first_admin, create_user};

const GREETING: &str = "Welcome to RAX Gate user console\r\n";

/// Runs the console on `session` until the user quits or the session ends.
pub async fn run_console(session: &mut Session, registry: &UserRegistry) -> Result<(), UserError> {
    session.write_str(GREETING).await?;

    if registry.is_empty() {
        info!("Registry is empty, {} must create an admin", session.peer());
        session
            .write_str("No users yet. Create the first admin user.\r\n")
            .await?;

        match create_first_admin(registry, session).await {
            Ok((_, user)) => {
                session
                    .write_str(&format!("Admin '{}' created\r\n", user.username))
                    .await?;
            }
            // Another session committed its admin first; nothing was stored here
            Err(e @ UserError::RegistryNotEmpty) => {
                info!("Session {}: {}", session.peer(), e);
                session.write_str(&error_to_session_line(&e)).await?;
            }
            Err(e) => {
                if !e.ends_session() {
                    session.write_str(&error_to_session_line(&e)).await?;
                }
                return Err(e);
            }
        }
    }

    run_menu(session, "User management", main_menu(registry)).await?;
    session.write_str("Goodbye\r\n").await
}

fn main_menu(registry: &UserRegistry) -> Vec<MenuItem> {
    vec![
        MenuItem::new("Add user").on_selected(add_user(registry.clone())),
        MenuItem::new("Change password").with_sub_menu(
            "Change password of",
            build_user_menu(registry.clone(), change_selected_password(registry.clone())),
        ),
        MenuItem::new("List users").on_selected(list_users(registry.clone())),
    ]
}

fn add_user(registry: UserRegistry) -> SelectedFn {
    selected_fn(move |_, _, session| {
        let registry = registry.clone();
        Box::pin(async move {
            let (_, user) = create_user(true, false, &registry, session).await?;
            session
                .write_str(&format!("User '{}' created\r\n", user.username))
                .await
        })
    })
}

fn change_selected_password(registry: UserRegistry) -> SelectedFn {
    selected_fn(move |_, item, session| {
        let registry = registry.clone();
        Box::pin(async move {
            // The user may have been removed since the menu was built
            let (_, user) = selected_user(&registry, item)
                .ok_or_else(|| UserError::UserNotFound(item.label.clone()))?;

            change_password(&user.username, &registry, session).await?;
            session
                .write_str(&format!("Password of '{}' changed\r\n", user.username))
                .await
        })
    })
}

fn list_users(registry: UserRegistry) -> SelectedFn {
    selected_fn(move |_, _, session| {
        let registry = registry.clone();
        Box::pin(async move {
            let mut out = String::new();
            for (_, user) in registry.users() {
                let role = if user.is_admin { " (admin)" } else { "" };
                out.push_str(&format!("  {}{}\r\n", user.username, role));
            }
            if out.is_empty() {
                out.push_str("  (no users)\r\n");
            }
            session.write_str(&out).await
        })
    })
}
