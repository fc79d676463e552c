//! Menu traversal
//!
//! Renders numbered menus on a session and follows the user's choices.
//! Levels are kept on an explicit stack; `q` (or an interrupt) goes back one
//! level and leaving the root ends the menu.

use crate::error::handlers::{error_to_session_line, log_user_error};
use crate::error::{CancelReason, UserError, ValidationError};
use crate::menu::MenuItem;
use crate::session::{Prompt, Session};

struct MenuLevel {
    title: String,
    items: Vec<MenuItem>,
}

/// Shows `items` under `title` until the user leaves the root menu.
///
/// Errors from a selected item are reported on the session and the menu
/// continues, unless the session itself is gone.
pub async fn run_menu(
    session: &mut Session,
    title: &str,
    items: Vec<MenuItem>,
) -> Result<(), UserError> {
    let mut stack = vec![MenuLevel {
        title: title.to_string(),
        items,
    }];

    while let Some(level) = stack.last() {
        session.write_str(&render(level, stack.len() == 1)).await?;

        let answer = match choice_prompt(level.items.len()).run(session).await {
            Ok(answer) => answer,
            Err(UserError::SessionCancelled(CancelReason::Interrupted)) => {
                stack.pop();
                continue;
            }
            Err(e) => return Err(e),
        };

        let Some(index) = parse_choice(&answer) else {
            stack.pop();
            continue;
        };
        let item = &level.items[index];

        if let Some(selected) = &item.selected {
            if let Err(e) = selected(index, item, session).await {
                if e.ends_session() {
                    return Err(e);
                }
                log_user_error(session.peer(), &e);
                session.write_str(&error_to_session_line(&e)).await?;
            }
        }

        let child = item.sub_menu.as_ref().map(|build| MenuLevel {
            title: item.child_title().to_string(),
            items: build(index, item),
        });
        let back = item.back_after_selected;

        match child {
            Some(child) => stack.push(child),
            None if back => {
                stack.pop();
            }
            None => {}
        }
    }

    Ok(())
}

fn render(level: &MenuLevel, is_root: bool) -> String {
    let mut out = format!("\r\n== {} ==\r\n", level.title);
    if level.items.is_empty() {
        out.push_str("  (empty)\r\n");
    }
    for (i, item) in level.items.iter().enumerate() {
        out.push_str(&format!("  {}) {}\r\n", i + 1, item.label));
    }
    out.push_str(if is_root { "  q) Quit\r\n" } else { "  q) Back\r\n" });
    out
}

fn choice_prompt(count: usize) -> Prompt {
    Prompt::new("Select").validate(Box::new(move |input| match parse_choice(input) {
        None => Ok(()),
        Some(index) if index < count => Ok(()),
        Some(_) if count == 0 => Err(ValidationError::new(
            "Nothing to select, enter q to go back",
        )),
        Some(_) => Err(ValidationError::new(format!(
            "Choose a number between 1 and {} or q",
            count
        ))),
    }))
}

/// `q` means back; a number `n` means item `n - 1`. Anything else is out of range.
fn parse_choice(input: &str) -> Option<usize> {
    let input = input.trim();
    if input.eq_ignore_ascii_case("q") {
        return None;
    }
    match input.parse::<usize>() {
        Ok(n) if n > 0 => Some(n - 1),
        _ => Some(usize::MAX),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::menu::{SubMenuFn, selected_fn};
    use crate::test_utils::ScriptedSession;
    use std::sync::{Arc, Mutex};

    type Log = Arc<Mutex<Vec<String>>>;

    fn recording(log: Log) -> crate::menu::SelectedFn {
        selected_fn(move |_, item, _| {
            let log = Arc::clone(&log);
            Box::pin(async move {
                log.lock().unwrap().push(item.label.clone());
                Ok::<(), UserError>(())
            })
        })
    }

    fn children(log: Log) -> SubMenuFn {
        Arc::new(move |_: usize, _: &MenuItem| {
            vec![
                MenuItem::new("alice")
                    .on_selected(recording(Arc::clone(&log)))
                    .back_after_selected(true),
            ]
        })
    }

    #[test]
    fn choices_parse_to_indices() {
        assert_eq!(parse_choice("q"), None);
        assert_eq!(parse_choice("Q"), None);
        assert_eq!(parse_choice("1"), Some(0));
        assert_eq!(parse_choice(" 3 "), Some(2));
        assert_eq!(parse_choice("0"), Some(usize::MAX));
        assert_eq!(parse_choice("x"), Some(usize::MAX));
    }

    #[tokio::test]
    async fn leaf_selection_returns_to_parent() {
        let log: Log = Arc::default();
        let root = vec![
            MenuItem::new("Add").on_selected(recording(Arc::clone(&log))),
            MenuItem::new("Users").with_sub_menu("Users", children(Arc::clone(&log))),
        ];
        // Add, open Users, pick alice (back to root), Add again, quit
        let mut s = ScriptedSession::new("1\n2\n1\n1\nq\n");

        run_menu(&mut s.session, "Main", root).await.unwrap();
        let out = s.finish().await;

        assert_eq!(*log.lock().unwrap(), vec!["Add", "alice", "Add"]);
        assert_eq!(out.matches("== Users ==").count(), 1);
        assert_eq!(out.matches("== Main ==").count(), 4);
    }

    #[tokio::test]
    async fn out_of_range_choice_is_asked_again() {
        let mut s = ScriptedSession::new("7\nq\n");

        run_menu(&mut s.session, "Main", vec![MenuItem::new("Only")])
            .await
            .unwrap();
        let out = s.finish().await;

        assert!(out.contains("✗ Choose a number between 1 and 1 or q"));
    }

    #[tokio::test]
    async fn workflow_errors_are_shown_and_menu_continues() {
        let failing = selected_fn(|_, _, _| {
            Box::pin(async { Err::<(), UserError>(UserError::UserNotFound("ghost".into())) })
        });
        let mut s = ScriptedSession::new("1\nq\n");

        run_menu(
            &mut s.session,
            "Main",
            vec![MenuItem::new("Change").on_selected(failing)],
        )
        .await
        .unwrap();
        let out = s.finish().await;

        assert!(out.contains("✗ Username 'ghost' does not exist"));
    }

    #[tokio::test]
    async fn closed_session_ends_the_menu() {
        let mut s = ScriptedSession::new("");
        let result = run_menu(&mut s.session, "Main", vec![MenuItem::new("Only")]).await;
        assert!(matches!(
            result,
            Err(UserError::SessionCancelled(CancelReason::Closed))
        ));
    }

    #[tokio::test]
    async fn empty_submenu_still_offers_back() {
        let empty: SubMenuFn = Arc::new(|_: usize, _: &MenuItem| Vec::new());
        let mut s = ScriptedSession::new("1\nq\nq\n");

        run_menu(
            &mut s.session,
            "Main",
            vec![MenuItem::new("Users").with_sub_menu("Users", empty)],
        )
        .await
        .unwrap();
        let out = s.finish().await;

        assert!(out.contains("== Users ==\r\n  (empty)\r\n  q) Back\r\n"));
    }

    #[tokio::test]
    async fn empty_submenu_rejects_numbers() {
        let empty: SubMenuFn = Arc::new(|_: usize, _: &MenuItem| Vec::new());
        let mut s = ScriptedSession::new("1
1
q
q
");

        run_menu(
            &mut s.session,
            "Main",
            vec![MenuItem::new("Users").with_sub_menu("Users", empty)],
        )
        .await
        .unwrap();
        let out = s.finish().await;

        assert!(out.contains("✗ Nothing to select, enter q to go back"));
        assert!(!out.contains("between 1 and 0"));
    }
}
