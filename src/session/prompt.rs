//! Prompt primitive
//!
//! Asks one question and keeps asking until the validator accepts the answer
//! or the session is cancelled. Rejections are rendered inline.

use crate::error::UserError;
use crate::session::Session;
use crate::validate::Validator;

/// A single validated question.
pub struct Prompt {
    label: String,
    validator: Option<Validator>,
    mask: Option<char>,
}

impl Prompt {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            validator: None,
            mask: None,
        }
    }

    pub fn validate(mut self, validator: Validator) -> Self {
        self.validator = Some(validator);
        self
    }

    /// Hides the accepted answer behind `mask` when it is echoed back.
    pub fn mask(mut self, mask: char) -> Self {
        self.mask = Some(mask);
        self
    }

    /// Runs the prompt on `session` until an answer passes validation.
    pub async fn run(&self, session: &mut Session) -> Result<String, UserError> {
        loop {
            session.write_str(&format!("{}: ", self.label)).await?;
            let input = session.read_line().await?;

            let checked = match &self.validator {
                Some(validate) => validate(&input),
                None => Ok(()),
            };

            match checked {
                Ok(()) => {
                    let shown = self.display(&input);
                    session
                        .write_str(&format!("✔ {}: {}\r\n", self.label, shown))
                        .await?;
                    return Ok(input);
                }
                Err(e) => session.write_str(&format!("✗ {}\r\n", e)).await?,
            }
        }
    }

    fn display(&self, input: &str) -> String {
        match self.mask {
            Some(mask) => std::iter::repeat_n(mask, input.chars().count()).collect(),
            None => input.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CancelReason;
    use crate::validate::min_length;
    use std::io::Cursor;
    use tokio::io::AsyncReadExt;

    #[tokio::test]
    async fn reprompts_until_valid() {
        let (mut client, server) = tokio::io::duplex(4096);
        let (_, write_half) = tokio::io::split(server);
        let mut session = Session::new("test", Cursor::new(b"ab\nabc\n".to_vec()), write_half);

        let prompt = Prompt::new("New Username").validate(min_length(3, "too short"));
        assert_eq!(prompt.run(&mut session).await.unwrap(), "abc");
        drop(session);

        let mut out = String::new();
        client.read_to_string(&mut out).await.unwrap();
        assert_eq!(
            out,
            "New Username: ✗ too short\r\nNew Username: ✔ New Username: abc\r\n"
        );
    }

    #[tokio::test]
    async fn masked_answer_is_not_echoed() {
        let (mut client, server) = tokio::io::duplex(4096);
        let (_, write_half) = tokio::io::split(server);
        let mut session = Session::new("test", Cursor::new(b"secret1\n".to_vec()), write_half);

        let answer = Prompt::new("Password").mask('*').run(&mut session).await.unwrap();
        assert_eq!(answer, "secret1");
        drop(session);

        let mut out = String::new();
        client.read_to_string(&mut out).await.unwrap();
        assert!(out.ends_with("✔ Password: *******\r\n"));
        assert!(!out.contains("secret1"));
    }

    #[tokio::test]
    async fn closed_session_aborts_the_prompt() {
        let mut session = Session::new("test", Cursor::new(b"ab\n".to_vec()), tokio::io::sink());
        let prompt = Prompt::new("New Username").validate(min_length(3, "too short"));

        assert!(matches!(
            prompt.run(&mut session).await,
            Err(UserError::SessionCancelled(CancelReason::Closed))
        ));
    }
}
