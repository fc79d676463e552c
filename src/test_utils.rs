//! Test helpers: scripted sessions and key files.

use std::io::{Cursor, Write};
use tokio::io::{AsyncReadExt, DuplexStream};

use crate::session::Session;

/// A session fed from a fixed script whose output can be read back.
pub struct ScriptedSession {
    pub session: Session,
    output: DuplexStream,
}

impl ScriptedSession {
    /// `input` holds every answer line the remote user will type.
    pub fn new(input: &str) -> Self {
        let (output, server) = tokio::io::duplex(64 * 1024);
        let (_, write_half) = tokio::io::split(server);
        let session = Session::new("test", Cursor::new(input.as_bytes().to_vec()), write_half);
        Self { session, output }
    }

    /// Closes the session and returns everything written to it.
    pub async fn finish(self) -> String {
        let ScriptedSession {
            session,
            mut output,
        } = self;
        drop(session);

        let mut text = String::new();
        output.read_to_string(&mut text).await.unwrap();
        text
    }
}

pub const KEY_CONTENT: &[u8] = b"ssh-ed25519 AAAAC3NzaC1lZDI1NTE5 alice@laptop\n";

/// A readable public key file that lives as long as the handle.
pub fn key_file() -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(KEY_CONTENT).unwrap();
    file
}
