//! Module `session::io`
//!
//! Defines the `Session` struct, the input/output pairing of one remote
//! connection. Workflows receive it as a parameter, so anything implementing
//! `AsyncRead`/`AsyncWrite` (a TCP stream, an in-memory buffer) can drive them.

use std::time::Duration;
use tokio::io::{
    AsyncBufRead, AsyncBufReadExt, AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt, BufReader,
};
use tokio::net::TcpStream;

use crate::error::{CancelReason, UserError};

/// Control characters that abort the current prompt (Ctrl-C, Ctrl-D).
const INTERRUPT_CHARS: [char; 2] = ['\u{3}', '\u{4}'];

/// Longest answer accepted when no limit is configured, in bytes.
pub const DEFAULT_MAX_LINE_LENGTH: usize = 1024;

/// One remote interactive connection.
pub struct Session {
    peer: String,
    reader: Box<dyn AsyncBufRead + Send + Unpin>,
    writer: Box<dyn AsyncWrite + Send + Unpin>,
    prompt_timeout: Option<Duration>,
    max_line_length: usize,
}

impl Session {
    pub fn new<R, W>(peer: impl Into<String>, reader: R, writer: W) -> Self
    where
        R: AsyncRead + Send + Unpin + 'static,
        W: AsyncWrite + Send + Unpin + 'static,
    {
        Self {
            peer: peer.into(),
            reader: Box::new(BufReader::new(reader)),
            writer: Box::new(writer),
            prompt_timeout: None,
            max_line_length: DEFAULT_MAX_LINE_LENGTH,
        }
    }

    /// Splits an accepted TCP connection into a session.
    pub fn from_tcp(stream: TcpStream) -> std::io::Result<Self> {
        let peer = stream.peer_addr()?.to_string();
        let (read_half, write_half) = stream.into_split();
        Ok(Self::new(peer, read_half, write_half))
    }

    /// Limits how long a single answer may take. `None` waits forever.
    pub fn with_prompt_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.prompt_timeout = timeout;
        self
    }

    /// Caps a single answer at `limit` bytes, line terminator excluded.
    pub fn with_max_line_length(mut self, limit: usize) -> Self {
        self.max_line_length = limit;
        self
    }

    /// Returns the remote address (or test label) of this session.
    pub fn peer(&self) -> &str {
        &self.peer
    }

    /// Reads one answer line without its line terminator.
    ///
    /// End of stream, an interrupt character, the prompt timeout and a line
    /// longer than the configured maximum all surface as `SessionCancelled`.
    /// At most the maximum plus a `\r\n` terminator is ever buffered.
    pub async fn read_line(&mut self) -> Result<String, UserError> {
        let mut buf = Vec::new();
        let timeout = self.prompt_timeout;
        let limit = self.max_line_length;
        let mut bounded = (&mut self.reader).take(limit as u64 + 2);
        let read = bounded.read_until(b'\n', &mut buf);

        let n = match timeout {
            Some(wait) => tokio::time::timeout(wait, read)
                .await
                .map_err(|_| UserError::SessionCancelled(CancelReason::TimedOut))??,
            None => read.await?,
        };

        if n == 0 {
            return Err(UserError::SessionCancelled(CancelReason::Closed));
        }

        let line = String::from_utf8(buf)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        let line = line.trim_end_matches(['\r', '\n']);
        if line.len() > limit {
            return Err(UserError::SessionCancelled(CancelReason::LineTooLong));
        }
        if line.contains(INTERRUPT_CHARS) {
            return Err(UserError::SessionCancelled(CancelReason::Interrupted));
        }

        Ok(line.to_string())
    }

    /// Writes and flushes `text` to the remote side.
    pub async fn write_str(&mut self, text: &str) -> Result<(), UserError> {
        self.writer.write_all(text.as_bytes()).await?;
        self.writer.flush().await?;
        Ok(())
    }
}
