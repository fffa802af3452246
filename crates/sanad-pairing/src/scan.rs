//! Scan source abstraction
//!
//! Decoded code payloads arrive asynchronously from whatever is standing in
//! for the camera. Dropping a source tears the subscription down; no decode
//! is delivered after that.

use std::collections::VecDeque;
use std::future::Future;
use tokio::io::{AsyncBufReadExt, BufReader, Lines};

/// An asynchronous stream of decoded code payloads.
///
/// `None` means the source is exhausted or was torn down.
pub trait ScanSource {
    fn next_decode(&mut self) -> impl Future<Output = Option<String>> + Send;
}

/// Scan source reading one payload per line from an async reader.
///
/// Stands in for the camera on terminals: each line entered is treated as a
/// decoded code.
pub struct LineScanner<R> {
    lines: Lines<BufReader<R>>,
}

impl<R: tokio::io::AsyncRead + Unpin + Send> LineScanner<R> {
    pub fn new(reader: R) -> Self {
        Self {
            lines: BufReader::new(reader).lines(),
        }
    }
}

impl<R: tokio::io::AsyncRead + Unpin + Send> ScanSource for LineScanner<R> {
    async fn next_decode(&mut self) -> Option<String> {
        loop {
            match self.lines.next_line().await {
                Ok(Some(line)) => {
                    let trimmed = line.trim();
                    if !trimmed.is_empty() {
                        return Some(trimmed.to_string());
                    }
                }
                Ok(None) | Err(_) => return None,
            }
        }
    }
}

/// Scan source that replays a fixed sequence of payloads.
pub struct ScriptedScanner {
    payloads: VecDeque<String>,
}

impl ScriptedScanner {
    pub fn new(payloads: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            payloads: payloads.into_iter().map(Into::into).collect(),
        }
    }
}

impl ScanSource for ScriptedScanner {
    async fn next_decode(&mut self) -> Option<String> {
        self.payloads.pop_front()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_line_scanner_skips_blank_lines() {
        let input: &[u8] = b"\n  \nfirst-payload\nsecond-payload\n";
        let mut scanner = LineScanner::new(input);
        assert_eq!(scanner.next_decode().await.unwrap(), "first-payload");
        assert_eq!(scanner.next_decode().await.unwrap(), "second-payload");
        assert!(scanner.next_decode().await.is_none());
    }

    #[tokio::test]
    async fn test_scripted_scanner_exhausts() {
        let mut scanner = ScriptedScanner::new(["a", "b"]);
        assert_eq!(scanner.next_decode().await.unwrap(), "a");
        assert_eq!(scanner.next_decode().await.unwrap(), "b");
        assert!(scanner.next_decode().await.is_none());
    }
}
