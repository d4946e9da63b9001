//! Response body consumers: drain, collect text, write to file.

use std::path::Path;

use futures::StreamExt;
use tokio::fs::File;
use tokio::io::AsyncWriteExt;
use tokio_util::io::StreamReader;

use crate::error::RoiError;
use crate::http::ByteStream;

/// Incremental UTF-8 decoder that holds back incomplete multi-byte sequences
/// until the next chunk arrives. Invalid bytes decode to U+FFFD.
#[derive(Debug, Default)]
pub(crate) struct Utf8Decoder {
    pending: Vec<u8>,
}

impl Utf8Decoder {
    pub(crate) fn push(&mut self, chunk: &[u8]) -> String {
        self.pending.extend_from_slice(chunk);
        let mut out = String::new();
        loop {
            match std::str::from_utf8(&self.pending) {
                Ok(text) => {
                    out.push_str(text);
                    self.pending.clear();
                    return out;
                }
                Err(e) => {
                    let valid = e.valid_up_to();
                    out.push_str(&String::from_utf8_lossy(&self.pending[..valid]));
                    match e.error_len() {
                        Some(len) => {
                            out.push(char::REPLACEMENT_CHARACTER);
                            self.pending.drain(..valid + len);
                        }
                        // incomplete tail, wait for more
                        None => {
                            self.pending.drain(..valid);
                            return out;
                        }
                    }
                }
            }
        }
    }

    pub(crate) fn finish(self) -> Option<String> {
        if self.pending.is_empty() {
            None
        } else {
            Some(String::from_utf8_lossy(&self.pending).into_owned())
        }
    }
}

/// Read the body to its end, discarding it.
pub(crate) async fn drain(mut body: ByteStream) -> Result<u64, RoiError> {
    let mut read = 0u64;
    while let Some(chunk) = body.next().await {
        read += chunk?.len() as u64;
    }
    Ok(read)
}

/// Collect the body as ordered text chunks.
pub(crate) async fn collect_text(mut body: ByteStream) -> Result<Vec<String>, RoiError> {
    let mut decoder = Utf8Decoder::default();
    let mut chunks = Vec::new();
    while let Some(chunk) = body.next().await {
        let text = decoder.push(&chunk?);
        if !text.is_empty() {
            chunks.push(text);
        }
    }
    if let Some(rest) = decoder.finish() {
        chunks.push(rest);
    }
    Ok(chunks)
}

/// Stream the body into a freshly created file at `path`.
pub(crate) async fn write_file(path: &Path, body: ByteStream) -> Result<u64, RoiError> {
    let mut file = File::create(path).await?;
    let mut reader = StreamReader::new(body);
    let written = tokio::io::copy(&mut reader, &mut file).await?;
    file.flush().await?;
    Ok(written)
}
