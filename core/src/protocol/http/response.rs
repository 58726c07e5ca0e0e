/*
 * response.rs
 * Copyright (C) 2026 Chris Burdess
 *
 * This file is part of httpclient_core, a resumable HTTP/1.1 client library.
 *
 * httpclient_core is free software: you can redistribute it and/or modify
 * it under the terms of the GNU General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or
 * (at your option) any later version.
 *
 * httpclient_core is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 * GNU General Public License for more details.
 *
 * You should have received a copy of the GNU General Public License
 * along with httpclient_core.  If not, see <http://www.gnu.org/licenses/>.
 */

//! Response status and the header records built from parser events.

use crate::protocol::http::error::ClientError;
use crate::protocol::http::h1::{unfold, ResponseSink, Span};

/// Status handed to `ResponseHandler::ok` / `error`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    pub code: u16,
    pub reason: Option<String>,
}

impl Response {
    pub fn new(code: u16) -> Self {
        Self { code, reason: None }
    }

    pub fn with_reason(code: u16, reason: impl Into<String>) -> Self {
        Self {
            code,
            reason: Some(reason.into()),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.code)
    }
}

fn lossy(buf: &[u8], span: Span) -> String {
    String::from_utf8_lossy(span.of(buf)).into_owned()
}

fn field(buf: &[u8], name: Span, value: Span) -> (String, String) {
    (
        lossy(buf, name),
        String::from_utf8_lossy(&unfold(value.of(buf))).into_owned(),
    )
}

/// Status line and headers of a response, in arrival order. Folded values are unfolded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResponseHeader {
    pub version: Option<String>,
    /// Status code as sent.
    pub status_text: Option<String>,
    pub reason: Option<String>,
    pub headers: Vec<(String, String)>,
}

impl ResponseHeader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Numeric status code, if the status line carried a valid one.
    pub fn status(&self) -> Option<u16> {
        self.status_text.as_deref()?.parse().ok()
    }

    /// First value of the named header (case-insensitive).
    pub fn get(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    pub fn get_all<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.headers
            .iter()
            .filter(move |(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Content-Length as an integer, or None if absent or not a number.
    pub fn content_length(&self) -> Option<u64> {
        self.get("Content-Length")?.trim().parse().ok()
    }

    /// Is the transfer encoding chunked?
    pub fn is_chunked(&self) -> bool {
        self.get_all("Transfer-Encoding")
            .any(|v| v.to_ascii_lowercase().contains("chunked"))
    }

    pub fn is_success(&self) -> bool {
        self.status().is_some_and(|c| (200..300).contains(&c))
    }

    /// An informational 1xx status other than 101: another head follows it.
    pub fn is_interim(&self) -> bool {
        matches!(self.status(), Some(100..=199)) && self.status() != Some(101)
    }

    /// 1xx, 204 and 304 responses never carry a body.
    pub fn allows_body(&self) -> bool {
        !matches!(self.status(), Some(100..=199) | Some(204) | Some(304))
    }

    pub fn to_response(&self) -> Response {
        let code = self.status().unwrap_or(0);
        match &self.reason {
            Some(r) => Response::with_reason(code, r.clone()),
            None => Response::new(code),
        }
    }
}

impl ResponseSink for ResponseHeader {
    fn http_version(&mut self, buf: &[u8], version: Span) {
        self.version = Some(lossy(buf, version));
    }

    fn status_code(&mut self, buf: &[u8], code: Span) {
        self.status_text = Some(lossy(buf, code));
    }

    fn reason_phrase(&mut self, buf: &[u8], reason: Span) {
        self.reason = Some(lossy(buf, reason));
    }

    fn http_field(&mut self, buf: &[u8], name: Span, value: Span) {
        self.headers.push(field(buf, name, value));
    }

    fn chunk_size(&mut self, _buf: &[u8], _size: Span) {}

    fn last_chunk(&mut self) {}

    fn header_done(&mut self, _buf: &[u8], _rest: Span) {}
}

/// One chunk-size line of a chunked body, with the trailers following the last chunk.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChunkHeader {
    /// Hex digits as sent.
    pub size_text: Option<String>,
    pub last: bool,
    pub extensions: Vec<(String, Option<String>)>,
    pub trailers: Vec<(String, String)>,
}

impl ChunkHeader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Size of the chunk in bytes. The last chunk is always zero.
    pub fn chunk_size(&self) -> Result<u64, ClientError> {
        match &self.size_text {
            _ if self.last => Ok(0),
            Some(text) => u64::from_str_radix(text, 16)
                .map_err(|_| ClientError::InvalidChunkSize(text.clone())),
            None => Err(ClientError::InvalidChunkSize(String::new())),
        }
    }

    pub fn is_last(&self) -> bool {
        self.last
    }
}

impl ResponseSink for ChunkHeader {
    fn http_version(&mut self, _buf: &[u8], _version: Span) {}

    fn status_code(&mut self, _buf: &[u8], _code: Span) {}

    fn reason_phrase(&mut self, _buf: &[u8], _reason: Span) {}

    fn http_field(&mut self, buf: &[u8], name: Span, value: Span) {
        self.trailers.push(field(buf, name, value));
    }

    fn chunk_size(&mut self, buf: &[u8], size: Span) {
        self.size_text = Some(lossy(buf, size));
    }

    fn chunk_extension(&mut self, buf: &[u8], name: Span, value: Option<Span>) {
        self.extensions
            .push((lossy(buf, name), value.map(|v| lossy(buf, v))));
    }

    fn last_chunk(&mut self) {
        self.last = true;
    }

    fn header_done(&mut self, _buf: &[u8], _rest: Span) {}
}
