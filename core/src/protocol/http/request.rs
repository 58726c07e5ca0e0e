/*
 * request.rs
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

//! HTTP request: method, path, query, headers, cookies, optional body.
//!
//! Built via RequestBuilder and serialized with `encode`; writing the bytes is up to the caller
//! (see `HttpConnection::send`).

use bytes::{BufMut, BytesMut};
use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

use crate::config::ClientConfig;
use crate::protocol::http::error::ClientError;

/// Form encoding: everything but alphanumerics, space and `_.-` is percent-encoded;
/// space then becomes `+`.
const FORM: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b' ')
    .remove(b'_')
    .remove(b'.')
    .remove(b'-');

/// HTTP request method.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
    Head,
    Options,
    Patch,
    Other(&'static str),
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
            Method::Head => "HEAD",
            Method::Options => "OPTIONS",
            Method::Patch => "PATCH",
            Method::Other(s) => s,
        }
    }
}

/// Escape a string for a query string or form body.
pub fn escape(s: &str) -> String {
    utf8_percent_encode(s, FORM).to_string().replace(' ', "+")
}

/// Reverse of `escape`. Invalid UTF-8 is replaced.
pub fn unescape(s: &str) -> String {
    percent_decode_str(&s.replace('+', " "))
        .decode_utf8_lossy()
        .into_owned()
}

/// `foo-bar-baz` → `Foo-Bar-Baz`.
fn capitalize_key(key: &str) -> String {
    key.split('-')
        .map(|part| {
            let lower = part.to_ascii_lowercase();
            let mut chars = lower.chars();
            match chars.next() {
                Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join("-")
}

fn encode_param(k: &str, v: &str) -> String {
    format!("{}={}", escape(k), escape(v))
}

/// Mutable request builder: method, path, query, headers, cookies, body.
#[derive(Debug, Clone)]
pub struct RequestBuilder {
    pub method: Method,
    pub path: String,
    /// In insertion order; names compare case-insensitively.
    pub headers: Vec<(String, String)>,
    pub query: Vec<(String, String)>,
    pub cookies: Vec<(String, String)>,
    pub body: Option<Vec<u8>>,
}

impl RequestBuilder {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            headers: Vec::new(),
            query: Vec::new(),
            cookies: Vec::new(),
            body: None,
        }
    }

    /// Add or replace a header.
    pub fn header(&mut self, name: impl Into<String>, value: impl Into<String>) -> &mut Self {
        let name = name.into();
        let value = value.into();
        match self
            .headers
            .iter_mut()
            .find(|(k, _)| k.eq_ignore_ascii_case(&name))
        {
            Some(entry) => entry.1 = value,
            None => self.headers.push((name, value)),
        }
        self
    }

    /// Append a query string parameter (escaped on encode).
    pub fn query(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.query.push((key.into(), value.into()));
        self
    }

    /// Append a cookie (escaped on encode, one Cookie header per pair).
    pub fn cookie(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.cookies.push((key.into(), value.into()));
        self
    }

    /// Set request body. Sent with Content-Length unless a header already sets it.
    pub fn body(&mut self, data: impl Into<Vec<u8>>) -> &mut Self {
        self.body = Some(data.into());
        self
    }

    fn has_header(&self, name: &str) -> bool {
        self.headers.iter().any(|(k, _)| k.eq_ignore_ascii_case(name))
    }

    /// Path plus encoded query string.
    pub fn target(&self) -> String {
        if self.query.is_empty() {
            return self.path.clone();
        }
        let params: Vec<String> = self
            .query
            .iter()
            .map(|(k, v)| encode_param(k, v))
            .collect();
        format!("{}?{}", self.path, params.join("&"))
    }

    /// Serialize the request head and body. Host, Content-Length, User-Agent and Connection
    /// are filled in when not already set; the port is left out of Host when it is 80.
    pub fn encode(&self, host: &str, port: u16, config: &ClientConfig) -> Result<BytesMut, ClientError> {
        if !self.path.starts_with('/') {
            return Err(ClientError::InvalidPath(self.path.clone()));
        }

        let mut headers: Vec<(String, String)> = self
            .headers
            .iter()
            .map(|(k, v)| (capitalize_key(k), v.clone()))
            .collect();
        if !self.has_header("host") {
            let host = if port != 80 {
                format!("{}:{}", host, port)
            } else {
                host.to_string()
            };
            headers.push(("Host".to_string(), host));
        }
        if !self.has_header("content-length") {
            let len = self.body.as_ref().map(|b| b.len()).unwrap_or(0);
            headers.push(("Content-Length".to_string(), len.to_string()));
        }
        if !self.has_header("user-agent") {
            headers.push(("User-Agent".to_string(), config.user_agent.clone()));
        }
        if !self.has_header("connection") {
            headers.push(("Connection".to_string(), config.connection.clone()));
        }

        let mut head = format!("{} {} HTTP/1.1\r\n", self.method.as_str(), self.target());
        for (k, v) in &headers {
            head.push_str(k);
            head.push_str(": ");
            head.push_str(v);
            head.push_str("\r\n");
        }
        for (k, v) in &self.cookies {
            head.push_str("Cookie: ");
            head.push_str(&encode_param(k, v));
            head.push_str("\r\n");
        }
        head.push_str("\r\n");

        let body_len = self.body.as_ref().map(|b| b.len()).unwrap_or(0);
        let mut out = BytesMut::with_capacity(head.len() + body_len);
        out.put_slice(head.as_bytes());
        if let Some(body) = &self.body {
            out.put_slice(body);
        }
        Ok(out)
    }
}
