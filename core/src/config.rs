/*
 * config.rs
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

//! Client settings: request defaults and response limits. Loaded from JSON with serde;
//! every field is optional and falls back to `ClientConfig::default()`.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::protocol::http::ClientError;

const DEFAULT_MAX_HEADER_BYTES: usize = 80 * 1024;
const DEFAULT_READ_BUFFER_SIZE: usize = 8192;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// User-Agent sent when the request does not set one.
    pub user_agent: String,
    /// Connection header sent when the request does not set one.
    pub connection: String,
    /// Upper bound on a response head, or a chunk-size line plus trailers, still incomplete.
    pub max_header_bytes: usize,
    /// Size of each read from the stream.
    pub read_buffer_size: usize,
    /// Per-read timeout; none when absent.
    pub read_timeout_ms: Option<u64>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            user_agent: format!("httpclient_core/{}", env!("CARGO_PKG_VERSION")),
            connection: "close".to_string(),
            max_header_bytes: DEFAULT_MAX_HEADER_BYTES,
            read_buffer_size: DEFAULT_READ_BUFFER_SIZE,
            read_timeout_ms: None,
        }
    }
}

impl ClientConfig {
    pub fn from_json(json: &str) -> Result<Self, ClientError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String, ClientError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn read_timeout(&self) -> Option<Duration> {
        self.read_timeout_ms.map(Duration::from_millis)
    }
}
