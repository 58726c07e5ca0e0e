/*
 * error.rs
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

//! HTTP client errors (protocol, framing, I/O).

use std::io;

use crate::protocol::http::h1::ParserError;

/// Errors produced while sending a request or reading its response.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The response head or a chunk-size line is malformed.
    #[error("invalid HTTP format, parsing fails at byte {offset}")]
    Parse { offset: usize },

    /// The head parsed but carried no status line.
    #[error("no HTTP response")]
    NoResponse,

    #[error("invalid chunk size: {0}")]
    InvalidChunkSize(String),

    #[error("non-CRLF chunk footer")]
    ChunkFooter,

    #[error("garbage at end of {0}")]
    TrailingGarbage(&'static str),

    #[error("connection closed before response was complete")]
    UnexpectedEof,

    #[error("response head exceeds {limit} bytes")]
    HeaderTooLarge { limit: usize },

    #[error("invalid request path: {0}")]
    InvalidPath(String),

    #[error("response already finished")]
    Finished,

    #[error("read timed out")]
    Timeout,

    #[error("invalid configuration: {0}")]
    Config(#[from] serde_json::Error),

    #[error("parser contract violated: {0}")]
    Parser(#[from] ParserError),

    #[error("io error: {0}")]
    Io(#[from] io::Error),
}
