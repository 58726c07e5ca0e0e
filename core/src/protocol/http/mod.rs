/*
 * mod.rs
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

//! HTTP/1.1 client: a resumable response-head parser and the pieces built on it.
//!
//! - `h1`: the byte-offset, resumable parser for status lines, headers and chunk-size lines.
//!   Events carry spans into the caller's buffer; nothing is copied.
//! - `ResponseReader`: sans-I/O body framing (Content-Length, chunked, read-until-close)
//!   that drives a `ResponseHandler`.
//! - `RequestBuilder`: request serialization with the usual default headers.
//! - `HttpConnection`: send/receive over any tokio stream the caller has opened.

mod error;
mod handler;
mod reader;
mod request;
mod response;

pub mod h1;

pub use error::ClientError;
pub use handler::ResponseHandler;
pub use reader::{ReaderState, ResponseReader};
pub use request::{escape, unescape, Method, RequestBuilder};
pub use response::{ChunkHeader, Response, ResponseHeader};

pub mod connection;

pub use connection::HttpConnection;
