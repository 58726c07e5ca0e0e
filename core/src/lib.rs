/*
 * lib.rs
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

//! Resumable HTTP/1.1 response parsing, and a small client built on top of it.
//!
//! The parser (`protocol::http::h1::ResponseParser`) accepts input in arbitrary pieces and
//! reports each production as a span of the caller's buffer. `ResponseReader` frames bodies
//! on top of it, and `HttpConnection` runs a request/response exchange over a tokio stream.

pub mod config;
pub mod protocol;

pub use config::ClientConfig;
pub use protocol::http::{
    ClientError, HttpConnection, Method, RequestBuilder, Response, ResponseHandler,
    ResponseReader,
};
