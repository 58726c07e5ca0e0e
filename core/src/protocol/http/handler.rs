/*
 * handler.rs
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

//! Callbacks through which `ResponseReader` reports a response.

use crate::protocol::http::error::ClientError;
use crate::protocol::http::response::Response;

/// Receives the parts of one response in wire order.
///
/// Interim 1xx heads are skipped and never reach the handler. The final status goes to `ok`
/// (2xx) or `error`, followed by one `header` call per field. When the response has a body,
/// `start_body`, any number of `body_chunk` calls and `end_body` come next. A chunked body's
/// trailers arrive through `header` after `end_body`. `complete` ends the response.
///
/// Replies to HEAD, and 101/204/304 or `Content-Length: 0` responses, go straight from the
/// headers to `complete`. A body without a length ends when the connection closes.
///
/// `failed` may come at any point instead of `complete`. It is always the last call.
pub trait ResponseHandler {
    fn ok(&mut self, response: Response);

    fn error(&mut self, response: Response);

    /// A header field or a trailer. Repeated names are delivered once per occurrence;
    /// folded values arrive unfolded.
    fn header(&mut self, name: &str, value: &str);

    fn start_body(&mut self);

    /// Body bytes with any chunk framing removed. The slice is only valid during the call.
    fn body_chunk(&mut self, data: &[u8]);

    fn end_body(&mut self);

    fn complete(&mut self);

    fn failed(&mut self, error: &ClientError);
}
