/*
 * reader.rs
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

//! Response reader: accumulates bytes from the transport, runs the head parser over them
//! and frames the body (Content-Length, chunked, or read-until-close).
//!
//! No I/O happens here. Push bytes with `receive`, signal EOF with `close`; the handler is
//! invoked as the response is recognized.

use bytes::{Buf, BytesMut};
use tracing::{debug, trace, warn};

use crate::config::ClientConfig;
use crate::protocol::http::error::ClientError;
use crate::protocol::http::h1::{ResponseParser, ResponseSink};
use crate::protocol::http::handler::ResponseHandler;
use crate::protocol::http::response::{ChunkHeader, ResponseHeader};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReaderState {
    ResponseHeader,
    ChunkHeader,
    ChunkBody,
    /// CRLF after a chunk's data.
    ChunkFooter,
    Body,
    Finished,
    Invalid,
}

pub struct ResponseReader {
    state: ReaderState,
    buf: BytesMut,
    parser: ResponseParser,
    header: ResponseHeader,
    chunk: ChunkHeader,
    /// Body bytes still expected in the current chunk or Content-Length body.
    /// None while reading until close.
    remaining: Option<u64>,
    max_header_bytes: usize,
    head_request: bool,
}

/// Run the parser over `buf` from where it stopped. On a complete head, drop the head bytes
/// and reset the parser for the next one.
fn parse_head<S: ResponseSink>(
    parser: &mut ResponseParser,
    buf: &mut BytesMut,
    sink: &mut S,
    limit: usize,
) -> Result<bool, ClientError> {
    let off = parser.nread();
    if off == buf.len() {
        return Ok(false);
    }
    parser.execute(&buf[..], off, sink)?;
    if parser.has_error() {
        return Err(ClientError::Parse {
            offset: parser.nread(),
        });
    }
    if !parser.is_finished() {
        if parser.nread() > limit {
            return Err(ClientError::HeaderTooLarge { limit });
        }
        return Ok(false);
    }
    buf.advance(parser.nread());
    parser.reset();
    Ok(true)
}

impl ResponseReader {
    pub fn new() -> Self {
        Self::with_config(&ClientConfig::default())
    }

    pub fn with_config(config: &ClientConfig) -> Self {
        Self {
            state: ReaderState::ResponseHeader,
            buf: BytesMut::with_capacity(config.read_buffer_size),
            parser: ResponseParser::new(),
            header: ResponseHeader::new(),
            chunk: ChunkHeader::new(),
            remaining: None,
            max_header_bytes: config.max_header_bytes,
            head_request: false,
        }
    }

    /// The response answers a HEAD request: headers only, whatever Content-Length says.
    pub fn set_head_request(&mut self, head: bool) {
        self.head_request = head;
    }

    pub fn state(&self) -> ReaderState {
        self.state
    }

    /// Status line and headers received so far.
    pub fn header(&self) -> &ResponseHeader {
        &self.header
    }

    pub fn is_finished(&self) -> bool {
        self.state == ReaderState::Finished
    }

    /// Prepare for the next response on the same connection.
    pub fn reset(&mut self) {
        self.state = ReaderState::ResponseHeader;
        self.buf.clear();
        self.parser.reset();
        self.header = ResponseHeader::new();
        self.chunk = ChunkHeader::new();
        self.remaining = None;
        self.head_request = false;
    }

    /// Push bytes read from the transport.
    pub fn receive<H: ResponseHandler + ?Sized>(
        &mut self,
        data: &[u8],
        handler: &mut H,
    ) -> Result<(), ClientError> {
        if matches!(self.state, ReaderState::Finished | ReaderState::Invalid) {
            return Err(ClientError::Finished);
        }
        self.buf.extend_from_slice(data);
        match self.dispatch(handler) {
            Ok(()) => Ok(()),
            Err(e) => Err(self.fail(handler, e)),
        }
    }

    /// The transport reached EOF.
    pub fn close<H: ResponseHandler + ?Sized>(&mut self, handler: &mut H) -> Result<(), ClientError> {
        match self.state {
            ReaderState::Finished | ReaderState::Invalid => Ok(()),
            ReaderState::Body if self.remaining.is_none() => {
                debug!("body delimited by close");
                handler.end_body();
                handler.complete();
                self.state = ReaderState::Finished;
                Ok(())
            }
            _ => Err(self.fail(handler, ClientError::UnexpectedEof)),
        }
    }

    fn fail<H: ResponseHandler + ?Sized>(&mut self, handler: &mut H, error: ClientError) -> ClientError {
        warn!(state = ?self.state, %error, "response failed");
        self.state = ReaderState::Invalid;
        handler.failed(&error);
        error
    }

    fn dispatch<H: ResponseHandler + ?Sized>(&mut self, handler: &mut H) -> Result<(), ClientError> {
        loop {
            let progressed = match self.state {
                ReaderState::ResponseHeader => self.parse_response_header(handler)?,
                ReaderState::ChunkHeader => self.parse_chunk_header(handler)?,
                ReaderState::ChunkBody => self.process_chunk_body(handler),
                ReaderState::ChunkFooter => self.process_chunk_footer()?,
                ReaderState::Body => self.process_body(handler)?,
                ReaderState::Finished | ReaderState::Invalid => false,
            };
            if !progressed {
                return Ok(());
            }
        }
    }

    fn parse_response_header<H: ResponseHandler + ?Sized>(
        &mut self,
        handler: &mut H,
    ) -> Result<bool, ClientError> {
        if !parse_head(
            &mut self.parser,
            &mut self.buf,
            &mut self.header,
            self.max_header_bytes,
        )? {
            return Ok(false);
        }
        if self.header.status().is_none() || self.header.reason.is_none() {
            return Err(ClientError::NoResponse);
        }
        if self.header.is_interim() {
            debug!(status = ?self.header.status(), "interim response skipped");
            self.header = ResponseHeader::new();
            return Ok(true);
        }

        let response = self.header.to_response();
        debug!(status = response.code, headers = self.header.headers.len(), "response header");
        if response.is_success() {
            handler.ok(response);
        } else {
            handler.error(response);
        }
        for (name, value) in &self.header.headers {
            handler.header(name, value);
        }

        if self.head_request || !self.header.allows_body() {
            self.finish(handler, "response")?;
        } else if self.header.is_chunked() {
            handler.start_body();
            self.state = ReaderState::ChunkHeader;
        } else {
            match self.header.content_length() {
                Some(0) => self.finish(handler, "response")?,
                length => {
                    handler.start_body();
                    self.remaining = length;
                    self.state = ReaderState::Body;
                }
            }
        }
        Ok(true)
    }

    fn parse_chunk_header<H: ResponseHandler + ?Sized>(
        &mut self,
        handler: &mut H,
    ) -> Result<bool, ClientError> {
        if !parse_head(
            &mut self.parser,
            &mut self.buf,
            &mut self.chunk,
            self.max_header_bytes,
        )? {
            return Ok(false);
        }
        let chunk = std::mem::take(&mut self.chunk);
        let size = chunk.chunk_size()?;
        trace!(size, "chunk header");
        if size > 0 {
            self.remaining = Some(size);
            self.state = ReaderState::ChunkBody;
        } else {
            handler.end_body();
            for (name, value) in &chunk.trailers {
                handler.header(name, value);
            }
            self.finish(handler, "chunked response")?;
        }
        Ok(true)
    }

    fn process_chunk_body<H: ResponseHandler + ?Sized>(&mut self, handler: &mut H) -> bool {
        let remaining = self.remaining.unwrap_or(0);
        let n = remaining.min(self.buf.len() as u64) as usize;
        if n > 0 {
            let data = self.buf.split_to(n);
            handler.body_chunk(&data);
        }
        let remaining = remaining - n as u64;
        self.remaining = Some(remaining);
        if remaining == 0 {
            self.state = ReaderState::ChunkFooter;
            true
        } else {
            false
        }
    }

    fn process_chunk_footer(&mut self) -> Result<bool, ClientError> {
        if self.buf.first().is_some_and(|b| *b != b'\r') {
            return Err(ClientError::ChunkFooter);
        }
        if self.buf.len() < 2 {
            return Ok(false);
        }
        if &self.buf[..2] != b"\r\n" {
            return Err(ClientError::ChunkFooter);
        }
        self.buf.advance(2);
        self.state = ReaderState::ChunkHeader;
        Ok(true)
    }

    fn process_body<H: ResponseHandler + ?Sized>(&mut self, handler: &mut H) -> Result<bool, ClientError> {
        let Some(remaining) = self.remaining else {
            if !self.buf.is_empty() {
                let data = self.buf.split();
                handler.body_chunk(&data);
            }
            return Ok(false);
        };
        let n = remaining.min(self.buf.len() as u64) as usize;
        if n > 0 {
            let data = self.buf.split_to(n);
            handler.body_chunk(&data);
        }
        let remaining = remaining - n as u64;
        self.remaining = Some(remaining);
        if remaining == 0 {
            handler.end_body();
            self.finish(handler, "body")?;
        }
        Ok(false)
    }

    /// Complete the response; anything still buffered does not belong to it.
    fn finish<H: ResponseHandler + ?Sized>(
        &mut self,
        handler: &mut H,
        what: &'static str,
    ) -> Result<(), ClientError> {
        if !self.buf.is_empty() {
            return Err(ClientError::TrailingGarbage(what));
        }
        debug!("response complete");
        handler.complete();
        self.state = ReaderState::Finished;
        Ok(())
    }
}

impl Default for ResponseReader {
    fn default() -> Self {
        Self::new()
    }
}
