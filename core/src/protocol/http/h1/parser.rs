/*
 * parser.rs
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

//! HTTP/1.1 response head push parser: status line or chunk-size line, header fields
//! (with obs-fold continuation), chunk trailers.
//!
//! # Buffer contract
//!
//! The caller owns the bytes. Each `feed` call is given the whole buffer accumulated so
//! far for this message plus the number of valid bytes (`len`) and the offset to resume
//! from (`off`, always the value returned by the previous call). Bytes before `off` must
//! not change between calls. The parser keeps only offsets into that buffer, so a token
//! cut in half by a short read simply resumes on the next call; no byte is scanned twice.
//!
//! Events carry `Span`s into the buffer instead of copied strings. Parsing stops at the
//! blank line ending the head: the bytes after it belong to the body and are reported,
//! not consumed, by `header_done`.

use super::error::ParserError;
use super::span::{is_token, is_ws, Span};

const PROTOCOL: &[u8] = b"HTTP/";

/// Receives parse events. Every span indexes the `buf` passed alongside it, which is the
/// buffer given to `ResponseParser::feed`. Events are delivered synchronously, in input order.
pub trait ResponseSink {
    /// `<major>.<minor>` following `HTTP/`.
    fn http_version(&mut self, buf: &[u8], version: Span);
    fn status_code(&mut self, buf: &[u8], code: Span);
    /// Reason text; empty when the server sent none.
    fn reason_phrase(&mut self, buf: &[u8], reason: Span);
    /// One logical header or trailer field. A folded value spans all of its physical lines;
    /// see `unfold`. Names are reported as received (no case folding).
    fn http_field(&mut self, buf: &[u8], name: Span, value: Span);
    /// Raw hex digits of a chunk-size line.
    fn chunk_size(&mut self, buf: &[u8], size: Span);
    /// `;name[=value]` following the chunk size. Ignored unless overridden.
    fn chunk_extension(&mut self, _buf: &[u8], _name: Span, _value: Option<Span>) {}
    /// The chunk-size line was zero (or empty): trailers, if any, follow.
    fn last_chunk(&mut self);
    /// Blank line ending the head. `rest` covers the bytes already buffered beyond it.
    fn header_done(&mut self, buf: &[u8], rest: Span);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseState {
    Start,
    /// Matching `HTTP/`; holds the number of bytes matched so far.
    Protocol(u8),
    MajorStart,
    Major,
    MinorStart,
    Minor,
    StatusStart,
    Status,
    ReasonStart,
    Reason,
    StatusLineLf,
    /// First byte of a header line: a new field, a continuation, or the blank line.
    LineStart,
    FieldName,
    ValueStart,
    Value,
    FieldLf,
    HeadersLf,
    ChunkSize,
    ExtStart,
    ExtName,
    ExtValueStart,
    ExtValue,
    ChunkLineLf,
    EmptyChunkLf,
    Finished,
    Error,
}

/// Outcome of `ResponseParser::finish`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FinishResult {
    /// More input is needed.
    Incomplete,
    /// The head was fully parsed.
    Complete,
    Error,
}

/// Resumable parser for one response head (or one chunk-size line). Reuse across
/// messages via `reset`.
#[derive(Debug, Clone)]
pub struct ResponseParser {
    state: ParseState,
    /// Bytes consumed so far.
    nread: usize,
    /// Start of the open token.
    mark: usize,
    field_start: usize,
    field_len: usize,
    /// End of the value of the field awaiting emission.
    value_end: usize,
    body_start: usize,
    /// A field value has closed but may still be continued by a folded line.
    field_pending: bool,
    /// Every digit of the chunk size seen so far is `0`.
    zero_chunk: bool,
}

impl ResponseParser {
    pub fn new() -> Self {
        Self {
            state: ParseState::Start,
            nread: 0,
            mark: 0,
            field_start: 0,
            field_len: 0,
            value_end: 0,
            body_start: 0,
            field_pending: false,
            zero_chunk: false,
        }
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }

    pub fn state(&self) -> ParseState {
        self.state
    }

    /// Bytes consumed so far; the `off` to pass to the next `feed`.
    pub fn nread(&self) -> usize {
        self.nread
    }

    /// Offset of the first body byte, once the head is complete.
    pub fn body_start(&self) -> Option<usize> {
        if self.state == ParseState::Finished {
            Some(self.body_start)
        } else {
            None
        }
    }

    pub fn has_error(&self) -> bool {
        self.state == ParseState::Error
    }

    pub fn is_finished(&self) -> bool {
        self.state == ParseState::Finished
    }

    pub fn finish(&self) -> FinishResult {
        if self.has_error() {
            FinishResult::Error
        } else if self.is_finished() {
            FinishResult::Complete
        } else {
            FinishResult::Incomplete
        }
    }

    /// Parse `buf[off..len]`, delivering events to `sink`. Returns the new `nread`.
    ///
    /// Running out of bytes mid-token is not an error: call again with more data.
    /// Malformed input moves the parser to its error state (check `has_error()`); from then
    /// on calls consume nothing until `reset`.
    pub fn feed<S: ResponseSink + ?Sized>(
        &mut self,
        buf: &[u8],
        len: usize,
        off: usize,
        sink: &mut S,
    ) -> Result<usize, ParserError> {
        match self.state {
            ParseState::Error => return Ok(self.nread),
            ParseState::Finished => {
                return Err(ParserError::AlreadyFinished {
                    body_start: self.body_start,
                })
            }
            _ => {}
        }
        if len > buf.len() {
            return Err(ParserError::LengthPastBuffer {
                len,
                available: buf.len(),
            });
        }
        if off > len {
            return Err(ParserError::OffsetPastEnd { offset: off, len });
        }
        if off != self.nread {
            return Err(ParserError::OffsetMismatch {
                offset: off,
                nread: self.nread,
            });
        }

        let mut p = off;
        while p < len {
            self.state = self.step(buf, len, p, sink);
            match self.state {
                // The offending byte is not consumed.
                ParseState::Error => break,
                ParseState::Finished => {
                    p += 1;
                    break;
                }
                _ => p += 1,
            }
        }
        self.nread = p;

        debug_assert!(self.nread <= len, "nread past end of input");
        debug_assert!(self.body_start <= len, "body starts after end of input");
        debug_assert!(self.mark <= self.nread, "mark past parsed bytes");
        debug_assert!(self.field_len <= self.nread, "field longer than parsed bytes");
        Ok(self.nread)
    }

    /// `feed` over the whole of `buf`.
    pub fn execute<S: ResponseSink + ?Sized>(
        &mut self,
        buf: &[u8],
        off: usize,
        sink: &mut S,
    ) -> Result<usize, ParserError> {
        self.feed(buf, buf.len(), off, sink)
    }

    /// One transition on `buf[p]`.
    fn step<S: ResponseSink + ?Sized>(
        &mut self,
        buf: &[u8],
        len: usize,
        p: usize,
        sink: &mut S,
    ) -> ParseState {
        use ParseState::*;

        let b = buf[p];
        match self.state {
            Start => match b {
                b'H' => Protocol(1),
                b'\r' => EmptyChunkLf,
                _ if b.is_ascii_hexdigit() => {
                    self.mark = p;
                    self.zero_chunk = b == b'0';
                    ChunkSize
                }
                _ => Error,
            },

            // Status line
            Protocol(n) => {
                let n = n as usize;
                if b != PROTOCOL[n] {
                    Error
                } else if n + 1 == PROTOCOL.len() {
                    MajorStart
                } else {
                    Protocol(n as u8 + 1)
                }
            }
            MajorStart if b.is_ascii_digit() => {
                self.mark = p;
                Major
            }
            Major if b.is_ascii_digit() => Major,
            Major if b == b'.' => MinorStart,
            MinorStart | Minor if b.is_ascii_digit() => Minor,
            Minor if b == b' ' => {
                sink.http_version(buf, Span::between(self.mark, p));
                StatusStart
            }
            StatusStart if b.is_ascii_digit() => {
                self.mark = p;
                Status
            }
            Status => match b {
                b'0'..=b'9' => Status,
                b' ' => {
                    sink.status_code(buf, Span::between(self.mark, p));
                    ReasonStart
                }
                b'\r' => {
                    sink.status_code(buf, Span::between(self.mark, p));
                    sink.reason_phrase(buf, Span::new(p, 0));
                    StatusLineLf
                }
                _ => Error,
            },
            ReasonStart if b == b'\r' => {
                sink.reason_phrase(buf, Span::new(p, 0));
                StatusLineLf
            }
            ReasonStart => {
                self.mark = p;
                Reason
            }
            Reason if b == b'\r' => {
                sink.reason_phrase(buf, Span::between(self.mark, p));
                StatusLineLf
            }
            Reason => Reason,
            StatusLineLf if b == b'\n' => LineStart,

            // Header and trailer fields
            LineStart => match b {
                b'\r' => {
                    self.emit_field(buf, sink);
                    HeadersLf
                }
                _ if is_ws(b) => {
                    if self.field_pending {
                        Value
                    } else {
                        Error
                    }
                }
                _ if is_token(b) => {
                    self.emit_field(buf, sink);
                    self.field_start = p;
                    FieldName
                }
                _ => Error,
            },
            FieldName if is_token(b) => FieldName,
            FieldName if b == b':' => {
                self.field_len = p - self.field_start;
                ValueStart
            }
            ValueStart if is_ws(b) => ValueStart,
            ValueStart if b == b'\r' => {
                self.mark = p;
                self.close_value(p)
            }
            ValueStart => {
                self.mark = p;
                Value
            }
            Value if b == b'\r' => self.close_value(p),
            Value => Value,
            FieldLf if b == b'\n' => LineStart,
            HeadersLf if b == b'\n' => self.head_complete(buf, len, p, sink),

            // Chunk-size line
            ChunkSize => match b {
                _ if b.is_ascii_hexdigit() => {
                    self.zero_chunk &= b == b'0';
                    ChunkSize
                }
                b';' => {
                    sink.chunk_size(buf, Span::between(self.mark, p));
                    ExtStart
                }
                b'\r' => {
                    sink.chunk_size(buf, Span::between(self.mark, p));
                    ChunkLineLf
                }
                _ => Error,
            },
            ExtStart if is_token(b) => {
                self.field_start = p;
                ExtName
            }
            ExtName => match b {
                _ if is_token(b) => ExtName,
                b'=' => {
                    self.field_len = p - self.field_start;
                    ExtValueStart
                }
                b';' => {
                    sink.chunk_extension(buf, Span::between(self.field_start, p), None);
                    ExtStart
                }
                b'\r' => {
                    sink.chunk_extension(buf, Span::between(self.field_start, p), None);
                    ChunkLineLf
                }
                _ => Error,
            },
            ExtValueStart if is_token(b) => {
                self.mark = p;
                ExtValue
            }
            ExtValue => match b {
                _ if is_token(b) => ExtValue,
                b';' => {
                    self.emit_extension(buf, p, sink);
                    ExtStart
                }
                b'\r' => {
                    self.emit_extension(buf, p, sink);
                    ChunkLineLf
                }
                _ => Error,
            },
            ChunkLineLf if b == b'\n' => {
                if self.zero_chunk {
                    sink.last_chunk();
                    LineStart
                } else {
                    self.head_complete(buf, len, p, sink)
                }
            }
            EmptyChunkLf if b == b'\n' => {
                sink.last_chunk();
                self.head_complete(buf, len, p, sink)
            }

            _ => Error,
        }
    }

    /// CR ending a physical value line. Emission waits for the next line's first byte,
    /// which decides whether the value is folded.
    fn close_value(&mut self, p: usize) -> ParseState {
        self.value_end = p;
        self.field_pending = true;
        ParseState::FieldLf
    }

    fn emit_field<S: ResponseSink + ?Sized>(&mut self, buf: &[u8], sink: &mut S) {
        if self.field_pending {
            self.field_pending = false;
            sink.http_field(
                buf,
                Span::new(self.field_start, self.field_len),
                Span::between(self.mark, self.value_end),
            );
        }
    }

    fn emit_extension<S: ResponseSink + ?Sized>(&mut self, buf: &[u8], p: usize, sink: &mut S) {
        sink.chunk_extension(
            buf,
            Span::new(self.field_start, self.field_len),
            Some(Span::between(self.mark, p)),
        );
    }

    /// LF of the terminating line at `p`.
    fn head_complete<S: ResponseSink + ?Sized>(
        &mut self,
        buf: &[u8],
        len: usize,
        p: usize,
        sink: &mut S,
    ) -> ParseState {
        self.body_start = p + 1;
        sink.header_done(buf, Span::between(p + 1, len));
        ParseState::Finished
    }
}

impl Default for ResponseParser {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::http::h1::unfold;

    #[derive(Debug, Clone, PartialEq, Eq)]
    enum Event {
        Version(String),
        Status(String),
        Reason(String),
        Field(String, String),
        ChunkSize(String),
        Extension(String, Option<String>),
        LastChunk,
        /// Offset and length of the bytes after the head.
        HeaderDone(usize, usize),
    }

    #[derive(Default)]
    struct Recorder {
        events: Vec<Event>,
    }

    fn text(buf: &[u8], span: Span) -> String {
        String::from_utf8_lossy(span.of(buf)).into_owned()
    }

    impl ResponseSink for Recorder {
        fn http_version(&mut self, buf: &[u8], version: Span) {
            self.events.push(Event::Version(text(buf, version)));
        }
        fn status_code(&mut self, buf: &[u8], code: Span) {
            self.events.push(Event::Status(text(buf, code)));
        }
        fn reason_phrase(&mut self, buf: &[u8], reason: Span) {
            self.events.push(Event::Reason(text(buf, reason)));
        }
        fn http_field(&mut self, buf: &[u8], name: Span, value: Span) {
            self.events
                .push(Event::Field(text(buf, name), text(buf, value)));
        }
        fn chunk_size(&mut self, buf: &[u8], size: Span) {
            self.events.push(Event::ChunkSize(text(buf, size)));
        }
        fn chunk_extension(&mut self, buf: &[u8], name: Span, value: Option<Span>) {
            self.events
                .push(Event::Extension(text(buf, name), value.map(|v| text(buf, v))));
        }
        fn last_chunk(&mut self) {
            self.events.push(Event::LastChunk);
        }
        fn header_done(&mut self, _buf: &[u8], rest: Span) {
            self.events.push(Event::HeaderDone(rest.offset, rest.len));
        }
    }

    fn parse_all(input: &[u8]) -> (ResponseParser, Vec<Event>) {
        let mut parser = ResponseParser::new();
        let mut sink = Recorder::default();
        parser.execute(input, 0, &mut sink).unwrap();
        (parser, sink.events)
    }

    fn field(name: &str, value: &str) -> Event {
        Event::Field(name.to_string(), value.to_string())
    }

    #[test]
    fn simple_response() {
        let input = b"HTTP/1.1 200 OK\r\nContent-Type: text/plain\r\n\r\n";
        let (parser, events) = parse_all(input);
        assert_eq!(
            events,
            vec![
                Event::Version("1.1".into()),
                Event::Status("200".into()),
                Event::Reason("OK".into()),
                field("Content-Type", "text/plain"),
                Event::HeaderDone(input.len(), 0),
            ]
        );
        assert_eq!(parser.body_start(), Some(input.len()));
        assert_eq!(parser.nread(), input.len());
        assert_eq!(parser.finish(), FinishResult::Complete);
        assert!(parser.is_finished());
        assert!(!parser.has_error());
    }

    #[test]
    fn split_inside_reason_phrase() {
        let input = b"HTTP/1.1 200 OK\r\nContent-Type: text/plain\r\n\r\n";
        let (_, whole) = parse_all(input);

        let mut parser = ResponseParser::new();
        let mut sink = Recorder::default();
        let cut = b"HTTP/1.1 200 O".len();
        let n = parser.feed(input, cut, 0, &mut sink).unwrap();
        assert_eq!(n, cut);
        assert_eq!(parser.finish(), FinishResult::Incomplete);
        let n = parser.feed(input, input.len(), n, &mut sink).unwrap();
        assert_eq!(n, input.len());
        assert_eq!(sink.events, whole);
    }

    #[test]
    fn no_headers() {
        let input = b"HTTP/1.0 500 Error\r\n\r\n";
        let (parser, events) = parse_all(input);
        assert_eq!(
            events,
            vec![
                Event::Version("1.0".into()),
                Event::Status("500".into()),
                Event::Reason("Error".into()),
                Event::HeaderDone(input.len(), 0),
            ]
        );
        assert_eq!(parser.body_start(), Some(input.len()));
    }

    #[test]
    fn every_split_point_gives_same_events() {
        let input: &[u8] = b"HTTP/1.1 404 Not Found\r\n\
            Server: test\r\n\
            X-Empty:\r\n\
            X-Folded: first\r\n second\r\n\
            Set-Cookie: a=1\r\n\
            Set-Cookie: b=2\r\n\
            \r\n";
        let (_, whole) = parse_all(input);
        for cut in 0..=input.len() {
            let mut parser = ResponseParser::new();
            let mut sink = Recorder::default();
            let n = parser.feed(input, cut, 0, &mut sink).unwrap();
            assert_eq!(n, cut, "split at {}", cut);
            if !parser.is_finished() {
                parser.feed(input, input.len(), n, &mut sink).unwrap();
            }
            assert_eq!(sink.events, whole, "split at {}", cut);
        }
    }

    #[test]
    fn byte_at_a_time() {
        let input = b"HTTP/1.1 200 OK\r\nA: 1\r\nB:  2 \r\n\r\n";
        let (_, whole) = parse_all(input);
        let mut parser = ResponseParser::new();
        let mut sink = Recorder::default();
        let mut off = 0;
        for len in 1..=input.len() {
            off = parser.feed(input, len, off, &mut sink).unwrap();
        }
        assert_eq!(sink.events, whole);
        assert_eq!(
            sink.events[4],
            field("B", "2 "),
            "leading whitespace skipped, trailing kept"
        );
    }

    #[test]
    fn stops_at_body() {
        let input = b"HTTP/1.1 200 OK\r\nContent-Length: 5\r\n\r\nhello";
        let (mut parser, events) = parse_all(input);
        let head = input.len() - 5;
        assert_eq!(events.last(), Some(&Event::HeaderDone(head, 5)));
        assert_eq!(parser.nread(), head);
        assert_eq!(parser.body_start(), Some(head));

        let mut sink = Recorder::default();
        let err = parser.execute(input, head, &mut sink).unwrap_err();
        assert_eq!(err, ParserError::AlreadyFinished { body_start: head });
        assert!(sink.events.is_empty());
    }

    #[test]
    fn empty_value_is_zero_length_at_cr() {
        let input = b"HTTP/1.1 200 OK\r\nX-Empty:\r\nX-Spaces:   \r\n\r\n";
        let mut parser = ResponseParser::new();
        let mut spans = Vec::new();
        struct Spans<'a>(&'a mut Vec<(Span, Span)>);
        impl ResponseSink for Spans<'_> {
            fn http_version(&mut self, _: &[u8], _: Span) {}
            fn status_code(&mut self, _: &[u8], _: Span) {}
            fn reason_phrase(&mut self, _: &[u8], _: Span) {}
            fn http_field(&mut self, _: &[u8], name: Span, value: Span) {
                self.0.push((name, value));
            }
            fn chunk_size(&mut self, _: &[u8], _: Span) {}
            fn last_chunk(&mut self) {}
            fn header_done(&mut self, _: &[u8], _: Span) {}
        }
        parser.execute(input, 0, &mut Spans(&mut spans)).unwrap();
        assert_eq!(spans.len(), 2);
        assert_eq!(spans[0].0, Span::new(17, 7));
        assert_eq!(spans[0].1, Span::new(25, 0));
        assert_eq!(input[25], b'\r');
        assert!(spans[1].1.is_empty());
        assert_eq!(input[spans[1].1.offset], b'\r');
    }

    #[test]
    fn folded_value_is_one_field() {
        let input = b"HTTP/1.1 200 OK\r\nX-Long: part one\r\n\tpart two\r\nNext: v\r\n\r\n";
        let (_, events) = parse_all(input);
        let fields: Vec<_> = events
            .iter()
            .filter(|e| matches!(e, Event::Field(..)))
            .collect();
        assert_eq!(fields.len(), 2);
        match fields[0] {
            Event::Field(name, value) => {
                assert_eq!(name, "X-Long");
                assert_eq!(value, "part one\r\n\tpart two");
                assert_eq!(&*unfold(value.as_bytes()), b"part one part two");
            }
            _ => unreachable!(),
        }
        assert_eq!(fields[1], &field("Next", "v"));
    }

    #[test]
    fn folded_last_field_before_blank_line() {
        let input = b"HTTP/1.1 200 OK\r\nA: x\r\n y\r\n  z\r\n\r\n";
        let (parser, events) = parse_all(input);
        assert!(parser.is_finished());
        assert_eq!(events[3], field("A", "x\r\n y\r\n  z"));
    }

    #[test]
    fn continuation_without_field_is_error() {
        let (parser, events) = parse_all(b"HTTP/1.1 200 OK\r\n folded\r\n\r\n");
        assert!(parser.has_error());
        assert_eq!(parser.nread(), 17);
        assert_eq!(events.len(), 3);
    }

    #[test]
    fn names_keep_their_case() {
        let (_, events) = parse_all(b"HTTP/1.1 200 OK\r\ncOnTeNt-LeNgTh: 0\r\n\r\n");
        assert_eq!(events[3], field("cOnTeNt-LeNgTh", "0"));
    }

    #[test]
    fn bare_cr_is_error_and_sticky() {
        let input = b"HTTP/1.1 200 OK\r\nA: 1\rB: 2\r\n\r\n";
        let (mut parser, events) = parse_all(input);
        assert!(parser.has_error());
        assert_eq!(parser.finish(), FinishResult::Error);
        // Stopped on the byte after the lone CR.
        assert_eq!(parser.nread(), 22);
        assert_eq!(events.len(), 3);

        let mut sink = Recorder::default();
        let n = parser.execute(input, 22, &mut sink).unwrap();
        assert_eq!(n, 22);
        // Even a bogus offset is ignored once in the error state.
        let n = parser.execute(input, 0, &mut sink).unwrap();
        assert_eq!(n, 22);
        assert!(sink.events.is_empty());
        assert!(parser.has_error());
    }

    #[test]
    fn bare_lf_is_error() {
        let (parser, _) = parse_all(b"HTTP/1.1 200 OK\r\nA: 1\r\n\n");
        assert!(parser.has_error());
        assert_eq!(parser.nread(), 23);

        let (parser, _) = parse_all(b"5\n");
        assert!(parser.has_error());
        assert_eq!(parser.nread(), 1);
    }

    #[test]
    fn bad_status_lines() {
        for input in [
            &b"HTTQ/1.1 200 OK\r\n"[..],
            b"HTTP/x.1 200 OK\r\n",
            b"HTTP/1. 200 OK\r\n",
            b"HTTP/1.1  200 OK\r\n",
            b"HTTP/1.1 2x0 OK\r\n",
            b"http/1.1 200 OK\r\n",
            b"GET / HTTP/1.1\r\n",
        ] {
            let (parser, _) = parse_all(input);
            assert!(parser.has_error(), "{:?}", String::from_utf8_lossy(input));
        }
    }

    #[test]
    fn missing_or_empty_reason() {
        let (_, events) = parse_all(b"HTTP/1.1 204\r\n\r\n");
        assert_eq!(events[1], Event::Status("204".into()));
        assert_eq!(events[2], Event::Reason(String::new()));

        let (_, events) = parse_all(b"HTTP/1.1 200 \r\n\r\n");
        assert_eq!(events[2], Event::Reason(String::new()));
    }

    #[test]
    fn reason_accepts_any_byte_but_cr() {
        let (_, events) = parse_all(b"HTTP/1.1 418 I'm a teapot (\xff)\r\n\r\n");
        assert_eq!(events[2], Event::Reason("I'm a teapot (\u{fffd})".into()));
    }

    #[test]
    fn bad_field_names() {
        for input in [
            &b"HTTP/1.1 200 OK\r\nBad Name: v\r\n\r\n"[..],
            b"HTTP/1.1 200 OK\r\n: v\r\n\r\n",
            b"HTTP/1.1 200 OK\r\nName\r\n\r\n",
            b"HTTP/1.1 200 OK\r\n(x): v\r\n\r\n",
        ] {
            let (parser, _) = parse_all(input);
            assert!(parser.has_error(), "{:?}", String::from_utf8_lossy(input));
        }
    }

    #[test]
    fn chunk_size_line() {
        let input = b"1a\r\nabcdefghijklmnopqrstuvwxyz\r\n";
        let (parser, events) = parse_all(input);
        assert_eq!(
            events,
            vec![Event::ChunkSize("1a".into()), Event::HeaderDone(4, 28)]
        );
        assert_eq!(parser.body_start(), Some(4));
        assert_eq!(parser.nread(), 4);
    }

    #[test]
    fn zero_chunk_then_blank_line() {
        let input = b"0\r\n\r\n";
        let (parser, events) = parse_all(input);
        assert_eq!(
            events,
            vec![
                Event::ChunkSize("0".into()),
                Event::LastChunk,
                Event::HeaderDone(5, 0),
            ]
        );
        assert_eq!(parser.body_start(), Some(5));
    }

    #[test]
    fn zero_chunk_waits_for_trailer_block() {
        let (parser, events) = parse_all(b"000\r\n");
        assert!(!parser.is_finished());
        assert_eq!(events, vec![Event::ChunkSize("000".into()), Event::LastChunk]);
    }

    #[test]
    fn zero_chunk_with_trailers() {
        let input = b"0\r\nExpires: never\r\nX-Sum: 1\r\n\r\n";
        let (parser, events) = parse_all(input);
        assert_eq!(
            events,
            vec![
                Event::ChunkSize("0".into()),
                Event::LastChunk,
                field("Expires", "never"),
                field("X-Sum", "1"),
                Event::HeaderDone(input.len(), 0),
            ]
        );
        assert_eq!(parser.body_start(), Some(input.len()));
    }

    #[test]
    fn chunk_extensions() {
        let input = b"5;name=val;flag\r\nhello";
        let (parser, events) = parse_all(input);
        assert_eq!(
            events,
            vec![
                Event::ChunkSize("5".into()),
                Event::Extension("name".into(), Some("val".into())),
                Event::Extension("flag".into(), None),
                Event::HeaderDone(17, 5),
            ]
        );
        assert_eq!(parser.body_start(), Some(17));
    }

    #[test]
    fn zero_chunk_with_extension_is_last() {
        let (_, events) = parse_all(b"0;x=1\r\n\r\n");
        assert_eq!(events[2], Event::LastChunk);
    }

    #[test]
    fn nonzero_with_leading_zero_is_not_last() {
        let (_, events) = parse_all(b"010\r\n");
        assert_eq!(events, vec![Event::ChunkSize("010".into()), Event::HeaderDone(5, 0)]);
    }

    #[test]
    fn bad_chunk_lines() {
        for input in [&b"1g\r\n"[..], b"5;\r\n", b"5;a=\r\n", b"5 \r\n", b";a\r\n", b"5\r\r"] {
            let (parser, _) = parse_all(input);
            assert!(parser.has_error(), "{:?}", String::from_utf8_lossy(input));
        }
    }

    #[test]
    fn empty_first_line_is_last_chunk() {
        let (parser, events) = parse_all(b"\r\n");
        assert_eq!(events, vec![Event::LastChunk, Event::HeaderDone(2, 0)]);
        assert_eq!(parser.finish(), FinishResult::Complete);
    }

    #[test]
    fn reset_allows_reuse() {
        let a = b"HTTP/1.1 301 Moved\r\nLocation: /x\r\n\r\nbody";
        let b = b"HTTP/1.0 200 OK\r\nA: b\r\n\r\n";
        let (_, fresh) = parse_all(b);

        let mut parser = ResponseParser::new();
        let mut sink = Recorder::default();
        parser.execute(a, 0, &mut sink).unwrap();
        assert!(parser.is_finished());
        parser.reset();
        parser.reset();
        let mut sink = Recorder::default();
        parser.execute(b, 0, &mut sink).unwrap();
        assert_eq!(sink.events, fresh);
        assert_eq!(parser.body_start(), Some(b.len()));
    }

    #[test]
    fn reset_clears_error() {
        let (mut parser, _) = parse_all(b"junk");
        assert!(parser.has_error());
        parser.reset();
        assert_eq!(parser.state(), ParseState::Start);
        assert_eq!(parser.nread(), 0);
        assert_eq!(parser.finish(), FinishResult::Incomplete);
    }

    #[test]
    fn contract_violations() {
        let input = b"HTTP/1.1 200 OK\r\n";
        let mut parser = ResponseParser::new();
        let mut sink = Recorder::default();
        assert_eq!(
            parser.feed(input, input.len() + 1, 0, &mut sink),
            Err(ParserError::LengthPastBuffer {
                len: input.len() + 1,
                available: input.len()
            })
        );
        assert_eq!(
            parser.feed(input, 4, 5, &mut sink),
            Err(ParserError::OffsetPastEnd { offset: 5, len: 4 })
        );
        assert_eq!(parser.feed(input, 5, 0, &mut sink), Ok(5));
        assert_eq!(
            parser.feed(input, 10, 3, &mut sink),
            Err(ParserError::OffsetMismatch { offset: 3, nread: 5 })
        );
        assert_eq!(parser.nread(), 5);
        assert!(sink.events.is_empty());
    }

    #[test]
    fn empty_feed_is_noop() {
        let mut parser = ResponseParser::new();
        let mut sink = Recorder::default();
        assert_eq!(parser.execute(b"", 0, &mut sink), Ok(0));
        assert_eq!(parser.state(), ParseState::Start);
        assert_eq!(parser.finish(), FinishResult::Incomplete);
        assert_eq!(parser.body_start(), None);
    }
}
