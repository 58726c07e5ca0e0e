/*
 * span.rs
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

//! Byte spans into the caller's buffer, plus the byte classes shared by the token scanners.

use std::borrow::Cow;

/// An (offset, length) pair identifying a run of bytes in the caller-owned buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Span {
    pub offset: usize,
    pub len: usize,
}

impl Span {
    pub fn new(offset: usize, len: usize) -> Self {
        Self { offset, len }
    }

    /// Span covering `[start, end)`.
    pub(crate) fn between(start: usize, end: usize) -> Self {
        debug_assert!(start <= end, "span start after end");
        Self {
            offset: start,
            len: end - start,
        }
    }

    /// Offset one past the last byte.
    pub fn end(&self) -> usize {
        self.offset + self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The bytes this span covers. Panics if the span lies outside `buf`;
    /// spans handed out by the parser never do for the buffer they were produced from.
    pub fn of<'a>(&self, buf: &'a [u8]) -> &'a [u8] {
        &buf[self.offset..self.end()]
    }
}

/// RFC 7230 `tchar`: alphanumerics plus ``!#$%&'*+-.^_`|~``.
pub fn is_token(b: u8) -> bool {
    matches!(b,
        b'a'..=b'z'
        | b'A'..=b'Z'
        | b'0'..=b'9'
        | b'!' | b'#' | b'$' | b'%' | b'&' | b'\'' | b'*'
        | b'+' | b'-' | b'.' | b'^' | b'_' | b'`' | b'|' | b'~')
}

pub(crate) fn is_ws(b: u8) -> bool {
    b == b' ' || b == b'\t'
}

/// Collapse obs-fold sequences (`CRLF 1*(SP / HT)`) in a raw field value into a single SP,
/// and trim surrounding whitespace. Returns the input unchanged when it holds no fold.
pub fn unfold(value: &[u8]) -> Cow<'_, [u8]> {
    let trimmed = trim_ws(value);
    if !trimmed.contains(&b'\r') {
        return Cow::Borrowed(trimmed);
    }
    let mut out = Vec::with_capacity(trimmed.len());
    let mut i = 0;
    while i < trimmed.len() {
        if trimmed[i] == b'\r' && i + 1 < trimmed.len() && trimmed[i + 1] == b'\n' {
            // Drop whitespace already emitted before the fold as well as after it.
            while out.last().is_some_and(|b| is_ws(*b)) {
                out.pop();
            }
            i += 2;
            while i < trimmed.len() && is_ws(trimmed[i]) {
                i += 1;
            }
            if !out.is_empty() && i < trimmed.len() {
                out.push(b' ');
            }
            continue;
        }
        out.push(trimmed[i]);
        i += 1;
    }
    Cow::Owned(out)
}

fn trim_ws(value: &[u8]) -> &[u8] {
    let start = value
        .iter()
        .position(|b| !is_ws(*b) && *b != b'\r' && *b != b'\n')
        .unwrap_or(value.len());
    let end = value
        .iter()
        .rposition(|b| !is_ws(*b) && *b != b'\r' && *b != b'\n')
        .map(|i| i + 1)
        .unwrap_or(start);
    &value[start..end.max(start)]
}
