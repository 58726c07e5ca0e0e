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

//! Caller contract violations reported by `ResponseParser::feed`.
//!
//! Malformed input is not an error here: it moves the parser into its error state,
//! observable through `has_error()` / `finish()`.

/// The caller broke the feed contract; no bytes were consumed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ParserError {
    #[error("offset {offset} past end of input ({len})")]
    OffsetPastEnd { offset: usize, len: usize },

    #[error("declared length {len} exceeds buffer size {available}")]
    LengthPastBuffer { len: usize, available: usize },

    #[error("offset {offset} does not match bytes already parsed ({nread})")]
    OffsetMismatch { offset: usize, nread: usize },

    /// The header block is complete; the remaining bytes belong to the body.
    #[error("header block already complete (body starts at {body_start})")]
    AlreadyFinished { body_start: usize },
}
