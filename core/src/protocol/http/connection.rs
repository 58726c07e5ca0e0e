/*
 * connection.rs
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

//! HTTP/1.1 connection over an already-open async stream.

use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tracing::{debug, trace, warn};

use crate::config::ClientConfig;
use crate::protocol::http::error::ClientError;
use crate::protocol::http::handler::ResponseHandler;
use crate::protocol::http::reader::ResponseReader;
use crate::protocol::http::request::{Method, RequestBuilder};

/// One HTTP/1.1 connection. The caller opens the stream (plain TCP, TLS, an in-memory pipe);
/// the connection writes requests to it and reads responses back.
pub struct HttpConnection<S> {
    stream: S,
    host: String,
    port: u16,
    config: ClientConfig,
    reader: ResponseReader,
}

impl<S: AsyncRead + AsyncWrite + Unpin> HttpConnection<S> {
    pub fn new(stream: S, host: impl Into<String>, port: u16, config: ClientConfig) -> Self {
        let reader = ResponseReader::with_config(&config);
        Self {
            stream,
            host: host.into(),
            port,
            config,
            reader,
        }
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Build a request (method, path). Use send() to execute it with a handler.
    pub fn request(&self, method: Method, path: impl Into<String>) -> RequestBuilder {
        RequestBuilder::new(method, path)
    }

    /// Give back the underlying stream.
    pub fn into_inner(self) -> S {
        self.stream
    }

    /// Send the request and run the read loop until the response is complete. Handler is
    /// invoked as data arrives; on error it has already seen `failed`.
    pub async fn send<H: ResponseHandler + ?Sized>(
        &mut self,
        request: &RequestBuilder,
        handler: &mut H,
    ) -> Result<(), ClientError> {
        self.reader.reset();
        self.reader.set_head_request(request.method == Method::Head);

        if let Err(e) = self.write_request(request).await {
            warn!(host = %self.host, error = %e, "request write failed");
            handler.failed(&e);
            return Err(e);
        }

        let mut tmp = vec![0u8; self.config.read_buffer_size.max(1)];
        while !self.reader.is_finished() {
            let n = match self.read_some(&mut tmp).await {
                Ok(n) => n,
                Err(e) => {
                    warn!(host = %self.host, error = %e, "response read failed");
                    handler.failed(&e);
                    return Err(e);
                }
            };
            if n == 0 {
                trace!("end of stream");
                return self.reader.close(handler);
            }
            trace!(n, "read");
            self.reader.receive(&tmp[..n], handler)?;
        }
        debug!(host = %self.host, "exchange complete");
        Ok(())
    }

    async fn read_some(&mut self, tmp: &mut [u8]) -> Result<usize, ClientError> {
        match self.config.read_timeout() {
            Some(limit) => match tokio::time::timeout(limit, self.stream.read(tmp)).await {
                Ok(r) => Ok(r?),
                Err(_) => Err(ClientError::Timeout),
            },
            None => Ok(self.stream.read(tmp).await?),
        }
    }

    async fn write_request(&mut self, request: &RequestBuilder) -> Result<(), ClientError> {
        let out = request.encode(&self.host, self.port, &self.config)?;
        debug!(
            method = request.method.as_str(),
            target = %request.target(),
            bytes = out.len(),
            "sending request"
        );
        self.stream.write_all(&out).await?;
        self.stream.flush().await?;
        Ok(())
    }
}
