use std::sync::Arc;
use std::time::Duration;

use bytes::{Bytes, BytesMut};
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite};
use tokio::time::timeout;
use tracing::debug;

use crate::config::ServerConfig;
use crate::http::parser::find_headers_end;
use crate::http::writer::ResponseWriter;
use crate::site::Dispatcher;

/// Transport limits for one connection.
#[derive(Debug, Clone, Copy)]
pub struct ConnectionSettings {
    pub read_timeout: Duration,
    pub max_request_bytes: usize,
}

impl Default for ConnectionSettings {
    fn default() -> Self {
        Self::from(&ServerConfig::default())
    }
}

impl From<&ServerConfig> for ConnectionSettings {
    fn from(cfg: &ServerConfig) -> Self {
        Self {
            read_timeout: Duration::from_secs(cfg.read_timeout_secs),
            max_request_bytes: cfg.max_request_bytes,
        }
    }
}

pub struct Connection<S> {
    stream: S,
    buffer: BytesMut,
    state: ConnectionState,
    dispatcher: Arc<Dispatcher>,
    settings: ConnectionSettings,
}

pub enum ConnectionState {
    Reading,
    Processing(Bytes),
    Writing(ResponseWriter, bool), // bool = keep_alive?
    Closed,
}

impl<S> Connection<S>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    pub fn new(stream: S, dispatcher: Arc<Dispatcher>, settings: ConnectionSettings) -> Self {
        Self {
            stream,
            buffer: BytesMut::with_capacity(4096),
            state: ConnectionState::Reading,
            dispatcher,
            settings,
        }
    }

    /// Serves requests until the peer goes away, a response asks for the
    /// connection to close, or the transport fails.
    pub async fn run(&mut self) -> anyhow::Result<()> {
        loop {
            match &mut self.state {
                ConnectionState::Reading => match self.read_request().await? {
                    Some(raw) => {
                        self.state = ConnectionState::Processing(raw);
                    }
                    None => {
                        self.state = ConnectionState::Closed;
                    }
                },

                ConnectionState::Processing(raw) => {
                    let (response, keep_alive) = self.dispatcher.handle_raw(raw).await;

                    let writer = ResponseWriter::new(&response);
                    self.state = ConnectionState::Writing(writer, keep_alive);
                }

                ConnectionState::Writing(writer, keep_alive) => {
                    writer.write_to_stream(&mut self.stream).await?;

                    if *keep_alive {
                        self.state = ConnectionState::Reading; // go back for next request
                    } else {
                        self.state = ConnectionState::Closed;
                    }
                }

                ConnectionState::Closed => {
                    break;
                }
            }
        }

        Ok(())
    }

    /// Reads up to and including the blank line ending the next request
    /// head.
    ///
    /// Returns `None` once the peer has closed cleanly or has stayed idle
    /// past the read timeout between requests. Bytes left over when
    /// the peer closes, or a head that outgrows `max_request_bytes`, are
    /// returned as they are so the dispatcher can reject them.
    pub async fn read_request(&mut self) -> anyhow::Result<Option<Bytes>> {
        loop {
            if let Some(end) = find_headers_end(&self.buffer) {
                return Ok(Some(self.buffer.split_to(end + 4).freeze()));
            }

            if self.buffer.len() > self.settings.max_request_bytes {
                return Ok(Some(self.buffer.split().freeze()));
            }

            let read = timeout(
                self.settings.read_timeout,
                self.stream.read_buf(&mut self.buffer),
            )
            .await;

            let n = match read {
                Ok(n) => n?,
                Err(_) if self.buffer.is_empty() => {
                    // idle keep-alive connection
                    debug!("Read timed out between requests, closing");
                    return Ok(None);
                }
                Err(_) => return Err(anyhow::anyhow!("read timed out mid-request")),
            };

            if n == 0 {
                // Client closed connection
                if self.buffer.is_empty() {
                    return Ok(None);
                }
                return Ok(Some(self.buffer.split().freeze()));
            }
        }
    }
}
