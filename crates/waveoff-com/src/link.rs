use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use futures_util::stream::{SplitSink, SplitStream};
use futures_util::{SinkExt, StreamExt};
use tokio::net::TcpStream;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::timeout;
use tokio_websockets::{ClientBuilder, MaybeTlsStream, Message, WebSocketStream};
use waveoff_frame::EncodedPayload;

use crate::{ComError, LinkConfig};

type WsSink = SplitSink<WebSocketStream<MaybeTlsStream<TcpStream>>, Message>;
type WsStream = SplitStream<WebSocketStream<MaybeTlsStream<TcpStream>>>;

/// Inbound messages buffered between the reader task and the consumer.
const INCOMING_BUFFER: usize = 32;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConnectionState {
    Disconnected,
    Connecting,
    Open,
    Closing,
}

/// One logical connection to the recognition service.
///
/// `WsLink` is the single owner of the connection state: the send path calls
/// `connect`/`send`/`disconnect` on it, while inbound text frames arrive on
/// the `mpsc` receiver handed out by [`WsLink::new`], fed by a per-connection
/// reader task. A connection lost mid-stream is noticed on the next `send`,
/// which reconnects; there is no background retry loop.
pub struct WsLink {
    config: LinkConfig,
    state: ConnectionState,
    sink: Option<WsSink>,
    reader_task: Option<JoinHandle<()>>,
    reader_alive: Arc<AtomicBool>,
    incoming_tx: mpsc::Sender<String>,
    connect_count: u64,
}

impl WsLink {
    /// Create an unconnected link and the receiver for inbound messages.
    pub fn new(config: LinkConfig) -> (Self, mpsc::Receiver<String>) {
        let (incoming_tx, incoming_rx) = mpsc::channel(INCOMING_BUFFER);
        let link = WsLink {
            config,
            state: ConnectionState::Disconnected,
            sink: None,
            reader_task: None,
            reader_alive: Arc::new(AtomicBool::new(false)),
            incoming_tx,
            connect_count: 0,
        };
        (link, incoming_rx)
    }

    pub fn config(&self) -> &LinkConfig {
        &self.config
    }

    /// Current connection state. A connection whose reader task has observed
    /// a close or a mid-stream error reports `Disconnected`.
    pub fn state(&self) -> ConnectionState {
        match self.state {
            ConnectionState::Open if !self.reader_alive.load(Ordering::Acquire) => {
                ConnectionState::Disconnected
            }
            state => state,
        }
    }

    /// Number of successful connects over the lifetime of this link.
    pub fn connect_count(&self) -> u64 {
        self.connect_count
    }

    /// Establish the connection. No-op while already open.
    ///
    /// Bounded by the configured connect timeout. On any failure the state
    /// reverts to `Disconnected` and the next `send` will try again.
    pub async fn connect(&mut self) -> Result<(), ComError> {
        self.sweep();
        if self.state == ConnectionState::Open {
            return Ok(());
        }

        self.state = ConnectionState::Connecting;
        let url = self.config.url();
        let uri: http::Uri = match url.parse() {
            Ok(uri) => uri,
            Err(err) => {
                self.state = ConnectionState::Disconnected;
                return Err(ComError::InvalidUri(format!("{url}: {err}")));
            }
        };

        match timeout(
            self.config.connect_timeout(),
            ClientBuilder::from_uri(uri).connect(),
        )
        .await
        {
            Ok(Ok((stream, _response))) => {
                let (sink, stream) = stream.split();
                let alive = Arc::new(AtomicBool::new(true));
                let task = tokio::spawn(read_loop(
                    stream,
                    self.incoming_tx.clone(),
                    Arc::clone(&alive),
                ));

                self.sink = Some(sink);
                self.reader_task = Some(task);
                self.reader_alive = alive;
                self.state = ConnectionState::Open;
                self.connect_count += 1;
                log::info!("connected to {url}");
                Ok(())
            }
            Ok(Err(err)) => {
                self.state = ConnectionState::Disconnected;
                log::warn!("connect to {url} failed: {err}");
                Err(err.into())
            }
            Err(_) => {
                self.state = ConnectionState::Disconnected;
                let after = self.config.connect_timeout();
                log::warn!("connect to {url} timed out after {after:?}");
                Err(ComError::Timeout {
                    op: "connect",
                    after,
                })
            }
        }
    }

    /// Push one encoded frame onto the wire as a text message.
    ///
    /// Takes the payload by value; at camera cadence the ~147 KB base64
    /// string moves into the message rather than being copied. Connects
    /// first if the link is not open. Bounded by the configured send
    /// timeout; a failed or timed-out send tears the connection down so the
    /// next call starts fresh. Frame loss is acceptable — the caller logs
    /// the error and moves on to the next frame.
    pub async fn send(&mut self, payload: EncodedPayload) -> Result<(), ComError> {
        self.sweep();
        if self.state != ConnectionState::Open {
            self.connect().await?;
        }

        let sink = self.sink.as_mut().ok_or(ComError::ConnectionClosed)?;
        let seq = payload.seq;
        let message = Message::text(payload.text);

        match timeout(self.config.send_timeout(), sink.send(message)).await {
            Ok(Ok(())) => Ok(()),
            Ok(Err(err)) => {
                log::warn!("send of frame {seq} failed: {err}");
                self.drop_connection();
                Err(err.into())
            }
            Err(_) => {
                let after = self.config.send_timeout();
                log::warn!("send of frame {seq} timed out after {after:?}");
                self.drop_connection();
                Err(ComError::Timeout { op: "send", after })
            }
        }
    }

    /// Close the connection and release its resources. Idempotent, safe to
    /// call at any time; a later `send` reconnects transparently.
    pub async fn disconnect(&mut self) {
        if self.sink.is_none() && self.reader_task.is_none() {
            self.state = ConnectionState::Disconnected;
            return;
        }

        self.state = ConnectionState::Closing;
        if let Some(mut sink) = self.sink.take() {
            // Best-effort close frame; the connection is going away anyway.
            let _ = sink.close().await;
        }
        if let Some(task) = self.reader_task.take() {
            task.abort();
        }
        self.state = ConnectionState::Disconnected;
        log::debug!("link disconnected");
    }

    /// Fold a reader-observed close or error into the owned state.
    fn sweep(&mut self) {
        if self.state == ConnectionState::Open && !self.reader_alive.load(Ordering::Acquire) {
            log::debug!("peer closed the stream; link marked disconnected");
            self.drop_connection();
        }
    }

    fn drop_connection(&mut self) {
        self.sink = None;
        if let Some(task) = self.reader_task.take() {
            task.abort();
        }
        self.state = ConnectionState::Disconnected;
    }
}

impl Drop for WsLink {
    fn drop(&mut self) {
        if let Some(task) = self.reader_task.take() {
            task.abort();
        }
    }
}

/// Per-connection reader: forwards inbound text frames to the consumer.
///
/// Runs until the peer closes, the stream errors, or the consumer drops the
/// receiver. Binary and control frames are ignored.
async fn read_loop(mut stream: WsStream, incoming: mpsc::Sender<String>, alive: Arc<AtomicBool>) {
    loop {
        match stream.next().await {
            Some(Ok(message)) => {
                if let Some(text) = message.as_text() {
                    if incoming.send(text.to_string()).await.is_err() {
                        // Consumer gone; nothing left to deliver to.
                        break;
                    }
                }
            }
            Some(Err(err)) => {
                log::warn!("stream error: {err}");
                break;
            }
            None => {
                log::debug!("server closed the stream");
                break;
            }
        }
    }
    alive.store(false, Ordering::Release);
}
