use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::watch;
use waveoff_com::WsLink;
use waveoff_frame::{PlanarFrame, RawFrame, convert_to_bgr, encode};
use waveoff_gesture::{Decision, GestureTracker};

use crate::{ActionSink, FrameSource, PipelineConfig, SourceError};

/// Counters exposed for observability and test assertions.
pub struct PipelineMetrics {
    pub frames_in: AtomicU64,
    pub frames_converted: AtomicU64,
    pub convert_failures: AtomicU64,
    pub frames_sent: AtomicU64,
    pub send_failures: AtomicU64,
    pub messages_received: AtomicU64,
    pub actions_fired: AtomicU64,
    pub action_failures: AtomicU64,
}

impl PipelineMetrics {
    fn new() -> Self {
        Self {
            frames_in: AtomicU64::new(0),
            frames_converted: AtomicU64::new(0),
            convert_failures: AtomicU64::new(0),
            frames_sent: AtomicU64::new(0),
            send_failures: AtomicU64::new(0),
            messages_received: AtomicU64::new(0),
            actions_fired: AtomicU64::new(0),
            action_failures: AtomicU64::new(0),
        }
    }
}

/// Stops a running pipeline. Dropping the handle also stops it.
pub struct StopHandle {
    tx: watch::Sender<bool>,
}

impl StopHandle {
    pub fn stop(&self) {
        let _ = self.tx.send(true);
    }
}

/// The gesture pipeline actor.
///
/// `run` multiplexes two event sources in one loop: frames from the
/// [`FrameSource`] (convert → encode → send, every failure logged and the
/// frame dropped) and classification text from the transport's reader
/// (tracker → [`ActionSink`] on a confirmed gesture). Nothing escapes the
/// loop as a failure; the loop ends when the source closes or the
/// [`StopHandle`] fires.
pub struct Pipeline {
    config: PipelineConfig,
    metrics: Arc<PipelineMetrics>,
    shutdown_rx: watch::Receiver<bool>,
}

impl Pipeline {
    pub fn new(config: PipelineConfig) -> (Self, StopHandle) {
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let pipeline = Pipeline {
            config,
            metrics: Arc::new(PipelineMetrics::new()),
            shutdown_rx,
        };
        (pipeline, StopHandle { tx: shutdown_tx })
    }

    pub fn metrics(&self) -> Arc<PipelineMetrics> {
        Arc::clone(&self.metrics)
    }

    /// Drive the pipeline until the source closes or the stop handle fires.
    pub async fn run<S: FrameSource, A: ActionSink>(self, mut source: S, mut sink: A) {
        let (mut link, mut incoming) = WsLink::new(self.config.link().clone());
        let tracker = GestureTracker::new(self.config.trigger_labels().to_vec());
        let mut shutdown = self.shutdown_rx.clone();
        let mut next_seq: u64 = 0;

        log::info!(
            "pipeline started: {}x{} frames to {}",
            self.config.target_width(),
            self.config.target_height(),
            link.config().url()
        );

        loop {
            tokio::select! {
                biased;
                result = shutdown.changed() => {
                    if result.is_err() || *shutdown.borrow() {
                        log::info!("pipeline stop requested");
                        break;
                    }
                }
                frame = source.recv() => {
                    match frame {
                        Ok(frame) => {
                            self.metrics.frames_in.fetch_add(1, Ordering::Relaxed);
                            let seq = next_seq;
                            next_seq += 1;
                            self.process_frame(&mut link, frame, seq).await;
                        }
                        Err(SourceError::Closed) => {
                            log::info!("frame source closed");
                            break;
                        }
                        Err(err) => {
                            log::warn!("frame capture failed: {err}");
                        }
                    }
                }
                message = incoming.recv() => {
                    if let Some(text) = message {
                        self.metrics.messages_received.fetch_add(1, Ordering::Relaxed);
                        dispatch(&tracker, &mut sink, &text, &self.metrics).await;
                    }
                }
            }
        }

        link.disconnect().await;
        log::info!("pipeline stopped");
    }

    /// Convert, encode, and send one frame. Failures drop the frame.
    async fn process_frame(&self, link: &mut WsLink, frame: PlanarFrame, seq: u64) {
        let planes = frame.views();
        let raw = RawFrame {
            width: frame.width,
            height: frame.height,
            planes: &planes,
        };

        let packed = match convert_to_bgr(
            &raw,
            self.config.target_width(),
            self.config.target_height(),
        ) {
            Ok(packed) => packed.with_seq(seq),
            Err(err) => {
                self.metrics.convert_failures.fetch_add(1, Ordering::Relaxed);
                log::warn!("dropping frame {seq}: {err}");
                return;
            }
        };
        self.metrics.frames_converted.fetch_add(1, Ordering::Relaxed);

        let payload = encode(&packed);
        match link.send(payload).await {
            Ok(()) => {
                self.metrics.frames_sent.fetch_add(1, Ordering::Relaxed);
            }
            Err(err) => {
                self.metrics.send_failures.fetch_add(1, Ordering::Relaxed);
                log::warn!("frame {seq} not sent: {err}");
            }
        }
    }
}

/// Feed one inbound message through the tracker, firing the sink on a
/// confirmed gesture. Sink failures are logged, never retried.
async fn dispatch<A: ActionSink>(
    tracker: &GestureTracker,
    sink: &mut A,
    text: &str,
    metrics: &PipelineMetrics,
) {
    match tracker.on_message(text) {
        Decision::Confirmed(label) => {
            log::info!("gesture {label:?} confirmed; ending call");
            match sink.end_call().await {
                Ok(()) => {
                    metrics.actions_fired.fetch_add(1, Ordering::Relaxed);
                }
                Err(err) => {
                    metrics.action_failures.fetch_add(1, Ordering::Relaxed);
                    log::warn!("end call failed: {err}");
                }
            }
        }
        Decision::NoAction => {}
    }
}
