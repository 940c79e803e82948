use std::collections::VecDeque;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use futures_util::{SinkExt, StreamExt};
use tokio::net::TcpListener;
use tokio::sync::mpsc;
use tokio::time::{sleep, timeout};
use tokio_websockets::{Message, ServerBuilder};
use waveoff_com::LinkConfig;
use waveoff_frame::{PlanarFrame, decode};
use waveoff_pipeline::{
    ActionError, ActionSink, FrameSource, Pipeline, PipelineConfig, SlotSource, SourceError,
};

/// Stand-in recognition service: counts nothing, forwards every received
/// text frame, and answers each one with the next scripted reply (if any).
async fn spawn_service(replies: Vec<String>) -> (SocketAddr, mpsc::Receiver<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind failed");
    let addr = listener.local_addr().expect("local_addr failed");
    let (received_tx, received_rx) = mpsc::channel(64);
    let replies = Arc::new(Mutex::new(VecDeque::from(replies)));

    tokio::spawn(async move {
        loop {
            let Ok((stream, _)) = listener.accept().await else {
                break;
            };
            let received_tx = received_tx.clone();
            let replies = Arc::clone(&replies);
            tokio::spawn(async move {
                let Ok((_request, mut ws)) = ServerBuilder::new().accept(stream).await else {
                    return;
                };
                while let Some(Ok(message)) = ws.next().await {
                    if let Some(text) = message.as_text() {
                        let _ = received_tx.send(text.to_string()).await;
                        let reply = replies.lock().expect("replies poisoned").pop_front();
                        if let Some(reply) = reply {
                            let _ = ws.send(Message::text(reply)).await;
                        }
                    }
                }
            });
        }
    });

    (addr, received_rx)
}

fn classification(current: &str, previous: &str, unchanged: u64) -> String {
    format!(
        r#"{{"result":{{"hand_sign":"{current}"}},"previous_result":{{"hand_sign":"{previous}"}},"unchanged_count":{unchanged}}}"#
    )
}

fn config_for(addr: SocketAddr) -> PipelineConfig {
    PipelineConfig::default().with_link(
        LinkConfig::default()
            .with_host(addr.ip().to_string())
            .with_port(addr.port()),
    )
}

/// 256x144 4:2:0 frame with a constant luma value.
fn test_frame(luma: u8) -> PlanarFrame {
    PlanarFrame::yuv420(
        256,
        144,
        vec![luma; 256 * 144],
        vec![128; 128 * 72],
        vec![128; 128 * 72],
    )
}

/// Finite frame source: yields its frames, then reports Closed.
struct VecSource {
    frames: VecDeque<PlanarFrame>,
}

impl VecSource {
    fn new(frames: Vec<PlanarFrame>) -> Self {
        VecSource {
            frames: VecDeque::from(frames),
        }
    }
}

impl FrameSource for VecSource {
    async fn recv(&mut self) -> Result<PlanarFrame, SourceError> {
        self.frames.pop_front().ok_or(SourceError::Closed)
    }
}

/// Action sink counting end-call invocations.
#[derive(Clone, Default)]
struct CountingSink {
    calls: Arc<AtomicUsize>,
}

impl ActionSink for CountingSink {
    async fn end_call(&mut self) -> Result<(), ActionError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

#[tokio::test]
async fn five_frames_reach_the_service() {
    waveoff_base::init_stdout_logger();
    let (addr, mut received) = spawn_service(Vec::new()).await;

    let (pipeline, _stop) = Pipeline::new(config_for(addr));
    let metrics = pipeline.metrics();
    let frames: Vec<PlanarFrame> = (0..5).map(|i| test_frame(40 * i as u8 + 10)).collect();

    timeout(
        Duration::from_secs(10),
        pipeline.run(VecSource::new(frames), CountingSink::default()),
    )
    .await
    .expect("pipeline did not finish");

    let mut payloads = Vec::new();
    for _ in 0..5 {
        let text = timeout(Duration::from_secs(5), received.recv())
            .await
            .expect("recv timed out")
            .expect("service channel closed");
        payloads.push(text);
    }

    for payload in &payloads {
        assert!(!payload.is_empty());
        let bytes = decode(payload).expect("payload is not base64");
        assert_eq!(bytes.len(), 256 * 144 * 3);
    }
    // Distinct luma per frame means distinct payloads.
    for pair in payloads.windows(2) {
        assert_ne!(pair[0], pair[1]);
    }

    assert_eq!(metrics.frames_in.load(Ordering::Relaxed), 5);
    assert_eq!(metrics.frames_sent.load(Ordering::Relaxed), 5);
    assert_eq!(metrics.send_failures.load(Ordering::Relaxed), 0);
}

#[tokio::test]
async fn confirmed_gesture_ends_the_call_once() {
    let replies = vec![
        classification("Idle", "Idle", 0),
        classification("Idle", "Idle", 1),
        classification("Idle", "Open", 0),
    ];
    let (addr, _received) = spawn_service(replies).await;

    let (pipeline, stop) = Pipeline::new(config_for(addr));
    let metrics = pipeline.metrics();

    let (source, producer) = SlotSource::new();
    let sink = CountingSink::default();
    let calls = Arc::clone(&sink.calls);

    let run = tokio::spawn(pipeline.run(source, sink));

    // Feed frames at camera cadence until the gesture is confirmed.
    let feeder = tokio::spawn(async move {
        loop {
            producer.push(test_frame(90));
            sleep(Duration::from_millis(20)).await;
        }
    });

    timeout(Duration::from_secs(10), async {
        while metrics.actions_fired.load(Ordering::Relaxed) == 0 {
            sleep(Duration::from_millis(10)).await;
        }
    })
    .await
    .expect("gesture never confirmed");

    // The scripted replies are exhausted; no further message can re-fire.
    sleep(Duration::from_millis(200)).await;
    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert_eq!(metrics.actions_fired.load(Ordering::Relaxed), 1);
    assert!(metrics.messages_received.load(Ordering::Relaxed) >= 3);

    stop.stop();
    timeout(Duration::from_secs(5), run)
        .await
        .expect("pipeline did not stop")
        .expect("pipeline task panicked");
    feeder.abort();
}

#[tokio::test]
async fn send_failures_do_not_stop_the_pipeline() {
    // A port with nothing listening behind it.
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind failed");
    let addr = listener.local_addr().expect("local_addr failed");
    drop(listener);

    let config = PipelineConfig::default().with_link(
        LinkConfig::default()
            .with_host(addr.ip().to_string())
            .with_port(addr.port())
            .with_connect_timeout(Duration::from_millis(300)),
    );
    let (pipeline, _stop) = Pipeline::new(config);
    let metrics = pipeline.metrics();
    let frames = vec![test_frame(10), test_frame(20), test_frame(30)];

    timeout(
        Duration::from_secs(10),
        pipeline.run(VecSource::new(frames), CountingSink::default()),
    )
    .await
    .expect("pipeline did not finish");

    assert_eq!(metrics.frames_in.load(Ordering::Relaxed), 3);
    assert_eq!(metrics.frames_sent.load(Ordering::Relaxed), 0);
    assert_eq!(metrics.send_failures.load(Ordering::Relaxed), 3);
}

#[tokio::test]
async fn malformed_replies_never_fire_the_action() {
    let replies = vec![
        "not json".to_string(),
        r#"{"result":{"hand_sign":"Open"}}"#.to_string(),
        classification("Idle", "Idle", 0),
    ];
    let (addr, _received) = spawn_service(replies).await;

    let (pipeline, stop) = Pipeline::new(config_for(addr));
    let metrics = pipeline.metrics();

    let (source, producer) = SlotSource::new();
    let sink = CountingSink::default();
    let calls = Arc::clone(&sink.calls);

    let run = tokio::spawn(pipeline.run(source, sink));
    let feeder = tokio::spawn(async move {
        loop {
            producer.push(test_frame(50));
            sleep(Duration::from_millis(20)).await;
        }
    });

    timeout(Duration::from_secs(10), async {
        while metrics.messages_received.load(Ordering::Relaxed) < 3 {
            sleep(Duration::from_millis(10)).await;
        }
    })
    .await
    .expect("replies never arrived");

    assert_eq!(calls.load(Ordering::SeqCst), 0);
    assert_eq!(metrics.actions_fired.load(Ordering::Relaxed), 0);

    stop.stop();
    timeout(Duration::from_secs(5), run)
        .await
        .expect("pipeline did not stop")
        .expect("pipeline task panicked");
    feeder.abort();
}

#[tokio::test]
async fn failed_conversion_drops_the_frame_only() {
    let (addr, mut received) = spawn_service(Vec::new()).await;

    let (pipeline, _stop) = Pipeline::new(config_for(addr));
    let metrics = pipeline.metrics();

    // Second frame has a truncated luma plane and must be dropped.
    let mut bad = test_frame(60);
    bad.planes[0].data.truncate(100);
    let frames = vec![test_frame(10), bad, test_frame(30)];

    timeout(
        Duration::from_secs(10),
        pipeline.run(VecSource::new(frames), CountingSink::default()),
    )
    .await
    .expect("pipeline did not finish");

    assert_eq!(metrics.frames_in.load(Ordering::Relaxed), 3);
    assert_eq!(metrics.convert_failures.load(Ordering::Relaxed), 1);
    assert_eq!(metrics.frames_sent.load(Ordering::Relaxed), 2);

    for _ in 0..2 {
        let text = timeout(Duration::from_secs(5), received.recv())
            .await
            .expect("recv timed out")
            .expect("service channel closed");
        assert_eq!(decode(&text).expect("not base64").len(), 256 * 144 * 3);
    }
}
