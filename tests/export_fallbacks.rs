//! Integration tests for the export fallback chain: share, download,
//! clipboard, and the deferred idle reset. Time is paused so the 2.5 s
//! reset delay runs instantly.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use sharecard::compose::compose_card;
use sharecard::export::{export_card, ExportOptions, ATTRIBUTION_SUFFIX, DEFAULT_FILENAME};
use sharecard::platform::{
    ClipboardAccess, DownloadSink, MemoryClipboard, NullDownloadSink, ShareFailure, SharePayload,
    SharePlatform, ShareProvider,
};
use sharecard::{CardConfig, Error, ExportStatus, MainResult};

#[derive(Clone, Copy)]
enum ShareBehavior {
    Succeed,
    Decline,
    Cancel,
    Fail,
}

struct TestShare {
    behavior: ShareBehavior,
}

impl ShareProvider for TestShare {
    fn can_share(&self, _payload: &SharePayload) -> bool {
        !matches!(self.behavior, ShareBehavior::Decline)
    }

    fn share(&self, _payload: &SharePayload) -> Result<(), ShareFailure> {
        match self.behavior {
            ShareBehavior::Succeed => Ok(()),
            ShareBehavior::Decline => Err(ShareFailure::Failed("declined payload".to_string())),
            ShareBehavior::Cancel => Err(ShareFailure::Cancelled),
            ShareBehavior::Fail => Err(ShareFailure::Failed("no share handler".to_string())),
        }
    }
}

#[derive(Default)]
struct RecordingSink {
    saved: Mutex<Vec<(String, Vec<u8>)>>,
}

impl RecordingSink {
    fn saved(&self) -> Vec<(String, Vec<u8>)> {
        self.saved.lock().unwrap().clone()
    }
}

impl DownloadSink for RecordingSink {
    fn save(&self, filename: &str, bytes: &[u8]) -> sharecard::Result<()> {
        self.saved
            .lock()
            .unwrap()
            .push((filename.to_string(), bytes.to_vec()));
        Ok(())
    }
}

struct FailingSink;

impl DownloadSink for FailingSink {
    fn save(&self, _filename: &str, _bytes: &[u8]) -> sharecard::Result<()> {
        Err(Error::DownloadError("disk full".to_string()))
    }
}

struct FailingClipboard;

impl ClipboardAccess for FailingClipboard {
    fn write_text(&self, _text: &str) -> sharecard::Result<()> {
        Err(Error::ClipboardError("permission denied".to_string()))
    }
}

struct TestPlatform {
    share: Option<TestShare>,
    sink: Arc<dyn DownloadSink>,
    clipboard: Arc<dyn ClipboardAccess>,
}

impl TestPlatform {
    fn new(share: Option<ShareBehavior>) -> Self {
        Self {
            share: share.map(|behavior| TestShare { behavior }),
            sink: Arc::new(NullDownloadSink),
            clipboard: Arc::new(MemoryClipboard::new()),
        }
    }
}

impl SharePlatform for TestPlatform {
    fn share_provider(&self) -> Option<&dyn ShareProvider> {
        self.share.as_ref().map(|s| s as &dyn ShareProvider)
    }

    fn download_sink(&self) -> &dyn DownloadSink {
        &*self.sink
    }

    fn clipboard(&self) -> &dyn ClipboardAccess {
        &*self.clipboard
    }
}

fn card() -> sharecard::RenderedCard {
    compose_card(&CardConfig {
        tool_name: "DECISION BATTLE".to_string(),
        main_result: Some(MainResult {
            label: "Victory!".to_string(),
            value: "Choice A".to_string(),
            sublabel: None,
        }),
        ..Default::default()
    })
}

fn recorder() -> (Arc<Mutex<Vec<ExportStatus>>>, ExportOptions) {
    let statuses = Arc::new(Mutex::new(Vec::new()));
    let sink = statuses.clone();
    let options = ExportOptions::new().on_status_change(move |s| sink.lock().unwrap().push(s));
    (statuses, options)
}

async fn let_reset_run() {
    tokio::time::sleep(Duration::from_millis(3000)).await;
    tokio::task::yield_now().await;
}

#[tokio::test(start_paused = true)]
async fn successful_share_then_idle_reset() {
    let platform = TestPlatform::new(Some(ShareBehavior::Succeed));
    let (statuses, options) = recorder();

    export_card(&card(), options, &platform).await;
    assert_eq!(
        *statuses.lock().unwrap(),
        vec![ExportStatus::Generating, ExportStatus::Shared]
    );

    let_reset_run().await;
    assert_eq!(
        *statuses.lock().unwrap(),
        vec![
            ExportStatus::Generating,
            ExportStatus::Shared,
            ExportStatus::Idle
        ]
    );
}

#[tokio::test(start_paused = true)]
async fn no_share_sheet_downloads_the_png() {
    let sink = Arc::new(RecordingSink::default());
    let mut platform = TestPlatform::new(None);
    platform.sink = sink.clone();
    let (statuses, options) = recorder();

    export_card(&card(), options, &platform).await;
    assert_eq!(
        *statuses.lock().unwrap(),
        vec![ExportStatus::Generating, ExportStatus::Downloaded]
    );

    let saved = sink.saved();
    assert_eq!(saved.len(), 1);
    assert_eq!(saved[0].0, DEFAULT_FILENAME);
    assert_eq!(&saved[0].1[..8], b"\x89PNG\r\n\x1a\n");
}

#[tokio::test(start_paused = true)]
async fn declined_payload_downloads_without_sharing() {
    let sink = Arc::new(RecordingSink::default());
    let mut platform = TestPlatform::new(Some(ShareBehavior::Decline));
    platform.sink = sink.clone();
    let (statuses, options) = recorder();

    export_card(&card(), options.filename("battle.png"), &platform).await;
    assert_eq!(
        *statuses.lock().unwrap(),
        vec![ExportStatus::Generating, ExportStatus::Downloaded]
    );
    assert_eq!(sink.saved()[0].0, "battle.png");
}

#[tokio::test(start_paused = true)]
async fn cancellation_goes_idle_immediately_with_no_reset() {
    let platform = TestPlatform::new(Some(ShareBehavior::Cancel));
    let (statuses, options) = recorder();

    export_card(&card(), options, &platform).await;
    assert_eq!(
        *statuses.lock().unwrap(),
        vec![ExportStatus::Generating, ExportStatus::Idle]
    );

    // no deferred reset fires later
    let_reset_run().await;
    assert_eq!(statuses.lock().unwrap().len(), 2);
}

#[tokio::test(start_paused = true)]
async fn failed_share_falls_back_to_clipboard_text() {
    let clipboard = Arc::new(MemoryClipboard::new());
    let mut platform = TestPlatform::new(Some(ShareBehavior::Fail));
    platform.clipboard = clipboard.clone();
    let (statuses, options) = recorder();

    export_card(&card(), options.text("Choice A wins!"), &platform).await;
    assert_eq!(
        *statuses.lock().unwrap(),
        vec![ExportStatus::Generating, ExportStatus::Copied]
    );
    assert_eq!(
        clipboard.contents().as_deref(),
        Some(format!("Choice A wins!{ATTRIBUTION_SUFFIX}").as_str())
    );

    let_reset_run().await;
    assert_eq!(
        statuses.lock().unwrap().last(),
        Some(&ExportStatus::Idle)
    );
}

#[tokio::test(start_paused = true)]
async fn failed_download_also_reaches_the_clipboard() {
    let clipboard = Arc::new(MemoryClipboard::new());
    let mut platform = TestPlatform::new(None);
    platform.sink = Arc::new(FailingSink);
    platform.clipboard = clipboard.clone();
    let (statuses, options) = recorder();

    export_card(&card(), options, &platform).await;
    assert_eq!(
        *statuses.lock().unwrap(),
        vec![ExportStatus::Generating, ExportStatus::Copied]
    );
    // empty share text still carries the attribution
    assert_eq!(clipboard.contents().as_deref(), Some(ATTRIBUTION_SUFFIX));
}

#[tokio::test(start_paused = true)]
async fn clipboard_failure_surfaces_as_error_status() {
    let mut platform = TestPlatform::new(Some(ShareBehavior::Fail));
    platform.clipboard = Arc::new(FailingClipboard);
    let (statuses, options) = recorder();

    export_card(&card(), options, &platform).await;
    assert_eq!(
        *statuses.lock().unwrap(),
        vec![ExportStatus::Generating, ExportStatus::Error]
    );

    let_reset_run().await;
    assert_eq!(
        statuses.lock().unwrap().last(),
        Some(&ExportStatus::Idle)
    );
}

#[tokio::test(start_paused = true)]
async fn export_without_a_callback_still_completes() {
    let sink = Arc::new(RecordingSink::default());
    let mut platform = TestPlatform::new(None);
    platform.sink = sink.clone();

    export_card(&card(), ExportOptions::new(), &platform).await;
    assert_eq!(sink.saved().len(), 1);
}
