//! Export behaviour with misbehaving collaborators

use futures::future::{BoxFuture, FutureExt};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use textsnap::export::{Download, DownloadSink, MemorySink};
use textsnap::rendering::raster::{PreviewSnapshot, Rasterizer};
use textsnap::rendering::Screenshot;
use textsnap::{Editor, EditorConfig, Error, Result, Viewport};

fn config() -> EditorConfig {
    EditorConfig {
        viewport: Viewport { width: 390.7, height: 844.0 },
        ..Default::default()
    }
}

struct BrokenRasterizer;

impl Rasterizer for BrokenRasterizer {
    fn rasterize<'a>(&'a self, _snapshot: &'a PreviewSnapshot) -> BoxFuture<'a, Result<Screenshot>> {
        futures::future::ready(Err(Error::RasterError("canvas tainted".into()))).boxed()
    }
}

/// Records what it was asked to snapshot and returns an empty image.
#[derive(Default)]
struct RecordingRasterizer {
    seen: Mutex<Vec<(u32, u32)>>,
    calls: AtomicUsize,
}

impl Rasterizer for RecordingRasterizer {
    fn rasterize<'a>(&'a self, snapshot: &'a PreviewSnapshot) -> BoxFuture<'a, Result<Screenshot>> {
        async move {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.seen.lock().unwrap().push((snapshot.width, snapshot.height));
            tokio::task::yield_now().await;
            Ok(Screenshot::empty(snapshot.width, snapshot.height))
        }
        .boxed()
    }
}

struct RejectingSink;

impl DownloadSink for RejectingSink {
    fn deliver(&self, _download: &Download) -> Result<()> {
        Err(Error::DownloadError("disk full".into()))
    }
}

#[tokio::test]
async fn rasterizer_failure_propagates_and_nothing_is_downloaded() {
    let sink = Arc::new(MemorySink::new());
    let mut editor = Editor::builder(config())
        .rasterizer(Arc::new(BrokenRasterizer))
        .sink(sink.clone())
        .build()
        .unwrap();

    let err = editor.save().await.unwrap_err();
    assert!(matches!(err, Error::RasterError(_)));
    assert!(sink.downloads().is_empty());
    // width is left pinned, as with any interrupted export
    assert_eq!(editor.surface().style.width, Some(390));
    assert_eq!(editor.surface().style.height, Some(390));
}

/// Fails the first call only.
#[derive(Default)]
struct FlakyRasterizer {
    calls: AtomicUsize,
}

impl Rasterizer for FlakyRasterizer {
    fn rasterize<'a>(&'a self, snapshot: &'a PreviewSnapshot) -> BoxFuture<'a, Result<Screenshot>> {
        let first = self.calls.fetch_add(1, Ordering::SeqCst) == 0;
        let result = if first {
            Err(Error::RasterError("transient".into()))
        } else {
            Ok(Screenshot::empty(snapshot.width, snapshot.height))
        };
        futures::future::ready(result).boxed()
    }
}

#[tokio::test]
async fn retry_after_failure_succeeds() {
    let sink = Arc::new(MemorySink::new());
    let mut editor = Editor::builder(config())
        .rasterizer(Arc::new(FlakyRasterizer::default()))
        .sink(sink.clone())
        .build()
        .unwrap();
    assert!(editor.save().await.is_err());
    editor.save().await.unwrap();
    assert_eq!(sink.downloads().len(), 1);
    assert_eq!(editor.surface().style.width, None);
}

#[tokio::test]
async fn rasterizer_sees_integer_square_geometry() {
    let raster = Arc::new(RecordingRasterizer::default());
    let mut editor = Editor::builder(config()).rasterizer(raster.clone()).build().unwrap();
    editor.save().await.unwrap();
    editor.resize(Viewport { width: 1000.0, height: 700.0 });
    editor.save().await.unwrap();
    assert_eq!(raster.calls.load(Ordering::SeqCst), 2);
    assert_eq!(*raster.seen.lock().unwrap(), vec![(390, 390), (640, 640)]);
    assert_eq!(editor.surface().style.width, None);
    assert_eq!(editor.surface().style.height, Some(640));
}

#[tokio::test]
async fn sink_failure_is_reported() {
    let mut editor = Editor::builder(config())
        .sink(Arc::new(RejectingSink))
        .build()
        .unwrap();
    assert!(matches!(editor.save().await, Err(Error::DownloadError(_))));
}

#[test]
fn huge_viewport_is_rejected_at_mount() {
    let cfg = EditorConfig {
        viewport: Viewport { width: 5e9, height: 720.0 },
        max_preview_width: 5e9,
        ..Default::default()
    };
    assert!(matches!(Editor::builder(cfg).build(), Err(Error::ConfigError(_))));
}

#[tokio::test]
async fn resize_to_huge_viewport_still_exports_capped_square() {
    let sink = Arc::new(MemorySink::new());
    let rasterizer = Arc::new(RecordingRasterizer::default());
    let mut editor = Editor::builder(config())
        .rasterizer(rasterizer.clone())
        .sink(sink.clone())
        .build()
        .unwrap();
    editor.resize(Viewport { width: 5e9, height: 5e9 });
    editor.save().await.unwrap();
    assert_eq!(*rasterizer.seen.lock().unwrap(), vec![(640, 640)]);
}
