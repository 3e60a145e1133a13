use sha2::{Digest, Sha256};
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use textsnap::export::{decode_data_url, FixedClock, MemorySink};
use textsnap::{Editor, EditorConfig, Viewport};

fn golden_path(name: &str) -> PathBuf {
    let mut p = PathBuf::from("tests/goldens/expected");
    p.push(name);
    p
}

async fn export_png(text: &str, back: &str, front: &str) -> Vec<u8> {
    let sink = Arc::new(MemorySink::new());
    let cfg = EditorConfig {
        viewport: Viewport { width: 256.4, height: 512.0 },
        ..Default::default()
    };
    let mut editor = Editor::builder(cfg)
        .sink(sink.clone())
        .clock(Arc::new(FixedClock(0)))
        .build()
        .expect("mount");
    editor.set_text(text);
    editor.pick_background(back).unwrap();
    editor.pick_foreground(front).unwrap();
    let download = editor.save().await.expect("save");
    let (mime, bytes) = decode_data_url(&download.href).expect("data url");
    assert_eq!(mime, "image/png");
    bytes
}

/// Decode a PNG into its RGBA8 pixels, so goldens do not depend on the
/// encoder's compression choices.
fn decode_rgba(png_data: &[u8]) -> (u32, u32, Vec<u8>) {
    let decoder = png::Decoder::new(png_data);
    let mut reader = decoder.read_info().expect("decode");
    let mut buf = vec![0; reader.output_buffer_size()];
    let info = reader.next_frame(&mut buf).expect("frame");
    buf.truncate(info.buffer_size());
    (info.width, info.height, buf)
}

#[tokio::test]
async fn golden_export_matches_digest() {
    let png_data = export_png("ある", "#000000", "#ffffff").await;
    let (width, height, pixels) = decode_rgba(&png_data);
    assert_eq!((width, height), (256, 256));
    let digest = hex::encode(Sha256::digest(&pixels));

    let expected_path = golden_path("default_card.rgba.sha256");
    if std::env::var("UPDATE_GOLDENS").is_ok() {
        fs::create_dir_all("tests/goldens/expected").expect("create golden dir");
        fs::write(&expected_path, format!("{}\n", digest)).expect("write golden");
        println!("Updated golden: {:?}", expected_path);
        return;
    }

    let exp = fs::read_to_string(&expected_path).unwrap_or_else(|e| {
        panic!(
            "missing golden {:?} ({}); run with UPDATE_GOLDENS=1 to create it",
            expected_path, e
        )
    });
    assert_eq!(digest, exp.trim());
}

#[tokio::test]
async fn export_is_deterministic_and_color_sensitive() {
    let a = export_png("Hello", "#112233", "#aabbcc").await;
    let b = export_png("Hello", "#112233", "#aabbcc").await;
    let c = export_png("Hello", "#112234", "#aabbcc").await;
    assert_eq!(Sha256::digest(&a), Sha256::digest(&b));
    assert_ne!(Sha256::digest(&a), Sha256::digest(&c));
}

#[tokio::test]
async fn exported_png_is_square_with_both_colors() {
    let png_data = export_png("あ", "#112233", "#aabbcc").await;
    assert_eq!(&png_data[0..8], b"\x89PNG\r\n\x1a\n");

    let (width, height, bytes) = decode_rgba(&png_data);
    assert_eq!((width, height), (256, 256));

    let mut found_back = false;
    let mut found_front = false;
    for chunk in bytes.chunks(4) {
        match chunk {
            [0x11, 0x22, 0x33, 255] => found_back = true,
            [0xaa, 0xbb, 0xcc, 255] => found_front = true,
            _ => {}
        }
        if found_back && found_front {
            break;
        }
    }
    assert!(found_back, "expected background pixels");
    assert!(found_front, "expected glyph pixels");
}
