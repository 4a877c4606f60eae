use std::fs;
use std::path::{Path, PathBuf};

use qrmaker::clipboard::{BITMAP_FILE_HEADER_LEN, encode_bmp};
use qrmaker::tempfiles::delete_temp_file;
use qrmaker::{
    ClipboardPayload, MemoryClipboard, OutputOptions, QrDecoder, QrGenerator, QrSession, QrStyle,
};

fn generator_in(dir: &Path) -> QrGenerator {
    let output = OutputOptions {
        temp_dir: Some(dir.to_path_buf()),
        ..OutputOptions::default()
    };
    QrGenerator::with_output(QrStyle::default(), &output)
}

fn pngs_in(dir: &Path) -> Vec<PathBuf> {
    fs::read_dir(dir)
        .expect("read temp dir")
        .map(|entry| entry.expect("dir entry").path())
        .filter(|path| path.extension().is_some_and(|ext| ext == "png"))
        .collect()
}

#[test]
fn example_url_round_trips_through_png() {
    let dir = tempfile::tempdir().expect("temp dir");
    let image = generator_in(dir.path())
        .generate("https://example.com")
        .expect("generate");

    let decoded = QrDecoder::new()
        .decode_file(image.path())
        .expect("decode");
    assert_eq!(decoded, "https://example.com");
}

#[test]
fn assorted_inputs_round_trip() {
    let dir = tempfile::tempdir().expect("temp dir");
    let generator = generator_in(dir.path());
    let decoder = QrDecoder::new();

    for text in [
        "a",
        "https://github.com/Germi32",
        "https://www.google.com/search?q=rust+qr&hl=en",
        "mailto:someone@example.com",
        "Ünïcödé text ✓",
    ] {
        let image = generator.generate(text).expect("generate");
        assert_eq!(decoder.decode_file(image.path()).expect("decode"), text);
    }
}

#[test]
fn repeated_generation_keeps_one_preview_file() {
    let dir = tempfile::tempdir().expect("temp dir");
    let mut session =
        QrSession::start(generator_in(dir.path()), "https://github.com/Germi32", None)
            .expect("start");

    for i in 0..10 {
        session
            .regenerate(&format!("https://example.com/{i}"))
            .expect("regenerate");
        assert_eq!(pngs_in(dir.path()), vec![session.current().path().to_path_buf()]);
    }

    session.shutdown();
    assert!(pngs_in(dir.path()).is_empty());
}

#[test]
fn icon_survives_regeneration_until_shutdown() {
    let dir = tempfile::tempdir().expect("temp dir");
    let mut session = QrSession::start(
        generator_in(dir.path()),
        "https://github.com/Germi32",
        Some("https://www.google.com/"),
    )
    .expect("start");
    let icon = session.icon().expect("icon").path().to_path_buf();

    session.regenerate("next").expect("regenerate");
    session.regenerate("again").expect("regenerate");
    assert!(icon.exists());
    assert_eq!(pngs_in(dir.path()).len(), 2);

    drop(session);
    assert!(!icon.exists());
    assert!(pngs_in(dir.path()).is_empty());
}

#[test]
fn deleting_missing_path_never_panics() {
    let dir = tempfile::tempdir().expect("temp dir");
    delete_temp_file(&dir.path().join("does-not-exist.png"));
    delete_temp_file(Path::new(""));
}

#[test]
fn save_as_is_byte_identical() {
    let dir = tempfile::tempdir().expect("temp dir");
    let session =
        QrSession::start(generator_in(&dir.path().join("tmp")), "https://example.com", None)
            .expect("start");

    let destination = dir.path().join("exported.png");
    let written = session.save_to(&destination).expect("save");

    let original = fs::read(session.current().path()).expect("read preview");
    let saved = fs::read(&destination).expect("read export");
    assert_eq!(saved, original);
    assert_eq!(written, original.len() as u64);

    // The export is the user's file and outlives the session
    drop(session);
    assert!(destination.exists());
}

#[test]
fn clipboard_payload_is_bmp_without_file_header() {
    let dir = tempfile::tempdir().expect("temp dir");
    let session =
        QrSession::start(generator_in(dir.path()), "https://example.com", None).expect("start");
    let mut clipboard = MemoryClipboard::default();

    let len = session.copy_image(&mut clipboard).expect("copy");

    let rgb = image::open(session.current().path())
        .expect("open preview")
        .to_rgb8();
    let bmp = encode_bmp(&rgb).expect("encode bmp");
    assert_eq!(len, bmp.len() - BITMAP_FILE_HEADER_LEN);

    match clipboard.contents() {
        Some(ClipboardPayload::Bitmap(bitmap)) => {
            assert_eq!(bitmap.dib(), &bmp[BITMAP_FILE_HEADER_LEN..]);
        }
        other => panic!("expected bitmap payload, got {other:?}"),
    }
}
