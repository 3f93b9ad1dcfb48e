use pretty_assertions::assert_eq;

use crate::common::harness::{is_error, SAMPLE_SVG};
use crate::common::{text_of, FakeSvgMakerApi, TestHarness, ToolArgs};
use svgmaker_mcp::models::SvgRequest;
use svgmaker_mcp::services::ApiError;

const JPEG_BYTES: &[u8] = b"\xff\xd8\xff\xe0fake-jpeg";

#[tokio::test]
async fn test_convert_writes_svg() {
    let harness = TestHarness::new();
    let input = harness.write_input("photo.jpg", JPEG_BYTES);
    let output = harness.arg_path("photo.svg");

    let result = harness
        .call("svgmaker_convert", ToolArgs::convert(&input, &output).build())
        .await;

    assert!(!is_error(&result), "unexpected error: {}", text_of(&result));
    assert_eq!(
        text_of(&result),
        format!(
            "Image converted to SVG successfully and saved to: {}",
            output
        )
    );
    assert_eq!(std::fs::read(&output).unwrap(), SAMPLE_SVG.as_bytes());
}

#[tokio::test]
async fn test_convert_uploads_file_bytes_unchanged() {
    let harness = TestHarness::new();
    let input = harness.write_input("photo.jpeg", JPEG_BYTES);
    let output = harness.arg_path("photo.svg");

    harness
        .call("svgmaker_convert", ToolArgs::convert(&input, &output).build())
        .await;

    match harness.api.last_request() {
        SvgRequest::Convert(params) => {
            assert_eq!(params.file.bytes, JPEG_BYTES);
            assert_eq!(params.file.mime_type, "image/jpeg");
            assert_eq!(params.file.file_name, "photo.jpeg");
        }
        other => panic!("expected convert request, got {:?}", other),
    }
}

#[tokio::test]
async fn test_convert_progress_sequence() {
    let harness = TestHarness::new();
    let input = harness.write_input("photo.png", JPEG_BYTES);
    let output = harness.arg_path("photo.svg");

    harness
        .call("svgmaker_convert", ToolArgs::convert(&input, &output).build())
        .await;

    assert_eq!(harness.notifier.progress_values(), vec![0.0, 1.0, 2.0, 3.0, 4.0]);
    assert_eq!(
        harness.notifier.messages().first().map(String::as_str),
        Some("Starting image conversion...")
    );
}

#[tokio::test]
async fn test_convert_transport_failure() {
    let harness = TestHarness::with_api(
        FakeSvgMakerApi::new().respond_with(Err(ApiError::Transport("connection refused".into()))),
    );
    let input = harness.write_input("photo.png", JPEG_BYTES);
    let output = harness.arg_path("photo.svg");

    let result = harness
        .call("svgmaker_convert", ToolArgs::convert(&input, &output).build())
        .await;

    assert!(is_error(&result));
    assert_eq!(
        text_of(&result),
        "Error converting image to SVG: Request to SVGMaker API failed: connection refused"
    );
    assert!(!std::path::Path::new(&output).exists());
}

#[tokio::test]
async fn test_convert_overwrites_existing_output() {
    let harness = TestHarness::new();
    let input = harness.write_input("photo.png", JPEG_BYTES);
    let output = harness.write_input("photo.svg", b"<svg>old</svg>");

    let result = harness
        .call("svgmaker_convert", ToolArgs::convert(&input, &output).build())
        .await;

    assert!(!is_error(&result));
    assert_eq!(std::fs::read_to_string(&output).unwrap(), SAMPLE_SVG);
}

#[tokio::test]
async fn test_convert_input_is_a_directory() {
    let harness = TestHarness::new();
    std::fs::create_dir_all(harness.path("folder")).unwrap();
    let output = harness.arg_path("photo.svg");

    let result = harness
        .call(
            "svgmaker_convert",
            ToolArgs::convert(&harness.arg_path("folder"), &output).build(),
        )
        .await;

    assert!(is_error(&result));
    assert!(text_of(&result).contains("is not readable or does not exist"));
    assert_eq!(harness.api.call_count(), 0);
}
