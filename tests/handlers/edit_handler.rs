use pretty_assertions::assert_eq;

use crate::common::harness::{is_error, SAMPLE_SVG};
use crate::common::{text_of, FakeSvgMakerApi, TestHarness, ToolArgs};
use svgmaker_mcp::models::{AspectRatio, EditParams, Quality, SvgRequest, SvgResponse};

const PNG_BYTES: &[u8] = b"\x89PNG\r\n\x1a\nfake-image-data";

fn edit_request(harness: &TestHarness) -> EditParams {
    match harness.api.last_request() {
        SvgRequest::Edit(params) => params,
        other => panic!("expected edit request, got {:?}", other),
    }
}

#[tokio::test]
async fn test_edit_uploads_input_and_writes_output() {
    let harness = TestHarness::new();
    let input = harness.write_input("images/photo.png", PNG_BYTES);
    let output = harness.arg_path("edited.svg");

    let result = harness
        .call(
            "svgmaker_edit",
            ToolArgs::edit(&input, "make it blue", &output).build(),
        )
        .await;

    assert!(!is_error(&result), "unexpected error: {}", text_of(&result));
    assert_eq!(
        text_of(&result),
        format!("SVG edited successfully and saved to: {}", output)
    );
    assert_eq!(std::fs::read_to_string(&output).unwrap(), SAMPLE_SVG);

    let params = edit_request(&harness);
    assert_eq!(params.prompt, "make it blue");
    assert_eq!(params.image.file_name, "photo.png");
    assert_eq!(params.image.mime_type, "image/png");
    assert_eq!(params.image.bytes, PNG_BYTES);
}

#[tokio::test]
async fn test_edit_accepts_svg_input() {
    let harness = TestHarness::new();
    let input = harness.write_input("logo.svg", SAMPLE_SVG.as_bytes());
    let output = harness.arg_path("logo-edited.svg");

    let result = harness
        .call(
            "svgmaker_edit",
            ToolArgs::edit(&input, "add a border", &output).build(),
        )
        .await;

    assert!(!is_error(&result));
    assert_eq!(edit_request(&harness).image.mime_type, "image/svg+xml");
}

#[tokio::test]
async fn test_edit_allows_auto_aspect_ratio_with_high_quality() {
    let harness = TestHarness::new();
    let input = harness.write_input("photo.png", PNG_BYTES);
    let output = harness.arg_path("out.svg");

    harness
        .call(
            "svgmaker_edit",
            ToolArgs::edit(&input, "simplify", &output)
                .set("quality", "high")
                .set("aspectRatio", "auto")
                .build(),
        )
        .await;

    let params = edit_request(&harness);
    assert_eq!(params.quality, Quality::High);
    assert_eq!(params.aspect_ratio, AspectRatio::Auto);
}

#[tokio::test]
async fn test_edit_high_quality_defaults_to_square() {
    let harness = TestHarness::new();
    let input = harness.write_input("photo.png", PNG_BYTES);
    let output = harness.arg_path("out.svg");

    harness
        .call(
            "svgmaker_edit",
            ToolArgs::edit(&input, "simplify", &output)
                .set("quality", "high")
                .build(),
        )
        .await;

    assert_eq!(edit_request(&harness).aspect_ratio, AspectRatio::Square);
}

#[tokio::test]
async fn test_edit_missing_input_makes_no_remote_call() {
    let harness = TestHarness::new();
    let input = harness.arg_path("missing.png");
    let output = harness.arg_path("out.svg");

    let result = harness
        .call(
            "svgmaker_edit",
            ToolArgs::edit(&input, "make it blue", &output).build(),
        )
        .await;

    assert!(is_error(&result));
    let text = text_of(&result);
    assert!(text.starts_with("Error editing SVG: "), "{}", text);
    assert!(text.contains(&input), "error should cite the input path: {}", text);
    assert_eq!(harness.api.call_count(), 0);
    assert!(!std::path::Path::new(&output).exists());
    assert!(harness.notifier.updates().is_empty());
}

#[tokio::test]
async fn test_edit_progress_messages() {
    let harness = TestHarness::new();
    let input = harness.write_input("photo.png", PNG_BYTES);
    let output = harness.arg_path("out.svg");

    harness
        .call("svgmaker_edit", ToolArgs::edit(&input, "x", &output).build())
        .await;

    assert_eq!(
        harness.notifier.messages(),
        vec![
            "Starting SVG edit...",
            "Reading input image...",
            "Editing SVG with AI...",
            "Saving edited SVG...",
            "SVG edit complete!",
        ]
    );
}

#[tokio::test]
async fn test_edit_without_svg_content_is_error() {
    let harness = TestHarness::with_api(
        FakeSvgMakerApi::new().respond_with(Ok(SvgResponse {
            svg_url: Some("https://cdn.example.com/x.svg".into()),
            ..Default::default()
        })),
    );
    let input = harness.write_input("photo.png", PNG_BYTES);
    let output = harness.arg_path("out.svg");

    let result = harness
        .call("svgmaker_edit", ToolArgs::edit(&input, "x", &output).build())
        .await;

    assert!(is_error(&result));
    assert_eq!(
        text_of(&result),
        "Error editing SVG: SVGMaker API did not return SVG content."
    );
    assert!(!std::path::Path::new(&output).exists());
}
