use pretty_assertions::assert_eq;

use crate::common::harness::{is_error, SAMPLE_SVG};
use crate::common::{text_of, FakeSvgMakerApi, TestHarness, ToolArgs};
use svgmaker_mcp::models::{
    AspectRatio, Background, ColorMode, Quality, Style, SvgRequest, SvgResponse,
};
use svgmaker_mcp::services::ApiError;

fn generate_request(harness: &TestHarness) -> svgmaker_mcp::models::GenerateParams {
    match harness.api.last_request() {
        SvgRequest::Generate(params) => params,
        other => panic!("expected generate request, got {:?}", other),
    }
}

#[tokio::test]
async fn test_generate_writes_svg_and_reports_path() {
    let harness = TestHarness::new();
    let output = harness.arg_path("out.svg");

    let result = harness
        .call(
            "svgmaker_generate",
            ToolArgs::generate("a red circle", &output).build(),
        )
        .await;

    assert!(!is_error(&result), "unexpected error: {}", text_of(&result));
    assert_eq!(
        text_of(&result),
        format!("SVG generated successfully and saved to: {}", output)
    );
    assert_eq!(std::fs::read_to_string(&output).unwrap(), SAMPLE_SVG);
    assert_eq!(harness.api.call_count(), 1);
}

#[tokio::test]
async fn test_generate_applies_defaults() {
    let harness = TestHarness::new();
    let output = harness.arg_path("out.svg");

    harness
        .call(
            "svgmaker_generate",
            ToolArgs::generate("a red circle", &output).build(),
        )
        .await;

    let params = generate_request(&harness);
    assert_eq!(params.prompt, "a red circle");
    assert_eq!(params.quality, Quality::Medium);
    assert_eq!(params.background, Background::Auto);
    assert_eq!(params.aspect_ratio, AspectRatio::Auto);
    assert!(params.style.is_empty());
}

#[tokio::test]
async fn test_generate_high_quality_forces_square() {
    let harness = TestHarness::new();
    let output = harness.arg_path("out.svg");

    harness
        .call(
            "svgmaker_generate",
            ToolArgs::generate("a red circle", &output)
                .set("quality", "high")
                .build(),
        )
        .await;

    let params = generate_request(&harness);
    assert_eq!(params.quality, Quality::High);
    assert_eq!(params.aspect_ratio, AspectRatio::Square);
}

#[tokio::test]
async fn test_generate_explicit_options_pass_through() {
    let harness = TestHarness::new();
    let output = harness.arg_path("out.svg");

    harness
        .call(
            "svgmaker_generate",
            ToolArgs::generate("a mountain icon", &output)
                .set("quality", "high")
                .set("aspectRatio", "landscape")
                .set("background", "transparent")
                .set("style", "minimalist")
                .set("color_mode", "2-colors")
                .build(),
        )
        .await;

    let params = generate_request(&harness);
    assert_eq!(params.aspect_ratio, AspectRatio::Landscape);
    assert_eq!(params.background, Background::Transparent);
    assert_eq!(params.style.style, Some(Style::Minimalist));
    assert_eq!(params.style.color_mode, Some(ColorMode::TwoColors));
}

#[tokio::test]
async fn test_generate_creates_missing_output_directories() {
    let harness = TestHarness::new();
    let output = harness.arg_path("nested/dir/logo.svg");

    let result = harness
        .call("svgmaker_generate", ToolArgs::generate("logo", &output).build())
        .await;

    assert!(!is_error(&result));
    assert!(std::path::Path::new(&output).is_file());
}

#[tokio::test]
async fn test_generate_progress_sequence() {
    let harness = TestHarness::new();
    let output = harness.arg_path("out.svg");

    harness
        .call("svgmaker_generate", ToolArgs::generate("logo", &output).build())
        .await;

    assert_eq!(harness.notifier.progress_values(), vec![0.0, 1.0, 2.0, 3.0, 4.0]);
    assert_eq!(
        harness.notifier.messages(),
        vec![
            "Starting SVG generation...",
            "Preparing generation request...",
            "Generating SVG with AI...",
            "Saving SVG file...",
            "SVG generation complete!",
        ]
    );
    assert!(harness.notifier.updates().iter().all(|u| u.total == 4.0));
}

#[tokio::test]
async fn test_generate_without_svg_content_is_error() {
    let harness = TestHarness::with_api(
        FakeSvgMakerApi::new().respond_with(Ok(SvgResponse::default())),
    );
    let output = harness.arg_path("out.svg");

    let result = harness
        .call("svgmaker_generate", ToolArgs::generate("logo", &output).build())
        .await;

    assert!(is_error(&result));
    assert_eq!(
        text_of(&result),
        "Error generating SVG: SVGMaker API did not return SVG content."
    );
    assert!(!std::path::Path::new(&output).exists());
    assert_eq!(harness.notifier.progress_values(), vec![0.0, 1.0, 2.0]);
}

#[tokio::test]
async fn test_generate_blank_svg_text_is_error() {
    let harness = TestHarness::with_api(
        FakeSvgMakerApi::new().respond_with(Ok(SvgResponse::with_svg("  \n"))),
    );
    let output = harness.arg_path("out.svg");

    let result = harness
        .call("svgmaker_generate", ToolArgs::generate("logo", &output).build())
        .await;

    assert!(is_error(&result));
    assert!(!std::path::Path::new(&output).exists());
}

#[tokio::test]
async fn test_generate_api_status_error() {
    let harness = TestHarness::with_api(FakeSvgMakerApi::new().respond_with(Err(
        ApiError::Status {
            status: 402,
            message: "Insufficient credits".into(),
        },
    )));
    let output = harness.arg_path("out.svg");

    let result = harness
        .call("svgmaker_generate", ToolArgs::generate("logo", &output).build())
        .await;

    assert!(is_error(&result));
    assert_eq!(
        text_of(&result),
        "Error generating SVG: SVGMaker API returned status 402: Insufficient credits"
    );
    let values = harness.notifier.progress_values();
    assert!(!values.contains(&3.0));
    assert!(!values.contains(&4.0));
}

#[tokio::test]
async fn test_generate_into_system_directory_rejected() {
    let harness = TestHarness::new();

    let result = harness
        .call(
            "svgmaker_generate",
            ToolArgs::generate("logo", "/etc/svgmaker/out.svg").build(),
        )
        .await;

    assert!(is_error(&result));
    assert_eq!(
        text_of(&result),
        "Error generating SVG: Access to system directory \"/etc/svgmaker/out.svg\" is not allowed."
    );
    assert_eq!(harness.api.call_count(), 0);
    assert!(harness.notifier.updates().is_empty());
}

#[tokio::test]
async fn test_generate_without_token_sends_no_progress() {
    let harness = TestHarness::new();
    let output = harness.arg_path("out.svg");

    let result = harness
        .call_without_token("svgmaker_generate", ToolArgs::generate("logo", &output).build())
        .await;

    assert!(!is_error(&result));
    assert!(harness.notifier.updates().is_empty());
}
