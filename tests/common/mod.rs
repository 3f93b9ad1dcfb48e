#![allow(unused_imports)]


// Re-export commonly used test utilities
pub use builders::ToolArgs;
pub use harness::{text_of, FakeSvgMakerApi, RecordingNotifier, TestHarness};
