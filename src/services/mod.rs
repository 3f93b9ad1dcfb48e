pub mod http;
pub mod progress;
pub mod svgmaker;

pub use http::{HttpSvgMakerApi, Throttle, DEFAULT_BASE_URL};
pub use progress::{
    next_processing_value, Phase, PhaseMessages, ProgressConfig, ProgressError, ProgressNotifier,
    ProgressSession, ProgressUpdate, DEFAULT_TICK_INTERVAL,
};
pub use svgmaker::{ApiError, SvgMakerApi, SvgMakerService, DEFAULT_REQUEST_TIMEOUT};
