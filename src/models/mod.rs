pub mod options;
pub mod request;

pub use options::{
    effective_aspect_ratio, AspectRatio, Background, ColorMode, Composition,
    GenerateAspectRatio, ImageComplexity, Quality, Style, StyleParams, TextStyle,
};
pub use request::{
    ConvertParams, EditParams, GenerateParams, ImageUpload, SvgRequest, SvgResponse,
};
