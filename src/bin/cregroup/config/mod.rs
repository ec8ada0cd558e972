mod canon;
mod pipeline;

pub use canon::build_canon_config;
pub use pipeline::build_pipeline_config;
