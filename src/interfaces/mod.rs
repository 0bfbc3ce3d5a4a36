pub mod generate;

pub use generate::{generate, load_base_config, render_config, GenerationReport};
