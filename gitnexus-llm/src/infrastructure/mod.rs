pub mod prompts;
pub mod providers;
pub mod registry;
pub mod response_parser;

pub use registry::{ProviderType, build_generation_provider, create_provider};
pub use response_parser::{ParseError, parse_analysis, strip_code_fence};
