pub mod constants;
pub mod jose;

mod config;
mod context;
mod cors;
mod handler;
mod header_name;
mod headers;
mod origin;
mod properties;
mod request_type;
mod result;
mod util;

pub use config::{ConfigError, CorsConfig, DEFAULT_SUPPORTED_METHODS};
pub use context::RequestContext;
pub use cors::Cors;
pub use handler::CorsRequestHandler;
pub use header_name::{HeaderNameError, format_canonical};
pub use headers::{Headers, merge_response_headers, merge_vary};
pub use origin::{Origin, OriginError, ValidatedOrigin};
pub use properties::{Properties, PropertyError, PropertyRetriever, PropertySource};
pub use request_type::CorsRequestType;
pub use result::{CorsDecision, CorsError, CorsResult, RequestTags};
pub use util::{parse_multiple_header_values, parse_words, serialize};
