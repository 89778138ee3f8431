pub mod http;
pub mod traits;

pub use http::HttpRenderService;
pub use traits::RenderService;
