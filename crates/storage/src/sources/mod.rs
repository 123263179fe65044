mod fs;
mod http;

pub use fs::FsSource;
pub use http::HttpSource;
