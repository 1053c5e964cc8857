// Fetcher module: remote price provider clients.

pub mod intrinio;
pub mod traits;

pub use intrinio::IntrinioClient;
pub use traits::PriceFetcher;
