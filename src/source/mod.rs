pub(crate) mod frames;
pub(crate) mod http;
pub(crate) mod listing;
pub(crate) mod traits;
pub mod urls;
