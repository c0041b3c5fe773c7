pub mod error_detail;

pub use error_detail::error_detail;
