pub mod generate;
pub mod holidays;
pub mod models;
pub mod serve;

// Re-export command functions for convenience
pub use generate::{generate, GenerateParams};
pub use holidays::{countries, holidays};
pub use models::models;
pub use serve::serve;
