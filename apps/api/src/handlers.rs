pub mod analytics;
pub mod health;
pub mod seo;
