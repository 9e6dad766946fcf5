pub mod climate_service;
pub mod error;
pub mod window;

pub use climate_service::ClimateService;
pub use error::QueryError;
