pub mod engine;
pub mod model;
pub mod strata;
pub mod tools;
