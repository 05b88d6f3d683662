pub mod data;
pub mod filters;
