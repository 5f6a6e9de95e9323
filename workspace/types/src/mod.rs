pub mod build_config;
pub mod defaults;
pub mod env;
pub mod project_config;
pub mod version;
