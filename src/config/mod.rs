//! Configuration: data directory resolution and persisted user settings

pub mod paths;
pub mod settings;

pub use paths::DrainerPaths;
pub use settings::Settings;
