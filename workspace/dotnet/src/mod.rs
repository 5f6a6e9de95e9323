pub mod core_cli;
pub mod execute;
pub mod nuget_config;
pub mod toolchain;
pub mod version_gate;

#[cfg(test)]
pub(crate) mod test_support;

use execute::ExecuteError;
use thiserror::Error;
use types::build_config::BuildConfigError;

#[derive(Debug, Error)]
pub enum DotnetError {
    #[error(transparent)]
    Execute(#[from] ExecuteError),

    #[error("Failed to parse .NET SDK version from '{output}': {source}")]
    VersionParse {
        output: String,
        source: semver::Error,
    },

    #[error(transparent)]
    BuildConfig(#[from] BuildConfigError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
