use log::debug;
use types::{defaults::MIN_DOTNET_SDK_VERSION_FOR_ADD_SOURCE, version::Version};

use crate::{
    execute::CommandRunner,
    toolchain::{ToolchainCmd, ToolchainType},
    DotnetError,
};

/// Runs `dotnet --version` and reports whether the SDK is at least
/// [`MIN_DOTNET_SDK_VERSION_FOR_ADD_SOURCE`], i.e. whether
/// `dotnet nuget add source` is available.
pub fn is_version_above_minimum<R: CommandRunner + ?Sized>(runner: &R) -> Result<bool, DotnetError> {
    let version_cmd = ToolchainCmd::new(ToolchainType::DotnetCore).flag("--version");
    let output = runner.output(&version_cmd)?;

    let sdk_version = parse_version(&output)?;
    debug!("using .NET SDK Core {}", sdk_version);

    let minimum = parse_version(MIN_DOTNET_SDK_VERSION_FOR_ADD_SOURCE)?;
    Ok(sdk_version.at_least(&minimum))
}

fn parse_version(output: &str) -> Result<Version, DotnetError> {
    Version::try_from(output).map_err(|source| DotnetError::VersionParse {
        output: output.trim().to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::execute::ExecuteError;
    use crate::test_support::RecordingRunner;
    use test_case::test_case;

    #[test_case("3.1.200\n", true; "minimum")]
    #[test_case("3.1.199\n", false; "one patch below")]
    #[test_case("3.2.0\n", true; "newer minor")]
    #[test_case("2.2.402\n", false; "older major")]
    #[test_case("8.0.404\n", true; "current sdk")]
    #[test_case("3.1.1000\n", true; "wide patch")]
    fn test_is_version_above_minimum(output: &str, expected: bool) {
        let runner = RecordingRunner::with_version(output);
        assert_eq!(is_version_above_minimum(&runner).unwrap(), expected);
        assert_eq!(runner.call_args(), vec![vec!["--version".to_string()]]);
        assert_eq!(runner.calls.borrow()[0].executable(), "dotnet");
    }

    #[test]
    fn test_unparseable_output() {
        let runner = RecordingRunner::with_version("Welcome to .NET!");
        let result = is_version_above_minimum(&runner);
        assert!(matches!(
            result,
            Err(DotnetError::VersionParse { output, .. }) if output == "Welcome to .NET!"
        ));
    }

    #[test]
    fn test_command_failure_is_propagated() {
        let runner = RecordingRunner::with_output_error(ExecuteError::CommandStatusError(
            "dotnet".to_string(),
            127,
        ));
        let result = is_version_above_minimum(&runner);
        assert!(matches!(
            result,
            Err(DotnetError::Execute(ExecuteError::CommandStatusError(_, 127)))
        ));
        assert_eq!(runner.calls.borrow().len(), 1);
    }
}
