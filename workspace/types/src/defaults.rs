/// Directory, relative to a project root, holding persisted project configs.
pub const PROJECTS_DIR: &str = ".jfrog/projects";

pub const BUILD_CONFIG_FILE_NAME: &str = "build.yaml";

pub const BUILD_NAME_ENV: &str = "JFROG_CLI_BUILD_NAME";
pub const BUILD_NUMBER_ENV: &str = "JFROG_CLI_BUILD_NUMBER";
pub const PROJECT_ENV: &str = "JFROG_CLI_BUILD_PROJECT";

/// Build number reported when the build name came from the project config.
/// It stands for the most recent build and is never resolved here.
pub const LATEST_BUILD_NUMBER: &str = "LATEST";

/// First .NET SDK able to run `dotnet nuget add source`.
pub const MIN_DOTNET_SDK_VERSION_FOR_ADD_SOURCE: &str = "3.1.200";
