use clap::{Args, Parser, Subcommand};

#[derive(Debug, Parser)]
#[clap(author, version, about)]
pub struct DotbuildArgs {
    #[clap(subcommand)]
    pub action: ActionType,
}

#[derive(Debug, Subcommand)]
pub enum ActionType {
    /// run a dotnet command, restoring from the given package source
    Dotnet(DotnetCommand),
    /// show the resolved build name, number, module and project
    BuildInfo(BuildInfoCommand),
    // dotbuild version
    Version,
}

#[derive(Debug, Clone, Default, Args)]
pub struct BuildParams {
    /// overrides JFROG_CLI_BUILD_NAME and the project config
    #[clap(long)]
    pub build_name: Option<String>,
    /// overrides JFROG_CLI_BUILD_NUMBER and the project config
    #[clap(long)]
    pub build_number: Option<String>,
    #[clap(long)]
    pub module: Option<String>,
    /// overrides JFROG_CLI_BUILD_PROJECT
    #[clap(long)]
    pub project: Option<String>,
}

#[derive(Debug, Args)]
pub struct DotnetCommand {
    /// dotnet sub-command, e.g. restore or build
    pub command: String,

    /// arguments passed to the dotnet sub-command as is
    #[clap(trailing_var_arg = true, allow_hyphen_values = true)]
    pub args: Vec<String>,

    #[clap(flatten)]
    pub build: BuildParams,

    #[clap(flatten)]
    pub source: SourceParams,
}

#[derive(Debug, Clone, Default, Args)]
pub struct SourceParams {
    /// NuGet package source url
    #[clap(long)]
    pub source_url: Option<String>,
    /// name the source is registered under
    #[clap(long, default_value = "dotbuild")]
    pub source_name: String,
    #[clap(long, requires = "source_url")]
    pub source_user: Option<String>,
    #[clap(long, requires = "source_url")]
    pub source_password: Option<String>,
}

#[derive(Debug, Args)]
pub struct BuildInfoCommand {
    #[clap(flatten)]
    pub build: BuildParams,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_dotnet_command() {
        let args = DotbuildArgs::try_parse_from([
            "dotbuild",
            "dotnet",
            "--build-name",
            "app",
            "--build-number",
            "7",
            "--source-url",
            "https://repo.example.test/nuget",
            "restore",
            "MyApp.sln",
            "--no-cache",
        ])
        .unwrap();

        let ActionType::Dotnet(command) = args.action else {
            panic!("expected dotnet action");
        };
        assert_eq!(command.command, "restore");
        assert_eq!(command.args, vec!["MyApp.sln", "--no-cache"]);
        assert_eq!(command.build.build_name.as_deref(), Some("app"));
        assert_eq!(command.build.build_number.as_deref(), Some("7"));
        assert_eq!(command.source.source_name, "dotbuild");
    }

    #[test]
    fn test_source_credentials_require_url() {
        let result = DotbuildArgs::try_parse_from([
            "dotbuild",
            "dotnet",
            "--source-user",
            "admin",
            "restore",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_build_info() {
        let args =
            DotbuildArgs::try_parse_from(["dotbuild", "build-info", "--project", "proj"]).unwrap();
        let ActionType::BuildInfo(command) = args.action else {
            panic!("expected build-info action");
        };
        assert_eq!(command.build.project.as_deref(), Some("proj"));
        assert!(command.build.build_name.is_none());
    }
}
