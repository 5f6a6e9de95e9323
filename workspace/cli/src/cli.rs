use super::args::{ActionType, DotbuildArgs, DotnetCommand, SourceParams};
use super::build_info::{build_configuration, BuildInfoReport};
use clap::Parser;
use dotnet::core_cli::DotnetCoreCliCommand;
use dotnet::execute::SystemRunner;
use dotnet::nuget_config::NugetSource;
use dotnet::DotnetError;
use env_logger::Env;
use log::debug;
use thiserror::Error;
use types::build_config::BuildConfigError;

#[derive(Error, Debug)]
pub enum DotbuildError {
    #[error(transparent)]
    DotnetError(#[from] DotnetError),

    #[error(transparent)]
    BuildConfigError(#[from] BuildConfigError),
}

type Result<T> = std::result::Result<T, DotbuildError>;

pub fn run_cli() -> Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let args = DotbuildArgs::parse();

    match args.action {
        ActionType::Version => {
            let program_name: &str = env!("CARGO_PKG_NAME");
            let program_version: &str = env!("CARGO_PKG_VERSION");
            println!("{} version: {}", program_name, program_version);
        }
        ActionType::BuildInfo(command) => {
            let mut config = build_configuration(&command.build);
            let report = BuildInfoReport::collect(&mut config)?;
            println!("{}", report);
        }
        ActionType::Dotnet(command) => run_dotnet(command)?,
    };

    Ok(())
}

fn run_dotnet(command: DotnetCommand) -> Result<()> {
    let mut dotnet_cmd = DotnetCoreCliCommand::new(command.command)
        .args(command.args)
        .build_configuration(build_configuration(&command.build));
    if let Some(source) = nuget_source(command.source) {
        debug!("Using package source {} ({})", source.name, source.url);
        dotnet_cmd = dotnet_cmd.source(source);
    }
    dotnet_cmd.run(&SystemRunner)?;
    Ok(())
}

fn nuget_source(params: SourceParams) -> Option<NugetSource> {
    let url = params.source_url?;
    Some(NugetSource {
        username: params.source_user,
        password: params.source_password,
        ..NugetSource::new(params.source_name, url)
    })
}
