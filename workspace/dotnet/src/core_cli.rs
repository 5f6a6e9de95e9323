use log::{debug, info};
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use types::build_config::BuildConfiguration;

use crate::{
    execute::CommandRunner,
    nuget_config::{add_source_cmd, write_config_with_source, write_empty_config, NugetSource},
    toolchain::{ToolchainCmd, ToolchainType},
    version_gate::is_version_above_minimum,
    DotnetError,
};

const CONFIG_FILE_FLAG: &str = "--configfile";

/// Runs a `dotnet` sub-command against an optional package source.
///
/// The source is written into a temporary `NuGet.Config` passed with
/// `--configfile`. SDKs from 3.1.200 on get the source through
/// `dotnet nuget add source`; older ones get a fully rendered file.
#[derive(Debug)]
pub struct DotnetCoreCliCommand {
    command: String,
    args: Vec<String>,
    source: Option<NugetSource>,
    build_configuration: BuildConfiguration,
    use_nuget_add_source: bool,
}

impl DotnetCoreCliCommand {
    pub fn new<S: Into<String>>(command: S) -> Self {
        DotnetCoreCliCommand {
            command: command.into(),
            args: Vec::new(),
            source: None,
            build_configuration: BuildConfiguration::default(),
            use_nuget_add_source: false,
        }
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn source(mut self, source: NugetSource) -> Self {
        self.source = Some(source);
        self
    }

    pub fn build_configuration(mut self, build_configuration: BuildConfiguration) -> Self {
        self.build_configuration = build_configuration;
        self
    }

    pub fn use_nuget_add_source(&self) -> bool {
        self.use_nuget_add_source
    }

    pub fn toolchain_type(&self) -> ToolchainType {
        ToolchainType::DotnetCore
    }

    pub fn run<R: CommandRunner + ?Sized>(&mut self, runner: &R) -> Result<(), DotnetError> {
        self.use_nuget_add_source = is_version_above_minimum(runner)?;
        self.exec(runner)
    }

    pub fn exec<R: CommandRunner + ?Sized>(&mut self, runner: &R) -> Result<(), DotnetError> {
        self.build_configuration.validate_build_and_module_params()?;

        // Must outlive the command run below.
        let config_dir = self.config_dir()?;
        let config_path = match (&self.source, &config_dir) {
            (Some(source), Some(dir)) => {
                Some(self.prepare_config_file(source, dir.path(), runner)?)
            }
            _ => None,
        };

        let cmd = self.main_cmd(config_path.as_deref());
        info!("Running {}", cmd);
        runner.run(&cmd)?;

        if self.build_configuration.is_collect_build_info()? {
            let (build_name, build_number) = self.build_configuration.build_name_and_number()?;
            info!(
                "Recorded dotnet {} for build {}/{} (module: {}, project: {})",
                self.command,
                build_name,
                build_number,
                self.build_configuration.module(),
                self.build_configuration.project()
            );
        }
        Ok(())
    }

    fn config_dir(&self) -> Result<Option<TempDir>, DotnetError> {
        if self.source.is_none() {
            return Ok(None);
        }
        if self.args.iter().any(|arg| arg == CONFIG_FILE_FLAG) {
            debug!("{} given explicitly, not preparing a NuGet config", CONFIG_FILE_FLAG);
            return Ok(None);
        }
        Ok(Some(tempfile::tempdir()?))
    }

    fn prepare_config_file<R: CommandRunner + ?Sized>(
        &self,
        source: &NugetSource,
        dir: &Path,
        runner: &R,
    ) -> Result<PathBuf, DotnetError> {
        if self.use_nuget_add_source {
            let path = write_empty_config(dir)?;
            let cmd = add_source_cmd(source, &path);
            info!("Running {}", cmd);
            runner.run(&cmd)?;
            Ok(path)
        } else {
            debug!("Writing NuGet config for source {}", source.name);
            Ok(write_config_with_source(dir, source)?)
        }
    }

    fn main_cmd(&self, config_path: Option<&Path>) -> ToolchainCmd {
        let cmd = ToolchainCmd::new(self.toolchain_type())
            .command(&self.command)
            .flags(&self.args);
        match config_path {
            Some(path) => cmd.flag(CONFIG_FILE_FLAG).flag(path.to_string_lossy()),
            None => cmd,
        }
    }
}
