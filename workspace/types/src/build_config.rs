use log::debug;
use std::{env, io, path::PathBuf};
use thiserror::Error;

use crate::{
    defaults::{BUILD_NAME_ENV, BUILD_NUMBER_ENV, LATEST_BUILD_NUMBER, PROJECT_ENV},
    env::{EnvSource, ProcessEnv},
    project_config::{BuildProjectConfig, ProjectConfigError, ProjectConfigFile},
};

#[derive(Debug, Error)]
pub enum BuildConfigError {
    #[error(transparent)]
    ProjectConfig(#[from] ProjectConfigError),

    #[error("Failed to determine working directory: {0}")]
    Io(#[from] io::Error),

    #[error("{0}")]
    InvalidParams(String),
}

type Result<T> = std::result::Result<T, BuildConfigError>;

/// Where a resolved value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueSource {
    /// Passed in explicitly or set through a setter
    Param,
    /// Read from the process environment
    Env,
    /// Read from `.jfrog/projects/build.yaml`
    File,
    /// No source had a value
    Absent,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolved {
    pub value: String,
    pub source: ValueSource,
}

impl Resolved {
    fn absent() -> Self {
        Resolved {
            value: String::new(),
            source: ValueSource::Absent,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BuildField {
    Name,
    Number,
    Project,
}

const BUILD_NAME_CHAIN: &[ValueSource] = &[ValueSource::Param, ValueSource::Env, ValueSource::File];
const BUILD_NUMBER_CHAIN: &[ValueSource] =
    &[ValueSource::Param, ValueSource::Env, ValueSource::File];
const PROJECT_CHAIN: &[ValueSource] = &[ValueSource::Param, ValueSource::Env];

impl BuildField {
    /// Sources consulted for this field, highest priority first.
    fn chain(self) -> &'static [ValueSource] {
        match self {
            BuildField::Name => BUILD_NAME_CHAIN,
            BuildField::Number => BUILD_NUMBER_CHAIN,
            BuildField::Project => PROJECT_CHAIN,
        }
    }

    fn env_key(self) -> &'static str {
        match self {
            BuildField::Name => BUILD_NAME_ENV,
            BuildField::Number => BUILD_NUMBER_ENV,
            BuildField::Project => PROJECT_ENV,
        }
    }
}

/// Build name, number, module and project for one CLI invocation.
///
/// Name and number are resolved on every read from the explicit value, then
/// the environment, then the persisted project config. Project stops at the
/// environment and module is explicit only. Empty strings mean "unset".
#[derive(Debug)]
pub struct BuildConfiguration {
    build_name: String,
    build_number: String,
    module: String,
    project: String,
    loaded_from_config_file: bool,
    env: Box<dyn EnvSource>,
    working_dir: Option<PathBuf>,
}

impl Default for BuildConfiguration {
    fn default() -> Self {
        BuildConfiguration::new("", "", "", "")
    }
}

impl BuildConfiguration {
    pub fn new<N, B, M, P>(build_name: N, build_number: B, module: M, project: P) -> Self
    where
        N: Into<String>,
        B: Into<String>,
        M: Into<String>,
        P: Into<String>,
    {
        BuildConfiguration {
            build_name: build_name.into(),
            build_number: build_number.into(),
            module: module.into(),
            project: project.into(),
            loaded_from_config_file: false,
            env: Box::new(ProcessEnv),
            working_dir: None,
        }
    }

    /// Replaces the process environment as the second resolution source.
    pub fn with_env<E: EnvSource + 'static>(mut self, env: E) -> Self {
        self.set_env(env);
        self
    }

    /// Directory the project config search starts from. Defaults to the
    /// current directory at the time of each resolution.
    pub fn with_working_dir<P: Into<PathBuf>>(mut self, dir: P) -> Self {
        self.working_dir = Some(dir.into());
        self
    }

    pub fn set_env<E: EnvSource + 'static>(&mut self, env: E) -> &mut Self {
        self.env = Box::new(env);
        self
    }

    pub fn set_build_name<S: Into<String>>(&mut self, build_name: S) -> &mut Self {
        self.build_name = build_name.into();
        self
    }

    pub fn set_build_number<S: Into<String>>(&mut self, build_number: S) -> &mut Self {
        self.build_number = build_number.into();
        self
    }

    pub fn set_module<S: Into<String>>(&mut self, module: S) -> &mut Self {
        self.module = module.into();
        self
    }

    pub fn set_project<S: Into<String>>(&mut self, project: S) -> &mut Self {
        self.project = project.into();
        self
    }

    pub fn build_name(&mut self) -> Result<String> {
        self.resolve_build_name().map(|resolved| resolved.value)
    }

    /// May return [`LATEST_BUILD_NUMBER`] when neither param nor env set a
    /// number and the build name itself came from the project config.
    pub fn build_number(&mut self) -> Result<String> {
        self.resolve_build_number().map(|resolved| resolved.value)
    }

    pub fn module(&self) -> &str {
        &self.module
    }

    pub fn project(&self) -> String {
        self.resolve_project().value
    }

    pub fn resolve_build_name(&mut self) -> Result<Resolved> {
        self.resolve(BuildField::Name)
    }

    pub fn resolve_build_number(&mut self) -> Result<Resolved> {
        self.resolve(BuildField::Number)
    }

    pub fn resolve_project(&self) -> Resolved {
        BuildField::Project
            .chain()
            .iter()
            .find_map(|&source| {
                self.lookup_local(BuildField::Project, source)
                    .map(|value| Resolved { value, source })
            })
            .unwrap_or_else(Resolved::absent)
    }

    pub fn build_name_and_number(&mut self) -> Result<(String, String)> {
        let build_name = self.build_name()?;
        let build_number = self.build_number()?;
        Ok((build_name, build_number))
    }

    /// True once a build name or number has been read from the project
    /// config. Never reset.
    pub fn is_loaded_from_config_file(&self) -> bool {
        self.loaded_from_config_file
    }

    /// Build info is collected only when name, number, module and project
    /// all resolve to non-empty values, whatever their source.
    pub fn is_collect_build_info(&mut self) -> Result<bool> {
        let (build_name, build_number) = self.build_name_and_number()?;
        Ok(!build_name.is_empty()
            && !build_number.is_empty()
            && !self.module.is_empty()
            && !self.project().is_empty())
    }

    pub fn validate_build_and_module_params(&mut self) -> Result<()> {
        let (build_name, build_number) = self.build_name_and_number()?;
        if build_name.is_empty() != build_number.is_empty() {
            return Err(BuildConfigError::InvalidParams(
                "the build-name and build-number options cannot be provided separately"
                    .to_string(),
            ));
        }
        if !self.module.is_empty() && build_name.is_empty() {
            return Err(BuildConfigError::InvalidParams(
                "the build-name and build-number options are mandatory when the module option is provided"
                    .to_string(),
            ));
        }
        Ok(())
    }

    fn resolve(&mut self, field: BuildField) -> Result<Resolved> {
        let resolved = self.first_match(field)?;
        if resolved.source == ValueSource::File {
            debug!("{:?} '{}' loaded from project config", field, resolved.value);
            self.loaded_from_config_file = true;
        }
        Ok(resolved)
    }

    fn first_match(&self, field: BuildField) -> Result<Resolved> {
        for &source in field.chain() {
            if let Some(value) = self.lookup(field, source)? {
                return Ok(Resolved { value, source });
            }
        }
        Ok(Resolved::absent())
    }

    fn lookup(&self, field: BuildField, source: ValueSource) -> Result<Option<String>> {
        match source {
            ValueSource::File => self.lookup_file(field),
            _ => Ok(self.lookup_local(field, source)),
        }
    }

    fn lookup_local(&self, field: BuildField, source: ValueSource) -> Option<String> {
        match source {
            ValueSource::Param => {
                let value = match field {
                    BuildField::Name => &self.build_name,
                    BuildField::Number => &self.build_number,
                    BuildField::Project => &self.project,
                };
                Some(value.clone()).filter(|value| !value.is_empty())
            }
            ValueSource::Env => self.env.var(field.env_key()),
            ValueSource::File | ValueSource::Absent => None,
        }
    }

    fn lookup_file(&self, field: BuildField) -> Result<Option<String>> {
        match field {
            BuildField::Name => self.file_build_name(),
            // LATEST refers to the file's build, so it only pairs with a
            // build name that also came from the file.
            BuildField::Number => Ok(match self.first_match(BuildField::Name)?.source {
                ValueSource::File => Some(LATEST_BUILD_NUMBER.to_string()),
                _ => None,
            }),
            BuildField::Project => Ok(None),
        }
    }

    fn file_build_name(&self) -> Result<Option<String>> {
        let start = match &self.working_dir {
            Some(dir) => dir.clone(),
            None => env::current_dir()?,
        };
        Ok(ProjectConfigFile::<BuildProjectConfig>::find_and_parse(start)?
            .map(|config| config.name)
            .filter(|name| !name.is_empty()))
    }
}
