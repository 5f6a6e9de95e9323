use log::debug;
use serde::{Deserialize, Serialize};
use std::{
    borrow::Cow,
    fs,
    io::{self, ErrorKind},
    marker::PhantomData,
    path::{Path, PathBuf},
};
use thiserror::Error;

use crate::defaults::{BUILD_CONFIG_FILE_NAME, PROJECTS_DIR};

/// Raw content of a persisted project configuration file
#[derive(Debug, Clone)]
pub struct ProjectConfigFile<T> {
    content: Cow<'static, str>,
    _marker: PhantomData<T>,
    pub path: PathBuf,
}
impl<T> AsRef<str> for ProjectConfigFile<T> {
    fn as_ref(&self) -> &str {
        &self.content
    }
}

/// Errors that can occur while reading a project configuration
#[derive(Debug, Error)]
pub enum ProjectConfigError {
    /// Error parsing YAML content
    #[error("YAML parsing error in {}: {source}", path.display())]
    YamlParse {
        path: PathBuf,
        source: serde_yaml::Error,
    },

    /// I/O error during file operations
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

pub trait ProjectConfigType {
    fn file_name() -> &'static str;
}

impl<T: ProjectConfigType> ProjectConfigFile<T> {
    /// Path of the config file relative to a project root
    pub fn relative_path() -> PathBuf {
        Path::new(PROJECTS_DIR).join(T::file_name())
    }

    /// Looks for the config file under `start` and then under each parent.
    ///
    /// # Returns
    ///
    /// * `Ok(None)` - No project directory on the way up holds the file
    /// * `Ok(Some(_))` - The first file found, already read
    /// * `Err(_)` - A file exists but could not be read
    pub fn find<P: AsRef<Path>>(start: P) -> Result<Option<Self>, ProjectConfigError> {
        let relative = Self::relative_path();
        for dir in start.as_ref().ancestors() {
            let candidate = dir.join(&relative);
            if candidate.is_file() {
                debug!("Found project config at {}", candidate.display());
                return Self::load(candidate).map(Some);
            }
        }
        Ok(None)
    }

    /// Reads the config file at `path`
    pub fn load<P: Into<PathBuf>>(path: P) -> Result<Self, ProjectConfigError> {
        let path = path.into();
        if !path.exists() {
            return Err(ProjectConfigError::Io(io::Error::new(
                ErrorKind::NotFound,
                format!("Path does not exist: {}", path.display()),
            )));
        }
        let content = fs::read_to_string(&path)?;
        Ok(ProjectConfigFile {
            content: Cow::Owned(content),
            _marker: PhantomData,
            path,
        })
    }

    /// Parses the content into `T`. An empty document parses as `T::default()`.
    pub fn parse(self) -> Result<T, ProjectConfigError>
    where
        T: for<'de> Deserialize<'de> + Default,
    {
        if self.content.trim().is_empty() {
            return Ok(T::default());
        }
        serde_yaml::from_str::<T>(&self.content).map_err(|source| ProjectConfigError::YamlParse {
            path: self.path.clone(),
            source,
        })
    }

    /// Convenience method to find and parse in one operation
    pub fn find_and_parse<P: AsRef<Path>>(start: P) -> Result<Option<T>, ProjectConfigError>
    where
        T: for<'de> Deserialize<'de> + Default,
    {
        Self::find(start)?.map(Self::parse).transpose()
    }
}

/// `.jfrog/projects/build.yaml`
///
/// Unknown keys are ignored so files written by newer tools still load.
#[derive(Debug, Deserialize, Serialize, PartialEq, Clone, Default)]
#[serde(default)]
pub struct BuildProjectConfig {
    pub version: u32,

    #[serde(rename = "type")]
    pub config_type: String,

    /// Last build name configured for this project
    #[serde(alias = "buildName")]
    pub name: String,
}

impl ProjectConfigType for BuildProjectConfig {
    fn file_name() -> &'static str {
        BUILD_CONFIG_FILE_NAME
    }
}
