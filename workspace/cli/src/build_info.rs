use std::fmt;
use types::build_config::{BuildConfigError, BuildConfiguration, Resolved, ValueSource};

use crate::args::BuildParams;

pub fn build_configuration(params: &BuildParams) -> BuildConfiguration {
    BuildConfiguration::new(
        params.build_name.clone().unwrap_or_default(),
        params.build_number.clone().unwrap_or_default(),
        params.module.clone().unwrap_or_default(),
        params.project.clone().unwrap_or_default(),
    )
}

/// Resolved build metadata as shown by `dotbuild build-info`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildInfoReport {
    pub build_name: Resolved,
    pub build_number: Resolved,
    pub module: String,
    pub project: Resolved,
    pub loaded_from_config_file: bool,
    pub collect_build_info: bool,
}

impl BuildInfoReport {
    pub fn collect(config: &mut BuildConfiguration) -> Result<Self, BuildConfigError> {
        config.validate_build_and_module_params()?;
        Ok(BuildInfoReport {
            build_name: config.resolve_build_name()?,
            build_number: config.resolve_build_number()?,
            module: config.module().to_string(),
            project: config.resolve_project(),
            collect_build_info: config.is_collect_build_info()?,
            loaded_from_config_file: config.is_loaded_from_config_file(),
        })
    }
}

fn source_label(source: ValueSource) -> &'static str {
    match source {
        ValueSource::Param => "param",
        ValueSource::Env => "env",
        ValueSource::File => "project config",
        ValueSource::Absent => "unset",
    }
}

impl fmt::Display for BuildInfoReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rows = [
            ("build name", &self.build_name),
            ("build number", &self.build_number),
            ("project", &self.project),
        ];
        for (label, resolved) in rows {
            writeln!(
                f,
                "{:<14}{} ({})",
                label,
                resolved.value,
                source_label(resolved.source)
            )?;
        }
        writeln!(f, "{:<14}{}", "module", self.module)?;
        writeln!(f, "{:<14}{}", "from config", self.loaded_from_config_file)?;
        write!(f, "{:<14}{}", "collect", self.collect_build_info)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::{create_dir_all, write};
    use tempfile::tempdir;
    use types::defaults::{BUILD_CONFIG_FILE_NAME, LATEST_BUILD_NUMBER, PROJECTS_DIR};
    use types::env::MapEnv;

    #[test]
    fn test_report_from_project_config() {
        let dir = tempdir().unwrap();
        let conf_dir = dir.path().join(PROJECTS_DIR);
        create_dir_all(&conf_dir).unwrap();
        write(conf_dir.join(BUILD_CONFIG_FILE_NAME), "version: 1\ntype: build\nname: fromFile\n")
            .unwrap();

        let params = BuildParams {
            module: Some("core".to_string()),
            project: Some("proj".to_string()),
            ..BuildParams::default()
        };
        let mut config = build_configuration(&params)
            .with_env(MapEnv::new())
            .with_working_dir(dir.path());

        let report = BuildInfoReport::collect(&mut config).unwrap();
        assert_eq!(report.build_name.value, "fromFile");
        assert_eq!(report.build_name.source, ValueSource::File);
        assert_eq!(report.build_number.value, LATEST_BUILD_NUMBER);
        assert_eq!(report.project.source, ValueSource::Param);
        assert!(report.loaded_from_config_file);
        assert!(report.collect_build_info);

        let shown = report.to_string();
        assert!(shown.contains("fromFile (project config)"));
        assert!(shown.contains("proj (param)"));
    }

    #[test]
    fn test_report_rejects_module_without_build() {
        let dir = tempdir().unwrap();
        let params = BuildParams {
            module: Some("core".to_string()),
            ..BuildParams::default()
        };
        let mut config = build_configuration(&params)
            .with_env(MapEnv::new())
            .with_working_dir(dir.path());

        assert!(matches!(
            BuildInfoReport::collect(&mut config),
            Err(BuildConfigError::InvalidParams(_))
        ));
    }
}
