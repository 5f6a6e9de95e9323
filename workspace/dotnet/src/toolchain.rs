use std::fmt;

/// .NET toolchains the wrapper knows how to drive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolchainType {
    DotnetCore,
}

impl ToolchainType {
    pub fn executable(self) -> &'static str {
        match self {
            ToolchainType::DotnetCore => "dotnet",
        }
    }
}

impl fmt::Display for ToolchainType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.executable())
    }
}

/// A single toolchain invocation: `<executable> [command...] [flags...]`.
///
/// # Examples
///
/// ```
/// use dotnet::toolchain::{ToolchainCmd, ToolchainType};
/// let cmd = ToolchainCmd::new(ToolchainType::DotnetCore)
///     .command("restore")
///     .flag("--no-cache");
/// assert_eq!(cmd.args(), vec!["restore", "--no-cache"]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolchainCmd {
    toolchain: ToolchainType,
    command: Vec<String>,
    flags: Vec<String>,
}

/// Flags whose value must not reach the log.
const SECRET_FLAGS: &[&str] = &["--password"];

impl ToolchainCmd {
    pub fn new(toolchain: ToolchainType) -> Self {
        ToolchainCmd {
            toolchain,
            command: Vec::new(),
            flags: Vec::new(),
        }
    }

    /// Appends a command word, e.g. `nuget` then `add` then `source`.
    pub fn command<S: AsRef<str>>(mut self, command: S) -> Self {
        self.command.push(command.as_ref().to_string());
        self
    }

    pub fn flag<S: AsRef<str>>(mut self, flag: S) -> Self {
        self.flags.push(flag.as_ref().to_string());
        self
    }

    pub fn flags<I, S>(mut self, flags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.flags
            .extend(flags.into_iter().map(|flag| flag.as_ref().to_string()));
        self
    }

    pub fn executable(&self) -> &'static str {
        self.toolchain.executable()
    }

    pub fn args(&self) -> Vec<String> {
        self.command.iter().chain(self.flags.iter()).cloned().collect()
    }
}

impl fmt::Display for ToolchainCmd {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.executable())?;
        let mut hide_next = false;
        for arg in self.args() {
            if hide_next {
                write!(f, " ***")?;
            } else {
                write!(f, " {}", arg)?;
            }
            hide_next = SECRET_FLAGS.contains(&arg.as_str());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_cmd() {
        let cmd = ToolchainCmd::new(ToolchainType::DotnetCore).flag("--version");
        assert_eq!(cmd.executable(), "dotnet");
        assert_eq!(cmd.args(), vec!["--version"]);
        assert_eq!(cmd.to_string(), "dotnet --version");
    }

    #[test]
    fn test_command_words_precede_flags() {
        let cmd = ToolchainCmd::new(ToolchainType::DotnetCore)
            .flag("--no-restore")
            .command("build")
            .flags(["--configfile", "/tmp/NuGet.Config"]);
        assert_eq!(
            cmd.args(),
            vec!["build", "--no-restore", "--configfile", "/tmp/NuGet.Config"]
        );
        assert_eq!(cmd.to_string(), "dotnet build --no-restore --configfile /tmp/NuGet.Config");
    }

    #[test]
    fn test_display_masks_passwords() {
        let cmd = ToolchainCmd::new(ToolchainType::DotnetCore)
            .command("nuget")
            .command("add")
            .command("source")
            .flags(["--username", "admin", "--password", "s3cret"]);
        let shown = cmd.to_string();
        assert_eq!(shown, "dotnet nuget add source --username admin --password ***");
        assert!(cmd.args().contains(&"s3cret".to_string()));
    }
}
