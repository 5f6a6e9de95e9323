use std::{
    fs,
    io,
    path::{Path, PathBuf},
};

use crate::toolchain::{ToolchainCmd, ToolchainType};

pub const NUGET_CONFIG_FILE_NAME: &str = "NuGet.Config";

const EMPTY_CONFIG: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<configuration>
  <packageSources>
  </packageSources>
</configuration>
"#;

/// Package source the wrapped command restores from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NugetSource {
    pub name: String,
    pub url: String,
    pub username: Option<String>,
    pub password: Option<String>,
}

impl NugetSource {
    pub fn new<N: Into<String>, U: Into<String>>(name: N, url: U) -> Self {
        NugetSource {
            name: name.into(),
            url: url.into(),
            username: None,
            password: None,
        }
    }

    pub fn credentials<U: Into<String>, P: Into<String>>(mut self, username: U, password: P) -> Self {
        self.username = Some(username.into());
        self.password = Some(password.into());
        self
    }

    fn has_credentials(&self) -> bool {
        self.username.is_some() || self.password.is_some()
    }
}

/// Writes a config with no package sources, to be filled by
/// `dotnet nuget add source`.
pub fn write_empty_config(dir: &Path) -> io::Result<PathBuf> {
    let path = dir.join(NUGET_CONFIG_FILE_NAME);
    fs::write(&path, EMPTY_CONFIG)?;
    Ok(path)
}

/// Writes a config holding `source` and its credentials.
pub fn write_config_with_source(dir: &Path, source: &NugetSource) -> io::Result<PathBuf> {
    let path = dir.join(NUGET_CONFIG_FILE_NAME);
    fs::write(&path, render_config(source))?;
    Ok(path)
}

pub fn render_config(source: &NugetSource) -> String {
    let mut config = String::from("<?xml version=\"1.0\" encoding=\"utf-8\"?>\n<configuration>\n");
    config.push_str("  <packageSources>\n");
    config.push_str(&format!(
        "    <add key=\"{}\" value=\"{}\" />\n",
        escape_xml(&source.name),
        escape_xml(&source.url)
    ));
    config.push_str("  </packageSources>\n");

    if source.has_credentials() {
        let element = credentials_element_name(&source.name);
        config.push_str("  <packageSourceCredentials>\n");
        config.push_str(&format!("    <{}>\n", element));
        if let Some(username) = &source.username {
            config.push_str(&format!(
                "      <add key=\"Username\" value=\"{}\" />\n",
                escape_xml(username)
            ));
        }
        if let Some(password) = &source.password {
            config.push_str(&format!(
                "      <add key=\"ClearTextPassword\" value=\"{}\" />\n",
                escape_xml(password)
            ));
        }
        config.push_str(&format!("    </{}>\n", element));
        config.push_str("  </packageSourceCredentials>\n");
    }

    config.push_str("</configuration>\n");
    config
}

/// `dotnet nuget add source <url> --configfile <path> --name <name> ...`
pub fn add_source_cmd(source: &NugetSource, config_path: &Path) -> ToolchainCmd {
    let mut cmd = ToolchainCmd::new(ToolchainType::DotnetCore)
        .command("nuget")
        .command("add")
        .command("source")
        .flag(&source.url)
        .flag("--configfile")
        .flag(config_path.to_string_lossy())
        .flag("--name")
        .flag(&source.name);

    if let Some(username) = &source.username {
        cmd = cmd.flag("--username").flag(username);
    }
    if let Some(password) = &source.password {
        cmd = cmd
            .flag("--password")
            .flag(password)
            .flag("--store-password-in-clear-text");
    }
    cmd
}

/// NuGet stores credentials under an element named after the source.
///
/// Characters that cannot appear in an XML element name are written as
/// `_xHHHH_` (`_xHHHHHHHH_` outside the BMP), and so is an underscore that
/// would otherwise read as the start of such an escape.
fn credentials_element_name(name: &str) -> String {
    let chars: Vec<char> = name.chars().collect();
    let mut encoded = String::with_capacity(name.len());
    for (i, &c) in chars.iter().enumerate() {
        let valid = if i == 0 {
            c.is_alphabetic() || c == '_'
        } else {
            c.is_alphanumeric() || matches!(c, '_' | '.' | '-')
        };
        if valid && !(c == '_' && looks_like_escape(&chars[i..])) {
            encoded.push(c);
        } else if (c as u32) > 0xFFFF {
            encoded.push_str(&format!("_x{:08X}_", c as u32));
        } else {
            encoded.push_str(&format!("_x{:04X}_", c as u32));
        }
    }
    encoded
}

/// `_xHHHH_` or `_xHHHHHHHH_` at the start of `chars`
fn looks_like_escape(chars: &[char]) -> bool {
    let hex_run = |len: usize| {
        chars.len() > len + 2
            && chars[1] == 'x'
            && chars[2..len + 2].iter().all(|c| c.is_ascii_hexdigit())
            && chars[len + 2] == '_'
    };
    hex_run(4) || hex_run(8)
}

fn escape_xml(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
