use semver::{BuildMetadata, Prerelease, Version as OriginalVersion};
use std::borrow::Cow;
use std::cmp::Ordering;
use std::fmt;
use std::ops::Deref;

/// Version reported by an external toolchain.
///
/// Tool output is rarely strict semver: `dotnet --version` prints a trailing
/// newline, older tools print `major.minor`, and NuGet prints four
/// components. Parsing keeps the first line, pads missing components with
/// zero and carries any components past the patch in `extra`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Version {
    inner: OriginalVersion,
    extra: Vec<u64>,
    original_string: Cow<'static, str>,
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.original_string)
    }
}

impl Version {
    pub fn as_str(&self) -> &str {
        &self.original_string
    }

    /// Components past `major.minor.patch`, e.g. the `280` of `6.0.0.280`.
    pub fn extra(&self) -> &[u64] {
        &self.extra
    }

    /// Compares numeric components only, left to right, treating missing
    /// trailing components as zero. Pre-release tags are ignored.
    pub fn numeric_cmp(&self, other: &Version) -> Ordering {
        let core = (self.inner.major, self.inner.minor, self.inner.patch);
        let other_core = (other.inner.major, other.inner.minor, other.inner.patch);

        core.cmp(&other_core).then_with(|| {
            let len = self.extra.len().max(other.extra.len());
            (0..len)
                .map(|i| {
                    let left = self.extra.get(i).copied().unwrap_or(0);
                    let right = other.extra.get(i).copied().unwrap_or(0);
                    left.cmp(&right)
                })
                .find(|ordering| *ordering != Ordering::Equal)
                .unwrap_or(Ordering::Equal)
        })
    }

    pub fn at_least(&self, minimum: &Version) -> bool {
        self.numeric_cmp(minimum) != Ordering::Less
    }

    fn first_line(s: &str) -> &str {
        let line = s.trim().lines().next().unwrap_or_default().trim();
        line.strip_prefix('v').unwrap_or(line)
    }

    fn parse_lenient(line: &str) -> Result<(OriginalVersion, Vec<u64>), semver::Error> {
        let (rest, build) = match line.split_once('+') {
            Some((rest, build)) => (rest, Some(build)),
            None => (line, None),
        };
        let (core, pre) = match rest.split_once('-') {
            Some((core, pre)) => (core, Some(pre)),
            None => (rest, None),
        };

        let mut numbers = Vec::new();
        for component in core.split('.') {
            match component.parse::<u64>() {
                Ok(number) => numbers.push(number),
                // let semver produce the diagnostic
                Err(_) => return OriginalVersion::parse(line).map(|v| (v, Vec::new())),
            }
        }
        if numbers.is_empty() {
            return OriginalVersion::parse(line).map(|v| (v, Vec::new()));
        }

        let component = |i: usize| numbers.get(i).copied().unwrap_or(0);
        let mut inner = OriginalVersion::new(component(0), component(1), component(2));
        if let Some(pre) = pre {
            inner.pre = Prerelease::new(pre)?;
        }
        if let Some(build) = build {
            inner.build = BuildMetadata::new(build)?;
        }
        let extra = numbers.iter().skip(3).copied().collect();

        Ok((inner, extra))
    }
}

impl Deref for Version {
    type Target = OriginalVersion;
    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl<'a> TryFrom<&'a str> for Version {
    type Error = semver::Error;

    fn try_from(s: &'a str) -> Result<Self, Self::Error> {
        let line = Version::first_line(s);
        let (inner, extra) = Version::parse_lenient(line)?;
        Ok(Version {
            inner,
            extra,
            original_string: Cow::Owned(line.to_string()),
        })
    }
}
