//! The generator control file.
//!
//! A line-oriented `key=value` file inside the project's `Assets` folder.
//! Values are integers; any non-zero value switches a setting on.

use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Control file location relative to the project root.
pub const CONTROL_FILE: &str = "Assets/SaintsField.Generated/~generate.saintsfieldrc";

/// Settings read from the control file.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct GeneratorConfig {
    /// Master switch. When off, no file is generated.
    pub generate: bool,
    /// Verbose hierarchical tracing.
    pub debug: bool,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        GeneratorConfig {
            generate: true,
            debug: false,
        }
    }
}

/// Why a control file line was rejected.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Error)]
pub enum ParseReason {
    #[error("expected `key=value`")]
    MissingEquals,
    #[error("value is not an integer")]
    NotAnInteger,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("control file line {line} `{text}`: {reason}")]
    Parse {
        line: usize,
        text: String,
        reason: ParseReason,
    },
    #[error("cannot read control file `{}`: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl GeneratorConfig {
    /// Parse control file text.
    ///
    /// Blank lines are skipped and unknown keys ignored. The first malformed
    /// line is an error.
    pub fn parse(text: &str) -> Result<Self, ConfigError> {
        let mut config = GeneratorConfig::default();

        for (index, raw) in text.lines().enumerate() {
            let line = raw.trim();
            if line.is_empty() {
                continue;
            }
            let reject = |reason| ConfigError::Parse {
                line: index + 1,
                text: line.to_owned(),
                reason,
            };

            let Some((key, value)) = line.split_once('=') else {
                return Err(reject(ParseReason::MissingEquals));
            };
            let value: i64 = value
                .trim()
                .parse()
                .map_err(|_| reject(ParseReason::NotAnInteger))?;

            match key.trim() {
                "generate" => config.generate = value != 0,
                "debug" => config.debug = value != 0,
                other => tracing::debug!(key = other, "unknown control key ignored"),
            }
        }

        Ok(config)
    }

    /// Load a control file. A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(text) => Self::parse(&text),
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "no control file, using defaults");
                Ok(GeneratorConfig::default())
            }
            Err(source) => Err(ConfigError::Io {
                path: path.to_path_buf(),
                source,
            }),
        }
    }
}

/// Renders in control file syntax.
impl fmt::Display for GeneratorConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "generate={}", u8::from(self.generate))?;
        writeln!(f, "debug={}", u8::from(self.debug))
    }
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_empty_is_default() {
        assert_eq!(GeneratorConfig::parse("").unwrap(), GeneratorConfig::default());
    }

    #[test]
    fn test_nonzero_is_on() {
        let config = GeneratorConfig::parse("generate=0\ndebug=7\n").unwrap();
        assert_eq!(
            config,
            GeneratorConfig {
                generate: false,
                debug: true,
            }
        );
    }

    #[test]
    fn test_whitespace_and_unknown_keys() {
        let config = GeneratorConfig::parse("  debug = 1  \n\n   \nfuture=3\n").unwrap();
        assert!(config.debug);
        assert!(config.generate);
    }

    #[test]
    fn test_missing_equals() {
        let err = GeneratorConfig::parse("generate=1\ndebug\n").unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Parse {
                line: 2,
                reason: ParseReason::MissingEquals,
                ..
            }
        ));
    }

    #[test]
    fn test_non_integer_value() {
        let err = GeneratorConfig::parse("generate=yes").unwrap_err();
        assert_eq!(
            err.to_string(),
            "control file line 1 `generate=yes`: value is not an integer"
        );
    }

    #[test]
    fn test_missing_file_is_default() {
        let dir = tempfile::tempdir().unwrap();
        let config = GeneratorConfig::load(&dir.path().join("absent.rc")).unwrap();
        assert_eq!(config, GeneratorConfig::default());
    }
}
