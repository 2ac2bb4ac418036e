use failure::{Error, ResultExt};
use std::fs;
use std::path::{Path, PathBuf};

use errors::MissingHome;

/// The fully resolved settings used when cloning.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// The top-level directory all repositories are cloned into.
    pub root: PathBuf,
    /// The `git` executable to invoke.
    pub git: PathBuf,
}

impl Config {
    pub fn new<P: Into<PathBuf>>(root: P) -> Config {
        Config {
            root: root.into(),
            git: default_git(),
        }
    }
}

/// The optional on-disk configuration file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Where repositories get cloned to. A leading `~` is expanded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub root: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub git: Option<PathBuf>,
}

impl Settings {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Settings, Error> {
        let path = path.as_ref();
        debug!("Loading settings from {}", path.display());

        let contents = fs::read_to_string(path)
            .with_context(|_| format!("Unable to read {}", path.display()))?;

        Settings::from_toml(&contents)
            .with_context(|_| format!("{} is not a valid config file", path.display()))
            .map_err(Into::into)
    }

    pub fn from_toml(src: &str) -> Result<Settings, Error> {
        toml::from_str(src).map_err(Into::into)
    }

    pub fn example() -> Settings {
        Settings {
            root: Some(String::from("~/src")),
            git: Some(default_git()),
        }
    }

    pub fn as_toml(&self) -> Result<String, Error> {
        toml::to_string_pretty(self).map_err(Into::into)
    }

    /// Work out the final `Config`.
    ///
    /// The root is taken from `root_override`, then the file, then
    /// `$HOME/src`. A leading `~` expands to `home` and relative roots are
    /// anchored at `cwd`.
    pub fn resolve(
        &self,
        root_override: Option<&str>,
        home: Option<&Path>,
        cwd: &Path,
    ) -> Result<Config, Error> {
        let home_str = home.map(|h| h.to_string_lossy().into_owned());

        let root = match root_override.or_else(|| self.root.as_ref().map(|s| s.as_str())) {
            Some(raw) => {
                if raw.starts_with('~') && home_str.is_none() {
                    return Err(MissingHome.into());
                }
                let expanded = shellexpand::tilde_with_context(raw, || home_str.as_ref());
                PathBuf::from(expanded.as_ref())
            }
            None => match home {
                Some(home) => home.join("src"),
                None => return Err(MissingHome.into()),
            },
        };

        let root = if root.is_absolute() {
            root
        } else {
            cwd.join(root)
        };

        Ok(Config {
            root,
            git: self.git.clone().unwrap_or_else(default_git),
        })
    }
}

fn default_git() -> PathBuf {
    PathBuf::from("git")
}
