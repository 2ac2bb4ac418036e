use failure::{Error, ResultExt};
use std::path::PathBuf;

use config::Config;
use git;
use locator::Locator;

#[derive(Debug, Clone, PartialEq)]
pub struct Driver {
    config: Config,
}

impl Driver {
    pub fn with_config(config: Config) -> Driver {
        Driver { config }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Clone the repository `raw` points at, returning the local directory
    /// it now lives in.
    ///
    /// A directory which already contains a git repository is left alone.
    pub fn run(&self, raw: &str) -> Result<PathBuf, Error> {
        let locator = Locator::parse(raw)?;
        let dest_dir = locator.local_dir(&self.config.root);
        debug!("Resolved {:?} to {}", raw, dest_dir.display());

        if dest_dir.join(".git").is_dir() {
            warn!(
                "{} has already been cloned, not cloning {} again",
                dest_dir.display(),
                locator.clone_url
            );
            return Ok(dest_dir);
        }

        let parent = git::prepare_parent(&dest_dir)?;

        info!("Cloning {}", locator.clone_url);
        git::clone(&self.config.git, &locator.clone_url, &parent, &locator.project)
            .with_context(|_| format!("`git clone` failed for {:?}", raw))?;

        Ok(dest_dir)
    }
}
