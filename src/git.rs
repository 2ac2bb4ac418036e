use failure::{Error, ResultExt};
use std::ffi::OsStr;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use errors::CloneFailed;

/// Make sure every directory above `dir` exists, returning its parent.
///
/// `dir` itself is left for `git clone` to create.
pub fn prepare_parent(dir: &Path) -> Result<PathBuf, Error> {
    let parent = match dir.parent() {
        Some(parent) => parent.to_path_buf(),
        None => return Err(failure::err_msg(format!("{} has no parent directory", dir.display()))),
    };

    if !parent.is_dir() {
        debug!("Creating {}", parent.display());
    }

    fs::create_dir_all(&parent)
        .with_context(|_| format!("Couldn't create the target directory ({})", parent.display()))?;

    Ok(parent)
}

/// Run `git clone <url> <dest_name>` from inside `parent`.
///
/// Everything git prints is sent to our stderr, leaving stdout free for the
/// caller.
pub fn clone<G, D>(git: G, url: &str, parent: &Path, dest_name: D) -> Result<(), Error>
where
    G: AsRef<OsStr>,
    D: AsRef<OsStr>,
{
    let git = git.as_ref();
    let dest_name = dest_name.as_ref();
    debug!(
        "Cloning {} into {}",
        url,
        parent.join(dest_name).display()
    );

    let status = Command::new(git)
        .arg("clone")
        .arg(url)
        .arg(dest_name)
        .current_dir(parent)
        .stdin(Stdio::null())
        .stdout(io::stderr())
        .stderr(Stdio::inherit())
        .status()
        .with_context(|_| format!("Unable to invoke {:?}", git))?;

    trace!("Exit Status: {}", status);

    if status.success() {
        Ok(())
    } else {
        Err(CloneFailed {
            url: url.to_string(),
            status,
        }.into())
    }
}
