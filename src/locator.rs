use failure::{Error, ResultExt};
use percent_encoding::percent_decode_str;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use url::Url;

use errors::{BadSegment, MissingHost, ShortUrl};

/// A repository locator which has been split into its `host/user/project`
/// parts.
///
/// The `user` and `project` are normalized (percent-decoded, lower-cased,
/// with the `~` some forges use for personal namespaces stripped from the
/// user), while `clone_url` keeps the encoding and casing the caller gave us.
#[derive(Debug, Clone, PartialEq)]
pub struct Locator {
    pub clone_url: String,
    pub host: String,
    pub user: String,
    pub project: String,
}

impl Locator {
    pub fn parse(raw: &str) -> Result<Locator, Error> {
        let url = if raw.contains("://") {
            Url::parse(raw)
        } else {
            Url::parse(&format!("https://{}", raw))
        };
        let url = url.with_context(|_| format!("Unable to parse {:?} as a URL", raw))?;

        let host = match (url.host_str(), url.port()) {
            (Some(host), Some(port)) => format!("{}:{}", host, port),
            (Some(host), None) => host.to_string(),
            (None, _) => {
                return Err(MissingHost {
                    locator: raw.to_string(),
                }.into())
            }
        };

        let segments = clean_path(url.path());
        if segments.len() < 2 {
            return Err(ShortUrl.into());
        }

        let user = segments[0];
        let project = segments[1];

        let decoded_user = decode_segment(user)?;
        let clean_user = decoded_user
            .strip_prefix('~')
            .unwrap_or(decoded_user.as_str())
            .to_lowercase();
        if clean_user.is_empty() {
            return Err(ShortUrl.into());
        }
        check_dir_name(user, &clean_user)?;

        let clean_project = decode_segment(project)?.to_lowercase();
        check_dir_name(project, &clean_project)?;

        let clone_url = if url.username().is_empty() {
            format!("{}://{}/{}/{}", url.scheme(), host, user, project)
        } else {
            format!(
                "{}://{}@{}/{}/{}",
                url.scheme(),
                url.username(),
                host,
                user,
                project
            )
        };

        Ok(Locator {
            clone_url,
            host,
            user: clean_user,
            project: clean_project,
        })
    }

    /// Where the repository lives, relative to the root.
    pub fn relative_dir(&self) -> PathBuf {
        Path::new(&self.host).join(&self.user).join(&self.project)
    }

    pub fn local_dir<P: AsRef<Path>>(&self, root: P) -> PathBuf {
        root.as_ref().join(self.relative_dir())
    }
}

impl FromStr for Locator {
    type Err = Error;

    fn from_str(s: &str) -> Result<Locator, Error> {
        Locator::parse(s)
    }
}

/// Lexically clean a URL path, returning the remaining segments.
///
/// Empty and `.` segments are dropped and `..` removes the previous segment.
/// The path is rooted, so `..` can never climb above it.
fn clean_path(path: &str) -> Vec<&str> {
    let mut segments = Vec::new();

    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            other => segments.push(other),
        }
    }

    segments
}

fn decode_segment(segment: &str) -> Result<String, Error> {
    let decoded = percent_decode_str(segment)
        .decode_utf8()
        .with_context(|_| format!("{:?} isn't valid UTF-8 once decoded", segment))?;

    Ok(decoded.into_owned())
}

/// A decoded segment must stay a single directory beneath its parent.
fn check_dir_name(segment: &str, name: &str) -> Result<(), Error> {
    if name == "." || name == ".." || name.contains('/') || name.contains('\0') {
        return Err(BadSegment {
            segment: segment.to_string(),
        }.into());
    }

    Ok(())
}
