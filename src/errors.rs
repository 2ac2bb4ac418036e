//! The errors encountered in this crate.

use std::process::ExitStatus;

/// The locator didn't contain both a user and a project.
#[derive(Debug, Copy, Clone, PartialEq, Fail)]
#[fail(display = "a forge URL should have at least a user and a project")]
pub struct ShortUrl;

/// The locator parsed, but there is no host to file it under.
#[derive(Debug, Clone, PartialEq, Fail)]
#[fail(display = "{:?} doesn't contain a host", locator)]
pub struct MissingHost {
    pub locator: String,
}

/// A user or project which can't be used as a directory name.
#[derive(Debug, Clone, PartialEq, Fail)]
#[fail(display = "{:?} can't be used as a directory name", segment)]
pub struct BadSegment {
    pub segment: String,
}

#[derive(Debug, Copy, Clone, PartialEq, Fail)]
#[fail(display = "HOME is not set, so the default root can't be determined")]
pub struct MissingHome;

/// `git clone` ran but exited unsuccessfully.
#[derive(Debug, Clone, PartialEq, Fail)]
#[fail(display = "cloning {} failed ({})", url, status)]
pub struct CloneFailed {
    pub url: String,
    pub status: ExitStatus,
}
