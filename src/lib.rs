//! Clone forge repositories into a `root/host/user/project` directory tree.

extern crate failure;
#[macro_use]
extern crate failure_derive;
#[macro_use]
extern crate log;
extern crate percent_encoding;
extern crate serde;
#[macro_use]
extern crate serde_derive;
extern crate shellexpand;
extern crate toml;
extern crate url;

#[cfg(test)]
extern crate tempfile;

#[cfg(test)]
#[macro_use]
mod test_utils;

mod config;
mod driver;
mod errors;
mod git;
mod locator;

pub use config::{Config, Settings};
pub use driver::Driver;
pub use errors::{BadSegment, CloneFailed, MissingHome, MissingHost, ShortUrl};
pub use git::{clone, prepare_parent};
pub use locator::Locator;
