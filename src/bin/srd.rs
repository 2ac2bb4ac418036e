extern crate chrono;
extern crate env_logger;
extern crate failure;
#[macro_use]
extern crate log;
extern crate shellexpand;
extern crate srd;
extern crate structopt;
#[macro_use]
extern crate structopt_derive;

use std::env;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process;

use chrono::Local;
use env_logger::Builder;
use failure::{Error, ResultExt};
use log::LevelFilter;
use srd::{Driver, Settings};
use structopt::StructOpt;

const DEFAULT_CONFIG: &str = "~/.srd.toml";
/// Both the binary and library log under this target.
const LOG_TARGET: &str = module_path!();

fn main() {
    let args = Args::from_args();

    if args.example_config {
        generate_example();
        return;
    }

    match run(&args) {
        Ok(dir) => println!("{}", dir.display()),
        Err(e) => {
            eprintln!("Error: {}", e);

            for cause in e.iter_chain().skip(1) {
                eprintln!("\tCaused By: {}", cause);
            }

            process::exit(1);
        }
    }
}

fn generate_example() {
    match Settings::example().as_toml() {
        Ok(example) => print!("{}", example),
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    }
}

fn run(args: &Args) -> Result<PathBuf, Error> {
    initialize_logging(args)?;

    let locator = match args.locator {
        Some(ref locator) => locator,
        None => return Err(failure::err_msg("requires a git URL as an argument")),
    };

    let settings = args.settings()?;
    let home = env::var_os("HOME").map(PathBuf::from);
    let cwd = env::current_dir().context("Unable to determine the current directory")?;
    let cfg = settings.resolve(
        args.root.as_ref().map(|s| s.as_str()),
        home.as_ref().map(|h| h.as_path()),
        &cwd,
    )?;

    let driver = Driver::with_config(cfg);

    if log_enabled!(log::Level::Debug) {
        for line in format!("{:#?}", driver.config()).lines() {
            debug!("{}", line);
        }
    }

    driver.run(locator)
}

#[derive(Debug, Clone, PartialEq, StructOpt)]
struct Args {
    #[structopt(help = "The repository to clone (e.g. https://github.com/user/project)")]
    locator: Option<String>,
    #[structopt(long = "root", help = "The directory to clone projects into (defaults to ~/src)")]
    root: Option<String>,
    #[structopt(short = "c", long = "config",
                help = "The configuration file to use (defaults to ~/.srd.toml)")]
    config_file: Option<String>,
    #[structopt(short = "v", long = "verbose",
                help = "Verbose output (repeat for more verbosity)")]
    verbosity: u64,
    #[structopt(long = "example-config",
                help = "Generate an example config and immediately exit.")]
    example_config: bool,
}

impl Args {
    /// Load the config file, if there is one.
    ///
    /// The default location is optional, but a file passed with `--config`
    /// must exist.
    pub fn settings(&self) -> Result<Settings, Error> {
        let (raw, required) = match self.config_file {
            Some(ref path) => (path.as_str(), true),
            None => (DEFAULT_CONFIG, false),
        };

        let config_file = shellexpand::full(raw).context("Unable to expand wildcards")?;
        let config_file = Path::new(config_file.as_ref());

        if !required && !config_file.exists() {
            debug!("No config file at {}", config_file.display());
            return Ok(Settings::default());
        }

        Settings::from_file(config_file)
            .context("Couldn't load the config")
            .map_err(Into::into)
    }
}

fn initialize_logging(args: &Args) -> Result<(), Error> {
    let level = match args.verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };

    let mut builder = Builder::new();
    builder.filter(Some(LOG_TARGET), level);

    if let Ok(filter) = env::var("RUST_LOG") {
        builder.parse(&filter);
    }

    builder.format(|out, record| {
        let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S");
        let location = match record.line() {
            Some(line) => format!("{}#{}", record.target(), line),
            None => record.target().to_string(),
        };

        writeln!(
            out,
            "{} [{:5}] ({}): {}",
            timestamp,
            record.level(),
            location,
            record.args()
        )
    });

    builder.try_init()?;

    Ok(())
}
