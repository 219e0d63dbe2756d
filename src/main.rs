use std::path::PathBuf;
use std::process;

use anyhow::{Context, Result};
use clap::Parser;

use gitver::config::ResolverConfig;
use gitver::domain::Version;
use gitver::logger::{Level, Logger, StderrLogger};
use gitver::resolver;

#[derive(clap::Parser)]
#[command(
    name = "gitver",
    about = "Compute a SemVer 2.0 version from Git tags and commit height"
)]
struct Args {
    #[arg(
        default_value = ".",
        help = "Working directory; the repository is discovered from here upwards"
    )]
    work_dir: PathBuf,

    #[arg(
        long,
        value_name = "PART",
        help = "Version part to increment above a release tag: major, minor or patch (default patch)"
    )]
    auto_increment: Option<String>,

    #[arg(long, value_name = "METADATA", help = "Build metadata to append to the version")]
    build_metadata: Option<String>,

    #[arg(
        long,
        value_name = "IDENTIFIERS",
        help = "Pre-release identifiers used when no version tag is found, separated by '.' or ',' (default alpha.0)"
    )]
    default_pre_release_identifiers: Option<String>,

    #[arg(
        long,
        value_name = "PHASE",
        help = "Deprecated: use --default-pre-release-identifiers"
    )]
    default_pre_release_phase: Option<String>,

    #[arg(long, help = "Do not fold commit height into the version")]
    ignore_height: bool,

    #[arg(
        long,
        value_name = "MAJOR.MINOR",
        help = "Lower bound for the computed major.minor (e.g. 2.0)"
    )]
    minimum_major_minor: Option<String>,

    #[arg(
        long,
        value_name = "PREFIX",
        help = "Prefix stripped from tag names before parsing"
    )]
    tag_prefix: Option<String>,

    #[arg(
        long,
        value_name = "LEVEL",
        help = "Diagnostic verbosity: error, warn, info, debug or trace (default warn)"
    )]
    verbosity: Option<String>,

    #[arg(
        long,
        value_name = "VERSION",
        help = "Skip computation and emit this version without consulting Git"
    )]
    version_override: Option<String>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let verbosity = match args.verbosity.as_deref() {
        Some(text) => match text.parse::<Level>() {
            Ok(level) => level,
            Err(e) => {
                eprintln!("gitver: error: {}", e);
                process::exit(2);
            }
        },
        None => Level::Warn,
    };
    let log = StderrLogger::new(verbosity);

    if let Some(text) = args.version_override.as_deref() {
        match Version::parse(text) {
            Ok(version) => {
                log.info(&format!("using version override {}", version));
                println!("{}", version);
                return Ok(());
            }
            Err(e) => {
                log.error(&format!("invalid --version-override: {}", e));
                process::exit(2);
            }
        }
    }

    if args.default_pre_release_phase.is_some() && args.default_pre_release_identifiers.is_none() {
        log.warn("--default-pre-release-phase is deprecated, use --default-pre-release-identifiers");
    }

    let config = match ResolverConfig::from_flags(
        args.work_dir,
        args.auto_increment.as_deref(),
        args.build_metadata.as_deref(),
        args.default_pre_release_identifiers.as_deref(),
        args.default_pre_release_phase.as_deref(),
        args.ignore_height,
        args.minimum_major_minor.as_deref(),
        args.tag_prefix.as_deref(),
    ) {
        Ok(config) => config,
        Err(e) => {
            log.error(&e.to_string());
            process::exit(2);
        }
    };

    match resolver::resolve(&config, &log) {
        Ok(version) => {
            println!("{}", version);
            Ok(())
        }
        Err(e) if e.is_configuration() => {
            log.error(&e.to_string());
            process::exit(2);
        }
        Err(e) => Err(e).context("failed to compute version"),
    }
}
