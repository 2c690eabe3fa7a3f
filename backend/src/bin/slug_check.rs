//! Derive or validate website slugs from the command line.
//!
//! ```text
//! $ slug-check derive "Hope Foundation"
//! slug=hope-foundation
//! valid=true
//! $ slug-check check admin
//! slug=admin
//! valid=false
//! reason=reserved
//! message=This URL slug cannot be used. Please choose a different one.
//! ```
#![cfg_attr(not(any(test, doctest)), deny(clippy::unwrap_used))]
#![cfg_attr(not(any(test, doctest)), deny(clippy::expect_used))]

use std::io::{self, Write};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use site_builder::domain::{SlugValidationError, derive_slug, validate_slug};
use tracing::debug;
use tracing_subscriber::{EnvFilter, fmt};

/// `slug-check` command arguments.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "slug-check",
    about = "Derive and validate nonprofit website slugs",
    version
)]
struct CliArgs {
    #[command(subcommand)]
    command: SlugCommand,
}

#[derive(Debug, Clone, Subcommand)]
enum SlugCommand {
    /// Suggest a slug for an organisation name and validate it.
    Derive {
        /// Organisation or project name.
        name: String,
    },
    /// Validate a slug exactly as given.
    Check {
        /// Candidate slug.
        slug: String,
    },
}

#[derive(Debug, PartialEq, Eq)]
struct SlugReport {
    slug: String,
    outcome: Result<(), SlugValidationError>,
}

impl SlugReport {
    fn for_command(command: &SlugCommand) -> Self {
        let slug = match command {
            SlugCommand::Derive { name } => derive_slug(name),
            SlugCommand::Check { slug } => slug.clone(),
        };
        let outcome = validate_slug(&slug);
        Self { slug, outcome }
    }

    fn write_to(&self, out: &mut impl Write) -> io::Result<()> {
        writeln!(out, "slug={}", self.slug)?;
        match &self.outcome {
            Ok(()) => writeln!(out, "valid=true"),
            Err(reason) => {
                writeln!(out, "valid=false")?;
                writeln!(out, "reason={}", reason.code())?;
                writeln!(out, "message={reason}")
            }
        }
    }
}

fn main() -> io::Result<ExitCode> {
    if let Err(error) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .try_init()
    {
        return Err(io::Error::other(format!("tracing init failed: {error}")));
    }

    let args = CliArgs::parse();
    let report = SlugReport::for_command(&args.command);
    debug!(slug = %report.slug, valid = report.outcome.is_ok(), "slug checked");
    report.write_to(&mut io::stdout().lock())?;

    Ok(if report.outcome.is_ok() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn rendered(report: &SlugReport) -> String {
        let mut buffer = Vec::new();
        report.write_to(&mut buffer).expect("write to buffer");
        String::from_utf8(buffer).expect("utf-8 output")
    }

    #[rstest]
    fn derive_reports_valid_slug() {
        let report = SlugReport::for_command(&SlugCommand::Derive {
            name: "Hope Foundation".to_owned(),
        });

        assert_eq!(report.slug, "hope-foundation");
        assert_eq!(rendered(&report), "slug=hope-foundation\nvalid=true\n");
    }

    #[rstest]
    #[case("hope center", SlugValidationError::InvalidCharacters)]
    #[case("ab", SlugValidationError::TooShort { min: 3 })]
    #[case("admin", SlugValidationError::Reserved)]
    fn check_reports_reason(#[case] slug: &str, #[case] expected: SlugValidationError) {
        let report = SlugReport::for_command(&SlugCommand::Check {
            slug: slug.to_owned(),
        });

        assert_eq!(report.outcome, Err(expected));
        let output = rendered(&report);
        assert!(output.contains("valid=false\n"));
        assert!(output.contains(&format!("reason={}\n", expected.code())));
    }

    #[rstest]
    fn cli_parses_subcommands() {
        let args = CliArgs::try_parse_from(["slug-check", "check", "hope-center"])
            .expect("valid arguments");
        assert!(matches!(args.command, SlugCommand::Check { ref slug } if slug == "hope-center"));
    }
}
