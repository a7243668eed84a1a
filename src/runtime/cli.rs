use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "shelver")]
#[command(version, about = "Infer, canonicalize and audit a music library", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Give up on renames not started within this many seconds
    #[arg(long, global = true, value_name = "SECS")]
    pub timeout: Option<u64>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Show how files are classified and what can be inferred from their paths
    Inspect {
        /// Audio files to inspect
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },

    /// Clean up file names in a directory
    Normalize {
        /// Directory holding the files (not recursive)
        dir: PathBuf,

        /// Rename instead of only printing the plan
        #[arg(long)]
        apply: bool,
    },

    /// Fill empty tag fields from path-inferred metadata
    Tag {
        /// Directory to tag recursively
        dir: PathBuf,

        /// Write the tags instead of only printing them
        #[arg(long)]
        apply: bool,

        /// Skip files that need a title or track number instead of asking
        #[arg(long)]
        no_prompt: bool,
    },

    /// Move files to their canonical paths
    Organize {
        /// Directory to organize recursively
        dir: PathBuf,

        /// Rename instead of only printing the plan
        #[arg(long)]
        apply: bool,
    },

    /// Check tags, paths and covers of every unconfirmed album
    Audit {
        /// Library root
        root: PathBuf,

        /// Write the full report as TOML
        #[arg(long, value_name = "FILE")]
        report: Option<PathBuf>,
    },

    /// Mark albums as reviewed so audits skip them
    Confirm {
        #[arg(required = true)]
        album_dirs: Vec<PathBuf>,
    },

    /// Remove every review marker under a root
    Clear {
        root: PathBuf,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_flags_and_global_timeout() {
        let cli = Cli::try_parse_from(["shelver", "tag", "/music", "--apply", "--no-prompt"]).unwrap();
        assert!(matches!(
            cli.command,
            Command::Tag {
                apply: true,
                no_prompt: true,
                ..
            }
        ));

        let cli = Cli::try_parse_from(["shelver", "organize", "/music", "--timeout", "5"]).unwrap();
        assert_eq!(cli.timeout, Some(5));
        assert!(matches!(cli.command, Command::Organize { apply: false, .. }));
    }

    #[test]
    fn list_arguments_are_required() {
        assert!(Cli::try_parse_from(["shelver", "inspect"]).is_err());
        assert!(Cli::try_parse_from(["shelver", "confirm"]).is_err());
    }

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
