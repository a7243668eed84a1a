pub mod audit;
pub mod inspect;
pub mod normalize;
pub mod organize;
pub mod tag;

use std::time::{Duration, Instant};

use crate::config::Settings;
use crate::library::StdFilesystem;
use crate::rename::{RenameOutcome, RenameReport};
use crate::tags::LoftyTags;

pub type CmdResult = Result<(), Box<dyn std::error::Error>>;

/// What every command runs against.
pub struct Context {
    pub settings: Settings,
    pub fs: StdFilesystem,
    pub tags: LoftyTags,
    pub deadline: Option<Instant>,
}

impl Context {
    pub fn new(settings: Settings, timeout_secs: Option<u64>) -> Self {
        let fs = StdFilesystem::new(&settings.library);
        Self {
            settings,
            fs,
            tags: LoftyTags,
            deadline: timeout_secs.map(|s| Instant::now() + Duration::from_secs(s)),
        }
    }
}

pub fn print_rename_report(report: &RenameReport) {
    for dir in &report.directories {
        match &dir.outcome {
            RenameOutcome::Renamed => {
                println!("moved dir  {} -> {}", dir.from.display(), dir.to.display())
            }
            RenameOutcome::Skipped(reason) => {
                println!("kept dir   {} ({reason})", dir.from.display())
            }
            RenameOutcome::Failed(e) => eprintln!("failed     {e}"),
            _ => {}
        }
    }
    for file in &report.files {
        match &file.outcome {
            RenameOutcome::Renamed => {
                println!("renamed    {} -> {}", file.from.display(), file.to.display())
            }
            RenameOutcome::Failed(e) => eprintln!("failed     {e}"),
            _ => {}
        }
    }
    if report.is_clean() {
        println!("{} file(s) moved", report.moved_files());
    } else {
        println!(
            "{} file(s) moved, {} failure(s)",
            report.moved_files(),
            report.errors().count()
        );
    }
}
