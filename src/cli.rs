// src/cli.rs
use crate::config::options::AppOptions;
use crate::error::RunError;
use crate::progress::Progress;
use crate::runner::{self, RunSummary};

/// Prints status lines to stdout as sources complete.
#[derive(Default)]
pub struct ConsoleProgress {
    done: usize,
    failed: usize,
    total: usize,
}

impl Progress for ConsoleProgress {
    fn begin(&mut self, total: usize) {
        self.total = total;
        println!("********************");
    }
    fn log(&mut self, msg: &str) {
        println!("{msg}");
    }
    fn item_done(&mut self, _index: usize, name: &str) {
        self.done += 1;
        println!(" - Got ({}/{}): {}", self.done + self.failed, self.total, name);
    }
    fn item_failed(&mut self, _index: usize, url: &str, reason: &str) {
        self.failed += 1;
        println!(" ! Skipped ({}/{}): {} ({})", self.done + self.failed, self.total, url, reason);
    }
    fn finish(&mut self) {
        println!("********************");
        println!("Products: {}, skipped: {}", self.done, self.failed);
    }
}

/// No arguments: read `source.txt` from the working directory, write the
/// artifact next to it. Environment overrides are described in `config::options`.
pub fn run() -> Result<RunSummary, RunError> {
    crate::log::init();
    let opts = AppOptions::from_env();
    let mut progress = ConsoleProgress::default();
    runner::run(&opts, Some(&mut progress))
}
