use crate::error::{CliError, CliResult};
use crossbeam_queue::ArrayQueue;
use modus::checker::Config;
use std::{
    fs::File,
    io::BufReader,
    path::Path,
    sync::atomic::{AtomicBool, Ordering},
    thread,
};

/// How many files ended in each state.
#[derive(Debug, Default, Clone, Copy)]
pub struct BatchResults {
    pub valid: usize,
    pub invalid: usize,
    pub failed: usize,
    pub interrupted: usize,
}

impl BatchResults {
    fn combine(a: Self, b: Self) -> Self {
        Self {
            valid: a.valid + b.valid,
            invalid: a.invalid + b.invalid,
            failed: a.failed + b.failed,
            interrupted: a.interrupted + b.interrupted,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.invalid == 0 && self.failed == 0 && self.interrupted == 0
    }
}

fn module_address(path: &Path) -> &str {
    path.file_stem().and_then(|s| s.to_str()).unwrap_or_default()
}

fn run_job(path: &Path, config: &Config, interrupt: &AtomicBool) -> Result<bool, modus::Error> {
    let file = BufReader::new(File::open(path)?);
    let report = modus::check_with_interrupt(file, module_address(path), config, interrupt)?;
    for e in &report.errors {
        log::error!("{}", e);
    }
    Ok(report.is_valid())
}

fn worker_thread(
    jobs_queue: &ArrayQueue<&Path>,
    config: &Config,
    interrupt: &AtomicBool,
    fail_fast: bool,
) -> BatchResults {
    let mut results = BatchResults::default();

    while let Some(path) = jobs_queue.pop() {
        if interrupt.load(Ordering::Acquire) {
            results.interrupted += 1;
            continue;
        }
        match run_job(path, config, interrupt) {
            Ok(true) => {
                log::info!("'{}' is valid", path.display());
                results.valid += 1;
            }
            Ok(false) => {
                log::error!("'{}' is invalid", path.display());
                results.invalid += 1;
            }
            Err(modus::Error::Interrupted) => {
                log::info!("checking of '{}' was interrupted", path.display());
                results.interrupted += 1;
                continue;
            }
            Err(e) => {
                log::error!("encountered error in file '{}': {}", path.display(), e);
                results.failed += 1;
            }
        }
        if fail_fast && !results.is_valid() {
            interrupt.store(true, Ordering::Release);
        }
    }

    results
}

/// Checks every file on `num_jobs` worker threads. With `fail_fast`, the first file that is not
/// valid makes the other workers stop before their next proposition.
pub fn run_batch<P: AsRef<Path>>(
    files: &[P],
    num_jobs: usize,
    config: &Config,
    fail_fast: bool,
) -> CliResult<BatchResults> {
    const STACK_SIZE: usize = 64 * 1024 * 1024;

    if files.is_empty() {
        return Ok(BatchResults::default());
    }

    let jobs_queue = ArrayQueue::new(files.len());
    for f in files {
        // The queue has room for every file
        jobs_queue.force_push(f.as_ref());
    }
    let interrupt = AtomicBool::new(false);

    thread::scope(|s| {
        let jobs_queue = &jobs_queue;
        let interrupt = &interrupt;

        let workers = (0..num_jobs.max(1))
            .map(|_| {
                thread::Builder::new()
                    .stack_size(STACK_SIZE)
                    .spawn_scoped(s, move || {
                        worker_thread(jobs_queue, config, interrupt, fail_fast)
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let mut results = BatchResults::default();
        for w in workers {
            match w.join() {
                Ok(r) => results = BatchResults::combine(results, r),
                Err(panic) => std::panic::resume_unwind(panic),
            }
        }
        Ok::<_, CliError>(results)
    })
}
