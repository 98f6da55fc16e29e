// src/runner.rs
use crate::{
    config::RunOptions,
    error::{Error, Result},
    file::ensure_directory,
    progress::Progress,
    registry,
    scrape::RunSummary,
};

/// Top-level runner: validate, find the stage, make sure the output directory exists, run.
pub fn run(opts: &RunOptions, progress: &mut dyn Progress) -> Result<RunSummary> {
    if opts.customer.trim().is_empty() {
        return Err(Error::MissingArg("customer"));
    }
    if opts.base.trim().is_empty() {
        return Err(Error::MissingArg("base"));
    }

    let stage = registry::find(&opts.customer, &opts.base, &opts.entity)?;

    let out_dir = opts.out_dir();
    ensure_directory(&out_dir)?;

    logf!(
        "Running {}/{}/{} → {}",
        stage.customer,
        stage.base,
        stage.entity,
        out_dir.display()
    );
    let summary = (stage.run)(opts, progress);
    progress.finish();

    match &summary {
        Ok(s) => logd!("{} rows written, {} skipped", s.rows_written, s.skipped),
        Err(e) => loge!("{}/{}/{} failed: {e}", stage.customer, stage.base, stage.entity),
    }
    summary
}

/// `(customer, base, entity, about)` for every registered stage.
pub fn list_stages() -> Vec<(&'static str, &'static str, &'static str, &'static str)> {
    registry::STAGES
        .iter()
        .map(|s| (s.customer, s.base, s.entity, s.about))
        .collect()
}
