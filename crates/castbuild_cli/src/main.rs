mod cli;

use std::path::PathBuf;

use anyhow::{bail, Context as _};
use clap::Parser;

use castbuild_core::config::ConfigManager;
use castbuild_core::jobs::resolve_jobs;
use castbuild_core::logging::{self, LogCallback, LogLevel};
use castbuild_core::orchestrator::{BatchRunner, BatchSummary};

use cli::Cli;

fn main() -> anyhow::Result<()> {
    let args = Cli::parse();

    logging::init_tracing(if args.verbose {
        LogLevel::Debug
    } else {
        LogLevel::Info
    });

    let mut manager = ConfigManager::new(&args.config);
    manager
        .load_or_create()
        .with_context(|| format!("loading config {}", args.config.display()))?;

    if let Some(output) = &args.output {
        manager.settings_mut().paths.output_folder = output.display().to_string();
    }

    let settings = manager.settings().clone();

    let mut jobs = resolve_jobs(&settings.jobs).context("resolving jobs from config")?;

    if !args.only.is_empty() {
        for id in &args.only {
            if !jobs.iter().any(|j| &j.id == id) {
                bail!("Unknown job id: {}", id);
            }
        }
        jobs.retain(|j| args.only.contains(&j.id));
    }

    if args.list {
        for job in &jobs {
            println!(
                "{}\t{} -> {}",
                job.id,
                job.script.display(),
                job.source.display()
            );
        }
        return Ok(());
    }

    if jobs.is_empty() {
        println!(
            "No jobs configured in {} (add [[jobs]] entries)",
            args.config.display()
        );
        return Ok(());
    }

    let output_dir = PathBuf::from(&settings.paths.output_folder);
    let log_dir = PathBuf::from(&settings.paths.logs_folder);

    let mut runner = BatchRunner::new(settings, output_dir, log_dir);
    if let Some(workers) = args.workers {
        runner = runner.with_workers(workers);
    }

    let results = runner.run(
        &jobs,
        |job_id| {
            let id = job_id.to_string();
            let callback: LogCallback = Box::new(move |line: &str| println!("[{}] {}", id, line));
            Some(callback)
        },
        None,
    )?;

    let summary = BatchSummary::from_results(&results);

    for result in results.iter().filter(|r| !r.success) {
        eprintln!(
            "FAILED {}: {}",
            result.job_id,
            result.error.as_deref().unwrap_or("unknown error")
        );
    }
    println!(
        "{} job(s): {} succeeded, {} failed",
        summary.total, summary.succeeded, summary.failed
    );

    if !summary.is_success() {
        std::process::exit(1);
    }
    Ok(())
}
