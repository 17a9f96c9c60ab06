use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use indicatif_log_bridge::LogWrapper;
use log::{info, LevelFilter, SetLoggerError};
use std::sync::OnceLock;
use std::time::{Duration, Instant};

static MULTI: OnceLock<MultiProgress> = OnceLock::new();


pub fn initialize_logging(log_level: LevelFilter) -> Result<(), SetLoggerError> {
    let logger = env_logger::builder()
        .filter_level(log_level)
        .parse_default_env() // Allow overriding log level through RUST_LOG env var
        .build();

    let multi = MULTI.get_or_init(MultiProgress::new);

    LogWrapper::new(multi.clone(), logger).try_init()?;

    Ok(())
}


pub fn run_with_spinner<'a, F, Out>(
    target: &'a str, task_desc: &'a str, function: F,
) -> Out where
    F: FnOnce() -> Out,
{
    let start_time = Instant::now();

    let pb = ProgressBar::new_spinner().with_message(format!("{}...", task_desc));
    if let Ok(style) = ProgressStyle::with_template("{spinner:.white} [{elapsed:.green}] {msg}") {
        pb.set_style(style);
    }
    pb.enable_steady_tick(Duration::from_millis(100));

    // Set up connection with log library so that progress bars don't jump around.
    // Without initialized logging the spinner just draws on its own.
    let pb = match MULTI.get() {
        Some(multi) => multi.add(pb),
        None => pb,
    };

    let out = function();

    pb.finish_and_clear();
    if let Some(multi) = MULTI.get() {
        multi.remove(&pb);
    }
    let elapsed = indicatif::HumanDuration(start_time.elapsed());
    info!(target: target, "{} finished (took {})", task_desc, elapsed);

    out
}

// Hides the progress bars while `function` writes to the terminal directly
pub fn suspend<F, Out>(function: F) -> Out where
    F: FnOnce() -> Out,
{
    match MULTI.get() {
        Some(multi) => multi.suspend(function),
        None => function(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spinner_returns_closure_output() {
        let out = run_with_spinner("test", "Adding numbers", || 40 + 2);

        assert_eq!(out, 42);
    }

    #[test]
    fn test_suspend_returns_closure_output() {
        let out = run_with_spinner("test", "Printing", || suspend(|| "printed"));

        assert_eq!(out, "printed");
    }
}
