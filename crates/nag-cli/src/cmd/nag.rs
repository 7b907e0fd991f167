use super::{load, Locations};
use nag_core::{
    due::SystemClock,
    executor::ShellRunner,
    nag::run_nag,
    prompt::Prompter,
    NagError,
};

pub fn run(locations: &Locations<'_>, name: Option<&str>) -> anyhow::Result<()> {
    let mut loaded = load(locations, name)?;

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    let mut prompter = Prompter::new(stdin.lock(), stdout.lock());

    let summary = run_nag(
        &loaded.entries,
        &mut loaded.ledger,
        &loaded.ledger_path,
        &mut prompter,
        &mut ShellRunner,
        &SystemClock,
        &mut |e: &NagError| eprintln!("error: {e}"),
    )?;
    tracing::debug!(
        prompted = summary.prompted(),
        ran = summary.ran.len(),
        acknowledged = summary.acknowledged.len(),
        kept = summary.kept.len(),
        "nag loop finished"
    );

    if !summary.failed.is_empty() {
        let names: Vec<String> = summary
            .failed
            .iter()
            .map(|e| match e {
                NagError::Execution { name, .. } => name.clone(),
                other => other.to_string(),
            })
            .collect();
        anyhow::bail!(
            "{} command(s) could not be launched and remain due: {}",
            names.len(),
            names.join(", ")
        );
    }
    Ok(())
}
