use anyhow::{Context, Result};

use conf_regroup::pipeline::extract_stage;

use crate::cli::ExtractArgs;
use crate::display::{Context as DisplayContext, Progress, print_extract_summary};

pub fn run_extract(args: ExtractArgs, ctx: DisplayContext) -> Result<()> {
    let mut progress = Progress::new(ctx.interactive, 1);
    let step = "Extracting records by title";

    progress.step(step);
    let summary = extract_stage(&args.input, &args.titles, &args.output).with_context(|| {
        format!(
            "Failed to extract titles from '{}' into '{}'",
            args.input.display(),
            args.output.display()
        )
    })?;

    let substeps = vec![format!(
        "{} of {} titles found",
        summary.extracted, summary.requested
    )];
    if summary.missing.is_empty() {
        progress.complete_step(step, &substeps);
    } else {
        progress.warn_step(step, &substeps);
    }

    if ctx.interactive {
        print_extract_summary(&summary);
    }

    progress.finish("Extraction complete");
    Ok(())
}
