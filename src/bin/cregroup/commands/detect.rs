use anyhow::{Context, Result};

use conf_regroup::CanonConfig;
use conf_regroup::canon::Canonicalizer;
use conf_regroup::pipeline::{Stage, detect_stage};

use crate::cli::DetectArgs;
use crate::config::build_canon_config;
use crate::display::{Context as DisplayContext, Progress, print_detect_summary, print_split_groups};

pub fn run_detect(args: DetectArgs, ctx: DisplayContext) -> Result<()> {
    let canon = build_canon_config(&args.canon, CanonConfig::default())
        .build()
        .context("Invalid structure key options")?;

    let mut progress = Progress::new(ctx.interactive, 1);
    let step = Stage::Detect.to_string();

    progress.step(&step);
    let summary = detect_stage(&args.input, &args.redo, &args.good, &canon).with_context(|| {
        format!("Failed to detect split structures in '{}'", args.input.display())
    })?;
    progress.complete_step(
        &step,
        &[
            format!("Keys: {}", canon.describe()),
            format!(
                "{} of {} structures split",
                summary.split_groups.len(),
                summary.structures
            ),
        ],
    );

    if ctx.interactive {
        print_detect_summary(&summary);
        print_split_groups(&summary.split_groups);
    }

    progress.finish("Detection complete");
    Ok(())
}
