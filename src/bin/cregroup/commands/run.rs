use anyhow::{Context, Result, bail};

use conf_regroup::pipeline::{RunSummary, Stage, run_all_with};

use crate::cli::RunArgs;
use crate::config::build_pipeline_config;
use crate::display::{
    Context as DisplayContext, Progress, print_grouping_report, print_renumber_summary,
    print_split_groups, problem_summary,
};

pub fn run_pipeline(args: RunArgs, ctx: DisplayContext) -> Result<()> {
    let config = build_pipeline_config(&args)?;
    std::fs::create_dir_all(&config.work_dir).with_context(|| {
        format!(
            "Failed to create work directory '{}'",
            config.work_dir.display()
        )
    })?;

    let mut progress = Progress::new(ctx.interactive, Stage::ALL.len());
    let mut current: Option<Stage> = None;

    let result = run_all_with(&config, |stage| {
        if let Some(done) = current.replace(stage) {
            progress.complete_step(&done.to_string(), &[]);
        }
        progress.step(&stage.to_string());
    });

    let summary = result.with_context(|| match current {
        Some(stage) => format!("Pipeline failed at stage: {}", stage),
        None => "Pipeline failed before the first stage".to_string(),
    })?;

    let clean = summary.report.is_clean();
    let verify = Stage::Verify.to_string();
    if clean {
        progress.complete_step(&verify, &verify_substeps(&summary));
    } else {
        progress.warn_step(&verify, &verify_substeps(&summary));
    }

    if ctx.interactive {
        print_split_groups(&summary.detect.split_groups);
        print_renumber_summary(&summary.renumber);
        print_grouping_report(&summary.report);
    }

    if !clean {
        bail!(
            "Output '{}' is not cleanly grouped: {}",
            summary.renumber.output.display(),
            problem_summary(&summary.report)
        );
    }

    progress.finish("Regroup complete");
    Ok(())
}

fn verify_substeps(summary: &RunSummary) -> Vec<String> {
    let mut steps = vec![
        format!(
            "{} split structures regrouped ({} conformers moved)",
            summary.detect.split_groups.len(),
            summary.recover.records
        ),
        format!(
            "{} records written to {}",
            summary.renumber.records,
            summary.renumber.output.display()
        ),
    ];
    let missing = summary.redo.missing.len() + summary.good.missing.len();
    if missing > 0 {
        steps.push(format!("{} listed titles were not extracted", missing));
    }
    steps
}
