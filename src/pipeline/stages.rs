use super::config::PipelineConfig;
use super::error::Error;
use crate::canon::Canonicalizer;
use crate::io;
use crate::regroup::{self, Group, GroupingReport};
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// One step of [`run_all`], reported to its observer before the step starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Detect,
    ExtractRedo,
    ExtractGood,
    Recover,
    Concat,
    Renumber,
    Verify,
}

impl Stage {
    pub const ALL: [Stage; 7] = [
        Stage::Detect,
        Stage::ExtractRedo,
        Stage::ExtractGood,
        Stage::Recover,
        Stage::Concat,
        Stage::Renumber,
        Stage::Verify,
    ];
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Stage::Detect => "Detecting split structures",
            Stage::ExtractRedo => "Extracting redo conformers",
            Stage::ExtractGood => "Extracting good conformers",
            Stage::Recover => "Recovering grouped order",
            Stage::Concat => "Concatenating",
            Stage::Renumber => "Renumbering",
            Stage::Verify => "Verifying grouping",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone)]
pub struct DetectSummary {
    pub records: usize,
    pub structures: usize,
    pub split_groups: Vec<Group>,
    pub redo: usize,
    pub good: usize,
    pub redo_titles: PathBuf,
    pub good_titles: PathBuf,
}

#[derive(Debug, Clone)]
pub struct ExtractSummary {
    pub requested: usize,
    pub extracted: usize,
    /// Requested titles that the source file does not contain.
    pub missing: Vec<String>,
    pub output: PathBuf,
}

#[derive(Debug, Clone)]
pub struct RecoverSummary {
    pub records: usize,
    pub output: PathBuf,
}

#[derive(Debug, Clone)]
pub struct ConcatSummary {
    pub bytes: u64,
    pub output: PathBuf,
}

#[derive(Debug, Clone)]
pub struct RenumberSummary {
    pub records: usize,
    pub first_title: Option<String>,
    pub last_title: Option<String>,
    pub output: PathBuf,
}

#[derive(Debug, Clone)]
pub struct RunSummary {
    pub detect: DetectSummary,
    pub redo: ExtractSummary,
    pub good: ExtractSummary,
    pub recover: RecoverSummary,
    pub concat: ConcatSummary,
    pub renumber: RenumberSummary,
    pub report: GroupingReport,
}

/// Reads `input`, finds structures whose conformers are split, and writes the
/// `redo` and `good` title lists.
pub fn detect_stage<C>(
    input: &Path,
    redo_titles: &Path,
    good_titles: &Path,
    canon: &C,
) -> Result<DetectSummary, Error>
where
    C: Canonicalizer + ?Sized,
{
    let records = io::read_sdf(input)?;
    let titles: Vec<String> = records.iter().map(|r| r.title().to_string()).collect();

    let index = regroup::detect(&records, canon)?;
    let part = regroup::partition(&titles, &index)?;

    io::write_title_file(redo_titles, &part.redo)?;
    io::write_title_file(good_titles, &part.good)?;

    let split_groups: Vec<Group> = index.split_groups().cloned().collect();
    info!(
        input = %input.display(),
        records = records.len(),
        structures = index.len(),
        split = split_groups.len(),
        redo = part.redo.len(),
        good = part.good.len(),
        "detected split structures"
    );

    Ok(DetectSummary {
        records: records.len(),
        structures: index.len(),
        split_groups,
        redo: part.redo.len(),
        good: part.good.len(),
        redo_titles: redo_titles.to_path_buf(),
        good_titles: good_titles.to_path_buf(),
    })
}

/// Copies the records of `source` named in `titles` to `output`, keeping the
/// order they have in `source`. Missing titles are reported, not fatal.
pub fn extract_stage(source: &Path, titles: &Path, output: &Path) -> Result<ExtractSummary, Error> {
    let records = io::read_sdf(source)?;
    let wanted = io::read_title_file(titles)?;

    let selection = regroup::select_by_title(&records, &wanted);
    io::write_sdf(output, &selection.records)?;

    if !selection.missing.is_empty() {
        warn!(
            titles = %titles.display(),
            missing = selection.missing.len(),
            first = %selection.missing[0],
            "requested titles not found in source"
        );
    }
    info!(
        output = %output.display(),
        extracted = selection.records.len(),
        "extracted records by title"
    );

    Ok(ExtractSummary {
        requested: wanted.len(),
        extracted: selection.records.len(),
        missing: selection.missing,
        output: output.to_path_buf(),
    })
}

/// Rewrites the records of `reloaded` in the order given by `titles`.
pub fn recover_stage(reloaded: &Path, titles: &Path, output: &Path) -> Result<RecoverSummary, Error> {
    let records = io::read_sdf(reloaded)?;
    let desired = io::read_title_file(titles)?;

    let regrouped = regroup::regroup(&records, &desired)?;
    io::write_sdf(output, &regrouped)?;

    info!(output = %output.display(), records = regrouped.len(), "recovered grouped order");
    Ok(RecoverSummary {
        records: regrouped.len(),
        output: output.to_path_buf(),
    })
}

/// Byte-level concatenation of `first` then `second`.
pub fn concat_stage(first: &Path, second: &Path, output: &Path) -> Result<ConcatSummary, Error> {
    let bytes = io::concat_files(&[first, second], output)?;
    info!(output = %output.display(), bytes, "concatenated SD files");
    Ok(ConcatSummary {
        bytes,
        output: output.to_path_buf(),
    })
}

pub fn renumber_stage(input: &Path, output: &Path, prefix: &str) -> Result<RenumberSummary, Error> {
    let records = io::read_sdf(input)?;
    let renumbered = regroup::renumber(&records, prefix);
    io::write_sdf(output, &renumbered)?;

    info!(output = %output.display(), records = renumbered.len(), prefix, "renumbered titles");
    Ok(RenumberSummary {
        records: renumbered.len(),
        first_title: renumbered.first().map(|r| r.title().to_string()),
        last_title: renumbered.last().map(|r| r.title().to_string()),
        output: output.to_path_buf(),
    })
}

/// Checks that `input` is grouped and uniquely titled. With `source`, also
/// checks that it holds exactly the conformers of that file.
pub fn verify_stage<C>(
    input: &Path,
    source: Option<&Path>,
    canon: &C,
) -> Result<GroupingReport, Error>
where
    C: Canonicalizer + ?Sized,
{
    let records = io::read_sdf(input)?;
    let report = match source {
        Some(source) => {
            let originals = io::read_sdf(source)?;
            regroup::verify_regrouped(&records, &originals, canon)?
        }
        None => regroup::verify_grouping(&records, canon)?,
    };

    if report.is_clean() {
        info!(input = %input.display(), structures = report.structures, "grouping verified");
    } else {
        warn!(
            input = %input.display(),
            split = report.split.len(),
            duplicate_titles = report.duplicate_titles.len(),
            missing = report.missing.len(),
            unexpected = report.unexpected.len(),
            "grouping check found problems"
        );
    }
    Ok(report)
}

/// Runs every stage in order using the paths in `config`.
pub fn run_all(config: &PipelineConfig) -> Result<RunSummary, Error> {
    run_all_with(config, |_| {})
}

/// Like [`run_all`], calling `on_stage` before each stage begins.
pub fn run_all_with<F>(config: &PipelineConfig, mut on_stage: F) -> Result<RunSummary, Error>
where
    F: FnMut(Stage),
{
    let input = config.input_path()?;
    let canon = config.canon.build()?;
    info!(input = %input.display(), canon = %canon.describe(), "starting regroup pipeline");

    on_stage(Stage::Detect);
    let detect = detect_stage(&input, &config.redo_titles(), &config.good_titles(), &canon)?;

    on_stage(Stage::ExtractRedo);
    let redo = extract_stage(&input, &config.redo_titles(), &config.redo_sdf())?;

    on_stage(Stage::ExtractGood);
    let good = extract_stage(&input, &config.good_titles(), &config.good_sdf())?;

    on_stage(Stage::Recover);
    let recover = recover_stage(&config.redo_sdf(), &config.redo_titles(), &config.regrouped_sdf())?;

    on_stage(Stage::Concat);
    let concat = concat_stage(&config.good_sdf(), &config.regrouped_sdf(), &config.combined_sdf())?;

    on_stage(Stage::Renumber);
    let renumber = renumber_stage(&config.combined_sdf(), &config.output(), &config.prefix)?;

    on_stage(Stage::Verify);
    let report = verify_stage(&config.output(), Some(input.as_path()), &canon)?;

    Ok(RunSummary {
        detect,
        redo,
        good,
        recover,
        concat,
        renumber,
        report,
    })
}
