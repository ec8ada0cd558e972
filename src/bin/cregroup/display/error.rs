use std::io::{self, Write};

use anyhow::Error;

use conf_regroup::canon::Error as CanonError;
use conf_regroup::io::Error as IoError;
use conf_regroup::pipeline::Error as PipelineError;
use conf_regroup::regroup::Error as RegroupError;

use crate::util::text::wrap;

#[rustfmt::skip]
pub fn print_error(err: &Error) {
    let mut stderr = io::stderr().lock();

    let _ = writeln!(stderr);
    let _ = writeln!(stderr, "   ╔══════════════════════════════════════════════════════════════╗");
    let _ = writeln!(stderr, "   ║  ✗ Error                                                     ║");
    let _ = writeln!(stderr, "   ╟──────────────────────────────────────────────────────────────╢");

    for line in wrap(&err.to_string(), 59) {
        let _ = writeln!(stderr, "   ║  {:<59} ║", line);
    }

    let mut source = err.source();
    while let Some(cause) = source {
        let _ = writeln!(stderr, "   ╟──────────────────────────────────────────────────────────────╢");
        let _ = writeln!(stderr, "   ║  Caused by:                                                  ║");
        for line in wrap(&cause.to_string(), 57) {
            let _ = writeln!(stderr, "   ║    {:<57} ║", line);
        }
        source = cause.source();
    }

    if let Some(hints) = HintCollector::collect(err) {
        let _ = writeln!(stderr, "   ╟──────────────────────────────────────────────────────────────╢");
        let _ = writeln!(stderr, "   ║  Hints:                                                      ║");
        for hint in hints {
            let wrapped = wrap(&hint, 55);
            if let Some((first, rest)) = wrapped.split_first() {
                let _ = writeln!(stderr, "   ║    • {:<55} ║", first);
                for line in rest {
                    let _ = writeln!(stderr, "   ║      {:<55} ║", line);
                }
            }
        }
    }

    let _ = writeln!(stderr, "   ╚══════════════════════════════════════════════════════════════╝");
    let _ = writeln!(stderr);
}

struct HintCollector {
    hints: Vec<String>,
    has_typed_hints: bool,
}

impl HintCollector {
    fn collect(err: &Error) -> Option<Vec<String>> {
        let mut collector = Self {
            hints: Vec::new(),
            has_typed_hints: false,
        };

        if let Some(e) = err.downcast_ref::<PipelineError>() {
            collector.pipeline_hints(e);
        } else if let Some(e) = err.downcast_ref::<RegroupError>() {
            collector.regroup_hints(e);
        } else if let Some(e) = err.downcast_ref::<CanonError>() {
            collector.canon_hints(e);
        } else if let Some(e) = err.downcast_ref::<IoError>() {
            collector.io_hints(e);
        }

        if !collector.has_typed_hints {
            collector.fallback_hints(err);
        }

        (!collector.hints.is_empty()).then_some(collector.hints)
    }

    fn add(&mut self, hint: impl Into<String>) {
        self.hints.push(hint.into());
        self.has_typed_hints = true;
    }

    fn pipeline_hints(&mut self, err: &PipelineError) {
        match err {
            PipelineError::Io(e) => self.io_hints(e),
            PipelineError::Regroup(e) => self.regroup_hints(e),
            PipelineError::Canon(e) => self.canon_hints(e),

            PipelineError::Config { .. } => {
                self.add("The pipeline config is not valid TOML or has unknown values");
                self.add("Top-level keys: input, work_dir, prefix; tables: [files], [canon]");
                self.add("[canon] method must be \"graph\" or \"tag\"");
            }

            PipelineError::MissingInput => {
                self.add("Set `input` in the config file or pass -i/--input");
            }
        }
    }

    fn io_hints(&mut self, err: &IoError) {
        match err {
            IoError::Io { source } => self.std_io_hints(source),

            IoError::Open { source, .. } | IoError::Create { source, .. } => {
                self.std_io_hints(source)
            }

            IoError::Parse { line, .. } => {
                self.add(format!("Inspect the SD file around line {}", line));
                self.add("Counts line: atom and bond counts in columns 1-3 and 4-6");
                self.add("Each record must end with a `$$$$` line");
            }

            IoError::UnsupportedVersion { version, .. } => {
                self.add(format!("{} molfiles cannot be read", version));
                self.add("Export the conformers as V2000 SD files");
            }
        }
    }

    fn std_io_hints(&mut self, source: &std::io::Error) {
        use std::io::ErrorKind;

        match source.kind() {
            ErrorKind::NotFound => {
                self.add("Check the path spelling and ensure the file exists");
                self.add("Stage files are looked up relative to the work directory");
            }

            ErrorKind::PermissionDenied => {
                self.add("Check file permissions with `ls -la`");
            }

            ErrorKind::InvalidData => {
                self.add("The file is not valid UTF-8 text; is it really an SD file?");
            }

            ErrorKind::WriteZero | ErrorKind::StorageFull => {
                self.add("Check available disk space");
            }

            _ => {
                self.add("Check file path, permissions, and disk space");
            }
        }
    }

    fn regroup_hints(&mut self, err: &RegroupError) {
        match err {
            RegroupError::Canon(e) => self.canon_hints(e),

            RegroupError::MissingTitle { title } => {
                self.add(format!("'{}' is listed but was not extracted", title));
                self.add("Rerun `cregroup extract` with the same title list and source file");
            }

            RegroupError::DuplicateTitle { title, .. } => {
                self.add(format!("Records are matched by title; '{}' is ambiguous", title));
                self.add("Run `cregroup renumber` on the input first to make titles unique");
            }

            RegroupError::PositionOutOfRange { .. } => {
                self.add("Title list and record set are out of step");
                self.add("Rerun `cregroup detect` on the current input");
            }
        }
    }

    fn canon_hints(&mut self, err: &CanonError) {
        match err {
            CanonError::MissingTag { tag, .. } | CanonError::EmptyTag { tag, .. } => {
                self.add(format!("Every record needs a non-empty '{}' data item", tag));
                self.add("Use --canon graph to key records by their connection table");
            }

            CanonError::TagNotConfigured => {
                self.add("Pass --tag NAME, or set `tag` under [canon]");
            }
        }
    }

    fn fallback_hints(&mut self, err: &Error) {
        let msg = error_chain_text(err);

        if msg.contains("no such file") || msg.contains("not found") {
            self.hints.push("Verify the file exists and is readable".to_string());
        } else if msg.contains("permission denied") {
            self.hints.push("Ensure you have the required access rights".to_string());
        }
    }
}

fn error_chain_text(err: &Error) -> String {
    err.chain()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("\n")
        .to_lowercase()
}
