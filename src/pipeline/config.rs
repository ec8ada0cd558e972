use super::error::Error;
use crate::canon::CanonConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Every path and option the pipeline stages need.
///
/// Relative paths resolve against `work_dir`. Unset fields take the values
/// of [`PipelineConfig::default`], so a file may name only `input`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Source SD file with every conformer.
    pub input: PathBuf,
    /// Directory holding intermediate and output files.
    pub work_dir: PathBuf,
    /// Title prefix used when renumbering.
    pub prefix: String,
    pub files: StageFiles,
    pub canon: CanonConfig,
}

/// File names written at each stage boundary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StageFiles {
    pub redo_titles: PathBuf,
    pub good_titles: PathBuf,
    pub redo_sdf: PathBuf,
    pub good_sdf: PathBuf,
    pub regrouped_sdf: PathBuf,
    pub combined_sdf: PathBuf,
    pub output: PathBuf,
}

impl Default for StageFiles {
    fn default() -> Self {
        Self {
            redo_titles: PathBuf::from("titles_redo.txt"),
            good_titles: PathBuf::from("titles_good.txt"),
            redo_sdf: PathBuf::from("redo.sdf"),
            good_sdf: PathBuf::from("good.sdf"),
            regrouped_sdf: PathBuf::from("redo_regrouped.sdf"),
            combined_sdf: PathBuf::from("combined.sdf"),
            output: PathBuf::from("renumbered.sdf"),
        }
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::new(),
            work_dir: PathBuf::from("."),
            prefix: "full".to_string(),
            files: StageFiles::default(),
            canon: CanonConfig::default(),
        }
    }
}

impl PipelineConfig {
    pub fn from_toml_str(text: &str) -> Result<Self, Error> {
        Ok(toml::from_str(text)?)
    }

    /// Loads a TOML file. Relative paths inside it stay relative to `work_dir`;
    /// a relative `work_dir` is taken relative to the file's directory.
    pub fn load(path: &Path) -> Result<Self, Error> {
        let text = std::fs::read_to_string(path).map_err(|e| crate::io::Error::open(path, e))?;
        let mut config = Self::from_toml_str(&text).map_err(|e| match e {
            Error::Config { source, .. } => Error::Config {
                path: Some(path.to_path_buf()),
                source,
            },
            other => other,
        })?;

        if config.work_dir.is_relative() {
            if let Some(parent) = path.parent() {
                config.work_dir = parent.join(&config.work_dir);
            }
        }
        Ok(config)
    }

    pub fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.work_dir.join(path)
        }
    }

    pub fn input_path(&self) -> Result<PathBuf, Error> {
        if self.input.as_os_str().is_empty() {
            return Err(Error::MissingInput);
        }
        Ok(self.resolve(&self.input))
    }

    pub fn redo_titles(&self) -> PathBuf {
        self.resolve(&self.files.redo_titles)
    }

    pub fn good_titles(&self) -> PathBuf {
        self.resolve(&self.files.good_titles)
    }

    pub fn redo_sdf(&self) -> PathBuf {
        self.resolve(&self.files.redo_sdf)
    }

    pub fn good_sdf(&self) -> PathBuf {
        self.resolve(&self.files.good_sdf)
    }

    pub fn regrouped_sdf(&self) -> PathBuf {
        self.resolve(&self.files.regrouped_sdf)
    }

    pub fn combined_sdf(&self) -> PathBuf {
        self.resolve(&self.files.combined_sdf)
    }

    pub fn output(&self) -> PathBuf {
        self.resolve(&self.files.output)
    }
}
