use conf_regroup::{CanonConfig, CanonMethod};

use crate::cli::{CanonMethod as CliCanonMethod, CanonOptions};

/// Applies command-line overrides on top of `base`.
pub fn build_canon_config(opts: &CanonOptions, base: CanonConfig) -> CanonConfig {
    let method = match (opts.method, &opts.tag) {
        (Some(m), _) => m.into(),
        (None, Some(_)) => CanonMethod::Tag,
        (None, None) => base.method,
    };

    CanonConfig {
        method,
        tag: opts.tag.clone().or(base.tag),
        stereo: base.stereo && !opts.no_stereo,
        charges: base.charges && !opts.no_charges,
        hydrogens: base.hydrogens && !opts.no_hydrogens,
    }
}

impl From<CliCanonMethod> for CanonMethod {
    fn from(m: CliCanonMethod) -> Self {
        match m {
            CliCanonMethod::Graph => CanonMethod::Graph,
            CliCanonMethod::Tag => CanonMethod::Tag,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn opts() -> CanonOptions {
        CanonOptions {
            method: None,
            tag: None,
            no_stereo: false,
            no_charges: false,
            no_hydrogens: false,
        }
    }

    #[test]
    fn tag_alone_selects_tag_method() {
        let cfg = build_canon_config(
            &CanonOptions {
                tag: Some("SMILES".into()),
                ..opts()
            },
            CanonConfig::default(),
        );
        assert_eq!(cfg.method, CanonMethod::Tag);
        assert_eq!(cfg.tag.as_deref(), Some("SMILES"));
    }

    #[test]
    fn flags_only_switch_features_off() {
        let base = CanonConfig {
            stereo: false,
            ..CanonConfig::default()
        };
        let cfg = build_canon_config(
            &CanonOptions {
                no_charges: true,
                ..opts()
            },
            base,
        );
        assert!(!cfg.stereo);
        assert!(!cfg.charges);
        assert!(cfg.hydrogens);
        assert_eq!(cfg.method, CanonMethod::Graph);
    }
}
