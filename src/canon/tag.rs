use super::{Canonicalizer, Error, StructureKey};
use crate::model::record::Record;

/// Uses a key stored by the exporting toolkit in an SD data item.
#[derive(Debug, Clone)]
pub struct TagCanonicalizer {
    tag: String,
}

impl TagCanonicalizer {
    pub fn new(tag: impl Into<String>) -> Self {
        Self { tag: tag.into() }
    }
}

impl Canonicalizer for TagCanonicalizer {
    fn key(&self, record: &Record) -> Result<StructureKey, Error> {
        let value = record
            .data_value(&self.tag)
            .ok_or_else(|| Error::MissingTag {
                title: record.title().to_string(),
                tag: self.tag.clone(),
            })?
            .trim();
        if value.is_empty() {
            return Err(Error::EmptyTag {
                title: record.title().to_string(),
                tag: self.tag.clone(),
            });
        }
        Ok(StructureKey::new(value))
    }

    fn describe(&self) -> String {
        format!("tag <{}>", self.tag)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::record::DataItem;
    use crate::model::table::ConnectionTable;

    fn record(title: &str, items: &[(&str, &str)]) -> Record {
        let data = items
            .iter()
            .map(|(tag, value)| DataItem {
                tag: tag.to_string(),
                value: value.to_string(),
            })
            .collect();
        Record::new(format!("{title}\n"), ConnectionTable::new(), data)
    }

    #[test]
    fn key_is_trimmed_tag_value() {
        let canon = TagCanonicalizer::new("SMILES");
        let key = canon.key(&record("full_1", &[("SMILES", " CCO \n")])).unwrap();
        assert_eq!(key.as_str(), "CCO");
    }

    #[test]
    fn missing_tag_names_record() {
        let canon = TagCanonicalizer::new("InChIKey");
        let err = canon.key(&record("full_7", &[("SMILES", "CCO")])).unwrap_err();
        assert_eq!(
            err.to_string(),
            "record 'full_7' has no 'InChIKey' data item to use as a structure key"
        );
    }

    #[test]
    fn blank_tag_value_is_rejected() {
        let canon = TagCanonicalizer::new("SMILES");
        let err = canon.key(&record("full_2", &[("SMILES", "   ")])).unwrap_err();
        assert!(matches!(err, Error::EmptyTag { .. }));
    }
}
