use super::table::ConnectionTable;

/// One `> <TAG>` data item attached to an SD record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataItem {
    pub tag: String,
    pub value: String,
}

/// A single conformer entry of an SD file.
///
/// The record owns the verbatim text of its block (molfile plus data items,
/// without the `$$$$` terminator). Every line of `block` ends with `\n`.
/// The title is always the first line of the block, kept as written
/// including surrounding spaces; [`Record::with_title`] is the only way to
/// change it and rewrites nothing else.
#[derive(Debug, Clone)]
pub struct Record {
    title: String,
    block: String,
    pub table: ConnectionTable,
    pub data: Vec<DataItem>,
}

impl Record {
    pub fn new(block: String, table: ConnectionTable, data: Vec<DataItem>) -> Self {
        let title = block.lines().next().unwrap_or_default().to_string();
        Self {
            title,
            block,
            table,
            data,
        }
    }

    #[inline]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[inline]
    pub fn block(&self) -> &str {
        &self.block
    }

    /// Everything after the header line.
    pub fn body(&self) -> &str {
        self.block.split_once('\n').map_or("", |(_, rest)| rest)
    }

    /// Looks up the first data item with the given tag.
    pub fn data_value(&self, tag: &str) -> Option<&str> {
        self.data
            .iter()
            .find(|item| item.tag == tag)
            .map(|item| item.value.as_str())
    }

    /// Returns a copy of this record whose header line is `title`.
    pub fn with_title(&self, title: &str) -> Self {
        let rest = self.body();
        let mut block = String::with_capacity(title.len() + 1 + rest.len());
        block.push_str(title);
        block.push('\n');
        block.push_str(rest);

        Self {
            title: title.to_string(),
            block,
            table: self.table.clone(),
            data: self.data.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(block: &str) -> Record {
        Record::new(block.to_string(), ConnectionTable::new(), Vec::new())
    }

    #[test]
    fn title_keeps_first_line_as_written() {
        let rec = record("  full_3  \n  prog\n\n");
        assert_eq!(rec.title(), "  full_3  ");
        assert_ne!(rec.title(), record("full_3\n  prog\n\n").title());
    }

    #[test]
    fn body_skips_header_line() {
        assert_eq!(record("full_1\n  prog\nM  END\n").body(), "  prog\nM  END\n");
        assert_eq!(record("bare").body(), "");
    }

    #[test]
    fn with_title_rewrites_only_header_line() {
        let rec = record("full_9\n  OEChem\n\n  0  0  0  0  0  0  0  0  0  0999 V2000\nM  END\n");
        let renamed = rec.with_title("full_1");

        assert_eq!(renamed.title(), "full_1");
        assert_eq!(
            renamed.block(),
            "full_1\n  OEChem\n\n  0  0  0  0  0  0  0  0  0  0999 V2000\nM  END\n"
        );
        assert_eq!(rec.title(), "full_9");
    }

    #[test]
    fn data_value_returns_first_match() {
        let mut rec = record("t\n");
        rec.data = vec![
            DataItem {
                tag: "SMILES".into(),
                value: "CCO".into(),
            },
            DataItem {
                tag: "SMILES".into(),
                value: "OCC".into(),
            },
        ];
        assert_eq!(rec.data_value("SMILES"), Some("CCO"));
        assert_eq!(rec.data_value("InChIKey"), None);
    }
}
