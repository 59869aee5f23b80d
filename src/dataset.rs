use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::csv_reader::{read_data, Record};
use crate::error::{ReportError, Result};

const IN_MEMORY_SOURCE: &'static str = "<memory>";

/// Read-only table of census records. Every query borrows rows; nothing is
/// ever written back.
#[derive(Debug, Clone)]
pub struct CensusDataset {
    source: PathBuf,
    records: Vec<Record>,
}

impl CensusDataset {
    pub fn load(path: &Path) -> Result<Self> {
        let records = read_data(path)?;
        if records.is_empty() {
            return Err(ReportError::EmptyDataset {
                path: path.to_path_buf(),
            });
        }
        tracing::info!(path = %path.display(), rows = records.len(), "loaded census dataset");
        Ok(CensusDataset {
            source: path.to_path_buf(),
            records,
        })
    }

    pub fn from_records(records: Vec<Record>) -> Self {
        CensusDataset {
            source: PathBuf::from(IN_MEMORY_SOURCE),
            records,
        }
    }

    pub fn source(&self) -> &Path {
        &self.source
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Rows matching `pred`, in file order.
    pub fn filter<P>(&self, pred: P) -> Vec<&Record>
    where
        P: Fn(&Record) -> bool,
    {
        self.records.iter().filter(|r| pred(r)).collect()
    }

    pub fn count_where<P>(&self, pred: P) -> usize
    where
        P: Fn(&Record) -> bool,
    {
        self.records.iter().filter(|r| pred(r)).count()
    }
}

/// Count rows per category, keeping categories in order of first
/// appearance. Callers rely on this order for tie-breaks.
pub fn value_counts<'a, I, F>(rows: I, key: F) -> Vec<(&'a str, usize)>
where
    I: IntoIterator<Item = &'a Record>,
    F: Fn(&'a Record) -> &'a str,
{
    let mut index: HashMap<&'a str, usize> = HashMap::new();
    let mut counts: Vec<(&'a str, usize)> = Vec::new();
    for row in rows {
        let value = key(row);
        match index.get(value) {
            Some(&pos) => counts[pos].1 += 1,
            None => {
                index.insert(value, counts.len());
                counts.push((value, 1));
            }
        }
    }
    counts
}
