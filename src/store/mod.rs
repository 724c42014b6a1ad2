mod error;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::ser::PrettyFormatter;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::models::{self, Expense};

pub(crate) use error::StoreError;

pub(crate) type Result<T, E = StoreError> = std::result::Result<T, E>;

/// On-disk shape of a record. Older files may lack `date`.
#[derive(Deserialize)]
struct StoredExpense {
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    amount: Decimal,
    category: String,
    #[serde(default)]
    date: Option<String>,
}

/// The ordered expense log and the JSON file backing it.
///
/// Records are addressed by position. Every mutation rewrites the whole file
/// and only updates memory once the write succeeded.
pub(crate) struct Store {
    path: PathBuf,
    expenses: Vec<Expense>,
}

impl Store {
    pub(crate) fn load(path: &Path) -> Result<Self> {
        Self::load_with_default_date(path, &models::today())
    }

    /// Load, filling any record without a date with `default_date`.
    /// The file itself is left untouched until the next save.
    pub(crate) fn load_with_default_date(path: &Path, default_date: &str) -> Result<Self> {
        let expenses = match fs::read(path) {
            Ok(bytes) => decode(path, &bytes, default_date)?,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "no expense file yet, starting empty");
                Vec::new()
            }
            Err(source) => {
                return Err(StoreError::Io {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };

        debug!(path = %path.display(), count = expenses.len(), "loaded expenses");
        Ok(Self {
            path: path.to_path_buf(),
            expenses,
        })
    }

    pub(crate) fn path(&self) -> &Path {
        &self.path
    }

    pub(crate) fn expenses(&self) -> &[Expense] {
        &self.expenses
    }

    pub(crate) fn get(&self, position: usize) -> Option<&Expense> {
        self.expenses.get(position)
    }

    pub(crate) fn len(&self) -> usize {
        self.expenses.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.expenses.is_empty()
    }

    /// Write the full sequence to disk.
    pub(crate) fn save(&self) -> Result<()> {
        self.write(&self.expenses)
    }

    /// Append a record and return its position.
    pub(crate) fn add(&mut self, amount: &str, category: &str, date: &str) -> Result<usize> {
        let expense = Expense::parse(amount, category, date)?;
        let mut next = self.expenses.clone();
        next.push(expense);
        self.commit(next)?;

        let position = self.expenses.len() - 1;
        info!(position, "added expense");
        Ok(position)
    }

    pub(crate) fn update(
        &mut self,
        position: usize,
        amount: &str,
        category: &str,
        date: &str,
    ) -> Result<()> {
        let expense = Expense::parse(amount, category, date)?;
        self.check_position(position)?;

        let mut next = self.expenses.clone();
        next[position] = expense;
        self.commit(next)?;

        info!(position, "updated expense");
        Ok(())
    }

    /// Remove the record at `position`. With no position this does nothing.
    pub(crate) fn delete(&mut self, position: Option<usize>) -> Result<Option<Expense>> {
        let Some(position) = position else {
            return Ok(None);
        };
        self.check_position(position)?;

        let mut next = self.expenses.clone();
        let removed = next.remove(position);
        self.commit(next)?;

        info!(position, "deleted expense");
        Ok(Some(removed))
    }

    /// Remove every record. Callers are expected to confirm first.
    pub(crate) fn clear(&mut self) -> Result<()> {
        let count = self.expenses.len();
        self.commit(Vec::new())?;
        info!(count, "cleared all expenses");
        Ok(())
    }

    fn check_position(&self, position: usize) -> Result<()> {
        if position < self.expenses.len() {
            Ok(())
        } else {
            Err(StoreError::Index {
                position,
                len: self.expenses.len(),
            })
        }
    }

    fn commit(&mut self, next: Vec<Expense>) -> Result<()> {
        self.write(&next)?;
        self.expenses = next;
        Ok(())
    }

    /// Serialize to a temp file next to the target, then rename over it.
    fn write(&self, expenses: &[Expense]) -> Result<()> {
        let io_err = |source: io::Error| StoreError::Io {
            path: self.path.clone(),
            source,
        };

        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        fs::create_dir_all(dir).map_err(io_err)?;

        let mut tmp = tempfile::NamedTempFile::new_in(dir).map_err(io_err)?;
        {
            let formatter = PrettyFormatter::with_indent(b"    ");
            let mut ser = serde_json::Serializer::with_formatter(&mut tmp, formatter);
            expenses
                .serialize(&mut ser)
                .map_err(|e| io_err(io::Error::from(e)))?;
        }
        tmp.write_all(b"\n").map_err(io_err)?;
        tmp.as_file().sync_all().map_err(io_err)?;
        tmp.persist(&self.path).map_err(|e| io_err(e.error))?;

        debug!(path = %self.path.display(), count = expenses.len(), "saved expenses");
        Ok(())
    }
}

fn decode(path: &Path, bytes: &[u8], default_date: &str) -> Result<Vec<Expense>> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(Vec::new());
    }

    let stored: Vec<StoredExpense> =
        serde_json::from_slice(bytes).map_err(|source| StoreError::CorruptData {
            path: path.to_path_buf(),
            source,
        })?;

    let mut migrated = 0;
    let expenses = stored
        .into_iter()
        .map(|s| {
            let date = s.date.unwrap_or_else(|| {
                migrated += 1;
                default_date.to_string()
            });
            Expense::new(s.amount, s.category, date)
        })
        .collect();

    if migrated > 0 {
        warn!(count = migrated, date = default_date, "filled missing expense dates");
    }
    Ok(expenses)
}
