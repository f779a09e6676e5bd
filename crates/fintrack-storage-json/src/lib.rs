//! fintrack-storage-json
//!
//! File-backed [`LedgerStore`]: one JSON document per user, written through a
//! temp file and rename, with rotating per-user backups.

use std::{
    cmp::Reverse,
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
    sync::{Mutex, MutexGuard},
};

use chrono::{DateTime, NaiveDateTime, Utc};
use fintrack_core::{
    storage::{validate_insert, LedgerStore, RecordBook},
    CoreError,
};
use fintrack_domain::{
    DateRange, Expense, FixedBill, IncomeEntry, Record, RecordKind, ReserveInvestment, Session,
};
use uuid::Uuid;

const DOCUMENT_EXTENSION: &str = "json";
const BACKUP_PREFIX: &str = "records_";
const BACKUP_TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S_%3f";
const TMP_SUFFIX: &str = "tmp";
pub const DEFAULT_RETENTION: usize = 5;

/// A saved copy of a user's document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackupInfo {
    pub user_id: Uuid,
    pub id: String,
    pub created_at: Option<DateTime<Utc>>,
    pub path: PathBuf,
}

/// Filesystem-backed JSON persistence for per-user record books.
#[derive(Debug)]
pub struct JsonLedgerStore {
    records_dir: PathBuf,
    backups_dir: PathBuf,
    retention: usize,
    write_lock: Mutex<()>,
}

impl JsonLedgerStore {
    pub fn new(records_dir: PathBuf, backups_dir: PathBuf) -> Result<Self, CoreError> {
        Self::with_retention(records_dir, backups_dir, DEFAULT_RETENTION)
    }

    pub fn with_retention(
        records_dir: PathBuf,
        backups_dir: PathBuf,
        retention: usize,
    ) -> Result<Self, CoreError> {
        fs::create_dir_all(&records_dir)?;
        fs::create_dir_all(&backups_dir)?;
        Ok(Self {
            records_dir,
            backups_dir,
            retention: retention.max(1),
            write_lock: Mutex::new(()),
        })
    }

    /// Lays out `<root>/records` and `<root>/backups`.
    pub fn under_root(root: &Path, retention: usize) -> Result<Self, CoreError> {
        Self::with_retention(root.join("records"), root.join("backups"), retention)
    }

    pub fn document_path(&self, user_id: Uuid) -> PathBuf {
        self.records_dir
            .join(format!("{user_id}.{DOCUMENT_EXTENSION}"))
    }

    /// The user's stored records; an absent document is an empty book.
    pub fn load_book(&self, user_id: Uuid) -> Result<RecordBook, CoreError> {
        let path = self.document_path(user_id);
        if !path.exists() {
            return Ok(RecordBook::default());
        }
        read_book(&path)
    }

    /// Backups of the session user's document, newest first.
    pub fn list_backups(&self, session: &Session) -> Result<Vec<BackupInfo>, CoreError> {
        self.backups_of(session.user_id)
    }

    fn backups_of(&self, user_id: Uuid) -> Result<Vec<BackupInfo>, CoreError> {
        let dir = self.backup_dir(user_id);
        if !dir.exists() {
            return Ok(Vec::new());
        }
        let mut entries = Vec::new();
        for entry in fs::read_dir(dir)? {
            let path = entry?.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some(DOCUMENT_EXTENSION) {
                continue;
            }
            if let Some(file_name) = path.file_name().and_then(|name| name.to_str()) {
                entries.push(BackupInfo {
                    user_id,
                    id: file_name.to_string(),
                    created_at: parse_backup_timestamp(file_name)
                        .map(|(stamp, _)| DateTime::from_naive_utc_and_offset(stamp, Utc)),
                    path: path.clone(),
                });
            }
        }
        entries.sort_by_key(|info| Reverse(parse_backup_timestamp(&info.id)));
        Ok(entries)
    }

    /// Replaces the user's document with the backup `backup_id`.
    ///
    /// Only ids listed by [`Self::list_backups`] for the same session are
    /// accepted. The document being replaced is itself backed up first.
    pub fn restore_backup(
        &self,
        session: &Session,
        backup_id: &str,
    ) -> Result<RecordBook, CoreError> {
        let source = self
            .backups_of(session.user_id)?
            .into_iter()
            .find(|backup| backup.id == backup_id)
            .ok_or_else(|| CoreError::Storage(format!("backup `{backup_id}` not found")))?;
        let book = read_book(&source.path)?;
        let _guard = self.lock()?;
        self.save_book(session.user_id, &book)?;
        tracing::info!(user = %session.user_id, backup = backup_id, "restored record backup");
        Ok(book)
    }

    fn backup_dir(&self, user_id: Uuid) -> PathBuf {
        self.backups_dir.join(user_id.to_string())
    }

    fn lock(&self) -> Result<MutexGuard<'_, ()>, CoreError> {
        self.write_lock
            .lock()
            .map_err(|_| CoreError::Storage("json store lock poisoned".into()))
    }

    /// Loads, applies `change`, and persists the user's book while holding
    /// the write lock.
    fn update<T>(
        &self,
        user_id: Uuid,
        change: impl FnOnce(&mut RecordBook) -> Result<T, CoreError>,
    ) -> Result<T, CoreError> {
        let _guard = self.lock()?;
        let mut book = self.load_book(user_id)?;
        let outcome = change(&mut book)?;
        self.save_book(user_id, &book)?;
        Ok(outcome)
    }

    fn save_book(&self, user_id: Uuid, book: &RecordBook) -> Result<(), CoreError> {
        let path = self.document_path(user_id);
        if path.exists() {
            self.backup_existing_file(user_id, &path)?;
        }
        let tmp = tmp_path(&path);
        write_file(&tmp, &serialize_book(book)?)?;
        fs::rename(&tmp, &path)?;
        tracing::debug!(user = %user_id, records = book.len(), "saved record book");
        Ok(())
    }

    fn backup_existing_file(&self, user_id: Uuid, path: &Path) -> Result<(), CoreError> {
        let dir = self.backup_dir(user_id);
        fs::create_dir_all(&dir)?;
        let timestamp = Utc::now().format(BACKUP_TIMESTAMP_FORMAT).to_string();
        // Several saves can land in the same millisecond; continue the newest
        // backup's sequence so ordering survives pruning.
        let latest = self
            .backups_of(user_id)?
            .first()
            .and_then(|backup| parse_backup_timestamp(&backup.id));
        let file_name = match latest {
            Some((stamp, sequence))
                if stamp.format(BACKUP_TIMESTAMP_FORMAT).to_string() == timestamp =>
            {
                format!(
                    "{BACKUP_PREFIX}{timestamp}-{}.{DOCUMENT_EXTENSION}",
                    sequence + 1
                )
            }
            _ => format!("{BACKUP_PREFIX}{timestamp}.{DOCUMENT_EXTENSION}"),
        };
        fs::copy(path, dir.join(file_name))?;
        self.prune_backups(user_id)
    }

    fn prune_backups(&self, user_id: Uuid) -> Result<(), CoreError> {
        for stale in self.backups_of(user_id)?.into_iter().skip(self.retention) {
            if let Err(err) = fs::remove_file(&stale.path) {
                tracing::warn!(backup = %stale.id, %err, "failed to prune record backup");
            }
        }
        Ok(())
    }
}

impl LedgerStore for JsonLedgerStore {
    fn list_income_entries(
        &self,
        session: &Session,
        range: DateRange,
    ) -> Result<Vec<IncomeEntry>, CoreError> {
        Ok(self.load_book(session.user_id)?.income_in(session.user_id, range))
    }

    fn list_expenses(
        &self,
        session: &Session,
        range: DateRange,
    ) -> Result<Vec<Expense>, CoreError> {
        Ok(self.load_book(session.user_id)?.expenses_in(session.user_id, range))
    }

    fn list_active_fixed_bills(&self, session: &Session) -> Result<Vec<FixedBill>, CoreError> {
        Ok(self.load_book(session.user_id)?.active_bills(session.user_id))
    }

    fn list_reserves(
        &self,
        session: &Session,
        range: DateRange,
    ) -> Result<Vec<ReserveInvestment>, CoreError> {
        Ok(self.load_book(session.user_id)?.reserves_in(session.user_id, range))
    }

    fn insert(&self, session: &Session, record: Record) -> Result<Uuid, CoreError> {
        validate_insert(session, &record)?;
        self.update(session.user_id, |book| Ok(book.insert(record)))
    }

    fn delete(&self, session: &Session, kind: RecordKind, id: Uuid) -> Result<(), CoreError> {
        self.update(session.user_id, |book| {
            book.remove(session.user_id, kind, id).map(|_| ())
        })
    }

    fn categories(&self, session: &Session, kind: RecordKind) -> Result<Vec<String>, CoreError> {
        Ok(self.load_book(session.user_id)?.categories(session.user_id, kind))
    }
}

/// `records_<timestamp>[-n].json` into its timestamp and collision sequence.
fn parse_backup_timestamp(name: &str) -> Option<(NaiveDateTime, u32)> {
    let stem = name
        .strip_prefix(BACKUP_PREFIX)?
        .strip_suffix(&format!(".{DOCUMENT_EXTENSION}"))?;
    let (stamp, sequence) = match stem.split_once('-') {
        Some((stamp, sequence)) => (stamp, sequence.parse().ok()?),
        None => (stem, 0),
    };
    NaiveDateTime::parse_from_str(stamp, BACKUP_TIMESTAMP_FORMAT)
        .ok()
        .map(|parsed| (parsed, sequence))
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    tmp.set_extension(format!("{DOCUMENT_EXTENSION}.{TMP_SUFFIX}"));
    tmp
}

fn write_file(path: &Path, data: &str) -> Result<(), CoreError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    Ok(())
}

fn read_book(path: &Path) -> Result<RecordBook, CoreError> {
    let data = fs::read_to_string(path)?;
    serde_json::from_str(&data).map_err(|err| CoreError::Serde(err.to_string()))
}

fn serialize_book(book: &RecordBook) -> Result<String, CoreError> {
    serde_json::to_string_pretty(book).map_err(|err| CoreError::Serde(err.to_string()))
}
