//! SQLite-backed analysis store.
//!
//! Array-valued columns (`topics`, `keywords`) are stored as JSON text and
//! searched element-wise through `json_each`, so substring matching covers
//! scalar and array fields with one LIKE pattern.

use std::path::{Path, PathBuf};

use parking_lot::Mutex;
use rusqlite::{params, Connection};
use tracing::info;

use textlens_core::{Error, Result, Sentiment};

use crate::types::{Analysis, NewAnalysis};

/// Default page size for listing and search.
pub const DEFAULT_SEARCH_LIMIT: usize = 50;
/// Upper bound on a caller-supplied page size.
pub const MAX_SEARCH_LIMIT: usize = 200;

const SCHEMA_SQL: &str = "
CREATE TABLE IF NOT EXISTS analyses (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    title TEXT,
    topics TEXT NOT NULL DEFAULT '[]',
    sentiment TEXT NOT NULL DEFAULT 'unknown',
    keywords TEXT NOT NULL DEFAULT '[]',
    summary TEXT NOT NULL DEFAULT '',
    original_text TEXT,
    confidence_score REAL,
    created_at TEXT NOT NULL
);
CREATE INDEX IF NOT EXISTS idx_analyses_created_at ON analyses (created_at DESC);
";

const SEARCH_SQL: &str = r"
SELECT * FROM analyses
WHERE lower(summary) LIKE ?1 ESCAPE '\'
   OR lower(coalesce(title, '')) LIKE ?1 ESCAPE '\'
   OR EXISTS (SELECT 1 FROM json_each(analyses.topics)
              WHERE lower(json_each.value) LIKE ?1 ESCAPE '\')
   OR EXISTS (SELECT 1 FROM json_each(analyses.keywords)
              WHERE lower(json_each.value) LIKE ?1 ESCAPE '\')
ORDER BY created_at DESC, id DESC
LIMIT ?2 OFFSET ?3";

/// SQLite store for analysis records.
pub struct AnalysisStore {
    conn: Mutex<Connection>,
    db_path: PathBuf,
}

impl AnalysisStore {
    /// Open or create the store.
    ///
    /// `db_dir` is the directory (e.g., `data/db/`). The file will be
    /// `db_dir/textlens.db`.
    pub fn open(db_dir: impl AsRef<Path>) -> Result<Self> {
        let db_dir = db_dir.as_ref();
        std::fs::create_dir_all(db_dir)
            .map_err(|e| Error::PersistenceUnavailable(e.to_string()))?;
        let db_path = db_dir.join("textlens.db");

        let conn = Self::create_connection(&db_path)?;
        conn.execute_batch(SCHEMA_SQL)
            .map_err(|e| Error::PersistenceUnavailable(format!("Schema init failed: {}", e)))?;

        let store = Self {
            conn: Mutex::new(conn),
            db_path,
        };

        let count = store.count()?;
        info!(
            "AnalysisStore initialized: {} records, path={}",
            count,
            store.db_path.display()
        );

        Ok(store)
    }

    fn create_connection(db_path: &Path) -> Result<Connection> {
        let conn = Connection::open(db_path)
            .map_err(|e| Error::PersistenceUnavailable(e.to_string()))?;
        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA foreign_keys = ON;
             PRAGMA synchronous = NORMAL;",
        )
        .map_err(|e| Error::PersistenceUnavailable(e.to_string()))?;
        Ok(conn)
    }

    /// Insert a record. Returns the persisted analysis with its assigned
    /// `id` and `created_at`.
    pub fn create(&self, record: &NewAnalysis) -> Result<Analysis> {
        let created_at = chrono::Utc::now().to_rfc3339();
        let topics_json = serde_json::to_string(&record.topics)?;
        let keywords_json = serde_json::to_string(&record.keywords)?;

        let conn = self.conn.lock();
        let id = conn
            .prepare_cached(
                "INSERT INTO analyses (title, topics, sentiment, keywords, summary, \
                 original_text, confidence_score, created_at) \
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            )
            .map_err(|e| Error::PersistenceUnavailable(e.to_string()))?
            .insert(params![
                record.title,
                topics_json,
                record.sentiment.as_str(),
                keywords_json,
                record.summary,
                record.original_text,
                record.confidence_score,
                created_at,
            ])
            .map_err(|e| Error::PersistenceUnavailable(e.to_string()))?;

        Ok(Analysis {
            id,
            title: record.title.clone(),
            topics: record.topics.clone(),
            sentiment: record.sentiment,
            keywords: record.keywords.clone(),
            summary: record.summary.clone(),
            original_text: record.original_text.clone(),
            confidence_score: record.confidence_score,
            created_at,
        })
    }

    /// List records newest first.
    pub fn find_recent(&self, limit: usize, offset: usize) -> Result<Vec<Analysis>> {
        let conn = self.conn.lock();
        let mut stmt = conn
            .prepare_cached(
                "SELECT * FROM analyses ORDER BY created_at DESC, id DESC LIMIT ?1 OFFSET ?2",
            )
            .map_err(|e| Error::PersistenceUnavailable(e.to_string()))?;
        let rows = stmt
            .query_map(params![limit as i64, offset as i64], |row| {
                Ok(Self::row_to_analysis(row))
            })
            .map_err(|e| Error::PersistenceUnavailable(e.to_string()))?;
        Ok(rows.filter_map(|r| r.ok()).collect())
    }

    /// Case-insensitive substring search against `summary`, `title`, and
    /// every element of `topics` and `keywords`. Same ordering and
    /// pagination as `find_recent`.
    pub fn search(&self, needle: &str, limit: usize, offset: usize) -> Result<Vec<Analysis>> {
        let pattern = format!("%{}%", escape_like(&needle.to_lowercase()));

        let conn = self.conn.lock();
        let mut stmt = conn
            .prepare_cached(SEARCH_SQL)
            .map_err(|e| Error::PersistenceUnavailable(e.to_string()))?;
        let rows = stmt
            .query_map(params![pattern, limit as i64, offset as i64], |row| {
                Ok(Self::row_to_analysis(row))
            })
            .map_err(|e| Error::PersistenceUnavailable(e.to_string()))?;
        Ok(rows.filter_map(|r| r.ok()).collect())
    }

    /// Count total records.
    pub fn count(&self) -> Result<i64> {
        let conn = self.conn.lock();
        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM analyses", [], |row| row.get(0))
            .map_err(|e| Error::PersistenceUnavailable(e.to_string()))?;
        Ok(count)
    }

    fn row_to_analysis(row: &rusqlite::Row<'_>) -> Analysis {
        Analysis {
            id: row.get("id").unwrap_or(0),
            title: row.get("title").ok().flatten(),
            topics: row
                .get::<_, String>("topics")
                .ok()
                .and_then(|s| serde_json::from_str(&s).ok())
                .unwrap_or_default(),
            sentiment: row
                .get::<_, String>("sentiment")
                .map(|s| Sentiment::parse(&s))
                .unwrap_or_default(),
            keywords: row
                .get::<_, String>("keywords")
                .ok()
                .and_then(|s| serde_json::from_str(&s).ok())
                .unwrap_or_default(),
            summary: row.get("summary").unwrap_or_default(),
            original_text: row.get("original_text").ok().flatten(),
            confidence_score: row.get("confidence_score").ok().flatten(),
            created_at: row.get("created_at").unwrap_or_default(),
        }
    }
}

/// Escape LIKE wildcards so a needle containing `%`, `_`, or `\` matches
/// literally.
fn escape_like(needle: &str) -> String {
    let mut escaped = String::with_capacity(needle.len());
    for c in needle.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}
