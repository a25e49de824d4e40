use crate::error::Result;
use rusqlite::{params, Connection};

/// Previously submitted search queries, kept as an insertion-ordered set.
pub struct SearchHistoryRepo<'a> {
    conn: &'a Connection,
}

impl<'a> SearchHistoryRepo<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// Returns `false` for blank queries and for queries already present.
    /// An existing entry keeps its original position.
    pub fn add(&self, now_utc: i64, query: &str) -> Result<bool> {
        if query.trim().is_empty() {
            return Ok(false);
        }
        let inserted = self.conn.execute(
            "INSERT OR IGNORE INTO search_history (query, added_at) VALUES (?1, ?2);",
            params![query, now_utc],
        )?;
        Ok(inserted == 1)
    }

    pub fn remove(&self, query: &str) -> Result<bool> {
        let removed = self
            .conn
            .execute("DELETE FROM search_history WHERE query = ?1;", [query])?;
        Ok(removed > 0)
    }

    pub fn clear(&self) -> Result<usize> {
        let removed = self.conn.execute("DELETE FROM search_history;", [])?;
        Ok(removed)
    }

    /// Newest insertion first.
    pub fn list(&self) -> Result<Vec<String>> {
        let mut stmt = self
            .conn
            .prepare("SELECT query FROM search_history ORDER BY seq DESC;")?;
        let mut rows = stmt.query([])?;
        let mut items = Vec::new();
        while let Some(row) = rows.next()? {
            items.push(row.get(0)?);
        }
        Ok(items)
    }
}
