use crate::error::Result;
use rusqlite::Connection;
use std::path::Path;
use std::time::Duration;

/// The CLI is the only writer; a short wait covers a second invocation
/// racing on the same history file.
pub const BUSY_TIMEOUT: Duration = Duration::from_millis(2000);

pub fn open(path: &Path) -> Result<Connection> {
    create_private_file(path)?;
    let conn = Connection::open(path)?;
    conn.pragma_update(None, "journal_mode", "WAL")?;
    apply_pragmas(&conn)?;
    Ok(conn)
}

pub fn open_in_memory() -> Result<Connection> {
    let conn = Connection::open_in_memory()?;
    apply_pragmas(&conn)?;
    Ok(conn)
}

// Removed search queries are zeroed on disk rather than left in free pages.
fn apply_pragmas(conn: &Connection) -> Result<()> {
    conn.pragma_update(None, "synchronous", "NORMAL")?;
    conn.pragma_update(None, "secure_delete", "ON")?;
    conn.busy_timeout(BUSY_TIMEOUT)?;
    Ok(())
}

/// Search history is personal; the file is created owner-only before
/// SQLite sees it, and WAL sidecars inherit that mode.
#[cfg(unix)]
fn create_private_file(path: &Path) -> Result<()> {
    use std::fs::{self, OpenOptions};
    use std::os::unix::fs::{OpenOptionsExt, PermissionsExt};

    if path.exists() {
        fs::set_permissions(path, fs::Permissions::from_mode(0o600))?;
    } else {
        OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(false)
            .mode(0o600)
            .open(path)?;
    }
    Ok(())
}

#[cfg(not(unix))]
fn create_private_file(_path: &Path) -> Result<()> {
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn pragma_i64(conn: &Connection, name: &str) -> i64 {
        conn.pragma_query_value(None, name, |row| row.get(0))
            .expect("pragma")
    }

    #[test]
    fn file_database_uses_wal_and_secure_delete() {
        let temp = TempDir::new().expect("temp dir");
        let conn = open(&temp.path().join("history.sqlite3")).expect("open");

        let mode: String = conn
            .pragma_query_value(None, "journal_mode", |row| row.get(0))
            .expect("journal_mode");
        assert_eq!(mode, "wal");
        assert_eq!(pragma_i64(&conn, "secure_delete"), 1);
        assert_eq!(pragma_i64(&conn, "synchronous"), 1);
        assert_eq!(pragma_i64(&conn, "busy_timeout"), 2000);
    }

    #[test]
    fn in_memory_database_gets_the_same_pragmas() {
        let conn = open_in_memory().expect("open");
        assert_eq!(pragma_i64(&conn, "secure_delete"), 1);
        assert_eq!(pragma_i64(&conn, "busy_timeout"), 2000);
    }

    #[cfg(unix)]
    #[test]
    fn new_and_existing_files_are_owner_only() {
        use std::fs;
        use std::os::unix::fs::PermissionsExt;

        let temp = TempDir::new().expect("temp dir");
        let fresh = temp.path().join("fresh.sqlite3");
        drop(open(&fresh).expect("open fresh"));
        let mode = fs::metadata(&fresh).expect("metadata").permissions().mode();
        assert_eq!(mode & 0o777, 0o600);

        let loose = temp.path().join("loose.sqlite3");
        fs::write(&loose, b"").expect("create");
        fs::set_permissions(&loose, fs::Permissions::from_mode(0o644)).expect("chmod");
        drop(open(&loose).expect("open loose"));
        let mode = fs::metadata(&loose).expect("metadata").permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }
}
