use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("database error: {0}")]
    Database(rusqlite::Error),

    #[error("not found")]
    NotFound,

    #[error("conflict: {0}")]
    Conflict(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("invalid json: {0}")]
    Json(#[from] serde_json::Error),

    #[error("password hashing failed: {0}")]
    PasswordHash(String),
}

impl From<rusqlite::Error> for Error {
    fn from(e: rusqlite::Error) -> Self {
        match e {
            rusqlite::Error::SqliteFailure(ref err, ref msg)
                if err.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE
                    || err.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_PRIMARYKEY =>
            {
                Error::Conflict(
                    msg.clone()
                        .unwrap_or_else(|| "unique constraint violated".to_string()),
                )
            }
            other => Error::Database(other),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constraint_violation_maps_to_conflict() {
        let conn = rusqlite::Connection::open_in_memory().unwrap();
        conn.execute_batch("CREATE TABLE t (k TEXT UNIQUE); INSERT INTO t VALUES ('a');")
            .unwrap();

        let err = conn
            .execute("INSERT INTO t VALUES ('a')", [])
            .map_err(Error::from)
            .unwrap_err();

        assert!(matches!(err, Error::Conflict(_)));
    }

    #[test]
    fn test_check_violation_is_not_conflict() {
        let conn = rusqlite::Connection::open_in_memory().unwrap();
        conn.execute_batch("CREATE TABLE t (n INTEGER CHECK (n IN (301, 302)));")
            .unwrap();

        let err = conn
            .execute("INSERT INTO t VALUES (307)", [])
            .map_err(Error::from)
            .unwrap_err();

        assert!(matches!(err, Error::Database(_)));
    }

    #[test]
    fn test_other_sqlite_errors_stay_database() {
        let conn = rusqlite::Connection::open_in_memory().unwrap();
        let err = conn
            .execute("SELECT * FROM missing_table", [])
            .map_err(Error::from)
            .unwrap_err();

        assert!(matches!(err, Error::Database(_)));
    }
}
