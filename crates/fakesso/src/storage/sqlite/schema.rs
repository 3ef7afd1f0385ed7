//! SQLite schema definitions and SQL query constants.
//!
//! Pure data, no I/O.

/// SQL statement to create the identity table.
pub const CREATE_TABLES: &str = r#"
CREATE TABLE IF NOT EXISTS identities (
    id TEXT PRIMARY KEY,
    name TEXT NOT NULL,
    email TEXT NOT NULL
);
"#;

/// Wait this long for a competing writer before giving up with `SQLITE_BUSY`.
pub const BUSY_TIMEOUT_MS: u64 = 5_000;

// Identity queries
pub const INSERT_IDENTITY_IF_ABSENT: &str = r#"
INSERT OR IGNORE INTO identities (id, name, email)
VALUES (?1, ?2, ?3)
"#;

pub const SELECT_IDENTITY_BY_ID: &str = r#"
SELECT id, name, email
FROM identities
WHERE id = ?1
"#;

pub const IDENTITY_EXISTS: &str = r#"
SELECT EXISTS(SELECT 1 FROM identities WHERE id = ?1)
"#;

// rowid follows insertion order since rows are never deleted.
pub const SELECT_IDENTITY_IDS: &str = r#"
SELECT id
FROM identities
ORDER BY rowid ASC
"#;
