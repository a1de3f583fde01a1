pub const TABLE_NAME: &str = "schema_migrations";

pub const CREATE_VERSION_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS schema_migrations (
        version BIGINT NOT NULL PRIMARY KEY
    );
"#;
// Tables created with an `int` column decode as INT4; cast so both widths read as i64.
pub const QUERY_LATEST_VERSION: &str = r#"
    SELECT version::bigint
    FROM schema_migrations
    ORDER BY version DESC
    LIMIT 1
"#;
pub const INSERT_VERSION: &str = "INSERT INTO schema_migrations (version) VALUES ($1)";
pub const DELETE_VERSION: &str = "DELETE FROM schema_migrations WHERE version=$1";

/// First line of a migration that must run outside a transaction.
pub const NO_TRANSACTION_MARKER: &str = "-- migrate: no-transaction\n";
