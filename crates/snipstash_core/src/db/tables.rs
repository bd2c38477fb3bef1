//! redb table definitions shared by storage modules.

use redb::TableDefinition;

/// File name for the redb database within the configured DB directory.
pub const REDB_FILE_NAME: &str = "data.redb";

/// Canonical snippet rows (`Snippet`, bincode-encoded).
pub const SNIPPETS: TableDefinition<&str, &[u8]> = TableDefinition::new("snippets");

/// Recency index ordered by reverse creation nanos then id.
pub const SNIPPETS_BY_CREATED: TableDefinition<(u64, &str), ()> =
    TableDefinition::new("snippets_by_created");
