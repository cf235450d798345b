use rusqlite::{params, Connection, OptionalExtension};

// ── Client storage ──
//
// A small key/value area per browser, keyed by the client cookie.

pub fn get_item(conn: &Connection, client_id: &str, key: &str) -> rusqlite::Result<Option<String>> {
    conn.query_row(
        "SELECT value FROM client_storage WHERE client_id = ?1 AND key = ?2",
        params![client_id, key],
        |row| row.get(0),
    )
    .optional()
}

pub fn set_item(conn: &Connection, client_id: &str, key: &str, value: &str) -> rusqlite::Result<()> {
    conn.execute(
        "INSERT INTO client_storage (client_id, key, value, updated_at)
         VALUES (?1, ?2, ?3, datetime('now'))
         ON CONFLICT(client_id, key) DO UPDATE SET
           value = excluded.value,
           updated_at = excluded.updated_at",
        params![client_id, key, value],
    )?;
    Ok(())
}

pub fn remove_item(conn: &Connection, client_id: &str, key: &str) -> rusqlite::Result<bool> {
    let count = conn.execute(
        "DELETE FROM client_storage WHERE client_id = ?1 AND key = ?2",
        params![client_id, key],
    )?;
    Ok(count > 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::init_db;

    #[test]
    fn set_overwrites_and_remove_deletes() {
        let conn = init_db(":memory:").unwrap();

        assert_eq!(get_item(&conn, "c1", "admin_token").unwrap(), None);

        set_item(&conn, "c1", "admin_token", "first").unwrap();
        set_item(&conn, "c1", "admin_token", "second").unwrap();
        assert_eq!(
            get_item(&conn, "c1", "admin_token").unwrap().as_deref(),
            Some("second")
        );

        assert!(remove_item(&conn, "c1", "admin_token").unwrap());
        assert!(!remove_item(&conn, "c1", "admin_token").unwrap());
        assert_eq!(get_item(&conn, "c1", "admin_token").unwrap(), None);
    }

    #[test]
    fn clients_are_isolated() {
        let conn = init_db(":memory:").unwrap();
        set_item(&conn, "c1", "admin_token", "t1").unwrap();

        assert_eq!(get_item(&conn, "c2", "admin_token").unwrap(), None);
    }
}
