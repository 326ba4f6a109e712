use anyhow::Result;
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension, Row};
use tracing::debug;

use super::{constraint_outcome, escape_like, Database, WriteOutcome};
use crate::models::Contact;

/// Contact columns in the order `row_to_contact` reads them.
pub(super) const SELECT_CONTACT: &str = r#"SELECT
        c.id, c.first_name, c.last_name, c.date_added,
        p.personal, p.work, p.home, c.email, c.address
    FROM contacts c
    JOIN phone_numbers p ON p.c_id = c.id"#;

pub(super) const ORDER_BY_NAME: &str = "ORDER BY c.first_name, c.last_name, c.id";

fn parse_timestamp(s: &str) -> rusqlite::Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(3, rusqlite::types::Type::Text, Box::new(e))
        })
}

impl Database {
    // ==================== CONTACT READ ====================

    /// Contacts whose first or last name contains `pattern`, ignoring case.
    pub fn fetch_by_name(&self, pattern: &str) -> Result<Vec<Contact>> {
        let like = format!("%{}%", escape_like(pattern));
        let sql = format!(
            r#"{SELECT_CONTACT}
            WHERE c.first_name LIKE ?1 ESCAPE '\' OR c.last_name LIKE ?1 ESCAPE '\'
            {ORDER_BY_NAME}"#
        );

        let mut stmt = self.conn.prepare(&sql)?;
        let contacts = stmt
            .query_map([like], Self::row_to_contact)?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(contacts)
    }

    /// Contacts holding `pattern` anywhere in one of their three numbers.
    pub fn fetch_by_phone(&self, pattern: &str) -> Result<Vec<Contact>> {
        let like = format!("%{}%", escape_like(pattern));
        let sql = format!(
            r#"{SELECT_CONTACT}
            WHERE p.personal LIKE ?1 ESCAPE '\'
               OR p.work LIKE ?1 ESCAPE '\'
               OR p.home LIKE ?1 ESCAPE '\'
            {ORDER_BY_NAME}"#
        );

        let mut stmt = self.conn.prepare(&sql)?;
        let contacts = stmt
            .query_map([like], Self::row_to_contact)?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(contacts)
    }

    /// At most `limit` contacts in name order.
    pub fn fetch_contacts(&self, limit: u32) -> Result<Vec<Contact>> {
        let sql = format!("{SELECT_CONTACT} {ORDER_BY_NAME} LIMIT ?");

        let mut stmt = self.conn.prepare(&sql)?;
        let contacts = stmt
            .query_map([limit], Self::row_to_contact)?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(contacts)
    }

    pub fn fetch_contact(&self, id: i64) -> Result<Option<Contact>> {
        let sql = format!("{SELECT_CONTACT} WHERE c.id = ?");

        let contact = self
            .conn
            .query_row(&sql, [id], Self::row_to_contact)
            .optional()?;

        Ok(contact)
    }

    pub fn count(&self) -> Result<u32> {
        let count: u32 = self
            .conn
            .query_row("SELECT COUNT(*) FROM contacts", [], |row| row.get(0))?;
        Ok(count)
    }

    /// Id for the next contact: one past the largest stored id, or 1.
    ///
    /// Read-then-use: two writers could be handed the same id. The insert's
    /// primary key still rejects the loser, and the store has a single user.
    pub fn next_id(&self) -> Result<i64> {
        let id: i64 = self.conn.query_row(
            "SELECT COALESCE(MAX(id), 0) + 1 FROM contacts",
            [],
            |row| row.get(0),
        )?;
        Ok(id)
    }

    // ==================== CONTACT WRITE ====================

    /// Insert the contact and its phone row together. Nothing is written
    /// unless both inserts succeed.
    pub fn create(&self, contact: &Contact) -> Result<WriteOutcome> {
        let tx = self.conn.unchecked_transaction()?;

        match Self::insert_contact_rows(&tx, contact) {
            Ok(()) => {
                tx.commit()?;
                debug!(id = contact.id, "created contact");
                Ok(WriteOutcome::Applied)
            }
            Err(e) => constraint_outcome(e),
        }
    }

    /// Rewrite every mutable field of the contact with `contact.id`.
    /// `date_added` is never touched.
    pub fn update(&self, contact: &Contact) -> Result<WriteOutcome> {
        let tx = self.conn.unchecked_transaction()?;

        match Self::update_contact_rows(&tx, contact) {
            Ok(0) => Ok(WriteOutcome::NotFound),
            Ok(_) => {
                tx.commit()?;
                debug!(id = contact.id, "updated contact");
                Ok(WriteOutcome::Applied)
            }
            Err(e) => constraint_outcome(e),
        }
    }

    /// Remove the contact with its phone row and group memberships.
    /// Returns false when no such contact exists.
    pub fn delete(&self, contact: &Contact) -> Result<bool> {
        let tx = self.conn.unchecked_transaction()?;

        // Referencing rows first: both foreign keys restrict deletion
        tx.execute("DELETE FROM phone_numbers WHERE c_id = ?", [contact.id])?;
        tx.execute("DELETE FROM group_members WHERE c_id = ?", [contact.id])?;
        let rows = tx.execute("DELETE FROM contacts WHERE id = ?", [contact.id])?;

        tx.commit()?;
        debug!(id = contact.id, deleted = rows > 0, "deleted contact");
        Ok(rows > 0)
    }

    fn insert_contact_rows(conn: &Connection, contact: &Contact) -> rusqlite::Result<()> {
        conn.execute(
            r#"INSERT INTO contacts (id, first_name, last_name, email, address, date_added)
               VALUES (?, ?, ?, ?, ?, ?)"#,
            params![
                contact.id,
                contact.first_name,
                contact.last_name,
                contact.email,
                contact.address,
                contact.date_added.to_rfc3339(),
            ],
        )?;
        conn.execute(
            "INSERT INTO phone_numbers (c_id, personal, work, home) VALUES (?, ?, ?, ?)",
            params![
                contact.id,
                contact.phone_personal,
                contact.phone_work,
                contact.phone_home,
            ],
        )?;
        Ok(())
    }

    /// Returns the number of contact rows matched (0 or 1).
    fn update_contact_rows(conn: &Connection, contact: &Contact) -> rusqlite::Result<usize> {
        let rows = conn.execute(
            r#"UPDATE contacts
               SET first_name = ?, last_name = ?, email = ?, address = ?
               WHERE id = ?"#,
            params![
                contact.first_name,
                contact.last_name,
                contact.email,
                contact.address,
                contact.id,
            ],
        )?;
        if rows == 0 {
            return Ok(0);
        }

        conn.execute(
            "UPDATE phone_numbers SET personal = ?, work = ?, home = ? WHERE c_id = ?",
            params![
                contact.phone_personal,
                contact.phone_work,
                contact.phone_home,
                contact.id,
            ],
        )?;
        Ok(rows)
    }

    // ==================== ROW MAPPERS ====================

    pub(super) fn row_to_contact(row: &Row) -> rusqlite::Result<Contact> {
        let date_added: String = row.get(3)?;

        Ok(Contact {
            id: row.get(0)?,
            first_name: row.get(1)?,
            last_name: row.get(2)?,
            date_added: parse_timestamp(&date_added)?,
            phone_personal: row.get(4)?,
            phone_work: row.get(5)?,
            phone_home: row.get(6)?,
            email: row.get(7)?,
            address: row.get(8)?,
        })
    }
}
