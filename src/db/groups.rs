use anyhow::Result;
use tracing::debug;

use super::contacts::{ORDER_BY_NAME, SELECT_CONTACT};
use super::{constraint_outcome, Database, WriteOutcome};
use crate::models::{Contact, Group};

impl Database {
    /// Create a group and return its storage-assigned id.
    pub fn create_group(&self, name: &str) -> Result<i64> {
        self.conn
            .execute("INSERT INTO contact_groups (name) VALUES (?)", [name])?;
        let id = self.conn.last_insert_rowid();
        debug!(id, name, "created group");
        Ok(id)
    }

    pub fn fetch_groups(&self) -> Result<Vec<Group>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, name FROM contact_groups ORDER BY id")?;

        let groups = stmt
            .query_map([], |row| {
                Ok(Group {
                    id: row.get(0)?,
                    name: row.get(1)?,
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(groups)
    }

    /// Add a contact to a group. A repeated pair, or an id that does not
    /// exist, comes back as `ConstraintViolation`.
    pub fn add_member(&self, group_id: i64, contact_id: i64) -> Result<WriteOutcome> {
        let result = self.conn.execute(
            "INSERT INTO group_members (g_id, c_id) VALUES (?, ?)",
            [group_id, contact_id],
        );

        match result {
            Ok(_) => {
                debug!(group_id, contact_id, "added group member");
                Ok(WriteOutcome::Applied)
            }
            Err(e) => constraint_outcome(e),
        }
    }

    /// Returns true when the contact was a member.
    pub fn remove_member(&self, group_id: i64, contact_id: i64) -> Result<bool> {
        let rows = self.conn.execute(
            "DELETE FROM group_members WHERE g_id = ? AND c_id = ?",
            [group_id, contact_id],
        )?;
        Ok(rows > 0)
    }

    pub fn members_of(&self, group_id: i64) -> Result<Vec<Contact>> {
        let sql = format!(
            "{SELECT_CONTACT} WHERE c.id IN (SELECT c_id FROM group_members WHERE g_id = ?) {ORDER_BY_NAME}"
        );

        let mut stmt = self.conn.prepare(&sql)?;
        let contacts = stmt
            .query_map([group_id], Self::row_to_contact)?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(contacts)
    }

    /// Delete a group and its memberships. Member contacts are kept.
    pub fn delete_group(&self, group_id: i64) -> Result<bool> {
        let tx = self.conn.unchecked_transaction()?;

        tx.execute("DELETE FROM group_members WHERE g_id = ?", [group_id])?;
        let rows = tx.execute("DELETE FROM contact_groups WHERE id = ?", [group_id])?;

        tx.commit()?;
        debug!(group_id, deleted = rows > 0, "deleted group");
        Ok(rows > 0)
    }
}
