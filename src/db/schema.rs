/// Full schema, applied on every open. Every statement is idempotent so an
/// existing database is left as is.
///
/// Phone numbers are unique across all three columns and all contacts:
/// the column `UNIQUE`s cover same-column collisions, the triggers cover
/// cross-column ones (A.work == B.home), and the `CHECK`s stop one contact
/// from repeating a number in two of its own slots. All of them surface as
/// `SQLITE_CONSTRAINT`.
pub const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS contacts (
    id INTEGER PRIMARY KEY,
    first_name TEXT NOT NULL CHECK (length(first_name) > 0),
    last_name TEXT,
    email TEXT,
    address TEXT,
    date_added TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS phone_numbers (
    c_id INTEGER NOT NULL UNIQUE,
    personal TEXT NOT NULL UNIQUE,
    work TEXT UNIQUE,
    home TEXT UNIQUE,
    PRIMARY KEY (personal, work, home),
    CHECK (work IS NULL OR work <> personal),
    CHECK (home IS NULL OR home <> personal),
    CHECK (work IS NULL OR home IS NULL OR work <> home),
    FOREIGN KEY (c_id) REFERENCES contacts(id) ON DELETE RESTRICT
);

CREATE TABLE IF NOT EXISTS contact_groups (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS group_members (
    g_id INTEGER NOT NULL,
    c_id INTEGER NOT NULL,
    PRIMARY KEY (g_id, c_id),
    FOREIGN KEY (g_id) REFERENCES contact_groups(id) ON DELETE RESTRICT,
    FOREIGN KEY (c_id) REFERENCES contacts(id) ON DELETE RESTRICT
);

CREATE TRIGGER IF NOT EXISTS phone_numbers_unique_insert
BEFORE INSERT ON phone_numbers
WHEN EXISTS (
    SELECT 1 FROM phone_numbers p
    WHERE p.c_id <> NEW.c_id
      AND (p.personal IN (NEW.personal, NEW.work, NEW.home)
        OR p.work IN (NEW.personal, NEW.work, NEW.home)
        OR p.home IN (NEW.personal, NEW.work, NEW.home))
)
BEGIN
    SELECT RAISE(ABORT, 'phone number already belongs to another contact');
END;

CREATE TRIGGER IF NOT EXISTS phone_numbers_unique_update
BEFORE UPDATE OF personal, work, home ON phone_numbers
WHEN EXISTS (
    SELECT 1 FROM phone_numbers p
    WHERE p.c_id <> NEW.c_id
      AND (p.personal IN (NEW.personal, NEW.work, NEW.home)
        OR p.work IN (NEW.personal, NEW.work, NEW.home)
        OR p.home IN (NEW.personal, NEW.work, NEW.home))
)
BEGIN
    SELECT RAISE(ABORT, 'phone number already belongs to another contact');
END;

CREATE INDEX IF NOT EXISTS idx_contact_name ON contacts(first_name, last_name);
CREATE INDEX IF NOT EXISTS idx_group_member_contact ON group_members(c_id);
"#;
