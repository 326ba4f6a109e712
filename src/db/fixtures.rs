//! Shared test data: thirty contacts (ids 1-30) and two groups.

use chrono::{Duration, TimeZone, Utc};
use rusqlite::params;

use super::Database;
use crate::models::Contact;

type Row = (
    i64,
    &'static str,
    &'static str,
    i64,
    &'static str,
    &'static str,
    &'static str,
    Option<&'static str>,
    Option<&'static str>,
);

// (id, first, last, added_micros, personal, work, home, email, address)
const CONTACTS: &[Row] = &[
    (1, "Aayushman", "Kumar", 768149, "+633347347957", "+894107995871", "81999863748", Some("adf@xx.com"), Some("Mohan nagar")),
    (2, "Aayushman", "Gupta", 768192, "+139944532028", "+845351532923", "+527326624931", Some("asdf2s@s.cc"), Some("Boring road")),
    (3, "Aayushman", "Yadav", 768222, "+989374294952", "+438791346098", "+677578651270", Some("clock@main.py"), Some("Bus stand")),
    (4, "Hemant", "Kumar", 768237, "+855087558021", "+774513224102", "+303970699565", None, None),
    (5, "Hemant", "Sharma", 768267, "+361763952441", "31606219484", "+723073860281", None, None),
    (6, "Hemant", "Yadav", 768282, "20915283486", "+980401256522", "+763256536527", None, None),
    (7, "Kunal", "Kumar", 768297, "+806381926645", "+589945314183", "+848470781181", None, None),
    (8, "Kunal", "Gupta", 768313, "+617719886100", "+388958212153", "+754020906463", None, None),
    (9, "Kunal", "Sharma", 768329, "+844163312809", "+465358830965", "+120132815699", None, None),
    (10, "Kunal", "Yadav", 768345, "+702288195975", "+808831891248", "+335815989437", None, None),
    (11, "Neha", "Kumari", 768360, "+826563004656", "+994976425718", "+562810359287", None, None),
    (12, "Neha", "Gupta", 768376, "+565863716953", "+219037370698", "+320540603165", None, None),
    (13, "Neha", "Sharma", 768391, "+559251065028", "+441666907077", "+948832615961", None, None),
    (14, "Neha", "Yadav", 768406, "+534134297431", "+827086346467", "+455806456664", None, None),
    (15, "Raju", "Kumar", 768421, "+741923905397", "+410175019672", "+978724714319", None, None),
    (16, "Raju", "Gupta", 768436, "+863423061671", "+820350746219", "+106098617743", None, None),
    (17, "Raju", "Sharma", 768451, "+737734798870", "+128147792149", "+189437044707", None, None),
    (18, "Raju", "Yadav", 768466, "+935655382084", "+741923905398", "+815262102012", None, None),
    (19, "Prakash", "Kumar", 768480, "+525523099014", "+345194225580", "+863423061672", None, None),
    (20, "Prakash", "Gupta", 768495, "+688532624571", "+648202864525", "+720360101603", None, None),
    (21, "Prakash", "Sharma", 768509, "+195415237966", "+261265201364", "27102888955", None, None),
    (22, "Prakash", "Yadav", 768531, "+232352703805", "+614990337892", "+453378820359", None, None),
    (23, "Riya", "Kumar", 768548, "+390163754537", "+941803752209", "+399028666446", None, None),
    (24, "Riya", "Gupta", 768563, "+732711052267", "+678073557096", "+812974700165", None, None),
    (25, "Riya", "Sharma", 768579, "+430931315521", "+953963611419", "+575821153719", None, None),
    (26, "Riya", "Yadav", 768594, "+155209150184", "+866926198169", "+235749313068", None, None),
    (27, "Raju", "Kumar", 768608, "+538522025146", "+413168623692", "+618038517242", None, None),
    (28, "Raju", "Gupta", 768623, "+463139323987", "+905435935049", "+466798934595", None, None),
    (29, "Raju", "Sharma", 768638, "11486393352", "+605018235650", "+875966293289", None, None),
    (30, "Raju", "Yadav", 768653, "+373407716174", "+669097721795", "+890588447298", None, None),
];

/// `family` (id 1) holds 1, 4, 7; `servants` (id 2) holds 10, 12.
const MEMBERS: &[(i64, i64)] = &[(1, 1), (1, 4), (1, 7), (2, 12), (2, 10)];

pub(crate) fn contacts() -> Vec<Contact> {
    CONTACTS
        .iter()
        .map(|&(id, first, last, micros, personal, work, home, email, address)| Contact {
            id,
            first_name: first.to_string(),
            last_name: Some(last.to_string()),
            date_added: Utc.with_ymd_and_hms(2022, 10, 23, 14, 44, 19).unwrap()
                + Duration::microseconds(micros),
            phone_personal: personal.to_string(),
            phone_work: Some(work.to_string()),
            phone_home: Some(home.to_string()),
            email: email.map(str::to_string),
            address: address.map(str::to_string),
        })
        .collect()
}

pub(crate) fn contact(id: i64) -> Contact {
    contacts()
        .into_iter()
        .find(|c| c.id == id)
        .expect("fixture id")
}

/// In-memory database seeded with raw SQL, so tests of the repository
/// methods do not depend on each other.
pub(crate) fn seeded() -> Database {
    let db = Database::open_memory().unwrap();
    let conn = db.conn();

    for c in contacts() {
        conn.execute(
            "INSERT INTO contacts (id, first_name, last_name, email, address, date_added)
             VALUES (?, ?, ?, ?, ?, ?)",
            params![c.id, c.first_name, c.last_name, c.email, c.address, c.date_added.to_rfc3339()],
        )
        .unwrap();
        conn.execute(
            "INSERT INTO phone_numbers (c_id, personal, work, home) VALUES (?, ?, ?, ?)",
            params![c.id, c.phone_personal, c.phone_work, c.phone_home],
        )
        .unwrap();
    }

    conn.execute_batch("INSERT INTO contact_groups (name) VALUES ('family'), ('servants');")
        .unwrap();
    for (g_id, c_id) in MEMBERS {
        conn.execute(
            "INSERT INTO group_members (g_id, c_id) VALUES (?, ?)",
            [g_id, c_id],
        )
        .unwrap();
    }

    db
}

pub(crate) fn ids(contacts: &[Contact]) -> Vec<i64> {
    contacts.iter().map(|c| c.id).collect()
}
