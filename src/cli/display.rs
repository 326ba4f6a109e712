use chrono::Local;
use crossterm::style::Stylize;

use super::ui::truncate;
use crate::models::{Contact, Group};

const MAX_CELL: usize = 32;

/// Render rows as a plain aligned table with a header rule and a leading
/// index column. Returns an empty string when there are no rows.
fn render_table(headers: &[&str], rows: &[Vec<String>]) -> String {
    if rows.is_empty() {
        return String::new();
    }

    let index_width = (rows.len() - 1).to_string().len().max(1);
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            widths[i] = widths[i].max(cell.chars().count());
        }
    }

    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    let header: Vec<String> = headers.iter().map(|h| h.to_string()).collect();

    let mut out = String::new();
    push_row(&mut out, "", &header, &widths, index_width);
    push_row(&mut out, "", &rule, &widths, index_width);
    for (i, row) in rows.iter().enumerate() {
        push_row(&mut out, &i.to_string(), row, &widths, index_width);
    }

    out
}

fn push_row(out: &mut String, index: &str, cells: &[String], widths: &[usize], index_width: usize) {
    let mut line = format!("{:>w$}", index, w = index_width);
    for (cell, width) in cells.iter().zip(widths) {
        line.push_str("  ");
        line.push_str(cell);
        line.push_str(&" ".repeat(width.saturating_sub(cell.chars().count())));
    }
    out.push_str(line.trim_end());
    out.push('\n');
}

/// Indexed summary table: name, personal phone, address
pub fn contact_table(contacts: &[Contact]) -> String {
    let rows: Vec<Vec<String>> = contacts
        .iter()
        .map(|c| {
            vec![
                truncate(&c.display_name(), MAX_CELL),
                c.phone_personal.clone(),
                truncate(c.address.as_deref().unwrap_or(""), MAX_CELL),
            ]
        })
        .collect();

    render_table(&["Name", "Personal phone", "Address"], &rows)
}

pub fn group_table(groups: &[Group]) -> String {
    let rows: Vec<Vec<String>> = groups
        .iter()
        .map(|g| vec![truncate(&g.name, MAX_CELL)])
        .collect();

    render_table(&["Group name"], &rows)
}

/// Every field of a contact as `label  value` lines (only non-empty fields)
pub fn contact_card_lines(contact: &Contact) -> Vec<(&'static str, String)> {
    let added = contact
        .date_added
        .with_timezone(&Local)
        .format("%Y-%m-%d %H:%M")
        .to_string();

    let fields = [
        ("Name", Some(contact.display_name())),
        ("Personal phone", Some(contact.phone_personal.clone())),
        ("Work phone", contact.phone_work.clone()),
        ("Home phone", contact.phone_home.clone()),
        ("Email", contact.email.clone()),
        ("Address", contact.address.clone()),
        ("Added on", Some(added)),
    ];

    fields
        .into_iter()
        .filter_map(|(label, value)| value.filter(|v| !v.is_empty()).map(|v| (label, v)))
        .collect()
}

pub fn print_contact_table(contacts: &[Contact]) {
    print!("{}", contact_table(contacts));
}

pub fn print_group_table(groups: &[Group]) {
    print!("{}", group_table(groups));
}

pub fn print_contact_card(contact: &Contact) {
    let lines = contact_card_lines(contact);
    let width = lines.iter().map(|(l, _)| l.len()).max().unwrap_or(0);

    for (label, value) in lines {
        let padded = format!("{:<w$}", label, w = width);
        println!("  {}  {}", padded.bold(), value);
    }
}
