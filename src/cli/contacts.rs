//! Contact actions behind the menu entries

use anyhow::Result;
use chrono::Utc;

use super::display::{print_contact_card, print_contact_table};
use super::ui::{ask_email, ask_int, ask_optional_text, ask_phone, ask_text};
use super::Session;
use crate::db::WriteOutcome;
use crate::models::Contact;

/// Search by name and let the user pick one of the matches.
pub fn select_contact(session: &Session) -> Result<Option<Contact>> {
    let name = ask_text("Enter the name", None)?;
    let mut contacts = session.db.fetch_by_name(&name)?;
    println!("Found {} contacts", contacts.len());
    if contacts.is_empty() {
        return Ok(None);
    }

    print_contact_table(&contacts);
    let index = ask_int("Enter the index", 0, contacts.len() - 1)?;
    Ok(Some(contacts.swap_remove(index)))
}

pub fn create_contact(session: &Session) -> Result<()> {
    let prefix = session.config.country_prefix();

    let first_name = ask_text("First name (required)", None)?;
    let last_name = ask_optional_text("Last name", None)?;
    let Some(phone_personal) = ask_phone("Personal phone (required)", true, None, &prefix)? else {
        return Ok(());
    };
    let phone_work = ask_phone("Work phone", false, None, &prefix)?;
    let phone_home = ask_phone("Home phone", false, None, &prefix)?;
    let email = ask_email("Email", None)?;
    let address = ask_optional_text("Address", None)?;

    let contact = Contact {
        id: session.db.next_id()?,
        first_name,
        last_name,
        date_added: Utc::now(),
        phone_personal,
        phone_work,
        phone_home,
        email,
        address,
    };

    if has_repeated_phone(&contact) {
        println!("Couldn't create the contact: a phone number is entered twice.");
        return Ok(());
    }

    match session.db.create(&contact)? {
        WriteOutcome::Applied => println!("Contact created."),
        _ => print_phone_conflict("Couldn't create the contact."),
    }
    Ok(())
}

pub fn list_contacts(session: &Session) -> Result<()> {
    let total = session.db.count()?;
    if total == 0 {
        println!("No contacts yet.");
        return Ok(());
    }

    let n = ask_int("How many contacts", 0, total as usize)?;
    let contacts = session.db.fetch_contacts(n as u32)?;
    print_contact_table(&contacts);
    println!("Showing {} contacts out of {}.", contacts.len(), total);
    Ok(())
}

pub fn search_by_name(session: &Session) -> Result<()> {
    let name = ask_text("Enter the name", None)?;
    let contacts = session.db.fetch_by_name(&name)?;
    print_contact_table(&contacts);
    println!("\nFound {} contacts", contacts.len());
    Ok(())
}

pub fn search_by_phone(session: &Session) -> Result<()> {
    let phone = ask_text("Enter phone number", None)?;
    let contacts = session.db.fetch_by_phone(&phone)?;
    print_contact_table(&contacts);
    println!("\nFound {} contacts", contacts.len());
    Ok(())
}

pub fn view_contact(session: &Session) -> Result<()> {
    if let Some(contact) = select_contact(session)? {
        println!();
        print_contact_card(&contact);
    }
    Ok(())
}

pub fn edit_contact(session: &Session) -> Result<()> {
    let Some(contact) = select_contact(session)? else {
        return Ok(());
    };

    println!("Enter the new details, or press <Enter> to keep the current value.");
    let edited = prompt_edits(&contact, &session.config.country_prefix())?;
    if has_repeated_phone(&edited) {
        println!("Couldn't update the contact: a phone number is entered twice.");
        return Ok(());
    }

    match session.db.update(&edited)? {
        WriteOutcome::Applied => println!("Contact updated."),
        WriteOutcome::NotFound => println!("Contact no longer exists."),
        WriteOutcome::ConstraintViolation => {
            print_phone_conflict("Couldn't update the contact.")
        }
    }
    Ok(())
}

pub fn delete_contact(session: &Session) -> Result<()> {
    let Some(contact) = select_contact(session)? else {
        return Ok(());
    };

    if session.db.delete(&contact)? {
        println!("Deleted {}.", contact.display_name());
    } else {
        println!("Contact no longer exists.");
    }
    Ok(())
}

/// Ask for every mutable field, defaulting to the current values.
fn prompt_edits(contact: &Contact, prefix: &str) -> Result<Contact> {
    let first_name = ask_text("First name", Some(&contact.first_name))?;
    let last_name = ask_optional_text("Last name", contact.last_name.as_deref())?;
    let phone_personal = ask_phone(
        "Personal phone",
        true,
        Some(&contact.phone_personal),
        prefix,
    )?
    .unwrap_or_else(|| contact.phone_personal.clone());
    let phone_work = ask_phone("Work phone", false, contact.phone_work.as_deref(), prefix)?;
    let phone_home = ask_phone("Home phone", false, contact.phone_home.as_deref(), prefix)?;
    let email = ask_email("Email", contact.email.as_deref())?;
    let address = ask_optional_text("Address", contact.address.as_deref())?;

    Ok(Contact {
        first_name,
        last_name,
        phone_personal,
        phone_work,
        phone_home,
        email,
        address,
        ..contact.clone()
    })
}

/// The store rejects a contact that lists one number in two slots.
fn has_repeated_phone(contact: &Contact) -> bool {
    let phones: Vec<&str> = contact.phones().collect();
    phones
        .iter()
        .enumerate()
        .any(|(i, p)| phones[i + 1..].contains(p))
}

fn print_phone_conflict(headline: &str) {
    println!("{}", headline);
    println!("No two contacts can share a personal, work or home phone number.");
}
