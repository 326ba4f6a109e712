//! Group actions behind the menu entries

use anyhow::Result;

use super::contacts::select_contact;
use super::display::{print_contact_table, print_group_table};
use super::ui::{ask_int, ask_text};
use super::Session;
use crate::db::WriteOutcome;
use crate::models::Group;

/// Show every group and let the user pick one.
pub fn select_group(session: &Session) -> Result<Option<Group>> {
    let mut groups = session.db.fetch_groups()?;
    println!("Found {} groups", groups.len());
    if groups.is_empty() {
        return Ok(None);
    }

    print_group_table(&groups);
    let index = ask_int("Select group no.", 0, groups.len() - 1)?;
    Ok(Some(groups.swap_remove(index)))
}

pub fn create_group(session: &Session) -> Result<()> {
    let name = ask_text("Group name", None)?;
    session.db.create_group(&name)?;
    println!("Group '{}' created.", name);
    Ok(())
}

pub fn show_groups(session: &Session) -> Result<()> {
    let groups = session.db.fetch_groups()?;
    print_group_table(&groups);
    println!("Found {} groups", groups.len());
    Ok(())
}

pub fn add_to_group(session: &Session) -> Result<()> {
    let Some(group) = select_group(session)? else {
        return Ok(());
    };
    let Some(contact) = select_contact(session)? else {
        return Ok(());
    };

    match session.db.add_member(group.id, contact.id)? {
        WriteOutcome::Applied => {
            println!("Added {} to {}.", contact.display_name(), group.name)
        }
        _ => println!("{} is already in {}.", contact.display_name(), group.name),
    }
    Ok(())
}

pub fn remove_from_group(session: &Session) -> Result<()> {
    let Some(group) = select_group(session)? else {
        return Ok(());
    };

    let members = session.db.members_of(group.id)?;
    if members.is_empty() {
        println!("{} has no contacts.", group.name);
        return Ok(());
    }

    print_contact_table(&members);
    let index = ask_int("Choose the contact to remove", 0, members.len() - 1)?;
    let contact = &members[index];

    if session.db.remove_member(group.id, contact.id)? {
        println!("Removed {} from {}.", contact.display_name(), group.name);
    }
    Ok(())
}

pub fn view_group(session: &Session) -> Result<()> {
    let Some(group) = select_group(session)? else {
        return Ok(());
    };

    println!("Group: {}", group.name);
    let members = session.db.members_of(group.id)?;
    print_contact_table(&members);
    println!("Found {} contacts.", members.len());
    Ok(())
}

/// Member contacts are kept.
pub fn delete_group(session: &Session) -> Result<()> {
    let Some(group) = select_group(session)? else {
        return Ok(());
    };

    if session.db.delete_group(group.id)? {
        println!("Group '{}' deleted.", group.name);
    }
    Ok(())
}
