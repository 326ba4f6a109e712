//! Main menu for cbook
//!
//! Uses inquire for clean, reliable terminal interaction.

use anyhow::{anyhow, Result};
use inquire::Select;
use std::fmt;
use std::io::{self, IsTerminal};

use super::ui::{clear_screen, minimal_render_config, wait_for_continue, Cancelled};
use super::{contacts, groups, Session};

/// Menu options with type-safe variants
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MenuOption {
    CreateContact,
    ListContacts,
    SearchByName,
    SearchByPhone,
    ViewContact,
    EditContact,
    CreateGroup,
    ShowGroups,
    AddToGroup,
    RemoveFromGroup,
    ViewGroup,
    DeleteGroup,
    DeleteContact,
    Exit,
}

impl MenuOption {
    const ALL: &'static [MenuOption] = &[
        MenuOption::CreateContact,
        MenuOption::ListContacts,
        MenuOption::SearchByName,
        MenuOption::SearchByPhone,
        MenuOption::ViewContact,
        MenuOption::EditContact,
        MenuOption::CreateGroup,
        MenuOption::ShowGroups,
        MenuOption::AddToGroup,
        MenuOption::RemoveFromGroup,
        MenuOption::ViewGroup,
        MenuOption::DeleteGroup,
        MenuOption::DeleteContact,
        MenuOption::Exit,
    ];

    fn label(self) -> &'static str {
        match self {
            MenuOption::CreateContact => "Create new contact",
            MenuOption::ListContacts => "List contacts",
            MenuOption::SearchByName => "Search contacts by name",
            MenuOption::SearchByPhone => "Search contacts by phone number",
            MenuOption::ViewContact => "View a contact's info",
            MenuOption::EditContact => "Edit an existing contact",
            MenuOption::CreateGroup => "Create a group",
            MenuOption::ShowGroups => "Show groups",
            MenuOption::AddToGroup => "Add contact to a group",
            MenuOption::RemoveFromGroup => "Remove contact from a group",
            MenuOption::ViewGroup => "View contacts in a group",
            MenuOption::DeleteGroup => "Delete a group",
            MenuOption::DeleteContact => "Delete a contact",
            MenuOption::Exit => "Exit",
        }
    }

    /// 1-based position, as shown to the user
    fn number(self) -> usize {
        MenuOption::ALL
            .iter()
            .position(|opt| *opt == self)
            .map_or(0, |i| i + 1)
    }
}

impl fmt::Display for MenuOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:>2}. {}", self.number(), self.label())
    }
}

/// Run the interactive main menu
pub fn run_menu(session: &Session) -> Result<()> {
    if !io::stdin().is_terminal() {
        return Err(anyhow!(
            "Interactive menu requires a terminal. Use subcommands for non-interactive use:\n  \
            cbook list\n  \
            cbook search <name>\n  \
            cbook phone <number>\n  \
            Run 'cbook --help' for all options."
        ));
    }

    loop {
        let selection = Select::new("OPTIONS", MenuOption::ALL.to_vec())
            .with_render_config(minimal_render_config())
            .with_page_size(MenuOption::ALL.len())
            .with_help_message("Esc cancels an action in the middle")
            .prompt_skippable();

        // Esc, Ctrl+C or a dead terminal at the menu itself: leave
        let choice = match selection {
            Ok(Some(choice)) => choice,
            Ok(None) | Err(_) => return Ok(()),
        };

        if choice == MenuOption::Exit {
            return Ok(());
        }

        let _ = clear_screen();
        report(execute_command(session, choice));
        wait_for_continue();
        let _ = clear_screen();
    }
}

fn execute_command(session: &Session, choice: MenuOption) -> Result<()> {
    match choice {
        MenuOption::CreateContact => contacts::create_contact(session),
        MenuOption::ListContacts => contacts::list_contacts(session),
        MenuOption::SearchByName => contacts::search_by_name(session),
        MenuOption::SearchByPhone => contacts::search_by_phone(session),
        MenuOption::ViewContact => contacts::view_contact(session),
        MenuOption::EditContact => contacts::edit_contact(session),
        MenuOption::CreateGroup => groups::create_group(session),
        MenuOption::ShowGroups => groups::show_groups(session),
        MenuOption::AddToGroup => groups::add_to_group(session),
        MenuOption::RemoveFromGroup => groups::remove_from_group(session),
        MenuOption::ViewGroup => groups::view_group(session),
        MenuOption::DeleteGroup => groups::delete_group(session),
        MenuOption::DeleteContact => contacts::delete_contact(session),
        MenuOption::Exit => Ok(()),
    }
}

/// A cancelled action is not a failure; anything else is shown and the
/// menu carries on.
fn report(result: Result<()>) {
    match result {
        Ok(()) => {}
        Err(e) if e.is::<Cancelled>() => println!("\nCancelled."),
        Err(e) => eprintln!("\nError: {:#}", e),
    }
}
