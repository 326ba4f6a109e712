use clap::{Args, Parser, Subcommand};

use crate::config::Config;
use crate::db::Database;

pub mod contacts;
pub mod display;
pub mod groups;
pub mod menu;
pub mod setup;
pub mod ui;

pub use display::{print_contact_table, print_group_table};
pub use menu::run_menu;
pub use setup::{greet, run_setup};

/// What every action needs: the open store and the user's settings.
pub struct Session<'a> {
    pub db: &'a Database,
    pub config: &'a Config,
}

#[derive(Parser)]
#[command(name = "cbook")]
#[command(about = "Contact book for the command line")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List contacts in name order
    List(ListArgs),
    /// Search contacts by first or last name
    Search(SearchArgs),
    /// Search contacts by any of their phone numbers
    Phone(PhoneArgs),
    /// List groups, or the members of one group
    Groups(GroupsArgs),
}

#[derive(Args)]
pub struct ListArgs {
    #[arg(short, long, default_value = "20")]
    pub limit: u32,
}

#[derive(Args)]
pub struct SearchArgs {
    /// Part of a first or last name (case-insensitive)
    pub name: String,
}

#[derive(Args)]
pub struct PhoneArgs {
    /// Any part of a phone number
    pub pattern: String,
}

#[derive(Args)]
pub struct GroupsArgs {
    /// Show the members of this group id
    pub id: Option<i64>,
}

/// Non-interactive subcommands: print a table and exit.
pub fn run_command(db: &Database, command: Commands) -> anyhow::Result<()> {
    match command {
        Commands::List(args) => {
            let contacts = db.fetch_contacts(args.limit)?;
            print_contact_table(&contacts);
            println!("Showing {} contacts out of {}.", contacts.len(), db.count()?);
        }
        Commands::Search(args) => {
            let contacts = db.fetch_by_name(&args.name)?;
            print_contact_table(&contacts);
            println!("Found {} contacts", contacts.len());
        }
        Commands::Phone(args) => {
            let contacts = db.fetch_by_phone(&args.pattern)?;
            print_contact_table(&contacts);
            println!("Found {} contacts", contacts.len());
        }
        Commands::Groups(GroupsArgs { id: Some(id) }) => {
            let members = db.members_of(id)?;
            print_contact_table(&members);
            println!("Found {} contacts", members.len());
        }
        Commands::Groups(GroupsArgs { id: None }) => {
            let groups = db.fetch_groups()?;
            print_group_table(&groups);
            println!("Found {} groups", groups.len());
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_no_subcommand_means_menu() {
        let cli = Cli::try_parse_from(["cbook"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_list_limit() {
        let cli = Cli::try_parse_from(["cbook", "list", "--limit", "5"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::List(ListArgs { limit: 5 }))));

        let cli = Cli::try_parse_from(["cbook", "list"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::List(ListArgs { limit: 20 }))));
    }

    #[test]
    fn test_groups_optional_id() {
        let cli = Cli::try_parse_from(["cbook", "groups", "2"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::Groups(GroupsArgs { id: Some(2) }))));

        let cli = Cli::try_parse_from(["cbook", "groups"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::Groups(GroupsArgs { id: None }))));
    }

    #[test]
    fn test_search_requires_name() {
        assert!(Cli::try_parse_from(["cbook", "search"]).is_err());
    }

    #[test]
    fn test_run_command_against_memory_store() {
        let db = crate::db::fixtures::seeded();
        run_command(&db, Commands::List(ListArgs { limit: 3 })).unwrap();
        run_command(&db, Commands::Groups(GroupsArgs { id: Some(1) })).unwrap();
        run_command(&db, Commands::Phone(PhoneArgs { pattern: "999".into() })).unwrap();
    }
}
