mod contact;
mod group;

pub use contact::Contact;
pub use group::Group;
