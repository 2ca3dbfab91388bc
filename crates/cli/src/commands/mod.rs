//! CLI Commands

pub mod init;
pub mod list;
pub mod profiles;
pub mod run;

pub use init::InitCommand;
pub use list::ListCommand;
pub use profiles::ProfilesCommand;
pub use run::RunCommand;
