pub mod init;
pub mod reset;
pub mod spell;
pub mod status;
