pub mod boundary;
pub mod dispatch;
pub mod field;
pub mod index;
pub mod init;
pub mod memory;
pub mod pack;
pub mod print_settings;
pub mod profile;
pub mod schema;
pub mod shared;
pub mod template;
pub mod tender;
pub mod vault;
