pub mod init;
pub mod lookup;
pub mod serve;
