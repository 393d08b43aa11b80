pub mod code;
pub mod coding;
pub mod dispatch;
pub mod init;
pub mod serve;
pub mod source;
pub mod tree;
