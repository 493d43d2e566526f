//! One module per CLI command.

pub mod completions;
pub mod credential_add;
pub mod credential_delete;
pub mod credential_list;
pub mod export;
pub mod import_cmd;
pub mod init;
pub mod subscription_add;
pub mod subscription_delete;
pub mod subscription_edit;
pub mod subscription_list;
