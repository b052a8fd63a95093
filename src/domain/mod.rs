pub mod entities;
pub mod find_access_token;
pub mod find_all_tags;
pub mod find_shared_links;
pub mod find_sharing_links;
pub mod save_link;
pub mod save_members;
pub mod save_workspace;
pub mod share_link;

#[cfg(test)]
pub mod mocks;
