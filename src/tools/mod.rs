pub mod bookmarks;
pub mod collections;
pub mod format;
pub mod registry;
