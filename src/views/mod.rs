//! Views
//!
//! One controller per visible list. Each view owns the local state of its
//! scope and issues store writes through the optimistic layer.

mod controller;
mod workspace_tabs;
mod category_sidebar;
mod items_list;
mod checklist;
mod bookmarks;

#[cfg(test)]
mod tests;

pub use controller::ListController;
pub use workspace_tabs::WorkspaceTabs;
pub use category_sidebar::CategorySidebar;
pub use items_list::ItemsList;
pub use checklist::ChecklistView;
pub use bookmarks::BookmarkBoard;
