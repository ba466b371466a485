//! Terminal client components: the creation form, the task list and its
//! items, and the [`app::App`] controller that ties them to the task cache.

pub mod app;
pub mod form;
pub mod item;
pub mod list;

pub use app::App;
