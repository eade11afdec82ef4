mod store;
mod template;

pub use store::{StateEditError, StateGraphStore};
pub use template::NewStateTemplate;
