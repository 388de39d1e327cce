//! CrudService: generic resource operations; RequestValidator; admin Directory.

mod crud;
mod directory;
mod validation;
pub use crud::{parse_id, CrudService};
pub use directory::Directory;
pub use validation::{Fields, Mode, RequestValidator};
