// handlers/satellites - CRUD over satellite records
//
// Collection routes: /satellites/        (list, create)
// Record routes:     /satellites/:id     (show, replace, patch, delete)
//
// Each handler takes a `DbSession` and commits it only after the operation
// succeeded; error returns drop the session and roll back.

pub mod collection;
pub mod record;

pub use collection::{collection_get, collection_post};
pub use record::{record_delete, record_get, record_patch, record_put};
