//! Service layer: CRUD and query operations over the store
//!
//! Every function takes the pool explicitly. Writes run inside one
//! transaction each; a failed write is rolled back when the transaction is
//! dropped. Constraint violations surface as
//! [`staffbook_common::Error::UniqueViolation`] or
//! [`staffbook_common::Error::ForeignKeyViolation`].

pub mod departments;
pub mod employees;
