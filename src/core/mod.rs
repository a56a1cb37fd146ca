// Core modules: field collection, linking, validation, and error modeling.
pub mod collect;
pub mod dataset;
pub mod dimension;
pub mod error;
pub mod link;
pub mod ordered;
pub mod registry;
pub mod roles;
pub mod validate;
