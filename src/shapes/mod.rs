pub(crate) mod catalog;
pub(crate) mod library;
pub(crate) mod profile;
