pub(crate) mod blog;
pub(crate) mod category;
pub(crate) mod error;
pub(crate) mod post;
pub(crate) mod user;
