pub(crate) mod auth;
pub(crate) mod blogs;
pub(crate) mod categories;
pub(crate) mod posts;
pub(crate) mod users;
