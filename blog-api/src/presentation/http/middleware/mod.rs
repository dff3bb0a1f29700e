pub(crate) mod auth;
pub(crate) mod cors;
pub(crate) mod role;
pub(crate) mod layers;
