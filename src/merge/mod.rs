pub(crate) mod components;
pub(crate) mod merger;
