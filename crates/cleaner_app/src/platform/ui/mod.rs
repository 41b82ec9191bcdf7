pub(crate) mod constants;
pub(crate) mod mount;
pub(crate) mod notify;
pub(crate) mod render;
