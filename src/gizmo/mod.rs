pub(crate) mod handle;
pub(crate) mod sync;
