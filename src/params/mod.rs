pub(crate) mod host;
pub(crate) mod reconcile;
pub(crate) mod store;
pub(crate) mod track;
pub(crate) mod value;
