pub(crate) mod line;
pub(crate) mod model;
pub(crate) mod parser;
pub(crate) mod report;
