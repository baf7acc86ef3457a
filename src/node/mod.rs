pub(crate) mod job;
pub(crate) mod opts;
pub(crate) mod shader_node;
