pub(crate) mod path;
pub(crate) mod sampler;
