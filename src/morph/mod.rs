pub(crate) mod interpolate;
pub(crate) mod policy;
pub(crate) mod rig;
