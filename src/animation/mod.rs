pub(crate) mod clock;
pub(crate) mod controller;
pub(crate) mod ease;
pub(crate) mod player;
pub(crate) mod runner;
pub(crate) mod script;
pub(crate) mod timeline;
