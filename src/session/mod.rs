pub(crate) mod config;
pub(crate) mod layers;
pub(crate) mod radar_session;
