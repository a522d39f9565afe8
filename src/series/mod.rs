pub(crate) mod align;
pub(crate) mod filename;
pub(crate) mod variant;
