pub(crate) mod ad_linkage;
pub(crate) mod giant_component;
pub(crate) mod model;
pub(crate) mod stolen_image;
