pub(crate) mod analysis;
pub(crate) mod entry;
pub(crate) mod records;
