pub mod bounded_copy;
pub(crate) mod linked_list;
