pub mod bulk;
pub mod business;
pub mod catalog;
pub mod invoice;

#[cfg(test)]
pub(crate) mod test_support;
