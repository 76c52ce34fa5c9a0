// Application layer - Use cases for splitting a dashboard by node
pub mod layout_expander;
pub mod query_filter;
pub mod split_service;
