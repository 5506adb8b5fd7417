pub mod list_filter;
pub mod request_seq;
