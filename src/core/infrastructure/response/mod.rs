pub mod list_response;
