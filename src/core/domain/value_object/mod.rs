mod api_password;
mod api_url;
mod api_username;

pub use api_password::ApiPassword;
pub use api_url::ApiUrl;
pub use api_username::ApiUsername;
