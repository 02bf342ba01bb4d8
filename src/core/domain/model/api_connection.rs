use crate::core::domain::value_object::{ApiPassword, ApiUrl, ApiUsername};

/// Everything needed to reach and authenticate against the oVirt API.
#[derive(Debug, Clone)]
pub struct ApiConnection {
    url: ApiUrl,
    username: ApiUsername,
    password: ApiPassword,
    accept_invalid_certs: bool,
}

impl ApiConnection {
    pub fn new(
        url: ApiUrl,
        username: ApiUsername,
        password: ApiPassword,
        accept_invalid_certs: bool,
    ) -> Self {
        Self {
            url,
            username,
            password,
            accept_invalid_certs,
        }
    }

    pub fn url(&self) -> &ApiUrl {
        &self.url
    }

    pub fn username(&self) -> &ApiUsername {
        &self.username
    }

    pub fn password(&self) -> &ApiPassword {
        &self.password
    }

    pub fn accept_invalid_certs(&self) -> bool {
        self.accept_invalid_certs
    }
}
