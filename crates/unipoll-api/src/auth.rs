use secrecy::SecretString;

/// Login credentials for one controller.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub user: String,
    pub pass: SecretString,
}

/// The flavor of controller behind a base URL.
///
/// Determines the login path and whether API paths live behind the
/// `/proxy/network` prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ControllerPlatform {
    /// Standalone Network Application (Java), usually port 8443.
    #[default]
    Classic,
    /// UniFi OS console (UDM, UCG, Cloud Key Gen2+), port 443.
    UnifiOs,
}

impl ControllerPlatform {
    /// Prefix applied to every API path except login.
    pub fn api_prefix(self) -> &'static str {
        match self {
            Self::Classic => "",
            Self::UnifiOs => "/proxy/network",
        }
    }

    pub fn login_path(self) -> &'static str {
        match self {
            Self::Classic => "/api/login",
            Self::UnifiOs => "/api/auth/login",
        }
    }

    pub fn is_unifi_os(self) -> bool {
        self == Self::UnifiOs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unifi_os_prefixes_everything_but_login() {
        assert_eq!(ControllerPlatform::UnifiOs.api_prefix(), "/proxy/network");
        assert_eq!(ControllerPlatform::UnifiOs.login_path(), "/api/auth/login");
        assert_eq!(ControllerPlatform::Classic.api_prefix(), "");
        assert_eq!(ControllerPlatform::Classic.login_path(), "/api/login");
    }
}
