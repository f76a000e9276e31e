use thiserror::Error;

#[derive(Error, Debug)]
pub enum PurgeError {
    #[error("invalid blog id entered: {0}")]
    InvalidBlogId(String),

    #[error("url passed in is invalid: {0}")]
    InvalidUrl(String),

    #[error("{} url passed in is invalid: {host} is not served here", install_kind(.multisite))]
    DomainMismatch { host: String, multisite: bool },

    #[error("Arguments must be integer ids.")]
    EmptyTargetSet,

    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),

    #[error("Not a multisite installation.")]
    NotMultisite,

    #[error("Site directory unavailable: {0}")]
    DirectoryUnavailable(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Unexpected response from endpoint (HTTP {status_code}): {message}")]
    Application { status_code: u16, message: String },

    #[error("Something went wrong! Got {status_code}")]
    Rejected { status_code: u16, message: String },

    #[error("Config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Api(String),
}

fn install_kind(multisite: &bool) -> &'static str {
    if *multisite {
        "Multisite"
    } else {
        "Single site"
    }
}

impl PurgeError {
    /// True when the endpoint was never reached, so sending again cannot
    /// double-apply a purge.
    pub fn is_retryable(&self) -> bool {
        matches!(self, PurgeError::Network(_))
    }
}

pub type Result<T> = std::result::Result<T, PurgeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_network_errors_are_retryable() {
        assert!(PurgeError::Network("timed out".into()).is_retryable());
        assert!(!PurgeError::Application {
            status_code: 500,
            message: "bad body".into()
        }
        .is_retryable());
        assert!(!PurgeError::EmptyTargetSet.is_retryable());
    }

    #[test]
    fn domain_mismatch_names_install_kind() {
        let single = PurgeError::DomainMismatch {
            host: "other.com".into(),
            multisite: false,
        };
        let multi = PurgeError::DomainMismatch {
            host: "other.com".into(),
            multisite: true,
        };
        assert!(single.to_string().starts_with("Single site url passed in is invalid"));
        assert!(multi.to_string().starts_with("Multisite url passed in is invalid"));
    }

    #[test]
    fn rejection_reports_status_code() {
        let err = PurgeError::Rejected {
            status_code: 500,
            message: String::new(),
        };
        assert_eq!(err.to_string(), "Something went wrong! Got 500");
        assert!(!err.is_retryable());
    }

    #[test]
    fn empty_set_message_matches_cli_wording() {
        assert_eq!(
            PurgeError::EmptyTargetSet.to_string(),
            "Arguments must be integer ids."
        );
    }
}
