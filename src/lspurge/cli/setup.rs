use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Returns the version string, including git hash and commit date for non-release builds.
/// Format: "0.1.0" for releases, "0.1.0@abc1234 2024-01-15 14:30" for dev builds
fn get_version() -> &'static str {
    const VERSION: &str = env!("CARGO_PKG_VERSION");
    const GIT_HASH: &str = env!("GIT_HASH");
    const GIT_COMMIT_DATE: &str = env!("GIT_COMMIT_DATE");
    const IS_RELEASE: &str = env!("IS_RELEASE");

    use std::sync::OnceLock;
    static VERSION_STRING: OnceLock<String> = OnceLock::new();

    VERSION_STRING.get_or_init(|| {
        if IS_RELEASE == "true" || GIT_HASH.is_empty() {
            VERSION.to_string()
        } else {
            format!("{}@{} {}", VERSION, GIT_HASH, GIT_COMMIT_DATE)
        }
    })
}

#[derive(Parser, Debug)]
#[command(name = "lspurge", bin_name = "lspurge", version = get_version())]
#[command(
    about = "Purge LiteSpeed Cache entries of a WordPress install",
    long_about = None
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Debug logging on stderr
    #[arg(short, long, global = true, help_heading = "Options")]
    pub verbose: bool,

    /// Path to lspurge.json
    #[arg(short, long, global = true, value_name = "PATH", help_heading = "Options")]
    pub config: Option<PathBuf>,

    /// Home URL of the install, overriding config and environment
    #[arg(long, global = true, value_name = "URL", help_heading = "Options")]
    pub site_url: Option<String>,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    /// Purge all cache entries (the entire network on multisite)
    All,

    /// Purge all cache entries of one blog of a multisite network
    Blog {
        /// Id of the blog, as shown by network_list
        blog_id: String,
    },

    /// Purge the cache entries of one page
    Url {
        /// Full URL of the page, served by this install
        url: String,
    },

    /// Purge the cache tags of the given tag ids
    Tag {
        #[arg(required = true, num_args = 1..)]
        ids: Vec<String>,
    },

    /// Purge the cache tags of the given category ids
    Category {
        #[arg(required = true, num_args = 1..)]
        ids: Vec<String>,
    },

    /// Purge the cache tags of the given post ids
    #[command(name = "post_id", visible_alias = "product")]
    PostId {
        #[arg(required = true, num_args = 1..)]
        ids: Vec<String>,
    },

    /// List the domains and blog ids of a multisite network
    #[command(name = "network_list")]
    NetworkList,

    /// Print the effective configuration
    Config,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(args).unwrap()
    }

    #[test]
    fn parses_purge_all() {
        assert_eq!(parse(&["lspurge", "all"]).command, Commands::All);
    }

    #[test]
    fn parses_blog_id_as_raw_text() {
        assert_eq!(
            parse(&["lspurge", "blog", "abc"]).command,
            Commands::Blog {
                blog_id: "abc".to_string()
            }
        );
    }

    #[test]
    fn id_lists_keep_order_and_raw_values() {
        assert_eq!(
            parse(&["lspurge", "category", "1", "abc", "3"]).command,
            Commands::Category {
                ids: vec!["1".into(), "abc".into(), "3".into()]
            }
        );
    }

    #[test]
    fn id_lists_require_an_id() {
        assert!(Cli::try_parse_from(["lspurge", "tag"]).is_err());
    }

    #[test]
    fn product_is_post_id() {
        assert_eq!(
            parse(&["lspurge", "product", "7"]).command,
            Commands::PostId {
                ids: vec!["7".into()]
            }
        );
        assert!(matches!(
            parse(&["lspurge", "post_id", "7"]).command,
            Commands::PostId { .. }
        ));
    }

    #[test]
    fn network_list_keeps_its_underscore() {
        assert_eq!(
            parse(&["lspurge", "network_list"]).command,
            Commands::NetworkList
        );
    }

    #[test]
    fn global_flags_work_after_the_subcommand() {
        let cli = parse(&[
            "lspurge",
            "url",
            "https://mysite.com/",
            "-v",
            "--config",
            "/tmp/lspurge.json",
            "--site-url",
            "https://mysite.com",
        ]);
        assert!(cli.verbose);
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/lspurge.json")));
        assert_eq!(cli.site_url.as_deref(), Some("https://mysite.com"));
    }

    #[test]
    fn a_subcommand_is_required() {
        assert!(Cli::try_parse_from(["lspurge"]).is_err());
    }
}
