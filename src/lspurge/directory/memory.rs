use super::SiteDirectory;
use crate::error::Result;
use crate::model::SiteRecord;

/// A site registry known up front, from configuration or a test fixture.
#[derive(Debug, Clone, Default)]
pub struct StaticDirectory {
    multisite: bool,
    sites: Vec<SiteRecord>,
}

impl StaticDirectory {
    pub fn single_site() -> Self {
        Self::default()
    }

    pub fn multisite(sites: Vec<SiteRecord>) -> Self {
        Self {
            multisite: true,
            sites,
        }
    }

    pub fn with_site(mut self, blog_id: u64, domain: &str, path: &str) -> Self {
        self.multisite = true;
        self.sites.push(SiteRecord::new(blog_id, domain, path));
        self
    }
}

impl SiteDirectory for StaticDirectory {
    fn is_multisite(&self) -> bool {
        self.multisite
    }

    fn list_sites(&self) -> Result<Vec<SiteRecord>> {
        Ok(self.sites.clone())
    }
}
