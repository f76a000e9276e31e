use super::CmdResult;
use crate::directory::SiteDirectory;
use crate::error::{PurgeError, Result};

/// Lists every site of the network, in registry order.
pub fn run<D: SiteDirectory>(directory: &D) -> Result<CmdResult> {
    if !directory.is_multisite() {
        return Err(PurgeError::NotMultisite);
    }
    Ok(CmdResult::default().with_sites(directory.list_sites()?))
}
