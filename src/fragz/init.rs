use crate::api::FragzApi;
use crate::config::FragzConfig;
use crate::error::{FragzError, Result};
use crate::fragmenter::process::ProcessFragmenter;
use crate::session::Session;
use crate::source::fs::FileReader;
use directories::ProjectDirs;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const HOME_ENV: &str = "FRAGZ_HOME";

/// Subcommand the binary answers to when it acts as its own collaborator.
pub const WORKER_SUBCOMMAND: &str = "split-worker";

pub struct FragzContext {
    pub api: FragzApi<FileReader, ProcessFragmenter>,
    pub config: FragzConfig,
    pub config_dir: PathBuf,
}

/// Picks the config directory: an explicit path wins, then `$FRAGZ_HOME`,
/// then the platform config dir.
pub fn resolve_config_dir(explicit: Option<&Path>) -> Result<PathBuf> {
    if let Some(dir) = explicit {
        return Ok(dir.to_path_buf());
    }
    if let Some(home) = std::env::var_os(HOME_ENV).filter(|v| !v.is_empty()) {
        return Ok(PathBuf::from(home));
    }
    ProjectDirs::from("com", "fragz", "fragz")
        .map(|dirs| dirs.config_dir().to_path_buf())
        .ok_or_else(|| FragzError::Config("Could not determine config dir".into()))
}

/// Builds the process collaborator described by `config`. With no program
/// configured the current executable is used in worker mode.
pub fn build_fragmenter(config: &FragzConfig) -> Result<ProcessFragmenter> {
    let fragmenter = match &config.fragmenter.program {
        Some(program) => {
            ProcessFragmenter::new(program).with_args(config.fragmenter.args.iter().cloned())
        }
        None => {
            let exe = std::env::current_exe()?;
            ProcessFragmenter::new(exe).with_args([WORKER_SUBCOMMAND])
        }
    };
    let timeout = match config.fragmenter.timeout_secs {
        0 => None,
        secs => Some(Duration::from_secs(secs)),
    };
    Ok(fragmenter.with_timeout(timeout))
}

pub fn initialize(config_dir: Option<&Path>) -> Result<FragzContext> {
    let config_dir = resolve_config_dir(config_dir)?;
    let config = FragzConfig::load(&config_dir)?;
    log::debug!("Using config dir {}", config_dir.display());

    let session = Session::new(config.items_per_page, config.display_width);
    let api = FragzApi::new(session, FileReader::new(), build_fragmenter(&config)?);

    Ok(FragzContext {
        api,
        config,
        config_dir,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn explicit_dir_wins() {
        let temp = TempDir::new().unwrap();
        let dir = resolve_config_dir(Some(temp.path())).unwrap();
        assert_eq!(dir, temp.path());
    }

    #[test]
    fn initialize_applies_config() {
        let temp = TempDir::new().unwrap();
        let mut config = FragzConfig::default();
        config.items_per_page = 7;
        config.save(temp.path()).unwrap();

        let ctx = initialize(Some(temp.path())).unwrap();
        assert_eq!(ctx.config.items_per_page, 7);
        assert_eq!(ctx.api.session().items_per_page(), 7);
        assert_eq!(ctx.config_dir, temp.path());
    }

    #[test]
    fn invalid_config_fails_initialize() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("config.json"), "{ not json").unwrap();
        assert!(initialize(Some(temp.path())).is_err());
    }
}
