//! Catalog resolution
//!
//! Configuration files:
//! - .mash.json - Project catalog, searched from the working directory upwards
//! - ~/.config/mash/config.json - Global catalog, used with --global or as fallback

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::catalog::{Catalog, ParsedCatalog};
use crate::error::{Error, Result};

/// File name looked for in each directory of the cascade
pub const LOCAL_CONFIG_NAME: &str = ".mash.json";

/// Get the global catalog path (~/.config/mash/config.json)
pub fn global_config_path() -> Result<PathBuf> {
    let home = dirs::home_dir().ok_or(Error::NoHomeDir)?;
    Ok(home.join(".config").join("mash").join("config.json"))
}

/// A loaded catalog together with the file it came from
#[derive(Debug, Clone)]
pub struct ResolvedCatalog {
    pub catalog: Catalog,
    pub source: PathBuf,
    pub legacy: bool,
}

/// Locates and loads the catalog for a session
#[derive(Debug, Clone)]
pub struct ConfigResolver {
    start_dir: PathBuf,
    global_path: Option<PathBuf>,
    /// Last directory the local search may look in
    ceiling: Option<PathBuf>,
}

impl ConfigResolver {
    pub fn new(start_dir: impl Into<PathBuf>, global_path: Option<PathBuf>) -> Self {
        Self {
            start_dir: start_dir.into(),
            global_path,
            ceiling: None,
        }
    }

    /// Stop the local search at `dir` instead of the filesystem root
    pub fn with_ceiling(mut self, dir: impl Into<PathBuf>) -> Self {
        self.ceiling = Some(dir.into());
        self
    }

    /// Resolver rooted at the current directory and the user's home
    pub fn from_env() -> Result<Self> {
        let cwd = std::env::current_dir().map_err(Error::CurrentDir)?;
        // A missing home only matters once the global path is actually needed
        Ok(Self::new(cwd, global_config_path().ok()))
    }

    /// Find the nearest `.mash.json` from the start directory up to the root
    pub fn find_local(&self) -> Option<PathBuf> {
        self.search_dirs()
            .map(|dir| dir.join(LOCAL_CONFIG_NAME))
            .inspect(|candidate| debug!(path = %candidate.display(), "checking for local catalog"))
            .find(|candidate| candidate.is_file())
    }

    fn search_dirs(&self) -> impl Iterator<Item = &Path> + '_ {
        let mut done = false;
        self.start_dir.ancestors().take_while(move |dir| {
            if done {
                return false;
            }
            done = self.ceiling.as_deref() == Some(*dir);
            true
        })
    }

    /// Path that `resolve` would load
    pub fn locate(&self, use_global: bool) -> Result<PathBuf> {
        if !use_global {
            if let Some(local) = self.find_local() {
                return Ok(local);
            }
        }
        self.global_path.clone().ok_or(Error::NoHomeDir)
    }

    pub fn resolve(&self, use_global: bool) -> Result<ResolvedCatalog> {
        let path = self.locate(use_global)?;
        debug!(path = %path.display(), use_global, "loading catalog");

        let parsed = load_file(&path)?;
        let legacy = parsed.is_legacy();
        if legacy {
            debug!(path = %path.display(), "catalog uses the legacy item array form");
        }

        Ok(ResolvedCatalog {
            catalog: parsed.into_catalog(),
            source: path,
            legacy,
        })
    }
}

/// Read and parse a single catalog file
pub fn load_file(path: &Path) -> Result<ParsedCatalog> {
    let content = fs::read_to_string(path).map_err(|source| {
        if source.kind() == io::ErrorKind::NotFound {
            Error::ConfigNotFound(path.to_path_buf())
        } else {
            Error::ConfigRead {
                path: path.to_path_buf(),
                source,
            }
        }
    })?;

    ParsedCatalog::parse(&content).map_err(|source| Error::ConfigParse {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn write_catalog(dir: &Path, title: &str) {
        let content = format!(r#"{{"items": [{{"title": "{title}", "cmd": "true"}}]}}"#);
        fs::write(dir.join(LOCAL_CONFIG_NAME), content).unwrap();
    }

    fn first_title(resolved: &ResolvedCatalog) -> &str {
        &resolved.catalog.items[0].title
    }

    #[test]
    fn test_cascade_prefers_nearest_ancestor() {
        let temp = tempdir().unwrap();
        let b = temp.path().join("a").join("b");
        let c = b.join("c");
        fs::create_dir_all(&c).unwrap();
        write_catalog(&b, "from b");

        let global_dir = temp.path().join("home");
        fs::create_dir_all(&global_dir).unwrap();
        let global = global_dir.join("config.json");
        fs::write(&global, r#"[{"title": "from global"}]"#).unwrap();

        let resolver = ConfigResolver::new(&c, Some(global));
        let resolved = resolver.resolve(false).unwrap();

        assert_eq!(first_title(&resolved), "from b");
        assert_eq!(resolved.source, b.join(LOCAL_CONFIG_NAME));
        assert!(!resolved.legacy);
    }

    #[test]
    fn test_cwd_catalog_wins_over_parent() {
        let temp = tempdir().unwrap();
        let child = temp.path().join("child");
        fs::create_dir_all(&child).unwrap();
        write_catalog(temp.path(), "parent");
        write_catalog(&child, "child");

        let resolver = ConfigResolver::new(&child, None);
        assert_eq!(first_title(&resolver.resolve(false).unwrap()), "child");
    }

    #[test]
    fn test_global_flag_skips_local_catalogs() {
        let temp = tempdir().unwrap();
        write_catalog(temp.path(), "local");
        let global = temp.path().join("global.json");
        fs::write(&global, r#"[{"title": "global", "cmd": "echo hi"}]"#).unwrap();

        let resolver = ConfigResolver::new(temp.path(), Some(global));
        let resolved = resolver.resolve(true).unwrap();

        assert_eq!(first_title(&resolved), "global");
        assert!(resolved.legacy);
    }

    #[test]
    fn test_falls_back_to_global_without_local() {
        let temp = tempdir().unwrap();
        let work = temp.path().join("work");
        fs::create_dir_all(&work).unwrap();
        let global = temp.path().join("global.json");
        fs::write(&global, r#"{"skipIntro": true, "items": []}"#).unwrap();

        // Keep the search out of real ancestors of the temp dir
        let resolver = ConfigResolver::new(&work, Some(global.clone())).with_ceiling(temp.path());
        assert_eq!(resolver.find_local(), None);

        let resolved = resolver.resolve(false).unwrap();
        assert_eq!(resolved.source, global);
        assert!(resolved.catalog.skip_intro);
    }

    #[test]
    fn test_ceiling_bounds_the_search() {
        let temp = tempdir().unwrap();
        let work = temp.path().join("a").join("b");
        fs::create_dir_all(&work).unwrap();
        write_catalog(temp.path(), "above");
        write_catalog(&temp.path().join("a"), "ceiling");

        let resolver = ConfigResolver::new(&work, None).with_ceiling(temp.path().join("a"));
        assert_eq!(resolver.find_local(), Some(temp.path().join("a").join(LOCAL_CONFIG_NAME)));

        let resolver = ConfigResolver::new(&work, None).with_ceiling(&work);
        assert_eq!(resolver.find_local(), None);
    }

    #[test]
    fn test_missing_global_is_not_found() {
        let temp = tempdir().unwrap();
        let missing = temp.path().join("nope.json");

        let resolver = ConfigResolver::new(temp.path(), Some(missing.clone()));
        match resolver.resolve(true) {
            Err(Error::ConfigNotFound(path)) => assert_eq!(path, missing),
            other => panic!("expected ConfigNotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_unparseable_catalog_is_parse_error() {
        let temp = tempdir().unwrap();
        fs::write(temp.path().join(LOCAL_CONFIG_NAME), "{ broken").unwrap();

        let resolver = ConfigResolver::new(temp.path(), None);
        let err = resolver.resolve(false).unwrap_err();
        assert!(matches!(err, Error::ConfigParse { .. }));
        assert!(err.to_string().contains(LOCAL_CONFIG_NAME));
    }

    #[test]
    fn test_no_home_without_global_path() {
        let temp = tempdir().unwrap();
        let resolver = ConfigResolver::new(temp.path(), None);
        assert!(matches!(resolver.locate(true), Err(Error::NoHomeDir)));
    }
}
