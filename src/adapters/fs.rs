use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};
use std::pin::Pin;

use crate::ports::CacheStore;

#[derive(Debug)]
pub enum CacheDirError {
    BadPath(String),
    Io(std::io::Error),
}

impl std::fmt::Display for CacheDirError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CacheDirError::BadPath(path) => write!(f, "refusing cache path '{path}'"),
            CacheDirError::Io(err) => write!(f, "cache io error: {err}"),
        }
    }
}

/// Versioned shell cache on disk, for embedding hosts that bundle their
/// shell resources: one directory per generation under `root`, populated
/// by mirroring files out of `source`.
#[derive(Debug, Clone)]
pub struct DirCacheStore {
    root: PathBuf,
    source: PathBuf,
}

impl DirCacheStore {
    pub fn new(root: impl Into<PathBuf>, source: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            source: source.into(),
        }
    }

    /// Map a shell URL onto a relative file path. `/` is the app shell
    /// itself and maps to `index.html`. Anything trying to step outside
    /// the cache directory is rejected.
    fn resource_path(url: &str) -> Result<PathBuf, CacheDirError> {
        let trimmed = url.trim_start_matches('/');
        let path = if trimmed.is_empty() {
            Path::new("index.html")
        } else {
            Path::new(trimmed)
        };
        for component in path.components() {
            match component {
                Component::Normal(_) => {}
                _ => return Err(CacheDirError::BadPath(url.to_string())),
            }
        }
        Ok(path.to_path_buf())
    }

    fn generation_dir(&self, name: &str) -> Result<PathBuf, CacheDirError> {
        let mut components = Path::new(name).components();
        match (components.next(), components.next()) {
            (Some(Component::Normal(_)), None) => Ok(self.root.join(name)),
            _ => Err(CacheDirError::BadPath(name.to_string())),
        }
    }

    fn populate_sync(&self, name: &str, urls: &[String]) -> Result<(), CacheDirError> {
        let generation = self.generation_dir(name)?;
        std::fs::create_dir_all(&generation).map_err(CacheDirError::Io)?;
        for url in urls {
            let relative = Self::resource_path(url)?;
            let target = generation.join(&relative);
            if let Some(parent) = target.parent() {
                std::fs::create_dir_all(parent).map_err(CacheDirError::Io)?;
            }
            std::fs::copy(self.source.join(&relative), &target).map_err(CacheDirError::Io)?;
        }
        Ok(())
    }

    fn names_sync(&self) -> Result<Vec<String>, CacheDirError> {
        let entries = match std::fs::read_dir(&self.root) {
            Ok(entries) => entries,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => return Err(CacheDirError::Io(err)),
        };
        let mut names = Vec::new();
        for entry in entries {
            let entry = entry.map_err(CacheDirError::Io)?;
            let is_dir = entry.file_type().map_err(CacheDirError::Io)?.is_dir();
            if is_dir {
                names.push(entry.file_name().to_string_lossy().into_owned());
            }
        }
        names.sort();
        Ok(names)
    }

    fn delete_sync(&self, name: &str) -> Result<bool, CacheDirError> {
        let generation = self.generation_dir(name)?;
        match std::fs::remove_dir_all(&generation) {
            Ok(()) => Ok(true),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(false),
            Err(err) => Err(CacheDirError::Io(err)),
        }
    }
}

impl CacheStore for DirCacheStore {
    type Error = CacheDirError;
    type PopulateFut<'a>
        = Pin<Box<dyn Future<Output = Result<(), Self::Error>> + Send + 'a>>
    where
        Self: 'a;
    type NamesFut<'a>
        = Pin<Box<dyn Future<Output = Result<Vec<String>, Self::Error>> + Send + 'a>>
    where
        Self: 'a;
    type DeleteFut<'a>
        = Pin<Box<dyn Future<Output = Result<bool, Self::Error>> + Send + 'a>>
    where
        Self: 'a;

    fn populate<'a>(&'a self, name: &'a str, urls: &'a [String]) -> Self::PopulateFut<'a> {
        Box::pin(async move { self.populate_sync(name, urls) })
    }

    fn names<'a>(&'a self) -> Self::NamesFut<'a> {
        Box::pin(async move { self.names_sync() })
    }

    fn delete<'a>(&'a self, name: &'a str) -> Self::DeleteFut<'a> {
        Box::pin(async move { self.delete_sync(name) })
    }
}
