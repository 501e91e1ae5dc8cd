use crate::ports::{CacheStore, ClientHost};

/// A named, versioned set of cached shell resources. Exactly one
/// generation is current; every other one is stale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheVersion {
    pub prefix: String,
    pub version: u32,
}

impl CacheVersion {
    pub fn new(prefix: impl Into<String>, version: u32) -> Self {
        Self {
            prefix: prefix.into(),
            version,
        }
    }

    pub fn name(&self) -> String {
        format!("{}-v{}", self.prefix, self.version)
    }
}

/// Install: open the current generation and fill it with the shell
/// manifest. A populate failure fails the install (the platform retries
/// installation); the skip-waiting directive is advisory.
pub async fn handle_install<C, H>(
    caches: &C,
    host: &H,
    current: &CacheVersion,
    shell_urls: &[String],
) -> Result<(), C::Error>
where
    C: CacheStore,
    H: ClientHost,
{
    caches.populate(&current.name(), shell_urls).await?;

    // updates must not wait for every tab to close
    if let Err(err) = host.skip_waiting().await {
        eprintln!("skip-waiting directive failed: {err}");
    }
    Ok(())
}

/// Activate: evict every stale generation, then take control of the open
/// clients. Partial cleanup never blocks activation; whatever is left
/// gets retried on the next version bump. Returns the deleted names.
pub async fn handle_activate<C, H>(caches: &C, host: &H, current: &CacheVersion) -> Vec<String>
where
    C: CacheStore,
    H: ClientHost,
{
    let current_name = current.name();
    let mut deleted = Vec::new();

    match caches.names().await {
        Ok(names) => {
            for name in names {
                if name == current_name {
                    continue;
                }
                match caches.delete(&name).await {
                    Ok(true) => deleted.push(name),
                    Ok(false) => {}
                    Err(err) => eprintln!("stale cache '{name}' not deleted: {err}"),
                }
            }
        }
        Err(err) => eprintln!("cache enumeration failed: {err}"),
    }

    if let Err(err) = host.claim().await {
        eprintln!("client claim failed: {err}");
    }
    deleted
}
