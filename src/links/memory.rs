use super::{slug, ExpirationPolicy, LinkStore, PublicLink};
use crate::error::{ReelPassError, Result};
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::{debug, info};

#[derive(Debug)]
struct LinkEntry {
    link: PublicLink,
    views: AtomicU64,
}

impl LinkEntry {
    fn new(link: PublicLink) -> Self {
        let views = AtomicU64::new(link.view_count);
        Self { link, views }
    }

    fn view(&self) -> PublicLink {
        let mut link = self.link.clone();
        link.view_count = self.views.load(Ordering::SeqCst);
        link
    }
}

/// Process-local link store. Lifecycle changes take the write lock; view
/// increments only need the read lock because counters are atomic.
#[derive(Debug, Default)]
pub struct InMemoryLinkStore {
    links: RwLock<BTreeMap<String, LinkEntry>>,
}

impl InMemoryLinkStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_links(links: Vec<PublicLink>) -> Self {
        let map = links
            .into_iter()
            .map(|link| (link.slug.clone(), LinkEntry::new(link)))
            .collect();
        Self {
            links: RwLock::new(map),
        }
    }

    /// All links with their current view counts, ordered by slug.
    pub fn snapshot(&self) -> Vec<PublicLink> {
        self.read().values().map(LinkEntry::view).collect()
    }

    fn read(&self) -> RwLockReadGuard<'_, BTreeMap<String, LinkEntry>> {
        self.links.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, BTreeMap<String, LinkEntry>> {
        self.links.write().unwrap_or_else(PoisonError::into_inner)
    }
}

fn active_slug(
    links: &BTreeMap<String, LinkEntry>,
    professional_id: &str,
    now: DateTime<Utc>,
) -> Option<String> {
    links
        .values()
        .filter(|entry| entry.link.professional_id == professional_id && entry.link.is_active(now))
        .max_by_key(|entry| entry.link.created_at)
        .map(|entry| entry.link.slug.clone())
}

/// Revokes lapsed links so at most one non-revoked link remains per
/// professional once a new one is inserted.
fn retire_expired(
    links: &mut BTreeMap<String, LinkEntry>,
    professional_id: &str,
    now: DateTime<Utc>,
) {
    for entry in links.values_mut() {
        let link = &mut entry.link;
        if link.professional_id == professional_id && !link.revoked && link.is_expired(now) {
            link.revoked = true;
            info!(professional_id, slug = %link.slug, "expired public link retired");
        }
    }
}

fn insert_new(
    links: &mut BTreeMap<String, LinkEntry>,
    professional_id: &str,
    policy: ExpirationPolicy,
    now: DateTime<Utc>,
) -> PublicLink {
    let mut minted = slug::mint(professional_id, now);
    while links.contains_key(&minted) {
        minted = slug::mint(professional_id, now);
    }
    let link = PublicLink {
        slug: minted.clone(),
        professional_id: professional_id.to_string(),
        created_at: now,
        expires_at: policy.expires_at(now),
        revoked: false,
        view_count: 0,
    };
    links.insert(minted, LinkEntry::new(link.clone()));
    info!(professional_id, slug = %link.slug, expiration = %policy, "public link created");
    link
}

impl LinkStore for InMemoryLinkStore {
    fn create(
        &self,
        professional_id: &str,
        policy: ExpirationPolicy,
        now: DateTime<Utc>,
    ) -> Result<PublicLink> {
        let mut links = self.write();
        if let Some(slug) = active_slug(&links, professional_id, now) {
            return Err(ReelPassError::ActiveLinkExists {
                professional_id: professional_id.to_string(),
                slug,
            });
        }
        retire_expired(&mut links, professional_id, now);
        Ok(insert_new(&mut links, professional_id, policy, now))
    }

    fn replace(
        &self,
        professional_id: &str,
        policy: ExpirationPolicy,
        now: DateTime<Utc>,
    ) -> Result<PublicLink> {
        let mut links = self.write();
        for entry in links.values_mut() {
            if entry.link.professional_id == professional_id && !entry.link.revoked {
                entry.link.revoked = true;
                info!(professional_id, slug = %entry.link.slug, "public link superseded");
            }
        }
        Ok(insert_new(&mut links, professional_id, policy, now))
    }

    fn revoke(&self, slug: &str) -> Result<()> {
        let mut links = self.write();
        let entry = links
            .get_mut(slug)
            .ok_or_else(|| ReelPassError::LinkNotFound(slug.to_string()))?;
        if !entry.link.revoked {
            entry.link.revoked = true;
            info!(slug, "public link revoked");
        }
        Ok(())
    }

    fn increment_view(&self, slug: &str, now: DateTime<Utc>) -> Result<u64> {
        let links = self.read();
        let entry = links
            .get(slug)
            .ok_or_else(|| ReelPassError::LinkNotFound(slug.to_string()))?;
        if entry.link.revoked {
            return Err(ReelPassError::LinkRevoked(slug.to_string()));
        }
        if entry.link.is_expired(now) {
            return Err(ReelPassError::LinkExpired(slug.to_string()));
        }
        let views = entry.views.fetch_add(1, Ordering::SeqCst) + 1;
        debug!(slug, views, "public link viewed");
        Ok(views)
    }

    fn get(&self, slug: &str) -> Result<PublicLink> {
        self.read()
            .get(slug)
            .map(LinkEntry::view)
            .ok_or_else(|| ReelPassError::LinkNotFound(slug.to_string()))
    }

    fn active_for(&self, professional_id: &str, now: DateTime<Utc>) -> Option<PublicLink> {
        let links = self.read();
        active_slug(&links, professional_id, now)
            .and_then(|slug| links.get(&slug).map(LinkEntry::view))
    }

    fn links_for(&self, professional_id: &str) -> Vec<PublicLink> {
        self.read()
            .values()
            .filter(|entry| entry.link.professional_id == professional_id)
            .map(LinkEntry::view)
            .collect()
    }
}
