//! Share link access statistics

use super::manager::ShareLinkManager;
use super::types::{CountryCount, ShareLinkStats};
use crate::audit::{AccessLogEntry, AccessType};
use crate::utils::error::Result;
use std::collections::{HashMap, HashSet};
use uuid::Uuid;

impl ShareLinkManager {
    /// Aggregates over the link's access log. Creator or admin only.
    pub async fn stats(&self, link_id: Uuid, actor_id: Uuid) -> Result<ShareLinkStats> {
        let link = self.load_link(link_id).await?;
        self.authorize_owner(&link, actor_id).await?;

        let entries = self.access_logs.list_access_logs(link_id).await?;
        Ok(summarize(link_id, &entries, self.config.top_countries))
    }
}

pub(crate) fn summarize(
    share_link_id: Uuid,
    entries: &[AccessLogEntry],
    top_countries: usize,
) -> ShareLinkStats {
    let mut views = 0;
    let mut downloads = 0;
    let mut ips = HashSet::new();
    let mut countries: HashMap<&str, u64> = HashMap::new();

    for entry in entries {
        match entry.access_type {
            AccessType::View => views += 1,
            AccessType::Download => downloads += 1,
        }
        if let Some(ip) = entry.ip_address.as_deref() {
            ips.insert(ip);
        }
        if let Some(country) = entry.country.as_deref() {
            *countries.entry(country).or_default() += 1;
        }
    }

    let mut ranked: Vec<CountryCount> = countries
        .into_iter()
        .map(|(country, count)| CountryCount {
            country: country.to_string(),
            count,
        })
        .collect();
    // Most accesses first, ties by name so output is stable
    ranked.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.country.cmp(&b.country)));
    ranked.truncate(top_countries);

    ShareLinkStats {
        share_link_id,
        views,
        downloads,
        unique_ips: ips.len(),
        top_countries: ranked,
        first_access_at: entries.iter().map(|e| e.created_at).min(),
        last_access_at: entries.iter().map(|e| e.created_at).max(),
    }
}
