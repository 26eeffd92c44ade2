//! Paginated commit listing

use metrics_core::SourceClient;

use crate::outcome::WalkStop;
use crate::worker::BranchContext;

/// Commit hashes listed for one branch, in listing order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Walk {
    pub hashes: Vec<String>,
    pub pages: usize,
    pub stop: WalkStop,
}

/// Requests commit pages for a branch until the listing is exhausted, a page
/// fails, or more than `cap` hashes were accumulated.
///
/// Items of a page are kept before the cap is checked, so a capped walk may
/// exceed `cap` by at most one page. Failed pages are never retried.
pub async fn walk_commits(source: &dyn SourceClient, ctx: &BranchContext, cap: usize) -> Walk {
    let mut walk = Walk::default();
    let mut cursor = String::new();

    loop {
        let page = match source
            .commits_page(&ctx.project, &ctx.repository, &ctx.branch, &cursor)
            .await
        {
            Ok(page) => page,
            Err(e) => {
                log::warn!("⚠️  Skip commits page for {} (cursor={:?}): {}", ctx, cursor, e);
                walk.stop = WalkStop::PageFailed(e.to_string());
                return walk;
            }
        };

        let next = page.next_cursor().map(str::to_owned);
        walk.pages += 1;
        walk.hashes.extend(page.items.into_iter().map(|item| item.hash));
        log::debug!(
            "{}: page {} (total: {} commits)",
            ctx,
            walk.pages,
            walk.hashes.len()
        );

        let Some(next) = next else {
            return walk;
        };

        if walk.hashes.len() > cap {
            log::warn!("⚠️  Too many commits (>{}), stop walking {}", cap, ctx);
            walk.stop = WalkStop::CapReached;
            return walk;
        }

        cursor = next;
    }
}
