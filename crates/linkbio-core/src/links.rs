//! Operations on one user's ordered link collection.
//!
//! Order indices follow two rules that differ on purpose:
//!
//! - appending assigns `order = number of existing links`
//! - deleting never renumbers the remaining links, so gaps may appear until
//!   the next [`reorder_links`](LinkManager::reorder_links)
//!
//! Reordering rewrites every order index from a caller-supplied id sequence.
//! Links whose ids are absent from that sequence are dropped from the
//! collection.

use std::collections::{HashMap, HashSet};

use linkbio_store::{KeyValueStore, StoreAdapter};
use linkbio_types::{Link, LinkId, LinkPatch, NewLink, User, UserId, UserPatch};
use tracing::debug;

use crate::error::{CoreError, CoreResult};
use crate::repository::UserRepository;

/// Direction for [`LinkManager::move_link`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MoveDirection {
    /// Toward the start of the presentation order.
    Up,
    /// Toward the end of the presentation order.
    Down,
}

/// Link CRUD for an explicitly named owner.
///
/// Every operation re-reads the owner from the store and persists through
/// [`UserRepository::update_user`].
pub struct LinkManager<'a, S> {
    users: UserRepository<'a, S>,
}

impl<'a, S: KeyValueStore> LinkManager<'a, S> {
    pub fn new(adapter: &'a StoreAdapter<S>) -> Self {
        Self {
            users: UserRepository::new(adapter),
        }
    }

    /// Validate `title` and `url` and append the link.
    pub fn add_link(&self, user_id: &UserId, title: &str, url: &str) -> CoreResult<User> {
        let link = NewLink::new(title, url).map_err(CoreError::InvalidLinkData)?;
        self.add_new_link(user_id, link)
    }

    /// Append an already validated link with `order = current link count`.
    pub fn add_new_link(&self, user_id: &UserId, link: NewLink) -> CoreResult<User> {
        let user = self.users.get(user_id)?;
        let mut links = user.links;
        let link = link.into_link(links.len());
        debug!(user = %user_id, link = %link.id, order = link.order, "link added");
        links.push(link);
        self.users.update_user(user_id, UserPatch::links(links))
    }

    /// Merge `patch` into one link. Id and owner never change.
    pub fn update_link(
        &self,
        user_id: &UserId,
        link_id: &LinkId,
        patch: &LinkPatch,
    ) -> CoreResult<User> {
        let user = self.users.get(user_id)?;
        let mut links = user.links;
        let link = links
            .iter_mut()
            .find(|link| &link.id == link_id)
            .ok_or_else(|| CoreError::LinkNotFound { id: link_id.clone() })?;
        patch.apply(link).map_err(CoreError::InvalidLinkData)?;
        debug!(user = %user_id, link = %link_id, "link updated");
        self.users.update_user(user_id, UserPatch::links(links))
    }

    /// Remove one link. Siblings keep their order values.
    pub fn delete_link(&self, user_id: &UserId, link_id: &LinkId) -> CoreResult<User> {
        let user = self.users.get(user_id)?;
        let mut links = user.links;
        let before = links.len();
        links.retain(|link| &link.id != link_id);
        if links.len() == before {
            return Err(CoreError::LinkNotFound { id: link_id.clone() });
        }
        debug!(user = %user_id, link = %link_id, "link deleted");
        self.users.update_user(user_id, UserPatch::links(links))
    }

    /// Rebuild the collection in the order of `ordered_ids`.
    ///
    /// Each resolved link gets its position in the result as `order`, so the
    /// result's orders are exactly `0..k`. Links not named in `ordered_ids`
    /// are dropped. Unknown ids and repeats of an id already placed are
    /// skipped and take no position.
    pub fn reorder_links(&self, user_id: &UserId, ordered_ids: &[LinkId]) -> CoreResult<User> {
        let user = self.users.get(user_id)?;
        let mut by_id: HashMap<LinkId, Link> = user
            .links
            .into_iter()
            .map(|link| (link.id.clone(), link))
            .collect();

        let mut placed = HashSet::new();
        let mut links = Vec::with_capacity(ordered_ids.len());
        for id in ordered_ids {
            if !placed.insert(id) {
                continue;
            }
            if let Some(mut link) = by_id.remove(id) {
                link.order = links.len();
                links.push(link);
            }
        }

        if !by_id.is_empty() {
            debug!(user = %user_id, dropped = by_id.len(), "reorder dropped unlisted links");
        }
        self.users.update_user(user_id, UserPatch::links(links))
    }

    /// Swap a link with its neighbour in presentation order.
    ///
    /// The whole collection is compacted to `0..n` as a side effect. Moving
    /// the first link up or the last link down only compacts.
    pub fn move_link(
        &self,
        user_id: &UserId,
        link_id: &LinkId,
        direction: MoveDirection,
    ) -> CoreResult<User> {
        let user = self.users.get(user_id)?;
        let mut ids = user.ordered_link_ids();
        let position = ids
            .iter()
            .position(|id| id == link_id)
            .ok_or_else(|| CoreError::LinkNotFound { id: link_id.clone() })?;

        let neighbour = match direction {
            MoveDirection::Up => position.checked_sub(1),
            MoveDirection::Down => Some(position + 1).filter(|&n| n < ids.len()),
        };
        if let Some(neighbour) = neighbour {
            ids.swap(position, neighbour);
        }
        self.reorder_links(user_id, &ids)
    }
}
