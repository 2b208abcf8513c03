//! User records and profile updates.

use serde::{Deserialize, Serialize};

use crate::ids::{LinkId, UserId};
use crate::link::Link;

/// A registered profile and its exclusively owned links.
///
/// Serialized in camelCase (`displayName`, `profilePicture`) to match the
/// persisted `users` layout.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    /// Unique, case-sensitive public-profile address.
    pub username: String,
    /// Unique login identifier.
    pub email: String,
    #[serde(default)]
    pub display_name: String,
    #[serde(default)]
    pub bio: String,
    /// Image URI, typically a data URI supplied by an upload collaborator.
    #[serde(default)]
    pub profile_picture: String,
    /// Links in storage order. Use [`User::sorted_links`] for display order.
    #[serde(default)]
    pub links: Vec<Link>,
}

impl User {
    /// Create a fresh user whose display name defaults to the username.
    pub fn new(username: impl Into<String>, email: impl Into<String>) -> Self {
        let username = username.into();
        Self {
            id: UserId::new(),
            display_name: username.clone(),
            username,
            email: email.into(),
            bio: String::new(),
            profile_picture: String::new(),
            links: Vec::new(),
        }
    }

    /// Look up one of this user's links by id.
    pub fn link(&self, id: &LinkId) -> Option<&Link> {
        self.links.iter().find(|link| &link.id == id)
    }

    /// Links in presentation order (ascending `order`, stable for ties).
    pub fn sorted_links(&self) -> Vec<&Link> {
        let mut links: Vec<&Link> = self.links.iter().collect();
        links.sort_by_key(|link| link.order);
        links
    }

    /// Ids of this user's links in presentation order.
    pub fn ordered_link_ids(&self) -> Vec<LinkId> {
        self.sorted_links().into_iter().map(|link| link.id.clone()).collect()
    }
}

/// Field-wise partial update for a [`User`].
///
/// Unset fields keep their stored values. The user id is not patchable.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPatch {
    pub username: Option<String>,
    pub email: Option<String>,
    pub display_name: Option<String>,
    pub bio: Option<String>,
    pub profile_picture: Option<String>,
    pub links: Option<Vec<Link>>,
}

impl UserPatch {
    /// A patch that replaces only the link collection.
    pub fn links(links: Vec<Link>) -> Self {
        Self {
            links: Some(links),
            ..Default::default()
        }
    }

    /// Merge the supplied fields into `user`.
    pub fn apply(self, user: &mut User) {
        if let Some(username) = self.username {
            user.username = username;
        }
        if let Some(email) = self.email {
            user.email = email;
        }
        if let Some(display_name) = self.display_name {
            user.display_name = display_name;
        }
        if let Some(bio) = self.bio {
            user.bio = bio;
        }
        if let Some(profile_picture) = self.profile_picture {
            user.profile_picture = profile_picture;
        }
        if let Some(links) = self.links {
            user.links = links;
        }
    }
}
