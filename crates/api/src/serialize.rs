//! Explicit row-to-wire mapping functions.
//!
//! Every entity exposed over HTTP has a dedicated response struct and a
//! mapping function here, so field exposure and hiding (password hashes,
//! read-only counters) is an auditable list rather than inferred from row
//! shape.

use serde::Serialize;

use openreel_core::types::{DbId, Timestamp};
use openreel_db::models::category::Category;
use openreel_db::models::comment::Comment;
use openreel_db::models::like::Like;
use openreel_db::models::notification::Notification;
use openreel_db::models::profile::Profile;
use openreel_db::models::user::User;
use openreel_db::models::video::VideoDetail;

// ---------------------------------------------------------------------------
// Users / profiles
// ---------------------------------------------------------------------------

/// Safe user representation for API responses. The password hash never
/// appears here.
#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub id: DbId,
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub email_verified: bool,
    pub created_at: Timestamp,
}

pub fn user_to_response(user: &User) -> UserResponse {
    UserResponse {
        id: user.id,
        username: user.username.clone(),
        email: user.email.clone(),
        first_name: user.first_name.clone(),
        last_name: user.last_name.clone(),
        email_verified: user.email_verified,
        created_at: user.created_at,
    }
}

/// Compact user reference embedded in videos, comments, and notifications.
#[derive(Debug, Clone, Serialize)]
pub struct UserRef {
    pub id: DbId,
    pub username: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProfileResponse {
    pub id: DbId,
    pub username: String,
    pub email: String,
    pub bio: String,
    pub avatar_path: Option<String>,
    pub location: String,
    pub website: String,
    pub date_of_birth: Option<chrono::NaiveDate>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

pub fn profile_to_response(profile: &Profile) -> ProfileResponse {
    ProfileResponse {
        id: profile.id,
        username: profile.username.clone(),
        email: profile.email.clone(),
        bio: profile.bio.clone(),
        avatar_path: profile.avatar_path.clone(),
        location: profile.location.clone(),
        website: profile.website.clone(),
        date_of_birth: profile.date_of_birth,
        created_at: profile.created_at,
        updated_at: profile.updated_at,
    }
}

// ---------------------------------------------------------------------------
// Categories
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
pub struct CategoryResponse {
    pub id: DbId,
    pub name: String,
    pub slug: String,
    pub description: String,
    pub created_at: Timestamp,
}

pub fn category_to_response(category: &Category) -> CategoryResponse {
    CategoryResponse {
        id: category.id,
        name: category.name.clone(),
        slug: category.slug.clone(),
        description: category.description.clone(),
        created_at: category.created_at,
    }
}

/// Compact category reference embedded in video responses.
#[derive(Debug, Clone, Serialize)]
pub struct CategoryRef {
    pub id: DbId,
    pub name: String,
    pub slug: String,
}

// ---------------------------------------------------------------------------
// Videos
// ---------------------------------------------------------------------------

/// Wire representation of a video with embedded uploader, category, and
/// interaction counts. `views` and `slug` are read-only by construction.
#[derive(Debug, Clone, Serialize)]
pub struct VideoResponse {
    pub id: DbId,
    pub title: String,
    pub description: String,
    pub file_path: String,
    pub thumbnail_path: Option<String>,
    pub uploader: UserRef,
    pub category: Option<CategoryRef>,
    pub privacy: String,
    pub views: i64,
    pub slug: String,
    pub duration_secs: i64,
    pub tags: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub likes_count: i64,
    pub dislikes_count: i64,
    pub comments_count: i64,
}

pub fn video_to_response(video: &VideoDetail) -> VideoResponse {
    let category = match (video.category_id, &video.category_name, &video.category_slug) {
        (Some(id), Some(name), Some(slug)) => Some(CategoryRef {
            id,
            name: name.clone(),
            slug: slug.clone(),
        }),
        _ => None,
    };
    VideoResponse {
        id: video.id,
        title: video.title.clone(),
        description: video.description.clone(),
        file_path: video.file_path.clone(),
        thumbnail_path: video.thumbnail_path.clone(),
        uploader: UserRef {
            id: video.uploader_id,
            username: video.uploader_username.clone(),
        },
        category,
        privacy: video.privacy.clone(),
        views: video.views,
        slug: video.slug.clone(),
        duration_secs: video.duration_secs,
        tags: video.tags.clone(),
        created_at: video.created_at,
        updated_at: video.updated_at,
        likes_count: video.likes_count,
        dislikes_count: video.dislikes_count,
        comments_count: video.comments_count,
    }
}

// ---------------------------------------------------------------------------
// Comments
// ---------------------------------------------------------------------------

/// Wire representation of a comment with its embedded reply subtree.
#[derive(Debug, Clone, Serialize)]
pub struct CommentResponse {
    pub id: DbId,
    pub video_id: DbId,
    pub user: UserRef,
    pub parent_id: Option<DbId>,
    pub text: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub replies: Vec<CommentResponse>,
}

pub fn comment_to_response(comment: &Comment, replies: Vec<CommentResponse>) -> CommentResponse {
    CommentResponse {
        id: comment.id,
        video_id: comment.video_id,
        user: UserRef {
            id: comment.user_id,
            username: comment.username.clone(),
        },
        parent_id: comment.parent_id,
        text: comment.text.clone(),
        created_at: comment.created_at,
        updated_at: comment.updated_at,
        replies,
    }
}

/// Assemble a reply tree from a flat per-video comment fetch.
///
/// Input must contain every comment of the video, newest-first; the output
/// is the top-level comments in the same order with their subtrees attached.
pub fn build_comment_tree(comments: Vec<Comment>) -> Vec<CommentResponse> {
    use std::collections::HashMap;

    let mut children: HashMap<DbId, Vec<Comment>> = HashMap::new();
    let mut roots: Vec<Comment> = Vec::new();
    for comment in comments {
        match comment.parent_id {
            Some(parent_id) => children.entry(parent_id).or_default().push(comment),
            None => roots.push(comment),
        }
    }

    fn attach(comment: Comment, children: &mut std::collections::HashMap<DbId, Vec<Comment>>) -> CommentResponse {
        let kids = children.remove(&comment.id).unwrap_or_default();
        let replies = kids.into_iter().map(|k| attach(k, children)).collect();
        comment_to_response(&comment, replies)
    }

    roots
        .into_iter()
        .map(|c| attach(c, &mut children))
        .collect()
}

// ---------------------------------------------------------------------------
// Likes / notifications
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
pub struct LikeResponse {
    pub id: DbId,
    pub video_id: DbId,
    pub user_id: DbId,
    pub like_type: String,
    pub created_at: Timestamp,
}

pub fn like_to_response(like: &Like) -> LikeResponse {
    LikeResponse {
        id: like.id,
        video_id: like.video_id,
        user_id: like.user_id,
        like_type: like.like_type.clone(),
        created_at: like.created_at,
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct NotificationResponse {
    pub id: DbId,
    pub sender: UserRef,
    pub notification_type: String,
    pub video_id: Option<DbId>,
    pub comment_id: Option<DbId>,
    pub text: String,
    pub is_read: bool,
    pub created_at: Timestamp,
}

pub fn notification_to_response(notification: &Notification) -> NotificationResponse {
    NotificationResponse {
        id: notification.id,
        sender: UserRef {
            id: notification.sender_id,
            username: notification.sender_username.clone(),
        },
        notification_type: notification.notification_type.clone(),
        video_id: notification.video_id,
        comment_id: notification.comment_id,
        text: notification.text.clone(),
        is_read: notification.is_read,
        created_at: notification.created_at,
    }
}
