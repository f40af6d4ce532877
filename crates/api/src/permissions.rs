//! Per-object authorization predicates.
//!
//! Each predicate is a pure function `(caller, resource) -> Result` applied
//! after authentication succeeds and before a mutation executes. A denial is
//! always an explicit 403, never a silent no-op.

use openreel_core::error::CoreError;
use openreel_core::types::DbId;

use openreel_db::models::comment::Comment;
use openreel_db::models::video::Video;

/// Only the uploader may update or delete a video.
pub fn ensure_video_owner(caller_id: DbId, video: &Video) -> Result<(), CoreError> {
    if video.uploader_id == caller_id {
        Ok(())
    } else {
        Err(CoreError::Forbidden(
            "Only the uploader may modify this video".into(),
        ))
    }
}

/// Only the author may update or delete a comment.
pub fn ensure_comment_author(caller_id: DbId, comment: &Comment) -> Result<(), CoreError> {
    if comment.user_id == caller_id {
        Ok(())
    } else {
        Err(CoreError::Forbidden(
            "Only the author may modify this comment".into(),
        ))
    }
}

/// Visibility predicate for a single video row.
///
/// Anonymous callers see only public videos; authenticated callers also see
/// unlisted videos and their own rows regardless of privacy. Mirrors the
/// SQL filter the list queries apply, for the single-row paths.
pub fn video_visible_to(viewer: Option<DbId>, video: &Video) -> bool {
    match viewer {
        None => video.privacy == "public",
        Some(caller_id) => {
            video.privacy == "public"
                || video.privacy == "unlisted"
                || video.uploader_id == caller_id
        }
    }
}
