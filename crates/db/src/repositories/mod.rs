//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod category_repo;
pub mod comment_repo;
pub mod like_repo;
pub mod notification_repo;
pub mod profile_repo;
pub mod session_repo;
pub mod user_repo;
pub mod video_repo;
pub mod video_view_repo;

pub use category_repo::CategoryRepo;
pub use comment_repo::CommentRepo;
pub use like_repo::LikeRepo;
pub use notification_repo::NotificationRepo;
pub use profile_repo::ProfileRepo;
pub use session_repo::SessionRepo;
pub use user_repo::UserRepo;
pub use video_repo::VideoRepo;
pub use video_view_repo::VideoViewRepo;
