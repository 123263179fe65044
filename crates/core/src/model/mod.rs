mod avatar;
mod bank;
mod category;
mod ids;
pub(crate) mod question;

pub use avatar::{AVATARS, Avatar, AvatarId, ParseAvatarError};
pub use bank::{IssueReport, Pool, QuestionBank};
pub use category::{Category, ParseCategoryError};
pub use ids::QuestionId;
pub use question::{MAX_OPTIONS, OPTION_LETTERS, Question, option_letter};
