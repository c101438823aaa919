//! Validation modules

pub mod submission;

pub use submission::{
    validate_author_name, validate_comment_body, MAX_AUTHOR_NAME_LENGTH, MAX_COMMENT_LENGTH,
};
