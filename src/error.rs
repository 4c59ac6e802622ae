use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, GitstatError>;

#[derive(Error, Debug)]
pub enum GitstatError {
    #[error("Path does not exist: {}", .0.display())]
    PathNotFound(PathBuf),
    #[error("'{}' is not a valid Git repository", .path.display())]
    NotARepository {
        path: PathBuf,
        #[source]
        source: Box<gix::discover::Error>,
    },
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("Template error: {0}")]
    Template(#[from] Box<handlebars::TemplateError>),
    #[error("Render error: {0}")]
    Render(#[from] Box<handlebars::RenderError>),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parse error: {0}")]
    Parse(String),
    #[error("Invalid date: {0}")]
    InvalidDate(String),
    #[error("Object find error: {0}")]
    ObjectFind(#[from] Box<gix::object::find::existing::Error>),
    #[error("Commit error: {0}")]
    Commit(#[from] Box<gix::object::commit::Error>),
    #[error("Reference find error: {0}")]
    RefFind(#[from] Box<gix::reference::find::existing::Error>),
    #[error("Head peel error: {0}")]
    HeadPeel(#[from] Box<gix::head::peel::to_commit::Error>),
    #[error("Object find with conversion error: {0}")]
    ObjectFindConv(#[from] Box<gix::object::find::existing::with_conversion::Error>),
    #[error("Object decode error: {0}")]
    ObjectDecode(#[from] Box<gix::objs::decode::Error>),
    #[error("Diff tree to tree error: {0}")]
    DiffTreeToTree(#[from] Box<gix::repository::diff_tree_to_tree::Error>),
}

// Manual From implementations for unboxed to boxed conversions
impl From<gix::object::find::existing::Error> for GitstatError {
    fn from(err: gix::object::find::existing::Error) -> Self {
        GitstatError::ObjectFind(Box::new(err))
    }
}

impl From<gix::object::commit::Error> for GitstatError {
    fn from(err: gix::object::commit::Error) -> Self {
        GitstatError::Commit(Box::new(err))
    }
}

impl From<gix::reference::find::existing::Error> for GitstatError {
    fn from(err: gix::reference::find::existing::Error) -> Self {
        GitstatError::RefFind(Box::new(err))
    }
}

impl From<gix::head::peel::to_commit::Error> for GitstatError {
    fn from(err: gix::head::peel::to_commit::Error) -> Self {
        GitstatError::HeadPeel(Box::new(err))
    }
}

impl From<gix::object::find::existing::with_conversion::Error> for GitstatError {
    fn from(err: gix::object::find::existing::with_conversion::Error) -> Self {
        GitstatError::ObjectFindConv(Box::new(err))
    }
}

impl From<gix::objs::decode::Error> for GitstatError {
    fn from(err: gix::objs::decode::Error) -> Self {
        GitstatError::ObjectDecode(Box::new(err))
    }
}

impl From<gix::repository::diff_tree_to_tree::Error> for GitstatError {
    fn from(err: gix::repository::diff_tree_to_tree::Error) -> Self {
        GitstatError::DiffTreeToTree(Box::new(err))
    }
}

impl From<handlebars::TemplateError> for GitstatError {
    fn from(err: handlebars::TemplateError) -> Self {
        GitstatError::Template(Box::new(err))
    }
}

impl From<handlebars::RenderError> for GitstatError {
    fn from(err: handlebars::RenderError) -> Self {
        GitstatError::Render(Box::new(err))
    }
}
