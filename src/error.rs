use thiserror::Error;

pub type Result<T> = std::result::Result<T, RepoScopeError>;

#[derive(Error, Debug)]
pub enum RepoScopeError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Git repository error: {0}")]
    GitRepo(String),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
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

impl RepoScopeError {
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, RepoScopeError::InvalidInput(_))
    }
}

// gix errors are large; box them on the way in
impl From<gix::object::find::existing::Error> for RepoScopeError {
    fn from(err: gix::object::find::existing::Error) -> Self {
        RepoScopeError::ObjectFind(Box::new(err))
    }
}

impl From<gix::object::commit::Error> for RepoScopeError {
    fn from(err: gix::object::commit::Error) -> Self {
        RepoScopeError::Commit(Box::new(err))
    }
}

impl From<gix::reference::find::existing::Error> for RepoScopeError {
    fn from(err: gix::reference::find::existing::Error) -> Self {
        RepoScopeError::RefFind(Box::new(err))
    }
}

impl From<gix::head::peel::to_commit::Error> for RepoScopeError {
    fn from(err: gix::head::peel::to_commit::Error) -> Self {
        RepoScopeError::HeadPeel(Box::new(err))
    }
}

impl From<gix::object::find::existing::with_conversion::Error> for RepoScopeError {
    fn from(err: gix::object::find::existing::with_conversion::Error) -> Self {
        RepoScopeError::ObjectFindConv(Box::new(err))
    }
}

impl From<gix::objs::decode::Error> for RepoScopeError {
    fn from(err: gix::objs::decode::Error) -> Self {
        RepoScopeError::ObjectDecode(Box::new(err))
    }
}

impl From<gix::repository::diff_tree_to_tree::Error> for RepoScopeError {
    fn from(err: gix::repository::diff_tree_to_tree::Error) -> Self {
        RepoScopeError::DiffTreeToTree(Box::new(err))
    }
}
