use std::error;
use std::fmt;
use std::result;

/// The ways a request against a tree can be rejected.
///
/// Both kinds describe an invalid request against the current contents of the tree. The tree is
/// left untouched when either is returned.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Error {
    /// The key being inserted is already present.
    DuplicateKey,
    /// The key being deleted or looked up is absent.
    KeyNotFound,
}

impl error::Error for Error {}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::DuplicateKey => write!(f, "key already exists in tree"),
            Error::KeyNotFound => write!(f, "key does not exist in tree"),
        }
    }
}

pub type Result<T> = result::Result<T, Error>;
