use std::io;

/// Failures that abort an EPUB build.
///
/// Every variant is fatal: the archive being written is incomplete and must be
/// discarded by the caller.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A body or resource could not produce its bytes.
    #[error("read {source_name}")]
    Read {
        source_name: String,
        #[source]
        source: io::Error,
    },

    /// A body rendered as section text is not UTF-8.
    #[error("decode {source_name} as utf-8")]
    Utf8 {
        source_name: String,
        #[source]
        source: std::string::FromUtf8Error,
    },

    #[error("content filename must end with '.xhtml'. Got '{0}'")]
    ContentFilename(String),

    /// The archive writer rejected an entry.
    #[error("write archive entry {path}")]
    Sink {
        path: String,
        #[source]
        source: zip::result::ZipError,
    },

    #[error("write epub output")]
    Output(#[source] io::Error),

    #[error("blocking epub task failed")]
    Task(#[from] tokio::task::JoinError),
}

pub type Result<T = ()> = std::result::Result<T, Error>;
