pub type RadarResult<T> = Result<T, RadarError>;

#[derive(thiserror::Error, Debug)]
pub enum RadarError {
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("listing error for '{url}': {source}")]
    Listing {
        url: String,
        #[source]
        source: anyhow::Error,
    },

    #[error("fetch error for '{url}': {source}")]
    Fetch {
        url: String,
        #[source]
        source: anyhow::Error,
    },

    #[error("malformed filename: '{0}'")]
    MalformedFilename(String),

    #[error("alignment error: {0}")]
    Alignment(String),

    #[error("session not ready: image() requires a successful update() first")]
    NotReady,

    #[error("validation error: {0}")]
    Validation(String),

    #[error("encode error: {0}")]
    Encode(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl RadarError {
    pub fn invalid_parameter(msg: impl Into<String>) -> Self {
        Self::InvalidParameter(msg.into())
    }

    pub fn listing(url: impl Into<String>, source: impl Into<anyhow::Error>) -> Self {
        Self::Listing {
            url: url.into(),
            source: source.into(),
        }
    }

    pub fn fetch(url: impl Into<String>, source: impl Into<anyhow::Error>) -> Self {
        Self::Fetch {
            url: url.into(),
            source: source.into(),
        }
    }

    pub fn malformed_filename(name: impl Into<String>) -> Self {
        Self::MalformedFilename(name.into())
    }

    pub fn alignment(msg: impl Into<String>) -> Self {
        Self::Alignment(msg.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn encode(msg: impl Into<String>) -> Self {
        Self::Encode(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
