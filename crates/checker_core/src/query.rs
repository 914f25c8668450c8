use std::fmt;

use url::Url;

/// Rejection of user input before any request is made.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("nothing to check: enter a URL or some text")]
    Empty,
}

/// Sites the backend knows how to scrape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Site {
    Reddit,
    X,
}

impl fmt::Display for Site {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Site::Reddit => write!(f, "Reddit"),
            Site::X => write!(f, "X"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryKind {
    /// An absolute http(s) URL; `site` is set when the host is a known site.
    Link { site: Option<Site> },
    Text,
}

/// Text submitted by the user, kept exactly as entered. Only non-blank text is accepted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    text: String,
    kind: QueryKind,
}

impl Query {
    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty);
        }
        Ok(Self {
            text: raw.to_owned(),
            kind: classify(trimmed),
        })
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn kind(&self) -> QueryKind {
        self.kind
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

fn classify(text: &str) -> QueryKind {
    let Ok(url) = Url::parse(text) else {
        return QueryKind::Text;
    };
    if !matches!(url.scheme(), "http" | "https") {
        return QueryKind::Text;
    }
    let Some(host) = url.host_str() else {
        return QueryKind::Text;
    };
    let host = host.strip_prefix("www.").unwrap_or(host);
    let site = match host {
        "reddit.com" | "redd.it" | "old.reddit.com" => Some(Site::Reddit),
        "x.com" | "twitter.com" => Some(Site::X),
        _ => None,
    };
    QueryKind::Link { site }
}
