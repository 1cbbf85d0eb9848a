use serde::{Deserialize, Serialize};

/// Alt text used when the provider supplies neither alt text nor a description
pub const DEFAULT_ALT_TEXT: &str = "Unsplash image";

/// Normalized image record consumed by the UI
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageRecord {
    pub id: String,
    pub alt_description: String,
    pub urls: ImageUrls,
    pub width: u32,
    pub height: u32,
    pub user: Author,
    /// Provider page for the photo, when the payload carries one
    #[serde(default)]
    pub html_link: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageUrls {
    pub raw: String,
    pub full: String,
    pub regular: String,
    pub small: String,
    pub thumb: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    pub name: String,
    pub username: String,
}

impl ImageRecord {
    /// Width over height; degenerate dimensions count as square.
    pub fn aspect_ratio(&self) -> f64 {
        if self.width == 0 || self.height == 0 {
            1.0
        } else {
            f64::from(self.width) / f64::from(self.height)
        }
    }

    /// Link handed to share targets
    pub fn share_link(&self) -> &str {
        self.html_link.as_deref().unwrap_or(&self.urls.full)
    }
}

/// Photo as the provider serializes it
#[derive(Debug, Deserialize)]
pub(crate) struct WirePhoto {
    id: String,
    #[serde(default)]
    alt_description: Option<String>,
    #[serde(default)]
    description: Option<String>,
    urls: ImageUrls,
    #[serde(default)]
    width: u32,
    #[serde(default)]
    height: u32,
    user: WireUser,
    #[serde(default)]
    links: Option<WireLinks>,
}

#[derive(Debug, Deserialize)]
struct WireUser {
    #[serde(default)]
    name: Option<String>,
    username: String,
}

#[derive(Debug, Deserialize)]
struct WireLinks {
    #[serde(default)]
    html: Option<String>,
}

/// Listing endpoints return a bare array, search wraps it in `results`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum WirePage {
    Listing(Vec<WirePhoto>),
    Search { results: Vec<WirePhoto> },
}

impl WirePage {
    pub(crate) fn into_records(self) -> Vec<ImageRecord> {
        let photos = match self {
            WirePage::Listing(photos) => photos,
            WirePage::Search { results } => results,
        };
        photos.into_iter().map(ImageRecord::from).collect()
    }
}

impl From<WirePhoto> for ImageRecord {
    fn from(photo: WirePhoto) -> Self {
        let alt_description = [photo.alt_description, photo.description]
            .into_iter()
            .flatten()
            .find(|text| !text.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_ALT_TEXT.to_string());

        let name = photo
            .user
            .name
            .filter(|name| !name.trim().is_empty())
            .unwrap_or_else(|| photo.user.username.clone());

        Self {
            id: photo.id,
            alt_description,
            urls: photo.urls,
            width: photo.width,
            height: photo.height,
            user: Author {
                name,
                username: photo.user.username,
            },
            html_link: photo.links.and_then(|links| links.html),
        }
    }
}
