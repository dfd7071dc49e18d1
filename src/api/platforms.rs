use axum::response::Json;
use photo_pipeline::Platform;
use serde::Serialize;
use utoipa::ToSchema;

/// A supported marketplace and its output size
#[derive(Debug, Serialize, ToSchema, PartialEq, Eq)]
pub struct PlatformInfo {
    /// Identifier to send in `platforms`
    pub id: &'static str,
    /// Display name
    pub label: &'static str,
    /// Side length of the square output in pixels
    pub size: u32,
}

impl From<Platform> for PlatformInfo {
    fn from(platform: Platform) -> Self {
        Self {
            id: platform.id(),
            label: platform.label(),
            size: platform.target_size(),
        }
    }
}

/// List supported platforms
#[utoipa::path(
    get,
    path = "/api/platforms",
    responses(
        (status = 200, description = "Supported platforms", body = [PlatformInfo]),
    ),
    tag = "Batch"
)]
pub async fn handle_platforms() -> Json<Vec<PlatformInfo>> {
    Json(Platform::ALL.into_iter().map(PlatformInfo::from).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_platform_info() {
        assert_eq!(
            PlatformInfo::from(Platform::Ebay),
            PlatformInfo {
                id: "ebay",
                label: "eBay",
                size: 1600,
            }
        );
    }

    #[tokio::test]
    async fn test_handler_lists_all_platforms() {
        let Json(list) = handle_platforms().await;
        let ids: Vec<&str> = list.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec!["ebay", "poshmark", "mercari"]);
    }
}
