use axum::Json;
use axum::extract::{Query, State};

use crate::dto::{PageViewRequest, PageViewResponse, TopPagesQuery};
use crate::error::ApiResult;
use crate::state::AppState;

const DEFAULT_TOP_PAGES: usize = 20;

/// POST /api/analytics/page-views - Count one visit of a page.
pub async fn record_page_view_handler(
    State(state): State<AppState>,
    Json(payload): Json<PageViewRequest>,
) -> ApiResult<Json<PageViewResponse>> {
    let count = state.page_view_service.record_view(&payload.path).await?;
    Ok(Json(count.into()))
}

/// GET /api/analytics/page-views - Most viewed pages, admin only.
pub async fn top_pages_handler(
    State(state): State<AppState>,
    Query(query): Query<TopPagesQuery>,
) -> ApiResult<Json<Vec<PageViewResponse>>> {
    let pages = state
        .page_view_service
        .top_pages(query.limit.unwrap_or(DEFAULT_TOP_PAGES))
        .await?;

    Ok(Json(pages.into_iter().map(Into::into).collect()))
}
