use crate::dashboard::{Dashboard, DashboardView};
use crate::error::Result;
use crate::models::{Selection, SelectionQuery};
use crate::processors::StaticAsset;
use crate::server::page::render_page;
use actix_web::{
    http::header::{self, ContentDisposition},
    web, HttpResponse,
};
use tracing::{error, warn};

/// Register the dashboard routes. Expects `web::Data<Dashboard>` in app data.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(index_route))
        .route("/api/view", web::get().to(view_route))
        .route("/download", web::get().to(download_route))
        .route("/health", web::get().to(health_route));
}

async fn render_view(
    dashboard: web::Data<Dashboard>,
    query: SelectionQuery,
) -> Result<DashboardView> {
    Ok(web::block(move || dashboard.render(&query)).await?)
}

/// Download link for the static image of the current selection
pub fn download_href(asset: &StaticAsset) -> String {
    format!(
        "/download?instrument={}&basemap={}",
        asset.instrument.code(),
        asset.basemap.code()
    )
}

/// Serve the dashboard page for the selections in the query string.
async fn index_route(
    dashboard: web::Data<Dashboard>,
    query: web::Query<SelectionQuery>,
) -> HttpResponse {
    match render_view(dashboard, query.into_inner()).await {
        Ok(view) => {
            let href = download_href(&view.asset);
            HttpResponse::Ok()
                .content_type("text/html; charset=utf-8")
                .insert_header((header::CACHE_CONTROL, "no-cache"))
                .body(render_page(&view, &href))
        }
        Err(err) => {
            error!("Dashboard render failed: {err}");
            HttpResponse::InternalServerError().body(format!("Error: {}", err))
        }
    }
}

/// Return the composed view as JSON.
async fn view_route(
    dashboard: web::Data<Dashboard>,
    query: web::Query<SelectionQuery>,
) -> HttpResponse {
    match render_view(dashboard, query.into_inner()).await {
        Ok(view) => HttpResponse::Ok().json(view),
        Err(err) => {
            error!("Dashboard render failed: {err}");
            HttpResponse::InternalServerError().body(format!("Error: {}", err))
        }
    }
}

/// Deliver the pre-rendered PNG for the selected combination.
async fn download_route(
    dashboard: web::Data<Dashboard>,
    query: web::Query<SelectionQuery>,
) -> HttpResponse {
    let selection = Selection::from_query(&query);
    let asset = dashboard.static_asset(selection.basemap, selection.instrument);

    if let Some(notice) = asset.notice() {
        return HttpResponse::NotFound()
            .content_type("text/plain; charset=utf-8")
            .body(notice.message);
    }

    match tokio::fs::read(&asset.path).await {
        Ok(bytes) => HttpResponse::Ok()
            .content_type(asset.mime)
            .insert_header(ContentDisposition::attachment(asset.file_name.clone()))
            .body(bytes),
        Err(err) => {
            warn!(path = %asset.path.display(), error = %err, "Static image unreadable");
            HttpResponse::NotFound()
                .content_type("text/plain; charset=utf-8")
                .body(format!("Peta statis untuk {} belum tersedia.", asset.map_label()))
        }
    }
}

async fn health_route() -> HttpResponse {
    HttpResponse::Ok().content_type("text/plain").body("ok")
}
