use tide::Request;
use tide::Response;
use tracing::{debug, info};

use super::error::ApiError;
use super::routes::{reject_other_methods, Resource, Shape};
use super::utils::{empty_object, item_id, json_response, read_json};
use crate::db::sites::SiteProvider;
use phototrack_api_structs::{SiteCreated, SitePayload};

const RESOURCE: Resource = Resource::Sites;

pub(super) fn mount(app: &mut tide::Server<crate::State>) {
    if let Some(path) = RESOURCE.path(Shape::Collection) {
        let mut route = app.at(&path);
        route.get(list_sites).head(list_sites).post(create_site);
        reject_other_methods(&mut route, RESOURCE, Shape::Collection);
    }

    if let Some(path) = RESOURCE.path(Shape::Item) {
        let mut route = app.at(&path);
        route
            .get(get_site)
            .head(get_site)
            .put(replace_site)
            .delete(delete_site);
        reject_other_methods(&mut route, RESOURCE, Shape::Item);
    }

    if let Some(path) = RESOURCE.path(Shape::Photos) {
        let mut route = app.at(&path);
        route.get(list_site_photos).head(list_site_photos);
        reject_other_methods(&mut route, RESOURCE, Shape::Photos);
    }
}

async fn list_sites(req: Request<crate::State>) -> tide::Result<Response> {
    let sites = req.state().db.list_sites().await;
    json_response(&sites)
}

async fn create_site(mut req: Request<crate::State>) -> tide::Result<Response> {
    let payload: SitePayload = read_json(&mut req).await?;
    debug!("Received site payload: {:#?}", payload);

    let site_id = req.state().db.insert_site(payload).await.map_err(ApiError::from)?;
    info!(%site_id, "Created site");

    json_response(&SiteCreated { site_id })
}

async fn get_site(req: Request<crate::State>) -> tide::Result<Response> {
    let site_id = item_id(&req, RESOURCE)?;

    match req.state().db.get_site(site_id).await {
        Some(site) => json_response(&site),
        None => Err(ApiError::invalid_identifier(RESOURCE, site_id).into()),
    }
}

async fn replace_site(mut req: Request<crate::State>) -> tide::Result<Response> {
    let site_id = item_id(&req, RESOURCE)?.to_string();
    let payload: SitePayload = read_json(&mut req).await?;
    debug!("Received site payload: {:#?}", payload);

    if !req.state().db.replace_site(&site_id, payload).await {
        return Err(ApiError::invalid_identifier(RESOURCE, &site_id).into());
    }
    info!(%site_id, "Replaced site");

    empty_object()
}

async fn list_site_photos(req: Request<crate::State>) -> tide::Result<Response> {
    let site_id = item_id(&req, RESOURCE)?;

    match req.state().db.list_site_photos(site_id).await {
        Some(photos) => json_response(&photos),
        None => Err(ApiError::invalid_identifier(RESOURCE, site_id).into()),
    }
}

async fn delete_site(req: Request<crate::State>) -> tide::Result<Response> {
    let site_id = item_id(&req, RESOURCE)?;

    if req.state().db.delete_site(site_id).await.is_none() {
        return Err(ApiError::invalid_identifier(RESOURCE, site_id).into());
    }
    info!(%site_id, "Deleted site");

    empty_object()
}
