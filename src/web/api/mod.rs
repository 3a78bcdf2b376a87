pub mod error;
pub mod photos;
pub mod routes;
pub mod sessions;
pub mod sites;
pub mod users;
pub mod utils;

pub use error::ApiError;

pub(super) fn mount(app: &mut tide::Server<crate::State>) {
    sites::mount(app);
    photos::mount(app);
    users::mount(app);
    sessions::mount(app);
}
