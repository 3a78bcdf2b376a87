use std::sync::Arc;

use structopt::StructOpt;

pub mod db;
pub mod ids;
pub mod models;
pub mod telemetry;
pub mod web;

#[derive(Clone, Debug)]
pub struct State {
    pub db: Arc<db::Database>,
}

impl State {
    pub fn new(db: db::Database) -> Self {
        State { db: Arc::new(db) }
    }
}

#[derive(Debug)]
pub enum Error {
    TelemetryInitError(anyhow::Error),
    ListenError(std::io::Error),
}

impl From<Error> for u8 {
    fn from(error: Error) -> u8 {
        match error {
            Error::TelemetryInitError(_) => 4,
            Error::ListenError(_) => 5,
        }
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::TelemetryInitError(err) => {
                write!(f, "Failed to init telemetry: {}", err)
            },
            Error::ListenError(err) => {
                write!(f, "Failed to serve HTTP: {}", err)
            },
        }
    }
}

#[derive(Debug, StructOpt)]
pub struct Args {
    /// Host address to bind to.
    #[structopt(long, default_value = "localhost", env = "PHOTOTRACK_BIND_ADDRESS")]
    address: String,
    /// Port to bind to.
    #[structopt(long, default_value = "8000", env = "PHOTOTRACK_BIND_PORT")]
    port: u16,

    /// Only this username may open sessions. Any login is accepted when unset.
    #[structopt(long, env = "PHOTOTRACK_LOGIN_USERNAME")]
    login_username: Option<String>,
    /// Password belonging to --login-username.
    #[structopt(long, env = "PHOTOTRACK_LOGIN_PASSWORD", hide_env_values = true)]
    login_password: Option<String>,
}

impl Args {
    fn authenticator(&self) -> Box<dyn db::Authenticator> {
        match (&self.login_username, &self.login_password) {
            (Some(username), Some(password)) => {
                tracing::info!(%username, "Sessions restricted to a single login");
                Box::new(db::StaticCredentials::new(username, password))
            },
            (None, None) => Box::new(db::AnyCredentials),
            _ => {
                tracing::warn!("Login username and password must be set together, accepting any login");
                Box::new(db::AnyCredentials)
            },
        }
    }
}

/// Builds the HTTP application around `state`.
pub fn server(state: State) -> tide::Server<State> {
    let mut app = tide::with_state(state);
    web::mount(&mut app);
    app
}

pub async fn main() -> Result<(), Error> {
    dotenv::dotenv().ok();
    let args = Args::from_args();

    telemetry::init().map_err(Error::TelemetryInitError)?;

    let state = State::new(db::Database::new(args.authenticator()));
    let app = server(state);

    tracing::info!(address = %args.address, port = args.port, "PhotoTrack is starting");
    let address: &str = args.address.as_ref();
    app.listen((address, args.port))
        .await
        .map_err(Error::ListenError)?;

    tracing::info!("PhotoTrack has stopped");
    Ok(())
}
