/// The configuration parameters for the application.
#[derive(clap::Parser, Clone)]
pub struct Config {
    /// The connection URL for the database this application should use.
    #[clap(long, env)]
    pub database_url: String,

    /// The name for the database this application should use.
    #[clap(long, env)]
    pub database_name: String,

    /// Bot token used for workspaces that have no stored installation.
    #[clap(long, env)]
    pub bot_token: String,

    /// The client id registered for the slack app.
    #[clap(long, env)]
    pub client_id: String,

    /// The client secret registered for the slack app.
    #[clap(long, env)]
    pub client_secret: String,

    /// Signing secret of the slack app. Requests are not verified without it.
    #[clap(long, env)]
    pub signing_secret: Option<String>,

    /// The PORT number for the server address.
    #[clap(long, env)]
    pub port: u16,
}
