use std::{net::SocketAddr, sync::Arc};

use axum::{middleware, routing, Router, Server};
use tower_http::trace::TraceLayer;

use crate::{config::Config, repository, views::Locale};

use super::{
    action_point, client::WebClient, commands, events, guard, oauth, service::Service,
    state::AppState,
};

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/slack/events", routing::post(events::execute))
        .route("/slack/commands", routing::post(commands::execute))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            guard::validate,
        ))
        .route("/slack/action-point", routing::post(action_point::execute))
        .route("/slack/auth", routing::get(oauth::execute))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn serve(config: Config) -> anyhow::Result<()> {
    log::info!(
        "Connecting to database {}/{}",
        config.database_url,
        config.database_name
    );

    let link_repo = Arc::new(
        repository::link::MongoDbRepository::new(&config.database_url, &config.database_name, 50)
            .await?,
    );
    let workspace_repo = Arc::new(
        repository::workspace::MongoDbRepository::new(
            &config.database_url,
            &config.database_name,
            50,
        )
        .await?,
    );

    if config.signing_secret.is_none() {
        log::warn!("no signing secret configured, slack requests are not verified");
    }

    let state = Arc::new(AppState {
        service: Service {
            link_repo,
            workspace_repo,
            api: Arc::new(WebClient::new(&config.client_id, &config.client_secret)),
            bot_token: config.bot_token,
            locale: Locale::default(),
        },
        signing_secret: config.signing_secret,
    });

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    log::info!("Listening on {}", addr);

    Server::bind(&addr)
        .serve(router(state).into_make_service())
        .await?;

    Ok(())
}
