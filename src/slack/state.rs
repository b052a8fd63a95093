use super::service::Service;

pub struct AppState {
    pub service: Service,
    pub signing_secret: Option<String>,
}
