use server_api::ContactContext;

#[derive(Clone)]
pub struct AppState {
    pub contact: ContactContext,
}
