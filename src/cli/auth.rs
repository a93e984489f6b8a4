use std::sync::Arc;

use tokio::sync::Mutex;

use crate::{
    tidal,
    types::{AccountRole, PkceToken},
};

pub async fn auth(role: AccountRole, shared_state: Arc<Mutex<Option<PkceToken>>>) {
    tidal::auth::auth(role, shared_state).await;
}
