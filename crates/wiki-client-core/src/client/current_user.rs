use futures::channel::oneshot;
use reqwest::StatusCode;
use wiki_shared::{
    const_config::path::PATH_API,
    errors::CurrentUserError,
    log_err_as_warn,
    req_args::UserInfoQueryArgs,
    site::SiteUrl,
    user::{decode_current_user, AnonymousPolicy, CurrentUser},
};

use crate::{
    client::{extract_response, handle_error, UiCallBack},
    Client,
};

impl Client {
    /// Asks `site` who the current session belongs to.
    ///
    /// The result is sent exactly once on the returned receiver and
    /// `ui_notify` is called after it has been sent. Nothing is cached, every
    /// call is a new request.
    #[tracing::instrument(skip(ui_notify))]
    pub fn fetch_current_user<F: UiCallBack>(
        &self,
        site: &SiteUrl,
        ui_notify: F,
    ) -> oneshot::Receiver<Result<CurrentUser, CurrentUserError>> {
        let (tx, rx) = oneshot::channel();
        let policy = self.anonymous_policy;
        let on_done = move |resp: reqwest::Result<reqwest::Response>| async move {
            let msg = process_current_user(resp, policy).await;
            log_err_as_warn!(tx.send(msg));
            ui_notify();
        };
        self.initiate_request(site, PATH_API, &UserInfoQueryArgs::default(), on_done);
        rx
    }
}

#[tracing::instrument(ret, err(Debug))]
async fn process_current_user(
    response: reqwest::Result<reqwest::Response>,
    policy: AnonymousPolicy,
) -> Result<CurrentUser, CurrentUserError> {
    let (response, status) = extract_response(response)?;
    if status != StatusCode::OK {
        return Err(handle_error(response).await);
    }
    let body = response.bytes().await?;
    decode_current_user(&body, policy)
}
