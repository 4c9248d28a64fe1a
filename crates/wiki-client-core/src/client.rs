use anyhow::Context as _;
use closure_traits::{ChannelCallBack, ChannelCallBackOutput};
use reqwest::StatusCode;
use std::fmt::Debug;
use tracing::info;
use wiki_shared::{
    const_config::{client::CLIENT_DEFAULT_USER_AGENT, path::PathSpec},
    errors::CurrentUserError,
    site::SiteUrl,
    user::AnonymousPolicy,
};

pub mod current_user;

/// Settings used to build a [`Client`]
#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize)]
pub struct ClientSettings {
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    #[serde(default)]
    pub anonymous_policy: AnonymousPolicy,
}

fn default_user_agent() -> String {
    CLIENT_DEFAULT_USER_AGENT.to_string()
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            user_agent: default_user_agent(),
            anonymous_policy: Default::default(),
        }
    }
}

/// Cheap to clone, clones share the same connection pool and cookie store
#[derive(Debug, Clone)]
pub struct Client {
    api_client: reqwest::Client,
    anonymous_policy: AnonymousPolicy,
}

impl Client {
    #[tracing::instrument(name = "NEW CLIENT-CORE")]
    pub fn new(settings: &ClientSettings) -> anyhow::Result<Self> {
        let builder = reqwest::Client::builder();
        // The browser owns both the cookies and the user agent on the web
        #[cfg(not(target_arch = "wasm32"))]
        let builder = builder
            .cookie_store(true)
            .user_agent(settings.user_agent.as_str());
        let api_client = builder.build().context("unable to create reqwest client")?;
        Ok(Self {
            api_client,
            anonymous_policy: settings.anonymous_policy,
        })
    }

    pub fn anonymous_policy(&self) -> AnonymousPolicy {
        self.anonymous_policy
    }

    #[tracing::instrument(skip(args, on_done))]
    // WARNING: Must skip args as it may contain sensitive info and "safe" versions
    // would usually already be logged by the caller
    fn initiate_request<T, F, O>(&self, site: &SiteUrl, path_spec: PathSpec, args: &T, on_done: F)
    where
        T: serde::Serialize + Debug,
        F: ChannelCallBack<O>,
        O: ChannelCallBackOutput,
    {
        let url = site.api_url(&path_spec);
        // The wiki API only reads form bodies, not json
        let request = self
            .api_client
            .request(path_spec.method, url)
            .form(args);
        reqwest_cross::fetch(request, on_done)
    }
}

#[tracing::instrument(ret)]
async fn handle_error(response: reqwest::Response) -> CurrentUserError {
    let status = response.status();
    match response.text().await {
        Ok(body) => CurrentUserError::UnexpectedStatus {
            status: status.as_u16(),
            body,
        },
        Err(err) => CurrentUserError::Transport(err),
    }
}

/// Provides a way to standardize the error logging
#[tracing::instrument(ret, err(Debug))]
fn extract_response(
    response: reqwest::Result<reqwest::Response>,
) -> Result<(reqwest::Response, StatusCode), CurrentUserError> {
    let response = response.map_err(|err| {
        info!("Response is err: {err:#?}");
        CurrentUserError::Transport(err)
    })?;
    let status = response.status();
    Ok((response, status))
}

pub trait UiCallBack: 'static + Send + FnOnce() {}
impl<T> UiCallBack for T where T: 'static + Send + FnOnce() {}

#[cfg(not(target_arch = "wasm32"))]
pub mod closure_traits {
    pub trait ChannelCallBack<O>:
        'static + Send + FnOnce(reqwest::Result<reqwest::Response>) -> O
    {
    }
    impl<T, O> ChannelCallBack<O> for T where
        T: 'static + Send + FnOnce(reqwest::Result<reqwest::Response>) -> O
    {
    }
    pub trait ChannelCallBackOutput: futures::Future<Output = ()> + Send {}
    impl<T> ChannelCallBackOutput for T where T: futures::Future<Output = ()> + Send {}
}

#[cfg(target_arch = "wasm32")]
pub mod closure_traits {
    pub trait ChannelCallBack<O>:
        'static + FnOnce(reqwest::Result<reqwest::Response>) -> O
    {
    }
    impl<T, O> ChannelCallBack<O> for T where
        T: 'static + FnOnce(reqwest::Result<reqwest::Response>) -> O
    {
    }
    pub trait ChannelCallBackOutput: futures::Future<Output = ()> {}
    impl<T> ChannelCallBackOutput for T where T: futures::Future<Output = ()> {}
}
