//! Stores settings that are not expected to need to change but grouped together
//! for discoverability and reuse. Each constant should be prefixed by the module
//! name to allow importing the constant only and still be readable

pub mod client {
    /// Sent when no user agent is configured. Wikimedia sites reject requests
    /// without a descriptive user agent
    pub const CLIENT_DEFAULT_USER_AGENT: &str = concat!(
        "wiki-current-user/",
        env!("CARGO_PKG_VERSION"),
        " (https://www.mediawiki.org/wiki/API:Etiquette)"
    );
}

pub mod path {
    mod path_spec;
    pub use path_spec::PathSpec;
    pub const PATH_API: PathSpec = PathSpec::post("/w/api.php");
}

pub mod userinfo {
    pub const USERINFO_ACTION: &str = "query";
    pub const USERINFO_META: &str = "userinfo";
    pub const USERINFO_PROPS: &str = "groups|blockinfo|editcount|registrationdate";
    pub const USERINFO_FORMAT: &str = "json";
}
