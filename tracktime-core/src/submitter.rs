use once_cell::sync::Lazy;
use regex::Regex;
use reqwest::{
    StatusCode,
    blocking::Client,
    header::{COOKIE, SET_COOKIE},
};
use serde::Serialize;
use tracing::{debug, info};

use crate::config::Config;
use crate::error::{TrackError, TrackResult};
use crate::interval::TrackInterval;

const JSESSION_ID_KEY: &str = "JSESSIONID=";
const ATLASSIAN_KEY: &str = "atlassian.xsrf.token=";

static COOKIE_SEPARATOR: Lazy<Regex> = Lazy::new(|| Regex::new(r"[;,]").unwrap());

/// The tracker server, seen from the core.
///
/// `authenticate` is called once per run and yields the session credential handed to
/// every `submit` call.
pub trait Submitter {
    fn authenticate(&self) -> TrackResult<String>;
    fn submit(&self, session: &str, interval: &TrackInterval, issue_id: &str) -> TrackResult<()>;
}

#[derive(Serialize)]
struct AuthBody<'a> {
    password: &'a str,
    user: &'a str,
}

/// One worklog, as the tracking endpoint expects it.
#[derive(Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WorklogBody<'a> {
    pub comment: &'a str,
    pub end_time: &'a str,
    pub issue_key: &'a str,
    pub start_time: &'a str,
}

impl<'a> WorklogBody<'a> {
    pub fn new(interval: &'a TrackInterval, issue_id: &'a str) -> Self {
        Self {
            comment: "",
            end_time: &interval.end,
            issue_key: issue_id,
            start_time: &interval.start,
        }
    }
}

/// Blocking HTTP client talking to the auth and tracking endpoints.
pub struct HttpSubmitter {
    client: Client,
    user: String,
    password: String,
    auth_url: String,
    tracking_url: String,
}

impl HttpSubmitter {
    pub fn new(config: &Config) -> TrackResult<Self> {
        Ok(Self {
            client: Client::builder().build()?,
            user: config.user.clone(),
            password: config.password.clone(),
            auth_url: config.auth_url.clone(),
            tracking_url: config.tracking_url.clone(),
        })
    }
}

impl Submitter for HttpSubmitter {
    fn authenticate(&self) -> TrackResult<String> {
        debug!(
            "Authenticating to Tracker server. URL [{}] user [{}]",
            self.auth_url, self.user
        );

        let body = AuthBody {
            password: &self.password,
            user: &self.user,
        };
        let response = self.client.post(&self.auth_url).json(&body).send()?;
        let status = response.status();

        info!("Got response from auth with status code [{}]", status.as_u16());

        if is_failure(status) {
            return Err(TrackError::AuthenticationFailed {
                status: status.as_u16(),
            });
        }

        let set_cookie = response
            .headers()
            .get_all(SET_COOKIE)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .collect::<Vec<_>>()
            .join(", ");

        Ok(filter_cookies(Some(&set_cookie)))
    }

    fn submit(&self, session: &str, interval: &TrackInterval, issue_id: &str) -> TrackResult<()> {
        let body = WorklogBody::new(interval, issue_id);

        debug!("URL: [{}] body [{:?}]", self.tracking_url, body);
        info!("Sending request with body [{:?}]", body);

        let response = self
            .client
            .post(&self.tracking_url)
            .header(COOKIE, session)
            .json(&body)
            .send()?;
        let status = response.status();
        let text = response.text()?;

        info!(
            "Got response with status code [{}] and body [{}]",
            status.as_u16(),
            text
        );

        if is_failure(status) {
            return Err(TrackError::SubmissionFailed {
                status: status.as_u16(),
                body: text,
            });
        }
        Ok(())
    }
}

/// Anything above 300 counts as a failed call.
fn is_failure(status: StatusCode) -> bool {
    status.as_u16() > 300
}

/// Keeps only the session and xsrf cookies out of a raw `Set-Cookie` header, joined by
/// `"; "` and ready to be sent back as a `Cookie` header.
pub fn filter_cookies(cookie_string: Option<&str>) -> String {
    match cookie_string {
        None | Some("") => String::new(),
        Some(cookies) => COOKIE_SEPARATOR
            .split(cookies)
            .filter(|cookie| cookie.contains(JSESSION_ID_KEY) || cookie.contains(ATLASSIAN_KEY))
            .map(str::trim)
            .collect::<Vec<_>>()
            .join("; "),
    }
}
