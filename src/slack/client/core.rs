use std::fmt::{Debug, Display};

use serde::{de::DeserializeOwned, Deserialize, Serialize};

#[derive(Clone)]
pub struct Client {
    http: reqwest::Client,
    access_token: Option<String>,
}

impl Client {
    pub fn new() -> Self {
        Self {
            http: reqwest::Client::new(),
            access_token: None,
        }
    }

    pub fn with_access_token(&self, access_token: &str) -> Self {
        Self {
            http: self.http.clone(),
            access_token: Some(access_token.to_string()),
        }
    }

    pub async fn post_json(
        &self,
        url: &str,
        body: &(impl Serialize + Debug + Sync),
    ) -> Result<Response, Error> {
        log::trace!("sending json post request to {}: {:?}", url, body);

        let mut req = self.http.post(url).json(body);
        if let Some(access_token) = &self.access_token {
            req = req.bearer_auth(access_token);
        }
        let res: Response = req.send().await?.into();

        log::trace!("received response from post request to {}: {:?}", url, res);

        Ok(res)
    }

    pub async fn post_form(
        &self,
        url: &str,
        body: &(impl Serialize + Debug + Sync),
    ) -> Result<Response, Error> {
        log::trace!("sending form post request to {}", url);

        let res: Response = self.http.post(url).form(body).send().await?.into();

        log::trace!("received response from post request to {}: {:?}", url, res);

        Ok(res)
    }

    pub async fn get(
        &self,
        url: &str,
        query: Option<&(impl Serialize + Debug + Sync)>,
    ) -> Result<Response, Error> {
        log::trace!("sending get request to {}: {:?}", url, query);

        let mut req = self.http.get(url);

        if let Some(query) = query {
            req = req.query(query);
        }

        if let Some(access_token) = &self.access_token {
            req = req.bearer_auth(access_token);
        }

        let res: Response = req.send().await?.into();

        log::trace!("received response from get request to {}: {:?}", url, res);

        Ok(res)
    }
}

impl Default for Client {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug)]
pub struct Response {
    response: reqwest::Response,
}

impl Response {
    pub async fn text(self) -> Result<String, Error> {
        Ok(self.response.text().await?)
    }

    /// Parses a Slack Web API reply, turning `ok: false` into an error.
    pub async fn api<T: DeserializeOwned>(self) -> Result<T, Error> {
        let body = self.text().await?;
        let reply: ApiReply = serde_json::from_str(&body)?;
        if !reply.ok {
            return Err(Error {
                message: reply.error.unwrap_or_else(|| String::from("unknown_error")),
            });
        }
        Ok(serde_json::from_str(&body)?)
    }
}

impl From<reqwest::Response> for Response {
    fn from(response: reqwest::Response) -> Self {
        Self { response }
    }
}

#[derive(Deserialize)]
struct ApiReply {
    ok: bool,
    error: Option<String>,
}

/// Replies that carry nothing but the `ok` flag.
#[derive(Deserialize, Debug)]
pub struct Empty {}

#[derive(Debug, PartialEq)]
pub struct Error {
    pub message: String,
}

impl<T: Display> From<T> for Error {
    fn from(err: T) -> Self {
        Self {
            message: err.to_string(),
        }
    }
}
