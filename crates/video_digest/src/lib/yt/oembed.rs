use std::ops::Deref;

use crate::{
    types::OEmbedResponse,
    yt::{watch_url, TitleFetcher},
};

const OEMBED_URL: &str = "https://www.youtube.com/oembed";

/// Title lookup through the public oEmbed endpoint (no API key required)
#[derive(Default)]
pub struct OEmbedClient(pub reqwest::Client);

impl Deref for OEmbedClient {
    type Target = reqwest::Client;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl TitleFetcher for OEmbedClient {
    type Error = reqwest::Error;

    #[tracing::instrument(skip(self))]
    async fn fetch_title(&self, video_id: &str) -> Result<String, Self::Error> {
        let resp = self
            .get(OEMBED_URL)
            .query(&[("url", watch_url(video_id).as_str()), ("format", "json")])
            .send()
            .await?
            .error_for_status()?
            .json::<OEmbedResponse>()
            .await?;

        Ok(resp.title)
    }
}
