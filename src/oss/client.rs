// Implements the OSS Client on top of the S3-compatible API
#![forbid(unsafe_code)]
#![deny(missing_docs)]
use aws_config::BehaviorVersion;
use aws_sdk_s3::client::Client as S3Client;
use aws_sdk_s3::config::{
    Region as SdkRegion,
    RequestChecksumCalculation,
    ResponseChecksumValidation,
};
use crate::common::{
    ClientConfig,
    Region,
};
use tracing::debug;

/// The OSS `Client`.
pub struct Client {
    /// The AWS SDK `S3Client`, addressing a single regional endpoint.
    pub client: S3Client,

    /// Configuration the client was created with.
    pub config: ClientConfig,
}

impl Client {
    /// Return a new OSS `Client` with the given `ClientConfig`.
    ///
    /// The client addresses the endpoint of the configured region, which is
    /// where buckets are listed and located.
    pub async fn new(config: ClientConfig) -> Self {
        let region   = config.region.clone();
        let endpoint = config.endpoint_for(&region);

        debug!(
            "new: Creating S3Client for key '{}' in region '{}' at '{}'",
            config.credentials.access_key_id(),
            region,
            endpoint,
        );

        let sdk_config = aws_config::defaults(BehaviorVersion::latest())
            .credentials_provider(config.credentials.to_sdk())
            .endpoint_url(endpoint)
            .region(region)
            .load()
            .await;

        // OSS doesn't accept the flexible checksums newer SDKs send by
        // default, only send them where an operation requires one.
        let s3_config = aws_sdk_s3::config::Builder::from(&sdk_config)
            .request_checksum_calculation(RequestChecksumCalculation::WhenRequired)
            .response_checksum_validation(ResponseChecksumValidation::WhenRequired)
            .build();

        Self {
            client: S3Client::from_conf(s3_config),
            config,
        }
    }

    /// Returns a `Client` with the same credentials and settings, addressing
    /// the endpoint for `region`.
    pub fn regional(&self, region: &Region) -> Self {
        let endpoint = self.config.endpoint_for(region);

        debug!("regional: Addressing '{}' at '{}'", region, endpoint);

        let s3_config = self.client.config()
            .to_builder()
            .endpoint_url(endpoint)
            .region(SdkRegion::from(region))
            .build();

        let config = ClientConfig {
            region: region.clone(),
            ..self.config.clone()
        };

        Self {
            client: S3Client::from_conf(s3_config),
            config,
        }
    }
}

#[cfg(test)]
pub mod tests {
    use super::*;
    use aws_credential_types::Credentials as SdkCredentials;
    use aws_sdk_s3::config::Config as S3Config;
    use aws_smithy_http_client::test_util::{
        ReplayEvent,
        StaticReplayClient,
    };
    use aws_smithy_types::body::SdkBody;
    use crate::common::Credentials;
    use pretty_assertions::assert_eq;
    use std::fs;
    use std::path::Path;

    /// What the mock HTTP connection answers with, in order.
    pub enum ResponseType<'a> {
        /// Status 200 with the body read from a file under `test-data`.
        FromFile(&'a str),
        /// The given status with the body read from a file under `test-data`.
        ErrorFromFile(u16, &'a str),
        /// The given status and an empty body.
        WithStatus(u16),
    }

    fn event(status: u16, body: String) -> ReplayEvent {
        ReplayEvent::new(
            http::Request::builder()
                .body(SdkBody::from("request body"))
                .unwrap(),

            http::Response::builder()
                .status(status)
                .body(SdkBody::from(body))
                .unwrap(),
        )
    }

    fn read_test_data(file: &str) -> String {
        let path = Path::new("test-data").join(file);

        fs::read_to_string(path).unwrap()
    }

    // Create a mock OSS client, answering each request with the next of the
    // given responses.
    pub fn mock_client(responses: Vec<ResponseType<'_>>) -> Client {
        let events = responses
            .iter()
            .map(|r| {
                match r {
                    ResponseType::FromFile(file) => {
                        event(200, read_test_data(file))
                    },
                    ResponseType::ErrorFromFile(status, file) => {
                        event(*status, read_test_data(file))
                    },
                    ResponseType::WithStatus(status) => {
                        event(*status, String::new())
                    },
                }
            })
            .collect();

        let http_client = StaticReplayClient::new(events);

        let creds = SdkCredentials::for_tests_with_session_token();

        let conf = S3Config::builder()
            .behavior_version_latest()
            .credentials_provider(creds)
            .http_client(http_client)
            .endpoint_url("https://oss-cn-hangzhou.aliyuncs.com")
            .region(SdkRegion::new("cn-hangzhou"))
            .request_checksum_calculation(RequestChecksumCalculation::WhenRequired)
            .response_checksum_validation(ResponseChecksumValidation::WhenRequired)
            .build();

        let credentials = Credentials::new(
            Some("ATESTCLIENT".into()),
            Some("atestsecretkey".into()),
        ).unwrap();

        Client {
            client: S3Client::from_conf(conf),
            config: ClientConfig::new(credentials),
        }
    }

    #[tokio::test]
    async fn test_new() {
        let credentials = Credentials::new(
            Some("ATESTCLIENT".into()),
            Some("atestsecretkey".into()),
        ).unwrap();

        let mut config = ClientConfig::new(credentials);
        config.region  = Region::new("oss-cn-beijing");

        let client = Client::new(config).await;

        assert_eq!(client.config.region.id(), "cn-beijing");
        assert_eq!(
            client.client.config().region().map(|r| r.as_ref()),
            Some("cn-beijing"),
        );
    }

    #[test]
    fn test_regional() {
        let client   = mock_client(Vec::new());
        let region   = Region::new("oss-cn-shanghai");
        let regional = client.regional(&region);

        assert_eq!(regional.config.region, region);
        assert_eq!(
            regional.client.config().region().map(|r| r.as_ref()),
            Some("cn-shanghai"),
        );
        assert_eq!(regional.config.endpoint_url, None);
    }

    #[test]
    fn test_regional_keeps_endpoint_override() {
        let mut client = mock_client(Vec::new());
        client.config.endpoint_url = Some("http://localhost:9000".into());

        let regional = client.regional(&Region::new("cn-shenzhen"));

        assert_eq!(
            regional.config.endpoint_url.as_deref(),
            Some("http://localhost:9000"),
        );
        assert_eq!(
            regional.config.endpoint_for(&regional.config.region),
            "http://localhost:9000",
        );
    }
}
