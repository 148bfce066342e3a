//! Tests against a running `beamgate-server` configured with the secret `secret`.

#[cfg(test)]
mod tests {
    use beamgate_auth::DeviceIdentity;

    use crate::{endpoint_url, signed_request};

    #[tokio::test]
    #[ignore = "requires running server"]
    async fn test_should_report_healthy() {
        let resp = reqwest::get(format!("{}/health", endpoint_url()))
            .await
            .unwrap();

        assert_eq!(resp.status(), reqwest::StatusCode::OK);
        assert_eq!(resp.text().await.unwrap(), r#"{"status":"running"}"#);
    }

    #[tokio::test]
    #[ignore = "requires running server"]
    async fn test_should_answer_valid_for_signed_request() {
        let identity = DeviceIdentity::Sigfox {
            device_id: "FFFFFF".to_owned(),
        };

        let resp = signed_request(&reqwest::Client::new(), &endpoint_url(), "secret", &identity)
            .send()
            .await
            .unwrap();

        assert_eq!(resp.status(), reqwest::StatusCode::OK);
        assert_eq!(resp.text().await.unwrap(), "valid");
    }

    #[tokio::test]
    #[ignore = "requires running server"]
    async fn test_should_reject_request_without_device_headers() {
        let resp = reqwest::Client::new()
            .post(endpoint_url())
            .header("X-Soracom-Timestamp", "1443571200000")
            .header("X-Soracom-Signature-Version", "20151001")
            .header("X-Soracom-Signature", "01234")
            .send()
            .await
            .unwrap();

        assert_eq!(resp.status(), reqwest::StatusCode::BAD_REQUEST);
        assert_eq!(resp.text().await.unwrap(), "invalid\n");
    }
}
