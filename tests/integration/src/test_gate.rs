//! End-to-end tests of the signature gate over real HTTP connections.

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use beamgate_auth::DeviceIdentity;

    use crate::{
        RotatingSecretProvider, TEST_TIMESTAMP, signed_request, spawn_gated_server,
        spawn_with_secret,
    };

    fn cellular() -> DeviceIdentity {
        DeviceIdentity::Cellular {
            imsi: "295100000000001".to_owned(),
            imei: None,
        }
    }

    #[tokio::test]
    async fn test_should_forward_relay_signed_requests_for_every_device_type() {
        let url = spawn_with_secret("secret").await;
        let client = reqwest::Client::new();

        let identities = [
            (cellular(), "295100000000001"),
            (
                DeviceIdentity::Cellular {
                    imsi: "295100000000001".to_owned(),
                    imei: Some("012345678901234".to_owned()),
                },
                "295100000000001",
            ),
            (
                DeviceIdentity::Sigfox {
                    device_id: "FFFFFF".to_owned(),
                },
                "FFFFFF",
            ),
            (
                DeviceIdentity::LoRaWan {
                    device_id: "0123456789abcdef".to_owned(),
                },
                "0123456789abcdef",
            ),
            (
                DeviceIdentity::InventoryNotify {
                    device_id: "d-0123456789acbdefghij".to_owned(),
                },
                "d-0123456789acbdefghij",
            ),
        ];

        for (identity, expected_id) in &identities {
            let resp = signed_request(&client, &url, "secret", identity)
                .send()
                .await
                .unwrap();
            assert_eq!(resp.status(), reqwest::StatusCode::OK, "{identity:?}");
            assert_eq!(resp.text().await.unwrap(), *expected_id);
        }
    }

    #[tokio::test]
    async fn test_should_accept_reference_signature_vector() {
        let url = spawn_with_secret("secret").await;

        let resp = reqwest::Client::new()
            .post(&url)
            .header("X-SORACOM-IMSI", "295100000000001")
            .header("X-SORACOM-TIMESTAMP", TEST_TIMESTAMP)
            .header("X-SORACOM-SIGNATURE-VERSION", "20151001")
            .header(
                "X-SORACOM-SIGNATURE",
                "a15174afa6e4a4ffa0f9c44e6085e9b6f2b5f0cf2c3437bf46bdd9bf8514f51b",
            )
            .send()
            .await
            .unwrap();

        assert_eq!(resp.status(), reqwest::StatusCode::OK);
    }

    #[tokio::test]
    async fn test_should_reject_request_signed_with_other_secret() {
        let url = spawn_with_secret("secret").await;

        let resp = signed_request(&reqwest::Client::new(), &url, "not-the-secret", &cellular())
            .send()
            .await
            .unwrap();

        assert_eq!(resp.status(), reqwest::StatusCode::BAD_REQUEST);
        assert_eq!(resp.text().await.unwrap(), "invalid\n");
    }

    #[tokio::test]
    async fn test_should_reject_unsigned_request_with_generic_body() {
        let url = spawn_with_secret("secret").await;

        let resp = reqwest::Client::new()
            .post(&url)
            .header("X-Soracom-Imsi", "295100000000001")
            .send()
            .await
            .unwrap();

        assert_eq!(resp.status(), reqwest::StatusCode::BAD_REQUEST);
        assert_eq!(
            resp.headers()
                .get("x-content-type-options")
                .and_then(|v| v.to_str().ok()),
            Some("nosniff")
        );
        assert_eq!(resp.text().await.unwrap(), "invalid\n");
    }

    #[tokio::test]
    async fn test_should_answer_500_without_shared_secret() {
        let url = spawn_with_secret("").await;

        let resp = signed_request(&reqwest::Client::new(), &url, "secret", &cellular())
            .send()
            .await
            .unwrap();

        assert_eq!(resp.status(), reqwest::StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(resp.text().await.unwrap(), "Something went wrong\n");
    }

    #[tokio::test]
    async fn test_should_pick_up_rotated_secret_without_restart() {
        let provider = Arc::new(RotatingSecretProvider::new("old-secret"));
        let addr = spawn_gated_server(Arc::clone(&provider) as _).await;
        let url = format!("http://{addr}");
        let client = reqwest::Client::new();

        let resp = signed_request(&client, &url, "old-secret", &cellular())
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), reqwest::StatusCode::OK);

        provider.rotate("new-secret");

        let resp = signed_request(&client, &url, "old-secret", &cellular())
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), reqwest::StatusCode::BAD_REQUEST);

        let resp = signed_request(&client, &url, "new-secret", &cellular())
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), reqwest::StatusCode::OK);
    }
}
