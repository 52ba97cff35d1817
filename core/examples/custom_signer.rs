use apidecl_core::{
    hash, Client, Context, Endpoint, HttpOpen, Params, Payload, PreparedRequest, RawResponse,
    Result, SignPayload, Signer, SigningKey, StaticBody, StatusCode, WrapJson,
};
use async_trait::async_trait;
use std::time::Duration;

// A custom signing primitive: hex-encoded HMAC instead of base64url.
#[derive(Debug)]
struct HexHmac;

impl SignPayload for HexHmac {
    fn sign_payload(
        &self,
        key: &[u8],
        canonical_url: &str,
        payload: Option<&Payload>,
    ) -> Result<String> {
        let mut content = canonical_url.to_string();
        if let Some(payload) = payload {
            for (k, values) in payload {
                for v in values {
                    content.push_str(k);
                    content.push_str(v);
                }
            }
        }
        Ok(hex::encode(hash::hmac_sha256(key, content.as_bytes())))
    }
}

// A transport double so the example runs without a network.
#[derive(Debug)]
struct EchoTransport;

#[async_trait]
impl HttpOpen for EchoTransport {
    async fn open(&self, req: PreparedRequest, _timeout: Option<Duration>) -> Result<RawResponse> {
        let body = format!("{{\"url\": \"{}\"}}", req.url);
        Ok(RawResponse::new(StatusCode::OK, StaticBody::new(body)))
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let ctx = Context::new().with_http_open(EchoTransport);

    let client = Client::new(ctx, "http://www.example.com")
        .with_default_wrapper(WrapJson)
        .with_signer(Signer::new(
            "example-client",
            SigningKey::from("example-key"),
            HexHmac,
        ));

    let endpoint = Endpoint::get("/do-something/");
    let mut response = client
        .invoke(&endpoint, || Params::new().with("times", 5))
        .await?;

    println!("dispatched: {}", response.decoded().await?["url"]);
    Ok(())
}
