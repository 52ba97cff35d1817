//! End-to-end pipeline tests over a recording transport.

use apidecl::{
    BaseResponse, Client, Context, Endpoint, ErrorKind, HmacSha256, HttpOpen, Method, Params,
    PreparedRequest, RawResponse, ResponseView, Result, Signer, SigningKey, StaticBody,
    StatusCode, WrapJson, WrapResponse,
};
use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Transport double: records every dispatched request and replies with a
/// canned status and body.
#[derive(Debug)]
struct FakeTransport {
    status: u16,
    body: &'static str,
    requests: Mutex<Vec<(PreparedRequest, Option<Duration>)>>,
}

impl FakeTransport {
    fn replying(status: u16, body: &'static str) -> Arc<Self> {
        Arc::new(Self {
            status,
            body,
            requests: Mutex::new(Vec::new()),
        })
    }

    fn last_request(&self) -> (PreparedRequest, Option<Duration>) {
        self.requests
            .lock()
            .unwrap()
            .last()
            .cloned()
            .expect("no request dispatched")
    }
}

#[derive(Debug)]
struct SharedTransport(Arc<FakeTransport>);

#[async_trait]
impl HttpOpen for SharedTransport {
    async fn open(&self, req: PreparedRequest, timeout: Option<Duration>) -> Result<RawResponse> {
        self.0.requests.lock().unwrap().push((req, timeout));
        Ok(RawResponse::new(
            StatusCode::from_u16(self.0.status).expect("valid status"),
            StaticBody::new(self.0.body),
        ))
    }
}

fn client_over(transport: &Arc<FakeTransport>) -> Client {
    let ctx = Context::new().with_http_open(SharedTransport(transport.clone()));
    Client::new(ctx, "http://www.example.com")
}

#[tokio::test]
async fn test_declared_get_builds_full_url() {
    let transport = FakeTransport::replying(200, "ok");
    let client = client_over(&transport);

    let do_something = Endpoint::get("/do-something/").with_timeout(Duration::from_secs(10));
    client
        .invoke(&do_something, || Params::new().with("times", 5))
        .await
        .unwrap();

    let (req, timeout) = transport.last_request();
    assert_eq!(req.url, "http://www.example.com/do-something/?times=5");
    assert_eq!(req.body, None);
    assert_eq!(timeout, Some(Duration::from_secs(10)));
}

#[tokio::test]
async fn test_declared_post_encodes_body() {
    let transport = FakeTransport::replying(200, "ok");
    let client = client_over(&transport);

    let do_post = Endpoint::post("/do-post/").with_timeout(Duration::from_secs(30));
    client
        .invoke(&do_post, || {
            Params::new()
                .with("one_thing", "this&that")
                .with("other_thing", "a/path")
        })
        .await
        .unwrap();

    let (req, _) = transport.last_request();
    assert_eq!(req.url, "http://www.example.com/do-post/");
    assert_eq!(
        req.body.as_deref(),
        Some("one_thing=this%26that&other_thing=a%2Fpath")
    );
}

#[tokio::test]
async fn test_wrapper_override_beats_client_default() {
    #[derive(Debug)]
    struct PlainWrap;

    #[derive(Debug)]
    struct Plain(BaseResponse);

    #[async_trait]
    impl ResponseView for Plain {
        fn code(&self) -> u16 {
            self.0.code()
        }

        async fn content(&mut self) -> Result<bytes::Bytes> {
            self.0.content().await
        }
    }

    impl WrapResponse for PlainWrap {
        fn wrap(&self, raw: RawResponse) -> Box<dyn ResponseView> {
            Box::new(Plain(BaseResponse::new(raw)))
        }
    }

    let transport = FakeTransport::replying(200, "not json");
    let client = client_over(&transport).with_default_wrapper(WrapJson);

    // The client default would fail to decode "not json"; the endpoint
    // override never decodes, so resolution order is observable.
    let endpoint = Endpoint::get("/do-custom/").with_wrapper(PlainWrap);
    let mut response = client.invoke(&endpoint, Params::new).await.unwrap();
    assert_eq!(response.content().await.unwrap(), "not json");
    assert!(response.decoded().await.is_err());
}

#[tokio::test]
async fn test_protocol_error_still_wrapped() {
    let transport = FakeTransport::replying(403, r#"{"detail": "Permission Denied"}"#);
    let client = client_over(&transport).with_default_wrapper(WrapJson);

    let mut response = client
        .fetch("/do-something/", Method::GET, Params::new().with("times", 5))
        .await
        .unwrap();

    assert_eq!(response.code(), 403);
    assert!(!response.is_success());
    assert_eq!(
        response.decoded().await.unwrap()["detail"],
        "Permission Denied"
    );
}

#[tokio::test]
async fn test_signed_pipeline_is_deterministic() {
    let transport = FakeTransport::replying(200, "ok");
    let signer = Signer::new("my-client", SigningKey::from("secret"), HmacSha256);
    let client = client_over(&transport).with_signer(signer);

    let endpoint = Endpoint::post("/do-post/");
    for _ in 0..2 {
        client
            .invoke(&endpoint, || Params::new().with("times", vec![5, 3]))
            .await
            .unwrap();
    }

    let requests = transport.requests.lock().unwrap();
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[0].0, requests[1].0);

    // ClientId is inserted first, the signature is the last parameter.
    let url = &requests[0].0.url;
    let query = url.split_once('?').expect("signed url has a query").1;
    let params: Vec<&str> = query.split('&').collect();
    assert_eq!(params[0], "ClientId=my-client");
    assert!(params[1].starts_with("Signature="));
    assert_eq!(params.len(), 2);
}

#[tokio::test]
async fn test_unconfigured_context_errors() {
    let client = Client::new(Context::new(), "http://www.example.com");
    let err = client
        .fetch("/do/", Method::GET, Params::new())
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Unexpected);
}
