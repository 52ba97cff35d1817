use anyhow::Result;
use apidecl::{default_context, Client, Endpoint, HmacSha256, Params, Signer, SigningKey, WrapJson};

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    // httpbin echoes the request URL back, so the appended ClientId and
    // Signature parameters are visible in the response.
    let client = Client::new(default_context(), "http://httpbin.org")
        .with_default_wrapper(WrapJson)
        .with_signer(Signer::new(
            "demo-client",
            SigningKey::from("demo-secret-key"),
            HmacSha256,
        ));

    let get_args = Endpoint::get("/get");
    let mut response = client
        .invoke(&get_args, || Params::new().with("times", 5))
        .await?;

    println!("status: {}", response.code());
    println!("signed url: {}", response.decoded().await?["url"]);

    Ok(())
}
