use anyhow::Result;
use apidecl::{default_context, Client, Endpoint, Params, WrapJson};
use std::time::Duration;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let client = Client::new(default_context(), "http://httpbin.org").with_default_wrapper(WrapJson);

    // Declare the call site once; the closure produces the data per call.
    let post_form = Endpoint::post("/post").with_timeout(Duration::from_secs(10));
    let mut response = client
        .invoke(&post_form, || {
            Params::new()
                .with("times", vec![5, 3])
                .with("one_thing", "this&that")
        })
        .await?;

    println!("status: {}", response.code());
    println!("success: {}", response.is_success());
    println!("echoed form: {}", response.decoded().await?["form"]);

    Ok(())
}
